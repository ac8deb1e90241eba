// Library root: re-exports all modules so integration tests can `use chakrabeats::*`.

pub mod action;
pub mod app;
pub mod components;
pub mod config;
pub mod db;
pub mod logging;
pub mod metadata;
pub mod player;
pub mod quotes;
pub mod theme;
pub mod tui;
pub mod ui;
pub mod visualizer;
