// Modal dialog for adding a file or folder to the playlist (press `o` to open).

use std::path::PathBuf;

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};
use tokio::sync::mpsc::UnboundedSender;

use crate::action::Action;
use crate::components::{centered_overlay, Component};
use crate::player::playlist::collect_audio_files;
use crate::theme::Theme;

/// Modal dialog for typing a path to an audio file or a folder of them.
#[derive(Default)]
pub struct AddPathModal {
    action_tx: Option<UnboundedSender<Action>>,
    visible: bool,
    input: String,
    error: Option<String>,
}

impl AddPathModal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn show(&mut self) {
        self.visible = true;
        self.input.clear();
        self.error = None;
    }

    pub fn hide(&mut self) {
        self.visible = false;
        self.input.clear();
        self.error = None;
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    fn submit(&mut self) {
        let raw = self.input.trim();
        if raw.is_empty() {
            self.hide();
            return;
        }
        let path = expand_home(raw);
        match collect_audio_files(&path) {
            Ok(files) if files.is_empty() => {
                self.error = Some("No .mp3, .wav or .ogg files found".to_string());
            }
            Ok(files) => {
                if let Some(tx) = &self.action_tx {
                    tx.send(Action::AddPaths(files)).ok();
                }
                self.hide();
            }
            Err(e) => self.error = Some(e.to_string()),
        }
    }
}

/// Expand a leading `~/` to the home directory.
fn expand_home(raw: &str) -> PathBuf {
    match (raw.strip_prefix("~/"), dirs::home_dir()) {
        (Some(rest), Some(home)) => home.join(rest),
        _ => PathBuf::from(raw),
    }
}

impl Component for AddPathModal {
    fn register_action_handler(&mut self, tx: UnboundedSender<Action>) {
        self.action_tx = Some(tx);
    }

    fn handle_key_event(&mut self, key: KeyEvent) -> anyhow::Result<bool> {
        if !self.visible {
            return Ok(false);
        }

        match key.code {
            KeyCode::Esc => {
                if let Some(tx) = &self.action_tx {
                    tx.send(Action::CloseAddPath).ok();
                }
            }
            KeyCode::Enter => {
                self.submit();
            }
            KeyCode::Char(c) => {
                self.input.push(c);
                self.error = None;
            }
            KeyCode::Backspace => {
                self.input.pop();
                self.error = None;
            }
            _ => {}
        }

        Ok(true)
    }

    fn draw(&self, frame: &mut Frame, area: Rect, theme: &Theme) {
        if !self.visible {
            return;
        }

        let overlay_area = centered_overlay(area, 60, 6);

        frame.render_widget(Clear, overlay_area);

        let block = Block::default()
            .borders(Borders::ALL)
            .title(" Add Music ")
            .title_style(
                Style::default()
                    .fg(theme.primary)
                    .add_modifier(Modifier::BOLD),
            );

        let inner = block.inner(overlay_area);
        frame.render_widget(block, overlay_area);

        let prompt = Line::from(vec![
            Span::styled("Path: ", Style::default().fg(theme.accent)),
            Span::raw(&self.input),
            Span::styled("█", Style::default().fg(theme.text)),
        ]);
        let hint = Line::from(Span::styled(
            "  File or folder · Enter to add · Esc to cancel",
            Style::default().fg(theme.text_dim),
        ));
        let error_line = if let Some(ref err) = self.error {
            Line::from(Span::styled(
                format!("  {}", err),
                Style::default().fg(theme.error),
            ))
        } else {
            Line::from("")
        };

        let paragraph = Paragraph::new(vec![prompt, hint, error_line]);
        frame.render_widget(paragraph, inner);
    }
}
