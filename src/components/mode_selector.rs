// Overlay for picking a visualizer mode (press `m` to open, 1-5 to pick).

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
use crate::theme::Theme;
use crate::visualizer::VisualizerMode;

#[derive(Default)]
pub struct ModeSelector {
    action_tx: Option<UnboundedSender<Action>>,
    visible: bool,
    cursor: usize,
}

impl ModeSelector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Open with the cursor on the active mode.
    pub fn show(&mut self, active: VisualizerMode) {
        self.visible = true;
        self.cursor = VisualizerMode::all()
            .iter()
            .position(|m| *m == active)
            .unwrap_or(0);
    }

    pub fn hide(&mut self) {
        self.visible = false;
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    fn pick(&mut self, index: usize) {
        let Some(mode) = VisualizerMode::all().get(index).copied() else {
            return;
        };
        if let Some(tx) = &self.action_tx {
            tx.send(Action::SetVisualizerMode(mode)).ok();
            tx.send(Action::CloseModeSelector).ok();
        }
    }
}

impl Component for ModeSelector {
    fn register_action_handler(&mut self, tx: UnboundedSender<Action>) {
        self.action_tx = Some(tx);
    }

    fn handle_key_event(&mut self, key: KeyEvent) -> anyhow::Result<bool> {
        if !self.visible {
            return Ok(false);
        }
        let count = VisualizerMode::all().len();

        match key.code {
            KeyCode::Esc | KeyCode::Char('m') => {
                if let Some(tx) = &self.action_tx {
                    tx.send(Action::CloseModeSelector).ok();
                }
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.cursor = (self.cursor + 1).min(count - 1);
            }
            KeyCode::Up | KeyCode::Char('k') => {
                self.cursor = self.cursor.saturating_sub(1);
            }
            KeyCode::Enter => self.pick(self.cursor),
            KeyCode::Char(c) => {
                if let Some(n) = c.to_digit(10) {
                    if (1..=count as u32).contains(&n) {
                        self.pick(n as usize - 1);
                    }
                }
            }
            _ => {}
        }

        Ok(true)
    }

    fn draw(&self, frame: &mut Frame, area: Rect, theme: &Theme) {
        if !self.visible {
            return;
        }

        let modes = VisualizerMode::all();
        let overlay_area = centered_overlay(area, 40, modes.len() as u16 + 4);
        frame.render_widget(Clear, overlay_area);

        let block = Block::default()
            .borders(Borders::ALL)
            .title(" Visualizer ")
            .title_style(
                Style::default()
                    .fg(theme.primary)
                    .add_modifier(Modifier::BOLD),
            );

        let mut lines: Vec<Line> = modes
            .iter()
            .enumerate()
            .map(|(i, mode)| {
                let style = if i == self.cursor {
                    Style::default()
                        .fg(theme.primary)
                        .bg(theme.selection_bg)
                        .add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(theme.text)
                };
                Line::from(vec![
                    Span::styled(format!("  {} ", i + 1), Style::default().fg(theme.accent)),
                    Span::styled(mode.label(), style),
                ])
            })
            .collect();
        lines.push(Line::from(Span::styled(
            "  1-5 / Enter to pick · Esc to cancel",
            Style::default().fg(theme.text_dim),
        )));

        frame.render_widget(Paragraph::new(lines).block(block), overlay_area);
    }
}
