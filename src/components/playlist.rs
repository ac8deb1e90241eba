// src/components/playlist.rs

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};
use tokio::sync::mpsc::UnboundedSender;

use crate::action::Action;
use crate::components::Component;
use crate::theme::Theme;

/// Scrollable playlist. Rows are display labels; the App keeps the paths.
#[derive(Default)]
pub struct PlaylistView {
    action_tx: Option<UnboundedSender<Action>>,
    pub items: Vec<String>,
    pub state: ListState,
    playing: Option<usize>,
    shuffle: bool,
    repeat: bool,
}

impl PlaylistView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the rows, keeping the selection in range.
    pub fn set_items(&mut self, items: Vec<String>, playing: Option<usize>) {
        self.items = items;
        self.playing = playing;
        let selected = match self.state.selected() {
            _ if self.items.is_empty() => None,
            Some(i) => Some(i.min(self.items.len() - 1)),
            None => Some(playing.unwrap_or(0)),
        };
        self.state.select(selected);
    }

    pub fn set_modes(&mut self, shuffle: bool, repeat: bool) {
        self.shuffle = shuffle;
        self.repeat = repeat;
    }

    pub fn selected(&self) -> Option<usize> {
        self.state.selected()
    }

    pub fn playing(&self) -> Option<usize> {
        self.playing
    }

    pub fn next(&mut self) {
        if self.items.is_empty() {
            return;
        }
        let i = match self.state.selected() {
            Some(i) => (i + 1).min(self.items.len() - 1),
            None => 0,
        };
        self.state.select(Some(i));
    }

    pub fn prev(&mut self) {
        if self.items.is_empty() {
            return;
        }
        let i = match self.state.selected() {
            Some(i) => i.saturating_sub(1),
            None => 0,
        };
        self.state.select(Some(i));
    }
}

impl Component for PlaylistView {
    fn register_action_handler(&mut self, tx: UnboundedSender<Action>) {
        self.action_tx = Some(tx);
    }

    fn handle_key_event(&mut self, key: KeyEvent) -> anyhow::Result<bool> {
        match key.code {
            KeyCode::Down | KeyCode::Char('j') => {
                self.next();
                Ok(true)
            }
            KeyCode::Up | KeyCode::Char('k') => {
                self.prev();
                Ok(true)
            }
            KeyCode::Enter => {
                if let (Some(i), Some(tx)) = (self.state.selected(), &self.action_tx) {
                    tx.send(Action::PlayIndex(i))?;
                }
                Ok(true)
            }
            KeyCode::Char('d') | KeyCode::Delete => {
                if let (Some(i), Some(tx)) = (self.state.selected(), &self.action_tx) {
                    tx.send(Action::RemoveFromPlaylist(i))?;
                }
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    fn draw(&self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let mut flags = String::new();
        if self.shuffle {
            flags.push_str(" 🔀");
        }
        if self.repeat {
            flags.push_str(" 🔁");
        }
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.border))
            .title(Span::styled(
                format!(" Playlist ({}){} ", self.items.len(), flags),
                Style::default().fg(theme.primary),
            ));

        if self.items.is_empty() {
            let hint = Paragraph::new(vec![
                Line::from(""),
                Line::from(Span::styled(
                    "  No songs yet. Press o to add a file or folder.",
                    Style::default().fg(theme.text_dim),
                )),
            ])
            .block(block);
            frame.render_widget(hint, area);
            return;
        }

        let selected = self.state.selected();
        let items: Vec<ListItem> = self
            .items
            .iter()
            .enumerate()
            .map(|(i, label)| {
                let is_playing = self.playing == Some(i);
                let marker = if is_playing { "▶ " } else { "  " };
                let title_style = if selected == Some(i) {
                    Style::default()
                        .fg(theme.primary)
                        .add_modifier(Modifier::BOLD)
                } else if is_playing {
                    Style::default().fg(theme.accent)
                } else {
                    Style::default().fg(theme.text)
                };
                let mut item = ListItem::new(Line::from(vec![
                    Span::styled(format!("{:02} ", i + 1), Style::default().fg(theme.text_dim)),
                    Span::styled(marker, Style::default().fg(theme.accent)),
                    Span::styled(label.as_str(), title_style),
                ]));
                if selected == Some(i) {
                    item = item.style(Style::default().bg(theme.selection_bg));
                }
                item
            })
            .collect();

        let list = List::new(items).block(block).highlight_symbol("▌");
        frame.render_stateful_widget(list, area, &mut self.state.clone());
    }
}
