// Bottom status bar: playback state, keybinding hints, volume, and playlist position.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use tokio::sync::mpsc::UnboundedSender;

use crate::action::Action;
use crate::components::{Component, BRAILLE_SPINNER};
use crate::metadata::format_duration;
use crate::theme::Theme;

/// Bottom status bar showing playback state, keybinding hints, and playlist info.
#[derive(Default)]
pub struct PlayControls {
    action_tx: Option<UnboundedSender<Action>>,
    playing: bool,
    paused: bool,
    buffering: bool,
    track_pos: Option<usize>,
    track_count: usize,
    volume: u8,
    position_secs: f64,
    current_title: Option<String>,
    frame_count: u64,
}

impl PlayControls {
    pub fn new(volume: u8) -> Self {
        Self {
            volume,
            ..Self::default()
        }
    }

    pub fn set_track_info(&mut self, pos: Option<usize>, len: usize) {
        self.track_pos = pos;
        self.track_count = len;
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn is_buffering(&self) -> bool {
        self.buffering
    }

    pub fn track_count(&self) -> usize {
        self.track_count
    }

    pub fn volume(&self) -> u8 {
        self.volume
    }

    pub fn current_title(&self) -> Option<&str> {
        self.current_title.as_deref()
    }
}

impl Component for PlayControls {
    fn register_action_handler(&mut self, tx: UnboundedSender<Action>) {
        self.action_tx = Some(tx);
    }

    fn update(&mut self, action: &Action) -> anyhow::Result<Vec<Action>> {
        match action {
            Action::Tick => {
                self.frame_count = self.frame_count.wrapping_add(1);
            }
            Action::PlaybackLoading => {
                self.buffering = true;
            }
            Action::PlaybackStarted { title } => {
                self.playing = true;
                self.paused = false;
                self.buffering = false;
                self.position_secs = 0.0;
                self.current_title = Some(title.clone());
            }
            Action::PlaybackPosition(pos) => {
                self.buffering = false;
                self.position_secs = *pos;
            }
            Action::PlaybackFinished | Action::Stop => {
                self.playing = false;
                self.paused = false;
                self.buffering = false;
                self.position_secs = 0.0;
                self.current_title = None;
            }
            Action::TogglePlayPause if self.playing => {
                self.paused = !self.paused;
            }
            Action::VolumeChanged(vol) => {
                self.volume = *vol;
            }
            _ => {}
        }
        Ok(vec![])
    }

    fn draw(&self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let status = if self.buffering {
            let idx = (self.frame_count / 3) as usize % BRAILLE_SPINNER.len();
            BRAILLE_SPINNER[idx]
        } else if self.paused {
            "⏸"
        } else if self.playing {
            if self.frame_count % 30 < 15 {
                "♪ ▶"
            } else {
                "♫ ▶"
            }
        } else {
            "■"
        };

        let status_color = if self.buffering {
            theme.buffering
        } else if self.playing && !self.paused {
            theme.success
        } else {
            theme.text_dim
        };

        let border_color = if self.playing && !self.paused {
            theme.primary
        } else {
            theme.border
        };

        let track_info = if self.track_count > 0 {
            format!(
                "Track {}/{}",
                self.track_pos.map_or(0, |p| p + 1),
                self.track_count
            )
        } else {
            String::new()
        };

        let div = Span::styled(" │ ", Style::default().fg(theme.border));
        let key_style = Style::default().fg(theme.text);
        let desc_style = Style::default().fg(theme.text_dim);

        let mut line1_spans = vec![
            Span::styled(
                format!(" {} ", status),
                Style::default()
                    .fg(status_color)
                    .add_modifier(Modifier::BOLD),
            ),
            div.clone(),
            Span::styled("Space", key_style),
            Span::styled(" Play/Pause", desc_style),
            div.clone(),
            Span::styled("n/p", key_style),
            Span::styled(" Next/Prev", desc_style),
            div.clone(),
            Span::styled("o", key_style),
            Span::styled(" Add", desc_style),
            div.clone(),
            Span::styled("v/m", key_style),
            Span::styled(" Viz", desc_style),
        ];

        if let Some(title) = self.current_title.as_deref() {
            let used: usize = line1_spans.iter().map(|s| s.content.chars().count()).sum();
            let available = (area.width as usize).saturating_sub(used + 12);
            if available > 5 {
                let truncated: String = title.chars().take(available).collect();
                line1_spans.push(Span::raw("  "));
                line1_spans.push(Span::styled(truncated, Style::default().fg(theme.primary)));
                line1_spans.push(Span::styled(
                    format!(" {}", format_duration(self.position_secs as u64)),
                    desc_style,
                ));
            }
        }

        let line2 = Line::from(vec![
            Span::raw("   "),
            Span::styled("t", key_style),
            Span::styled(" Theme", desc_style),
            div.clone(),
            Span::styled("z/r", key_style),
            Span::styled(" Shuffle/Repeat", desc_style),
            div.clone(),
            Span::styled("?", key_style),
            Span::styled(" Help", desc_style),
            div.clone(),
            Span::styled("[ ]", key_style),
            Span::styled(" Vol", desc_style),
            div.clone(),
            Span::styled("q", key_style),
            Span::styled(" Quit", desc_style),
            Span::raw("   "),
            Span::styled(format!("Vol {}%", self.volume), Style::default().fg(theme.primary)),
            Span::raw("  "),
            Span::styled(track_info, Style::default().fg(theme.primary)),
        ]);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border_color));

        let paragraph = Paragraph::new(vec![Line::from(line1_spans), line2]).block(block);
        frame.render_widget(paragraph, area);
    }
}
