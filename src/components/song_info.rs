// Metadata viewer for the current song: tags, audio properties, elapsed time.

use std::sync::Arc;

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};
use tokio::sync::mpsc::UnboundedSender;

use crate::action::Action;
use crate::components::Component;
use crate::metadata::{format_duration, format_file_size, SongMetadata};
use crate::theme::Theme;

#[derive(Default)]
pub struct SongInfo {
    action_tx: Option<UnboundedSender<Action>>,
    song: Option<Arc<SongMetadata>>,
    pub position_secs: f64,
}

impl SongInfo {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_song(&mut self, song: Option<Arc<SongMetadata>>) {
        self.song = song;
        self.position_secs = 0.0;
    }

    pub fn song(&self) -> Option<&SongMetadata> {
        self.song.as_deref()
    }

    fn field<'a>(label: &'a str, value: String, theme: &Theme) -> Line<'a> {
        Line::from(vec![
            Span::styled(format!(" {:<12}", label), Style::default().fg(theme.accent)),
            Span::styled(value, Style::default().fg(theme.text)),
        ])
    }
}

impl Component for SongInfo {
    fn register_action_handler(&mut self, tx: UnboundedSender<Action>) {
        self.action_tx = Some(tx);
    }

    fn update(&mut self, action: &Action) -> anyhow::Result<Vec<Action>> {
        match action {
            Action::PlaybackPosition(pos) => self.position_secs = pos.max(0.0),
            Action::PlaybackFinished | Action::Stop => self.position_secs = 0.0,
            _ => {}
        }
        Ok(vec![])
    }

    fn draw(&self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.border))
            .title(Span::styled(" Song Info ", Style::default().fg(theme.primary)));

        let Some(song) = self.song.as_deref() else {
            let empty = Paragraph::new(Line::from(Span::styled(
                " Nothing playing",
                Style::default().fg(theme.text_dim),
            )))
            .block(block);
            frame.render_widget(empty, area);
            return;
        };

        let or_dash = |s: &str| if s.is_empty() { "-".to_string() } else { s.to_string() };
        let elapsed = format!(
            "{} / {}",
            format_duration(self.position_secs as u64),
            format_duration(song.duration_secs)
        );

        let mut lines = vec![
            Line::from(Span::styled(
                format!(" {}", song.display_title()),
                Style::default()
                    .fg(theme.primary)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                format!(" {}", song.display_artist()),
                Style::default().fg(theme.text),
            )),
            Line::from(""),
            Self::field("Album", song.display_album().to_string(), theme),
            Self::field("Year", or_dash(&song.year), theme),
            Self::field("Genre", or_dash(&song.genre), theme),
            Self::field("Track", or_dash(&song.track_number), theme),
            Self::field("Time", elapsed, theme),
            Self::field("Bitrate", format!("{} kbps", song.bitrate_kbps), theme),
            Self::field("Sample rate", format!("{} Hz", song.sample_rate), theme),
            Self::field("Channels", song.channels.to_string(), theme),
            Self::field("Size", format_file_size(song.file_size), theme),
            Self::field("File", song.file_name(), theme),
        ];
        if !song.quote.is_empty() {
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled(
                format!(" \"{}\"", song.quote),
                Style::default()
                    .fg(theme.accent)
                    .add_modifier(Modifier::ITALIC),
            )));
        }

        let paragraph = Paragraph::new(lines)
            .block(block)
            .wrap(Wrap { trim: false });
        frame.render_widget(paragraph, area);
    }
}
