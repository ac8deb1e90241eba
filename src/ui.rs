// Layout and rendering: header with the current quote, visualizer and playlist
// on the left, song info on the right, status bar below, then overlays
// (help, mode selector, add-path modal) and the error bar.

use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use ratatui::Frame;

use crate::components::add_path_modal::AddPathModal;
use crate::components::centered_overlay;
use crate::components::mode_selector::ModeSelector;
use crate::components::play_controls::PlayControls;
use crate::components::playlist::PlaylistView;
use crate::components::song_info::SongInfo;
use crate::components::visualizer_panel::VisualizerPanel;
use crate::components::Component;
use crate::theme::Theme;

pub struct DrawState<'a> {
    pub theme: &'a Theme,
    pub quote: &'a str,
    pub visualizer_panel: &'a VisualizerPanel,
    pub playlist_view: &'a PlaylistView,
    pub song_info: &'a SongInfo,
    pub play_controls: &'a PlayControls,
    pub mode_selector: &'a ModeSelector,
    pub add_path_modal: &'a AddPathModal,
    pub error_message: &'a Option<String>,
    pub show_help: bool,
}

pub fn draw(frame: &mut Frame, state: &DrawState) {
    let theme = state.theme;
    frame.render_widget(
        Block::default().style(Style::default().bg(theme.background).fg(theme.text)),
        frame.area(),
    );

    let error_height = if state.error_message.is_some() { 1 } else { 0 };
    let outer = Layout::vertical([
        Constraint::Length(2),
        Constraint::Min(0),
        Constraint::Length(error_height),
        Constraint::Length(4),
    ])
    .split(frame.area());

    draw_header(frame, outer[0], theme, state.quote);

    let main = Layout::horizontal([Constraint::Percentage(65), Constraint::Percentage(35)])
        .split(outer[1]);
    let left = Layout::vertical([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(main[0]);

    state.visualizer_panel.draw(frame, left[0], theme);
    state.playlist_view.draw(frame, left[1], theme);
    state.song_info.draw(frame, main[1], theme);

    if let Some(ref msg) = state.error_message {
        let error_line = Line::from(vec![
            Span::styled(" ⚠ ", Style::default().fg(theme.error)),
            Span::styled(msg.as_str(), Style::default().fg(theme.accent)),
            Span::styled("  Esc to dismiss.", Style::default().fg(theme.text_dim)),
        ]);
        frame.render_widget(Paragraph::new(error_line), outer[2]);
    }

    state.play_controls.draw(frame, outer[3], theme);

    state.mode_selector.draw(frame, frame.area(), theme);
    state.add_path_modal.draw(frame, frame.area(), theme);

    if state.show_help {
        draw_help_overlay(frame, theme);
    }
}

fn draw_header(frame: &mut Frame, area: Rect, theme: &Theme, quote: &str) {
    let lines = vec![
        Line::from(vec![
            Span::styled(
                "⚡ ChakraBeats ⚡",
                Style::default()
                    .fg(theme.primary)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(format!("  [{}]", theme.name), Style::default().fg(theme.text_dim)),
        ]),
        Line::from(Span::styled(
            quote,
            Style::default()
                .fg(theme.accent)
                .add_modifier(Modifier::ITALIC),
        )),
    ];
    frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), area);
}

fn draw_help_overlay(frame: &mut Frame, theme: &Theme) {
    let keybindings = [
        ("q", "Quit"),
        ("Space", "Play / pause"),
        ("s", "Stop"),
        ("n / p", "Next / previous track"),
        ("[ ]", "Volume down / up"),
        ("j / k", "Move selection"),
        ("Enter", "Play selected track"),
        ("d", "Remove selected track"),
        ("c", "Clear playlist"),
        ("o", "Add file or folder"),
        ("v", "Next visualizer"),
        ("m", "Pick visualizer (1-5)"),
        ("t", "Cycle theme"),
        ("z", "Toggle shuffle"),
        ("r", "Toggle repeat"),
        ("?", "Toggle this help overlay"),
    ];

    let overlay_area = centered_overlay(frame.area(), 50, keybindings.len() as u16 + 6);
    frame.render_widget(Clear, overlay_area);

    let mut lines: Vec<Line> = vec![
        Line::from(Span::styled(
            " Keybindings ",
            Style::default()
                .fg(theme.primary)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
    ];
    for (key, desc) in &keybindings {
        lines.push(Line::from(vec![
            Span::styled(format!("  {:12}", key), Style::default().fg(theme.accent)),
            Span::styled(*desc, Style::default().fg(theme.text)),
        ]));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "  Press any key to close",
        Style::default().fg(theme.text_dim),
    )));

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.border))
        .title(" Help ")
        .title_alignment(Alignment::Center);
    frame.render_widget(Paragraph::new(lines).block(block), overlay_area);
}
