// Hosts the visualizer engine: ticks it at the frame rate against the last
// drawn panel size and rasterizes its scene as braille.

use std::cell::Cell;

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::Span,
    widgets::{Block, Borders},
    Frame,
};
use tokio::sync::mpsc::UnboundedSender;

use crate::action::Action;
use crate::components::Component;
use crate::theme::Theme;
use crate::visualizer::draw::Surface;
use crate::visualizer::{raster, Visualizer, VisualizerConfig, VisualizerMode};

pub struct VisualizerPanel {
    action_tx: Option<UnboundedSender<Action>>,
    visualizer: Visualizer,
    /// Inner size in cells from the last draw; the next tick renders at this size.
    canvas_size: Cell<(u16, u16)>,
}

impl VisualizerPanel {
    pub fn new(mode: VisualizerMode) -> Self {
        Self::with_visualizer(Visualizer::new(VisualizerConfig::default()), mode)
    }

    pub fn with_visualizer(mut visualizer: Visualizer, mode: VisualizerMode) -> Self {
        visualizer.set_mode(mode);
        Self {
            action_tx: None,
            visualizer,
            canvas_size: Cell::new((0, 0)),
        }
    }

    pub fn mode(&self) -> VisualizerMode {
        self.visualizer.mode()
    }

    pub fn set_mode(&mut self, mode: VisualizerMode) {
        self.visualizer.set_mode(mode);
    }

    /// Advance to the next mode and return it.
    pub fn cycle_mode(&mut self) -> VisualizerMode {
        let next = self.visualizer.mode().next();
        self.visualizer.set_mode(next);
        next
    }

    pub fn visualizer(&self) -> &Visualizer {
        &self.visualizer
    }

    pub fn set_canvas_size(&self, cols: u16, rows: u16) {
        self.canvas_size.set((cols, rows));
    }
}

impl Component for VisualizerPanel {
    fn register_action_handler(&mut self, tx: UnboundedSender<Action>) {
        self.action_tx = Some(tx);
    }

    fn update(&mut self, action: &Action) -> anyhow::Result<Vec<Action>> {
        match action {
            Action::Tick => {
                let (cols, rows) = self.canvas_size.get();
                self.visualizer.on_tick(Surface::from_cells(cols, rows));
            }
            Action::SetVisualizerMode(mode) => self.set_mode(*mode),
            _ => {}
        }
        Ok(vec![])
    }

    fn draw(&self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.border))
            .title(Span::styled(
                format!(" {} ", self.visualizer.mode().label()),
                Style::default()
                    .fg(theme.primary)
                    .add_modifier(Modifier::BOLD),
            ));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        self.set_canvas_size(inner.width, inner.height);
        if inner.width == 0 || inner.height == 0 {
            return;
        }
        raster::render_scene(self.visualizer.scene(), frame.buffer_mut(), inner);
    }
}
