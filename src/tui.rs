// Terminal backend: raw-mode setup, event polling, and the frame-rate tick
// that drives the visualizer. Ticks never queue up behind a slow frame.
// A panic hook restores the terminal first.

use crossterm::{
    event::{self, Event as CrosstermEvent, KeyEvent, KeyEventKind},
    execute,
    terminal::{self, EnterAlternateScreen, LeaveAlternateScreen},
};
use futures_util::StreamExt;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::time::Duration;
use tokio::sync::mpsc;

type CrosstermTerminal = Terminal<CrosstermBackend<std::io::Stderr>>;

pub struct Tui {
    terminal: CrosstermTerminal,
    pub event_rx: mpsc::UnboundedReceiver<TuiEvent>,
    event_tx: mpsc::UnboundedSender<TuiEvent>,
    /// Frame ticks, at most one pending.
    pub tick_rx: mpsc::Receiver<()>,
    tick_tx: mpsc::Sender<()>,
    frame_rate: f64,
}

#[derive(Debug)]
pub enum TuiEvent {
    Key(KeyEvent),
    /// New terminal size in cells.
    Resize(u16, u16),
}

/// Channel for frame ticks. Holds a single pending tick.
pub fn tick_channel() -> (mpsc::Sender<()>, mpsc::Receiver<()>) {
    mpsc::channel(1)
}

/// Queue a frame tick unless one is still waiting. Returns whether it was queued.
pub fn offer_tick(tx: &mpsc::Sender<()>) -> bool {
    tx.try_send(()).is_ok()
}

impl Tui {
    pub fn new(frame_rate: f64) -> anyhow::Result<Self> {
        let frame_rate = if frame_rate > 0.0 { frame_rate } else { 30.0 };
        let backend = CrosstermBackend::new(std::io::stderr());
        let terminal = Terminal::new(backend)?;
        let (event_tx, event_rx) = mpsc::unbounded_channel();
        let (tick_tx, tick_rx) = tick_channel();
        Ok(Self {
            terminal,
            event_rx,
            event_tx,
            tick_rx,
            tick_tx,
            frame_rate,
        })
    }

    pub fn enter(&mut self) -> anyhow::Result<()> {
        install_panic_hook();
        terminal::enable_raw_mode()?;
        execute!(std::io::stderr(), EnterAlternateScreen)?;
        self.terminal.hide_cursor()?;
        self.terminal.clear()?;
        self.start_event_polling();
        Ok(())
    }

    pub fn exit(&mut self) -> anyhow::Result<()> {
        restore()?;
        self.terminal.show_cursor()?;
        Ok(())
    }

    fn start_event_polling(&self) {
        let tx = self.event_tx.clone();
        let tick_tx = self.tick_tx.clone();
        let tick_rate = Duration::from_secs_f64(1.0 / self.frame_rate);

        tokio::spawn(async move {
            let mut reader = event::EventStream::new();
            let mut tick_interval = tokio::time::interval(tick_rate);
            tick_interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

            loop {
                tokio::select! {
                    event = reader.next() => {
                        match event {
                            Some(Ok(CrosstermEvent::Key(key))) => {
                                if key.kind == KeyEventKind::Press {
                                    tx.send(TuiEvent::Key(key)).ok();
                                }
                            }
                            Some(Ok(CrosstermEvent::Resize(cols, rows))) => {
                                tx.send(TuiEvent::Resize(cols, rows)).ok();
                            }
                            Some(Err(e)) => {
                                tracing::error!(error = %e, "terminal event stream failed");
                                break;
                            }
                            None => break,
                            _ => {}
                        }
                    }
                    _ = tick_interval.tick() => {
                        // Dropped while the main loop still owes a frame.
                        if !offer_tick(&tick_tx) {
                            tracing::trace!("frame tick dropped");
                        }
                    }
                }
            }
        });
    }

    pub fn draw<F>(&mut self, f: F) -> anyhow::Result<()>
    where
        F: FnOnce(&mut ratatui::Frame),
    {
        self.terminal.draw(f)?;
        Ok(())
    }
}

/// Leave raw mode and the alternate screen.
pub fn restore() -> anyhow::Result<()> {
    terminal::disable_raw_mode()?;
    execute!(std::io::stderr(), LeaveAlternateScreen)?;
    Ok(())
}

fn install_panic_hook() {
    let hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = restore();
        tracing::error!(%info, "panic");
        hook(info);
    }));
}
