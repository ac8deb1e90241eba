// Central coordinator: owns all components, the player, and the database.
// Runs the event loop (key → Action → handle_action → component updates → draw).

mod actions;
mod input;
mod playback;

use std::path::PathBuf;

use rand::rngs::StdRng;
use rand::SeedableRng;
use tokio::sync::mpsc;

use crate::action::Action;
use crate::components::add_path_modal::AddPathModal;
use crate::components::mode_selector::ModeSelector;
use crate::components::play_controls::PlayControls;
use crate::components::playlist::PlaylistView;
use crate::components::song_info::SongInfo;
use crate::components::visualizer_panel::VisualizerPanel;
use crate::components::Component;
use crate::config::Config;
use crate::db::Database;
use crate::metadata::MetadataCache;
use crate::player::playlist::Playlist;
use crate::player::MpvPlayer;
use crate::quotes::QuoteBook;
use crate::theme::Theme;
use crate::tui::{Tui, TuiEvent};
use crate::ui;

/// Top-level coordinator: owns every component, the mpv player, the playlist
/// and the database. Runs the main event loop (key → action → component update → draw).
pub struct App {
    running: bool,
    action_tx: mpsc::UnboundedSender<Action>,
    action_rx: mpsc::UnboundedReceiver<Action>,

    // Components
    pub visualizer_panel: VisualizerPanel,
    pub playlist_view: PlaylistView,
    pub song_info: SongInfo,
    pub play_controls: PlayControls,
    pub mode_selector: ModeSelector,
    pub add_path_modal: AddPathModal,

    // State
    player: MpvPlayer,
    pub(crate) db: Database,
    pub config: Config,
    /// Where config changes are written. `None` keeps them in memory only.
    config_path: Option<PathBuf>,
    pub theme: Theme,
    pub playlist: Playlist,
    pub metadata: MetadataCache,
    pub quotes: QuoteBook,
    pub(crate) rng: StdRng,
    pub show_help: bool,
    pub error_message: Option<String>,
    /// Bumped per shown error; only the latest error's timer clears the bar.
    error_seq: u64,
}

impl App {
    pub fn new(config: Config) -> anyhow::Result<Self> {
        let db = Database::open()?;
        let mut app = Self::with_db(config, db)?;
        app.config_path = Some(Config::config_path());
        Ok(app)
    }

    /// Build an app on an explicit database; config changes are not written to disk.
    pub fn with_db(config: Config, db: Database) -> anyhow::Result<Self> {
        Self::with_rng(config, db, StdRng::from_os_rng())
    }

    /// Like [`App::with_db`] with a seeded RNG for shuffle and quote choice.
    pub fn with_seed(config: Config, db: Database, seed: u64) -> anyhow::Result<Self> {
        Self::with_rng(config, db, StdRng::seed_from_u64(seed))
    }

    fn with_rng(config: Config, db: Database, mut rng: StdRng) -> anyhow::Result<Self> {
        let (action_tx, action_rx) = mpsc::unbounded_channel();

        let mut visualizer_panel = VisualizerPanel::new(config.general.visualizer);
        let mut playlist_view = PlaylistView::new();
        let mut song_info = SongInfo::new();
        let mut play_controls = PlayControls::new(config.general.volume);
        let mut mode_selector = ModeSelector::new();
        let mut add_path_modal = AddPathModal::new();

        for component in [
            &mut visualizer_panel as &mut dyn Component,
            &mut playlist_view,
            &mut song_info,
            &mut play_controls,
            &mut mode_selector,
            &mut add_path_modal,
        ] {
            component.register_action_handler(action_tx.clone());
        }

        let mut player = MpvPlayer::new();
        player.set_action_tx(action_tx.clone());

        let (items, current_index) = db.load_playlist()?;
        let mut playlist = Playlist::restore(items, current_index);
        playlist.shuffle = config.general.shuffle;
        playlist.repeat = config.general.repeat;
        tracing::info!(tracks = playlist.len(), "playlist restored");

        let mut quotes = QuoteBook::new();
        quotes.draw(&mut rng);

        let mut app = Self {
            running: true,
            action_tx,
            action_rx,
            visualizer_panel,
            playlist_view,
            song_info,
            play_controls,
            mode_selector,
            add_path_modal,
            player,
            db,
            theme: Theme::from_name(&config.general.theme),
            config,
            config_path: None,
            playlist,
            metadata: MetadataCache::new(),
            quotes,
            rng,
            show_help: false,
            error_message: None,
            error_seq: 0,
        };
        app.sync_playlist_views();
        Ok(app)
    }

    pub fn action_sender(&self) -> mpsc::UnboundedSender<Action> {
        self.action_tx.clone()
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub async fn run(&mut self) -> anyhow::Result<()> {
        let mut tui = Tui::new(self.config.general.frame_rate)?;
        tui.enter()?;

        while self.running {
            let state = ui::DrawState {
                theme: &self.theme,
                quote: self.quotes.current(),
                visualizer_panel: &self.visualizer_panel,
                playlist_view: &self.playlist_view,
                song_info: &self.song_info,
                play_controls: &self.play_controls,
                mode_selector: &self.mode_selector,
                add_path_modal: &self.add_path_modal,
                error_message: &self.error_message,
                show_help: self.show_help,
            };
            tui.draw(|frame| ui::draw(frame, &state))?;

            tokio::select! {
                Some(event) = tui.event_rx.recv() => {
                    match event {
                        TuiEvent::Key(key) => self.handle_key(key)?,
                        TuiEvent::Resize(cols, rows) => {
                            // the next draw re-lays out and resizes the visualizer surface
                            tracing::debug!(cols, rows, "terminal resized");
                        }
                    }
                }
                Some(()) = tui.tick_rx.recv() => {
                    self.handle_action(Action::Tick).await?;
                }
                Some(action) = self.action_rx.recv() => {
                    if let Err(e) = self.handle_action(action).await {
                        tracing::error!(error = %e, "action failed");
                        self.action_tx.send(Action::ShowError(e.to_string()))?;
                    }
                }
            }
        }

        tui.exit()?;
        Ok(())
    }

    /// Drain and handle every queued action.
    pub async fn flush_actions(&mut self) {
        while let Ok(action) = self.action_rx.try_recv() {
            let _ = self.handle_action(action).await;
        }
    }
}
