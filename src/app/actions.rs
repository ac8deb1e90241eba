// Action dispatch: routes each Action variant to the right handler.

use crate::action::Action;
use crate::app::App;
use crate::components::Component;

impl App {
    pub async fn handle_action(&mut self, action: Action) -> anyhow::Result<()> {
        match action {
            // Lifecycle
            Action::Quit => {
                let _ = self.player.stop().await;
                self.persist_playlist();
                self.running = false;
            }

            // Playback
            Action::PlayIndex(index) => self.play_index(index).await?,
            Action::TogglePlayPause => self.toggle_play_pause().await?,
            Action::Stop => self.stop().await?,
            Action::NextTrack => {
                self.play_playlist_track(|p, rng| p.next(rng).is_some())
                    .await?
            }
            Action::PrevTrack => {
                self.play_playlist_track(|p, rng| p.prev(rng).is_some())
                    .await?
            }

            // Playlist
            Action::AddPaths(paths) => self.add_paths(paths),
            Action::RemoveFromPlaylist(index) => self.remove_from_playlist(index).await?,
            Action::ClearPlaylist => self.clear_playlist().await?,
            Action::ToggleShuffle => {
                self.playlist.shuffle = !self.playlist.shuffle;
                self.config.general.shuffle = self.playlist.shuffle;
                self.sync_playlist_views();
                self.save_config_async();
            }
            Action::ToggleRepeat => {
                self.playlist.repeat = !self.playlist.repeat;
                self.config.general.repeat = self.playlist.repeat;
                self.sync_playlist_views();
                self.save_config_async();
            }

            // Playback state updates (forwarded to display components)
            Action::PlaybackLoading => {
                self.play_controls.update(&action)?;
            }
            Action::PlaybackStarted { .. } | Action::PlaybackPosition(_) => {
                self.play_controls.update(&action)?;
                self.song_info.update(&action)?;
            }
            Action::PlaybackFinished => {
                self.play_controls.update(&action)?;
                self.song_info.update(&action)?;
                self.play_playlist_track(|p, rng| p.on_finished(rng).is_some())
                    .await?;
            }

            // Volume
            Action::VolumeUp => self.adjust_volume(5).await?,
            Action::VolumeDown => self.adjust_volume(-5).await?,
            Action::VolumeChanged(_) => {
                self.play_controls.update(&action)?;
            }

            // Visualizer
            Action::SetVisualizerMode(mode) => {
                self.visualizer_panel.set_mode(mode);
                self.config.general.visualizer = mode;
                self.save_config_async();
            }
            Action::CycleVisualizer => {
                self.config.general.visualizer = self.visualizer_panel.cycle_mode();
                self.save_config_async();
            }
            Action::OpenModeSelector => {
                self.mode_selector.show(self.visualizer_panel.mode());
            }
            Action::CloseModeSelector => self.mode_selector.hide(),

            // Add-path modal
            Action::OpenAddPath => self.add_path_modal.show(),
            Action::CloseAddPath => self.add_path_modal.hide(),

            // Theme
            Action::CycleTheme => {
                self.theme = self.theme.next();
                self.config.general.theme = self.theme.name.to_string();
                self.save_config_async();
            }

            // Errors & help
            Action::ShowError(msg) => {
                tracing::warn!(%msg, "error shown");
                self.error_message = Some(msg);
                self.error_seq += 1;
                let seq = self.error_seq;
                let tx = self.action_tx.clone();
                tokio::spawn(async move {
                    tokio::time::sleep(tokio::time::Duration::from_secs(5)).await;
                    tx.send(Action::ExpireError(seq)).ok();
                });
            }
            Action::ClearError => self.error_message = None,
            // A newer error restarts the countdown.
            Action::ExpireError(seq) if seq == self.error_seq => self.error_message = None,
            Action::ExpireError(_) => {}
            Action::ShowHelp => self.show_help = true,
            Action::HideHelp => self.show_help = false,

            Action::Tick => {
                self.visualizer_panel.update(&action)?;
                self.play_controls.update(&action)?;
            }
        }
        Ok(())
    }

    /// Write the current config to disk without blocking the event loop.
    pub(super) fn save_config_async(&self) {
        let Some(path) = self.config_path.clone() else {
            return;
        };
        let config = self.config.clone();
        tokio::spawn(async move {
            if let Err(e) = config.save_to(&path) {
                tracing::warn!(error = %e, "failed to save config");
            }
        });
    }
}
