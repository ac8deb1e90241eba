// Playback and playlist management: starting tracks, navigation, editing, volume.

use std::path::PathBuf;

use rand::rngs::StdRng;

use crate::action::Action;
use crate::app::App;
use crate::components::Component;
use crate::player::playlist::Playlist;

impl App {
    /// Start mpv on the playlist's current track and show its metadata.
    pub(super) async fn start_current_track(&mut self) -> anyhow::Result<()> {
        let Some(path) = self.playlist.current().map(|p| p.to_path_buf()) else {
            return Ok(());
        };
        let song = self.metadata.lookup(&path);
        self.song_info.set_song(Some(song.clone()));
        self.quotes.draw(&mut self.rng);
        self.sync_playlist_views();
        self.persist_playlist();

        if !path.exists() {
            self.action_tx
                .send(Action::ShowError(format!("File not found: {}", path.display())))?;
            return Ok(());
        }

        let title = song.display_title().to_string();
        if let Err(e) = self.player.play(&path, self.config.general.volume).await {
            tracing::warn!(path = %path.display(), error = %e, "playback failed to start");
            self.action_tx
                .send(Action::ShowError(format!("Error during playback: {}", e)))?;
        } else {
            self.action_tx.send(Action::PlaybackStarted { title })?;
        }
        Ok(())
    }

    /// Move through the playlist with `step` and play whatever it lands on.
    pub(super) async fn play_playlist_track(
        &mut self,
        step: fn(&mut Playlist, &mut StdRng) -> bool,
    ) -> anyhow::Result<()> {
        if step(&mut self.playlist, &mut self.rng) {
            self.start_current_track().await?;
        }
        Ok(())
    }

    pub(super) async fn play_index(&mut self, index: usize) -> anyhow::Result<()> {
        if self.playlist.play_at(index).is_some() {
            self.start_current_track().await?;
        }
        Ok(())
    }

    /// Space: resume or pause a running track, or start the current one.
    pub(super) async fn toggle_play_pause(&mut self) -> anyhow::Result<()> {
        if self.play_controls.is_playing() {
            let _ = self.player.toggle_pause().await;
            self.play_controls.update(&Action::TogglePlayPause)?;
        } else {
            if self.playlist.current().is_none() && !self.playlist.is_empty() {
                self.playlist.play_at(0);
            }
            self.start_current_track().await?;
        }
        Ok(())
    }

    pub(super) async fn stop(&mut self) -> anyhow::Result<()> {
        let _ = self.player.stop().await;
        self.play_controls.update(&Action::Stop)?;
        self.song_info.update(&Action::Stop)?;
        Ok(())
    }

    pub(super) fn add_paths(&mut self, paths: Vec<PathBuf>) {
        let offered = paths.len();
        let added = paths
            .into_iter()
            .filter(|p| self.playlist.add(p.clone()))
            .count();
        tracing::info!(offered, added, "added to playlist");
        self.sync_playlist_views();
        self.persist_playlist();
    }

    /// Remove a row. Removing the playing track stops playback.
    pub(super) async fn remove_from_playlist(&mut self, index: usize) -> anyhow::Result<()> {
        let was_current = self.playlist.current_index() == Some(index);
        let Some(removed) = self.playlist.remove(index) else {
            return Ok(());
        };
        self.metadata.invalidate(&removed);
        if was_current {
            self.stop().await?;
            self.song_info.set_song(None);
        }
        self.sync_playlist_views();
        self.persist_playlist();
        Ok(())
    }

    pub(super) async fn clear_playlist(&mut self) -> anyhow::Result<()> {
        self.stop().await?;
        self.playlist.clear();
        self.metadata.clear();
        self.song_info.set_song(None);
        self.sync_playlist_views();
        self.persist_playlist();
        Ok(())
    }

    pub(super) async fn adjust_volume(&mut self, delta: i16) -> anyhow::Result<()> {
        let volume = (self.config.general.volume as i16 + delta).clamp(0, 100) as u8;
        self.config.general.volume = volume;
        let _ = self.player.set_volume(volume).await;
        self.action_tx.send(Action::VolumeChanged(volume))?;
        self.save_config_async();
        Ok(())
    }

    /// Push playlist rows, playing index and counters into the views.
    pub(crate) fn sync_playlist_views(&mut self) {
        let labels: Vec<String> = self
            .playlist
            .items()
            .iter()
            .map(|p| self.metadata.lookup(p).playlist_label())
            .collect();
        self.playlist_view
            .set_items(labels, self.playlist.current_index());
        self.playlist_view
            .set_modes(self.playlist.shuffle, self.playlist.repeat);
        self.play_controls
            .set_track_info(self.playlist.current_index(), self.playlist.len());
    }

    pub(super) fn persist_playlist(&self) {
        if let Err(e) = self
            .db
            .save_playlist(self.playlist.items(), self.playlist.current_index())
        {
            tracing::warn!(error = %e, "failed to persist playlist");
        }
    }
}
