// Playback delegation: mpv runs as a child process and is driven over its
// JSON IPC socket. Play, pause, stop and volume are single IPC commands.

pub mod playlist;

use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::UnixStream;
use tokio::process::{Child, Command};
use tokio::sync::{mpsc, Mutex};

use crate::action::Action;

pub struct MpvPlayer {
    pub socket_path: PathBuf,
    action_tx: Option<mpsc::UnboundedSender<Action>>,
    child: Arc<Mutex<Option<Child>>>,
    /// Bumped on every `play`/`stop`; background tasks of older runs exit on mismatch.
    generation: Arc<AtomicU64>,
}

impl Default for MpvPlayer {
    fn default() -> Self {
        Self::new()
    }
}

impl MpvPlayer {
    pub fn new() -> Self {
        let pid = std::process::id();
        Self {
            socket_path: std::env::temp_dir().join(format!("chakrabeats-mpv-{}.sock", pid)),
            action_tx: None,
            child: Arc::new(Mutex::new(None)),
            generation: Arc::new(AtomicU64::new(0)),
        }
    }

    pub fn set_action_tx(&mut self, tx: mpsc::UnboundedSender<Action>) {
        self.action_tx = Some(tx);
    }

    /// Spawn mpv for a local file at the given volume (0-100).
    pub async fn play(&mut self, path: &Path, volume: u8) -> anyhow::Result<()> {
        if let Some(tx) = &self.action_tx {
            tx.send(Action::PlaybackLoading).ok();
        }

        // Kill existing mpv if running
        self.stop().await?;

        // Remove stale socket
        let _ = std::fs::remove_file(&self.socket_path);

        let child = Command::new("mpv")
            .arg("--no-video")
            .arg("--no-terminal")
            .arg(format!("--volume={}", volume.min(100)))
            .arg(format!("--input-ipc-server={}", self.socket_path.display()))
            .arg("--")
            .arg(path)
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()?;
        tracing::info!(path = %path.display(), "mpv started");

        *self.child.lock().await = Some(child);
        let run = self.generation.fetch_add(1, Ordering::SeqCst) + 1;

        // Monitor mpv process exit
        let tx = self.action_tx.clone();
        let arc = Arc::clone(&self.child);
        let generation = Arc::clone(&self.generation);
        tokio::spawn(async move {
            loop {
                tokio::time::sleep(tokio::time::Duration::from_millis(500)).await;
                let mut guard = arc.lock().await;
                if generation.load(Ordering::SeqCst) != run {
                    break;
                }
                let Some(ref mut child) = *guard else {
                    break;
                };
                match child.try_wait() {
                    Ok(Some(status)) => {
                        tracing::debug!(?status, "mpv exited");
                        *guard = None;
                        if let Some(tx) = &tx {
                            tx.send(Action::PlaybackFinished).ok();
                        }
                        break;
                    }
                    Ok(None) => {} // still running
                    Err(e) => {
                        tracing::warn!(error = %e, "lost track of mpv process");
                        break;
                    }
                }
            }
        });

        // Position polling
        let socket_path = self.socket_path.clone();
        let tx = self.action_tx.clone();
        let generation = Arc::clone(&self.generation);
        tokio::spawn(async move {
            // Wait for socket to appear
            for _ in 0..20 {
                if socket_path.exists() {
                    break;
                }
                tokio::time::sleep(tokio::time::Duration::from_millis(100)).await;
            }

            loop {
                tokio::time::sleep(tokio::time::Duration::from_secs(1)).await;
                if generation.load(Ordering::SeqCst) != run {
                    break;
                }
                match Self::send_command_static(
                    &socket_path,
                    r#"{"command":["get_property","playback-time"]}"#,
                )
                .await
                {
                    Ok(response) => {
                        if let Some(pos) = parse_data_f64(&response) {
                            if let Some(tx) = &tx {
                                tx.send(Action::PlaybackPosition(pos)).ok();
                            }
                        }
                    }
                    Err(_) => break, // socket gone, mpv exited
                }
            }
        });

        Ok(())
    }

    /// Toggle pause via IPC.
    pub async fn toggle_pause(&self) -> anyhow::Result<()> {
        self.send_command(r#"{"command":["cycle","pause"]}"#).await?;
        Ok(())
    }

    /// Stop playback by quitting mpv.
    pub async fn stop(&self) -> anyhow::Result<()> {
        self.generation.fetch_add(1, Ordering::SeqCst);
        let _ = self.send_command(r#"{"command":["quit"]}"#).await;
        let _ = std::fs::remove_file(&self.socket_path);
        let mut guard = self.child.lock().await;
        if let Some(ref mut child) = *guard {
            let _ = child.kill().await;
        }
        *guard = None;
        Ok(())
    }

    /// Set absolute volume, clamped to 0-100.
    pub async fn set_volume(&self, volume: u8) -> anyhow::Result<()> {
        self.send_command(&format!(
            r#"{{"command":["set_property","volume",{}]}}"#,
            volume.min(100)
        ))
        .await?;
        Ok(())
    }

    async fn send_command(&self, cmd: &str) -> anyhow::Result<String> {
        Self::send_command_static(&self.socket_path, cmd).await
    }

    async fn send_command_static(socket_path: &Path, cmd: &str) -> anyhow::Result<String> {
        let mut stream = UnixStream::connect(socket_path).await?;
        let msg = format!("{}\n", cmd);
        stream.write_all(msg.as_bytes()).await?;
        let mut reader = BufReader::new(stream);
        let mut response = String::new();
        reader.read_line(&mut response).await?;
        Ok(response)
    }
}

/// Pull the numeric `data` field out of an mpv IPC reply.
pub fn parse_data_f64(response: &str) -> Option<f64> {
    serde_json::from_str::<serde_json::Value>(response)
        .ok()?
        .get("data")?
        .as_f64()
}

impl Drop for MpvPlayer {
    fn drop(&mut self) {
        // Kill the mpv process if still running
        if let Ok(mut guard) = self.child.try_lock() {
            if let Some(ref mut child) = *guard {
                let _ = child.start_kill();
            }
            *guard = None;
        }
        let _ = std::fs::remove_file(&self.socket_path);
    }
}
