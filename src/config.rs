// User configuration loaded from ~/.config/chakrabeats/config.toml.
// Falls back to sensible defaults when the file is missing.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::theme::THEME_KAMINARI;
use crate::visualizer::VisualizerMode;

/// Application configuration, deserialized from `~/.config/chakrabeats/config.toml`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub general: GeneralConfig,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct GeneralConfig {
    /// Target TUI refresh rate in frames per second (default: 30).
    #[serde(default = "default_frame_rate")]
    pub frame_rate: f64,
    /// Theme name, one of the three chakra modes.
    #[serde(default = "default_theme")]
    pub theme: String,
    /// Playback volume, 0-100.
    #[serde(default = "default_volume")]
    pub volume: u8,
    /// Active visualizer mode id. Unknown ids load as `chakra_bars`.
    #[serde(default)]
    pub visualizer: VisualizerMode,
    #[serde(default)]
    pub shuffle: bool,
    #[serde(default)]
    pub repeat: bool,
}

fn default_frame_rate() -> f64 {
    30.0
}

fn default_theme() -> String {
    THEME_KAMINARI.to_string()
}

fn default_volume() -> u8 {
    70
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            frame_rate: default_frame_rate(),
            theme: default_theme(),
            volume: default_volume(),
            visualizer: VisualizerMode::default(),
            shuffle: false,
            repeat: false,
        }
    }
}

impl Config {
    /// Read config from disk, or return defaults if the file doesn't exist.
    pub fn load() -> anyhow::Result<Self> {
        Self::load_from(&Self::config_path())
    }

    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            let mut config: Config = toml::from_str(&content)?;
            config.general.volume = config.general.volume.min(100);
            if !(config.general.frame_rate > 0.0) {
                config.general.frame_rate = default_frame_rate();
            }
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    pub fn save_to(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, toml::to_string_pretty(self)?)?;
        tracing::debug!(path = %path.display(), "config saved");
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("chakrabeats")
            .join("config.toml")
    }
}
