//! Configuration file handling for polytension.
//!
//! Settings live in `config.toml` under the platform config directory. Every
//! field has a default, so a partial or missing file is fine.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

const CONFIG_FILE: &str = "config.toml";

/// Frame rate bounds accepted from configuration.
const MIN_FPS: u32 = 1;
const MAX_FPS: u32 = 240;

/// Errors from reading or writing the configuration file.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to access {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// User preferences. Seeds are never stored here; they travel in the URL.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Target frames per second.
    pub fps: u32,
    /// Location used when none is given on the command line.
    pub base_url: String,
    /// Show the status line with the shareable URL.
    pub show_status: bool,
    /// Default log filter when `RUST_LOG` is unset.
    pub log_level: String,
    /// Write logs to this file; logging is off without it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            fps: 60,
            base_url: "https://polytension.local/".to_string(),
            show_status: true,
            log_level: "info".to_string(),
            log_file: None,
        }
    }
}

impl Config {
    /// Platform config file path, if a home directory can be found.
    pub fn default_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "polytension").map(|dirs| dirs.config_dir().join(CONFIG_FILE))
    }

    pub fn from_toml(input: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(input)?)
    }

    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let input = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&input)
    }

    /// Load from `path`, or defaults when the file does not exist.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load_from(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Write the configuration, creating parent directories as needed.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let io_err = |source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        };
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(io_err)?;
        }
        fs::write(path, self.to_toml()?).map_err(io_err)
    }

    /// Frame rate clamped to the supported range.
    pub fn effective_fps(&self) -> u32 {
        self.fps.clamp(MIN_FPS, MAX_FPS)
    }

    /// Delay between frames.
    pub fn frame_interval(&self) -> Duration {
        Duration::from_secs(1) / self.effective_fps()
    }
}
