//! Configuration file loading.
//!
//! The config is a TOML file naming the playlist mappings to synchronize:
//!
//! ```toml
//! session_file = ".session.toml"
//!
//! [[sync_playlists]]
//! spotify = "https://open.spotify.com/playlist/37i9dQZF1DX0XUsuxWHRQd"
//! tidal = "RapCaviar"
//! ```
//!
//! Unlike app settings that could fall back to defaults, a missing or broken
//! config here means there is nothing to sync, so loading fails loudly.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Tool configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Playlist mappings, synced in file order
    pub sync_playlists: Vec<PlaylistMapping>,

    /// Where the destination session tokens are persisted
    pub session_file: Option<PathBuf>,
}

/// One source playlist paired with its destination playlist name
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaylistMapping {
    /// Source playlist: a canonical URI or a bare playlist id
    pub spotify: String,

    /// Destination playlist name
    pub tidal: String,
}

impl Config {
    /// Load configuration from an explicit path.
    pub fn load(path: &Path) -> Result<Config, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::NotFound(path.to_path_buf()));
        }
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::Read(path.to_path_buf(), e))?;
        let config: Config =
            toml::from_str(&contents).map_err(|e| ConfigError::Parse(path.to_path_buf(), e))?;
        tracing::info!(
            "Loaded config from {:?} ({} playlist mappings)",
            path,
            config.sync_playlists.len()
        );
        Ok(config)
    }

    /// The session store path, relative to the working directory by default.
    pub fn session_file(&self) -> PathBuf {
        self.session_file
            .clone()
            .unwrap_or_else(|| PathBuf::from(".session.toml"))
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Config file not found: {0}")]
    NotFound(PathBuf),

    #[error("Failed to read config file {0}: {1}")]
    Read(PathBuf, std::io::Error),

    #[error("Failed to parse config file {0}: {1}")]
    Parse(PathBuf, toml::de::Error),
}
