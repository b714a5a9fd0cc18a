//! Destination session persistence.
//!
//! The destination service uses OAuth; the interactive login happens in the
//! synchronizer's session bootstrap, which hands us its tokens. We persist
//! them as a flat key-value file so later runs skip the interactive login,
//! and re-read them at startup. The scraping core never touches this file.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Saved OAuth state for the destination service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TidalSession {
    pub session_id: String,
    pub token_type: String,
    pub access_token: String,
    pub refresh_token: String,
}

/// File-backed store for a [`TidalSession`].
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    /// Create a store bound to a file path. Nothing is read yet.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Read the saved session. An absent file is not an error - it just
    /// means no one has logged in yet.
    pub fn load(&self) -> Result<Option<TidalSession>, SessionError> {
        if !self.path.exists() {
            return Ok(None);
        }
        let contents = std::fs::read_to_string(&self.path)
            .map_err(|e| SessionError::Read(self.path.clone(), e))?;
        let session = toml::from_str(&contents)
            .map_err(|e| SessionError::Parse(self.path.clone(), e))?;
        tracing::info!("Loaded destination session from {:?}", self.path);
        Ok(Some(session))
    }

    /// Persist a session after a successful login.
    ///
    /// Written atomically (temp file + rename) so a crash mid-write never
    /// leaves a truncated token file behind.
    pub fn save(&self, session: &TidalSession) -> Result<(), SessionError> {
        let contents = toml::to_string_pretty(session).map_err(SessionError::Serialize)?;
        let temp_path = self.path.with_extension("toml.tmp");
        std::fs::write(&temp_path, &contents)
            .map_err(|e| SessionError::Write(temp_path.clone(), e))?;
        std::fs::rename(&temp_path, &self.path)
            .map_err(|e| SessionError::Rename(temp_path, self.path.clone(), e))?;
        tracing::info!("Saved destination session to {:?}", self.path);
        Ok(())
    }

    /// The path this store reads and writes.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Session store errors
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("Failed to read session file {0}: {1}")]
    Read(PathBuf, std::io::Error),

    #[error("Failed to parse session file {0}: {1}")]
    Parse(PathBuf, toml::de::Error),

    #[error("Failed to serialize session: {0}")]
    Serialize(toml::ser::Error),

    #[error("Failed to write session file {0}: {1}")]
    Write(PathBuf, std::io::Error),

    #[error("Failed to rename temp file {0} to {1}: {2}")]
    Rename(PathBuf, PathBuf, std::io::Error),
}
