//! Application-wide error types.
//!
//! Library modules carry specific error types via `thiserror`
//! ([`SpotifyError`], [`ConfigError`], [`SessionError`]); this module
//! aggregates them for code that crosses module boundaries. CLI/main uses
//! `anyhow` for convenient propagation on top.
//!
//! [`SpotifyError`]: crate::spotify::SpotifyError
//! [`ConfigError`]: crate::config::ConfigError
//! [`SessionError`]: crate::session::SessionError

/// Application-wide result type.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level application error.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// File I/O error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Source-service metadata resolution error
    #[error("Metadata error: {0}")]
    Spotify(#[from] crate::spotify::SpotifyError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] crate::config::ConfigError),

    /// Destination session store error
    #[error("Session error: {0}")]
    Session(#[from] crate::session::SessionError),
}
