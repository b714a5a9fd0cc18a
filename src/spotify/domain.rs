//! Domain entities for the scraped metadata graph.
//!
//! These types are OUR types - they hold whatever the source pages expose,
//! converted into plain values. Relationships are stored as ID references,
//! never as embedded copies, so the resolver cache stays canonical. Following
//! a reference is always an explicit call on [`SpotifyClient`], never an
//! implicit property access.
//!
//! [`SpotifyClient`]: super::client::SpotifyClient

use super::uri::{self, Topic};

/// An artist page, reduced to its identity and display name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artist {
    pub id: String,
    pub name: String,
}

/// An album page. `artist_ids` and `track_ids` preserve document order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Album {
    pub id: String,
    pub name: String,
    pub artist_ids: Vec<String>,
    pub track_ids: Vec<String>,
}

/// A track page. `album_id` and `artist_ids` reference other entities by ID.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Track {
    pub id: String,
    pub name: String,
    pub artist_ids: Vec<String>,
    pub album_id: String,
    /// Duration in milliseconds (source pages report whole seconds).
    pub duration_ms: u64,
    /// 1-based position on the album.
    pub track_number: u32,
}

/// A playlist page. `track_ids` preserves the playlist order exactly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Playlist {
    pub id: String,
    pub name: String,
    pub description: String,
    pub track_ids: Vec<String>,
}

impl Playlist {
    /// The canonical web URI this playlist was (or would be) fetched from.
    pub fn uri(&self) -> String {
        uri::id_to_uri(Topic::Playlist, &self.id)
    }
}

/// Errors that can occur while resolving entities from the source service.
#[derive(Debug, thiserror::Error)]
pub enum SpotifyError {
    /// Transport-level failure before any HTTP status was received.
    #[error("network error fetching {uri}: {message}")]
    Network { uri: String, message: String },

    /// The page request completed with a non-success status. Not retried.
    #[error("HTTP {status} fetching {uri}")]
    Status { status: u16, uri: String },

    /// A required embedded-metadata element was absent from the page head.
    /// Either the page is unsupported or the source markup changed.
    #[error("missing metadata element {attr}=\"{name}\"")]
    MissingMetadata { attr: String, name: String },

    /// A numeric metadata field did not parse.
    #[error("invalid value for {field}: {value:?}")]
    InvalidField { field: &'static str, value: String },

    /// A canonical URI did not have the `https://<host>/<topic>/<id>` shape.
    #[error("malformed canonical URI: {0:?}")]
    MalformedUri(String),

    /// The playlist facade was called with neither a URI nor an ID.
    #[error("playlist lookup requires a URI or an id")]
    UnsupportedLookup,
}
