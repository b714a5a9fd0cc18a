//! Canonical URI/ID codec.
//!
//! Every entity is identified by the last two path segments of its public
//! web URI: `https://open.spotify.com/<topic>/<id>`. The same URI string is
//! used both to fetch the page and as the resolver cache key, so the mapping
//! must be a total bijection for well-formed URIs. Malformed URIs (missing
//! segments, trailing slash, unknown topic) are rejected with
//! [`SpotifyError::MalformedUri`] instead of being misparsed.

use std::fmt;

use super::domain::SpotifyError;

/// Host all canonical entity URIs live under.
pub const WEB_HOST: &str = "https://open.spotify.com";

/// The entity kind segment of a canonical URI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Topic {
    Track,
    Album,
    Artist,
    Playlist,
}

impl Topic {
    /// The path segment used in canonical URIs.
    pub fn as_str(self) -> &'static str {
        match self {
            Topic::Track => "track",
            Topic::Album => "album",
            Topic::Artist => "artist",
            Topic::Playlist => "playlist",
        }
    }

    fn from_segment(segment: &str) -> Option<Self> {
        match segment {
            "track" => Some(Topic::Track),
            "album" => Some(Topic::Album),
            "artist" => Some(Topic::Artist),
            "playlist" => Some(Topic::Playlist),
            _ => None,
        }
    }
}

impl fmt::Display for Topic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Build the canonical URI for an entity.
pub fn id_to_uri(topic: Topic, id: &str) -> String {
    format!("{WEB_HOST}/{topic}/{id}")
}

/// Split a canonical URI into its `(topic, id)` pair.
///
/// Only the last two path segments matter; the host is not validated because
/// relationship meta elements embed full URIs whose host we don't control.
pub fn uri_to_id(uri: &str) -> Result<(Topic, String), SpotifyError> {
    let mut segments = uri.split('/').rev();
    let id = segments.next().filter(|s| !s.is_empty());
    let topic = segments.next().and_then(Topic::from_segment);
    match (topic, id) {
        (Some(topic), Some(id)) => Ok((topic, id.to_string())),
        _ => Err(SpotifyError::MalformedUri(uri.to_string())),
    }
}

/// Convenience: extract just the identifier segment of a canonical URI.
///
/// Used when reading relationship meta elements, where the topic is implied
/// by the element name (`music:musician` links artists, `music:song` tracks).
pub fn id_from_uri(uri: &str) -> Result<String, SpotifyError> {
    uri_to_id(uri).map(|(_, id)| id)
}


/// Property-based tests using proptest
#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn any_topic() -> impl Strategy<Value = Topic> {
        prop_oneof![
            Just(Topic::Track),
            Just(Topic::Album),
            Just(Topic::Artist),
            Just(Topic::Playlist),
        ]
    }

    /// Printable ASCII without `/`, which would split into extra segments
    fn printable_id() -> impl Strategy<Value = String> {
        prop::string::string_regex("[ -.0-~]{1,40}").unwrap()
    }

    proptest! {
        /// The codec must be a total bijection for well-formed URIs
        #[test]
        fn roundtrip_preserves_topic_and_id(topic in any_topic(), id in printable_id()) {
            let uri = id_to_uri(topic, &id);
            let (parsed_topic, parsed_id) = uri_to_id(&uri).unwrap();
            prop_assert_eq!(parsed_topic, topic);
            prop_assert_eq!(parsed_id, id);
        }
    }
}
