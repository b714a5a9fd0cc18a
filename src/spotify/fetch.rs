//! Page retrieval over HTTP.
//!
//! The source service exposes no data API to this tool, so we fetch the
//! public web page for each entity and hand the raw document to the parser.
//! One GET per call - no retry, no backoff. [`PageFetcher`] is the seam that
//! lets tests substitute an in-memory fetcher for the real HTTP client.

use async_trait::async_trait;

use super::domain::SpotifyError;

/// User agent sent with every page request
const USER_AGENT: &str = concat!("playlist-porter/", env!("CARGO_PKG_VERSION"));

/// Trait for retrieving the raw document behind a canonical URI.
///
/// Implement this trait to create mock implementations for testing.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Fetch the document at `uri`, failing on any non-success status.
    /// The caller never receives a partial document.
    async fn fetch(&self, uri: &str) -> Result<String, SpotifyError>;
}

/// Production fetcher backed by `reqwest`.
pub struct HttpPageFetcher {
    http_client: reqwest::Client,
}

impl HttpPageFetcher {
    /// Create a new fetcher with the crate user agent.
    pub fn new() -> Self {
        let http_client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .expect("Failed to build HTTP client");

        Self { http_client }
    }
}

impl Default for HttpPageFetcher {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PageFetcher for HttpPageFetcher {
    async fn fetch(&self, uri: &str) -> Result<String, SpotifyError> {
        let response = self
            .http_client
            .get(uri)
            .send()
            .await
            .map_err(|e| SpotifyError::Network {
                uri: uri.to_string(),
                message: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(SpotifyError::Status {
                status: status.as_u16(),
                uri: uri.to_string(),
            });
        }

        response.text().await.map_err(|e| SpotifyError::Network {
            uri: uri.to_string(),
            message: e.to_string(),
        })
    }
}

/// Mock fetcher and page fixtures for testing.
#[cfg(test)]
pub mod mocks {
    use std::collections::HashMap;
    use std::fmt::Write;
    use std::sync::Mutex;

    use super::*;
    use crate::spotify::uri::{Topic, id_to_uri};

    /// In-memory fetcher serving predefined pages and counting requests.
    ///
    /// URIs with no page registered answer with HTTP 404, matching how the
    /// real service responds to unknown entities.
    pub struct MockPageFetcher {
        pages: HashMap<String, String>,
        hits: Mutex<HashMap<String, u32>>,
    }

    impl MockPageFetcher {
        pub fn new() -> Self {
            Self {
                pages: HashMap::new(),
                hits: Mutex::new(HashMap::new()),
            }
        }

        /// Register a page body for a URI.
        pub fn with_page(mut self, uri: &str, body: impl Into<String>) -> Self {
            self.pages.insert(uri.to_string(), body.into());
            self
        }

        /// How many times a URI was fetched.
        pub fn fetch_count(&self, uri: &str) -> u32 {
            self.hits.lock().unwrap().get(uri).copied().unwrap_or(0)
        }

        /// Total fetches across all URIs.
        pub fn total_fetches(&self) -> u32 {
            self.hits.lock().unwrap().values().sum()
        }
    }

    #[async_trait]
    impl PageFetcher for MockPageFetcher {
        async fn fetch(&self, uri: &str) -> Result<String, SpotifyError> {
            *self
                .hits
                .lock()
                .unwrap()
                .entry(uri.to_string())
                .or_insert(0) += 1;
            match self.pages.get(uri) {
                Some(body) => Ok(body.clone()),
                None => Err(SpotifyError::Status {
                    status: 404,
                    uri: uri.to_string(),
                }),
            }
        }
    }

    /// Minimal track page with the meta elements the resolver reads.
    pub fn track_page(
        title: &str,
        artist_ids: &[&str],
        album_id: &str,
        duration_secs: u32,
        track_number: u32,
    ) -> String {
        let mut head = String::new();
        meta_property(&mut head, "og:title", title);
        for id in artist_ids {
            meta_name(&mut head, "music:musician", &id_to_uri(Topic::Artist, id));
        }
        meta_name(&mut head, "music:album", &id_to_uri(Topic::Album, album_id));
        meta_name(&mut head, "music:duration", &duration_secs.to_string());
        meta_name(&mut head, "music:album:track", &track_number.to_string());
        wrap(head)
    }

    /// Minimal album page.
    pub fn album_page(title: &str, artist_ids: &[&str], track_ids: &[&str]) -> String {
        let mut head = String::new();
        meta_property(&mut head, "og:title", title);
        for id in artist_ids {
            meta_name(&mut head, "music:musician", &id_to_uri(Topic::Artist, id));
        }
        for id in track_ids {
            meta_name(&mut head, "music:song", &id_to_uri(Topic::Track, id));
        }
        wrap(head)
    }

    /// Minimal artist page.
    pub fn artist_page(title: &str) -> String {
        let mut head = String::new();
        meta_property(&mut head, "og:title", title);
        wrap(head)
    }

    /// Minimal playlist page.
    pub fn playlist_page(title: &str, description: &str, track_ids: &[&str]) -> String {
        let mut head = String::new();
        for id in track_ids {
            meta_name(&mut head, "music:song", &id_to_uri(Topic::Track, id));
        }
        meta_property(&mut head, "og:title", title);
        meta_property(&mut head, "og:description", description);
        wrap(head)
    }

    fn meta_property(head: &mut String, property: &str, content: &str) {
        let _ = write!(head, r#"<meta property="{property}" content="{content}"/>"#);
    }

    fn meta_name(head: &mut String, name: &str, content: &str) {
        let _ = write!(head, r#"<meta name="{name}" content="{content}"/>"#);
    }

    fn wrap(head: String) -> String {
        format!("<html><head>{head}</head><body></body></html>")
    }
}
