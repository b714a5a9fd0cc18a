//! Scraping-based metadata client for the source streaming service.
//!
//! The service exposes no usable public data API to this tool, but its
//! public web pages embed Open-Graph and `music:*` meta elements carrying
//! the metadata we need. This module turns those pages into a small typed
//! entity graph:
//!
//! - **URI codec** (`uri.rs`) - bijection between canonical URIs and
//!   `(topic, id)` pairs; the URI doubles as the cache key.
//! - **Fetcher** (`fetch.rs`) - one HTTP GET per page, behind a trait seam
//!   so tests run against in-memory pages.
//! - **Parser** (`page.rs`) - typed attribute queries over the page head.
//! - **Domain** (`domain.rs`) - Artist, Album, Track, Playlist records that
//!   reference each other by ID.
//! - **Client** (`client.rs`) - per-kind memoizing resolvers; repeated
//!   resolution of the same URI never refetches.
//!
//! # Usage
//!
//! ```ignore
//! use playlist_porter::spotify::SpotifyClient;
//!
//! let client = SpotifyClient::new();
//! let playlist = client.playlist(Some(uri), None).await?;
//! let tracks = client.playlist_tracks(&playlist).await?;
//! ```

pub mod client;
pub mod domain;
pub mod fetch;
pub mod page;
pub mod uri;

pub use client::SpotifyClient;
pub use domain::{Album, Artist, Playlist, SpotifyError, Track};
pub use fetch::{HttpPageFetcher, PageFetcher};
pub use uri::Topic;
