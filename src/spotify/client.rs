//! Memoizing entity resolver for the scraped metadata graph.
//!
//! One resolution function per entity kind, all following the same shape:
//! compute the canonical URI, return the cached entity if this URI was
//! resolved before, otherwise fetch the page, extract the fields, construct
//! the entity and cache it. The cache is scoped to the client (fresh client,
//! fresh cache) and lives for the client's lifetime - source pages are
//! treated as immutable for the duration of a sync run, so nothing is ever
//! evicted or invalidated.
//!
//! Cross-entity references (track → album → artists) are followed through
//! explicit methods that return `Result`, so every fetch is visible at the
//! call site. Printing an entity fetches nothing.

use std::collections::HashMap;

use tokio::sync::Mutex;

use super::domain::{Album, Artist, Playlist, SpotifyError, Track};
use super::fetch::{HttpPageFetcher, PageFetcher};
use super::page::MetaPage;
use super::uri::{self, Topic};

/// Client for resolving entities from the source service's public pages.
pub struct SpotifyClient<F = HttpPageFetcher> {
    fetcher: F,
    // Locked across fetch+parse so the same URI is never fetched twice,
    // even when callers overlap.
    cache: Mutex<EntityCache>,
}

/// Resolved entities keyed by canonical URI.
#[derive(Default)]
struct EntityCache {
    tracks: HashMap<String, Track>,
    albums: HashMap<String, Album>,
    artists: HashMap<String, Artist>,
    playlists: HashMap<String, Playlist>,
}

impl SpotifyClient<HttpPageFetcher> {
    /// Create a client backed by the real HTTP fetcher.
    pub fn new() -> Self {
        Self::with_fetcher(HttpPageFetcher::new())
    }
}

impl Default for SpotifyClient<HttpPageFetcher> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F: PageFetcher> SpotifyClient<F> {
    /// Create a client with a custom page fetcher and an empty cache.
    pub fn with_fetcher(fetcher: F) -> Self {
        Self {
            fetcher,
            cache: Mutex::new(EntityCache::default()),
        }
    }

    /// Access the underlying fetcher (tests inspect its request counts).
    #[cfg(test)]
    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    /// Look up a playlist by URI or, failing that, by ID.
    ///
    /// This is the entry point the synchronizer drives; the other lookups
    /// are reached transitively from here or called with explicit IDs.
    pub async fn playlist(
        &self,
        uri: Option<&str>,
        id: Option<&str>,
    ) -> Result<Playlist, SpotifyError> {
        match (uri, id) {
            (Some(uri), _) => self.resolve_playlist(uri).await,
            (None, Some(id)) => self.playlist_by_id(id).await,
            (None, None) => Err(SpotifyError::UnsupportedLookup),
        }
    }

    /// Resolve a track by its identifier.
    pub async fn track_by_id(&self, id: &str) -> Result<Track, SpotifyError> {
        self.resolve_track(&uri::id_to_uri(Topic::Track, id)).await
    }

    /// Resolve an album by its identifier.
    pub async fn album_by_id(&self, id: &str) -> Result<Album, SpotifyError> {
        self.resolve_album(&uri::id_to_uri(Topic::Album, id)).await
    }

    /// Resolve an artist by its identifier.
    pub async fn artist_by_id(&self, id: &str) -> Result<Artist, SpotifyError> {
        self.resolve_artist(&uri::id_to_uri(Topic::Artist, id)).await
    }

    /// Resolve a playlist by its identifier.
    pub async fn playlist_by_id(&self, id: &str) -> Result<Playlist, SpotifyError> {
        self.resolve_playlist(&uri::id_to_uri(Topic::Playlist, id))
            .await
    }

    /// The album a track belongs to.
    pub async fn track_album(&self, track: &Track) -> Result<Album, SpotifyError> {
        self.album_by_id(&track.album_id).await
    }

    /// A track's artists, in credit order.
    pub async fn track_artists(&self, track: &Track) -> Result<Vec<Artist>, SpotifyError> {
        self.artists_by_ids(&track.artist_ids).await
    }

    /// An album's artists, in credit order.
    pub async fn album_artists(&self, album: &Album) -> Result<Vec<Artist>, SpotifyError> {
        self.artists_by_ids(&album.artist_ids).await
    }

    /// An album's tracks, in album order.
    pub async fn album_tracks(&self, album: &Album) -> Result<Vec<Track>, SpotifyError> {
        let mut tracks = Vec::with_capacity(album.track_ids.len());
        for id in &album.track_ids {
            tracks.push(self.track_by_id(id).await?);
        }
        Ok(tracks)
    }

    /// A playlist's full track list, in playlist order.
    ///
    /// A failure on any track surfaces immediately; there is no partial
    /// result and no distinction from a top-level lookup failure.
    pub async fn playlist_tracks(&self, playlist: &Playlist) -> Result<Vec<Track>, SpotifyError> {
        let mut tracks = Vec::with_capacity(playlist.track_ids.len());
        for id in &playlist.track_ids {
            tracks.push(self.track_by_id(id).await?);
        }
        Ok(tracks)
    }

    async fn artists_by_ids(&self, ids: &[String]) -> Result<Vec<Artist>, SpotifyError> {
        let mut artists = Vec::with_capacity(ids.len());
        for id in ids {
            artists.push(self.artist_by_id(id).await?);
        }
        Ok(artists)
    }

    async fn resolve_track(&self, uri: &str) -> Result<Track, SpotifyError> {
        let mut cache = self.cache.lock().await;
        if let Some(track) = cache.tracks.get(uri) {
            return Ok(track.clone());
        }
        let id = uri::id_from_uri(uri)?;
        let document = self.fetcher.fetch(uri).await?;
        let track = track_from_page(id, &MetaPage::parse(&document))?;
        tracing::debug!("Resolved track {:?} from {}", track.name, uri);
        cache.tracks.insert(uri.to_string(), track.clone());
        Ok(track)
    }

    async fn resolve_album(&self, uri: &str) -> Result<Album, SpotifyError> {
        let mut cache = self.cache.lock().await;
        if let Some(album) = cache.albums.get(uri) {
            return Ok(album.clone());
        }
        let id = uri::id_from_uri(uri)?;
        let document = self.fetcher.fetch(uri).await?;
        let album = album_from_page(id, &MetaPage::parse(&document))?;
        tracing::debug!("Resolved album {:?} from {}", album.name, uri);
        cache.albums.insert(uri.to_string(), album.clone());
        Ok(album)
    }

    async fn resolve_artist(&self, uri: &str) -> Result<Artist, SpotifyError> {
        let mut cache = self.cache.lock().await;
        if let Some(artist) = cache.artists.get(uri) {
            return Ok(artist.clone());
        }
        let id = uri::id_from_uri(uri)?;
        let document = self.fetcher.fetch(uri).await?;
        let artist = artist_from_page(id, &MetaPage::parse(&document))?;
        tracing::debug!("Resolved artist {:?} from {}", artist.name, uri);
        cache.artists.insert(uri.to_string(), artist.clone());
        Ok(artist)
    }

    async fn resolve_playlist(&self, uri: &str) -> Result<Playlist, SpotifyError> {
        let mut cache = self.cache.lock().await;
        if let Some(playlist) = cache.playlists.get(uri) {
            return Ok(playlist.clone());
        }
        let id = uri::id_from_uri(uri)?;
        let document = self.fetcher.fetch(uri).await?;
        let playlist = playlist_from_page(id, &MetaPage::parse(&document))?;
        tracing::debug!(
            "Resolved playlist {:?} ({} tracks) from {}",
            playlist.name,
            playlist.track_ids.len(),
            uri
        );
        cache.playlists.insert(uri.to_string(), playlist.clone());
        Ok(playlist)
    }
}

fn track_from_page(id: String, page: &MetaPage) -> Result<Track, SpotifyError> {
    let name = page.require("property", "og:title")?;
    let artist_ids = ids_from_uris(page.all("name", "music:musician"))?;
    let album_id = uri::id_from_uri(&page.require("name", "music:album")?)?;
    let duration_secs: u64 =
        parse_number("music:duration", &page.require("name", "music:duration")?)?;
    let track_number =
        parse_number("music:album:track", &page.require("name", "music:album:track")?)?;
    Ok(Track {
        id,
        name,
        artist_ids,
        album_id,
        // Pages report whole seconds; the rest of the pipeline wants ms.
        duration_ms: duration_secs * 1000,
        track_number,
    })
}

fn album_from_page(id: String, page: &MetaPage) -> Result<Album, SpotifyError> {
    let name = page.require("property", "og:title")?;
    let artist_ids = ids_from_uris(page.all("name", "music:musician"))?;
    let track_ids = ids_from_uris(page.all("name", "music:song"))?;
    Ok(Album {
        id,
        name,
        artist_ids,
        track_ids,
    })
}

fn artist_from_page(id: String, page: &MetaPage) -> Result<Artist, SpotifyError> {
    let name = page.require("property", "og:title")?;
    Ok(Artist { id, name })
}

fn playlist_from_page(id: String, page: &MetaPage) -> Result<Playlist, SpotifyError> {
    let track_ids = ids_from_uris(page.all("name", "music:song"))?;
    let name = page.require("property", "og:title")?;
    let description = page.require("property", "og:description")?;
    Ok(Playlist {
        id,
        name,
        description,
        track_ids,
    })
}

/// Relationship meta elements embed full canonical URIs; keep only the ids.
fn ids_from_uris(uris: Vec<String>) -> Result<Vec<String>, SpotifyError> {
    uris.iter().map(|u| uri::id_from_uri(u)).collect()
}

fn parse_number<T: std::str::FromStr>(field: &'static str, raw: &str) -> Result<T, SpotifyError> {
    raw.trim()
        .parse()
        .map_err(|_| SpotifyError::InvalidField {
            field,
            value: raw.to_string(),
        })
}
