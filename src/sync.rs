//! Sync gathering - pairs resolved source playlists with their destinations.
//!
//! The actual cross-service write path lives in the downstream synchronizer;
//! this module produces its input: every configured source playlist, fully
//! resolved (playlist plus ordered track list), tagged with the destination
//! playlist name it should reconcile against.

use crate::config::Config;
use crate::error::Result;
use crate::spotify::{PageFetcher, Playlist, SpotifyClient, Track};

/// A resolved source playlist and where it should end up.
#[derive(Debug, Clone)]
pub struct PlaylistSync {
    pub source: Playlist,
    /// Full track list, in playlist order.
    pub tracks: Vec<Track>,
    /// Destination playlist name the synchronizer matches against.
    pub destination: String,
}

/// Resolve every mapping in the config, in config order.
///
/// Any resolution failure aborts the whole gather - a partial plan would
/// silently drop playlists from the sync.
pub async fn gather_from_config<F: PageFetcher>(
    client: &SpotifyClient<F>,
    config: &Config,
) -> Result<Vec<PlaylistSync>> {
    let mut syncs = Vec::with_capacity(config.sync_playlists.len());
    for mapping in &config.sync_playlists {
        let source = resolve_source(client, &mapping.spotify).await?;
        let tracks = client.playlist_tracks(&source).await?;
        tracing::info!(
            "Gathered {:?} ({} tracks) -> {:?}",
            source.name,
            tracks.len(),
            mapping.tidal
        );
        syncs.push(PlaylistSync {
            source,
            tracks,
            destination: mapping.tidal.clone(),
        });
    }
    Ok(syncs)
}

/// Resolve a single playlist given on the command line.
///
/// With no configured mapping to consult, the destination keeps the source
/// playlist's own name, which is how the synchronizer picks a match.
pub async fn gather_uri<F: PageFetcher>(
    client: &SpotifyClient<F>,
    uri: &str,
) -> Result<PlaylistSync> {
    let source = client.playlist(Some(uri), None).await?;
    let tracks = client.playlist_tracks(&source).await?;
    tracing::info!("Gathered {:?} ({} tracks)", source.name, tracks.len());
    let destination = source.name.clone();
    Ok(PlaylistSync {
        source,
        tracks,
        destination,
    })
}

/// Config mappings accept either a canonical URI or a bare playlist id.
async fn resolve_source<F: PageFetcher>(
    client: &SpotifyClient<F>,
    spotify: &str,
) -> Result<Playlist> {
    let playlist = if spotify.contains("://") {
        client.playlist(Some(spotify), None).await?
    } else {
        client.playlist(None, Some(spotify)).await?
    };
    Ok(playlist)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PlaylistMapping;
    use crate::spotify::SpotifyError;
    use crate::spotify::fetch::mocks::{MockPageFetcher, playlist_page, track_page};

    fn client() -> SpotifyClient<MockPageFetcher> {
        let fetcher = MockPageFetcher::new()
            .with_page(
                "https://open.spotify.com/playlist/pl1",
                playlist_page("Road Trip", "windows down", &["A"]),
            )
            .with_page(
                "https://open.spotify.com/playlist/pl2",
                playlist_page("Focus", "deep work", &["A"]),
            )
            .with_page(
                "https://open.spotify.com/track/A",
                track_page("First Light", &["art1"], "alb1", 213, 1),
            );
        SpotifyClient::with_fetcher(fetcher)
    }

    fn mapping(spotify: &str, tidal: &str) -> PlaylistMapping {
        PlaylistMapping {
            spotify: spotify.to_string(),
            tidal: tidal.to_string(),
        }
    }

    #[tokio::test]
    async fn test_gather_from_config_preserves_mapping_order() {
        let config = Config {
            sync_playlists: vec![
                mapping("https://open.spotify.com/playlist/pl2", "Deep Work"),
                mapping("pl1", "Driving"),
            ],
            session_file: None,
        };
        let client = client();

        let syncs = gather_from_config(&client, &config).await.unwrap();
        assert_eq!(syncs.len(), 2);
        assert_eq!(syncs[0].source.name, "Focus");
        assert_eq!(syncs[0].destination, "Deep Work");
        assert_eq!(syncs[1].source.name, "Road Trip");
        assert_eq!(syncs[1].destination, "Driving");
        assert_eq!(syncs[1].tracks[0].name, "First Light");
    }

    #[tokio::test]
    async fn test_gather_uri_uses_source_name_as_destination() {
        let client = client();
        let sync = gather_uri(&client, "https://open.spotify.com/playlist/pl1")
            .await
            .unwrap();
        assert_eq!(sync.destination, "Road Trip");
        assert_eq!(sync.tracks.len(), 1);
    }

    #[tokio::test]
    async fn test_shared_track_is_fetched_once_across_playlists() {
        let config = Config {
            sync_playlists: vec![mapping("pl1", "Driving"), mapping("pl2", "Deep Work")],
            session_file: None,
        };
        let client = client();

        gather_from_config(&client, &config).await.unwrap();
        assert_eq!(
            client
                .fetcher()
                .fetch_count("https://open.spotify.com/track/A"),
            1
        );
    }

    #[tokio::test]
    async fn test_unknown_playlist_aborts_gather() {
        let config = Config {
            sync_playlists: vec![mapping("missing", "Nowhere")],
            session_file: None,
        };
        let client = client();

        let err = gather_from_config(&client, &config).await.unwrap_err();
        assert!(matches!(
            err,
            crate::error::Error::Spotify(SpotifyError::Status { status: 404, .. })
        ));
    }
}
