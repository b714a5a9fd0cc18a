//! CLI definition and dispatch.
//!
//! Mirrors the sync workflow: load the config, check for a saved
//! destination session, resolve the source playlists, and hand the gathered
//! plan to the synchronizer (printed here, since the destination write path
//! is the downstream collaborator).

use std::path::PathBuf;

use clap::Parser;
use tokio::runtime::Runtime;

use crate::config::Config;
use crate::error::Result;
use crate::session::SessionStore;
use crate::spotify::SpotifyClient;
use crate::sync::{self, PlaylistSync};

/// Playlist Porter CLI
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Location of the config file
    #[arg(long, default_value = "config.toml")]
    pub config: PathBuf,

    /// Synchronize a specific URI instead of the configured list
    #[arg(long)]
    pub uri: Option<String>,

    /// Synchronize the favorites
    #[arg(long)]
    pub sync_favorites: bool,
}

/// Run the sync gather on a fresh runtime.
pub fn run(cli: &Cli) -> Result<()> {
    let rt = Runtime::new()?;
    rt.block_on(run_async(cli))
}

async fn run_async(cli: &Cli) -> Result<()> {
    let config = Config::load(&cli.config)?;

    let store = SessionStore::new(config.session_file());
    match store.load()? {
        Some(_) => tracing::info!("Found saved destination session"),
        None => tracing::warn!(
            "No saved destination session at {:?}; the synchronizer will need an interactive login",
            store.path()
        ),
    }

    if cli.sync_favorites {
        tracing::warn!("Favorites sync is handled by the synchronizer; skipping");
    }

    let client = SpotifyClient::new();
    let syncs = if let Some(uri) = &cli.uri {
        vec![sync::gather_uri(&client, uri).await?]
    } else {
        sync::gather_from_config(&client, &config).await?
    };

    if syncs.is_empty() {
        tracing::warn!("Config names no sync_playlists and no --uri was given; nothing to do");
    }

    for playlist_sync in &syncs {
        print_sync(playlist_sync);
    }
    Ok(())
}

/// Print one gathered playlist with its ordered track list.
fn print_sync(sync: &PlaylistSync) {
    println!(
        "{} ({}) -> {} ({} tracks)",
        sync.source.name,
        sync.source.uri(),
        sync.destination,
        sync.tracks.len()
    );
    for (index, track) in sync.tracks.iter().enumerate() {
        println!(
            "  {:>3}. {} [{}]",
            index + 1,
            track.name,
            format_duration(track.duration_ms)
        );
    }
}

fn format_duration(duration_ms: u64) -> String {
    let total_secs = duration_ms / 1000;
    format!("{}:{:02}", total_secs / 60, total_secs % 60)
}
