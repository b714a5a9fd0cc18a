//! Playlist Porter - scrape playlists from one streaming service and gather
//! them for synchronization into another.
//!
//! The source service exposes no usable data API to this tool, so playlists,
//! tracks, albums and artists are resolved from the metadata embedded in its
//! public web pages.

pub mod cli;
pub mod config;
pub mod error;
pub mod session;
pub mod spotify;
pub mod sync;

use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

fn main() -> anyhow::Result<()> {
    let args = cli::Cli::parse();

    // Initialize logging
    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true))
        .with(
            EnvFilter::from_default_env().add_directive("playlist_porter=info".parse().unwrap()),
        )
        .init();

    cli::run(&args)?;
    Ok(())
}
