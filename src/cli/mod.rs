//! Command-line interface for playlist-porter.

mod commands;

pub use commands::{Cli, run};
