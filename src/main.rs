//! vidlist - a playlist-driven video player front-end.
//!
//! Wraps an embeddable video player with transport controls (play/pause,
//! next/previous, seek, speed, loop) and keeps the page location's `v`
//! query parameter in step with the current track.

pub mod adapter;
pub mod cli;
pub mod config;
pub mod error;
pub mod navigation;
pub mod player;
pub mod playlist;
pub mod session;
#[cfg(test)]
pub mod test_utils;
pub mod transport;
pub mod ui;
pub mod url_sync;

use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

fn main() -> anyhow::Result<()> {
    let args = cli::Cli::parse();

    // Initialize logging; stdout belongs to the player UI
    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
        .with(EnvFilter::from_default_env().add_directive("vidlist=info".parse()?))
        .init();

    cli::run_command(&args)
}
