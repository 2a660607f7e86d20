//! CLI command definitions and handlers.
//!
//! Each subcommand is implemented as a function that takes the parsed arguments
//! and returns an `anyhow::Result<()>`.

use anyhow::Context;
use clap::{Parser, Subcommand};
use std::io::BufRead;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use crate::config::{self, Config};
use crate::error::Error;
use crate::player::SimulatedPlayer;
use crate::playlist::Playlist;
use crate::session::{EventSink, Session, UserCommand};
use crate::ui::TerminalSurface;
use crate::url_sync::{MemoryHistory, resolve_index};

/// Help shown when the interactive session starts.
const SESSION_HELP: &str = "\
commands: p (play/pause), n (next), b (prev), seek <0..1>, speed, loop,
          select <n>, back, forward, list, q (quit)";

/// vidlist CLI
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Config file (default: OS config directory)
    #[arg(long, global = true, env = "VIDLIST_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands
#[derive(Subcommand)]
pub enum Commands {
    /// Start an interactive player session
    Play {
        /// JSON playlist file
        #[arg(short, long, env = "VIDLIST_PLAYLIST")]
        playlist: Option<PathBuf>,
        /// Starting page location, e.g. "/watch?v=abc" or "?v=abc"
        #[arg(short, long)]
        url: Option<String>,
        /// Length of every simulated track, in seconds
        #[arg(long)]
        track_seconds: Option<f64>,
    },
    /// Print the playlist
    List {
        /// JSON playlist file
        #[arg(short, long, env = "VIDLIST_PLAYLIST")]
        playlist: Option<PathBuf>,
    },
    /// Show which track a query string selects
    Resolve {
        /// Query string, e.g. "?v=abc"
        query: String,
        /// JSON playlist file
        #[arg(short, long, env = "VIDLIST_PLAYLIST")]
        playlist: Option<PathBuf>,
    },
    /// Write a config file with default settings
    InitConfig {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

/// Run the specified CLI command, defaulting to an interactive session.
pub fn run_command(cli: &Cli) -> anyhow::Result<()> {
    let config = match &cli.config {
        Some(path) => config::load_from(path),
        None => config::load(),
    };

    match &cli.command {
        None => cmd_play(&config, None, None, None),
        Some(Commands::Play {
            playlist,
            url,
            track_seconds,
        }) => cmd_play(&config, playlist.as_deref(), url.as_deref(), *track_seconds),
        Some(Commands::List { playlist }) => cmd_list(&config, playlist.as_deref()),
        Some(Commands::Resolve { query, playlist }) => {
            cmd_resolve(&config, query, playlist.as_deref())
        }
        Some(Commands::InitConfig { force }) => cmd_init_config(cli.config.as_deref(), *force),
    }
}

/// Playlist from the command line, else the config, else the bundled one.
fn load_playlist(config: &Config, arg: Option<&Path>) -> anyhow::Result<Playlist> {
    let path = arg.or(config.playlist.path.as_deref());
    Playlist::load_or_bundled(path).context("Failed to load playlist")
}

/// Full starting location from a `--url` argument.
fn start_url(config: &Config, url: Option<&str>) -> String {
    match url {
        Some(query) if query.starts_with('?') => format!("{}{}", config.page.path, query),
        Some(url) => url.to_string(),
        None => config.page.path.clone(),
    }
}

fn cmd_play(
    config: &Config,
    playlist: Option<&Path>,
    url: Option<&str>,
    track_seconds: Option<f64>,
) -> anyhow::Result<()> {
    let playlist = load_playlist(config, playlist)?;
    let url = start_url(config, url);
    let seconds = track_seconds.unwrap_or(config.simulation.track_seconds);
    if !(seconds > 0.0 && seconds.is_finite()) {
        return Err(Error::config(format!(
            "track length must be a positive number of seconds, got {}",
            seconds
        ))
        .into());
    }
    let options = config.session_options();
    info!("Starting session at {} with {} tracks", url, playlist.len());

    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    rt.block_on(async move {
        let mut session = Session::bootstrap(
            playlist,
            MemoryHistory::new(url),
            TerminalSurface::stdout(),
            options,
            |track, sink| SimulatedPlayer::new(&track.id, seconds, sink),
        )?;

        println!("{}", SESSION_HELP);
        spawn_stdin_reader(session.sink());

        let sink = session.sink();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                debug!("Ctrl-C received");
                sink.shutdown();
            }
        });

        session.run().await;

        let history = session.controller().history();
        info!(
            "Left off at {} after {} history entries",
            history.url(),
            history.entry_count()
        );
        Ok::<(), anyhow::Error>(())
    })
}

/// Forward stdin lines to the session as user commands.
///
/// Runs on its own thread since stdin reads block. End of input shuts the
/// session down.
fn spawn_stdin_reader(sink: EventSink) {
    std::thread::spawn(move || {
        let stdin = std::io::stdin();
        for line in stdin.lock().lines() {
            let Ok(line) = line else {
                break;
            };
            if line.trim().is_empty() {
                continue;
            }
            match line.parse::<UserCommand>() {
                Ok(command) => {
                    if !sink.user(command) || command == UserCommand::Quit {
                        return;
                    }
                }
                Err(e) => {
                    warn!("{}", e);
                    println!("{}", SESSION_HELP);
                }
            }
        }
        sink.shutdown();
    });
}

fn cmd_list(config: &Config, playlist: Option<&Path>) -> anyhow::Result<()> {
    let playlist = load_playlist(config, playlist)?;
    println!("{}", playlist.count_label());
    for (index, track) in playlist.tracks().iter().enumerate() {
        println!("{:>3}. {}  [{}]", index, track.title, track.id);
    }
    Ok(())
}

fn cmd_resolve(config: &Config, query: &str, playlist: Option<&Path>) -> anyhow::Result<()> {
    let playlist = load_playlist(config, playlist)?;
    let index = resolve_index(&playlist, query);
    let track = &playlist.tracks()[index];
    println!("{} {} {}", index, track.id, track.title);
    Ok(())
}

fn cmd_init_config(path: Option<&Path>, force: bool) -> anyhow::Result<()> {
    let path = match path {
        Some(path) => path.to_path_buf(),
        None => config::config_path().context("Could not determine config directory")?,
    };
    if path.exists() && !force {
        anyhow::bail!("{} already exists (use --force to overwrite)", path.display());
    }
    config::save_to(&Config::default(), &path)?;
    println!("Wrote {}", path.display());
    Ok(())
}
