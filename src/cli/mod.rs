//! Command-line interface for vidlist.
//!
//! Without a subcommand the interactive player session starts.

mod commands;

pub use commands::{Cli, Commands, run_command};
