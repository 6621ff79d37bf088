use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Operator CLI over a save session's bot storage.
#[derive(Parser, Debug)]
#[command(name = "botstore", version, about = "per-world bot snapshot storage CLI")]
pub struct Cli {
    #[command(subcommand)]
    pub cmd: Cmd,
}

#[derive(Subcommand, Debug)]
pub enum Cmd {
    /// List saved bots across all worlds (merged manifest view)
    List {
        /// Save-session storage root (the directory holding fakeplayerdata/)
        #[arg(long)]
        path: PathBuf,
        /// Print a JSON array instead of text
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Cross-check each world's manifest against its snapshot files (report only)
    Doctor {
        /// Save-session storage root (the directory holding fakeplayerdata/)
        #[arg(long)]
        path: PathBuf,
        /// Print a JSON array instead of text
        #[arg(long, default_value_t = false)]
        json: bool,
    },
}
