//! CLI argument parsing for deckstore

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "ds")]
#[command(author, version, about = "Inspect RevDeck session snapshots", long_about = None)]
pub struct Cli {
    /// Path to config file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Snapshot file to operate on (overrides config)
    #[arg(short, long)]
    pub file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Show the saved snapshot
    Show {
        /// Print the raw JSON record instead of a summary
        #[arg(long)]
        raw: bool,
    },

    /// Print the snapshot file path
    Path,

    /// Delete the saved snapshot
    Reset,
}
