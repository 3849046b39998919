use clap::Parser;
use colored::*;
use eyre::{Context, Result};
use log::info;

use deckstore::SnapshotStore;
use deckstore::cli::{Cli, Command};
use deckstore::config::Config;

fn setup_logging() -> Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();
    Ok(())
}

fn main() -> Result<()> {
    setup_logging().context("Failed to setup logging")?;

    let cli = Cli::parse();
    let config = Config::load(cli.config.as_ref()).context("Failed to load configuration")?;
    let path = cli.file.unwrap_or(config.snapshot_path);
    let store = SnapshotStore::new(path);

    info!("deckstore starting");

    match cli.command {
        Command::Show { raw } => match store.load()? {
            Some(snapshot) => {
                if raw {
                    println!("{}", serde_json::to_string_pretty(&snapshot)?);
                } else {
                    println!("Snapshot: {}", store.path().display().to_string().cyan());
                    if snapshot.history.is_empty() {
                        println!("  Position: not started");
                    } else {
                        println!("  Position: {} of {}", snapshot.index + 1, snapshot.history.len());
                    }
                    println!("  Pending this cycle: {}", snapshot.pending.len());
                    println!("  Done this cycle:    {}", snapshot.done.len());
                    println!("  Deck seen: {}%", snapshot.percent_done());
                }
            }
            None => println!("No snapshot found at {}", store.path().display()),
        },
        Command::Path => println!("{}", store.path().display()),
        Command::Reset => {
            store.clear()?;
            println!("{} Removed snapshot: {}", "✓".green(), store.path().display());
        }
    }

    Ok(())
}
