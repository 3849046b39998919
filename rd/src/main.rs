//! RevDeck - flash-card style review of task sheets
//!
//! CLI entry point for running review sessions and inspecting progress.

use std::fs;
use std::path::PathBuf;

use clap::Parser;
use colored::Colorize;
use eyre::{Context, Result};
use tracing::info;

use deckstore::SnapshotStore;
use revdeck::catalog;
use revdeck::cli::{Cli, Command, OutputFormat};
use revdeck::config::Config;
use revdeck::input::{CommandInput, InputMode};
use revdeck::session::{Controller, Session};
use revdeck::viewer::Viewer;

fn setup_logging(verbose: bool) -> Result<()> {
    // Logs go to a file so the interactive terminal stays clean
    let log_dir = dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("revdeck")
        .join("logs");

    fs::create_dir_all(&log_dir).context("Failed to create log directory")?;

    let level = if verbose { tracing::Level::DEBUG } else { tracing::Level::INFO };
    let log_file = fs::File::create(log_dir.join("revdeck.log")).context("Failed to create log file")?;

    tracing_subscriber::fmt()
        .with_writer(log_file)
        .with_ansi(false)
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()))
        .init();

    info!("Logging initialized (verbose: {})", verbose);
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose).context("Failed to setup logging")?;

    let config = Config::load(cli.config.as_ref()).context("Failed to load configuration")?;

    match cli.command {
        Some(Command::Status { format }) => cmd_status(&config, format),
        Some(Command::Reset) => cmd_reset(&config),
        Some(Command::Run) | None => cmd_run(&config),
    }
}

/// Run an interactive review session
fn cmd_run(config: &Config) -> Result<()> {
    config.validate()?;

    let initial_mode: InputMode = config
        .input
        .mode
        .parse()
        .map_err(|e: String| eyre::eyre!("Invalid input.mode in config: {}", e))?;

    // Discover the catalog first so a broken deck fails before any state is touched
    let catalog = catalog::discover(&config.tasks)?;
    info!(tasks = catalog.len(), "catalog discovered");

    let store = SnapshotStore::new(config.progress.expanded_file());
    let session = match store.load()? {
        // a record with empty pools has nothing to rotate; start over
        Some(snapshot) if snapshot.total() > 0 => {
            println!(
                "Resuming session: task {} of {} shown so far",
                snapshot.index + 1,
                snapshot.history.len()
            );
            Session::resume(snapshot, store)
        }
        _ => Session::fresh(catalog, store),
    };

    let viewer = Viewer::new(config.viewer.program.clone());
    let input = CommandInput::new(initial_mode)?;

    println!();
    println!("Control handed over to user now:");

    let mut controller = Controller::new(session, viewer, input);
    controller.run()
}

/// Show saved progress without starting a session
fn cmd_status(config: &Config, format: OutputFormat) -> Result<()> {
    let store = SnapshotStore::new(config.progress.expanded_file());

    let Some(snapshot) = store.load()? else {
        match format {
            OutputFormat::Json => {
                println!("{}", serde_json::json!({"error": "No saved progress. Has a session run?"}));
            }
            OutputFormat::Text => println!("No saved progress. Has a session run?"),
        }
        return Ok(());
    };

    match format {
        OutputFormat::Json => {
            let json = serde_json::json!({
                "position": snapshot.index + 1,
                "shown": snapshot.history.len(),
                "pending": snapshot.pending.len(),
                "done": snapshot.done.len(),
                "percent_done": snapshot.percent_done(),
            });
            println!("{}", serde_json::to_string_pretty(&json)?);
        }
        OutputFormat::Text => {
            println!("RevDeck Progress");
            println!("----------------");
            println!("Position: task {} of {}", snapshot.index + 1, snapshot.history.len());
            println!("Pending this cycle: {}", snapshot.pending.len());
            println!("Done this cycle:    {}", snapshot.done.len());
            println!("Deck seen: {}%", snapshot.percent_done());
        }
    }

    Ok(())
}

/// Discard saved progress
fn cmd_reset(config: &Config) -> Result<()> {
    let store = SnapshotStore::new(config.progress.expanded_file());

    // Remove without loading so a corrupt record can still be cleared
    let existed = store.path().exists();
    store.clear()?;

    if existed {
        println!("{} Progress cleared: {}", "✓".green(), store.path().display());
    } else {
        println!("No saved progress to remove.");
    }
    Ok(())
}
