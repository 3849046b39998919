//! Integration tests for RevDeck
//!
//! These tests verify end-to-end behavior: catalog discovery over real
//! directories, full session runs with scripted input, resume-across-runs
//! persistence, and the CLI surface of the `rd` binary.

use std::fs;
use std::path::{Path, PathBuf};

use deckstore::SnapshotStore;
use predicates::prelude::*;
use serial_test::serial;
use tempfile::TempDir;

use revdeck::catalog;
use revdeck::config::TasksConfig;
use revdeck::input::{Command, CommandSource, InputMode};
use revdeck::session::{Controller, Session};
use revdeck::viewer::Viewer;

// =============================================================================
// Fixtures
// =============================================================================

/// Build a deck on disk: a task folder plus the matching solution folder
fn build_deck(root: &Path, folder: &str, names: &[&str]) -> TasksConfig {
    let tasks_dir = root.join(folder);
    let solutions_dir = root.join(format!("{folder}_solutions"));
    fs::create_dir_all(&tasks_dir).unwrap();
    fs::create_dir_all(&solutions_dir).unwrap();

    for name in names {
        fs::write(tasks_dir.join(format!("{name}.png")), b"task").unwrap();
        fs::write(solutions_dir.join(format!("{name}_solution.png")), b"solution").unwrap();
    }

    TasksConfig {
        folders: vec![tasks_dir.to_string_lossy().into_owned()],
        ..Default::default()
    }
}

/// Scripted input for driving sessions without a terminal
struct Script(Vec<Command>);

impl CommandSource for Script {
    fn next_command(&mut self, _prompt: &str) -> eyre::Result<Option<Command>> {
        if self.0.is_empty() {
            Ok(Some(Command::Exit))
        } else {
            Ok(Some(self.0.remove(0)))
        }
    }

    fn toggle_mode(&mut self) -> InputMode {
        InputMode::Line
    }
}

fn run_session(session: Session, commands: Vec<Command>) -> Session {
    let mut controller = Controller::new(session, Viewer::new("true"), Script(commands));
    controller.run().unwrap();
    controller.into_session()
}

fn write_config(root: &Path, tasks: &TasksConfig, progress: &Path, viewer: &str) -> PathBuf {
    let config = format!(
        "tasks:\n  folders:\n    - {}\nviewer:\n  program: {}\nprogress:\n  file: {}\ninput:\n  mode: line\n",
        tasks.folders[0],
        viewer,
        progress.display()
    );
    let path = root.join("revdeck.yml");
    fs::write(&path, config).unwrap();
    path
}

// =============================================================================
// Discovery over real directories
// =============================================================================

#[test]
fn test_discovery_pairs_every_task() {
    let temp = TempDir::new().unwrap();
    let tasks = build_deck(temp.path(), "deck", &["q1", "q2", "q3"]);

    let catalog = catalog::discover(&tasks).unwrap();

    assert_eq!(catalog.len(), 3);
    for pair in &catalog {
        assert!(pair.task.exists());
        assert!(pair.solution.exists());
    }
}

#[test]
fn test_discovery_reports_missing_solution() {
    let temp = TempDir::new().unwrap();
    let tasks = build_deck(temp.path(), "deck", &["q1", "q2"]);
    fs::remove_file(temp.path().join("deck_solutions").join("q2_solution.png")).unwrap();

    let err = catalog::discover(&tasks).unwrap_err();
    assert!(err.to_string().contains("q2_solution.png"));
}

// =============================================================================
// Sessions end to end
// =============================================================================

#[test]
fn test_session_covers_deck_then_recycles() {
    let temp = TempDir::new().unwrap();
    let tasks = build_deck(temp.path(), "deck", &["q1", "q2", "q3"]);
    let catalog = catalog::discover(&tasks).unwrap();
    let store = SnapshotStore::new(temp.path().join("progress.json"));

    run_session(
        Session::fresh(catalog.clone(), store),
        vec![Command::Next, Command::Next, Command::Next, Command::Exit],
    );

    let saved = SnapshotStore::new(temp.path().join("progress.json")).load().unwrap().unwrap();

    // four tasks shown: a full first cycle plus one recycled draw
    assert_eq!(saved.history.len(), 4);
    let first_cycle: std::collections::HashSet<_> = saved.history[..3].iter().collect();
    assert_eq!(first_cycle.len(), 3, "first cycle must not repeat a task");
    assert!(catalog.contains(&saved.history[3]));
}

#[test]
fn test_resume_restores_cursor_exactly() {
    let temp = TempDir::new().unwrap();
    let tasks = build_deck(temp.path(), "deck", &["q1", "q2", "q3"]);
    let catalog = catalog::discover(&tasks).unwrap();
    let progress = temp.path().join("progress.json");

    // first run: advance twice, then quit
    run_session(
        Session::fresh(catalog, SnapshotStore::new(&progress)),
        vec![Command::Next, Command::Next, Command::Exit],
    );

    let saved = SnapshotStore::new(&progress).load().unwrap().unwrap();
    assert_eq!(saved.index, 2);
    assert_eq!(saved.history.len(), 3);
    let expected_current = saved.history[2].clone();

    // second run: resume and quit immediately; nothing may be redrawn
    let resumed = run_session(
        Session::resume(saved, SnapshotStore::new(&progress)),
        vec![Command::Exit],
    );

    assert_eq!(resumed.index(), 2);
    assert_eq!(resumed.snapshot().history.len(), 3);
    assert_eq!(resumed.snapshot().history[2], expected_current);
}

#[test]
fn test_walking_back_and_forward_replays_history() {
    let temp = TempDir::new().unwrap();
    let tasks = build_deck(temp.path(), "deck", &["q1", "q2"]);
    let catalog = catalog::discover(&tasks).unwrap();
    let store = SnapshotStore::new(temp.path().join("progress.json"));

    let session = run_session(
        Session::fresh(catalog, store),
        vec![
            Command::Next,
            Command::Previous,
            Command::JumpToCurrent,
            Command::Exit,
        ],
    );

    // next drew a second task, previous went back, jump returned to the tail
    assert_eq!(session.index(), 1);
    assert_eq!(session.snapshot().history.len(), 2);
}

// =============================================================================
// CLI surface
// =============================================================================

#[test]
#[serial]
fn test_cli_run_exits_cleanly() {
    let temp = TempDir::new().unwrap();
    let tasks = build_deck(temp.path(), "deck", &["q1", "q2"]);
    let progress = temp.path().join("progress.json");
    let config = write_config(temp.path(), &tasks, &progress, "true");

    assert_cmd::Command::cargo_bin("rd")
        .unwrap()
        .env("HOME", temp.path())
        .arg("--config")
        .arg(&config)
        .write_stdin("exit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Bye!"));

    // the session persisted before display
    assert!(progress.exists());
}

#[test]
#[serial]
fn test_cli_run_fails_without_solution_folder() {
    let temp = TempDir::new().unwrap();
    let tasks_dir = temp.path().join("deck");
    fs::create_dir_all(&tasks_dir).unwrap();
    fs::write(tasks_dir.join("q1.png"), b"task").unwrap();

    let tasks = TasksConfig {
        folders: vec![tasks_dir.to_string_lossy().into_owned()],
        ..Default::default()
    };
    let progress = temp.path().join("progress.json");
    let config = write_config(temp.path(), &tasks, &progress, "true");

    assert_cmd::Command::cargo_bin("rd")
        .unwrap()
        .env("HOME", temp.path())
        .args(["run", "--config"])
        .arg(&config)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Solution folder"));
}

#[test]
#[serial]
fn test_cli_status_without_progress() {
    let temp = TempDir::new().unwrap();
    let tasks = build_deck(temp.path(), "deck", &["q1"]);
    let progress = temp.path().join("progress.json");
    let config = write_config(temp.path(), &tasks, &progress, "true");

    assert_cmd::Command::cargo_bin("rd")
        .unwrap()
        .env("HOME", temp.path())
        .args(["status", "--config"])
        .arg(&config)
        .assert()
        .success()
        .stdout(predicate::str::contains("No saved progress"));
}

#[test]
#[serial]
fn test_cli_reset_clears_progress() {
    let temp = TempDir::new().unwrap();
    let tasks = build_deck(temp.path(), "deck", &["q1"]);
    let progress = temp.path().join("progress.json");
    let config = write_config(temp.path(), &tasks, &progress, "true");

    // run once to create progress, then reset it away
    assert_cmd::Command::cargo_bin("rd")
        .unwrap()
        .env("HOME", temp.path())
        .arg("--config")
        .arg(&config)
        .write_stdin("exit\n")
        .assert()
        .success();
    assert!(progress.exists());

    assert_cmd::Command::cargo_bin("rd")
        .unwrap()
        .env("HOME", temp.path())
        .args(["reset", "--config"])
        .arg(&config)
        .assert()
        .success()
        .stdout(predicate::str::contains("Progress cleared"));
    assert!(!progress.exists());
}
