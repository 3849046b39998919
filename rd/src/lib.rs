//! RevDeck - flash-card style review of task sheets
//!
//! RevDeck shows one randomly chosen task artifact at a time in an external
//! viewer, reveals the matching solution on demand, and lets the user walk
//! back and forth through everything shown so far. Progress survives
//! restarts through a single snapshot record.
//!
//! # Core Concepts
//!
//! - **Rotation without replacement**: every task is shown once per cycle
//!   before any task repeats; an exhausted pool recycles in full
//! - **Replayable history**: previously shown tasks re-display as-is,
//!   without drawing again
//! - **Snapshot before display**: the session is persisted ahead of every
//!   shown task, so resuming lands exactly where the user left off
//!
//! # Modules
//!
//! - [`catalog`] - task/solution discovery from configured folders
//! - [`session`] - rotation pool, history, and the controller state machine
//! - [`input`] - line and chord command input sharing one vocabulary
//! - [`viewer`] - external viewer process lifecycle
//! - [`config`] - configuration types and loading
//! - [`cli`] - command-line interface

pub mod catalog;
pub mod cli;
pub mod config;
pub mod input;
pub mod session;
pub mod viewer;

pub use config::Config;
pub use input::{ChordReader, Command, CommandInput, CommandSource, InputMode, LineReader};
pub use session::{Controller, History, RotationPool, Session, SessionError};
pub use viewer::{Viewer, ViewerHandle};
