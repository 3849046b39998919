//! DeckStore - durable session snapshots for RevDeck
//!
//! Stores a review session's progress (cursor, rotation pools, display
//! history) as a single flat JSON record so a session can resume exactly
//! where it left off.
//!
//! # Layout
//!
//! ```text
//! ~/.local/share/revdeck/
//! └── progress.json    # one Snapshot, replaced atomically on every step
//! ```
//!
//! # Example
//!
//! ```ignore
//! use deckstore::{Snapshot, SnapshotStore};
//!
//! let store = SnapshotStore::new("progress.json");
//! match store.load()? {
//!     Some(snapshot) => { /* resume at snapshot.index */ }
//!     None => { /* fresh session */ }
//! }
//! ```

pub mod cli;
pub mod config;
mod store;

pub use store::{Snapshot, SnapshotStore, StoreError, TaskPair};

/// File name used when only a directory is configured
pub const SNAPSHOT_FILE: &str = "progress.json";
