//! Snapshot types and persistence

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

/// A task artifact paired with its solution artifact.
///
/// Both references are opaque paths; equality is by value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TaskPair {
    /// Path to the task artifact
    pub task: PathBuf,
    /// Path to the solution artifact
    pub solution: PathBuf,
}

impl TaskPair {
    /// Create a pair from the two artifact paths
    pub fn new(task: impl Into<PathBuf>, solution: impl Into<PathBuf>) -> Self {
        Self {
            task: task.into(),
            solution: solution.into(),
        }
    }
}

/// Durable record of a review session.
///
/// All four fields are required; a record missing any of them fails to
/// decode and is reported as corrupt rather than silently defaulted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Cursor into `history`
    pub index: usize,
    /// Task pairs not yet shown in the current cycle
    pub pending: Vec<TaskPair>,
    /// Task pairs already shown in the current cycle
    pub done: Vec<TaskPair>,
    /// Every task pair shown so far, in display order
    pub history: Vec<TaskPair>,
}

impl Snapshot {
    /// Fresh snapshot for a newly discovered catalog
    pub fn fresh(catalog: Vec<TaskPair>) -> Self {
        Self {
            index: 0,
            pending: catalog,
            done: Vec::new(),
            history: Vec::new(),
        }
    }

    /// Catalog size across both pools
    pub fn total(&self) -> usize {
        self.pending.len() + self.done.len()
    }

    /// Share of the catalog already shown this cycle, floored to a whole percent
    pub fn percent_done(&self) -> u32 {
        if self.total() == 0 {
            return 0;
        }
        (100 * self.done.len() / self.total()) as u32
    }
}

/// Errors from loading or saving a snapshot
#[derive(Debug, Error)]
pub enum StoreError {
    /// The record exists but cannot be trusted
    #[error("progress record {path} is corrupt ({reason}); delete it to start fresh")]
    Corrupt { path: PathBuf, reason: String },

    /// The record or its directory could not be accessed
    #[error("failed to access progress record {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The snapshot could not be encoded
    #[error("failed to encode progress record")]
    Encode(#[from] serde_json::Error),
}

/// Stores one snapshot at a fixed path, replacing it on every save
pub struct SnapshotStore {
    path: PathBuf,
}

impl SnapshotStore {
    /// Create a store for the given snapshot file path
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        debug!(?path, "opened snapshot store");
        Self { path }
    }

    /// Path of the snapshot file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Persist a snapshot, replacing any previous record.
    ///
    /// Writes to a sibling temp file and renames it over the target, so a
    /// crash mid-write leaves the previous valid record intact.
    pub fn save(&self, snapshot: &Snapshot) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).map_err(|e| self.io_err(e))?;
        }

        let json = serde_json::to_string_pretty(snapshot)?;

        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, json).map_err(|e| self.io_err(e))?;
        fs::rename(&tmp, &self.path).map_err(|e| self.io_err(e))?;

        debug!(path = ?self.path, index = snapshot.index, "snapshot saved");
        Ok(())
    }

    /// Load the saved snapshot, if any.
    ///
    /// Returns `Ok(None)` when no record exists yet. A record that cannot be
    /// read, fails to decode, or carries a cursor past the end of its own
    /// history is corrupt: surfaced as an error, never discarded silently.
    pub fn load(&self) -> Result<Option<Snapshot>, StoreError> {
        if !self.path.exists() {
            debug!(path = ?self.path, "no snapshot on disk");
            return Ok(None);
        }

        let content = fs::read_to_string(&self.path).map_err(|e| self.io_err(e))?;
        let snapshot: Snapshot = serde_json::from_str(&content).map_err(|e| StoreError::Corrupt {
            path: self.path.clone(),
            reason: e.to_string(),
        })?;

        if snapshot.index > snapshot.history.len() {
            return Err(StoreError::Corrupt {
                path: self.path.clone(),
                reason: format!(
                    "index {} exceeds history length {}",
                    snapshot.index,
                    snapshot.history.len()
                ),
            });
        }

        info!(path = ?self.path, index = snapshot.index, history = snapshot.history.len(), "snapshot loaded");
        Ok(Some(snapshot))
    }

    /// Remove the saved snapshot. Removing a record that never existed is a no-op.
    pub fn clear(&self) -> Result<(), StoreError> {
        if self.path.exists() {
            fs::remove_file(&self.path).map_err(|e| self.io_err(e))?;
            info!(path = ?self.path, "snapshot removed");
        }
        Ok(())
    }

    fn io_err(&self, source: std::io::Error) -> StoreError {
        StoreError::Io {
            path: self.path.clone(),
            source,
        }
    }
}
