//! Rotation pool: without-replacement random draw with recycling

use rand::Rng;
use tracing::debug;

use deckstore::TaskPair;

use super::SessionError;

/// Tracks which tasks remain unshown in the current cycle.
///
/// Every catalog entry lives in exactly one of the two pools. A draw removes
/// a uniformly random entry from the pending pool and records it as done;
/// once the pending pool is exhausted the done pool is recycled wholesale.
/// Each task is therefore shown exactly once per cycle before any repeats.
#[derive(Debug, Clone)]
pub struct RotationPool {
    pending: Vec<TaskPair>,
    done: Vec<TaskPair>,
}

impl RotationPool {
    /// Pool for a fresh session: the whole catalog is pending
    pub fn new(catalog: Vec<TaskPair>) -> Self {
        Self {
            pending: catalog,
            done: Vec::new(),
        }
    }

    /// Pool restored from a snapshot
    pub fn from_parts(pending: Vec<TaskPair>, done: Vec<TaskPair>) -> Self {
        Self { pending, done }
    }

    /// Draw one task at random, recycling the done pool first if the pending
    /// pool is exhausted. Fails only when the whole catalog is empty.
    pub fn draw(&mut self, rng: &mut impl Rng) -> Result<TaskPair, SessionError> {
        if self.pending.is_empty() {
            if self.done.is_empty() {
                return Err(SessionError::EmptyCatalog);
            }
            debug!(recycled = self.done.len(), "pending pool exhausted, recycling");
            self.pending = std::mem::take(&mut self.done);
        }

        let picked = rng.random_range(0..self.pending.len());
        let task = self.pending.swap_remove(picked);
        self.done.push(task.clone());
        Ok(task)
    }

    /// Tasks not yet shown this cycle
    pub fn pending(&self) -> &[TaskPair] {
        &self.pending
    }

    /// Tasks already shown this cycle
    pub fn done(&self) -> &[TaskPair] {
        &self.done
    }

    /// Catalog size
    pub fn total(&self) -> usize {
        self.pending.len() + self.done.len()
    }

    /// Share of the catalog shown this cycle, floored to a whole percent
    pub fn percent_done(&self) -> u32 {
        if self.total() == 0 {
            return 0;
        }
        (100 * self.done.len() / self.total()) as u32
    }

    /// Split back into (pending, done) for snapshotting
    pub fn to_parts(&self) -> (Vec<TaskPair>, Vec<TaskPair>) {
        (self.pending.clone(), self.done.clone())
    }
}
