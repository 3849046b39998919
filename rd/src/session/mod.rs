//! Session state: rotation pool, history, and the controller state machine

mod controller;
mod history;
mod pool;

pub use controller::{Controller, Session};
pub use history::History;
pub use pool::RotationPool;

use thiserror::Error;

/// Errors from session state operations
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SessionError {
    /// A history index outside the recorded range was requested
    #[error("history index {index} out of range (length {len})")]
    OutOfRange { index: usize, len: usize },

    /// The catalog has no tasks at all
    #[error("cannot draw from an empty catalog")]
    EmptyCatalog,
}
