//! Tasking error types.

use std::io;

/// Errors surfaced by tasking-system initialization.
#[derive(Debug, thiserror::Error)]
pub enum TaskingError {
    /// The tasking system (or its worker pool) is already running.
    #[error("tasking system is already initialized; shut it down before re-initializing")]
    AlreadyInitialized,

    /// A worker thread could not be spawned.
    #[error("failed to spawn worker thread: {0}")]
    WorkerSpawn(#[from] io::Error),
}
