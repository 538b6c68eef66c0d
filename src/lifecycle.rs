//! Tasking-system lifecycle.
//!
//! Owns the process-wide handle to the active backend. The documented
//! usage pattern is init-before-any-use, shutdown-after-all-use; the
//! handle is never mutated concurrently with in-flight submission.

use std::sync::Mutex;

use crate::backend;
use crate::config::TaskingConfig;
use crate::error::TaskingError;
use crate::numerics;

/// Process-wide handle to the active backend.
struct TaskingHandle {
    num_threads: usize,
}

static HANDLE: Mutex<Option<TaskingHandle>> = Mutex::new(None);

/// Initialize the tasking system for this process.
///
/// Must be called before any scheduling or data-parallel primitive is
/// used; the internal engine's lazy self-init fallback uses engine
/// defaults and is not equivalent to explicit configuration. The
/// denormal policy is applied first and stays in effect after shutdown
/// unless explicitly reset via [`numerics::set_flush_denormals`].
///
/// Initializing twice without an intervening
/// [`shutdown_tasking_system`] returns
/// [`TaskingError::AlreadyInitialized`].
pub fn init_tasking_system(config: TaskingConfig) -> Result<(), TaskingError> {
    let mut handle = HANDLE.lock().unwrap();
    if handle.is_some() {
        return Err(TaskingError::AlreadyInitialized);
    }

    if config.flush_denormals {
        numerics::set_flush_denormals(true);
    }

    let num_threads = backend::init(config.num_threads)?;
    *handle = Some(TaskingHandle { num_threads });
    tracing::info!(num_threads, "tasking system initialized");
    Ok(())
}

/// Tear down the active backend, joining its workers where the backend
/// supports teardown.
///
/// Safe to call when the system was never initialized: a lazily created
/// internal pool is still reaped, everything else is a no-op.
pub fn shutdown_tasking_system() {
    let had_handle = HANDLE.lock().unwrap().take().is_some();
    backend::shutdown();
    if had_handle {
        tracing::info!("tasking system shut down");
    }
}

/// Currently configured worker count, or 0 if the system has not been
/// initialized (or has been shut down).
pub fn num_tasking_threads() -> usize {
    HANDLE.lock().unwrap().as_ref().map_or(0, |h| h.num_threads)
}
