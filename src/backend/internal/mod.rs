//! Internal Engine
//!
//! The built-in work-partitioning scheduler, used when no external
//! thread-pool runtime is configured. A process-wide [`WorkerPool`]
//! accepts task sets (a callable plus an index range split across
//! workers) and blocks the submitter until the set completes.

mod pool;
mod task_set;

use std::sync::{Arc, Mutex};

use pool::WorkerPool;

use crate::error::TaskingError;

/// Process-wide pool; at most one exists at any time.
static POOL: Mutex<Option<Arc<WorkerPool>>> = Mutex::new(None);

/// Explicitly construct the worker pool.
///
/// Re-initializing without an intervening [`shutdown`] is an error, not
/// a silent pool replacement.
pub(crate) fn init(num_threads: i32) -> Result<usize, TaskingError> {
    let mut pool = POOL.lock().unwrap();
    if pool.is_some() {
        return Err(TaskingError::AlreadyInitialized);
    }

    let created = Arc::new(WorkerPool::new(num_threads)?);
    let num_workers = created.num_workers();
    *pool = Some(created);
    Ok(num_workers)
}

/// Join and retire all workers; a no-op if the pool was never created.
pub(crate) fn shutdown() {
    let taken = POOL.lock().unwrap().take();
    if let Some(pool) = taken {
        pool.shutdown();
    }
}

/// Current worker count, or 0 if the pool was never created.
pub(crate) fn num_threads() -> usize {
    POOL.lock().unwrap().as_ref().map_or(0, |p| p.num_workers())
}

/// Current pool, lazily created with the default thread count.
fn current() -> Arc<WorkerPool> {
    let mut pool = POOL.lock().unwrap();
    match pool.as_ref() {
        Some(existing) => Arc::clone(existing),
        None => {
            let created = Arc::new(
                WorkerPool::new(-1).expect("failed to start tasksys worker pool"),
            );
            *pool = Some(Arc::clone(&created));
            created
        }
    }
}

pub(crate) fn parallel_for_impl<F>(n: usize, f: F)
where
    F: Fn(usize) + Send + Sync,
{
    let body = move |start: usize, end: usize| {
        for i in start..end {
            f(i);
        }
    };

    let pool = current();
    // SAFETY: the handle is waited on before `body` leaves this frame.
    let handle = unsafe { pool.schedule_range(&body, n) };
    handle.wait();
}

pub(crate) fn schedule_impl<F>(f: F)
where
    F: FnOnce() + Send + 'static,
{
    current().schedule_point(Box::new(f));
}
