//! Adapter over the rayon global thread pool.
//!
//! Thin pass-throughs: rayon already provides the loop partitioning,
//! fire-and-forget enqueue, and join semantics this crate promises.

use crate::error::TaskingError;

/// An exact thread-count request is best-effort: if the global pool is
/// already attached (ambient rayon use, or a prior init), the request
/// cannot be applied and the attached pool's concurrency is reported
/// instead.
pub(crate) fn init(num_threads: i32) -> Result<usize, TaskingError> {
    if num_threads > 0 {
        let built = ::rayon::ThreadPoolBuilder::new()
            .num_threads(num_threads as usize)
            .thread_name(|i| format!("tasksys-worker-{i}"))
            .build_global();
        if built.is_err() {
            tracing::warn!(
                requested = num_threads,
                effective = ::rayon::current_num_threads(),
                "rayon global pool already attached; thread count request not applied"
            );
        }
    }
    Ok(::rayon::current_num_threads())
}

/// The global rayon pool cannot be torn down; its threads outlive the
/// tasking-system handle.
pub(crate) fn shutdown() {}

pub(crate) fn num_threads() -> usize {
    ::rayon::current_num_threads()
}

pub(crate) fn parallel_for_impl<F>(n: usize, f: F)
where
    F: Fn(usize) + Send + Sync,
{
    use ::rayon::prelude::*;

    (0..n).into_par_iter().for_each(f);
}

pub(crate) fn schedule_impl<F>(f: F)
where
    F: FnOnce() + Send + 'static,
{
    ::rayon::spawn(f);
}
