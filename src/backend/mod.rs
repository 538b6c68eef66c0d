//! Backend strategy selection.
//!
//! Exactly one execution strategy is active per build, chosen by cargo
//! feature with fixed precedence: `rayon` over `threads` over `internal`
//! over the synchronous fallback. Selection is static; no trait objects
//! sit on the loop-partitioning path.
//!
//! Every strategy exposes the same surface:
//! `init` / `shutdown` / `num_threads` / `parallel_for_impl` /
//! `schedule_impl`.

#[cfg(feature = "rayon")]
mod rayon;
#[cfg(feature = "rayon")]
pub(crate) use self::rayon::{init, num_threads, parallel_for_impl, schedule_impl, shutdown};

#[cfg(all(feature = "threads", not(feature = "rayon")))]
mod spawning;
#[cfg(all(feature = "threads", not(feature = "rayon")))]
pub(crate) use self::spawning::{init, num_threads, parallel_for_impl, schedule_impl, shutdown};

#[cfg(all(feature = "internal", not(any(feature = "rayon", feature = "threads"))))]
mod internal;
#[cfg(all(feature = "internal", not(any(feature = "rayon", feature = "threads"))))]
pub(crate) use self::internal::{init, num_threads, parallel_for_impl, schedule_impl, shutdown};

/// Synchronous no-op strategy: everything runs inline on the caller.
#[cfg(not(any(feature = "rayon", feature = "threads", feature = "internal")))]
mod synchronous {
    use crate::error::TaskingError;

    pub(crate) fn init(_num_threads: i32) -> Result<usize, TaskingError> {
        Ok(1)
    }

    pub(crate) fn shutdown() {}

    pub(crate) fn num_threads() -> usize {
        1
    }

    pub(crate) fn parallel_for_impl<F>(n: usize, f: F)
    where
        F: Fn(usize) + Send + Sync,
    {
        for i in 0..n {
            f(i);
        }
    }

    pub(crate) fn schedule_impl<F>(f: F)
    where
        F: FnOnce() + Send + 'static,
    {
        f();
    }
}

#[cfg(not(any(feature = "rayon", feature = "threads", feature = "internal")))]
pub(crate) use self::synchronous::{init, num_threads, parallel_for_impl, schedule_impl, shutdown};
