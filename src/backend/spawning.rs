//! Thread-per-dispatch strategy: no resident pool.
//!
//! Loops run on scoped threads, one contiguous chunk per effective
//! core; fire-and-forget tasks run on detached threads.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread;

use crate::error::TaskingError;

/// Configured concurrency for loop chunking; 0 means "hardware default".
static CONFIGURED: AtomicUsize = AtomicUsize::new(0);

pub(crate) fn init(num_threads: i32) -> Result<usize, TaskingError> {
    let requested = if num_threads > 0 { num_threads as usize } else { 0 };
    CONFIGURED.store(requested, Ordering::Relaxed);
    Ok(self::num_threads())
}

pub(crate) fn shutdown() {
    CONFIGURED.store(0, Ordering::Relaxed);
}

pub(crate) fn num_threads() -> usize {
    let configured = CONFIGURED.load(Ordering::Relaxed);
    if configured > 0 {
        configured
    } else {
        thread::available_parallelism().map(|p| p.get()).unwrap_or(4)
    }
}

pub(crate) fn parallel_for_impl<F>(n: usize, f: F)
where
    F: Fn(usize) + Send + Sync,
{
    let threads = num_threads().min(n);
    if threads <= 1 {
        for i in 0..n {
            f(i);
        }
        return;
    }

    let chunk = n.div_ceil(threads);
    thread::scope(|s| {
        let f = &f;
        for t in 0..threads {
            let start = t * chunk;
            let end = (start + chunk).min(n);
            s.spawn(move || {
                for i in start..end {
                    f(i);
                }
            });
        }
    });
}

pub(crate) fn schedule_impl<F>(f: F)
where
    F: FnOnce() + Send + 'static,
{
    let _ = thread::spawn(f);
}
