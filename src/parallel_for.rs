//! Fork-join loop primitives.

use crate::backend;
use crate::index::TaskIndex;

/// Invoke `f(i)` for every `i` in `[0, n)`, partitioned across the
/// active backend's workers.
///
/// Fork-join semantics: the call blocks until every invocation has
/// completed, so no code after it runs concurrently with any `f(i)`.
/// Indices are covered exactly once collectively; no ordering is
/// guaranteed between them.
pub fn parallel_for<I, F>(n: I, f: F)
where
    I: TaskIndex,
    F: Fn(I) + Send + Sync,
{
    backend::parallel_for_impl(n.to_usize(), |i| f(I::from_usize(i)));
}

/// Sequential twin of [`parallel_for`]: strictly ascending index order
/// on the calling thread, bypassing the backend.
pub fn serial_for<I, F>(n: I, f: F)
where
    I: TaskIndex,
    F: Fn(I),
{
    for i in 0..n.to_usize() {
        f(I::from_usize(i));
    }
}

/// Run `ceil(n / BLOCK_SIZE)` contiguous blocks in parallel, invoking
/// `f(begin, end)` once, serially, for each block's sub-range.
///
/// The blocks partition `[0, n)` with no gaps or overlaps and each block
/// spans at most `BLOCK_SIZE` indices.
pub fn parallel_in_blocks_of<const BLOCK_SIZE: usize, I, F>(n: I, f: F)
where
    I: TaskIndex,
    F: Fn(I, I) + Send + Sync,
{
    const { assert!(BLOCK_SIZE > 0) };

    let n = n.to_usize();
    let num_blocks = n.div_ceil(BLOCK_SIZE);
    parallel_for(num_blocks, |block: usize| {
        let begin = block * BLOCK_SIZE;
        let end = (begin + BLOCK_SIZE).min(n);
        f(I::from_usize(begin), I::from_usize(end));
    });
}
