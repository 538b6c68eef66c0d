//! Element-wise parallel iteration over slices.
//!
//! Slices are the random-access requirement made into a type: a source
//! that cannot produce a contiguous `&[T]` is rejected at compile time,
//! not at runtime.

use crate::parallel_for::parallel_for;

struct SendPtr<T>(*mut T);

// SAFETY: `parallel_for` visits each index in `[0, len)` exactly once,
// so the `&mut` borrows derived from this pointer are disjoint.
unsafe impl<T: Send> Send for SendPtr<T> {}
unsafe impl<T: Send> Sync for SendPtr<T> {}

/// Invoke `f` on every element of `items` in parallel (fork-join).
pub fn parallel_foreach<T, F>(items: &mut [T], f: F)
where
    T: Send,
    F: Fn(&mut T) + Send + Sync,
{
    let len = items.len();
    let base = SendPtr(items.as_mut_ptr());
    let base = &base;
    parallel_for(len, move |i: usize| {
        // SAFETY: i < len, and no index repeats (see `SendPtr`).
        let item = unsafe { &mut *base.0.add(i) };
        f(item);
    });
}

/// Shared-access variant of [`parallel_foreach`].
pub fn parallel_foreach_ref<T, F>(items: &[T], f: F)
where
    T: Sync,
    F: Fn(&T) + Send + Sync,
{
    parallel_for(items.len(), |i: usize| f(&items[i]));
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU64, Ordering};

    #[test]
    fn test_parallel_foreach_mutates_every_element() {
        let mut values: Vec<u64> = (0..10_000).collect();

        parallel_foreach(&mut values, |v| *v *= 2);

        assert!(values.iter().enumerate().all(|(i, v)| *v == 2 * i as u64));
    }

    #[test]
    fn test_parallel_foreach_ref_observes_every_element() {
        let values: Vec<u64> = (0..1000).collect();
        let sum = AtomicU64::new(0);

        parallel_foreach_ref(&values, |v| {
            sum.fetch_add(*v, Ordering::Relaxed);
        });

        assert_eq!(sum.load(Ordering::Relaxed), (0..1000).sum());
    }

    #[test]
    fn test_empty_slice() {
        let mut values: Vec<u64> = Vec::new();
        parallel_foreach(&mut values, |_v| panic!("must not be invoked"));
    }
}
