//! Fork-join loop property tests.

use std::sync::Mutex;
use std::sync::atomic::{AtomicU8, AtomicU64, AtomicUsize, Ordering};

use tasksys::{parallel_for, parallel_foreach, parallel_foreach_ref, parallel_in_blocks_of, serial_for};

const N_ELEMENTS: usize = 1_000_000;

// ============================================================================
// COVERAGE
// ============================================================================

#[test]
fn test_parallel_for_covers_every_index_exactly_once() {
    let hits: Vec<AtomicUsize> = (0..N_ELEMENTS).map(|_| AtomicUsize::new(0)).collect();

    parallel_for(N_ELEMENTS, |i: usize| {
        hits[i].fetch_add(1, Ordering::Relaxed);
    });

    assert!(hits.iter().all(|h| h.load(Ordering::Relaxed) == 1));
}

#[test]
#[ignore = "allocates 100M counters; run explicitly"]
fn test_parallel_for_covers_a_hundred_million_indices() {
    const N: usize = 100_000_000;
    let hits: Vec<AtomicU8> = (0..N).map(|_| AtomicU8::new(0)).collect();

    parallel_for(N, |i: usize| {
        hits[i].fetch_add(1, Ordering::Relaxed);
    });

    assert!(hits.iter().all(|h| h.load(Ordering::Relaxed) == 1));
}

#[test]
fn test_parallel_for_leaves_no_sentinel() {
    const SENTINEL: u64 = u64::MAX;
    let mut values = vec![SENTINEL; N_ELEMENTS];

    parallel_foreach(&mut values, |v| *v = 1);

    assert!(!values.contains(&SENTINEL));
}

#[test]
fn test_parallel_for_accepts_signed_bounds() {
    let total = AtomicUsize::new(0);

    parallel_for(100i32, |_i: i32| {
        total.fetch_add(1, Ordering::Relaxed);
    });
    assert_eq!(total.load(Ordering::Relaxed), 100);

    parallel_for(-5i32, |_i: i32| {
        total.fetch_add(1, Ordering::Relaxed);
    });
    assert_eq!(total.load(Ordering::Relaxed), 100);
}

// ============================================================================
// ORDERING
// ============================================================================

#[test]
fn test_serial_for_runs_in_ascending_order() {
    let order = std::cell::RefCell::new(Vec::new());

    serial_for(1000usize, |i| order.borrow_mut().push(i));

    assert_eq!(*order.borrow(), (0..1000).collect::<Vec<usize>>());
}

// ============================================================================
// BLOCK PARTITIONING
// ============================================================================

#[test]
fn test_blocks_partition_without_gaps_or_overlap() {
    let blocks = Mutex::new(Vec::new());

    parallel_in_blocks_of::<64, _, _>(1000usize, |begin, end| {
        blocks.lock().unwrap().push((begin, end));
    });

    let mut blocks = blocks.into_inner().unwrap();
    blocks.sort_unstable();
    assert_eq!(blocks.len(), 1000usize.div_ceil(64));

    let mut next = 0;
    for (begin, end) in blocks {
        assert_eq!(begin, next);
        assert!(end > begin && end - begin <= 64);
        next = end;
    }
    assert_eq!(next, 1000);
}

#[test]
fn test_blocks_cover_a_range_smaller_than_one_block() {
    let blocks = Mutex::new(Vec::new());

    parallel_in_blocks_of::<4096, _, _>(7usize, |begin, end| {
        blocks.lock().unwrap().push((begin, end));
    });

    assert_eq!(blocks.into_inner().unwrap(), vec![(0, 7)]);
}

// ============================================================================
// FOREACH
// ============================================================================

#[test]
fn test_parallel_foreach_mutates_every_element() {
    let mut values: Vec<u64> = (0..10_000).collect();

    parallel_foreach(&mut values, |v| *v *= 2);

    assert!(values.iter().enumerate().all(|(i, v)| *v == 2 * i as u64));
}

#[test]
fn test_parallel_foreach_ref_observes_every_element() {
    let values: Vec<u64> = (0..10_000).collect();
    let sum = AtomicU64::new(0);

    parallel_foreach_ref(&values, |v| {
        sum.fetch_add(*v, Ordering::Relaxed);
    });

    assert_eq!(sum.load(Ordering::Relaxed), (0..10_000).sum());
}
