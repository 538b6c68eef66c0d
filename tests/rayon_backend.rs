//! Behavior against an already-attached rayon global pool.
//!
//! Lives in its own integration binary because lifecycle state is
//! process-wide and the attached-pool precondition must be set up before
//! any init.

#![cfg(feature = "rayon")]

use tasksys::{
    TaskingConfig, init_tasking_system, num_tasking_threads, parallel_for, shutdown_tasking_system,
};

use std::sync::atomic::{AtomicUsize, Ordering};

#[test]
fn test_init_succeeds_with_an_attached_rayon_pool() {
    // Ambient rayon use attaches the global pool before we ever init.
    let ambient = rayon::current_num_threads();
    assert!(ambient > 0);

    // The exact-count request cannot be applied now; init still succeeds
    // and reports the attached pool's effective concurrency.
    init_tasking_system(TaskingConfig::with_num_threads(4)).unwrap();
    assert_eq!(num_tasking_threads(), ambient);

    let count = AtomicUsize::new(0);
    parallel_for(1000usize, |_i: usize| {
        count.fetch_add(1, Ordering::Relaxed);
    });
    assert_eq!(count.load(Ordering::Relaxed), 1000);

    // The attached pool outlives the handle; a fresh init still works.
    shutdown_tasking_system();
    assert_eq!(num_tasking_threads(), 0);
    init_tasking_system(TaskingConfig::with_num_threads(4)).unwrap();
    assert!(num_tasking_threads() > 0);
    shutdown_tasking_system();
}
