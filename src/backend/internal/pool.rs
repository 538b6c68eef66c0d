//! Worker Pool
//!
//! A fixed set of worker threads draining a shared partition queue.
//! Task sets are split into contiguous chunks at submission; workers
//! (and helping waiters) claim chunks until the set retires.

use std::collections::VecDeque;
use std::panic;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Condvar, Mutex};
use std::thread::{self, JoinHandle};

use super::task_set::{Partition, RangePtr, TaskSet};
use crate::error::TaskingError;

/// State shared between the pool handle and its workers.
struct Shared {
    /// Pending partitions of all in-flight task sets.
    queue: Mutex<VecDeque<Partition>>,
    /// Signals workers when work arrives or shutdown begins.
    work_ready: Condvar,
    shutdown: AtomicBool,
}

impl Shared {
    fn push(&self, partitions: impl IntoIterator<Item = Partition>) {
        let mut queue = self.queue.lock().unwrap();
        queue.extend(partitions);
        drop(queue);
        self.work_ready.notify_all();
    }

    fn try_pop(&self) -> Option<Partition> {
        self.queue.lock().unwrap().pop_front()
    }

    /// Next partition, blocking while the queue is empty. Returns `None`
    /// once shutdown is requested and the queue has drained.
    fn wait_for_work(&self) -> Option<Partition> {
        let mut queue = self.queue.lock().unwrap();
        loop {
            if let Some(partition) = queue.pop_front() {
                return Some(partition);
            }
            if self.shutdown.load(Ordering::Acquire) {
                return None;
            }
            queue = self.work_ready.wait(queue).unwrap();
        }
    }
}

/// The internal engine's fixed-size worker-thread pool.
pub(crate) struct WorkerPool {
    shared: Arc<Shared>,
    workers: Mutex<Vec<JoinHandle<()>>>,
    num_workers: usize,
}

impl WorkerPool {
    /// `num_threads <= 0` resolves to the hardware's reported
    /// concurrency.
    pub(crate) fn new(num_threads: i32) -> Result<Self, TaskingError> {
        let num_workers = if num_threads > 0 {
            num_threads as usize
        } else {
            thread::available_parallelism().map(|p| p.get()).unwrap_or(4)
        };

        let shared = Arc::new(Shared {
            queue: Mutex::new(VecDeque::new()),
            work_ready: Condvar::new(),
            shutdown: AtomicBool::new(false),
        });

        let mut workers = Vec::with_capacity(num_workers);
        for id in 0..num_workers {
            let shared = Arc::clone(&shared);
            let handle = thread::Builder::new()
                .name(format!("tasksys-worker-{id}"))
                .spawn(move || worker_loop(&shared))?;
            workers.push(handle);
        }

        tracing::debug!(num_workers, "worker pool started");

        Ok(Self {
            shared,
            workers: Mutex::new(workers),
            num_workers,
        })
    }

    pub(crate) fn num_workers(&self) -> usize {
        self.num_workers
    }

    /// Split `[0, range_size)` into contiguous chunks, one queue entry
    /// each, and return the wait handle for the set.
    ///
    /// # Safety
    ///
    /// `body` is borrowed: the caller must consume the returned handle
    /// with [`TaskSetHandle::wait`] before `body`'s frame returns.
    pub(crate) unsafe fn schedule_range(
        self: &Arc<Self>,
        body: &(dyn Fn(usize, usize) + Sync),
        range_size: usize,
    ) -> TaskSetHandle {
        let raw: *const (dyn Fn(usize, usize) + Sync + '_) = body;
        // SAFETY: only the borrow lifetime is erased; the wait contract
        // above keeps the pointee alive for as long as the set exists.
        let raw: *const (dyn Fn(usize, usize) + Sync + 'static) =
            unsafe { std::mem::transmute(raw) };

        let (partitions, chunk) = if range_size == 0 {
            (0, 1)
        } else {
            let target = self.num_workers.min(range_size);
            let chunk = range_size.div_ceil(target);
            (range_size.div_ceil(chunk), chunk)
        };

        let set = TaskSet::range(RangePtr(raw), partitions);
        if partitions > 0 {
            self.shared.push((0..partitions).map(|p| {
                let start = p * chunk;
                Partition {
                    set: Arc::clone(&set),
                    start,
                    end: (start + chunk).min(range_size),
                }
            }));
        }

        TaskSetHandle {
            set,
            pool: Arc::clone(self),
        }
    }

    /// Submit a fire-and-forget task as a single size-1 partition;
    /// ownership transfers to the engine and the set frees itself after
    /// execution.
    pub(crate) fn schedule_point(&self, f: Box<dyn FnOnce() + Send + 'static>) {
        let set = TaskSet::point(f);
        self.shared.push([Partition { set, start: 0, end: 1 }]);
    }

    /// Wake and join all workers; queued partitions are drained first.
    pub(crate) fn shutdown(&self) {
        self.shared.shutdown.store(true, Ordering::Release);
        // Taking the lock orders the store against any worker sitting
        // between its flag check and its wait.
        drop(self.shared.queue.lock().unwrap());
        self.shared.work_ready.notify_all();

        let mut workers = self.workers.lock().unwrap();
        for handle in workers.drain(..) {
            let _ = handle.join();
        }

        tracing::debug!("worker pool stopped");
    }
}

impl Drop for WorkerPool {
    fn drop(&mut self) {
        self.shutdown();
    }
}

fn worker_loop(shared: &Shared) {
    while let Some(partition) = shared.wait_for_work() {
        partition.run();
    }
}

/// Wait token for an in-flight range task set.
///
/// Owned exclusively by the submitting stack frame; consuming it is the
/// only way to observe completion, which also encodes the "wait once,
/// by the submitter" rule in the type system.
pub(crate) struct TaskSetHandle {
    set: Arc<TaskSet>,
    pool: Arc<WorkerPool>,
}

impl TaskSetHandle {
    /// Block until every partition of the set has retired.
    ///
    /// The calling thread helps execute queued partitions while it
    /// waits, which keeps it a fork-join participant and lets
    /// re-entrant submission make progress on a saturated pool.
    /// Re-raises the first panic any partition produced.
    pub(crate) fn wait(self) {
        while !self.set.is_done() {
            match self.pool.shared.try_pop() {
                Some(partition) => partition.run(),
                None => break,
            }
        }
        self.set.wait_done();

        if let Some(payload) = self.set.take_panic() {
            panic::resume_unwind(payload);
        }
    }
}
