//! Task sets: a callable plus an index range partitioned across workers.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Condvar, Mutex};

/// Type-erased pointer to a `Fn(start, end)` range body living on the
/// submitting stack frame.
///
/// The borrow lifetime is erased; soundness comes from the fork-join
/// contract: the submitter waits on the set's handle before its frame
/// returns, so the pointee outlives every partition.
pub(crate) struct RangePtr(pub(crate) *const (dyn Fn(usize, usize) + Sync));

// SAFETY: the pointee is `Sync` and outlives the set (see above).
unsafe impl Send for RangePtr {}
unsafe impl Sync for RangePtr {}

/// What a worker executes for one partition of a task set.
enum RunBody {
    /// Borrowed range body, shared by all partitions.
    Range(RangePtr),
    /// Owned fire-and-forget body, taken by the single partition that
    /// runs it.
    Point(Mutex<Option<Box<dyn FnOnce() + Send + 'static>>>),
}

/// A unit of schedulable work, shared by its queued partitions and the
/// submitter's handle.
pub(crate) struct TaskSet {
    body: RunBody,
    /// Nobody waits on this set; panics are logged instead of stored.
    detached: bool,
    /// Partitions not yet retired.
    outstanding: AtomicUsize,
    done: Mutex<bool>,
    finished: Condvar,
    /// First panic raised by any partition, re-thrown at the join point.
    panic: Mutex<Option<Box<dyn Any + Send>>>,
}

impl TaskSet {
    /// A range task split into `partitions` chunks; zero partitions
    /// yields a set that is done at birth.
    pub(crate) fn range(body: RangePtr, partitions: usize) -> Arc<Self> {
        Arc::new(Self {
            body: RunBody::Range(body),
            detached: false,
            outstanding: AtomicUsize::new(partitions),
            done: Mutex::new(partitions == 0),
            finished: Condvar::new(),
            panic: Mutex::new(None),
        })
    }

    /// A point task: a single size-1 partition nobody waits on.
    pub(crate) fn point(f: Box<dyn FnOnce() + Send + 'static>) -> Arc<Self> {
        Arc::new(Self {
            body: RunBody::Point(Mutex::new(Some(f))),
            detached: true,
            outstanding: AtomicUsize::new(1),
            done: Mutex::new(false),
            finished: Condvar::new(),
            panic: Mutex::new(None),
        })
    }

    /// Run one partition; called from a worker or a helping waiter.
    pub(crate) fn execute(&self, start: usize, end: usize) {
        let result = panic::catch_unwind(AssertUnwindSafe(|| match &self.body {
            RunBody::Range(ptr) => {
                // SAFETY: see `RangePtr`.
                let body = unsafe { &*ptr.0 };
                body(start, end);
            }
            RunBody::Point(slot) => {
                if let Some(f) = slot.lock().unwrap().take() {
                    f();
                }
            }
        }));

        if let Err(payload) = result {
            if self.detached {
                tracing::error!(
                    "scheduled task panicked: {}",
                    panic_message(payload.as_ref())
                );
            } else {
                let mut first = self.panic.lock().unwrap();
                if first.is_none() {
                    *first = Some(payload);
                }
            }
        }

        if self.outstanding.fetch_sub(1, Ordering::AcqRel) == 1 {
            let mut done = self.done.lock().unwrap();
            *done = true;
            self.finished.notify_all();
        }
    }

    pub(crate) fn is_done(&self) -> bool {
        *self.done.lock().unwrap()
    }

    /// Block until every partition has retired.
    pub(crate) fn wait_done(&self) {
        let mut done = self.done.lock().unwrap();
        while !*done {
            done = self.finished.wait(done).unwrap();
        }
    }

    pub(crate) fn take_panic(&self) -> Option<Box<dyn Any + Send>> {
        self.panic.lock().unwrap().take()
    }
}

/// One contiguous chunk of a task set, as queued for execution.
pub(crate) struct Partition {
    pub(crate) set: Arc<TaskSet>,
    pub(crate) start: usize,
    pub(crate) end: usize,
}

impl Partition {
    pub(crate) fn run(self) {
        self.set.execute(self.start, self.end);
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s
    } else {
        "non-string panic payload"
    }
}
