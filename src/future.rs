//! Future-returning submission.
//!
//! The submitted closure and its observer share one reference-counted
//! result block; the task side writes exactly one outcome into it, the
//! observer side blocks on (or polls) that write. This shared block is
//! also what backs [`AsyncTask`](crate::AsyncTask).

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::{Arc, Condvar, Mutex};

use crate::schedule::schedule;

/// Eventual outcome of a submitted task.
enum Slot<T> {
    Pending,
    Ready(T),
    Panicked(Box<dyn Any + Send>),
    Taken,
}

/// Result block shared by an in-flight task and its observer.
pub(crate) struct TaskState<T> {
    slot: Mutex<Slot<T>>,
    ready: Condvar,
}

impl<T> TaskState<T> {
    fn new() -> Arc<Self> {
        Arc::new(Self {
            slot: Mutex::new(Slot::Pending),
            ready: Condvar::new(),
        })
    }

    /// Write-once: the task side stores exactly one outcome.
    fn complete(&self, outcome: Result<T, Box<dyn Any + Send>>) {
        let mut slot = self.slot.lock().unwrap();
        debug_assert!(matches!(*slot, Slot::Pending));
        *slot = match outcome {
            Ok(value) => Slot::Ready(value),
            Err(payload) => Slot::Panicked(payload),
        };
        self.ready.notify_all();
    }

    pub(crate) fn is_complete(&self) -> bool {
        !matches!(*self.slot.lock().unwrap(), Slot::Pending)
    }

    pub(crate) fn wait(&self) {
        let mut slot = self.slot.lock().unwrap();
        while matches!(*slot, Slot::Pending) {
            slot = self.ready.wait(slot).unwrap();
        }
    }

    /// Block for the outcome; re-raises a stored panic on this thread.
    pub(crate) fn take(&self) -> T {
        let mut slot = self.slot.lock().unwrap();
        while matches!(*slot, Slot::Pending) {
            slot = self.ready.wait(slot).unwrap();
        }
        match std::mem::replace(&mut *slot, Slot::Taken) {
            Slot::Ready(value) => value,
            Slot::Panicked(payload) => {
                drop(slot);
                panic::resume_unwind(payload)
            }
            Slot::Pending | Slot::Taken => unreachable!("task result taken twice"),
        }
    }
}

/// Submit `f` and return the result block it will complete.
pub(crate) fn submit<T, F>(f: F) -> Arc<TaskState<T>>
where
    T: Send + 'static,
    F: FnOnce() -> T + Send + 'static,
{
    let state = TaskState::new();
    let task_state = Arc::clone(&state);

    schedule(move || {
        let outcome = panic::catch_unwind(AssertUnwindSafe(f));
        task_state.complete(outcome);
    });

    state
}

/// Handle to the eventual result of a task submitted with [`spawn`].
pub struct TaskFuture<T> {
    state: Arc<TaskState<T>>,
}

impl<T: Send + 'static> TaskFuture<T> {
    /// Whether the result is available without blocking.
    pub fn is_ready(&self) -> bool {
        self.state.is_complete()
    }

    /// Block until the task has run.
    pub fn wait(&self) {
        self.state.wait();
    }

    /// Block until the task has run and return its result.
    ///
    /// Re-raises the task's panic, if it panicked.
    pub fn get(self) -> T {
        self.state.take()
    }
}

/// Submit `f` for asynchronous execution and return a future for its
/// result.
///
/// `f` executes exactly once; the future observes exactly one written
/// result. Capture by value: captured references would race with the
/// task itself. Dropping the future without calling
/// [`get`](TaskFuture::get) detaches the task, which still runs to
/// completion.
pub fn spawn<T, F>(f: F) -> TaskFuture<T>
where
    T: Send + 'static,
    F: FnOnce() -> T + Send + 'static,
{
    TaskFuture { state: submit(f) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spawn_returns_the_result() {
        let future = spawn(|| 1);
        assert_eq!(future.get(), 1);
    }

    #[test]
    fn test_wait_then_ready() {
        let future = spawn(|| "done".to_string());
        future.wait();
        assert!(future.is_ready());
        assert_eq!(future.get(), "done");
    }
}
