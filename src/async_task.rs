//! Owned asynchronous tasks.

use std::sync::Arc;

use crate::future::{TaskState, submit};

/// A task submitted on construction, owning its eventual `T` result.
///
/// The in-flight closure and this object share one reference-counted
/// result block, so dropping an unfinished `AsyncTask` detaches the task
/// (it still runs to completion) instead of blocking the dropping
/// thread.
pub struct AsyncTask<T> {
    state: Arc<TaskState<T>>,
}

impl<T: Send + 'static> AsyncTask<T> {
    /// Immediately submit `fcn` to the active backend.
    pub fn new<F>(fcn: F) -> Self
    where
        F: FnOnce() -> T + Send + 'static,
    {
        Self { state: submit(fcn) }
    }

    /// Non-blocking completion poll.
    pub fn finished(&self) -> bool {
        self.state.is_complete()
    }

    /// Whether a result is obtainable.
    pub fn valid(&self) -> bool {
        self.state.is_complete()
    }

    /// Block until the task has finished.
    pub fn wait(&self) {
        self.state.wait();
    }

    /// Block until the task has finished and return the stored result.
    ///
    /// Re-raises the task's panic, if it panicked.
    pub fn get(self) -> T {
        self.state.take()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_returns_the_stored_value() {
        let task = AsyncTask::new(|| 1.0f32);
        assert_eq!(task.get(), 1.0);
    }

    #[test]
    fn test_wait_then_poll() {
        let task = AsyncTask::new(|| 7u32);
        task.wait();
        assert!(task.finished());
        assert!(task.valid());
        assert_eq!(task.get(), 7);
    }
}
