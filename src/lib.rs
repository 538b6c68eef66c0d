//! tasksys
//!
//! A portable task-parallelism layer: fire-and-forget scheduling,
//! future-returning task submission, and fork-join data-parallel loops,
//! all running on a build-time selectable execution backend.
//!
//! # Backends
//!
//! Exactly one strategy is active in a given build, selected by cargo
//! feature with fixed precedence:
//! - `rayon`: pass-through to the rayon global thread pool
//! - `threads`: plain OS threads per dispatch, no resident pool
//! - `internal` (default): the built-in worker-pool scheduler
//! - none of the above: synchronous fallback, everything runs inline
//!
//! # Example
//! ```rust,ignore
//! use tasksys::{init_tasking_system, parallel_foreach, spawn, TaskingConfig};
//!
//! init_tasking_system(TaskingConfig::default())?;
//!
//! let mut samples = vec![1.0f32; 4096];
//! parallel_foreach(&mut samples, |s| *s *= 0.5);
//!
//! let answer = spawn(|| 42);
//! assert_eq!(answer.get(), 42);
//! ```

mod async_task;
mod backend;
mod config;
mod error;
mod future;
mod index;
mod lifecycle;
pub mod numerics;
mod parallel_for;
mod parallel_foreach;
mod schedule;

pub use async_task::AsyncTask;
pub use config::TaskingConfig;
pub use error::TaskingError;
pub use future::{TaskFuture, spawn};
pub use index::TaskIndex;
pub use lifecycle::{init_tasking_system, num_tasking_threads, shutdown_tasking_system};
pub use parallel_for::{parallel_for, parallel_in_blocks_of, serial_for};
pub use parallel_foreach::{parallel_foreach, parallel_foreach_ref};
pub use schedule::schedule;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
