//! Fire-and-forget submission.

use crate::backend;

/// Submit `f` for asynchronous execution and return immediately.
///
/// `f` runs exactly once, at an unspecified future time, on an
/// unspecified worker. No handle is returned: completion is observable
/// only through side effects `f` performs itself (the usual pattern is a
/// shared atomic flag, captured by value). Failure has no propagation
/// path either; the internal engine logs a panicking task and keeps its
/// worker alive, other backends leave panic behavior to the runtime.
pub fn schedule<F>(f: F)
where
    F: FnOnce() + Send + 'static,
{
    backend::schedule_impl(f);
}
