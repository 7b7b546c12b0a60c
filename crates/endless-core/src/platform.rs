//! Platform abstraction traits for pagination runtime services.
//!
//! These traits let the pagination state machine delegate time keeping and
//! delayed work to the host, so the same logic runs under a real event loop
//! and under virtual time in tests.

use web_time::{Duration, Instant};

/// Provides timing information for trigger debouncing.
pub trait Clock {
    /// Returns the current instant.
    fn now(&self) -> Instant;

    /// Returns the time elapsed since `since`, saturating at zero.
    fn elapsed_since(&self, since: Instant) -> Duration {
        self.now().saturating_duration_since(since)
    }
}

/// Identifies a task posted to a [`Scheduler`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TaskId(pub u64);

/// Runs one-shot delayed work on the UI thread.
///
/// Tasks never cross threads, so they may capture `Rc`/`RefCell` state.
/// Implementations must not run a task re-entrantly from inside
/// [`Scheduler::post_delayed`], even with a zero delay.
pub trait Scheduler {
    /// Schedules `task` to run once after `delay`.
    fn post_delayed(&self, delay: Duration, task: Box<dyn FnOnce()>) -> TaskId;

    /// Cancels a pending task. Cancelling a task that already ran is a no-op.
    fn cancel(&self, id: TaskId);
}
