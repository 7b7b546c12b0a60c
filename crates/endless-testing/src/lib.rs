//! Testing utilities and harness for Endless pagination
//!
//! Fakes for every collaborator of [`endless_foundation::PaginatedList`]:
//! a virtual clock and scheduler, a scriptable host, a recording listener,
//! and page calls completed by hand. [`PaginationTestRule`] bundles them.

pub mod call;
pub mod clock;
pub mod host;
pub mod listener;
pub mod rule;

pub use call::*;
pub use clock::*;
pub use host::*;
pub use listener::*;
pub use rule::*;

pub mod prelude {
    pub use crate::call::{CallHandle, ImmediateCall, ScriptedCall};
    pub use crate::clock::{ManualClock, ManualScheduler};
    pub use crate::host::FakeHost;
    pub use crate::listener::RecordingListener;
    pub use crate::rule::PaginationTestRule;
}
