//! Infinite-scroll pagination for list widgets
//!
//! The crate is split along the flow of a page request:
//!
//! - [`trigger`] turns scroll deltas and flings into trigger signals,
//! - [`pagination`] decides whether a trigger warrants a fetch,
//! - [`request`] keeps at most one fetch in flight and routes its outcome,
//! - [`item_store`] accumulates the fetched records.
//!
//! [`PaginatedList`] wires the four together behind the [`ListHost`] and
//! [`RequestListener`] traits supplied by the host toolkit.

pub mod config;
pub mod gesture_constants;
pub mod host;
pub mod item_store;
pub mod list;
pub mod listener;
pub mod pagination;
pub mod request;
pub mod trigger;

pub use config::*;
pub use host::*;
pub use item_store::*;
pub use list::*;
pub use listener::*;
pub use pagination::*;
pub use request::*;
pub use trigger::*;

pub use endless_core::{
    CancelToken, Clock, Duration, Instant, LayoutKind, Orientation, PaginationError,
    PaginationResult, Point, Scheduler, TaskId, Velocity,
};

pub mod prelude {
    pub use crate::host::{ListHost, ViewportMetrics};
    pub use crate::list::PaginatedList;
    pub use crate::listener::{EventCallback, PaginationEvent, RequestListener};
    pub use crate::request::{Completion, FetchOutcome, PageCall};
    pub use crate::trigger::FlingGesture;
    pub use endless_core::prelude::*;
}
