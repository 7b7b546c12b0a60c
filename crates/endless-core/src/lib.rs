//! Platform contracts, errors and cancellation primitives for Endless
//!
//! Everything in this crate is independent of any particular list widget or
//! host toolkit. Higher layers (`endless-foundation`) depend on these traits
//! so hosts can plug in their own clock and scheduler.

mod axis;
mod cancel;
mod error;
mod geometry;
mod platform;

pub use axis::*;
pub use cancel::*;
pub use error::*;
pub use geometry::*;
pub use platform::*;

pub use web_time::{Duration, Instant};

pub mod prelude {
    pub use crate::axis::{LayoutKind, Orientation};
    pub use crate::error::{PaginationError, PaginationResult};
    pub use crate::geometry::{Point, Velocity};
    pub use crate::platform::{Clock, Scheduler, TaskId};
}
