//! Standard runtime services backed by Rust's `std` library.
//!
//! This crate provides concrete implementations of the platform traits
//! defined in `endless-core`. An application creates one [`Looper`] on its UI
//! thread, hands it to [`endless_foundation::PaginatedList`] as the scheduler
//! and pumps it from its event loop. Page fetches issued as [`ThreadCall`]s
//! run on worker threads and settle back on the looper's thread.

mod call;
mod looper;

pub use call::ThreadCall;
pub use looper::{Dispatcher, Looper};

use endless_core::{Clock, Instant};

/// Clock implementation backed by the system monotonic clock.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

pub mod prelude {
    pub use crate::{Dispatcher, Looper, SystemClock, ThreadCall};
}
