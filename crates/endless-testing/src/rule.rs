//! One-stop fixture wiring a [`PaginatedList`] to fakes.

use crate::call::{CallHandle, ScriptedCall};
use crate::clock::{ManualClock, ManualScheduler};
use crate::host::FakeHost;
use crate::listener::RecordingListener;
use endless_core::{LayoutKind, Orientation, PaginationResult, Point, Velocity};
use endless_foundation::{FlingGesture, PaginatedList, PaginationConfig};
use std::rc::Rc;

/// Test fixture holding a list and every fake it talks to.
pub struct PaginationTestRule<T> {
    pub clock: Rc<ManualClock>,
    pub scheduler: Rc<ManualScheduler>,
    pub host: Rc<FakeHost>,
    pub listener: Rc<RecordingListener>,
    pub list: PaginatedList<T>,
}

impl<T: 'static> PaginationTestRule<T> {
    /// A vertical list with default configuration.
    ///
    /// # Panics
    ///
    /// Never: a vertical linear layout is always accepted.
    pub fn new() -> Self {
        match Self::with_layout(
            LayoutKind::Linear(Orientation::Vertical),
            PaginationConfig::default(),
        ) {
            Ok(rule) => rule,
            Err(err) => panic!("vertical linear layout rejected: {err}"),
        }
    }

    pub fn with_layout(layout: LayoutKind, config: PaginationConfig) -> PaginationResult<Self> {
        let clock = Rc::new(ManualClock::new());
        let scheduler = Rc::new(ManualScheduler::new(Rc::clone(&clock)));
        let host = Rc::new(FakeHost::new(layout));
        let listener = Rc::new(RecordingListener::new());
        let list = PaginatedList::new(
            host.clone(),
            listener.clone(),
            clock.clone(),
            scheduler.clone(),
            config,
        )?;
        Ok(Self {
            clock,
            scheduler,
            host,
            listener,
            list,
        })
    }

    /// Issues a scripted call and returns its handle.
    ///
    /// # Panics
    ///
    /// If the list refuses the request.
    pub fn issue(&self) -> CallHandle<T> {
        let (call, handle) = ScriptedCall::pair();
        if let Err(err) = self.list.update_request(call) {
            panic!("request refused: {err}");
        }
        handle
    }

    /// Scrolls forward with the last row on screen.
    pub fn scroll_to_end(&self) {
        let total = self.list.len().max(1);
        self.host.show_end(total.min(10), total);
        self.list.handle_scroll(0.0, 24.0);
    }

    /// Scrolls forward while the last row is still off screen.
    pub fn scroll_mid(&self) {
        self.host
            .set_viewport(endless_foundation::ViewportMetrics::new(5, 0, 100));
        self.list.handle_scroll(0.0, 24.0);
    }

    /// Flings upward fast enough and far enough to commit a swipe.
    pub fn swipe_forward(&self) {
        self.list.handle_fling(FlingGesture::new(
            Point::new(100.0, 600.0),
            Point::new(100.0, 300.0),
            Velocity::new(0.0, -2400.0),
        ));
    }

    /// Advances virtual time, running due scheduled tasks.
    pub fn advance_millis(&self, millis: u64) {
        self.scheduler.advance_millis(millis);
    }
}

impl<T: 'static> Default for PaginationTestRule<T> {
    fn default() -> Self {
        Self::new()
    }
}
