//! Listener that records every notification.

use endless_foundation::{PaginationEvent, RequestListener};
use std::cell::RefCell;

type RequestHook = Box<dyn Fn(u32)>;

/// Records notifications in delivery order.
///
/// A hook installed with [`RecordingListener::on_new_request`] runs after
/// `ShouldCallNewRequest` is recorded, which lets a test answer requests the
/// way an application would.
#[derive(Default)]
pub struct RecordingListener {
    events: RefCell<Vec<PaginationEvent>>,
    request_hook: RefCell<Option<RequestHook>>,
}

impl RecordingListener {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_new_request(&self, hook: impl Fn(u32) + 'static) {
        *self.request_hook.borrow_mut() = Some(Box::new(hook));
    }

    pub fn events(&self) -> Vec<PaginationEvent> {
        self.events.borrow().clone()
    }

    /// Returns and forgets everything recorded so far.
    pub fn take_events(&self) -> Vec<PaginationEvent> {
        std::mem::take(&mut *self.events.borrow_mut())
    }

    /// Pages passed to `should_call_new_request`, in order.
    pub fn requested_pages(&self) -> Vec<u32> {
        self.events
            .borrow()
            .iter()
            .filter_map(|event| match event {
                PaginationEvent::ShouldCallNewRequest(page) => Some(*page),
                _ => None,
            })
            .collect()
    }

    pub fn count(&self, event: &PaginationEvent) -> usize {
        self.events.borrow().iter().filter(|seen| *seen == event).count()
    }

    fn record(&self, event: PaginationEvent) {
        self.events.borrow_mut().push(event);
    }
}

impl RequestListener for RecordingListener {
    fn on_request_started(&self) {
        self.record(PaginationEvent::RequestStarted);
    }

    fn on_request_error(&self, message: &str) {
        self.record(PaginationEvent::RequestError(message.to_owned()));
    }

    fn on_request_finished(&self) {
        self.record(PaginationEvent::RequestFinished);
    }

    fn on_final_page_reached(&self) {
        self.record(PaginationEvent::FinalPageReached);
    }

    fn should_call_new_request(&self, page_index: u32) {
        self.record(PaginationEvent::ShouldCallNewRequest(page_index));
        if let Some(hook) = self.request_hook.borrow().as_ref() {
            hook(page_index);
        }
    }

    fn on_request_failed(&self, message: &str) {
        self.record(PaginationEvent::RequestFailed(message.to_owned()));
    }
}
