//! Notifications delivered to the code that owns the list.

/// Receives request lifecycle notifications.
///
/// `should_call_new_request` is the only place new fetches originate: the
/// implementation turns the page index into a [`crate::PageCall`] and hands it
/// back through [`crate::PaginatedList::update_request`]. Every method is
/// invoked on the UI thread with no internal borrow held, so calling back into
/// the list from here is allowed.
pub trait RequestListener {
    fn on_request_started(&self);

    fn on_request_error(&self, message: &str);

    fn on_request_finished(&self);

    fn on_final_page_reached(&self);

    fn should_call_new_request(&self, page_index: u32);

    /// A transport-level failure ended the request.
    ///
    /// Defaults to doing nothing: failures already end with
    /// `on_request_finished`, and listeners opt in to surfacing them.
    fn on_request_failed(&self, message: &str) {
        let _ = message;
    }
}

/// Tagged form of the [`RequestListener`] callbacks.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PaginationEvent {
    RequestStarted,
    RequestError(String),
    RequestFailed(String),
    RequestFinished,
    FinalPageReached,
    ShouldCallNewRequest(u32),
}

impl PaginationEvent {
    /// Invokes the matching listener method.
    pub fn dispatch(&self, listener: &dyn RequestListener) {
        match self {
            PaginationEvent::RequestStarted => listener.on_request_started(),
            PaginationEvent::RequestError(message) => listener.on_request_error(message),
            PaginationEvent::RequestFailed(message) => listener.on_request_failed(message),
            PaginationEvent::RequestFinished => listener.on_request_finished(),
            PaginationEvent::FinalPageReached => listener.on_final_page_reached(),
            PaginationEvent::ShouldCallNewRequest(page_index) => {
                listener.should_call_new_request(*page_index)
            }
        }
    }
}

/// Adapts a single event callback into a [`RequestListener`].
pub struct EventCallback<F>(pub F);

impl<F> RequestListener for EventCallback<F>
where
    F: Fn(PaginationEvent),
{
    fn on_request_started(&self) {
        (self.0)(PaginationEvent::RequestStarted);
    }

    fn on_request_error(&self, message: &str) {
        (self.0)(PaginationEvent::RequestError(message.to_owned()));
    }

    fn on_request_finished(&self) {
        (self.0)(PaginationEvent::RequestFinished);
    }

    fn on_final_page_reached(&self) {
        (self.0)(PaginationEvent::FinalPageReached);
    }

    fn should_call_new_request(&self, page_index: u32) {
        (self.0)(PaginationEvent::ShouldCallNewRequest(page_index));
    }

    fn on_request_failed(&self, message: &str) {
        (self.0)(PaginationEvent::RequestFailed(message.to_owned()));
    }
}
