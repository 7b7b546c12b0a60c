//! Fetch outcomes, page calls, and the bookkeeping that keeps one call in flight.

use endless_core::TaskId;

/// Message reported when an error response carries no readable body.
pub const DEFAULT_REQUEST_ERROR: &str = "Network request failed.";

/// Result of fetching one page.
#[derive(Debug)]
pub enum FetchOutcome<T> {
    /// The page loaded. An empty vector is treated like [`FetchOutcome::Empty`].
    Success(Vec<T>),
    /// No more data: the requested page is past the end.
    Empty,
    /// The server answered with an error body.
    Error(String),
    /// The request never produced a response (transport error, decoding failure, ...).
    Failure(anyhow::Error),
}

impl<T> FetchOutcome<T> {
    /// Wraps a decoded page, mapping an empty page to [`FetchOutcome::Empty`].
    pub fn from_page(items: Vec<T>) -> Self {
        if items.is_empty() {
            FetchOutcome::Empty
        } else {
            FetchOutcome::Success(items)
        }
    }

    /// Wraps an error response body, falling back to [`DEFAULT_REQUEST_ERROR`]
    /// when the body is missing or unreadable.
    pub fn from_error_body(body: Option<String>) -> Self {
        match body {
            Some(body) if !body.trim().is_empty() => FetchOutcome::Error(body),
            _ => FetchOutcome::Error(DEFAULT_REQUEST_ERROR.to_owned()),
        }
    }

    pub fn failure(cause: impl Into<anyhow::Error>) -> Self {
        FetchOutcome::Failure(cause.into())
    }

    /// Short label used in log lines.
    pub fn kind(&self) -> &'static str {
        match self {
            FetchOutcome::Success(items) if items.is_empty() => "empty",
            FetchOutcome::Success(_) => "success",
            FetchOutcome::Empty => "empty",
            FetchOutcome::Error(_) => "error",
            FetchOutcome::Failure(_) => "failure",
        }
    }
}

/// One-shot delivery of a [`FetchOutcome`] back to the list.
///
/// A completion must be invoked on the UI thread. Work running elsewhere
/// marshals its result back first (see `endless-runtime-std`'s `ThreadCall`).
/// Dropping a completion without calling it leaves the request in flight
/// until the list is cleared.
pub struct Completion<T> {
    deliver: Box<dyn FnOnce(FetchOutcome<T>)>,
}

impl<T> Completion<T> {
    pub fn new(deliver: impl FnOnce(FetchOutcome<T>) + 'static) -> Self {
        Self {
            deliver: Box::new(deliver),
        }
    }

    pub fn complete(self, outcome: FetchOutcome<T>) {
        (self.deliver)(outcome);
    }

    pub fn succeed(self, items: Vec<T>) {
        self.complete(FetchOutcome::from_page(items));
    }
}

impl<T> std::fmt::Debug for Completion<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Completion").finish_non_exhaustive()
    }
}

/// An asynchronous fetch of one page, built by the caller for a page index.
///
/// Mirrors a prepared HTTP call: `enqueue` starts it, and the call later
/// hands exactly one outcome to the completion. `cancel` is best-effort; an
/// outcome that still arrives afterwards is discarded by the list.
pub trait PageCall<T> {
    fn enqueue(&mut self, completion: Completion<T>);

    fn cancel(&mut self);
}

/// Identifies one issued request within one list generation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct RequestTicket {
    pub epoch: u64,
    pub seq: u64,
}

struct PendingRequest<T> {
    seq: u64,
    call: Option<Box<dyn PageCall<T>>>,
}

/// Tracks the outstanding call, the list generation, and the scheduled
/// scrollability check.
///
/// The epoch advances on every clear and on teardown. Tickets and scheduled
/// checks from an older epoch are stale and must be ignored.
pub struct RequestCoordinator<T> {
    epoch: u64,
    next_seq: u64,
    pending: Option<PendingRequest<T>>,
    scroll_check: Option<TaskId>,
}

impl<T> Default for RequestCoordinator<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> RequestCoordinator<T> {
    pub fn new() -> Self {
        Self {
            epoch: 0,
            next_seq: 0,
            pending: None,
            scroll_check: None,
        }
    }

    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Registers a new outstanding request and returns its ticket.
    pub fn begin(&mut self) -> RequestTicket {
        self.next_seq += 1;
        self.pending = Some(PendingRequest {
            seq: self.next_seq,
            call: None,
        });
        RequestTicket {
            epoch: self.epoch,
            seq: self.next_seq,
        }
    }

    /// Keeps `call` as the cancellation handle for `ticket`.
    ///
    /// Returns the call back when the ticket is no longer outstanding, which
    /// happens when the call completed synchronously inside `enqueue` or the
    /// list was cleared meanwhile.
    pub fn attach_call(
        &mut self,
        ticket: RequestTicket,
        call: Box<dyn PageCall<T>>,
    ) -> Option<Box<dyn PageCall<T>>> {
        match self.pending.as_mut() {
            Some(pending) if ticket.epoch == self.epoch && pending.seq == ticket.seq => {
                pending.call = Some(call);
                None
            }
            _ => Some(call),
        }
    }

    /// Settles the request for `ticket`. Returns `false` for stale tickets.
    pub fn accept(&mut self, ticket: RequestTicket) -> bool {
        if ticket.epoch != self.epoch {
            return false;
        }
        match &self.pending {
            Some(pending) if pending.seq == ticket.seq => {
                self.pending = None;
                true
            }
            _ => false,
        }
    }

    /// Forgets the outstanding request and hands back its call so the owner
    /// can cancel it outside of any borrow.
    pub fn cancel(&mut self) -> Option<Box<dyn PageCall<T>>> {
        self.pending.take().and_then(|pending| pending.call)
    }

    /// Starts a new generation, invalidating every outstanding ticket.
    pub fn advance_epoch(&mut self) -> u64 {
        self.epoch = self.epoch.wrapping_add(1);
        self.epoch
    }

    /// Records the scheduled check, returning the one it replaces.
    pub fn replace_scroll_check(&mut self, task: TaskId) -> Option<TaskId> {
        self.scroll_check.replace(task)
    }

    pub fn take_scroll_check(&mut self) -> Option<TaskId> {
        self.scroll_check.take()
    }
}
