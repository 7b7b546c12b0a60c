use crate::LayoutKind;
use thiserror::Error;

/// Misuse of the pagination API.
///
/// These are configuration errors: they surface at the call that caused them
/// and are never retried. Fetch errors travel through `FetchOutcome` instead.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PaginationError {
    #[error("only linear layouts are accepted, got {}", .0.name())]
    UnsupportedLayout(LayoutKind),

    #[error("index {index} out of range for {len} items")]
    OutOfRange { index: usize, len: usize },

    #[error("a page request is already in flight")]
    RequestInFlight,

    #[error("the list has been disposed")]
    Disposed,
}

pub type PaginationResult<T> = Result<T, PaginationError>;
