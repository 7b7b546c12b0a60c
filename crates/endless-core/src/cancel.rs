use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Cooperative cancellation token passed into background fetch work.
///
/// The token flips to "cancelled" when the owning request is cancelled.
/// Workers should check [`CancelToken::is_cancelled`] between steps and exit
/// early; blocking I/O is not interrupted automatically.
#[derive(Clone, Debug, Default)]
pub struct CancelToken {
    cancelled: Arc<AtomicBool>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks the token and every clone of it as cancelled.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    /// Returns `true` once the token has been cancelled.
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }

    /// Returns whether the work is still wanted.
    pub fn is_active(&self) -> bool {
        !self.is_cancelled()
    }
}
