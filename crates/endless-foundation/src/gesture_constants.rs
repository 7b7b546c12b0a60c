//! Shared thresholds for pagination triggers.
//!
//! Distances are in logical pixels, velocities in logical pixels per second.
//! [`crate::PaginationConfig::default`] is built from these values.

/// Minimum swipe displacement along the scroll axis.
///
/// A fling travelling less than this never commits a swipe, even when fast.
pub const SWIPE_DISTANCE_THRESHOLD: f32 = 100.0;

/// Minimum swipe velocity along the scroll axis.
pub const SWIPE_VELOCITY_THRESHOLD: f32 = 100.0;

/// Window in which repeated triggers collapse into one evaluation.
///
/// A single fling can deliver a burst of end-of-list scroll frames.
pub const TRIGGER_DEBOUNCE_MS: u64 = 150;

/// Delay before checking whether a freshly appended page fills the viewport.
///
/// The host must have laid out the new rows before the content size is
/// compared with the viewport.
pub const SCROLL_CHECK_DELAY_MS: u64 = 1000;
