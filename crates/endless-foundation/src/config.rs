use crate::gesture_constants::{
    SCROLL_CHECK_DELAY_MS, SWIPE_DISTANCE_THRESHOLD, SWIPE_VELOCITY_THRESHOLD,
    TRIGGER_DEBOUNCE_MS,
};
use endless_core::Duration;

/// Tuning knobs for a [`crate::PaginatedList`].
#[derive(Clone, Debug, PartialEq)]
pub struct PaginationConfig {
    /// Triggers closer together than this are suppressed.
    pub debounce: Duration,
    /// Delay of the underfilled-viewport check after a page is appended.
    pub scroll_check_delay: Duration,
    pub swipe_distance_threshold: f32,
    pub swipe_velocity_threshold: f32,
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            debounce: Duration::from_millis(TRIGGER_DEBOUNCE_MS),
            scroll_check_delay: Duration::from_millis(SCROLL_CHECK_DELAY_MS),
            swipe_distance_threshold: SWIPE_DISTANCE_THRESHOLD,
            swipe_velocity_threshold: SWIPE_VELOCITY_THRESHOLD,
        }
    }
}

impl PaginationConfig {
    pub fn with_debounce(mut self, debounce: Duration) -> Self {
        self.debounce = debounce;
        self
    }

    pub fn with_scroll_check_delay(mut self, delay: Duration) -> Self {
        self.scroll_check_delay = delay;
        self
    }

    /// Overrides both swipe thresholds. Negative values are clamped to zero.
    pub fn with_swipe_thresholds(mut self, distance: f32, velocity: f32) -> Self {
        self.swipe_distance_threshold = distance.max(0.0);
        self.swipe_velocity_threshold = velocity.max(0.0);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_gesture_constants() {
        let config = PaginationConfig::default();
        assert_eq!(config.debounce, Duration::from_millis(150));
        assert_eq!(config.scroll_check_delay, Duration::from_millis(1000));
        assert_eq!(config.swipe_distance_threshold, 100.0);
        assert_eq!(config.swipe_velocity_threshold, 100.0);
    }

    #[test]
    fn swipe_thresholds_are_clamped() {
        let config = PaginationConfig::default().with_swipe_thresholds(-5.0, 40.0);
        assert_eq!(config.swipe_distance_threshold, 0.0);
        assert_eq!(config.swipe_velocity_threshold, 40.0);
    }
}
