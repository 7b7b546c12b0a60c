//! Scroll and fling classification.
//!
//! The detector works on one axis, fixed when it is built from the host's
//! [`LayoutKind`]. Scroll frames are classified into a [`ScrollPosition`];
//! reaching the end fires a trigger and arms swipe triggering. A committed
//! forward swipe fires a trigger only while armed, so swiping in the middle
//! of the list never loads a page.

use crate::config::PaginationConfig;
use crate::host::ViewportMetrics;
use endless_core::{
    LayoutKind, Orientation, PaginationError, PaginationResult, Point, Velocity,
};

/// Where the viewport sits relative to the loaded content.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScrollPosition {
    AtStart,
    Mid,
    AtEnd,
}

/// A completed fling, from pointer down to pointer up.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct FlingGesture {
    pub down: Point,
    pub up: Point,
    pub velocity: Velocity,
}

impl FlingGesture {
    pub const fn new(down: Point, up: Point, velocity: Velocity) -> Self {
        Self { down, up, velocity }
    }

    /// Signed pointer travel along `orientation`. Negative means the pointer
    /// moved up or left, dragging content toward its end.
    pub fn displacement(&self, orientation: Orientation) -> f32 {
        orientation.main_axis(self.up.x - self.down.x, self.up.y - self.down.y)
    }

    pub fn speed(&self, orientation: Orientation) -> f32 {
        orientation.main_axis(self.velocity.x, self.velocity.y).abs()
    }
}

/// Turns raw scroll and fling input into pagination triggers.
#[derive(Clone, Debug)]
pub struct TriggerDetector {
    orientation: Orientation,
    swipe_armed: bool,
    last_position: Option<ScrollPosition>,
    swipe_distance_threshold: f32,
    swipe_velocity_threshold: f32,
}

impl TriggerDetector {
    /// Builds a detector for `layout`. Anything but a linear layout is rejected.
    pub fn new(layout: LayoutKind, config: &PaginationConfig) -> PaginationResult<Self> {
        let orientation = layout
            .linear_orientation()
            .ok_or(PaginationError::UnsupportedLayout(layout))?;
        Ok(Self {
            orientation,
            swipe_armed: true,
            last_position: None,
            swipe_distance_threshold: config.swipe_distance_threshold,
            swipe_velocity_threshold: config.swipe_velocity_threshold,
        })
    }

    /// Whether a committed swipe would fire a trigger.
    pub fn is_swipe_armed(&self) -> bool {
        self.swipe_armed
    }

    pub fn last_position(&self) -> Option<ScrollPosition> {
        self.last_position
    }

    /// Classifies one scroll frame. Backward frames (negative delta) have no
    /// classification.
    pub fn classify_scroll(
        &self,
        dx: f32,
        dy: f32,
        viewport: &ViewportMetrics,
    ) -> Option<ScrollPosition> {
        let delta = self.orientation.main_axis(dx, dy);
        if delta == 0.0 {
            Some(ScrollPosition::AtStart)
        } else if delta > 0.0 {
            if viewport.reaches_end() {
                Some(ScrollPosition::AtEnd)
            } else {
                Some(ScrollPosition::Mid)
            }
        } else {
            None
        }
    }

    /// Feeds one scroll frame. Returns `true` when it should trigger a page request.
    pub fn on_scroll(&mut self, dx: f32, dy: f32, viewport: &ViewportMetrics) -> bool {
        let Some(position) = self.classify_scroll(dx, dy, viewport) else {
            return false;
        };
        self.last_position = Some(position);
        self.swipe_armed = position == ScrollPosition::AtEnd;
        self.swipe_armed
    }

    /// Whether `fling` is a forward swipe past both thresholds.
    pub fn is_committed_swipe(&self, fling: &FlingGesture) -> bool {
        let displacement = fling.displacement(self.orientation);
        displacement.abs() > self.swipe_distance_threshold
            && fling.speed(self.orientation) > self.swipe_velocity_threshold
            && displacement < 0.0
    }

    /// Feeds one fling. Returns `true` when it should trigger a page request.
    pub fn on_fling(&mut self, fling: &FlingGesture) -> bool {
        self.swipe_armed && self.is_committed_swipe(fling)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vertical() -> TriggerDetector {
        TriggerDetector::new(
            LayoutKind::Linear(Orientation::Vertical),
            &PaginationConfig::default(),
        )
        .expect("linear layout is supported")
    }

    fn horizontal() -> TriggerDetector {
        TriggerDetector::new(
            LayoutKind::Linear(Orientation::Horizontal),
            &PaginationConfig::default(),
        )
        .expect("linear layout is supported")
    }

    fn upward_fling(distance: f32, speed: f32) -> FlingGesture {
        FlingGesture::new(
            Point::new(50.0, 400.0),
            Point::new(50.0, 400.0 - distance),
            Velocity::new(0.0, -speed),
        )
    }

    const MIDDLE: ViewportMetrics = ViewportMetrics::new(5, 3, 20);
    const END: ViewportMetrics = ViewportMetrics::new(5, 15, 20);

    #[test]
    fn grid_layout_is_rejected() {
        let layout = LayoutKind::Grid {
            orientation: Orientation::Vertical,
            span_count: 2,
        };
        let err = TriggerDetector::new(layout, &PaginationConfig::default()).unwrap_err();
        assert_eq!(err, PaginationError::UnsupportedLayout(layout));
    }

    #[test]
    fn classification_uses_main_axis() {
        let detector = vertical();
        assert_eq!(
            detector.classify_scroll(30.0, 0.0, &END),
            Some(ScrollPosition::AtStart)
        );
        assert_eq!(
            detector.classify_scroll(0.0, 12.0, &MIDDLE),
            Some(ScrollPosition::Mid)
        );
        assert_eq!(
            detector.classify_scroll(0.0, 12.0, &END),
            Some(ScrollPosition::AtEnd)
        );
        assert_eq!(detector.classify_scroll(0.0, -12.0, &END), None);
    }

    #[test]
    fn horizontal_reads_dx() {
        let detector = horizontal();
        assert_eq!(
            detector.classify_scroll(8.0, 0.0, &END),
            Some(ScrollPosition::AtEnd)
        );
        assert_eq!(
            detector.classify_scroll(0.0, 8.0, &END),
            Some(ScrollPosition::AtStart)
        );
    }

    #[test]
    fn reaching_end_triggers_and_arms_swipe() {
        let mut detector = vertical();
        assert!(!detector.on_scroll(0.0, 10.0, &MIDDLE));
        assert!(!detector.is_swipe_armed());

        assert!(detector.on_scroll(0.0, 10.0, &END));
        assert!(detector.is_swipe_armed());
        assert_eq!(detector.last_position(), Some(ScrollPosition::AtEnd));
    }

    #[test]
    fn backward_scroll_keeps_state() {
        let mut detector = vertical();
        detector.on_scroll(0.0, 10.0, &END);
        assert!(!detector.on_scroll(0.0, -10.0, &MIDDLE));
        assert!(detector.is_swipe_armed());
        assert_eq!(detector.last_position(), Some(ScrollPosition::AtEnd));
    }

    #[test]
    fn swipe_needs_distance_speed_and_direction() {
        let detector = vertical();
        assert!(detector.is_committed_swipe(&upward_fling(150.0, 900.0)));
        assert!(!detector.is_committed_swipe(&upward_fling(100.0, 900.0)));
        assert!(!detector.is_committed_swipe(&upward_fling(150.0, 100.0)));
        assert!(!detector.is_committed_swipe(&upward_fling(-150.0, 900.0)));
    }

    #[test]
    fn swipe_uses_main_axis_velocity() {
        let detector = vertical();
        let sideways_speed = FlingGesture::new(
            Point::new(0.0, 400.0),
            Point::new(0.0, 200.0),
            Velocity::new(-2000.0, -50.0),
        );
        assert!(!detector.is_committed_swipe(&sideways_speed));
    }

    #[test]
    fn swipe_fires_only_while_armed() {
        let mut detector = vertical();
        let fling = upward_fling(200.0, 1200.0);
        assert!(detector.on_fling(&fling));

        detector.on_scroll(0.0, 10.0, &MIDDLE);
        assert!(!detector.on_fling(&fling));

        detector.on_scroll(0.0, 10.0, &END);
        assert!(detector.on_fling(&fling));
    }

    #[test]
    fn horizontal_swipe_reads_x() {
        let mut detector = horizontal();
        let leftward = FlingGesture::new(
            Point::new(600.0, 80.0),
            Point::new(350.0, 80.0),
            Velocity::new(-1800.0, 0.0),
        );
        let upward_only = upward_fling(250.0, 1800.0);

        assert!(detector.is_committed_swipe(&leftward));
        assert!(!detector.is_committed_swipe(&upward_only));
        assert!(detector.on_fling(&leftward));
        assert!(!detector.on_fling(&upward_only));
    }

    #[test]
    fn horizontal_swipe_needs_x_velocity() {
        let detector = horizontal();
        let slow_sideways = FlingGesture::new(
            Point::new(600.0, 400.0),
            Point::new(350.0, 100.0),
            Velocity::new(-60.0, -2000.0),
        );
        assert!(!detector.is_committed_swipe(&slow_sideways));
    }
}
