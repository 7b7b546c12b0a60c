//! Scroll and swipe input reaching the listener.

use endless_core::{LayoutKind, Orientation, Point, Velocity};
use endless_foundation::{
    FlingGesture, PaginationConfig, PaginationError, ScrollPosition, ViewportMetrics,
};
use endless_testing::prelude::*;

#[test]
fn reaching_the_end_requests_current_page() {
    let rule = PaginationTestRule::<u8>::new();
    rule.list.initialize(vec![0; 10], false);

    rule.scroll_to_end();

    assert_eq!(rule.list.scroll_position(), Some(ScrollPosition::AtEnd));
    assert_eq!(rule.listener.requested_pages(), vec![1]);
}

#[test]
fn scrolling_in_the_middle_does_nothing() {
    let rule = PaginationTestRule::<u8>::new();

    rule.scroll_mid();

    assert_eq!(rule.list.scroll_position(), Some(ScrollPosition::Mid));
    assert!(rule.listener.events().is_empty());
}

#[test]
fn burst_of_end_frames_collapses_into_one_request() {
    let rule = PaginationTestRule::<u8>::new();

    for _ in 0..5 {
        rule.scroll_to_end();
        rule.advance_millis(16);
    }
    assert_eq!(rule.listener.requested_pages(), vec![0]);

    rule.advance_millis(150);
    rule.scroll_to_end();
    assert_eq!(rule.listener.requested_pages(), vec![0, 0]);
}

#[test]
fn swipe_only_counts_once_the_end_is_reached() {
    let rule = PaginationTestRule::<u8>::new();

    rule.scroll_mid();
    rule.swipe_forward();
    assert!(rule.listener.requested_pages().is_empty());

    rule.scroll_to_end();
    assert_eq!(rule.listener.requested_pages(), vec![0]);

    rule.advance_millis(200);
    rule.swipe_forward();
    assert_eq!(rule.listener.requested_pages(), vec![0, 0]);
}

#[test]
fn swipe_is_armed_before_any_scroll() {
    let rule = PaginationTestRule::<u8>::new();

    rule.swipe_forward();

    assert_eq!(rule.listener.requested_pages(), vec![0]);
}

#[test]
fn horizontal_lists_read_dx() {
    let rule = PaginationTestRule::<u8>::with_layout(
        LayoutKind::Linear(Orientation::Horizontal),
        PaginationConfig::default(),
    )
    .expect("linear layout is supported");
    rule.host.set_viewport(ViewportMetrics::new(4, 6, 10));

    rule.list.handle_scroll(0.0, 30.0);
    assert_eq!(rule.list.scroll_position(), Some(ScrollPosition::AtStart));
    assert!(rule.listener.requested_pages().is_empty());

    rule.list.handle_scroll(30.0, 0.0);
    assert_eq!(rule.listener.requested_pages(), vec![0]);
}

#[test]
fn horizontal_lists_swipe_along_x() {
    let rule = PaginationTestRule::<u8>::with_layout(
        LayoutKind::Linear(Orientation::Horizontal),
        PaginationConfig::default(),
    )
    .expect("linear layout is supported");

    rule.swipe_forward();
    assert!(rule.listener.requested_pages().is_empty());

    rule.list.handle_fling(FlingGesture::new(
        Point::new(600.0, 100.0),
        Point::new(300.0, 100.0),
        Velocity::new(-2400.0, 0.0),
    ));
    assert_eq!(rule.listener.requested_pages(), vec![0]);
}

#[test]
fn grid_layouts_are_rejected() {
    let layout = LayoutKind::Grid {
        orientation: Orientation::Vertical,
        span_count: 3,
    };

    let result = PaginationTestRule::<u8>::with_layout(layout, PaginationConfig::default());

    assert!(matches!(
        result,
        Err(PaginationError::UnsupportedLayout(kind)) if kind == layout
    ));
}

#[test]
fn disabled_scrolling_ignores_scroll_frames() {
    let rule = PaginationTestRule::<u8>::new();
    rule.host.set_scroll_enabled(false);
    let list = endless_foundation::PaginatedList::<u8>::new(
        rule.host.clone(),
        rule.listener.clone(),
        rule.clock.clone(),
        rule.scheduler.clone(),
        PaginationConfig::default(),
    )
    .expect("linear layout is supported");

    rule.host.show_end(5, 5);
    list.handle_scroll(0.0, 10.0);

    assert_eq!(list.scroll_position(), None);
    assert!(rule.listener.events().is_empty());
}
