//! Scriptable stand-in for the host list view.

use endless_core::{LayoutKind, Orientation};
use endless_foundation::{ListHost, ViewportMetrics};
use std::cell::Cell;

/// A host whose geometry is set directly by the test.
#[derive(Debug)]
pub struct FakeHost {
    layout: Cell<LayoutKind>,
    viewport: Cell<ViewportMetrics>,
    content_larger: Cell<bool>,
    scroll_enabled: Cell<bool>,
    data_changed: Cell<usize>,
}

impl Default for FakeHost {
    fn default() -> Self {
        Self::new(LayoutKind::Linear(Orientation::Vertical))
    }
}

impl FakeHost {
    /// A scrollable host with overflowing content and an empty viewport.
    pub fn new(layout: LayoutKind) -> Self {
        Self {
            layout: Cell::new(layout),
            viewport: Cell::new(ViewportMetrics::default()),
            content_larger: Cell::new(true),
            scroll_enabled: Cell::new(true),
            data_changed: Cell::new(0),
        }
    }

    pub fn set_viewport(&self, viewport: ViewportMetrics) {
        self.viewport.set(viewport);
    }

    /// Shows `visible_count` rows of `total_count` with the last one on screen.
    pub fn show_end(&self, visible_count: usize, total_count: usize) {
        let first = total_count.saturating_sub(visible_count);
        self.viewport
            .set(ViewportMetrics::new(visible_count, first, total_count));
    }

    pub fn set_content_larger_than_viewport(&self, larger: bool) {
        self.content_larger.set(larger);
    }

    pub fn set_scroll_enabled(&self, enabled: bool) {
        self.scroll_enabled.set(enabled);
    }

    /// Number of `notify_data_changed` calls so far.
    pub fn data_changed_count(&self) -> usize {
        self.data_changed.get()
    }
}

impl ListHost for FakeHost {
    fn layout_kind(&self) -> LayoutKind {
        self.layout.get()
    }

    fn viewport(&self) -> ViewportMetrics {
        self.viewport.get()
    }

    fn is_content_larger_than_viewport(&self) -> bool {
        self.content_larger.get()
    }

    fn is_scroll_enabled(&self) -> bool {
        self.scroll_enabled.get()
    }

    fn notify_data_changed(&self) {
        self.data_changed.set(self.data_changed.get() + 1);
    }
}
