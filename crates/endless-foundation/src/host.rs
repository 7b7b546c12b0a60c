//! Contract between pagination and the host's list view.

use endless_core::LayoutKind;

/// Geometry of the rows currently laid out by the host.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ViewportMetrics {
    /// Rows at least partially visible.
    pub visible_count: usize,
    /// Adapter index of the first visible row.
    pub first_visible_index: usize,
    /// Rows known to the layout, visible or not.
    pub total_count: usize,
}

impl ViewportMetrics {
    pub const fn new(visible_count: usize, first_visible_index: usize, total_count: usize) -> Self {
        Self {
            visible_count,
            first_visible_index,
            total_count,
        }
    }

    /// Whether the last laid out row is on screen.
    #[inline]
    pub fn reaches_end(&self) -> bool {
        self.visible_count.saturating_add(self.first_visible_index) >= self.total_count
    }
}

/// Render/bind collaborator owned by the host toolkit.
///
/// Pagination never draws anything. It reads geometry through this trait and
/// tells the host when the bound items changed. Calls happen on the UI thread
/// and never while pagination holds internal borrows, so implementations may
/// read back from the list.
pub trait ListHost {
    /// Layout used by the list. Only linear layouts are supported.
    fn layout_kind(&self) -> LayoutKind;

    /// Current viewport geometry.
    fn viewport(&self) -> ViewportMetrics;

    /// Whether the laid out content overflows the viewport along the scroll axis.
    fn is_content_larger_than_viewport(&self) -> bool;

    /// Whether the user can scroll the list at all.
    fn is_scroll_enabled(&self) -> bool {
        true
    }

    /// The bound items changed and rows need to be rebound.
    fn notify_data_changed(&self);
}
