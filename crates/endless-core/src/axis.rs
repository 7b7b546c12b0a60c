/// Scroll axis of a single-axis linear list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Orientation {
    /// Items flow left to right.
    /// Scroll deltas and swipe displacement are read from `x`.
    Horizontal,

    /// Items flow top to bottom.
    /// Scroll deltas and swipe displacement are read from `y`.
    Vertical,
}

impl Orientation {
    /// Picks the component of `(x, y)` lying on this axis.
    #[inline]
    pub fn main_axis(self, x: f32, y: f32) -> f32 {
        match self {
            Orientation::Horizontal => x,
            Orientation::Vertical => y,
        }
    }
}

/// Layout strategy reported by the host for the list being paginated.
///
/// Pagination only understands single-axis linear lists. Grids are listed so
/// hosts can describe what they have and get a proper error back instead of a
/// silently wrong end-of-list check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LayoutKind {
    Linear(Orientation),
    Grid { orientation: Orientation, span_count: u32 },
    StaggeredGrid { orientation: Orientation, span_count: u32 },
}

impl LayoutKind {
    /// Returns the orientation for linear layouts, `None` otherwise.
    pub fn linear_orientation(self) -> Option<Orientation> {
        match self {
            LayoutKind::Linear(orientation) => Some(orientation),
            LayoutKind::Grid { .. } | LayoutKind::StaggeredGrid { .. } => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            LayoutKind::Linear(_) => "linear",
            LayoutKind::Grid { .. } => "grid",
            LayoutKind::StaggeredGrid { .. } => "staggered grid",
        }
    }
}
