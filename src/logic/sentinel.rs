//! Bottom-of-grid visibility trigger.
//!
//! The grid has a virtual "sentinel" row right after its last card row. When that
//! row comes within `margin_rows` of the visible area, the sentinel is considered
//! intersecting. Only the transition from hidden to intersecting fires.

/// Rows the grid occupies and the slice of them on screen.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct GridViewport {
    /// Index of the first visible card row.
    pub first_row: usize,
    /// Number of card rows that fit in the grid area.
    pub visible_rows: usize,
    /// Number of card rows the whole list occupies.
    pub total_rows: usize,
}

/// Edge-triggered visibility tracker for the sentinel row.
#[derive(Clone, Debug)]
pub struct Sentinel {
    /// Extra rows below the visible area that already count as visible.
    margin_rows: usize,
    /// Visibility seen by the last observation.
    visible: bool,
}

impl Default for Sentinel {
    fn default() -> Self {
        Self::new(1)
    }
}

impl Sentinel {
    /// What: Create a sentinel that has not been seen yet.
    #[must_use]
    pub const fn new(margin_rows: usize) -> Self {
        Self {
            margin_rows,
            visible: false,
        }
    }

    /// What: Whether the sentinel row lies inside the visible area plus margin.
    ///
    /// Details:
    /// - The sentinel sits at row index `total_rows`; the watched area spans
    ///   `first_row .. first_row + visible_rows + margin_rows`.
    /// - A grid with zero visible rows has no viewport, so nothing intersects.
    #[must_use]
    pub const fn is_intersecting(&self, vp: GridViewport) -> bool {
        if vp.visible_rows == 0 {
            return false;
        }
        vp.total_rows >= vp.first_row
            && vp.total_rows < vp.first_row + vp.visible_rows + self.margin_rows
    }

    /// What: Record a new observation.
    ///
    /// Output:
    /// - `true` only when the sentinel went from hidden to intersecting.
    pub const fn observe(&mut self, vp: GridViewport) -> bool {
        let now = self.is_intersecting(vp);
        let fired = now && !self.visible;
        self.visible = now;
        fired
    }

    /// What: Forget the last visibility so the next intersecting observation fires again.
    pub const fn rearm(&mut self) {
        self.visible = false;
    }

    /// Rows of look-ahead below the visible area.
    #[must_use]
    pub const fn margin_rows(&self) -> usize {
        self.margin_rows
    }
}
