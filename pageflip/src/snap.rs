use crate::{GeometryState, ScrollVector};

/// Decides where a pager should come to rest.
///
/// A `SnapEngine` is a read-only view over one [`GeometryState`] snapshot: it answers "how far to
/// the page" and "where would this fling land" without committing anything. Obtain one from
/// [`crate::Pager::snap`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SnapEngine {
    geometry: GeometryState,
    item_count: usize,
}

impl SnapEngine {
    pub fn new(geometry: GeometryState, item_count: usize) -> Self {
        Self {
            geometry,
            item_count,
        }
    }

    pub fn geometry(&self) -> GeometryState {
        self.geometry
    }

    /// The exact scroll delta that brings `target` to the resting position:
    /// `(target - page) * item_length - offset`.
    pub fn distance_to_settle(&self, target: usize) -> i32 {
        let g = &self.geometry;
        let pages = target as i64 - g.page as i64;
        let distance = pages * g.item_length as i64 - g.offset as i64;
        distance.clamp(i32::MIN as i64, i32::MAX as i64) as i32
    }

    /// [`Self::distance_to_settle`] placed on the pager's axis.
    pub fn settle_vector(&self, target: usize) -> ScrollVector {
        ScrollVector::along(self.geometry.orientation, self.distance_to_settle(target))
    }

    /// Like [`Self::settle_vector`], but `None` when there is nothing to scroll to.
    pub fn scroll_vector_for_page(&self, target: usize) -> Option<ScrollVector> {
        if self.item_count == 0 {
            return None;
        }
        Some(self.settle_vector(target))
    }

    /// The page that an undisturbed settle would rest on: the current page, if it exists.
    pub fn snap_page(&self) -> Option<usize> {
        (self.geometry.page < self.item_count).then_some(self.geometry.page)
    }

    /// Where a fling that would travel `fling_distance` pixels lands.
    ///
    /// The projected offset `offset + fling_distance` moves at most one page, and only once it is
    /// more than half a page away; the result is clamped to `[0, item_count)`. Returns `None` when
    /// there are no items, in which case no settle should start.
    pub fn pick_target_page(&self, fling_distance: i32) -> Option<usize> {
        if self.item_count == 0 {
            return None;
        }
        let g = &self.geometry;
        let projected = g.offset as i64 + fling_distance as i64;
        let mut page = g.page.min(self.item_count - 1);
        if 2 * projected.abs() > g.item_length as i64 {
            if projected > 0 && page + 1 < self.item_count {
                page += 1;
            } else if projected < 0 && page > 0 {
                page -= 1;
            }
        }
        Some(page)
    }

    /// [`Self::pick_target_page`] for a fling vector; only the pager's axis counts.
    pub fn pick_target_page_for(&self, fling: ScrollVector) -> Option<usize> {
        self.pick_target_page(fling.main(self.geometry.orientation))
    }
}
