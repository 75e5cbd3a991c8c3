use crate::Orientation;

/// Flip rotation is kept strictly inside `(-90, 90)` so the page never turns edge-on.
pub const MAX_DEGREE: i32 = 89;

/// The scroll geometry of a pager: which page rests in the viewport and how far the layout has
/// been dragged away from it.
///
/// `offset` is signed: positive while the next page is coming into view, negative while the
/// previous one is. Transitions keep `offset` within `[-item_length / 2, item_length / 2)` (rounded
/// toward the nearer page for odd lengths), so the resting page is always the nearer one.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GeometryState {
    pub orientation: Orientation,
    pub item_length: u32,
    pub page: usize,
    pub offset: i32,
}

impl GeometryState {
    pub fn new(orientation: Orientation) -> Self {
        Self {
            orientation,
            item_length: 0,
            page: 0,
            offset: 0,
        }
    }

    pub fn is_resting(&self) -> bool {
        self.offset == 0
    }

    /// `page * item_length + offset`, the one-dimensional scroll coordinate across all pages.
    pub fn logical_position(&self) -> i64 {
        self.page as i64 * self.item_length as i64 + self.offset as i64
    }

    /// The largest logical position reachable with `item_count` pages.
    pub fn logical_max(&self, item_count: usize) -> i64 {
        self.item_length as i64 * item_count.saturating_sub(1) as i64
    }

    /// Returns the state after scrolling by `delta`, plus the part of `delta` that was consumed.
    ///
    /// Over-scroll past either end is absorbed: the logical position is clamped to
    /// `[0, logical_max]` and only the clamped movement is reported as consumed.
    pub fn scrolled(self, delta: i32, item_count: usize) -> (Self, i32) {
        if item_count == 0 || self.item_length == 0 || delta == 0 {
            return (self, 0);
        }

        let len = self.item_length as i64;
        let pos = self.logical_position();
        let next = pos
            .saturating_add(delta as i64)
            .clamp(0, self.logical_max(item_count));
        let consumed = (next - pos) as i32;
        if consumed == 0 {
            return (self, 0);
        }

        // `next` is never negative, so the raw remainder is in `[0, len)` and only ever needs to be
        // folded onto the following page.
        let mut page = next / len;
        let mut offset = next % len;
        if 2 * offset >= len {
            offset -= len;
            page += 1;
        }

        let state = Self {
            page: page as usize,
            offset: offset as i32,
            ..self
        };
        (state, consumed)
    }

    /// Moves the resting page back inside `[0, item_count)`. Returns `true` if anything changed.
    ///
    /// An empty pager rests at page 0 with no offset.
    pub fn clamp_to(&mut self, item_count: usize) -> bool {
        if item_count == 0 {
            let changed = self.page != 0 || self.offset != 0;
            self.page = 0;
            self.offset = 0;
            return changed;
        }
        if self.page >= item_count {
            self.page = item_count - 1;
            self.offset = 0;
            return true;
        }
        false
    }

    /// Rotation of the resting page: `round(180 * offset / item_length)`, kept within `(-90, 90)`.
    pub fn degree(&self) -> i32 {
        if self.item_length == 0 || self.offset == 0 {
            return 0;
        }
        let num = 180 * self.offset as i64;
        let len = self.item_length as i64;
        // Round half away from zero.
        let rounded = (2 * num + num.signum() * len) / (2 * len);
        (rounded as i32).clamp(-MAX_DEGREE, MAX_DEGREE)
    }

    /// Whether the page at `index` should be visible in this state.
    ///
    /// The resting page always is; the previous page only while `offset < 0`, the next page only
    /// while `offset > 0`.
    pub fn is_visible(&self, index: usize) -> bool {
        match index.cmp(&self.page) {
            core::cmp::Ordering::Equal => true,
            core::cmp::Ordering::Less => self.offset < 0,
            core::cmp::Ordering::Greater => self.offset > 0,
        }
    }

    /// Candidate page indexes around the resting page, `page - 1`, `page`, `page + 1`, limited to
    /// `[0, item_count)`.
    pub fn candidates(&self, item_count: usize) -> core::ops::Range<usize> {
        if item_count == 0 {
            return 0..0;
        }
        let start = self.page.saturating_sub(1);
        let end = self.page.saturating_add(2).min(item_count);
        start..end
    }
}
