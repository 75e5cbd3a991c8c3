use alloc::vec::Vec;

use crate::{
    Error, GeometryState, Orientation, PageBounds, PageHost, PageState, PagerOptions,
    PagerSnapshot, Result, ScrollVector, SnapEngine,
};

/// A paged scroll controller.
///
/// `Pager` turns continuous scroll deltas into a resting page plus a bounded sub-page offset, and
/// tells its [`PageHost`] which of the pages around the resting one are attached, visible and how
/// far the resting page is turned.
///
/// It holds no UI objects: every call that may attach, detach or re-lay out pages takes the host
/// explicitly. All calls are expected on the host's UI thread.
#[derive(Clone, Debug)]
pub struct Pager {
    options: PagerOptions,
    geometry: GeometryState,
    item_count: usize,
    bounds: PageBounds,
    attached: Vec<usize>, // sorted, at most three
}

impl Pager {
    pub fn new(options: PagerOptions) -> Result<Self> {
        options.validate()?;
        pdebug!(
            orientation = ?options.orientation,
            initial_page = options.initial_page,
            "Pager::new"
        );
        let mut geometry = GeometryState::new(options.orientation);
        geometry.page = options.initial_page;
        Ok(Self {
            options,
            geometry,
            item_count: 0,
            bounds: PageBounds::default(),
            attached: Vec::with_capacity(3),
        })
    }

    pub fn options(&self) -> &PagerOptions {
        &self.options
    }

    pub fn orientation(&self) -> Orientation {
        self.geometry.orientation
    }

    pub fn geometry(&self) -> GeometryState {
        self.geometry
    }

    pub fn page(&self) -> usize {
        self.geometry.page
    }

    pub fn offset(&self) -> i32 {
        self.geometry.offset
    }

    pub fn item_length(&self) -> u32 {
        self.geometry.item_length
    }

    /// The item count seen at the last layout or scroll.
    pub fn item_count(&self) -> usize {
        self.item_count
    }

    /// The bounds every page is laid out at.
    pub fn bounds(&self) -> PageBounds {
        self.bounds
    }

    /// Indexes of the currently attached pages, ascending.
    pub fn attached(&self) -> &[usize] {
        &self.attached
    }

    pub fn is_attached(&self, index: usize) -> bool {
        self.attached.binary_search(&index).is_ok()
    }

    /// Rotation and visibility for an attached page.
    pub fn page_state(&self, index: usize) -> Option<PageState> {
        self.is_attached(index).then(|| self.state_for(index))
    }

    /// States of all attached pages, ascending by index.
    pub fn page_states(&self) -> impl Iterator<Item = PageState> + '_ {
        self.attached.iter().map(|&index| self.state_for(index))
    }

    /// Visible pages in the order they should be drawn: the neighbor first, the resting page
    /// last so its turning half covers the neighbor.
    pub fn draw_order(&self) -> impl Iterator<Item = PageState> + '_ {
        let page = self.geometry.page;
        let neighbors = self.page_states().filter(move |s| s.index != page);
        neighbors
            .chain(self.page_state(page))
            .filter(|s| s.visible)
    }

    /// A snap engine over the current geometry.
    pub fn snap(&self) -> SnapEngine {
        SnapEngine::new(self.geometry, self.item_count)
    }

    /// See [`SnapEngine::distance_to_settle`].
    pub fn distance_to_settle(&self, target: usize) -> i32 {
        self.snap().distance_to_settle(target)
    }

    /// See [`SnapEngine::pick_target_page`].
    pub fn pick_target_page(&self, fling_distance: i32) -> Option<usize> {
        self.snap().pick_target_page(fling_distance)
    }

    /// See [`SnapEngine::snap_page`].
    pub fn snap_page(&self) -> Option<usize> {
        self.snap().snap_page()
    }

    pub fn settle_vector(&self, target: usize) -> ScrollVector {
        self.snap().settle_vector(target)
    }

    pub fn scroll_vector_for_page(&self, target: usize) -> Option<ScrollVector> {
        self.snap().scroll_vector_for_page(target)
    }

    /// Full layout pass: re-reads the viewport and item count from the host, clamps the resting
    /// page, and re-attaches and re-lays out every page in range.
    ///
    /// Call this whenever the viewport resizes, the data set changes, or the host's
    /// [`PageHost::request_layout`] fires.
    pub fn layout<H: PageHost + ?Sized>(&mut self, host: &mut H) -> Result<()> {
        let orientation = self.geometry.orientation;
        if !host.can_scroll(orientation) {
            pwarn!(orientation = ?orientation, "Pager::layout: host cannot scroll on this axis");
            return Err(Error::IncompatibleHost { orientation });
        }

        self.bounds = host.viewport();
        self.geometry.item_length = self.bounds.length(orientation);
        self.item_count = host.item_count();
        ptrace!(
            item_count = self.item_count,
            item_length = self.geometry.item_length,
            page = self.geometry.page,
            "Pager::layout"
        );

        let old_page = self.geometry.page;
        if self.geometry.clamp_to(self.item_count) {
            pdebug!(
                from = old_page,
                to = self.geometry.page,
                item_count = self.item_count,
                "Pager::layout: clamped page"
            );
        }
        self.notify_page_change(old_page);

        if self.item_count == 0 {
            self.detach_all(host);
            return Ok(());
        }
        self.fill(host, true)
    }

    /// Reacts to a change of the host's item count without a full layout pass.
    ///
    /// A resting page past the new end is clamped to the last page (with the offset reset) and
    /// the attached set is refilled. An empty host detaches everything.
    pub fn on_item_count_changed<H: PageHost + ?Sized>(&mut self, host: &mut H) -> Result<()> {
        let count = host.item_count();
        if count == self.item_count {
            return Ok(());
        }
        self.item_count = count;

        let old_page = self.geometry.page;
        let clamped = self.geometry.clamp_to(count);
        self.notify_page_change(old_page);

        if count == 0 {
            self.detach_all(host);
            return Ok(());
        }
        if clamped {
            pdebug!(from = old_page, to = self.geometry.page, count, "item count shrank");
        }
        self.fill(host, false)
    }

    /// Scrolls by `delta` pixels along the pager's axis and returns the consumed part.
    ///
    /// Positive deltas move toward later pages. Deltas that would scroll past the first or last
    /// page are absorbed; `0` is returned when nothing moved. Crossing into another resting page
    /// refills the attached set; otherwise only rotation and visibility are refreshed.
    pub fn scroll_by<H: PageHost + ?Sized>(&mut self, delta: i32, host: &mut H) -> Result<i32> {
        // A count the pager has not seen yet refills first, so no page past the end stays
        // attached.
        self.on_item_count_changed(host)?;
        let count = self.item_count;
        if count == 0 {
            let old_page = self.geometry.page;
            self.geometry.clamp_to(0);
            self.notify_page_change(old_page);
            return Ok(0);
        }

        // A jump may have left the page past the end.
        let old_page = self.geometry.page;
        if self.geometry.clamp_to(count) {
            pdebug!(from = old_page, to = self.geometry.page, count, "stale page clamped");
            self.fill(host, false)?;
            self.notify_page_change(old_page);
        }

        let (next, consumed) = self.geometry.scrolled(delta, count);
        if consumed == 0 {
            return Ok(0);
        }

        let old_page = self.geometry.page;
        self.geometry = next;
        ptrace!(
            delta,
            consumed,
            page = next.page,
            offset = next.offset,
            "Pager::scroll_by"
        );

        if old_page != next.page {
            self.fill(host, false)?;
            self.notify_page_change(old_page);
        } else {
            self.refresh(host);
        }
        Ok(consumed)
    }

    /// Jumps to `page` with no offset and asks the host for a layout pass.
    ///
    /// Pages past the end are clamped by that layout.
    pub fn scroll_to_page<H: PageHost + ?Sized>(&mut self, page: usize, host: &mut H) {
        pdebug!(from = self.geometry.page, to = page, "Pager::scroll_to_page");
        let old_page = self.geometry.page;
        self.geometry.page = page;
        self.geometry.offset = 0;
        self.notify_page_change(old_page);
        host.request_layout();
    }

    pub fn snapshot(&self) -> PagerSnapshot {
        PagerSnapshot {
            page: self.geometry.page,
            offset: self.geometry.offset,
        }
    }

    /// Restores a snapshot taken with [`Self::snapshot`] and asks the host for a layout pass.
    ///
    /// An offset that does not fit the current page length is dropped.
    pub fn restore_snapshot<H: PageHost + ?Sized>(
        &mut self,
        snapshot: PagerSnapshot,
        host: &mut H,
    ) {
        let len = self.geometry.item_length as i64;
        let offset = snapshot.offset as i64;
        let fits = len > 0 && 2 * offset < len && 2 * offset >= -len;
        let old_page = self.geometry.page;
        self.geometry.page = snapshot.page;
        self.geometry.offset = if fits { snapshot.offset } else { 0 };
        self.notify_page_change(old_page);
        host.request_layout();
    }

    fn state_for(&self, index: usize) -> PageState {
        let g = &self.geometry;
        PageState {
            index,
            degree: if index == g.page { g.degree() } else { 0 },
            orientation: g.orientation,
            visible: g.is_visible(index),
        }
    }

    fn fill<H: PageHost + ?Sized>(&mut self, host: &mut H, relayout: bool) -> Result<()> {
        let range = self.geometry.candidates(self.item_count);

        let mut kept = Vec::with_capacity(3);
        for &index in &self.attached {
            if range.contains(&index) {
                kept.push(index);
            } else {
                host.detach(index);
            }
        }
        self.attached = kept;

        for index in range {
            match self.attached.binary_search(&index) {
                Ok(_) => {
                    if relayout {
                        host.layout_page(index, self.bounds);
                    }
                }
                Err(slot) => {
                    if !host.attach(index) {
                        pwarn!(index, "Pager: page cannot draw itself raw");
                        return Err(Error::UnsupportedPage { index });
                    }
                    host.layout_page(index, self.bounds);
                    self.attached.insert(slot, index);
                }
            }
            host.update_page(self.state_for(index));
        }
        Ok(())
    }

    fn refresh<H: PageHost + ?Sized>(&self, host: &mut H) {
        for &index in &self.attached {
            host.update_page(self.state_for(index));
        }
    }

    fn detach_all<H: PageHost + ?Sized>(&mut self, host: &mut H) {
        for index in self.attached.drain(..) {
            host.detach(index);
        }
    }

    fn notify_page_change(&self, old_page: usize) {
        let page = self.geometry.page;
        if page == old_page {
            return;
        }
        if let Some(cb) = &self.options.on_page_change {
            cb(old_page, page);
        }
    }
}
