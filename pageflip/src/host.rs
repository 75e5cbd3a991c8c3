use crate::{Orientation, PageBounds, PageState};

/// The container a [`crate::Pager`] drives.
///
/// The pager never owns page objects. It decides which of the (at most three) candidate indexes
/// are attached and what each should look like; the host owns, pools, measures and draws them.
pub trait PageHost {
    /// Number of pages currently available.
    fn item_count(&self) -> usize;

    /// The content rect of the viewport (inside padding). Every page is laid out to fill it.
    fn viewport(&self) -> PageBounds;

    /// Whether the host can scroll along `orientation`. Defaults to `true`.
    fn can_scroll(&self, orientation: Orientation) -> bool {
        let _ = orientation;
        true
    }

    /// Attaches the page at `index`.
    ///
    /// Returns `false` if that page cannot draw itself raw (without the flip transform); the pager
    /// then aborts with [`crate::Error::UnsupportedPage`].
    fn attach(&mut self, index: usize) -> bool;

    /// Detaches (and typically recycles) the page at `index`.
    fn detach(&mut self, index: usize);

    /// Measures and places the page at `index`.
    fn layout_page(&mut self, index: usize, bounds: PageBounds);

    /// Applies rotation and visibility to an attached page.
    fn update_page(&mut self, state: PageState);

    /// Asks the host to run [`crate::Pager::layout`] again.
    fn request_layout(&mut self);
}
