use alloc::sync::Arc;

use crate::{Error, Orientation, Result};

/// A callback fired with `(old_page, new_page)` whenever the resting page changes.
pub type OnPageChangeCallback = Arc<dyn Fn(usize, usize) + Send + Sync>;

/// Configuration for [`crate::Pager`].
#[derive(Clone)]
pub struct PagerOptions {
    pub orientation: Orientation,
    /// The page to rest on before the first layout. Clamped once the item count is known.
    pub initial_page: usize,
    pub on_page_change: Option<OnPageChangeCallback>,
}

impl PagerOptions {
    pub fn new(orientation: Orientation) -> Self {
        Self {
            orientation,
            initial_page: 0,
            on_page_change: None,
        }
    }

    pub fn with_initial_page(mut self, initial_page: usize) -> Self {
        self.initial_page = initial_page;
        self
    }

    pub fn with_on_page_change(
        mut self,
        on_page_change: Option<impl Fn(usize, usize) + Send + Sync + 'static>,
    ) -> Self {
        self.on_page_change = on_page_change.map(|f| Arc::new(f) as _);
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.initial_page > i32::MAX as usize {
            return Err(Error::InvalidOption {
                name: "initial_page",
                reason: "must fit the pager's logical coordinate space",
            });
        }
        Ok(())
    }
}

impl Default for PagerOptions {
    fn default() -> Self {
        Self::new(Orientation::default())
    }
}

impl core::fmt::Debug for PagerOptions {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("PagerOptions")
            .field("orientation", &self.orientation)
            .field("initial_page", &self.initial_page)
            .finish_non_exhaustive()
    }
}
