//! A headless paged-scroll engine.
//!
//! The pager shows one full-viewport page at a time. Drags move the layout continuously; the
//! engine folds that movement into a resting page plus a sub-page offset that never exceeds half
//! a page, and reports which neighbor is coming into view and how far the resting page is turned.
//!
//! For settling, fling snapping and page-turn rendering, see the `pageflip-adapter` crate.
//!
//! It is UI-agnostic. A host layer is expected to provide (via [`PageHost`]):
//! - the viewport content rect and the item count
//! - attach / detach / layout of the page at an index
//! - scroll deltas along the pager's axis
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

#[macro_use]
mod macros;

mod error;
mod host;
mod options;
mod pager;
mod snap;
mod state;
mod types;

#[cfg(test)]
mod tests;

pub use error::{Error, Result};
pub use host::PageHost;
pub use options::{OnPageChangeCallback, PagerOptions};
pub use pager::Pager;
pub use snap::SnapEngine;
pub use state::{GeometryState, MAX_DEGREE};
pub use types::{Orientation, PageBounds, PageState, PagerSnapshot, ScrollVector};
