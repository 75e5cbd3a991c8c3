//! Adapter utilities for the `pageflip` crate.
//!
//! The `pageflip` crate is UI-agnostic and focuses on paged scroll state. This crate provides
//! the framework-neutral pieces an adapter needs on top of it:
//!
//! - Settling onto whole pages with a bounded deceleration (`SmoothSettler`)
//! - Fling projection and snapping (`FlingModel`, `FlipController`)
//! - Page-turn rendering through a perspective camera (`FlipCompositor`)
//!
//! Rendering goes through the small [`Canvas`] trait; no UI toolkit is bound here.
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

#[macro_use]
mod macros;

mod camera;
mod compositor;
mod controller;
mod fling;
mod settle;


pub use camera::{Camera, PIXELS_PER_INCH, Perspective};
pub use compositor::{
    Canvas, FlipCompositor, FlipOptions, FlipPlan, FlipSide, RawDraw, Rgba8, page_rect,
};
pub use controller::FlipController;
pub use fling::{FlingModel, FlingOptions};
pub use settle::{SettleAction, SettleOptions, SettleStep, SmoothSettler, decelerate};
