//! # blit-core
//!
//! Core types for RGBA raster drawing.
//!
//! This crate provides the foundational types used throughout blit-rs:
//!
//! - [`Rgba`] - Straight-alpha 8-bit RGBA pixel
//! - [`Rect`], [`Point`] - Signed integer geometry for clipping and placement
//! - [`BlendMode`] - Compositing function applied when writing pixels
//! - [`Error`], [`Result`] - Construction and allocation failures
//!
//! ## Crate Structure
//!
//! This crate has no internal dependencies. All other blit-rs crates
//! depend on `blit-core`:
//!
//! ```text
//! blit-core (this crate)
//!    ^
//!    |
//!    +-- blit-math (cpu probe, blend engine, SIMD kernels)
//!    +-- blit-ops  (Image, rasterizer, compositor)
//!    +-- blit-io   (PNG adapter)
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod blend_mode;
pub mod error;
pub mod pixel;
pub mod rect;

pub use blend_mode::BlendMode;
pub use error::{Error, Result};
pub use pixel::Rgba;
pub use rect::{Point, Rect};

/// Prelude module for convenient imports.
///
/// ```
/// use blit_core::prelude::*;
///
/// let red = Rgba::rgb(255, 0, 0);
/// let area = Rect::new(0, 0, 4, 4);
/// assert!(area.contains(Point::new(3, 3)));
/// assert_eq!(red.a, 255);
/// ```
pub mod prelude {
    pub use crate::blend_mode::BlendMode;
    pub use crate::error::{Error, Result};
    pub use crate::pixel::Rgba;
    pub use crate::rect::{Point, Rect};
}
