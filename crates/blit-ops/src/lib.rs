//! # blit-ops
//!
//! The RGBA pixel buffer and everything that draws into it.
//!
//! # Modules
//!
//! - [`image`] - [`Image`] buffer, clip and blend state, [`SharedImage`]
//! - [`transform`] - Region copy, flips, quarter turns
//! - [`raster`] - Points, lines, rectangles, circles, triangles
//! - [`composite`] - Rotated/scaled/tinted blits and stretches
//! - [`quad`] - Blits onto arbitrary quadrilaterals
//! - [`text`] - Bitmap text through the [`Font`] trait
//! - [`window`] - Nine-slice window frames through [`WindowSkin`]
//!
//! All drawing is clipped to the destination's clip rectangle and blended
//! with its [`BlendMode`](blit_core::BlendMode). Drawing never fails;
//! only construction, resizing and region copies return errors.
//!
//! # Example
//!
//! ```rust
//! use blit_core::{BlendMode, Point, Rect, Rgba};
//! use blit_ops::Image;
//!
//! let mut canvas = Image::filled(64, 64, Rgba::BLACK)?;
//! canvas.draw_circle(true, Point::new(32, 32), 20, Rgba::rgb(40, 90, 200));
//!
//! let mut sprite = Image::filled(8, 8, Rgba::new(255, 255, 0, 128))?;
//! sprite.draw_rectangle(false, sprite.bbox(), Rgba::WHITE);
//!
//! canvas.set_blend_mode(BlendMode::Add);
//! canvas.draw(&sprite, Point::new(28, 28), 0.5, 2.0, Rgba::WHITE);
//!
//! let corner = canvas.copy_rect(Rect::new(0, 0, 16, 16))?;
//! assert_eq!(corner.pixel(0, 0), Rgba::BLACK);
//! # Ok::<(), blit_core::Error>(())
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod composite;
pub mod image;
pub mod quad;
pub mod raster;
pub mod text;
pub mod transform;
pub mod window;

pub use composite::DrawParams;
pub use image::{Image, SharedImage};
pub use text::{BitmapFont, Font};
pub use window::{NineSlice, SkinLayout, WindowSkin};
