//! Blitting one image onto another.
//!
//! # Operations
//!
//! - [`Image::draw`] / [`Image::draw_region`] - Place a (sub)image with
//!   optional rotation, uniform scale and tint
//! - [`Image::draw_stretched`] - Axis-aligned stretch into a target rect
//! - [`Image::drawq`](crate::quad) - Map onto an arbitrary quadrilateral
//!
//! Sampling is nearest-neighbour. Each destination pixel centre is mapped
//! back into the source; pixels that land outside the source region are
//! left alone. The result is blended with the destination's mode and
//! restricted to its clip rectangle.
//!
//! An unrotated, unscaled draw takes a row path through the kernel
//! dispatcher. It produces the same bytes as the generic path.
//!
//! # Example
//!
//! ```rust
//! use blit_core::{Point, Rgba};
//! use blit_ops::{DrawParams, Image};
//!
//! let sprite = Image::filled(4, 4, Rgba::rgb(255, 0, 0))?;
//! let mut screen = Image::filled(32, 32, Rgba::BLACK)?;
//!
//! screen.draw(&sprite, Point::new(2, 2), 0.0, 1.0, Rgba::WHITE);
//! assert_eq!(screen.pixel(5, 5), Rgba::rgb(255, 0, 0));
//!
//! let params = DrawParams { scale: 2.0, ..Default::default() };
//! screen.draw_with(&sprite, None, Point::new(20, 20), params);
//! assert_eq!(screen.pixel(27, 27), Rgba::rgb(255, 0, 0));
//! # Ok::<(), blit_core::Error>(())
//! ```

use blit_core::{Point, Rect, Rgba};
use blit_math::tint;
use glam::Vec2;
use tracing::trace;

use crate::image::Image;

/// Placement parameters for [`Image::draw_with`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawParams {
    /// Clockwise rotation in radians about the footprint centre
    pub angle: f32,
    /// Uniform scale factor; `<= 0` draws nothing
    pub scale: f32,
    /// Colour multiplied into every source pixel
    pub tint: Rgba,
}

impl Default for DrawParams {
    fn default() -> Self {
        Self {
            angle: 0.0,
            scale: 1.0,
            tint: Rgba::WHITE,
        }
    }
}

impl DrawParams {
    /// Returns `true` if the draw is a plain 1:1 copy placement.
    #[inline]
    pub fn is_axis_aligned(&self) -> bool {
        self.angle == 0.0 && self.scale == 1.0
    }
}

impl Image {
    /// Draws all of `image` with its top-left at `pos`.
    ///
    /// `angle` rotates (radians, clockwise on screen) about the centre of
    /// the scaled footprint; `scale` is uniform; `tint` multiplies every
    /// source pixel.
    pub fn draw(&mut self, image: &Image, pos: Point, angle: f32, scale: f32, tint: Rgba) {
        self.draw_with(image, None, pos, DrawParams { angle, scale, tint });
    }

    /// Draws the `src_rect` part of `image` with its top-left at `pos`.
    pub fn draw_region(&mut self, image: &Image, src_rect: Rect, pos: Point, angle: f32, scale: f32, tint: Rgba) {
        self.draw_with(image, Some(src_rect), pos, DrawParams { angle, scale, tint });
    }

    /// Draws `image` (or its `src_rect` part) with explicit [`DrawParams`].
    pub fn draw_with(&mut self, image: &Image, src_rect: Option<Rect>, pos: Point, params: DrawParams) {
        let Some(region) = src_region(image, src_rect) else {
            return;
        };
        if params.scale <= 0.0 || !params.scale.is_finite() || !params.angle.is_finite() {
            return;
        }
        trace!(?region, ?pos, angle = params.angle, scale = params.scale, "draw");

        if params.is_axis_aligned() {
            self.draw_rows(image, region, pos, params.tint);
            return;
        }

        let size = Vec2::new(region.width as f32, region.height as f32) * params.scale;
        let half = size * 0.5;
        let centre = Vec2::new(pos.x as f32, pos.y as f32) + half;
        let forward = Vec2::from_angle(params.angle);
        let inverse = Vec2::from_angle(-params.angle);

        // destination bounds of the rotated footprint
        let corners = [-half, Vec2::new(half.x, -half.y), half, Vec2::new(-half.x, half.y)]
            .map(|c| centre + forward.rotate(c));
        let bounds = bounding_rect(&corners);

        let scale = params.scale;
        self.map_pixels(image, bounds, params.tint, |x, y| {
            let q = Vec2::new(x as f32 + 0.5, y as f32 + 0.5) - centre;
            let local = (inverse.rotate(q) + half) / scale;
            let (u, v) = (local.x.floor() as i32, local.y.floor() as i32);
            if local.x >= 0.0 && local.y >= 0.0 && u < region.width && v < region.height {
                Some((region.x + u, region.y + v))
            } else {
                None
            }
        });
    }

    /// 1:1 placement, row by row through the span kernels.
    fn draw_rows(&mut self, image: &Image, region: Rect, pos: Point, t: Rgba) {
        let tinted = t != Rgba::WHITE;
        let target = Rect::new(pos.x, pos.y, region.width, region.height);
        let Some(visible) = target.intersect(&self.clip_rect()) else {
            return;
        };
        let (sx0, sx1) = (region.x + visible.x - pos.x, region.x + visible.right() - pos.x);
        let mut buf = Vec::new();
        for y in visible.y..visible.bottom() {
            let row = image.row(region.y + y - pos.y, sx0, sx1);
            if tinted {
                buf.clear();
                buf.extend(row.iter().map(|&px| tint(px, t)));
                self.blend_row(visible.x, y, &buf, true);
            } else {
                self.blend_row(visible.x, y, row, false);
            }
        }
    }

    /// Stretches the `src_rect` part of `image` to fill `dst_rect`.
    ///
    /// Nearest-neighbour, axis-aligned: destination column `i` samples
    /// source column `i * src_w / dst_w`.
    pub fn draw_stretched(&mut self, image: &Image, src_rect: Rect, dst_rect: Rect, t: Rgba) {
        let Some(region) = src_region(image, Some(src_rect)) else {
            return;
        };
        if dst_rect.is_empty() {
            return;
        }
        if dst_rect.width == region.width && dst_rect.height == region.height {
            self.draw_rows(image, region, dst_rect.origin(), t);
            return;
        }
        let Some(visible) = dst_rect.intersect(&self.clip_rect()) else {
            return;
        };
        trace!(?region, ?dst_rect, "draw stretched");

        let tinted = t != Rgba::WHITE;
        let scale = |i: i32, src: i32, dst: i32| (i as i64 * src as i64 / dst as i64) as i32;
        let columns: Vec<i32> = (visible.x..visible.right())
            .map(|x| region.x + scale(x - dst_rect.x, region.width, dst_rect.width))
            .collect();

        let mut buf = Vec::with_capacity(columns.len());
        for y in visible.y..visible.bottom() {
            let sy = region.y + scale(y - dst_rect.y, region.height, dst_rect.height);
            buf.clear();
            buf.extend(columns.iter().map(|&sx| {
                let px = image.pixel(sx, sy);
                if tinted { tint(px, t) } else { px }
            }));
            self.blend_row(visible.x, y, &buf, tinted);
        }
    }

    /// Inverse-maps every pixel of `bounds ∩ clip` through `map` and
    /// blends the sampled, tinted source pixel.
    pub(crate) fn map_pixels(&mut self, image: &Image, bounds: Rect, t: Rgba, map: impl Fn(i32, i32) -> Option<(i32, i32)>) {
        let Some(visible) = bounds.intersect(&self.clip_rect()) else {
            return;
        };
        let tinted = t != Rgba::WHITE;
        for y in visible.y..visible.bottom() {
            for x in visible.x..visible.right() {
                if let Some((sx, sy)) = map(x, y) {
                    let px = image.pixel(sx, sy);
                    self.plot(x, y, if tinted { tint(px, t) } else { px });
                }
            }
        }
    }
}

/// Resolves the source region: `src_rect ∩ bbox`, or the whole image.
pub(crate) fn src_region(image: &Image, src_rect: Option<Rect>) -> Option<Rect> {
    match src_rect {
        Some(r) => r.intersect(&image.bbox()),
        None => Some(image.bbox()),
    }
}

/// Smallest pixel rectangle covering a set of points.
pub(crate) fn bounding_rect(points: &[Vec2]) -> Rect {
    let min = points.iter().copied().reduce(Vec2::min).unwrap_or(Vec2::ZERO).floor();
    let max = points.iter().copied().reduce(Vec2::max).unwrap_or(Vec2::ZERO).ceil();
    // saturating float casts keep far-off footprints harmless
    let (x0, y0) = (min.x as i32, min.y as i32);
    let (x1, y1) = (max.x as i32, max.y as i32);
    Rect::new(x0, y0, x1.saturating_sub(x0), y1.saturating_sub(y0))
}
