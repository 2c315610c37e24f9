//! Quadrilateral-mapped blits.
//!
//! [`Image::drawq`] maps a source rectangle onto an arbitrary convex quad
//! given by its four corners in order upper-left, upper-right, lower-right,
//! lower-left. Corners are pixel-edge coordinates: the quad
//! `(x, y), (x + w, y), (x + w, y + h), (x, y + h)` covers exactly the
//! same pixels as a plain `draw` of a `w x h` image at `(x, y)`.
//!
//! Each destination pixel centre is inverted through the bilinear patch to
//! source coordinates `(u, v)` in `[0, 1)`; the inverse is solved in closed
//! form from one quadratic.

use blit_core::{Point, Rect, Rgba};
use glam::DVec2;
use tracing::trace;

use crate::composite::{bounding_rect, src_region};
use crate::image::Image;

/// Below this `|k2|` the patch is treated as a parallelogram.
const PARALLEL_EPS: f64 = 1e-9;

/// Inverts the bilinear patch `a b c d` (ul, ur, lr, ll) at `p`.
///
/// Returns `(u, v)` with `u` along `a -> b` and `v` along `a -> d`, or
/// `None` when `p` has no preimage. The result is not range-checked.
///
/// ```rust
/// use glam::DVec2;
/// use blit_ops::quad::inverse_bilinear;
///
/// let (a, b) = (DVec2::new(0.0, 0.0), DVec2::new(4.0, 0.0));
/// let (c, d) = (DVec2::new(4.0, 2.0), DVec2::new(0.0, 2.0));
/// let uv = inverse_bilinear(DVec2::new(1.0, 1.0), a, b, c, d).unwrap();
/// assert_eq!(uv, DVec2::new(0.25, 0.5));
/// ```
pub fn inverse_bilinear(p: DVec2, a: DVec2, b: DVec2, c: DVec2, d: DVec2) -> Option<DVec2> {
    let e = b - a;
    let f = d - a;
    let g = a - b + c - d;
    let h = p - a;

    let k2 = g.perp_dot(f);
    let k1 = e.perp_dot(f) + h.perp_dot(g);
    let k0 = h.perp_dot(e);

    // u from whichever axis is better conditioned
    let solve_u = |v: f64| {
        let dx = e.x + g.x * v;
        let dy = e.y + g.y * v;
        if dx.abs() >= dy.abs() {
            (h.x - f.x * v) / dx
        } else {
            (h.y - f.y * v) / dy
        }
    };

    if k2.abs() < PARALLEL_EPS {
        if k1 == 0.0 {
            return None;
        }
        let v = -k0 / k1;
        return Some(DVec2::new(solve_u(v), v));
    }

    let disc = k1 * k1 - 4.0 * k0 * k2;
    if disc < 0.0 {
        return None;
    }
    let w = disc.sqrt();
    let ik2 = 0.5 / k2;

    let v = (-k1 - w) * ik2;
    let u = solve_u(v);
    if (0.0..=1.0).contains(&u) && (0.0..=1.0).contains(&v) {
        return Some(DVec2::new(u, v));
    }
    let v = (-k1 + w) * ik2;
    Some(DVec2::new(solve_u(v), v))
}

fn to_dvec(p: Point) -> DVec2 {
    DVec2::new(p.x as f64, p.y as f64)
}

impl Image {
    /// Maps all of `image` onto the quad `ul, ur, lr, ll`.
    pub fn drawq(&mut self, image: &Image, ul: Point, ur: Point, lr: Point, ll: Point, tint: Rgba) {
        self.drawq_with(image, None, [ul, ur, lr, ll], tint);
    }

    /// Maps the `src_rect` part of `image` onto the quad `ul, ur, lr, ll`.
    pub fn drawq_region(&mut self, image: &Image, src_rect: Rect, ul: Point, ur: Point, lr: Point, ll: Point, tint: Rgba) {
        self.drawq_with(image, Some(src_rect), [ul, ur, lr, ll], tint);
    }

    fn drawq_with(&mut self, image: &Image, src_rect: Option<Rect>, quad: [Point; 4], tint: Rgba) {
        let Some(region) = src_region(image, src_rect) else {
            return;
        };
        trace!(?region, ?quad, "drawq");

        let [a, b, c, d] = quad.map(to_dvec);
        let bounds = bounding_rect(&[a, b, c, d].map(|v| v.as_vec2()));
        let (rw, rh) = (region.width as f64, region.height as f64);

        self.map_pixels(image, bounds, tint, |x, y| {
            let p = DVec2::new(x as f64 + 0.5, y as f64 + 0.5);
            let uv = inverse_bilinear(p, a, b, c, d)?;
            if !(0.0..1.0).contains(&uv.x) || !(0.0..1.0).contains(&uv.y) {
                return None;
            }
            let sx = ((uv.x * rw) as i32).min(region.width - 1);
            let sy = ((uv.y * rh) as i32).min(region.height - 1);
            Some((region.x + sx, region.y + sy))
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn numbered(w: i32, h: i32) -> Image {
        let px: Vec<Rgba> = (0..w * h).map(|i| Rgba::new(i as u8, 50, 50, 255)).collect();
        Image::from_pixels(w, h, &px).unwrap()
    }

    /// Forward bilinear map, for checking the inverse.
    fn forward(uv: DVec2, a: DVec2, b: DVec2, c: DVec2, d: DVec2) -> DVec2 {
        let top = a.lerp(b, uv.x);
        let bottom = d.lerp(c, uv.x);
        top.lerp(bottom, uv.y)
    }

    #[test]
    fn test_inverse_of_trapezoid() {
        let a = DVec2::new(2.0, 1.0);
        let b = DVec2::new(9.0, 0.0);
        let c = DVec2::new(12.0, 8.0);
        let d = DVec2::new(0.0, 7.0);
        for &(u, v) in &[(0.1, 0.1), (0.5, 0.5), (0.9, 0.3), (0.25, 0.8)] {
            let p = forward(DVec2::new(u, v), a, b, c, d);
            let uv = inverse_bilinear(p, a, b, c, d).unwrap();
            assert_relative_eq!(uv.x, u, epsilon = 1e-9);
            assert_relative_eq!(uv.y, v, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_axis_aligned_quad_equals_draw() {
        let src = numbered(5, 3);
        let mut by_draw = Image::new(12, 12).unwrap();
        by_draw.draw(&src, Point::new(3, 4), 0.0, 1.0, Rgba::WHITE);

        let mut by_quad = Image::new(12, 12).unwrap();
        by_quad.drawq(
            &src,
            Point::new(3, 4),
            Point::new(8, 4),
            Point::new(8, 7),
            Point::new(3, 7),
            Rgba::WHITE,
        );
        assert_eq!(by_draw.pixels(), by_quad.pixels());
    }

    #[test]
    fn test_quad_region_and_stretch() {
        let src = numbered(4, 4);
        let mut dst = Image::new(8, 8).unwrap();
        // 2x2 region stretched over a 4x4 square
        dst.drawq_region(
            &src,
            Rect::new(1, 1, 2, 2),
            Point::new(0, 0),
            Point::new(4, 0),
            Point::new(4, 4),
            Point::new(0, 4),
            Rgba::WHITE,
        );
        assert_eq!(dst.pixel(0, 0), src.pixel(1, 1));
        assert_eq!(dst.pixel(3, 3), src.pixel(2, 2));
        assert_eq!(dst.pixel(4, 4), Rgba::TRANSPARENT);
    }

    #[test]
    fn test_degenerate_quad_draws_nothing() {
        let src = numbered(2, 2);
        let mut dst = Image::new(8, 8).unwrap();
        let p = Point::new(3, 3);
        dst.drawq(&src, p, p, p, p, Rgba::WHITE);
        dst.drawq(&src, Point::new(0, 0), Point::new(6, 6), Point::new(6, 6), Point::new(0, 0), Rgba::WHITE);
        assert!(dst.pixels().iter().all(|&px| px == Rgba::TRANSPARENT));
    }
}
