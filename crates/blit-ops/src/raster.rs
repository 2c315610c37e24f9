//! Primitive rasterizer: points, lines, rectangles, circles, triangles.
//!
//! Every primitive writes through the image's blend mode and is restricted
//! to the clip rectangle. Degenerate input (empty rectangles, non-positive
//! radii, zero-area triangles) draws nothing or falls back to the outline;
//! nothing here returns an error.
//!
//! Outlines never plot the same pixel twice, so translucent colours blend
//! evenly at corners and vertices.
//!
//! # Example
//!
//! ```rust
//! use blit_core::{Point, Rect, Rgba};
//! use blit_ops::Image;
//!
//! let mut img = Image::filled(32, 32, Rgba::BLACK)?;
//! img.draw_line(Point::new(0, 0), Point::new(31, 31), Rgba::WHITE);
//! img.draw_rectangle(true, Rect::new(4, 4, 8, 8), Rgba::rgb(255, 0, 0));
//! img.draw_circle(false, Point::new(20, 10), 6, Rgba::rgb(0, 255, 0));
//! img.draw_triangle(true, Point::new(2, 30), Point::new(12, 20), Point::new(22, 30), Rgba::WHITE);
//! assert_eq!(img.pixel(5, 5), Rgba::rgb(255, 0, 0));
//! # Ok::<(), blit_core::Error>(())
//! ```

use blit_core::{Point, Rect, Rgba};
use blit_math::{barycentric_rgba, bilinear_rgba, lerp_rgba};

use crate::image::Image;

/// First `i` in `0..=n` where the monotone `pred` turns true, `n + 1` if
/// it never does.
fn first_true(n: i64, pred: impl Fn(i64) -> bool) -> i64 {
    let (mut lo, mut hi) = (0, n + 1);
    while lo < hi {
        let mid = lo + (hi - lo) / 2;
        if pred(mid) {
            hi = mid;
        } else {
            lo = mid + 1;
        }
    }
    lo
}

/// Steps `i` in `0..=n` for which the monotone coordinate `at(i)` lies in
/// `lo..hi`. `dir` is the sign of the coordinate's change per step.
fn steps_within(n: i64, dir: i64, lo: i64, hi: i64, at: impl Fn(i64) -> i64) -> (i64, i64) {
    match dir.signum() {
        0 if (lo..hi).contains(&at(0)) => (0, n + 1),
        0 => (0, 0),
        1 => (first_true(n, |i| at(i) >= lo), first_true(n, |i| at(i) >= hi)),
        _ => (first_true(n, |i| at(i) < hi), first_true(n, |i| at(i) < lo)),
    }
}

/// Walks the Bresenham line from `p0` to `p1`, calling `plot` for every
/// pixel inside `clip`.
///
/// Step `i` along the major axis plots the pixel nearest the ideal line,
/// ties rounded away from `p0`. The visible steps are found by bisection,
/// so the walk costs the clipped length rather than the full one.
/// `skip_first` / `skip_last` drop the endpoints, so connected edges can
/// share a vertex without plotting it twice.
fn bresenham(p0: Point, p1: Point, clip: Rect, skip_first: bool, skip_last: bool, mut plot: impl FnMut(i32, i32)) {
    if clip.is_empty() {
        return;
    }
    let (x0, y0) = (p0.x as i64, p0.y as i64);
    let (dx, dy) = (p1.x as i64 - x0, p1.y as i64 - y0);
    let x_major = dx.abs() >= dy.abs();
    let (n, m) = if x_major { (dx.abs(), dy.abs()) } else { (dy.abs(), dx.abs()) };

    let minor = |i: i64| -> i64 {
        if n == 0 {
            0
        } else {
            ((2 * i as i128 * m as i128 + n as i128) / (2 * n as i128)) as i64
        }
    };
    let at = |i: i64| -> (i64, i64) {
        if x_major {
            (x0 + dx.signum() * i, y0 + dy.signum() * minor(i))
        } else {
            (x0 + dx.signum() * minor(i), y0 + dy.signum() * i)
        }
    };

    let (cx0, cx1) = (clip.x as i64, clip.right() as i64);
    let (cy0, cy1) = (clip.y as i64, clip.bottom() as i64);
    let (xs, xe) = steps_within(n, dx, cx0, cx1, |i| at(i).0);
    let (ys, ye) = steps_within(n, dy, cy0, cy1, |i| at(i).1);

    for i in xs.max(ys)..xe.min(ye) {
        if (i == 0 && skip_first) || (i == n && skip_last) {
            continue;
        }
        let (x, y) = at(i);
        plot(x as i32, y as i32);
    }
}

/// Column of the first-octant circle point in row `y`: `sqrt(r² - y²)`
/// rounded to nearest.
fn octant_x(radius: i64, y: i64) -> i64 {
    let rem = (radius * radius - y * y) as u64;
    let x = rem.isqrt();
    // (x + 1/2)² < rem, compared in integers; equality cannot occur
    if ((2 * x + 1) as u128).pow(2) < 4 * rem as u128 {
        (x + 1) as i64
    } else {
        x as i64
    }
}

/// Last row of the first octant: the largest `y` with `octant_x(y) >= y`.
fn octant_end(radius: i64) -> i64 {
    first_true(radius, |y| octant_x(radius, y) < y) - 1
}

/// The eight symmetric images of first-octant offset `(x, y)`.
#[inline]
fn octant_images(x: i64, y: i64) -> [(i64, i64); 8] {
    [
        (x, y),
        (y, x),
        (-y, x),
        (-x, y),
        (-x, -y),
        (-y, -x),
        (y, -x),
        (x, -y),
    ]
}

/// Walks a circle outline, calling `visit(dx, dy)` once per pixel whose
/// position `center + (dx, dy)` lies inside `clip`.
///
/// The outline is the first octant `(octant_x(y), y)` for `0..=octant_end`
/// and its seven mirror images. Each image only walks the octant rows that
/// can land inside `clip`.
fn circle_outline(center: Point, radius: i32, clip: Rect, mut visit: impl FnMut(i64, i64)) {
    let (cx, cy, r) = (center.x as i64, center.y as i64, radius as i64);
    let (cx0, cx1) = (clip.x as i64, clip.right() as i64);
    let (cy0, cy1) = (clip.y as i64, clip.bottom() as i64);
    let end = octant_end(r);

    for k in 0..8 {
        // image k puts the octant row `y` on this axis, with this sign
        let (on_x, sign) = match k {
            0 | 3 => (false, 1),
            4 | 7 => (false, -1),
            1 | 6 => (true, 1),
            _ => (true, -1),
        };
        let (c, lo, hi) = if on_x { (cx, cx0, cx1) } else { (cy, cy0, cy1) };
        // rows y with c + sign * y in lo..hi
        let (y0, y1) = if sign > 0 { (lo - c, hi - 1 - c) } else { (c - hi + 1, c - lo) };
        for y in y0.max(0)..=y1.min(end) {
            let images = octant_images(octant_x(r, y), y);
            let p = images[k];
            if images[..k].contains(&p) {
                continue;
            }
            let (x, y) = (cx + p.0, cy + p.1);
            if (cx0..cx1).contains(&x) && (cy0..cy1).contains(&y) {
                visit(p.0, p.1);
            }
        }
    }
}

/// Half width of the filled circle in row offset `t` (`0..=radius`): the
/// outermost outline pixel of that row.
fn circle_half_width(radius: i64, end: i64, t: i64) -> i64 {
    if t <= end {
        octant_x(radius, t)
    } else {
        // the mirrored octant: largest y whose octant column reaches row t
        first_true(end, |y| octant_x(radius, y) < t) - 1
    }
}

/// Signed doubled area of `(a, b, p)`; positive when `p` is left of `a -> b`
/// in image coordinates.
#[inline]
fn edge(a: Point, b: Point, p: Point) -> i128 {
    let (ax, ay) = (a.x as i128, a.y as i128);
    (b.x as i128 - ax) * (p.y as i128 - ay) - (b.y as i128 - ay) * (p.x as i128 - ax)
}

/// Parameter along `0..len` for index `i`, 0 for single-pixel extents.
#[inline]
fn unit(i: i32, len: i32) -> f32 {
    if len > 1 { i as f32 / (len - 1) as f32 } else { 0.0 }
}

impl Image {
    /// Blends one pixel.
    pub fn draw_point(&mut self, pos: Point, color: Rgba) {
        self.plot(pos.x, pos.y, color);
    }

    /// Draws a one-pixel line including both endpoints.
    pub fn draw_line(&mut self, p0: Point, p1: Point, color: Rgba) {
        if p0.y == p1.y {
            self.fill_span(p0.y, p0.x.min(p1.x), p0.x.max(p1.x).saturating_add(1), color);
            return;
        }
        let clip = self.clip_rect();
        bresenham(p0, p1, clip, false, false, |x, y| self.plot(x, y, color));
    }

    /// Draws a line whose colour runs from `c0` at `p0` to `c1` at `p1`.
    ///
    /// The colour parameter of a pixel is its Euclidean distance from `p0`
    /// over the segment length.
    pub fn draw_line_gradient(&mut self, p0: Point, p1: Point, c0: Rgba, c1: Rgba) {
        self.gradient_line(p0, p1, c0, c1, false, false);
    }

    fn gradient_line(&mut self, p0: Point, p1: Point, c0: Rgba, c1: Rgba, skip_first: bool, skip_last: bool) {
        let dist = |x: i32, y: i32| (x as f64 - p0.x as f64).hypot(y as f64 - p0.y as f64);
        let len = dist(p1.x, p1.y);
        let clip = self.clip_rect();
        bresenham(p0, p1, clip, skip_first, skip_last, |x, y| {
            let t = if len > 0.0 { (dist(x, y) / len) as f32 } else { 0.0 };
            self.plot(x, y, lerp_rgba(c0, c1, t));
        });
    }

    /// Draws a rectangle outline or fill.
    pub fn draw_rectangle(&mut self, fill: bool, rect: Rect, color: Rgba) {
        if rect.is_empty() {
            return;
        }
        if fill {
            let Some(area) = rect.intersect(&self.clip_rect()) else {
                return;
            };
            for y in area.y..area.bottom() {
                self.fill_span(y, area.x, area.right(), color);
            }
            return;
        }
        let (x1, y1) = (rect.right() - 1, rect.bottom() - 1);
        self.draw_line(Point::new(rect.x, rect.y), Point::new(x1, rect.y), color);
        if rect.height > 1 {
            self.draw_line(Point::new(rect.x, y1), Point::new(x1, y1), color);
        }
        if rect.height > 2 {
            let (top, bottom) = (rect.y.saturating_add(1), y1 - 1);
            let clip = self.clip_rect();
            bresenham(Point::new(rect.x, top), Point::new(rect.x, bottom), clip, false, false, |x, y| {
                self.plot(x, y, color)
            });
            if rect.width > 1 {
                bresenham(Point::new(x1, top), Point::new(x1, bottom), clip, false, false, |x, y| {
                    self.plot(x, y, color)
                });
            }
        }
    }

    /// Draws a rectangle with bilinear corner colours.
    ///
    /// The top edge runs `ul -> ur`, the bottom edge `ll -> lr`. Colours are
    /// computed over the unclipped rectangle, so clipping never shifts the
    /// gradient.
    pub fn draw_rectangle_gradient(&mut self, fill: bool, rect: Rect, ul: Rgba, ur: Rgba, lr: Rgba, ll: Rgba) {
        if rect.is_empty() {
            return;
        }
        let color_at = |x: i32, y: i32| {
            bilinear_rgba(ul, ur, lr, ll, unit(x - rect.x, rect.width), unit(y - rect.y, rect.height))
        };
        let clip = self.clip_rect();

        if fill {
            let Some(area) = rect.intersect(&clip) else {
                return;
            };
            let mut row = Vec::with_capacity(area.width as usize);
            for y in area.y..area.bottom() {
                row.clear();
                row.extend((area.x..area.right()).map(|x| color_at(x, y)));
                self.blend_row(area.x, y, &row, false);
            }
            return;
        }

        // only the visible stretch of each edge is walked
        let (x1, y1) = (rect.right() - 1, rect.bottom() - 1);
        for x in rect.x.max(clip.x)..=x1.min(clip.right() - 1) {
            self.plot(x, rect.y, color_at(x, rect.y));
            if rect.height > 1 {
                self.plot(x, y1, color_at(x, y1));
            }
        }
        for y in rect.y.saturating_add(1).max(clip.y)..y1.min(clip.bottom()) {
            self.plot(rect.x, y, color_at(rect.x, y));
            if rect.width > 1 {
                self.plot(x1, y, color_at(x1, y));
            }
        }
    }

    /// Draws a circle outline or fill. `radius <= 0` draws nothing.
    pub fn draw_circle(&mut self, fill: bool, center: Point, radius: i32, color: Rgba) {
        if radius <= 0 {
            return;
        }
        if fill {
            self.circle_rows(center, radius, |img, y, x0, x1, _| img.fill_span(y, x0, x1, color));
            return;
        }
        let clip = self.clip_rect();
        let (cx, cy) = (center.x as i64, center.y as i64);
        circle_outline(center, radius, clip, |dx, dy| {
            self.plot((cx + dx) as i32, (cy + dy) as i32, color);
        });
    }

    /// Draws a circle whose colour runs from `inner` at the centre to
    /// `outer` at `radius`.
    pub fn draw_circle_gradient(&mut self, fill: bool, center: Point, radius: i32, inner: Rgba, outer: Rgba) {
        if radius <= 0 {
            return;
        }
        let r = radius as f64;
        let color_at = |dx: i64, dy: i64| lerp_rgba(inner, outer, ((dx as f64).hypot(dy as f64) / r) as f32);

        if fill {
            let mut row = Vec::new();
            self.circle_rows(center, radius, |img, y, x0, x1, dy| {
                row.clear();
                row.extend((x0..x1).map(|x| color_at(x as i64 - center.x as i64, dy)));
                img.blend_row(x0, y, &row, false);
            });
            return;
        }
        let clip = self.clip_rect();
        let (cx, cy) = (center.x as i64, center.y as i64);
        circle_outline(center, radius, clip, |dx, dy| {
            self.plot((cx + dx) as i32, (cy + dy) as i32, color_at(dx, dy));
        });
    }

    /// Visits the clipped rows of a filled circle as `(y, x0, x1, dy)`,
    /// `x0..x1` already inside the clip rectangle.
    fn circle_rows(&mut self, center: Point, radius: i32, mut emit: impl FnMut(&mut Image, i32, i32, i32, i64)) {
        let clip = self.clip_rect();
        let (cx, cy, r) = (center.x as i64, center.y as i64, radius as i64);
        let end = octant_end(r);
        let top = (cy - r).max(clip.y as i64);
        let bottom = (cy + r).min(clip.bottom() as i64 - 1);
        for y in top..=bottom {
            let dy = y - cy;
            let half = circle_half_width(r, end, dy.abs());
            let x0 = (cx - half).max(clip.x as i64);
            let x1 = (cx + half + 1).min(clip.right() as i64);
            if x0 < x1 {
                emit(self, y as i32, x0 as i32, x1 as i32, dy);
            }
        }
    }

    /// Draws a triangle outline or fill.
    ///
    /// A zero-area triangle fills nothing; its outline still draws.
    pub fn draw_triangle(&mut self, fill: bool, p1: Point, p2: Point, p3: Point, color: Rgba) {
        if !fill {
            let clip = self.clip_rect();
            bresenham(p1, p2, clip, false, false, |x, y| self.plot(x, y, color));
            bresenham(p2, p3, clip, true, false, |x, y| self.plot(x, y, color));
            bresenham(p3, p1, clip, true, true, |x, y| self.plot(x, y, color));
            return;
        }
        self.fill_triangle([p1, p2, p3], |_, _| color, |img, y, x0, x1, _| img.fill_span(y, x0, x1, color));
    }

    /// Draws a triangle with per-vertex colours blended barycentrically.
    pub fn draw_triangle_gradient(&mut self, fill: bool, p1: Point, p2: Point, p3: Point, c1: Rgba, c2: Rgba, c3: Rgba) {
        if !fill {
            self.gradient_line(p1, p2, c1, c2, false, false);
            self.gradient_line(p2, p3, c2, c3, true, false);
            self.gradient_line(p3, p1, c3, c1, true, true);
            return;
        }
        let colors = [c1, c2, c3];
        self.fill_triangle(
            [p1, p2, p3],
            |w, area| {
                let a = area as f64;
                barycentric_rgba(colors, w.map(|v| (v as f64 / a) as f32))
            },
            |img, y, x0, _, row| img.blend_row(x0, y, row, false),
        );
    }

    /// Scanline fill over the clipped bounding box.
    ///
    /// `shade` maps the vertex weights (edge functions, summing to the
    /// doubled area) to a colour; `emit` receives each inside run together
    /// with its shaded pixels.
    fn fill_triangle(
        &mut self,
        p: [Point; 3],
        shade: impl Fn([i128; 3], i128) -> Rgba,
        mut emit: impl FnMut(&mut Image, i32, i32, i32, &[Rgba]),
    ) {
        let mut p = p;
        let mut order = [0usize, 1, 2];
        let mut area = edge(p[0], p[1], p[2]);
        if area == 0 {
            return;
        }
        if area < 0 {
            p.swap(1, 2);
            order.swap(1, 2);
            area = -area;
        }

        let clip = self.clip_rect();
        let x0 = p.iter().map(|q| q.x).min().unwrap_or(0).max(clip.x);
        let x1 = p.iter().map(|q| q.x).max().unwrap_or(0).min(clip.right() - 1);
        let y0 = p.iter().map(|q| q.y).min().unwrap_or(0).max(clip.y);
        let y1 = p.iter().map(|q| q.y).max().unwrap_or(0).min(clip.bottom() - 1);
        if clip.is_empty() || x0 > x1 || y0 > y1 {
            return;
        }
        // both corners lie inside the clip, so the size cannot overflow
        let area_rect = Rect::new(x0, y0, x1 - x0 + 1, y1 - y0 + 1);

        let mut row = Vec::with_capacity(area_rect.width as usize);
        for y in area_rect.y..area_rect.bottom() {
            row.clear();
            let mut start = None;
            for x in area_rect.x..area_rect.right() {
                let q = Point::new(x, y);
                let w = [edge(p[1], p[2], q), edge(p[2], p[0], q), edge(p[0], p[1], q)];
                if w.iter().all(|&v| v >= 0) {
                    start.get_or_insert(x);
                    // weights back in caller vertex order
                    let mut ordered = [0i128; 3];
                    for (slot, &v) in order.iter().zip(&w) {
                        ordered[*slot] = v;
                    }
                    row.push(shade(ordered, area));
                } else if start.is_some() {
                    break;
                }
            }
            if let Some(x0) = start {
                emit(self, y, x0, x0 + row.len() as i32, &row);
            }
        }
    }
}
