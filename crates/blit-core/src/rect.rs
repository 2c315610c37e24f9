//! Integer geometry for placement and clipping.
//!
//! All coordinates use the standard image convention:
//! - Origin (0, 0) is at the **top-left** corner
//! - X increases to the right
//! - Y increases downward
//!
//! Coordinates are signed: shapes and blits may start left of or above
//! the image and are clipped on the way in.
//!
//! ```rust
//! use blit_core::{Point, Rect};
//!
//! let rect = Rect::new(-5, 10, 20, 4);
//! assert_eq!(rect.right(), 15);
//! assert!(rect.contains(Point::new(-5, 13)));
//!
//! let clip = Rect::new(0, 0, 8, 8);
//! assert!(rect.intersect(&clip).is_none());
//! ```

use std::ops::{Add, Sub};

/// A point on the integer pixel grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Point {
    /// X coordinate
    pub x: i32,
    /// Y coordinate
    pub y: i32,
}

impl Point {
    /// Creates a new point.
    #[inline]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl Add for Point {
    type Output = Point;

    #[inline]
    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Point;

    #[inline]
    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl From<(i32, i32)> for Point {
    #[inline]
    fn from((x, y): (i32, i32)) -> Self {
        Self::new(x, y)
    }
}

/// A rectangle defined by origin (x, y) and dimensions (width, height).
///
/// The rectangle covers columns `x..x + width` and rows `y..y + height`.
/// A rectangle with non-positive width or height is empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rect {
    /// X coordinate of the left edge (inclusive)
    pub x: i32,
    /// Y coordinate of the top edge (inclusive)
    pub y: i32,
    /// Width in pixels
    pub width: i32,
    /// Height in pixels
    pub height: i32,
}

impl Rect {
    /// Creates a new rectangle with the given origin and dimensions.
    #[inline]
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Creates a rectangle from origin (0, 0) with given dimensions.
    #[inline]
    pub const fn from_size(width: i32, height: i32) -> Self {
        Self::new(0, 0, width, height)
    }

    /// Creates a rectangle spanning two inclusive corner points.
    ///
    /// Swapped coordinates are normalized.
    ///
    /// ```rust
    /// use blit_core::{Point, Rect};
    ///
    /// let r = Rect::from_corners(Point::new(4, 4), Point::new(1, 2));
    /// assert_eq!(r, Rect::new(1, 2, 4, 3));
    /// ```
    #[inline]
    pub fn from_corners(a: Point, b: Point) -> Self {
        let (x0, x1) = if a.x <= b.x { (a.x, b.x) } else { (b.x, a.x) };
        let (y0, y1) = if a.y <= b.y { (a.y, b.y) } else { (b.y, a.y) };
        Self::new(
            x0,
            y0,
            x1.saturating_sub(x0).saturating_add(1),
            y1.saturating_sub(y0).saturating_add(1),
        )
    }

    /// Returns the X coordinate of the right edge (exclusive).
    ///
    /// Saturates at `i32::MAX`; column `i32::MAX` itself is never covered.
    #[inline]
    pub const fn right(&self) -> i32 {
        self.x.saturating_add(self.width)
    }

    /// Returns the Y coordinate of the bottom edge (exclusive).
    ///
    /// Saturates at `i32::MAX`.
    #[inline]
    pub const fn bottom(&self) -> i32 {
        self.y.saturating_add(self.height)
    }

    /// Returns the top-left corner.
    #[inline]
    pub const fn origin(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// Returns the area of the rectangle in pixels (0 when empty).
    #[inline]
    pub const fn area(&self) -> u64 {
        if self.is_empty() {
            0
        } else {
            self.width as u64 * self.height as u64
        }
    }

    /// Returns `true` if the rectangle covers no pixels.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.width <= 0 || self.height <= 0
    }

    /// Returns `true` if the point lies inside this rectangle.
    ///
    /// Inclusive on the left/top edges and exclusive on the right/bottom edges.
    #[inline]
    pub const fn contains(&self, p: Point) -> bool {
        p.x >= self.x && p.x < self.right() && p.y >= self.y && p.y < self.bottom()
    }

    /// Returns `true` if this rectangle fully contains another.
    #[inline]
    pub const fn contains_rect(&self, other: &Rect) -> bool {
        other.x >= self.x
            && other.y >= self.y
            && other.right() <= self.right()
            && other.bottom() <= self.bottom()
    }

    /// Returns the intersection of this rectangle with another.
    ///
    /// Returns `None` if the rectangles don't overlap.
    #[inline]
    pub fn intersect(&self, other: &Rect) -> Option<Rect> {
        let x = self.x.max(other.x);
        let y = self.y.max(other.y);
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());

        if right > x && bottom > y {
            Some(Rect::new(x, y, right - x, bottom - y))
        } else {
            None
        }
    }

    /// Clamps this rectangle to lie within `bounds`.
    ///
    /// Unlike [`intersect`](Self::intersect) this always returns a rectangle;
    /// a non-overlapping input collapses to an empty rectangle at the nearest
    /// edge of `bounds`.
    pub fn clamp_to(&self, bounds: &Rect) -> Rect {
        let x0 = self.x.clamp(bounds.x, bounds.right());
        let y0 = self.y.clamp(bounds.y, bounds.bottom());
        let x1 = self.right().clamp(x0, bounds.right());
        let y1 = self.bottom().clamp(y0, bounds.bottom());
        Rect::new(x0, y0, x1 - x0, y1 - y0)
    }

    /// Returns this rectangle moved by `offset`.
    #[inline]
    pub fn translate(&self, offset: Point) -> Rect {
        Rect::new(
            self.x.saturating_add(offset.x),
            self.y.saturating_add(offset.y),
            self.width,
            self.height,
        )
    }
}
