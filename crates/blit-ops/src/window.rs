//! Nine-slice window frames.
//!
//! A [`WindowSkin`] is an image plus a [`SkinLayout`] naming nine source
//! rectangles: four corners, four edges and a background. Drawing a window
//! keeps the corners at their native size, stretches the edges along their
//! long axis and the background in both.

use blit_core::{Rect, Rgba};
use tracing::trace;

use crate::image::Image;

/// Source rectangles of the nine skin parts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SkinLayout {
    /// Top-left corner
    pub upper_left: Rect,
    /// Top edge
    pub top: Rect,
    /// Top-right corner
    pub upper_right: Rect,
    /// Left edge
    pub left: Rect,
    /// Centre fill
    pub background: Rect,
    /// Right edge
    pub right: Rect,
    /// Bottom-left corner
    pub lower_left: Rect,
    /// Bottom edge
    pub bottom: Rect,
    /// Bottom-right corner
    pub lower_right: Rect,
}

impl SkinLayout {
    /// Regular grid layout for an image of `width x height` with a uniform
    /// `border`. The border is limited to half the smaller dimension.
    pub fn with_border(width: i32, height: i32, border: i32) -> Self {
        let b = border.clamp(0, width.min(height) / 2);
        let (iw, ih) = (width - 2 * b, height - 2 * b);
        let (rx, by) = (width - b, height - b);
        Self {
            upper_left: Rect::new(0, 0, b, b),
            top: Rect::new(b, 0, iw, b),
            upper_right: Rect::new(rx, 0, b, b),
            left: Rect::new(0, b, b, ih),
            background: Rect::new(b, b, iw, ih),
            right: Rect::new(rx, b, b, ih),
            lower_left: Rect::new(0, by, b, b),
            bottom: Rect::new(b, by, iw, b),
            lower_right: Rect::new(rx, by, b, b),
        }
    }
}

/// A window skin: one image and the layout of its parts.
pub trait WindowSkin {
    /// The skin image.
    fn image(&self) -> &Image;

    /// The nine part rectangles inside [`image`](Self::image).
    fn layout(&self) -> SkinLayout;
}

/// An owned skin image with an explicit layout.
#[derive(Debug, Clone)]
pub struct NineSlice {
    image: Image,
    layout: SkinLayout,
}

impl NineSlice {
    /// Pairs an image with a layout.
    pub fn new(image: Image, layout: SkinLayout) -> Self {
        Self { image, layout }
    }

    /// Slices `image` into a regular grid with a uniform border.
    ///
    /// ```rust
    /// use blit_core::{Rect, Rgba};
    /// use blit_ops::{Image, NineSlice, WindowSkin};
    ///
    /// let skin = NineSlice::with_border(Image::filled(12, 12, Rgba::WHITE)?, 4);
    /// assert_eq!(skin.layout().background, Rect::new(4, 4, 4, 4));
    /// # Ok::<(), blit_core::Error>(())
    /// ```
    pub fn with_border(image: Image, border: i32) -> Self {
        let layout = SkinLayout::with_border(image.width(), image.height(), border);
        Self { image, layout }
    }
}

impl WindowSkin for NineSlice {
    fn image(&self) -> &Image {
        &self.image
    }

    fn layout(&self) -> SkinLayout {
        self.layout
    }
}

/// Splits `avail` between two corner sizes, proportionally when they
/// don't fit.
fn share(avail: i32, first: i32, second: i32) -> (i32, i32) {
    let total = first + second;
    if total <= avail || total <= 0 {
        return (first, second);
    }
    let a = (avail as i64 * first as i64 / total as i64) as i32;
    (a, avail - a)
}

impl Image {
    /// Draws a window frame filling `rect`.
    ///
    /// `opacity` (clamped to 0..=255) becomes the alpha of the white tint
    /// applied to every part. When `rect` is smaller than the corners, the
    /// corners share the available space in proportion to their sizes and
    /// are cropped to it.
    pub fn draw_window(&mut self, skin: &dyn WindowSkin, rect: Rect, opacity: i32) {
        if rect.is_empty() {
            return;
        }
        trace!(?rect, opacity, "draw window");
        let tint = Rgba::WHITE.with_alpha(opacity.clamp(0, 255) as u8);
        let image = skin.image();
        let l = skin.layout();

        let (lw, rw) = share(rect.width, l.upper_left.width, l.upper_right.width);
        let (th, bh) = share(rect.height, l.upper_left.height, l.lower_left.height);
        let (cw, ch) = (rect.width - lw - rw, rect.height - th - bh);
        let (cx, cy) = (rect.x.saturating_add(lw), rect.y.saturating_add(th));
        let (rx, by) = (rect.right() - rw, rect.bottom() - bh);

        // background and edges
        self.draw_stretched(image, l.background, Rect::new(cx, cy, cw, ch), tint);
        self.draw_stretched(image, l.top, Rect::new(cx, rect.y, cw, th), tint);
        self.draw_stretched(image, l.bottom, Rect::new(cx, by, cw, bh), tint);
        self.draw_stretched(image, l.left, Rect::new(rect.x, cy, lw, ch), tint);
        self.draw_stretched(image, l.right, Rect::new(rx, cy, rw, ch), tint);

        // corners, cropped towards the window's outer edges
        let corner = |src: Rect, w: i32, h: i32, from_right: bool, from_bottom: bool| {
            let (w, h) = (w.min(src.width), h.min(src.height));
            let x = if from_right { src.right() - w } else { src.x };
            let y = if from_bottom { src.bottom() - h } else { src.y };
            Rect::new(x, y, w, h)
        };
        let parts = [
            (corner(l.upper_left, lw, th, false, false), rect.x, rect.y),
            (corner(l.upper_right, rw, th, true, false), rx, rect.y),
            (corner(l.lower_left, lw, bh, false, true), rect.x, by),
            (corner(l.lower_right, rw, bh, true, true), rx, by),
        ];
        for (src, x, y) in parts {
            self.draw_stretched(image, src, Rect::new(x, y, src.width, src.height), tint);
        }
    }
}
