//! Whole-buffer transforms: region copy, flips and quarter turns.
//!
//! These operate on raw pixels. Clip rectangle and blend mode are ignored,
//! and a transform that changes dimensions resets the clip rectangle.
//!
//! ```rust
//! use blit_core::{Rect, Rgba};
//! use blit_ops::Image;
//!
//! let mut img = Image::new(3, 2)?;
//! img.set_pixel(0, 0, Rgba::WHITE);
//! img.rotate_clockwise()?;
//! assert_eq!(img.dimensions(), (2, 3));
//! assert_eq!(img.pixel(1, 0), Rgba::WHITE);
//!
//! let part = img.copy_rect(Rect::new(1, -4, 10, 5))?;
//! assert_eq!(part.dimensions(), (1, 1));
//! # Ok::<(), blit_core::Error>(())
//! ```

use blit_core::{Error, Rect, Result, Rgba};
use tracing::debug;

use crate::image::{alloc_pixels, Image};

impl Image {
    /// Resolves `rect` against the image bounds.
    fn copy_region(&self, rect: Rect) -> Result<Rect> {
        rect.intersect(&self.bbox())
            .ok_or_else(|| Error::invalid_region(rect, self.width(), self.height()))
    }

    fn region_pixels(&self, region: Rect) -> Result<Vec<Rgba>> {
        let mut out = alloc_pixels(region.area() as usize, Rgba::TRANSPARENT)?;
        let w = region.width as usize;
        for (row, y) in out.chunks_exact_mut(w).zip(region.y..region.bottom()) {
            row.copy_from_slice(self.row(y, region.x, region.right()));
        }
        Ok(out)
    }

    /// Copies `rect ∩ bbox` into a new image.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidRegion`] when `rect` does not overlap the image.
    pub fn copy_rect(&self, rect: Rect) -> Result<Image> {
        let region = self.copy_region(rect)?;
        let pixels = self.region_pixels(region)?;
        let mut out = self.clone_state(region.width, region.height, pixels);
        out.set_blend_mode(self.blend_mode());
        Ok(out)
    }

    /// Copies `rect ∩ bbox` into `dest`, resizing it to the region.
    ///
    /// `dest` keeps its blend mode and dispatcher; its clip rectangle is
    /// reset. On error `dest` is left untouched.
    pub fn copy_rect_into(&self, rect: Rect, dest: &mut Image) -> Result<()> {
        let region = self.copy_region(rect)?;
        let pixels = self.region_pixels(region)?;
        dest.reset(region.width, region.height, pixels);
        Ok(())
    }

    fn clone_state(&self, width: i32, height: i32, pixels: Vec<Rgba>) -> Image {
        let mut out = Image::from_parts(width, height, pixels);
        out.set_dispatch(self.dispatch());
        out
    }

    /// Mirrors the image left to right.
    pub fn flip_horizontal(&mut self) {
        let w = self.width() as usize;
        for row in self.pixels_mut().chunks_exact_mut(w) {
            row.reverse();
        }
    }

    /// Mirrors the image top to bottom.
    pub fn flip_vertical(&mut self) {
        let w = self.width() as usize;
        let h = self.height() as usize;
        let pixels = self.pixels_mut();
        for y in 0..h / 2 {
            let (top, bottom) = pixels.split_at_mut((h - 1 - y) * w);
            top[y * w..(y + 1) * w].swap_with_slice(&mut bottom[..w]);
        }
    }

    /// Rotates a quarter turn clockwise: pixel `(x, y)` moves to
    /// `(height - 1 - y, x)`, and width and height swap.
    ///
    /// # Errors
    ///
    /// [`Error::AllocationFailed`] if the rotated buffer cannot be reserved;
    /// the image is unchanged in that case.
    pub fn rotate_clockwise(&mut self) -> Result<()> {
        let (w, h) = (self.width() as usize, self.height() as usize);
        let mut out = alloc_pixels(w * h, Rgba::TRANSPARENT)?;
        for (y, row) in self.pixels().chunks_exact(w).enumerate() {
            for (x, &px) in row.iter().enumerate() {
                // new width is h
                out[x * h + (h - 1 - y)] = px;
            }
        }
        debug!(width = h, height = w, "rotate clockwise");
        self.reset(h as i32, w as i32, out);
        Ok(())
    }

    /// Rotates a quarter turn counter-clockwise: pixel `(x, y)` moves to
    /// `(y, width - 1 - x)`.
    pub fn rotate_counter_clockwise(&mut self) -> Result<()> {
        let (w, h) = (self.width() as usize, self.height() as usize);
        let mut out = alloc_pixels(w * h, Rgba::TRANSPARENT)?;
        for (y, row) in self.pixels().chunks_exact(w).enumerate() {
            for (x, &px) in row.iter().enumerate() {
                out[(w - 1 - x) * h + y] = px;
            }
        }
        debug!(width = h, height = w, "rotate counter-clockwise");
        self.reset(h as i32, w as i32, out);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn numbered(w: i32, h: i32) -> Image {
        let px: Vec<Rgba> = (0..w * h).map(|i| Rgba::new(i as u8, (i >> 8) as u8, 7, 255)).collect();
        Image::from_pixels(w, h, &px).unwrap()
    }

    #[test]
    fn test_copy_rect_clips_to_bbox() {
        let img = numbered(5, 4);
        let part = img.copy_rect(Rect::new(3, 2, 10, 10)).unwrap();
        assert_eq!(part.dimensions(), (2, 2));
        assert_eq!(part.pixel(0, 0), img.pixel(3, 2));
        assert_eq!(part.pixel(1, 1), img.pixel(4, 3));
    }

    #[test]
    fn test_copy_rect_outside_is_error() {
        let img = numbered(5, 4);
        let err = img.copy_rect(Rect::new(5, 0, 2, 2)).unwrap_err();
        assert!(matches!(err, Error::InvalidRegion { image_width: 5, .. }));
        assert!(img.copy_rect(Rect::new(1, 1, 0, 3)).is_err());
    }

    #[test]
    fn test_copy_rect_into_resizes_dest() {
        let img = numbered(6, 6);
        let mut dest = Image::new(1, 1).unwrap();
        img.copy_rect_into(Rect::new(1, 2, 3, 2), &mut dest).unwrap();
        assert_eq!(dest.dimensions(), (3, 2));
        assert_eq!(dest.clip_rect(), Rect::new(0, 0, 3, 2));
        assert_eq!(dest.pixel(2, 1), img.pixel(3, 3));

        assert!(img.copy_rect_into(Rect::new(-9, -9, 2, 2), &mut dest).is_err());
        assert_eq!(dest.dimensions(), (3, 2));
    }

    #[test]
    fn test_flips() {
        let img = numbered(3, 3);
        let mut h = img.clone();
        h.flip_horizontal();
        assert_eq!(h.pixel(0, 1), img.pixel(2, 1));
        assert_eq!(h.pixel(1, 1), img.pixel(1, 1));

        let mut v = img.clone();
        v.flip_vertical();
        assert_eq!(v.pixel(2, 0), img.pixel(2, 2));
        assert_eq!(v.pixel(0, 1), img.pixel(0, 1));
    }

    #[test]
    fn test_flip_even_height() {
        let img = numbered(2, 4);
        let mut v = img.clone();
        v.flip_vertical();
        for y in 0..4 {
            for x in 0..2 {
                assert_eq!(v.pixel(x, y), img.pixel(x, 3 - y));
            }
        }
    }

    #[test]
    fn test_rotate_mapping() {
        let img = numbered(4, 3);
        let mut cw = img.clone();
        cw.rotate_clockwise().unwrap();
        assert_eq!(cw.dimensions(), (3, 4));
        for y in 0..3 {
            for x in 0..4 {
                assert_eq!(cw.pixel(3 - 1 - y, x), img.pixel(x, y));
            }
        }

        let mut ccw = img.clone();
        ccw.rotate_counter_clockwise().unwrap();
        for y in 0..3 {
            for x in 0..4 {
                assert_eq!(ccw.pixel(y, 4 - 1 - x), img.pixel(x, y));
            }
        }
    }

    #[test]
    fn test_rotate_resets_clip() {
        let mut img = numbered(4, 2);
        img.set_clip_rect(Rect::new(0, 0, 4, 1));
        img.rotate_clockwise().unwrap();
        assert_eq!(img.clip_rect(), Rect::new(0, 0, 2, 4));
    }
}
