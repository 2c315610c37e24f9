//! Bitmap text.
//!
//! Glyphs are rasterized elsewhere: a [`Font`] hands out ready-made
//! glyph images and [`Image::draw_text`] only places and tints them.
//! [`BitmapFont`] is a simple in-memory implementation, with a helper to
//! build glyphs from 1-bit row masks.
//!
//! ```rust
//! use blit_core::{Point, Rgba};
//! use blit_ops::{BitmapFont, Image};
//!
//! let mut font = BitmapFont::new(3, 2);
//! font.insert_mask('I', 1, &[0b1, 0b1, 0b1])?;
//!
//! let mut img = Image::new(8, 8)?;
//! img.draw_text(&font, Point::new(1, 1), "I?I", None, 1.0, Rgba::WHITE);
//! assert_eq!(img.pixel(1, 2), Rgba::WHITE);
//! assert_eq!(img.pixel(4, 2), Rgba::WHITE); // '?' advanced by 2
//! # Ok::<(), blit_core::Error>(())
//! ```

use std::collections::HashMap;

use blit_core::{Point, Result, Rgba};
use tracing::trace;

use crate::composite::DrawParams;
use crate::image::Image;

/// A source of pre-rendered glyph images.
pub trait Font {
    /// Glyph image for `ch`, if the font has one.
    fn glyph(&self, ch: char) -> Option<&Image>;

    /// Line height in pixels.
    fn height(&self) -> i32;

    /// Horizontal advance for characters without a glyph.
    fn fallback_advance(&self) -> i32;
}

/// A font backed by a map of glyph images.
#[derive(Debug, Clone, Default)]
pub struct BitmapFont {
    glyphs: HashMap<char, Image>,
    height: i32,
    fallback_advance: i32,
}

impl BitmapFont {
    /// Creates an empty font.
    pub fn new(height: i32, fallback_advance: i32) -> Self {
        Self {
            glyphs: HashMap::new(),
            height,
            fallback_advance,
        }
    }

    /// Adds or replaces a glyph.
    pub fn insert(&mut self, ch: char, glyph: Image) {
        self.glyphs.insert(ch, glyph);
    }

    /// Adds a glyph from 1-bit rows.
    ///
    /// Each row is a mask of `width` bits, most significant of those bits
    /// leftmost (`width <= 32`). Set bits become opaque white and clear
    /// bits transparent; the text colour comes from the draw tint.
    pub fn insert_mask(&mut self, ch: char, width: i32, rows: &[u32]) -> Result<()> {
        let mut glyph = Image::new(width, rows.len() as i32)?;
        for (y, &bits) in rows.iter().enumerate() {
            for x in 0..width {
                if (bits >> (width - 1 - x)) & 1 == 1 {
                    glyph.set_pixel(x, y as i32, Rgba::WHITE);
                }
            }
        }
        self.insert(ch, glyph);
        Ok(())
    }

    /// Number of glyphs.
    pub fn len(&self) -> usize {
        self.glyphs.len()
    }

    /// Returns `true` if the font has no glyphs.
    pub fn is_empty(&self) -> bool {
        self.glyphs.is_empty()
    }
}

impl Font for BitmapFont {
    fn glyph(&self, ch: char) -> Option<&Image> {
        self.glyphs.get(&ch)
    }

    fn height(&self) -> i32 {
        self.height
    }

    fn fallback_advance(&self) -> i32 {
        self.fallback_advance
    }
}

impl Image {
    /// Draws `text` with its first glyph's top-left at `pos`.
    ///
    /// `len` limits the number of characters (`None` for all); a `'\0'`
    /// ends the string early and `'\n'` starts a new line. Glyphs are
    /// scaled by `scale` and tinted with `color`; characters without a
    /// glyph advance the cursor by the font's fallback width.
    pub fn draw_text(&mut self, font: &dyn Font, pos: Point, text: &str, len: Option<usize>, scale: f32, color: Rgba) {
        if scale <= 0.0 || !scale.is_finite() {
            return;
        }
        trace!(len = text.len(), scale, "draw text");

        let params = DrawParams {
            scale,
            tint: color,
            ..DrawParams::default()
        };
        let line_height = font.height() as f32 * scale;
        let (mut x, mut y) = (pos.x as f32, pos.y as f32);

        for ch in text.chars().take(len.unwrap_or(usize::MAX)) {
            match ch {
                '\0' => break,
                '\n' => {
                    x = pos.x as f32;
                    y += line_height;
                }
                _ => match font.glyph(ch) {
                    Some(glyph) => {
                        let at = Point::new(x.round() as i32, y.round() as i32);
                        self.draw_with(glyph, None, at, params);
                        x += glyph.width() as f32 * scale;
                    }
                    None => x += font.fallback_advance() as f32 * scale,
                },
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn font() -> BitmapFont {
        let mut f = BitmapFont::new(3, 2);
        f.insert_mask('L', 2, &[0b10, 0b10, 0b11]).unwrap();
        f.insert_mask('o', 2, &[0b00, 0b11, 0b11]).unwrap();
        f
    }

    fn lit(img: &Image) -> usize {
        img.pixels().iter().filter(|p| p.a != 0).count()
    }

    #[test]
    fn test_insert_mask() {
        let f = font();
        assert_eq!(f.len(), 2);
        let l = f.glyph('L').unwrap();
        assert_eq!(l.dimensions(), (2, 3));
        assert_eq!(l.pixel(0, 0), Rgba::WHITE);
        assert_eq!(l.pixel(1, 0), Rgba::TRANSPARENT);
        assert_eq!(l.pixel(1, 2), Rgba::WHITE);
        assert!(f.glyph('x').is_none());
    }

    #[test]
    fn test_advance_and_tint() {
        let mut img = Image::new(10, 4).unwrap();
        let red = Rgba::rgb(255, 0, 0);
        img.draw_text(&font(), Point::new(0, 0), "Lo", None, 1.0, red);
        assert_eq!(img.pixel(0, 0), red);
        assert_eq!(img.pixel(2, 1), red);
        assert_eq!(img.pixel(2, 0), Rgba::TRANSPARENT);
        assert_eq!(lit(&img), 4 + 4);
    }

    #[test]
    fn test_len_nul_and_missing() {
        let f = font();
        let mut a = Image::new(12, 4).unwrap();
        a.draw_text(&f, Point::new(0, 0), "LoL", Some(1), 1.0, Rgba::WHITE);
        assert_eq!(lit(&a), 4);

        let mut b = Image::new(12, 4).unwrap();
        b.draw_text(&f, Point::new(0, 0), "L\0oL", None, 1.0, Rgba::WHITE);
        assert_eq!(lit(&b), 4);

        // '#' has no glyph: the second 'L' starts at 2 + 2
        let mut c = Image::new(12, 4).unwrap();
        c.draw_text(&f, Point::new(0, 0), "L#L", None, 1.0, Rgba::WHITE);
        assert_eq!(c.pixel(4, 0), Rgba::WHITE);
        assert_eq!(c.pixel(2, 0), Rgba::TRANSPARENT);
    }

    #[test]
    fn test_newline_and_scale() {
        let mut img = Image::new(8, 12).unwrap();
        img.draw_text(&font(), Point::new(1, 0), "L\nL", None, 2.0, Rgba::WHITE);
        // second line starts at y = 3 * 2, x back at 1
        assert_eq!(img.pixel(1, 6), Rgba::WHITE);
        assert_eq!(img.pixel(2, 7), Rgba::WHITE);
        assert_eq!(lit(&img), 2 * 4 * 4);

        let mut none = Image::new(8, 8).unwrap();
        none.draw_text(&font(), Point::new(0, 0), "L", None, 0.0, Rgba::WHITE);
        assert_eq!(lit(&none), 0);
    }
}
