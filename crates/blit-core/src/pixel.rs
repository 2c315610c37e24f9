//! The RGBA8888 pixel type.
//!
//! Pixels are straight (non-premultiplied) alpha, four `u8` channels in
//! memory order `R G B A`. A row of pixels is therefore `width * 4` bytes
//! with no padding:
//!
//! ```text
//! Memory: [R G B A R G B A R G B A ...]  <- Row 0
//!         [R G B A R G B A R G B A ...]  <- Row 1
//! ```
//!
//! `Rgba` is [`bytemuck::Pod`], so pixel slices convert to byte slices
//! without copying:
//!
//! ```
//! use blit_core::Rgba;
//!
//! let px = [Rgba::new(1, 2, 3, 4), Rgba::new(5, 6, 7, 8)];
//! let bytes: &[u8] = bytemuck::cast_slice(&px);
//! assert_eq!(bytes, &[1, 2, 3, 4, 5, 6, 7, 8]);
//! ```

use bytemuck::{Pod, Zeroable};
use std::fmt;

/// Rec.709 luma weights scaled to a sum of 256.
///
/// Used by greyscale conversion: `Y = (54*R + 183*G + 19*B + 128) >> 8`.
pub const LUMA_WEIGHTS: [u32; 3] = [54, 183, 19];

/// A straight-alpha RGBA pixel with 8 bits per channel.
///
/// Equality is exact channel-wise equality.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default, Pod, Zeroable)]
#[repr(C)]
pub struct Rgba {
    /// Red channel
    pub r: u8,
    /// Green channel
    pub g: u8,
    /// Blue channel
    pub b: u8,
    /// Alpha channel (255 = opaque)
    pub a: u8,
}

impl Rgba {
    /// Opaque black.
    pub const BLACK: Rgba = Rgba::new(0, 0, 0, 255);
    /// Opaque white. As a tint this leaves sampled pixels unchanged.
    pub const WHITE: Rgba = Rgba::new(255, 255, 255, 255);
    /// Fully transparent black.
    pub const TRANSPARENT: Rgba = Rgba::new(0, 0, 0, 0);

    /// Creates a pixel from all four channels.
    #[inline]
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Creates an opaque pixel.
    #[inline]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }

    /// Returns the same colour with a different alpha.
    #[inline]
    pub const fn with_alpha(self, a: u8) -> Self {
        Self::new(self.r, self.g, self.b, a)
    }

    /// Returns the channels as `[r, g, b, a]`.
    #[inline]
    pub const fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }

    /// Builds a pixel from `[r, g, b, a]`.
    #[inline]
    pub const fn from_array(arr: [u8; 4]) -> Self {
        Self::new(arr[0], arr[1], arr[2], arr[3])
    }

    /// Returns `true` if alpha is 255.
    #[inline]
    pub const fn is_opaque(self) -> bool {
        self.a == 255
    }

    /// Returns `true` if alpha is 0.
    #[inline]
    pub const fn is_transparent(self) -> bool {
        self.a == 0
    }

    /// Rec.709 luma of the colour channels, rounded.
    #[inline]
    pub fn luma(self) -> u8 {
        let y = LUMA_WEIGHTS[0] * self.r as u32
            + LUMA_WEIGHTS[1] * self.g as u32
            + LUMA_WEIGHTS[2] * self.b as u32;
        ((y + 128) >> 8) as u8
    }
}

impl From<[u8; 4]> for Rgba {
    #[inline]
    fn from(arr: [u8; 4]) -> Self {
        Self::from_array(arr)
    }
}

impl From<Rgba> for [u8; 4] {
    #[inline]
    fn from(px: Rgba) -> Self {
        px.to_array()
    }
}

impl fmt::Debug for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout() {
        assert_eq!(std::mem::size_of::<Rgba>(), 4);
        let px = Rgba::new(10, 20, 30, 40);
        let bytes: &[u8] = bytemuck::bytes_of(&px);
        assert_eq!(bytes, &[10, 20, 30, 40]);
    }

    #[test]
    fn test_luma_extremes() {
        assert_eq!(Rgba::WHITE.luma(), 255);
        assert_eq!(Rgba::BLACK.luma(), 0);
        // Green dominates Rec.709 luma
        assert!(Rgba::rgb(0, 255, 0).luma() > Rgba::rgb(255, 0, 0).luma());
    }

    #[test]
    fn test_array_conversion() {
        let px: Rgba = [1, 2, 3, 4].into();
        let arr: [u8; 4] = px.into();
        assert_eq!(arr, [1, 2, 3, 4]);
        assert_eq!(px.with_alpha(9).a, 9);
    }
}
