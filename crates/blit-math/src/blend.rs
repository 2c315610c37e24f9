//! Scalar blend engine.
//!
//! This is the reference implementation of every [`BlendMode`]. The vector
//! kernel in [`crate::simd`] evaluates the same formulas lane for lane.
//!
//! # Arithmetic
//!
//! All channel math is integer. Products of two 8-bit values are brought
//! back to 8 bits with [`div255`], which rounds to nearest; sums saturate.
//! With `a` the source alpha and `ia = 255 - a`:
//!
//! | Mode     | colour channel                         | alpha                 |
//! |----------|----------------------------------------|-----------------------|
//! | Set      | `s`                                    | `sA`                  |
//! | Mix      | `div255(s*a + d*ia)`                   | `a + div255(dA*ia)`   |
//! | Add      | `min(255, d + div255(s*a))`            | `a + div255(dA*ia)`   |
//! | Subtract | `max(0, d - div255(s*a))`              | `dA`                  |
//! | Multiply | `div255(div255(d*s)*a + d*ia)`         | `dA`                  |
//!
//! Every alpha rule is a colour formula evaluated with the source alpha
//! lane replaced by [`alpha_lane_source`]. Add composites alpha with the
//! Mix formula ([`alpha_lane_mode`]); every other mode uses one formula for
//! all four lanes.
//!
//! ```rust
//! use blit_core::{BlendMode, Rgba};
//! use blit_math::blend_pixel;
//!
//! let dst = Rgba::rgb(100, 100, 100);
//! let src = Rgba::new(200, 0, 50, 255);
//! assert_eq!(blend_pixel(dst, src, BlendMode::Add), Rgba::new(255, 100, 150, 255));
//! ```

use crate::dispatch::BlendKernel;
use blit_core::{BlendMode, Rgba};

/// Divides by 255 with round-to-nearest.
///
/// Exact for every `x` in `0..=255 * 255`; the vector kernel uses the same
/// shift sequence.
#[inline(always)]
pub const fn div255(x: i32) -> i32 {
    let t = x + 128;
    (t + (t >> 8)) >> 8
}

/// Value substituted for the source alpha *lane* when blending the
/// destination alpha channel.
#[inline(always)]
pub const fn alpha_lane_source(mode: BlendMode, src_alpha: u8) -> u8 {
    match mode {
        BlendMode::Set => src_alpha,
        BlendMode::Mix | BlendMode::Add | BlendMode::Multiply => 255,
        BlendMode::Subtract => 0,
    }
}

/// Mode whose formula blends the destination alpha channel.
#[inline(always)]
pub const fn alpha_lane_mode(mode: BlendMode) -> BlendMode {
    match mode {
        BlendMode::Add => BlendMode::Mix,
        other => other,
    }
}

/// Blends one channel.
///
/// `d` and `s` are the destination and (already substituted) source lane,
/// `a` is the source pixel's alpha.
#[inline(always)]
pub const fn blend_channel(d: i32, s: i32, a: i32, mode: BlendMode) -> i32 {
    let ia = 255 - a;
    match mode {
        BlendMode::Set => s,
        BlendMode::Mix => div255(s * a + d * ia),
        BlendMode::Add => {
            let v = d + div255(s * a);
            if v > 255 { 255 } else { v }
        }
        BlendMode::Subtract => {
            let v = d - div255(s * a);
            if v < 0 { 0 } else { v }
        }
        BlendMode::Multiply => div255(div255(d * s) * a + d * ia),
    }
}

/// Blends `src` onto `dst` with the given mode.
#[inline]
pub fn blend_pixel(dst: Rgba, src: Rgba, mode: BlendMode) -> Rgba {
    if mode == BlendMode::Set {
        return src;
    }
    let a = src.a as i32;
    let sa = alpha_lane_source(mode, src.a) as i32;
    Rgba::new(
        blend_channel(dst.r as i32, src.r as i32, a, mode) as u8,
        blend_channel(dst.g as i32, src.g as i32, a, mode) as u8,
        blend_channel(dst.b as i32, src.b as i32, a, mode) as u8,
        blend_channel(dst.a as i32, sa, a, alpha_lane_mode(mode)) as u8,
    )
}

/// Multiplies a pixel channel-wise by a tint colour.
///
/// A tint of [`Rgba::WHITE`] is the identity.
#[inline]
pub fn tint(px: Rgba, t: Rgba) -> Rgba {
    Rgba::new(
        div255(px.r as i32 * t.r as i32) as u8,
        div255(px.g as i32 * t.g as i32) as u8,
        div255(px.b as i32 * t.b as i32) as u8,
        div255(px.a as i32 * t.a as i32) as u8,
    )
}

/// Portable kernel: one pixel at a time.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScalarKernel;

impl BlendKernel for ScalarKernel {
    fn name(&self) -> &'static str {
        "scalar"
    }

    fn blend_solid(&self, dst: &mut [Rgba], color: Rgba, mode: BlendMode) {
        if mode == BlendMode::Set {
            dst.fill(color);
            return;
        }
        for d in dst.iter_mut() {
            *d = blend_pixel(*d, color, mode);
        }
    }

    fn blend_span(&self, dst: &mut [Rgba], src: &[Rgba], mode: BlendMode) {
        debug_assert_eq!(dst.len(), src.len());
        if mode == BlendMode::Set {
            dst.copy_from_slice(src);
            return;
        }
        for (d, s) in dst.iter_mut().zip(src) {
            *d = blend_pixel(*d, *s, mode);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_div255_exact_rounding() {
        for x in 0..=255 * 255 {
            let expected = (x as f64 / 255.0).round() as i32;
            assert_eq!(div255(x), expected, "x = {x}");
        }
    }

    #[test]
    fn test_set_copies_alpha() {
        let src = Rgba::new(1, 2, 3, 4);
        assert_eq!(blend_pixel(Rgba::WHITE, src, BlendMode::Set), src);
    }

    #[test]
    fn test_mix_extremes() {
        let dst = Rgba::rgb(10, 20, 30);
        let opaque = Rgba::rgb(200, 100, 0);
        assert_eq!(blend_pixel(dst, opaque, BlendMode::Mix), opaque);
        assert_eq!(blend_pixel(dst, opaque.with_alpha(0), BlendMode::Mix), dst);
    }

    #[test]
    fn test_mix_alpha_over() {
        // Half-transparent over fully transparent
        let out = blend_pixel(Rgba::TRANSPARENT, Rgba::new(255, 255, 255, 128), BlendMode::Mix);
        assert_eq!(out.a, 128);
        // dA = 128, a = 128 -> 128 + round(128 * 127 / 255) = 128 + 64
        let out = blend_pixel(Rgba::new(0, 0, 0, 128), Rgba::new(0, 0, 0, 128), BlendMode::Mix);
        assert_eq!(out.a, 192);
    }

    #[test]
    fn test_add_saturates() {
        let out = blend_pixel(Rgba::new(250, 10, 0, 200), Rgba::new(10, 10, 255, 100), BlendMode::Add);
        // 10 * 100 / 255 = 3.92 -> 4; alpha 100 + round(200 * 155 / 255) = 222
        assert_eq!(out, Rgba::new(254, 14, 100, 222));
    }

    #[test]
    fn test_add_alpha_composites_like_mix() {
        let dst = Rgba::new(0, 0, 0, 200);
        let src = Rgba::new(0, 0, 0, 100);
        assert_eq!(blend_pixel(dst, src, BlendMode::Add).a, 222);
        assert_eq!(blend_pixel(dst, src, BlendMode::Add).a, blend_pixel(dst, src, BlendMode::Mix).a);

        // transparent source keeps the destination alpha, opaque source wins
        assert_eq!(blend_pixel(dst, src.with_alpha(0), BlendMode::Add).a, 200);
        assert_eq!(blend_pixel(dst, src.with_alpha(255), BlendMode::Add).a, 255);
        assert_eq!(blend_pixel(Rgba::TRANSPARENT, src, BlendMode::Add).a, 100);
    }

    #[test]
    fn test_subtract_saturates_and_keeps_alpha() {
        let out = blend_pixel(Rgba::new(5, 100, 255, 77), Rgba::rgb(10, 50, 0), BlendMode::Subtract);
        assert_eq!(out, Rgba::new(0, 50, 255, 77));
    }

    #[test]
    fn test_multiply() {
        let out = blend_pixel(Rgba::new(255, 128, 0, 90), Rgba::rgb(128, 128, 255), BlendMode::Multiply);
        // 255*128/255 = 128, 128*128/255 = 64.25 -> 64, 0
        assert_eq!(out, Rgba::new(128, 64, 0, 90));

        // Zero source alpha leaves the destination untouched
        let dst = Rgba::new(12, 34, 56, 78);
        assert_eq!(blend_pixel(dst, Rgba::new(0, 0, 0, 0), BlendMode::Multiply), dst);
    }

    #[test]
    fn test_tint() {
        let px = Rgba::new(200, 100, 50, 255);
        assert_eq!(tint(px, Rgba::WHITE), px);
        assert_eq!(tint(px, Rgba::new(255, 255, 255, 0)).a, 0);
        assert_eq!(tint(px, Rgba::new(128, 255, 255, 255)).r, 100);
    }

    #[test]
    fn test_scalar_kernel_span() {
        let mut dst = vec![Rgba::rgb(0, 0, 0); 3];
        let src = vec![Rgba::rgb(255, 0, 0), Rgba::new(0, 255, 0, 0), Rgba::new(0, 0, 255, 255)];
        ScalarKernel.blend_span(&mut dst, &src, BlendMode::Mix);
        assert_eq!(dst, vec![Rgba::rgb(255, 0, 0), Rgba::rgb(0, 0, 0), Rgba::rgb(0, 0, 255)]);
    }
}
