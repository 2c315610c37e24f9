//! Vectorized blend engine.
//!
//! Uses the `wide` crate for portable SIMD on stable Rust. Two pixels are
//! widened into one `i32x8` (eight channel lanes), blended with the same
//! integer formulas as [`crate::blend`], and narrowed back. Odd tails fall
//! through to the scalar code, so results are byte-identical to
//! [`ScalarKernel`](crate::ScalarKernel) for every input.
//!
//! ```rust
//! use blit_core::{BlendMode, Rgba};
//! use blit_math::{BlendKernel, ScalarKernel, SimdKernel};
//!
//! let src: Vec<Rgba> = (0..33).map(|i| Rgba::new(i * 7, 255 - i, i, i * 3)).collect();
//! let mut a = vec![Rgba::rgb(90, 160, 30); 33];
//! let mut b = a.clone();
//! SimdKernel.blend_span(&mut a, &src, BlendMode::Multiply);
//! ScalarKernel.blend_span(&mut b, &src, BlendMode::Multiply);
//! assert_eq!(a, b);
//! ```

use crate::blend::{alpha_lane_source, blend_pixel};
use crate::dispatch::BlendKernel;
use blit_core::{BlendMode, Rgba};
use wide::i32x8;

/// Vector kernel: two pixels per `i32x8`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SimdKernel;

/// Lane-wise [`div255`](crate::div255).
#[inline(always)]
fn div255_x8(x: i32x8) -> i32x8 {
    let t = x + i32x8::splat(128);
    (t + (t >> 8)) >> 8
}

/// Widens two pixels into eight lanes.
#[inline(always)]
fn load2(p: &[Rgba]) -> i32x8 {
    let (a, b) = (p[0], p[1]);
    i32x8::from([
        a.r as i32, a.g as i32, a.b as i32, a.a as i32,
        b.r as i32, b.g as i32, b.b as i32, b.a as i32,
    ])
}

/// Widens two source pixels with the alpha lanes substituted for `mode`.
#[inline(always)]
fn load2_source(p: &[Rgba], mode: BlendMode) -> i32x8 {
    let (a, b) = (p[0], p[1]);
    i32x8::from([
        a.r as i32, a.g as i32, a.b as i32, alpha_lane_source(mode, a.a) as i32,
        b.r as i32, b.g as i32, b.b as i32, alpha_lane_source(mode, b.a) as i32,
    ])
}

/// Broadcasts each pixel's alpha across its four lanes.
#[inline(always)]
fn alpha2(p: &[Rgba]) -> i32x8 {
    let (a, b) = (p[0].a as i32, p[1].a as i32);
    i32x8::from([a, a, a, a, b, b, b, b])
}

/// Narrows eight lanes (already in `0..=255`) back to two pixels.
#[inline(always)]
fn store2(v: i32x8, out: &mut [Rgba]) {
    let l = v.to_array();
    out[0] = Rgba::new(l[0] as u8, l[1] as u8, l[2] as u8, l[3] as u8);
    out[1] = Rgba::new(l[4] as u8, l[5] as u8, l[6] as u8, l[7] as u8);
}

/// All bits set in the two alpha lanes.
const ALPHA_LANES: i32x8 = i32x8::new([0, 0, 0, -1, 0, 0, 0, -1]);

/// Blends eight lanes: `d` destination, `s` substituted source, `a` alpha.
#[inline(always)]
fn blend_x8(d: i32x8, s: i32x8, a: i32x8, mode: BlendMode) -> i32x8 {
    let max = i32x8::splat(255);
    let ia = max - a;
    match mode {
        BlendMode::Set => s,
        BlendMode::Mix => div255_x8(s * a + d * ia),
        BlendMode::Add => {
            // colour lanes add, alpha lanes composite like Mix
            let add = (d + div255_x8(s * a)).min(max);
            let mix = div255_x8(s * a + d * ia);
            ALPHA_LANES.blend(mix, add)
        }
        BlendMode::Subtract => (d - div255_x8(s * a)).max(i32x8::splat(0)),
        BlendMode::Multiply => div255_x8(div255_x8(d * s) * a + d * ia),
    }
}

impl BlendKernel for SimdKernel {
    fn name(&self) -> &'static str {
        "simd"
    }

    fn blend_solid(&self, dst: &mut [Rgba], color: Rgba, mode: BlendMode) {
        if mode == BlendMode::Set {
            dst.fill(color);
            return;
        }
        let pair = [color, color];
        let s = load2_source(&pair, mode);
        let a = alpha2(&pair);

        let mut chunks = dst.chunks_exact_mut(2);
        for chunk in &mut chunks {
            let d = load2(chunk);
            store2(blend_x8(d, s, a, mode), chunk);
        }
        for px in chunks.into_remainder() {
            *px = blend_pixel(*px, color, mode);
        }
    }

    fn blend_span(&self, dst: &mut [Rgba], src: &[Rgba], mode: BlendMode) {
        debug_assert_eq!(dst.len(), src.len());
        if mode == BlendMode::Set {
            dst.copy_from_slice(src);
            return;
        }
        let mut dst_chunks = dst.chunks_exact_mut(2);
        let mut src_chunks = src.chunks_exact(2);
        for (dc, sc) in (&mut dst_chunks).zip(&mut src_chunks) {
            let d = load2(dc);
            let s = load2_source(sc, mode);
            let a = alpha2(sc);
            store2(blend_x8(d, s, a, mode), dc);
        }
        for (d, s) in dst_chunks.into_remainder().iter_mut().zip(src_chunks.remainder()) {
            *d = blend_pixel(*d, *s, mode);
        }
    }
}
