//! Colour interpolation.
//!
//! Pure, stateless helpers used by the gradient variants of the
//! rasterizer. Interpolation runs in `f32` per channel and rounds to the
//! nearest integer (halves round up), then clamps to `0..=255`.

use blit_core::Rgba;

#[inline(always)]
fn to_channel(v: f32) -> u8 {
    (v + 0.5).floor().clamp(0.0, 255.0) as u8
}

/// Linear interpolation from `a` (at `t = 0`) to `b` (at `t = 1`).
///
/// `t` is clamped to `[0, 1]`.
///
/// ```rust
/// use blit_core::Rgba;
/// use blit_math::lerp_rgba;
///
/// let mid = lerp_rgba(Rgba::BLACK, Rgba::WHITE, 0.5);
/// assert_eq!(mid, Rgba::rgb(128, 128, 128));
/// ```
#[inline]
pub fn lerp_rgba(a: Rgba, b: Rgba, t: f32) -> Rgba {
    let t = t.clamp(0.0, 1.0);
    let ch = |x: u8, y: u8| to_channel(x as f32 + (y as f32 - x as f32) * t);
    Rgba::new(ch(a.r, b.r), ch(a.g, b.g), ch(a.b, b.b), ch(a.a, b.a))
}

/// Bilinear interpolation of four corner colours.
///
/// The top edge runs `ul -> ur`, the bottom edge `ll -> lr`; `ty` blends
/// between the two edges.
#[inline]
pub fn bilinear_rgba(ul: Rgba, ur: Rgba, lr: Rgba, ll: Rgba, tx: f32, ty: f32) -> Rgba {
    let tx = tx.clamp(0.0, 1.0);
    let ty = ty.clamp(0.0, 1.0);
    let ch = |a: u8, b: u8, c: u8, d: u8| {
        let top = a as f32 + (b as f32 - a as f32) * tx;
        let bottom = d as f32 + (c as f32 - d as f32) * tx;
        to_channel(top + (bottom - top) * ty)
    };
    Rgba::new(
        ch(ul.r, ur.r, lr.r, ll.r),
        ch(ul.g, ur.g, lr.g, ll.g),
        ch(ul.b, ur.b, lr.b, ll.b),
        ch(ul.a, ur.a, lr.a, ll.a),
    )
}

/// Barycentric blend of three vertex colours.
///
/// `w` are the vertex weights; they are expected to sum to 1.
#[inline]
pub fn barycentric_rgba(c: [Rgba; 3], w: [f32; 3]) -> Rgba {
    let ch = |x: u8, y: u8, z: u8| to_channel(x as f32 * w[0] + y as f32 * w[1] + z as f32 * w[2]);
    Rgba::new(
        ch(c[0].r, c[1].r, c[2].r),
        ch(c[0].g, c[1].g, c[2].g),
        ch(c[0].b, c[1].b, c[2].b),
        ch(c[0].a, c[1].a, c[2].a),
    )
}
