//! Golden hash tests for dispatch parity.
//!
//! A fixed scene touching every primitive is rendered once per dispatcher
//! and reduced to a SHA-256 digest of its RGBA bytes. Every dispatcher,
//! and every trip through the PNG codec, must produce the same digest as
//! the scalar reference.
//!
//! A second scene uses integer-only primitives (no interpolated colours,
//! no rotation), so its digest is platform independent and is checked
//! against a recorded value.
//!
//! ```bash
//! BLIT_SIMD=off cargo test --package blit-tests golden
//! ```

use blit_core::{BlendMode, Point, Rect, Rgba};
use blit_math::{CpuFeatures, Dispatch};
use blit_ops::{BitmapFont, DrawParams, Image, NineSlice};
use sha2::{Digest, Sha256};
use std::io::Cursor;

const WIDTH: i32 = 96;
const HEIGHT: i32 = 64;

/// Recorded digest of [`render_integer`].
const INTEGER_SCENE_SHA256: &str = "7ea920389e97aa6124e73b3a0cd5379e811a976946660ab9915d8e3ef7532972";

// ---------------------------------------------------------------------------
// Scene
// ---------------------------------------------------------------------------

fn sprite() -> Image {
    let px: Vec<Rgba> = (0..64)
        .map(|i| Rgba::new((i * 4) as u8, 255 - (i * 3) as u8, (i * 11) as u8, 96 + (i * 2) as u8))
        .collect();
    Image::from_pixels(8, 8, &px).unwrap()
}

fn font() -> BitmapFont {
    let mut font = BitmapFont::new(6, 3);
    font.insert_mask('X', 5, &[0b10001, 0b01010, 0b00100, 0b01010, 0b10001]).unwrap();
    font.insert_mask('O', 5, &[0b01110, 0b10001, 0b10001, 0b10001, 0b01110]).unwrap();
    font
}

fn render(dispatch: Dispatch) -> Image {
    let mut img = Image::new(WIDTH, HEIGHT).unwrap().with_dispatch(dispatch);
    let sprite = sprite();
    let skin = NineSlice::with_border(sprite.clone(), 3);

    img.draw_rectangle_gradient(
        true,
        img.bbox(),
        Rgba::rgb(10, 20, 30),
        Rgba::rgb(200, 40, 40),
        Rgba::rgb(40, 200, 90),
        Rgba::rgb(0, 0, 0),
    );

    for (i, mode) in BlendMode::ALL.into_iter().enumerate() {
        let x = i as i32 * 18;
        img.set_blend_mode(mode);
        img.draw_rectangle(true, Rect::new(x + 1, 2, 16, 14), Rgba::new(90, 180, 250, 150));
        img.draw(&sprite, Point::new(x + 4, 4), 0.0, 1.0, Rgba::WHITE);
        img.draw(&sprite, Point::new(x + 6, 8), 0.0, 1.0, Rgba::new(255, 128, 64, 200));
        img.draw_line(Point::new(x, 18), Point::new(x + 17, 18), Rgba::new(255, 255, 0, 120));
    }

    img.set_blend_mode(BlendMode::Mix);
    img.set_clip_rect(Rect::new(2, 20, WIDTH - 4, HEIGHT - 22));
    img.draw_circle_gradient(true, Point::new(16, 40), 12, Rgba::WHITE, Rgba::new(0, 0, 255, 40));
    img.draw_circle(false, Point::new(16, 40), 14, Rgba::rgb(255, 0, 255));
    img.draw_triangle_gradient(
        true,
        Point::new(34, 24),
        Point::new(60, 30),
        Point::new(40, 60),
        Rgba::new(255, 0, 0, 220),
        Rgba::new(0, 255, 0, 160),
        Rgba::new(0, 0, 255, 255),
    );
    img.draw_line_gradient(Point::new(0, 63), Point::new(95, 21), Rgba::rgb(0, 255, 255), Rgba::rgb(255, 0, 0));
    let params = DrawParams { angle: 0.8, scale: 1.7, tint: Rgba::WHITE.with_alpha(200) };
    img.draw_with(&sprite, None, Point::new(62, 26), params);
    img.drawq(&sprite, Point::new(70, 44), Point::new(92, 40), Point::new(94, 62), Point::new(66, 60), Rgba::WHITE);
    img.draw_window(&skin, Rect::new(4, 52, 28, 10), 180);
    img.draw_text(&font(), Point::new(40, 50), "XOX\nOXO", None, 1.0, Rgba::rgb(255, 255, 255));
    img
}

/// Fills, outlines, lines, circles, triangles, a clipped 1:1 tinted blit and
/// two buffer transforms, all in exact integer arithmetic.
fn render_integer(dispatch: Dispatch) -> Image {
    let mut img = Image::filled(24, 16, Rgba::rgb(16, 32, 48)).unwrap().with_dispatch(dispatch);

    for (i, mode) in BlendMode::ALL.into_iter().enumerate() {
        let (x, k) = (i as i32 * 5, i as u8);
        img.set_blend_mode(mode);
        img.draw_rectangle(true, Rect::new(x, 1, 5, 6), Rgba::new(200, 40 + 40 * k, 90, 160));
        img.draw_rectangle(false, Rect::new(x, 0, 5, 8), Rgba::new(30 * k, 250, 120, 100 + 30 * k));
        img.draw_line(Point::new(x, 15), Point::new(x + 4, 9), Rgba::new(255, 128, 30 * k, 200));
    }

    img.set_blend_mode(BlendMode::Mix);
    img.draw_circle(false, Point::new(12, 9), 6, Rgba::new(255, 255, 0, 180));
    img.set_blend_mode(BlendMode::Add);
    img.draw_circle(true, Point::new(5, 11), 3, Rgba::new(40, 80, 160, 128));
    img.set_blend_mode(BlendMode::Mix);
    img.draw_triangle(true, Point::new(14, 15), Point::new(23, 8), Point::new(22, 15), Rgba::new(0, 200, 100, 140));
    img.draw_triangle(false, Point::new(1, 2), Point::new(20, 4), Point::new(9, 13), Rgba::new(250, 0, 250, 90));

    img.set_clip_rect(Rect::new(2, 2, 20, 12));
    img.draw(&sprite(), Point::new(16, 1), 0.0, 1.0, Rgba::new(255, 200, 100, 220));
    img.draw_line(Point::new(-10, -4), Point::new(40, 20), Rgba::WHITE.with_alpha(77));

    img.flip_horizontal();
    img.rotate_clockwise().unwrap();
    img
}

// ---------------------------------------------------------------------------
// Hash utilities
// ---------------------------------------------------------------------------

/// SHA-256 of the dimensions followed by the RGBA bytes.
fn compute_hash(image: &Image) -> String {
    let mut hasher = Sha256::new();
    hasher.update(image.width().to_le_bytes());
    hasher.update(image.height().to_le_bytes());
    hasher.update(image.as_bytes());
    format!("{:x}", hasher.finalize())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[test]
fn golden_render_is_deterministic() {
    let a = compute_hash(&render(Dispatch::scalar()));
    let b = compute_hash(&render(Dispatch::scalar()));
    assert_eq!(a, b);
    assert_eq!(a.len(), 64);
}

#[test]
fn golden_integer_scene_matches_recorded() {
    let image = render_integer(Dispatch::scalar());
    assert_eq!(image.dimensions(), (16, 24));
    assert_eq!(compute_hash(&image), INTEGER_SCENE_SHA256);

    let forced = Dispatch::new(CpuFeatures { sse2: true, ..CpuFeatures::NONE }, 2);
    assert_eq!(compute_hash(&render_integer(forced)), INTEGER_SCENE_SHA256);
}

#[test]
fn golden_vector_matches_scalar() {
    let reference = compute_hash(&render(Dispatch::scalar()));

    for min_run in [2, 8, 64] {
        let forced = Dispatch::new(CpuFeatures { sse2: true, ..CpuFeatures::NONE }, min_run);
        assert_eq!(compute_hash(&render(forced)), reference, "min_run {min_run}");
    }
    assert_eq!(compute_hash(&render(Dispatch::detected())), reference, "detected");
}

#[test]
fn golden_survives_png_roundtrip() {
    let image = render(Dispatch::detected());
    let mut bytes = Vec::new();
    blit_io::write_to(&mut bytes, &image).unwrap();
    let loaded = blit_io::read_from(Cursor::new(bytes)).unwrap();
    assert_eq!(compute_hash(&loaded), compute_hash(&image));
}

#[test]
fn golden_differs_per_blend_mode() {
    let base = render(Dispatch::scalar());
    let mut alt = base.clone();
    alt.set_clip_rect(alt.bbox());
    alt.set_blend_mode(BlendMode::Subtract);
    alt.draw_rectangle(true, Rect::new(0, 0, 8, 8), Rgba::new(40, 40, 40, 255));
    assert_ne!(compute_hash(&alt), compute_hash(&base));
}
