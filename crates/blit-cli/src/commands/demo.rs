//! Demo command: renders a scene touching every primitive

use crate::DemoArgs;
use anyhow::{Context, Result};
use blit_core::{BlendMode, Point, Rect, Rgba};
use blit_math::Dispatch;
use blit_ops::{BitmapFont, DrawParams, Image, NineSlice};
use std::time::Instant;
use tracing::info;

/// 3x5 glyphs padded to 4 columns, enough for the caption.
const GLYPHS: &[(char, [u32; 5])] = &[
    ('B', [0b1110, 0b1010, 0b1100, 0b1010, 0b1110]),
    ('D', [0b1100, 0b1010, 0b1010, 0b1010, 0b1100]),
    ('E', [0b1110, 0b1000, 0b1100, 0b1000, 0b1110]),
    ('I', [0b1110, 0b0100, 0b0100, 0b0100, 0b1110]),
    ('L', [0b1000, 0b1000, 0b1000, 0b1000, 0b1110]),
    ('M', [0b1010, 0b1110, 0b1110, 0b1010, 0b1010]),
    ('O', [0b0100, 0b1010, 0b1010, 0b1010, 0b0100]),
    ('T', [0b1110, 0b0100, 0b0100, 0b0100, 0b0100]),
];

fn caption_font() -> Result<BitmapFont> {
    let mut font = BitmapFont::new(6, 4);
    for &(ch, rows) in GLYPHS {
        font.insert_mask(ch, 4, &rows)?;
    }
    Ok(font)
}

/// Checkerboard sprite with an outline.
fn sprite(size: i32) -> Result<Image> {
    let mut img = Image::new(size, size)?;
    let cell = (size / 4).max(1);
    for y in 0..size {
        for x in 0..size {
            let on = ((x / cell) + (y / cell)) % 2 == 0;
            let c = if on { Rgba::rgb(250, 200, 40) } else { Rgba::new(40, 120, 220, 200) };
            img.set_pixel(x, y, c);
        }
    }
    img.draw_rectangle(false, img.bbox(), Rgba::WHITE);
    Ok(img)
}

/// Window skin with a light frame and a translucent centre.
fn skin() -> Result<NineSlice> {
    let mut img = Image::filled(12, 12, Rgba::new(30, 30, 60, 160))?;
    img.set_blend_mode(BlendMode::Set);
    img.draw_rectangle(false, Rect::new(0, 0, 12, 12), Rgba::rgb(220, 220, 240));
    img.draw_rectangle(false, Rect::new(1, 1, 10, 10), Rgba::rgb(120, 120, 160));
    Ok(NineSlice::with_border(img, 4))
}

fn render(width: i32, height: i32, dispatch: Dispatch) -> Result<Image> {
    let mut canvas = Image::new(width, height)?.with_dispatch(dispatch);
    let (w, h) = (width, height);

    canvas.draw_rectangle_gradient(
        true,
        canvas.bbox(),
        Rgba::rgb(20, 20, 40),
        Rgba::rgb(40, 20, 60),
        Rgba::rgb(10, 40, 50),
        Rgba::rgb(0, 0, 0),
    );

    let r = (w.min(h) / 6).max(1);
    canvas.draw_circle_gradient(true, Point::new(w / 4, h / 3), r, Rgba::WHITE, Rgba::new(255, 80, 0, 0));
    canvas.draw_circle(false, Point::new(w / 4, h / 3), r + 3, Rgba::rgb(255, 160, 0));

    canvas.set_blend_mode(BlendMode::Add);
    canvas.draw_triangle_gradient(
        true,
        Point::new(w / 2, h / 8),
        Point::new(w - w / 8, h / 2),
        Point::new(w / 2, h / 2),
        Rgba::new(255, 0, 0, 200),
        Rgba::new(0, 255, 0, 200),
        Rgba::new(0, 0, 255, 200),
    );
    canvas.set_blend_mode(BlendMode::Mix);
    canvas.draw_triangle(false, Point::new(w / 2, h / 8), Point::new(w - w / 8, h / 2), Point::new(w / 2, h / 2), Rgba::WHITE);

    for i in 0..8 {
        let y = h / 2 + i * 3;
        canvas.draw_line_gradient(Point::new(4, y), Point::new(w / 2 - 4, y + 12), Rgba::rgb(255, 0, 128), Rgba::rgb(0, 255, 200));
    }
    canvas.draw_line(Point::new(0, h - 1), Point::new(w - 1, 0), Rgba::new(255, 255, 255, 64));

    let window = Rect::new(w / 2 + 4, h / 2 + 4, w / 2 - 8, h / 2 - 8);
    canvas.draw_window(&skin()?, window, 220);

    let sprite = sprite(16)?;
    let params = DrawParams { angle: 0.6, scale: 1.5, tint: Rgba::WHITE.with_alpha(230) };
    canvas.draw_with(&sprite, None, Point::new(window.x + 8, window.y + 8), params);
    canvas.drawq(
        &sprite,
        Point::new(w / 2 + 8, h - 24),
        Point::new(w - 12, h - 40),
        Point::new(w - 8, h - 8),
        Point::new(w / 2 + 16, h - 12),
        Rgba::WHITE,
    );

    canvas.set_clip_rect(Rect::new(0, 0, w, h / 2));
    canvas.draw_text(&caption_font()?, Point::new(6, 6), "BLIT DEMO", None, 2.0, Rgba::rgb(255, 255, 255));

    Ok(canvas)
}

pub fn run(args: DemoArgs, verbose: bool) -> Result<()> {
    let dispatch = if args.scalar { Dispatch::scalar() } else { Dispatch::detected() };

    let start = Instant::now();
    let canvas = render(args.width, args.height, dispatch)
        .with_context(|| format!("Failed to render {}x{} scene", args.width, args.height))?;
    info!(elapsed = ?start.elapsed(), vector = dispatch.vector_enabled(), "scene rendered");

    super::save_image(&args.output, &canvas)?;

    if verbose {
        println!("Wrote {} ({}x{})", args.output.display(), args.width, args.height);
    }

    Ok(())
}
