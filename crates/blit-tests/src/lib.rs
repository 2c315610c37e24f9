//! Integration tests for blit-rs crates.
//!
//! End-to-end checks of the drawing properties that span more than one
//! crate: kernel identity across dispatch choices, clipping, buffer
//! transforms and PNG round trips.

#[cfg(test)]
mod golden;

#[cfg(test)]
mod tests {
    use blit_core::{BlendMode, Point, Rect, Rgba};
    use blit_math::{BlendKernel, CpuFeatures, Dispatch, ScalarKernel, SimdKernel};
    use blit_ops::{BitmapFont, Image, NineSlice};
    use std::collections::HashSet;
    use tempfile::tempdir;

    /// Every pixel distinct enough to catch misplaced copies.
    fn pattern(w: i32, h: i32) -> Image {
        let px: Vec<Rgba> = (0..w * h)
            .map(|i| Rgba::new((i * 7) as u8, (i * 13) as u8, (i / 3) as u8, 200 + (i % 56) as u8))
            .collect();
        Image::from_pixels(w, h, &px).unwrap()
    }

    fn lit(img: &Image) -> HashSet<(i32, i32)> {
        let mut out = HashSet::new();
        for y in 0..img.height() {
            for x in 0..img.width() {
                if img.pixel(x, y).a != 0 {
                    out.insert((x, y));
                }
            }
        }
        out
    }

    /// Forces the vector kernel onto every eligible run, whatever the host.
    fn vector_dispatch() -> Dispatch {
        Dispatch::new(CpuFeatures { sse2: true, ..CpuFeatures::NONE }, 2)
    }

    // ------------------------------------------------------------------
    // Kernel identity
    // ------------------------------------------------------------------

    #[test]
    fn test_span_kernels_identical_full_range() {
        // dst channel i, src channel j for every (i, j) pair; alpha sweeps too
        let mut dst = Vec::with_capacity(256 * 256);
        let mut src = Vec::with_capacity(256 * 256);
        for i in 0..=255u8 {
            for j in 0..=255u8 {
                dst.push(Rgba::new(i, j, i ^ j, j));
                src.push(Rgba::new(j, i, 255 - i, i));
            }
        }

        for mode in BlendMode::ALL {
            let mut a = dst.clone();
            let mut b = dst.clone();
            ScalarKernel.blend_span(&mut a, &src, mode);
            SimdKernel.blend_span(&mut b, &src, mode);
            assert_eq!(a, b, "blend_span {mode}");
        }
    }

    #[test]
    fn test_solid_kernels_identical_full_range() {
        let dst: Vec<Rgba> = (0..=255u8).map(|v| Rgba::new(v, 255 - v, v / 2, v)).collect();
        for mode in BlendMode::ALL {
            for alpha in [0u8, 1, 127, 128, 254, 255] {
                for c in [0u8, 1, 128, 255] {
                    let color = Rgba::new(c, 255 - c, c, alpha);
                    let mut a = dst.clone();
                    let mut b = dst.clone();
                    ScalarKernel.blend_solid(&mut a, color, mode);
                    SimdKernel.blend_solid(&mut b, color, mode);
                    assert_eq!(a, b, "blend_solid {mode} {color:?}");
                }
            }
        }
    }

    #[test]
    fn test_drawing_identical_under_both_dispatchers() {
        let sprite = pattern(9, 7);
        for mode in BlendMode::ALL {
            let render = |dispatch: Dispatch| {
                let mut img = Image::filled(48, 40, Rgba::rgb(30, 90, 150)).unwrap().with_dispatch(dispatch);
                img.set_blend_mode(mode);
                img.draw_rectangle(true, Rect::new(2, 3, 40, 20), Rgba::new(250, 10, 60, 140));
                img.draw_line(Point::new(0, 30), Point::new(47, 30), Rgba::new(0, 255, 0, 90));
                img.draw(&sprite, Point::new(5, 8), 0.0, 1.0, Rgba::WHITE);
                img.draw(&sprite, Point::new(20, 14), 0.0, 1.0, Rgba::new(200, 255, 100, 180));
                img.draw(&sprite, Point::new(30, 20), 0.4, 1.3, Rgba::WHITE);
                img
            };
            let scalar = render(Dispatch::scalar());
            let vector = render(vector_dispatch());
            assert_eq!(scalar.pixels(), vector.pixels(), "mode {mode}");
        }
    }

    // ------------------------------------------------------------------
    // Buffer properties
    // ------------------------------------------------------------------

    #[test]
    fn test_set_fill_then_copy_is_uniform() {
        let color = Rgba::new(12, 34, 56, 78);
        let rect = Rect::new(3, 2, 11, 6);
        let mut img = pattern(20, 12);
        img.set_blend_mode(BlendMode::Set);
        img.draw_rectangle(true, rect, color);

        let copy = img.copy_rect(rect).unwrap();
        assert_eq!(copy.dimensions(), (11, 6));
        assert!(copy.pixels().iter().all(|&p| p == color));
    }

    #[test]
    fn test_drawing_outside_clip_is_noop() {
        let mut font = BitmapFont::new(3, 3);
        font.insert_mask('A', 3, &[0b111, 0b101, 0b111]).unwrap();
        let skin = NineSlice::with_border(Image::filled(6, 6, Rgba::WHITE).unwrap(), 2);
        let sprite = pattern(5, 5);
        let red = Rgba::rgb(255, 0, 0);

        for mode in BlendMode::ALL {
            let mut img = pattern(40, 40);
            img.set_clip_rect(Rect::new(20, 20, 10, 10));
            img.set_blend_mode(mode);
            let before = img.pixels().to_vec();

            img.draw_point(Point::new(5, 5), red);
            img.draw_line(Point::new(0, 0), Point::new(19, 39), red);
            img.draw_line_gradient(Point::new(0, 10), Point::new(39, 10), red, Rgba::WHITE);
            img.draw_rectangle(true, Rect::new(0, 0, 15, 15), red);
            img.draw_rectangle(false, Rect::new(31, 0, 9, 40), red);
            img.draw_rectangle_gradient(true, Rect::new(0, 31, 40, 9), red, red, Rgba::WHITE, Rgba::WHITE);
            img.draw_circle(true, Point::new(8, 30), 6, red);
            img.draw_circle_gradient(false, Point::new(8, 8), 5, red, Rgba::WHITE);
            img.draw_triangle(true, Point::new(0, 0), Point::new(18, 0), Point::new(0, 18), red);
            img.draw_triangle_gradient(true, Point::new(32, 32), Point::new(39, 32), Point::new(32, 39), red, red, red);
            img.draw(&sprite, Point::new(2, 2), 0.0, 1.0, Rgba::WHITE);
            img.draw(&sprite, Point::new(2, 25), 0.7, 1.5, Rgba::WHITE);
            img.drawq(&sprite, Point::new(0, 0), Point::new(10, 2), Point::new(12, 12), Point::new(1, 9), Rgba::WHITE);
            img.draw_text(&font, Point::new(1, 1), "AAA", None, 1.0, red);
            img.draw_window(&skin, Rect::new(0, 0, 18, 18), 255);

            assert_eq!(img.pixels(), &before[..], "mode {mode}");
        }
    }

    #[test]
    fn test_double_flip_restores() {
        for (w, h) in [(1, 1), (5, 4), (6, 7)] {
            let original = pattern(w, h);
            let mut img = original.clone();
            img.flip_horizontal();
            img.flip_horizontal();
            assert_eq!(img.pixels(), original.pixels());
            img.flip_vertical();
            img.flip_vertical();
            assert_eq!(img.pixels(), original.pixels());
        }
    }

    #[test]
    fn test_rotate_four_times_restores() {
        let original = pattern(7, 4);
        let mut img = original.clone();
        for _ in 0..4 {
            img.rotate_clockwise().unwrap();
        }
        assert_eq!(img.dimensions(), (7, 4));
        assert_eq!(img.pixels(), original.pixels());

        for _ in 0..4 {
            img.rotate_counter_clockwise().unwrap();
        }
        assert_eq!(img.pixels(), original.pixels());
    }

    #[test]
    fn test_rotate_clockwise_mapping() {
        let (w, h) = (5, 3);
        let original = pattern(w, h);
        let mut img = original.clone();
        img.rotate_clockwise().unwrap();
        assert_eq!(img.dimensions(), (h, w));
        for y in 0..h {
            for x in 0..w {
                assert_eq!(img.pixel(h - 1 - y, x), original.pixel(x, y));
            }
        }
    }

    #[test]
    fn test_circle_outline_rotational_symmetry() {
        let mut img = Image::new(21, 21).unwrap();
        img.set_blend_mode(BlendMode::Set);
        img.draw_circle(false, Point::new(10, 10), 5, Rgba::rgb(255, 0, 0));

        let set = lit(&img);
        assert!(!set.is_empty());
        for &(x, y) in &set {
            let (dx, dy) = (x - 10, y - 10);
            assert!(set.contains(&(10 - dy, 10 + dx)), "90 deg image of ({x},{y})");
            assert!(set.contains(&(10 - dx, 10 - dy)), "180 deg image of ({x},{y})");
            assert!(set.contains(&(10 + dy, 10 - dx)), "270 deg image of ({x},{y})");
        }
        assert!(set.contains(&(15, 10)) && set.contains(&(10, 5)));
    }

    #[test]
    fn test_drawq_matches_draw_for_axis_aligned_square() {
        let src = Image::from_pixels(
            2,
            2,
            &[
                Rgba::new(255, 0, 0, 255),
                Rgba::new(0, 255, 0, 128),
                Rgba::new(0, 0, 255, 64),
                Rgba::new(255, 255, 255, 255),
            ],
        )
        .unwrap();

        for mode in BlendMode::ALL {
            let mut by_draw = pattern(10, 10);
            by_draw.set_blend_mode(mode);
            by_draw.draw(&src, Point::new(4, 3), 0.0, 1.0, Rgba::WHITE);

            let mut by_quad = pattern(10, 10);
            by_quad.set_blend_mode(mode);
            by_quad.drawq(&src, Point::new(4, 3), Point::new(6, 3), Point::new(6, 5), Point::new(4, 5), Rgba::WHITE);

            assert_eq!(by_draw.pixels(), by_quad.pixels(), "mode {mode}");
        }
    }

    #[test]
    fn test_resize_reports_new_size() {
        let mut img = pattern(4, 4);
        for (w, h) in [(17, 9), (1, 1), (64, 3)] {
            img.resize(w, h).unwrap();
            assert_eq!(img.width(), w);
            assert_eq!(img.height(), h);
            assert_eq!(img.size_in_bytes(), (w * h * 4) as usize);
            assert_eq!(img.as_bytes().len(), img.size_in_bytes());
            assert_eq!(img.bbox(), Rect::new(0, 0, w, h));
        }
        assert!(img.resize(0, 5).is_err());
        assert_eq!(img.dimensions(), (64, 3));
    }

    // ------------------------------------------------------------------
    // I/O
    // ------------------------------------------------------------------

    #[test]
    fn test_png_roundtrip_after_drawing() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("scene.png");

        let mut img = Image::filled(32, 24, Rgba::rgb(10, 20, 30)).unwrap();
        img.draw_triangle_gradient(
            true,
            Point::new(2, 2),
            Point::new(29, 5),
            Point::new(12, 21),
            Rgba::new(255, 0, 0, 200),
            Rgba::new(0, 255, 0, 120),
            Rgba::new(0, 0, 255, 255),
        );
        blit_io::write(&path, &img).expect("Failed to write PNG");
        let loaded = blit_io::read(&path).expect("Failed to read PNG");

        assert_eq!(loaded.dimensions(), img.dimensions());
        assert_eq!(loaded.pixels(), img.pixels());
    }

    #[test]
    fn test_rotated_png_roundtrip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("rotated.png");

        let mut img = pattern(6, 3);
        img.rotate_clockwise().unwrap();
        blit_io::write(&path, &img).unwrap();
        let loaded = blit_io::read(&path).unwrap();
        assert_eq!(loaded.dimensions(), (3, 6));
        assert_eq!(loaded.pixels(), img.pixels());
    }
}
