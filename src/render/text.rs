//! Bitmap text for step marker labels
//!
//! Glyphs come from the embedded bold Noto Sans Mono raster at 20px, so
//! labels render identically on every platform without a font lookup.

use noto_sans_mono_bitmap::{FontWeight, RasterHeight, get_raster, get_raster_width};
use tiny_skia::{Paint, Pixmap, Rect, Transform};

use crate::config::ShapeColor;

const WEIGHT: FontWeight = FontWeight::Bold;
const HEIGHT: RasterHeight = RasterHeight::Size20;

/// Pixel size of `text` when rendered as a single line
pub fn measure(text: &str) -> (usize, usize) {
    let advance = get_raster_width(WEIGHT, HEIGHT);
    (advance * text.chars().count(), HEIGHT.val())
}

/// Draw `text` centered horizontally and vertically on `(cx, cy)`
///
/// Each glyph's coverage is used as the paint alpha, so edges blend with
/// whatever is already on the surface.
pub fn draw_text_centered(pixmap: &mut Pixmap, text: &str, cx: f32, cy: f32, color: ShapeColor) {
    let (width, height) = measure(text);
    let left = (cx - width as f32 / 2.0).round();
    let top = (cy - height as f32 / 2.0).round();
    let advance = get_raster_width(WEIGHT, HEIGHT);
    let [r, g, b, _] = color.to_rgba_u8();

    let mut paint = Paint::default();
    paint.anti_alias = false;

    for (i, ch) in text.chars().enumerate() {
        let Some(glyph) = get_raster(ch, WEIGHT, HEIGHT).or_else(|| get_raster('?', WEIGHT, HEIGHT))
        else {
            continue;
        };
        let glyph_left = left + (i * advance) as f32;
        for (row, line) in glyph.raster().iter().enumerate() {
            for (col, &intensity) in line.iter().enumerate() {
                if intensity == 0 {
                    continue;
                }
                let Some(cell) =
                    Rect::from_xywh(glyph_left + col as f32, top + row as f32, 1.0, 1.0)
                else {
                    continue;
                };
                paint.set_color_rgba8(r, g, b, intensity);
                pixmap.fill_rect(cell, &paint, Transform::identity(), None);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn measure_scales_with_digit_count() {
        let (one, h) = measure("7");
        let (three, h3) = measure("123");
        assert_eq!(three, one * 3);
        assert_eq!(h, 20);
        assert_eq!(h, h3);
    }

    #[test]
    fn draws_inside_centered_box() {
        let mut pixmap = Pixmap::new(60, 60).unwrap();
        draw_text_centered(&mut pixmap, "8", 30.0, 30.0, ShapeColor::WHITE);

        let (w, h) = measure("8");
        let mut painted = 0;
        for y in 0..60u32 {
            for x in 0..60u32 {
                let px = pixmap.pixel(x, y).unwrap();
                if px.alpha() > 0 {
                    painted += 1;
                    let dx = (x as f32 + 0.5 - 30.0).abs();
                    let dy = (y as f32 + 0.5 - 30.0).abs();
                    assert!(dx <= w as f32 / 2.0 + 1.0 && dy <= h as f32 / 2.0 + 1.0);
                }
            }
        }
        assert!(painted > 0);
    }
}
