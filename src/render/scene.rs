//! Scene composition
//!
//! The committed scene is the base image plus every stored annotation. Live
//! previews (shape being dragged, crop selection) are layered on top of it
//! without touching the annotation store.

use tiny_skia::{
    FilterQuality, Paint, PathBuilder, Pixmap, PixmapPaint, Rect as SkRect, Stroke, StrokeDash,
    Transform,
};

use super::geometry::crop;
use super::image::{draw_annotations_in_order, draw_arrow, draw_box, draw_step_marker};
use crate::capture::BaseImage;
use crate::config::ShapeColor;
use crate::domain::{Annotation, Point, Rect, Tool};

/// Blit the base image scaled to the surface dimensions
fn blit_base(pixmap: &mut Pixmap, base: &BaseImage) {
    let src = base.pixmap();
    if src.width() == pixmap.width() && src.height() == pixmap.height() {
        pixmap.data_mut().copy_from_slice(src.data());
        return;
    }
    let sx = pixmap.width() as f32 / src.width() as f32;
    let sy = pixmap.height() as f32 / src.height() as f32;
    let paint = PixmapPaint {
        quality: FilterQuality::Bilinear,
        ..Default::default()
    };
    pixmap.draw_pixmap(0, 0, src.as_ref(), &paint, Transform::from_scale(sx, sy), None);
}

/// Base image alone at `width`×`height`
fn base_surface(base: &BaseImage, width: u32, height: u32) -> Option<Pixmap> {
    let mut pixmap = Pixmap::new(width, height)?;
    blit_base(&mut pixmap, base);
    Some(pixmap)
}

/// Render the committed scene onto a fresh `width`×`height` surface
pub fn render_committed(
    base: &BaseImage,
    annotations: &[Annotation],
    width: u32,
    height: u32,
) -> Option<Pixmap> {
    let mut pixmap = base_surface(base, width, height)?;
    draw_annotations_in_order(&mut pixmap, annotations);
    Some(pixmap)
}

/// Overlay the crop selection preview
///
/// Everything is veiled in 50% black, the selection is re-revealed from the
/// base image alone, and a dashed border is stroked around it.
pub fn draw_crop_preview(
    pixmap: &mut Pixmap,
    base: &BaseImage,
    selection: Rect,
    highlight: ShapeColor,
) {
    let (width, height) = (pixmap.width(), pixmap.height());

    if let Some(full) = SkRect::from_xywh(0.0, 0.0, width as f32, height as f32) {
        let mut veil = Paint::default();
        veil.set_color_rgba8(0, 0, 0, crop::VEIL_ALPHA);
        pixmap.fill_rect(full, &veil, Transform::identity(), None);
    }

    if let Some(region) = selection.snap_to_canvas(width, height)
        && let Some(revealed) = base_surface(base, width, height)
    {
        let stride = width as usize * 4;
        let start = region.x as usize * 4;
        let len = region.width as usize * 4;
        let src = revealed.data();
        let dst = pixmap.data_mut();
        for row in region.y..region.y + region.height {
            let offset = row as usize * stride + start;
            dst[offset..offset + len].copy_from_slice(&src[offset..offset + len]);
        }
    }

    let border = selection.normalized();
    if border.w <= 0.0 && border.h <= 0.0 {
        return;
    }
    let mut pb = PathBuilder::new();
    pb.move_to(border.x, border.y);
    pb.line_to(border.right(), border.y);
    pb.line_to(border.right(), border.bottom());
    pb.line_to(border.x, border.bottom());
    pb.close();
    let Some(path) = pb.finish() else {
        return;
    };
    let [r, g, b, a] = highlight.to_rgba_u8();
    let mut paint = Paint::default();
    paint.set_color_rgba8(r, g, b, a);
    paint.anti_alias = true;
    let stroke = Stroke {
        width: crop::BORDER_WIDTH,
        dash: StrokeDash::new(crop::DASH.to_vec(), 0.0),
        ..Default::default()
    };
    pixmap.stroke_path(&path, &paint, &stroke, Transform::identity(), None);
}

/// Overlay the shape the current drag would commit
///
/// `next_step` is the number a step marker committed now would receive.
pub fn draw_shape_preview(
    pixmap: &mut Pixmap,
    tool: Tool,
    origin: Point,
    current: Point,
    color: ShapeColor,
    stroke_width: f32,
    next_step: u32,
) {
    match tool {
        Tool::Box => draw_box(
            pixmap,
            origin.x,
            origin.y,
            current.x - origin.x,
            current.y - origin.y,
            color,
            stroke_width,
        ),
        Tool::Arrow => draw_arrow(
            pixmap,
            origin.x,
            origin.y,
            current.x,
            current.y,
            color,
            stroke_width,
        ),
        Tool::Step => draw_step_marker(pixmap, origin.x, origin.y, next_step, color),
        Tool::Crop => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::BoxAnnotation;
    use image::{Rgba, RgbaImage};

    fn gray_base(width: u32, height: u32) -> BaseImage {
        BaseImage::new(RgbaImage::from_pixel(width, height, Rgba([200, 200, 200, 255]))).unwrap()
    }

    fn rgba(pixmap: &Pixmap, x: u32, y: u32) -> [u8; 4] {
        let c = pixmap.pixel(x, y).unwrap().demultiply();
        [c.red(), c.green(), c.blue(), c.alpha()]
    }

    #[test]
    fn committed_scene_draws_base_then_annotations() {
        let base = gray_base(100, 100);
        let boxed = Annotation::Box(BoxAnnotation {
            x: 10.0,
            y: 10.0,
            w: 40.0,
            h: 40.0,
            color: ShapeColor::default(),
            stroke_width: 4.0,
        });
        let scene = render_committed(&base, &[boxed], 100, 100).unwrap();
        assert_eq!(rgba(&scene, 10, 30), [255, 0, 0, 255]);
        assert_eq!(rgba(&scene, 30, 30), [200, 200, 200, 255]);
    }

    #[test]
    fn base_is_scaled_to_surface() {
        let base = gray_base(50, 25);
        let scene = render_committed(&base, &[], 100, 50).unwrap();
        assert_eq!((scene.width(), scene.height()), (100, 50));
        assert_eq!(rgba(&scene, 60, 30), [200, 200, 200, 255]);
    }

    #[test]
    fn crop_preview_veils_outside_and_reveals_inside() {
        let base = gray_base(100, 100);
        let mut scene = render_committed(&base, &[], 100, 100).unwrap();
        let highlight = ShapeColor::from_hex("#66d9ef").unwrap();
        // Dragged up-left; negative extent
        draw_crop_preview(&mut scene, &base, Rect::new(80.0, 80.0, -60.0, -60.0), highlight);

        // Veiled: 200 * 0.5 over black
        let outside = rgba(&scene, 5, 5);
        assert!(outside[0] < 110 && outside[0] > 90, "{outside:?}");
        // Revealed interior untouched
        assert_eq!(rgba(&scene, 50, 50), [200, 200, 200, 255]);
        // Border pixels carry the highlight somewhere along the top edge
        let on_border = (20..80).any(|x| {
            let [r, g, b, _] = rgba(&scene, x, 20);
            b > r && g > r
        });
        assert!(on_border);
    }

    #[test]
    fn step_preview_uses_origin_and_next_number() {
        let base = gray_base(100, 100);
        let mut scene = render_committed(&base, &[], 100, 100).unwrap();
        draw_shape_preview(
            &mut scene,
            Tool::Step,
            Point::new(50.0, 50.0),
            Point::new(90.0, 90.0),
            ShapeColor::default(),
            3.0,
            7,
        );
        assert_eq!(rgba(&scene, 50, 30), [255, 0, 0, 255]);
        assert_eq!(rgba(&scene, 90, 90), [200, 200, 200, 255]);
    }
}
