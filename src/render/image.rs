//! Annotation rendering using tiny-skia
//!
//! These functions draw annotations onto a [`Pixmap`] surface. They hold no
//! state beyond their explicit parameters.

use image::RgbaImage;
use tiny_skia::{
    ColorU8, FillRule, IntSize, LineCap, LineJoin, Paint, PathBuilder, Pixmap, Stroke, Transform,
};

use super::geometry::{arrow, step};
use super::text;
use crate::config::ShapeColor;
use crate::domain::{Annotation, normalize_rect};

/// Copy an RgbaImage into a new Pixmap, premultiplying alpha
pub fn pixmap_from_rgba(img: &RgbaImage) -> Option<Pixmap> {
    let size = IntSize::from_wh(img.width(), img.height())?;
    let mut data = Vec::with_capacity(img.as_raw().len());
    for px in img.pixels() {
        let [r, g, b, a] = px.0;
        let premultiplied = ColorU8::from_rgba(r, g, b, a).premultiply();
        data.extend_from_slice(&[
            premultiplied.red(),
            premultiplied.green(),
            premultiplied.blue(),
            premultiplied.alpha(),
        ]);
    }
    Pixmap::from_vec(data, size)
}

/// Copy a Pixmap back into a straight-alpha RgbaImage
pub fn rgba_from_pixmap(pixmap: &Pixmap) -> RgbaImage {
    let mut img = RgbaImage::new(pixmap.width(), pixmap.height());
    for (dst, src) in img.pixels_mut().zip(pixmap.pixels()) {
        let c = src.demultiply();
        dst.0 = [c.red(), c.green(), c.blue(), c.alpha()];
    }
    img
}

fn solid_paint(color: ShapeColor) -> Paint<'static> {
    let [r, g, b, a] = color.to_rgba_u8();
    let mut paint = Paint::default();
    paint.set_color_rgba8(r, g, b, a);
    paint.anti_alias = true;
    paint
}

fn plain_stroke(width: f32) -> Stroke {
    Stroke {
        width,
        line_cap: LineCap::Butt,
        line_join: LineJoin::Miter,
        ..Default::default()
    }
}

/// Draw an unfilled rectangle outline
///
/// Negative extents are normalized before stroking, so a box dragged up or
/// left renders the same as one dragged down or right.
pub fn draw_box(
    pixmap: &mut Pixmap,
    x: f32,
    y: f32,
    w: f32,
    h: f32,
    color: ShapeColor,
    stroke_width: f32,
) {
    let (min_x, min_y, max_x, max_y) = normalize_rect(x, y, x + w, y + h);

    let mut pb = PathBuilder::new();
    pb.move_to(min_x, min_y);
    pb.line_to(max_x, min_y);
    pb.line_to(max_x, max_y);
    pb.line_to(min_x, max_y);
    pb.close();
    let Some(path) = pb.finish() else {
        return;
    };

    pixmap.stroke_path(
        &path,
        &solid_paint(color),
        &plain_stroke(stroke_width),
        Transform::identity(),
        None,
    );
}

/// Draw a line from `(x1, y1)` to `(x2, y2)` with a filled triangular head at the tip
pub fn draw_arrow(
    pixmap: &mut Pixmap,
    x1: f32,
    y1: f32,
    x2: f32,
    y2: f32,
    color: ShapeColor,
    stroke_width: f32,
) {
    let paint = solid_paint(color);

    // Shaft
    let mut pb = PathBuilder::new();
    pb.move_to(x1, y1);
    pb.line_to(x2, y2);
    if let Some(path) = pb.finish() {
        pixmap.stroke_path(
            &path,
            &paint,
            &plain_stroke(stroke_width),
            Transform::identity(),
            None,
        );
    }

    // Head
    let [(hx1, hy1), (hx2, hy2)] = arrow::head_points(x1, y1, x2, y2);
    let mut pb = PathBuilder::new();
    pb.move_to(x2, y2);
    pb.line_to(hx1, hy1);
    pb.line_to(hx2, hy2);
    pb.close();
    if let Some(path) = pb.finish() {
        pixmap.fill_path(&path, &paint, FillRule::Winding, Transform::identity(), None);
    }
}

/// Draw a filled circle with the marker number centered in white
pub fn draw_step_marker(pixmap: &mut Pixmap, x: f32, y: f32, number: u32, color: ShapeColor) {
    if let Some(circle) = PathBuilder::from_circle(x, y, step::RADIUS) {
        pixmap.fill_path(
            &circle,
            &solid_paint(color),
            FillRule::Winding,
            Transform::identity(),
            None,
        );
    }
    text::draw_text_centered(pixmap, &number.to_string(), x, y, ShapeColor::WHITE);
}

/// Draw a single annotation
pub fn draw_annotation(pixmap: &mut Pixmap, annotation: &Annotation) {
    match annotation {
        Annotation::Box(b) => draw_box(pixmap, b.x, b.y, b.w, b.h, b.color, b.stroke_width),
        Annotation::Arrow(a) => {
            let (tip_x, tip_y) = a.tip();
            draw_arrow(pixmap, a.x, a.y, tip_x, tip_y, a.color, a.stroke_width);
        }
        Annotation::StepMarker(s) => draw_step_marker(pixmap, s.x, s.y, s.number, s.color),
    }
}

/// Draw all annotations back-to-front in store order
pub fn draw_annotations_in_order(pixmap: &mut Pixmap, annotations: &[Annotation]) {
    for annotation in annotations {
        draw_annotation(pixmap, annotation);
    }
}
