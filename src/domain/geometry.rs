//! Geometric types for canvas coordinates and crop regions

use serde::{Deserialize, Serialize};

/// A pointer position relative to the canvas origin
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Rectangle in canvas coordinates
///
/// `w` and `h` may be negative while a drag is in flight; use
/// [`Rect::normalized`] before comparing extents.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    /// Create a new rectangle from origin and extent
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    /// Rectangle spanned by a drag from `origin` to `current`, extent may be negative
    pub fn from_drag(origin: Point, current: Point) -> Self {
        Self {
            x: origin.x,
            y: origin.y,
            w: current.x - origin.x,
            h: current.y - origin.y,
        }
    }

    /// Same area with a non-negative width and height
    pub fn normalized(&self) -> Rect {
        let (min_x, min_y, max_x, max_y) =
            normalize_rect(self.x, self.y, self.x + self.w, self.y + self.h);
        Rect {
            x: min_x,
            y: min_y,
            w: max_x - min_x,
            h: max_y - min_y,
        }
    }

    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    /// Check that `other` lies entirely inside this rectangle (edges inclusive)
    ///
    /// Both rectangles are compared in normalized form.
    pub fn contains_rect(&self, other: &Rect) -> bool {
        let outer = self.normalized();
        let inner = other.normalized();
        inner.x >= outer.x
            && inner.y >= outer.y
            && inner.right() <= outer.right()
            && inner.bottom() <= outer.bottom()
    }

    /// Snap outward to whole pixels and clamp to a `width`×`height` canvas
    ///
    /// The snapped region always covers the original rectangle's on-canvas
    /// part.
    ///
    /// Returns `None` when nothing of the rectangle remains on the canvas.
    pub fn snap_to_canvas(&self, width: u32, height: u32) -> Option<PixelRect> {
        let n = self.normalized();
        let left = n.x.floor().clamp(0.0, width as f32) as u32;
        let top = n.y.floor().clamp(0.0, height as f32) as u32;
        let right = n.right().ceil().clamp(0.0, width as f32) as u32;
        let bottom = n.bottom().ceil().clamp(0.0, height as f32) as u32;
        if right > left && bottom > top {
            Some(PixelRect {
                x: left,
                y: top,
                width: right - left,
                height: bottom - top,
            })
        } else {
            None
        }
    }
}

/// Whole-pixel rectangle inside a raster surface
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PixelRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl PixelRect {
    /// The same region in floating-point canvas coordinates
    pub fn to_rect(self) -> Rect {
        Rect::new(
            self.x as f32,
            self.y as f32,
            self.width as f32,
            self.height as f32,
        )
    }
}

/// Normalize min/max coordinates from arbitrary start/end points
#[inline]
pub fn normalize_rect(x1: f32, y1: f32, x2: f32, y2: f32) -> (f32, f32, f32, f32) {
    let (min_x, max_x) = if x1 < x2 { (x1, x2) } else { (x2, x1) };
    let (min_y, max_y) = if y1 < y2 { (y1, y2) } else { (y2, y1) };
    (min_x, min_y, max_x, max_y)
}

/// Fit `width`×`height` inside `max_width`×`max_height`, preserving aspect ratio
///
/// Only ever scales down. Width is constrained first, then height, and the
/// result is truncated to whole pixels (never below one).
pub fn fit_within(width: u32, height: u32, max_width: u32, max_height: u32) -> (u32, u32) {
    let mut w = width as f64;
    let mut h = height as f64;
    if w > max_width as f64 {
        h = h * max_width as f64 / w;
        w = max_width as f64;
    }
    if h > max_height as f64 {
        w = w * max_height as f64 / h;
        h = max_height as f64;
    }
    ((w as u32).max(1), (h as u32).max(1))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalized_flips_negative_extent() {
        let r = Rect::new(50.0, 40.0, -20.0, -10.0).normalized();
        assert_eq!(r, Rect::new(30.0, 30.0, 20.0, 10.0));
    }

    #[test]
    fn contains_rect_is_edge_inclusive() {
        let outer = Rect::new(0.0, 0.0, 100.0, 100.0);
        assert!(outer.contains_rect(&Rect::new(0.0, 0.0, 100.0, 100.0)));
        assert!(outer.contains_rect(&Rect::new(90.0, 90.0, 10.0, 10.0)));
        assert!(!outer.contains_rect(&Rect::new(90.0, 90.0, 11.0, 10.0)));
        assert!(outer.contains_rect(&Rect::new(20.0, 20.0, -20.0, -20.0)));
        assert!(!outer.contains_rect(&Rect::new(10.0, 10.0, -20.0, 5.0)));
    }

    #[test]
    fn snap_clamps_to_canvas() {
        let r = Rect::new(-10.4, 20.6, 300.0, 50.0);
        assert_eq!(
            r.snap_to_canvas(200, 100),
            Some(PixelRect {
                x: 0,
                y: 20,
                width: 200,
                height: 51
            })
        );
        assert_eq!(Rect::new(250.0, 0.0, 10.0, 10.0).snap_to_canvas(200, 100), None);
        assert_eq!(Rect::new(5.0, 5.0, 0.0, 10.0).snap_to_canvas(200, 100), None);
    }

    #[test]
    fn snap_never_shrinks_half_pixel_edges() {
        let r = Rect::new(10.5, 10.5, 20.0, 20.0);
        let snapped = r.snap_to_canvas(200, 100).unwrap();
        assert_eq!(
            snapped,
            PixelRect {
                x: 10,
                y: 10,
                width: 21,
                height: 21
            }
        );
        assert!(snapped.to_rect().contains_rect(&r));
        // Sub-pixel selections still cover one pixel
        assert_eq!(
            Rect::new(5.0, 5.0, 0.2, 10.0).snap_to_canvas(200, 100),
            Some(PixelRect {
                x: 5,
                y: 5,
                width: 1,
                height: 10
            })
        );
    }

    #[test]
    fn fit_within_scales_down_only() {
        assert_eq!(fit_within(800, 600, 1200, 800), (800, 600));
        assert_eq!(fit_within(2400, 800, 1200, 800), (1200, 400));
        assert_eq!(fit_within(1000, 1600, 1200, 800), (500, 800));
        // Width pass then height pass
        assert_eq!(fit_within(3000, 2400, 1200, 800), (1000, 800));
    }
}
