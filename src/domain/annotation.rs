//! Annotation types for drawing on screenshots
//!
//! All annotation types store coordinates in the coordinate space of the
//! current base image (post any crop).

use serde::{Deserialize, Serialize};

use super::geometry::Rect;
use crate::config::ShapeColor;

/// Outline rectangle annotation (no fill)
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BoxAnnotation {
    /// Drag origin
    pub x: f32,
    pub y: f32,
    /// Drag extent, may be negative
    pub w: f32,
    pub h: f32,
    pub color: ShapeColor,
    pub stroke_width: f32,
}

/// Arrow from `(x, y)` to `(x + w, y + h)` with a filled head at the tip
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ArrowAnnotation {
    /// Tail point
    pub x: f32,
    pub y: f32,
    /// Vector from tail to tip, may be negative
    pub w: f32,
    pub h: f32,
    pub color: ShapeColor,
    pub stroke_width: f32,
}

impl ArrowAnnotation {
    /// Tip point of the arrow
    pub fn tip(&self) -> (f32, f32) {
        (self.x + self.w, self.y + self.h)
    }
}

/// Numbered circular marker for sequential instructions
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StepMarkerAnnotation {
    /// Center of the marker
    pub x: f32,
    pub y: f32,
    pub color: ShapeColor,
    pub stroke_width: f32,
    /// Positive, assigned in creation order starting at 1
    pub number: u32,
}

/// Unified annotation type, insertion order is z-order
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Annotation {
    Box(BoxAnnotation),
    Arrow(ArrowAnnotation),
    StepMarker(StepMarkerAnnotation),
}

impl Annotation {
    /// Bounding box used for crop filtering, always normalized
    ///
    /// Step markers are anchored on their center point and report a
    /// zero-sized box there.
    pub fn bounds(&self) -> Rect {
        match self {
            Annotation::Box(b) => Rect::new(b.x, b.y, b.w, b.h).normalized(),
            Annotation::Arrow(a) => Rect::new(a.x, a.y, a.w, a.h).normalized(),
            Annotation::StepMarker(s) => Rect::new(s.x, s.y, 0.0, 0.0),
        }
    }

    /// Same annotation moved by `(dx, dy)`
    pub fn translated(&self, dx: f32, dy: f32) -> Annotation {
        let mut moved = self.clone();
        match &mut moved {
            Annotation::Box(b) => {
                b.x += dx;
                b.y += dy;
            }
            Annotation::Arrow(a) => {
                a.x += dx;
                a.y += dy;
            }
            Annotation::StepMarker(s) => {
                s.x += dx;
                s.y += dy;
            }
        }
        moved
    }

    pub fn is_step_marker(&self) -> bool {
        matches!(self, Annotation::StepMarker(_))
    }
}
