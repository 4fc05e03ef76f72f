//! Shared geometry calculations for annotations
//!
//! Constants and math shared between committed rendering and live previews.

/// Arrow geometry constants
pub mod arrow {
    /// Length of each arrowhead edge
    pub const HEAD_LENGTH: f32 = 20.0;
    /// Arrowhead edge angle from the reversed shaft (30 degrees)
    pub const HEAD_ANGLE: f32 = std::f32::consts::FRAC_PI_6;

    /// Calculate the two base corners of the arrowhead triangle
    ///
    /// The triangle is closed by the tip `(x2, y2)`. A zero-length arrow
    /// points along +x, matching `atan2(0, 0) == 0`.
    pub fn head_points(x1: f32, y1: f32, x2: f32, y2: f32) -> [(f32, f32); 2] {
        let angle = (y2 - y1).atan2(x2 - x1);
        [
            (
                x2 - HEAD_LENGTH * (angle - HEAD_ANGLE).cos(),
                y2 - HEAD_LENGTH * (angle - HEAD_ANGLE).sin(),
            ),
            (
                x2 - HEAD_LENGTH * (angle + HEAD_ANGLE).cos(),
                y2 - HEAD_LENGTH * (angle + HEAD_ANGLE).sin(),
            ),
        ]
    }
}

/// Step marker geometry constants
pub mod step {
    /// Circle radius
    pub const RADIUS: f32 = 25.0;
}

/// Crop selection preview constants
pub mod crop {
    /// Alpha of the black veil over the unselected area
    pub const VEIL_ALPHA: u8 = 128;
    /// Dash pattern of the selection border (on, off)
    pub const DASH: [f32; 2] = [5.0, 5.0];
    /// Selection border width
    pub const BORDER_WIDTH: f32 = 2.0;
}

#[cfg(test)]
mod tests {
    use super::arrow;

    fn close(a: (f32, f32), b: (f32, f32)) -> bool {
        (a.0 - b.0).abs() < 1e-3 && (a.1 - b.1).abs() < 1e-3
    }

    #[test]
    fn head_points_for_rightward_arrow() {
        let [p1, p2] = arrow::head_points(0.0, 0.0, 100.0, 0.0);
        let dx = 20.0 * (std::f32::consts::FRAC_PI_6).cos();
        let dy = 20.0 * (std::f32::consts::FRAC_PI_6).sin();
        assert!(close(p1, (100.0 - dx, dy)), "{p1:?}");
        assert!(close(p2, (100.0 - dx, -dy)), "{p2:?}");
    }

    #[test]
    fn head_edges_have_head_length() {
        let [p1, p2] = arrow::head_points(10.0, 30.0, -40.0, 90.0);
        for p in [p1, p2] {
            let len = ((p.0 + 40.0).powi(2) + (p.1 - 90.0).powi(2)).sqrt();
            assert!((len - arrow::HEAD_LENGTH).abs() < 1e-3);
        }
    }
}
