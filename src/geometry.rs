// ============================================================================
// SURFACE GEOMETRY
// ============================================================================

/// A point in surface pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Pixel dimensions of the drawing surface for the frame being composed.
///
/// Every layout value of the gauge is derived from this and nothing else,
/// so a resized surface simply produces a resized gauge on the next frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Surface {
    pub width: f64,
    pub height: f64,
    /// Physical pixels per logical pixel. Text sizes are given in logical
    /// pixels and scaled by this.
    pub scale: f64,
}

impl Surface {
    pub const fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            scale: 1.0,
        }
    }

    pub const fn with_scale(self, scale: f64) -> Self {
        Self { scale, ..self }
    }

    /// Converts a logical text metric to physical pixels.
    pub fn text_px(&self, logical: f32) -> f32 {
        (logical as f64 * self.scale) as f32
    }

    pub fn from_pixels(width: usize, height: usize) -> Self {
        Self::new(width as f64, height as f64)
    }

    /// Maps fractional coordinates to pixels. Fractions outside `0..=1` land
    /// outside the visible area.
    pub fn pos(&self, rel_x: f64, rel_y: f64) -> Position {
        Position::new(self.width * rel_x, self.height * rel_y)
    }

    /// Scales `fraction` by the shorter side so proportions hold under any
    /// aspect ratio.
    pub fn rel_min(&self, fraction: f64) -> f64 {
        if self.width > self.height {
            self.height * fraction
        } else {
            self.width * fraction
        }
    }
}

pub fn polar(center: Position, radius: f64, angle: f64) -> Position {
    Position::new(
        center.x + radius * angle.cos(),
        center.y + radius * angle.sin(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::f64::consts::PI;

    #[test]
    fn pos_center_is_half_of_each_side() {
        let surface = Surface::new(1280.0, 720.0);
        assert_eq!(surface.pos(0.5, 0.5), Position::new(640.0, 360.0));
        assert_eq!(surface.pos(0.0, 0.0), Position::default());
    }

    #[test]
    fn pos_out_of_range_is_not_clamped() {
        let surface = Surface::new(100.0, 50.0);
        assert_eq!(surface.pos(-0.5, 2.0), Position::new(-50.0, 100.0));
    }

    #[test]
    fn rel_min_uses_shorter_side() {
        assert_eq!(Surface::new(800.0, 600.0).rel_min(0.5), 300.0);
        assert_eq!(Surface::new(600.0, 800.0).rel_min(0.5), 300.0);
        assert_eq!(Surface::new(500.0, 500.0).rel_min(0.1), 50.0);
    }

    #[test]
    fn scale_only_affects_text_metrics() {
        let surface = Surface::new(1600.0, 1200.0).with_scale(2.0);
        assert_eq!(surface.text_px(48.0), 96.0);
        assert_eq!(surface.text_px(-3.0), -6.0);
        assert_eq!(surface.rel_min(0.3), Surface::new(1600.0, 1200.0).rel_min(0.3));
        assert_eq!(Surface::new(10.0, 10.0).text_px(24.0), 24.0);
    }

    #[test]
    fn polar_axes() {
        let center = Position::new(10.0, 20.0);
        let right = polar(center, 5.0, 0.0);
        assert!((right.x - 15.0).abs() < 1e-9);
        assert!((right.y - 20.0).abs() < 1e-9);

        // Screen space: positive angles turn clockwise, so +pi/2 points down.
        let down = polar(center, 5.0, PI / 2.0);
        assert!((down.x - 10.0).abs() < 1e-9);
        assert!((down.y - 25.0).abs() < 1e-9);
    }

    proptest! {
        #[test]
        fn prop_rel_min_scales_shorter_side(w in 1.0f64..10_000.0, h in 1.0f64..10_000.0, f in -2.0f64..2.0) {
            let surface = Surface::new(w, h);
            prop_assert_eq!(surface.rel_min(f), f * w.min(h));
        }

        #[test]
        fn prop_pos_center_is_exact(w in 1.0f64..10_000.0, h in 1.0f64..10_000.0) {
            let surface = Surface::new(w, h);
            prop_assert_eq!(surface.pos(0.5, 0.5), Position::new(w / 2.0, h / 2.0));
        }

        #[test]
        fn prop_polar_stays_on_circle(r in 0.0f64..1000.0, angle in -10.0f64..10.0) {
            let center = Position::new(3.0, -4.0);
            let p = polar(center, r, angle);
            let dist = ((p.x - center.x).powi(2) + (p.y - center.y).powi(2)).sqrt();
            prop_assert!((dist - r).abs() < 1e-6);
        }
    }
}
