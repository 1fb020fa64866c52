//! Small 2-D helpers shared by every backdrop variant.

pub use glam::DVec2;

/// Linear interpolation between two scalars. Exact at `t == 0` and `t == 1`.
#[inline]
pub fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a * (1.0 - t) + b * t
}

/// Rotates every point around the origin by `angle` radians.
pub fn rotate_points(points: &[DVec2], angle: f64) -> Vec<DVec2> {
    let rotation = DVec2::from_angle(angle);
    points.iter().map(|p| rotation.rotate(*p)).collect()
}

/// Axis-aligned rectangle in surface pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Rectangle anchored at the origin covering a whole viewport.
    pub const fn viewport(width: f64, height: f64) -> Self {
        Self::new(0.0, 0.0, width, height)
    }
}

/// Direction a scan line sweeps across the glyph grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    /// A column marker moving left to right.
    Vertical,
    /// A row marker moving top to bottom.
    Horizontal,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lerp_endpoints() {
        assert_eq!(lerp(2.0, 6.0, 0.0), 2.0);
        assert_eq!(lerp(2.0, 6.0, 1.0), 6.0);
        assert_eq!(lerp(2.0, 6.0, 0.25), 3.0);
    }

    #[test]
    fn quarter_turn() {
        let rotated = rotate_points(&[DVec2::new(1.0, 0.0)], std::f64::consts::FRAC_PI_2);
        assert!((rotated[0] - DVec2::new(0.0, 1.0)).length() < 1e-12);
    }
}
