//! Colour values and their CSS encodings.

use std::fmt;

/// An opaque RGB triple.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Pulls the first three integer runs out of a CSS colour such as
    /// `rgba(66, 153, 225, 0.8)`.
    ///
    /// Anything that does not yield three integers in `0..=255` degrades to
    /// black rather than failing.
    pub fn parse_css(input: &str) -> Rgb {
        let mut channels = input
            .split(|c: char| !c.is_ascii_digit())
            .filter(|run| !run.is_empty())
            .map(|run| run.parse::<u8>().ok());

        match (channels.next(), channels.next(), channels.next()) {
            (Some(Some(r)), Some(Some(g)), Some(Some(b))) => Rgb::new(r, g, b),
            _ => Rgb::BLACK,
        }
    }

    /// Channel-wise interpolation, rounded to the nearest integer.
    pub fn lerp(self, other: Rgb, t: f64) -> Rgb {
        let mix = |a: u8, b: u8| -> u8 {
            let v = f64::from(a) + (f64::from(b) - f64::from(a)) * t;
            v.round().clamp(0.0, 255.0) as u8
        };
        Rgb::new(mix(self.r, other.r), mix(self.g, other.g), mix(self.b, other.b))
    }

    pub const fn with_alpha(self, alpha: f64) -> Color {
        Color::Rgba { rgb: self, alpha }
    }
}

/// A colour as the canvas understands it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Color {
    Rgba { rgb: Rgb, alpha: f64 },
    /// Hue in degrees, saturation and lightness in percent.
    Hsla {
        hue: f64,
        saturation: f64,
        lightness: f64,
        alpha: f64,
    },
}

impl Color {
    /// Fully saturated, mid-lightness hue.
    pub const fn hue(hue: f64, alpha: f64) -> Color {
        Color::Hsla {
            hue,
            saturation: 100.0,
            lightness: 50.0,
            alpha,
        }
    }

    pub fn alpha(&self) -> f64 {
        match *self {
            Color::Rgba { alpha, .. } | Color::Hsla { alpha, .. } => alpha,
        }
    }

    pub fn to_css(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Color::Rgba { rgb, alpha } => {
                write!(f, "rgba({}, {}, {}, {})", rgb.r, rgb.g, rgb.b, alpha)
            }
            Color::Hsla {
                hue,
                saturation,
                lightness,
                alpha,
            } => write!(f, "hsla({hue}, {saturation}%, {lightness}%, {alpha})"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_rgba_strings() {
        assert_eq!(Rgb::parse_css("rgba(66, 153, 225, 0.8)"), Rgb::new(66, 153, 225));
        assert_eq!(Rgb::parse_css("rgb(1,2,3)"), Rgb::new(1, 2, 3));
    }

    #[test]
    fn malformed_strings_degrade_to_black() {
        assert_eq!(Rgb::parse_css("transparent"), Rgb::BLACK);
        assert_eq!(Rgb::parse_css("rgb(12, 40)"), Rgb::BLACK);
        assert_eq!(Rgb::parse_css("rgb(300, 0, 0)"), Rgb::BLACK);
        assert_eq!(Rgb::parse_css(""), Rgb::BLACK);
    }

    #[test]
    fn lerp_rounds() {
        let a = Rgb::new(66, 153, 225);
        let b = Rgb::new(72, 187, 120);
        assert_eq!(a.lerp(b, 0.0), a);
        assert_eq!(a.lerp(b, 1.0), b);
        assert_eq!(a.lerp(b, 0.5), Rgb::new(69, 170, 173));
    }

    #[test]
    fn css_output() {
        assert_eq!(Rgb::new(0, 0, 0).with_alpha(0.05).to_css(), "rgba(0, 0, 0, 0.05)");
        assert_eq!(Color::hue(40.0, 0.3).to_css(), "hsla(40, 100%, 50%, 0.3)");
    }
}
