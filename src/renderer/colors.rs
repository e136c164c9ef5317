//! Colors for game elements

use crate::sim::color::Color;

/// An 8-bit RGB color with a floating-point alpha channel
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f32,
}

impl Rgba {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    /// Same color with a replaced alpha (clamped to 0-1)
    pub fn with_alpha(self, a: f32) -> Self {
        Self {
            a: a.clamp(0.0, 1.0),
            ..self
        }
    }

    /// CSS `rgba(...)` form for canvas-backed surfaces
    pub fn to_css(&self) -> String {
        format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
    }
}

pub const WHITE: Rgba = Rgba::rgb(255, 255, 255);
pub const BLACK: Rgba = Rgba::rgb(0, 0, 0);
pub const DEBUG_BOX: Rgba = Rgba::rgb(255, 0, 0);
pub const STRUGGLE_INNER: Rgba = Rgba::rgb(241, 70, 70);
pub const PLAYER_HIT: Rgba = Rgba::rgb(255, 184, 6);

/// Bright tint for beams, shield rings and smash outlines
pub fn highlight(color: Color) -> Rgba {
    match color {
        Color::Red => Rgba::rgb(241, 70, 70),
        Color::Yellow => Rgba::rgb(244, 227, 106),
        Color::Blue => Rgba::rgb(26, 156, 237),
        Color::Gray => Rgba::rgb(186, 186, 186),
    }
}

/// Dark tint for shield backgrounds and smash fills
pub fn shade(color: Color) -> Rgba {
    match color {
        Color::Red => Rgba::rgb(89, 7, 7),
        Color::Yellow => Rgba::rgb(183, 161, 14),
        Color::Blue => Rgba::rgb(6, 53, 83),
        Color::Gray => Rgba::rgb(71, 70, 81),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_alpha_clamps() {
        assert_eq!(WHITE.with_alpha(2.0).a, 1.0);
        assert_eq!(WHITE.with_alpha(-1.0).a, 0.0);
    }

    #[test]
    fn test_css() {
        assert_eq!(highlight(Color::Blue).with_alpha(0.5).to_css(), "rgba(26, 156, 237, 0.5)");
    }
}
