//! Concrete colour values.

use std::fmt;

use palette::{Hsv, IntoColor, Srgb};
use serde::Serialize;

use crate::error::{Result, RosetteError};

/// An opaque sRGB colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub struct Colour {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Colour {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub const BLACK: Self = Self::rgb(0, 0, 0);

    pub const WHITE: Self = Self::rgb(255, 255, 255);

    /// Convert from hue (degrees), saturation and brightness (percent).
    ///
    /// Hue wraps around the colour wheel; saturation and brightness are
    /// clamped to 0–100.
    pub fn from_hsb(hue: f32, saturation: f32, brightness: f32) -> Self {
        let hsv: Hsv = Hsv::new(
            hue.rem_euclid(360.0),
            (saturation / 100.0).clamp(0.0, 1.0),
            (brightness / 100.0).clamp(0.0, 1.0),
        );
        let rgb: Srgb = hsv.into_color();
        let rgb: Srgb<u8> = rgb.into_format();
        Self::rgb(rgb.red, rgb.green, rgb.blue)
    }

    /// Parse a hex colour string: `#RGB` or `#RRGGBB`, `#` optional.
    pub fn from_hex(s: &str) -> Result<Self> {
        let s = s.trim();
        let hex = s.strip_prefix('#').unwrap_or(s);
        let invalid = || RosetteError::Colour {
            message: format!("Invalid hex colour: {}", s),
            help: Some("Use #RGB or #RRGGBB format".to_string()),
        };

        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(invalid());
        }

        let channels: Vec<u8> = match hex.len() {
            3 => hex
                .chars()
                .filter_map(|c| c.to_digit(16))
                .map(|d| (d as u8) << 4 | d as u8)
                .collect(),
            6 => (0..3)
                .filter_map(|i| u8::from_str_radix(&hex[i * 2..i * 2 + 2], 16).ok())
                .collect(),
            _ => return Err(invalid()),
        };

        match channels[..] {
            [r, g, b] => Ok(Self::rgb(r, g, b)),
            _ => Err(invalid()),
        }
    }
}

impl fmt::Display for Colour {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}
