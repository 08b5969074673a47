use glam::Vec3;

use crate::error::{BeamsError, Result};

/// An sRGB color as written in CSS, e.g. `#c6f135`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Color {
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    pub const WHITE: Color = Color::rgb(1.0, 1.0, 1.0);

    /// Parse `#rrggbb` or the short `#rgb` form.
    pub fn from_hex(s: &str) -> Result<Self> {
        let invalid = || BeamsError::InvalidColor(s.to_string());
        let hex = s.trim().strip_prefix('#').ok_or_else(invalid)?;
        if !hex.is_ascii() {
            return Err(invalid());
        }
        let channel = |digits: &str| u8::from_str_radix(digits, 16).map_err(|_| invalid());

        let (r, g, b) = match hex.len() {
            6 => (channel(&hex[0..2])?, channel(&hex[2..4])?, channel(&hex[4..6])?),
            3 => {
                let short = |i: usize| channel(&hex[i..i + 1]).map(|v| v * 17);
                (short(0)?, short(1)?, short(2)?)
            }
            _ => return Err(invalid()),
        };
        Ok(Self::rgb(r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0))
    }

    /// Linear-light components, as the shaders expect them.
    pub fn to_linear(self) -> Vec3 {
        Vec3::new(
            srgb_to_linear(self.r),
            srgb_to_linear(self.g),
            srgb_to_linear(self.b),
        )
    }
}

fn srgb_to_linear(c: f32) -> f32 {
    if c < 0.04045 {
        c * 0.0773993808
    } else {
        (c * 0.9478672986 + 0.0521327014).powf(2.4)
    }
}
