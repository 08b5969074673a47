//! Construction parameters for the beam field.
//!
//! Every field is optional in the JSON form; missing fields take the values
//! the site ships with.

use serde::Deserialize;

use crate::color::Color;
use crate::error::{BeamsError, Result};

/// Segments along each strip's height. High enough for the noise to read
/// as a smooth wave.
pub const HEIGHT_SEGMENTS: u32 = 100;

/// Strips share one depth plane; they are told apart only by displacement.
pub const STRIP_SPACING: f32 = 0.0;

/// Upper bound on `beamNumber`. Keeps the merged mesh a few MB and well
/// inside the `u32` index range.
pub const MAX_BEAM_NUMBER: u32 = 1024;

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BeamsConfig {
    pub beam_width: f32,
    pub beam_height: f32,
    pub beam_number: u32,
    pub light_color: String,
    pub speed: f32,
    pub noise_intensity: f32,
    pub scale: f32,
    /// Degrees about the view axis.
    pub rotation: f32,
}

impl Default for BeamsConfig {
    fn default() -> Self {
        Self {
            beam_width: 2.0,
            beam_height: 15.0,
            beam_number: 12,
            light_color: "#c6f135".to_string(),
            speed: 2.0,
            noise_intensity: 1.75,
            scale: 0.2,
            rotation: 0.0,
        }
    }
}

impl BeamsConfig {
    /// Parse and validate a JSON config. An empty or whitespace-only string
    /// yields the defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let config = if json.trim().is_empty() {
            Self::default()
        } else {
            serde_json::from_str::<Self>(json)?
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        let positive = [
            ("beamWidth", self.beam_width),
            ("beamHeight", self.beam_height),
        ];
        for (name, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(BeamsError::InvalidConfig(format!(
                    "{name} must be a positive number, got {value}"
                )));
            }
        }
        if self.beam_number == 0 || self.beam_number > MAX_BEAM_NUMBER {
            return Err(BeamsError::InvalidConfig(format!(
                "beamNumber must be between 1 and {MAX_BEAM_NUMBER}, got {}",
                self.beam_number
            )));
        }
        let finite = [
            ("speed", self.speed),
            ("noiseIntensity", self.noise_intensity),
            ("scale", self.scale),
            ("rotation", self.rotation),
        ];
        for (name, value) in finite {
            if !value.is_finite() {
                return Err(BeamsError::InvalidConfig(format!("{name} must be finite")));
            }
        }
        self.light()?;
        Ok(())
    }

    pub fn light(&self) -> Result<Color> {
        Color::from_hex(&self.light_color)
    }
}
