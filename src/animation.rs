//! Per-frame advance of the shader's `time` uniform.

use crate::shader::{ShaderProgram, UniformValue};

/// Seconds of shader time per second of wall-clock time.
pub const DEFAULT_TIME_SCALE: f32 = 0.1;

pub const TIME_UNIFORM: &str = "time";

/// Accumulates frame deltas into the `time` uniform.
#[derive(Clone, Copy, Debug)]
pub struct AnimationDriver {
    time_scale: f32,
}

impl Default for AnimationDriver {
    fn default() -> Self {
        Self::new(DEFAULT_TIME_SCALE)
    }
}

impl AnimationDriver {
    /// Negative or non-finite scales are treated as 0 so time stays
    /// monotonic.
    pub fn new(time_scale: f32) -> Self {
        let time_scale = if time_scale.is_finite() && time_scale >= 0.0 {
            time_scale
        } else {
            log::warn!("time scale {time_scale} would not advance time forwards, using 0");
            0.0
        };
        Self { time_scale }
    }

    pub fn time_scale(&self) -> f32 {
        self.time_scale
    }

    /// Add `delta_secs * time_scale` to the program's `time` uniform and
    /// return the new value. Negative or non-finite deltas add nothing, so
    /// time never runs backwards.
    pub fn advance(&self, program: &mut ShaderProgram, delta_secs: f32) -> f32 {
        let step = if delta_secs.is_finite() && delta_secs > 0.0 {
            delta_secs * self.time_scale
        } else {
            0.0
        };
        match program.uniform_mut(TIME_UNIFORM) {
            Some(UniformValue::Float(t)) => {
                *t += step;
                *t
            }
            other => {
                if let Some(value) = other {
                    log::warn!("`{TIME_UNIFORM}` uniform is {value:?}, not a float; resetting it");
                }
                program
                    .uniforms
                    .insert(TIME_UNIFORM.to_string(), UniformValue::Float(step));
                step
            }
        }
    }
}

/// Turns `requestAnimationFrame` timestamps (milliseconds) into deltas in
/// seconds.
#[derive(Clone, Copy, Debug, Default)]
pub struct FrameClock {
    last_ms: Option<f64>,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seconds since the previous tick; 0 on the first tick or if the
    /// timestamp went backwards.
    pub fn tick(&mut self, now_ms: f64) -> f32 {
        let delta = match self.last_ms {
            Some(last) if now_ms > last => ((now_ms - last) / 1000.0) as f32,
            _ => 0.0,
        };
        if self.last_ms.map_or(true, |last| now_ms > last) {
            self.last_ms = Some(now_ms);
        }
        delta
    }
}
