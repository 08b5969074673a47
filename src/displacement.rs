//! Host-side evaluation of the beam vertex displacement.
//!
//! Mirrors `getPos` / `getCurrentPos` / `getNormal` from the beam vertex
//! header, so surface shape can be inspected without a GL context.

use glam::Vec3;

use crate::noise::NoiseField;

/// Offset used for the finite-difference normal.
pub const NORMAL_DELTA: f32 = 0.02;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Displacement {
    pub time: f32,
    pub speed: f32,
    pub noise_intensity: f32,
    pub scale: f32,
}

impl Displacement {
    /// Noise value for a vertex. The x component is dropped so every
    /// horizontal slice of a strip moves as one wavefront.
    pub fn noise_at(&self, pos: Vec3, uv_y: f32) -> f32 {
        let p = Vec3::new(0.0, pos.y - uv_y, pos.z + self.time * self.speed * 3.0) * self.scale;
        NoiseField.sample(p)
    }

    pub fn displaced(&self, pos: Vec3, normal: Vec3, uv_y: f32) -> Vec3 {
        pos + normal * self.noise_at(pos, uv_y) * self.noise_intensity
    }

    /// Normal of the displaced surface, from two tangent-plane samples.
    pub fn shading_normal(&self, pos: Vec3, normal: Vec3, uv_y: f32) -> Vec3 {
        let tangent = Vec3::X;
        let bitangent = Vec3::Y;
        let here = self.displaced(pos, normal, uv_y);
        let p1 = self.displaced(pos + tangent * NORMAL_DELTA, normal, uv_y) - here;
        let p2 = self.displaced(pos + bitangent * NORMAL_DELTA, normal, uv_y) - here;
        p1.cross(p2).normalize_or_zero()
    }
}
