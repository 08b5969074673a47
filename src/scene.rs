//! Camera, lights and transforms around the beam mesh.

use glam::{Mat3, Mat4, Vec3};

use crate::color::Color;
use crate::shader::{UniformValue, Uniforms};

pub const BACKGROUND: Color = Color::rgb(10.0 / 255.0, 10.0 / 255.0, 10.0 / 255.0);

pub const LIGHT_POSITION: Vec3 = Vec3::new(0.0, 3.0, 10.0);
pub const LIGHT_INTENSITY: f32 = 1.0;
pub const AMBIENT_INTENSITY: f32 = 1.0;

/// Device pixel ratio bounds for the drawing buffer.
pub const MIN_PIXEL_RATIO: f64 = 1.0;
pub const MAX_PIXEL_RATIO: f64 = 2.0;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Camera {
    pub position: Vec3,
    pub fov_deg: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            position: Vec3::new(0.0, 0.0, 20.0),
            fov_deg: 30.0,
            near: 0.1,
            far: 2000.0,
        }
    }
}

impl Camera {
    pub fn view(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, Vec3::ZERO, Vec3::Y)
    }

    /// Vertical field of view is fixed; the horizontal extent follows the
    /// aspect ratio.
    pub fn projection(&self, aspect: f32) -> Mat4 {
        let aspect = if aspect.is_finite() && aspect > 0.0 { aspect } else { 1.0 };
        Mat4::perspective_rh_gl(self.fov_deg.to_radians(), aspect, self.near, self.far)
    }
}

/// The beam group: mesh and directional light rotated together about Z.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SceneRig {
    pub camera: Camera,
    pub rotation_deg: f32,
    pub light_color: Color,
}

#[derive(Clone, Copy, Debug)]
pub struct FrameMatrices {
    pub model: Mat4,
    pub view: Mat4,
    pub projection: Mat4,
    pub model_view: Mat4,
    pub normal: Mat3,
}

impl SceneRig {
    pub fn new(rotation_deg: f32, light_color: Color) -> Self {
        Self {
            camera: Camera::default(),
            rotation_deg,
            light_color,
        }
    }

    pub fn model(&self) -> Mat4 {
        Mat4::from_rotation_z(self.rotation_deg.to_radians())
    }

    pub fn matrices(&self, aspect: f32) -> FrameMatrices {
        let model = self.model();
        let view = self.camera.view();
        let model_view = view * model;
        FrameMatrices {
            model,
            view,
            projection: self.camera.projection(aspect),
            model_view,
            normal: Mat3::from_mat4(model_view).inverse().transpose(),
        }
    }

    /// Direction towards the light in view space. The light rides the group
    /// rotation; its target stays at the world origin.
    pub fn light_direction_view(&self) -> Vec3 {
        let world = self.model().transform_point3(LIGHT_POSITION).normalize();
        self.camera.view().transform_vector3(world).normalize()
    }

    /// Light uniforms for the lit base templates, in linear color.
    pub fn light_uniforms(&self) -> Uniforms {
        let mut u = Uniforms::new();
        u.insert(
            "directionalLightColor".into(),
            UniformValue::Vec3(self.light_color.to_linear() * LIGHT_INTENSITY),
        );
        u.insert(
            "directionalLightDirection".into(),
            UniformValue::Vec3(self.light_direction_view()),
        );
        u.insert(
            "ambientLightColor".into(),
            UniformValue::Vec3(Color::WHITE.to_linear() * AMBIENT_INTENSITY),
        );
        u
    }
}

pub fn clamp_pixel_ratio(dpr: f64) -> f64 {
    if dpr.is_finite() {
        dpr.clamp(MIN_PIXEL_RATIO, MAX_PIXEL_RATIO)
    } else {
        MIN_PIXEL_RATIO
    }
}
