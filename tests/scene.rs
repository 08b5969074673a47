use beams_wasm::color::Color;
use beams_wasm::scene::{clamp_pixel_ratio, Camera, SceneRig, LIGHT_POSITION};
use beams_wasm::shader::UniformValue;
use glam::{Vec3, Vec4};

fn approx_eq3(a: Vec3, b: Vec3, eps: f32) -> bool {
    (a - b).abs().max_element() < eps
}

fn project(rig: &SceneRig, aspect: f32, p: Vec3) -> Vec3 {
    let m = rig.matrices(aspect);
    let clip = m.projection * m.model_view * Vec4::new(p.x, p.y, p.z, 1.0);
    clip.truncate() / clip.w
}

#[test]
fn vertical_extent_is_aspect_invariant() {
    let rig = SceneRig::new(0.0, Color::WHITE);
    // Two different aspect ratios
    let wide = 1920.0 / 1080.0;
    let tall = 1080.0 / 1920.0;
    for y in [-5.0f32, -1.0, 0.0, 2.5, 4.0] {
        let a = project(&rig, wide, Vec3::new(0.0, y, 0.0));
        let b = project(&rig, tall, Vec3::new(0.0, y, 0.0));
        assert!((a.y - b.y).abs() < 1e-5, "a={a:?} b={b:?}");
    }
    // Horizontal extent shrinks as the viewport widens.
    let a = project(&rig, wide, Vec3::X);
    let b = project(&rig, tall, Vec3::X);
    assert!(a.x < b.x);
}

#[test]
fn origin_projects_to_centre() {
    let rig = SceneRig::new(37.0, Color::WHITE);
    let p = project(&rig, 1.5, Vec3::ZERO);
    assert!(p.x.abs() < 1e-6 && p.y.abs() < 1e-6);
}

#[test]
fn rotation_turns_strips_about_the_view_axis() {
    let rig = SceneRig::new(90.0, Color::WHITE);
    let up = rig.model().transform_point3(Vec3::Y);
    assert!(approx_eq3(up, -Vec3::X, 1e-6));
}

#[test]
fn light_rides_the_group_rotation() {
    let still = SceneRig::new(0.0, Color::WHITE);
    let dir = still.light_direction_view();
    assert!(approx_eq3(dir, LIGHT_POSITION.normalize(), 1e-5));

    let turned = SceneRig::new(180.0, Color::WHITE);
    let dir = turned.light_direction_view();
    let expected = Vec3::new(0.0, -3.0, 10.0).normalize();
    assert!(approx_eq3(dir, expected, 1e-5));
}

#[test]
fn light_uniforms_are_linear() {
    let rig = SceneRig::new(0.0, Color::from_hex("#c6f135").unwrap());
    let u = rig.light_uniforms();
    let Some(UniformValue::Vec3(color)) = u.get("directionalLightColor") else {
        panic!("missing light color");
    };
    // sRGB 0xc6 is about 0.565 linear.
    assert!((color.x - 0.565).abs() < 0.01);
    assert!(matches!(u.get("ambientLightColor"), Some(UniformValue::Vec3(_))));
    assert!(matches!(u.get("directionalLightDirection"), Some(UniformValue::Vec3(_))));
}

#[test]
fn degenerate_aspect_falls_back_to_square() {
    let camera = Camera::default();
    assert_eq!(camera.projection(0.0), camera.projection(1.0));
    assert_eq!(camera.projection(f32::NAN), camera.projection(1.0));
}

#[test]
fn pixel_ratio_is_clamped() {
    assert_eq!(clamp_pixel_ratio(0.5), 1.0);
    assert_eq!(clamp_pixel_ratio(1.5), 1.5);
    assert_eq!(clamp_pixel_ratio(3.0), 2.0);
    assert_eq!(clamp_pixel_ratio(f64::NAN), 1.0);
}
