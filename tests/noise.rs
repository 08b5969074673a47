use beams_wasm::displacement::Displacement;
use beams_wasm::NoiseField;
use glam::Vec3;

#[test]
fn sampling_is_deterministic() {
    let field = NoiseField;
    let points = [
        Vec3::new(0.3, -1.7, 2.25),
        Vec3::new(12.5, 0.01, -8.0),
        Vec3::new(-0.5, 0.5, 0.5),
    ];
    for p in points {
        let a = field.sample(p);
        let b = NoiseField.sample(p);
        assert_eq!(a.to_bits(), b.to_bits());
    }
}

#[test]
fn values_stay_bounded_and_vary() {
    let field = NoiseField;
    let mut min = f32::MAX;
    let mut max = f32::MIN;
    for i in 0..500 {
        let f = i as f32;
        let v = field.sample(Vec3::new(f * 0.37, f * 0.11, f * 0.073));
        assert!(v.is_finite());
        assert!(v.abs() < 2.5, "noise {v} out of range");
        min = min.min(v);
        max = max.max(v);
    }
    assert!(max - min > 0.1);
}

#[test]
fn noise_ignores_x() {
    let d = Displacement {
        time: 1.3,
        speed: 2.0,
        noise_intensity: 1.75,
        scale: 0.2,
    };
    let a = d.noise_at(Vec3::new(-1.0, 2.0, 0.0), 0.4);
    let b = d.noise_at(Vec3::new(1.0, 2.0, 0.0), 0.4);
    assert_eq!(a, b);
}

#[test]
fn displacement_follows_the_normal() {
    let d = Displacement {
        time: 0.7,
        speed: 2.0,
        noise_intensity: 1.75,
        scale: 0.2,
    };
    let pos = Vec3::new(1.0, 3.0, 0.0);
    let moved = d.displaced(pos, Vec3::Z, 0.6);
    assert_eq!(moved.x, pos.x);
    assert_eq!(moved.y, pos.y);
    let expected = d.noise_at(pos, 0.6) * 1.75;
    assert!((moved.z - expected).abs() < 1e-6);
}

#[test]
fn flat_field_keeps_flat_normal() {
    let d = Displacement {
        time: 0.0,
        speed: 0.0,
        noise_intensity: 0.0,
        scale: 0.2,
    };
    let n = d.shading_normal(Vec3::new(0.0, 1.0, 0.0), Vec3::Z, 0.5);
    assert!((n - Vec3::Z).length() < 1e-5);
}

#[test]
fn shading_normal_is_unit_length() {
    let d = Displacement {
        time: 2.0,
        speed: 2.0,
        noise_intensity: 1.75,
        scale: 0.2,
    };
    for y in [-7.5f32, -2.0, 0.0, 3.3, 7.5] {
        let n = d.shading_normal(Vec3::new(0.5, y, 0.0), Vec3::Z, (y + 7.5) / 15.0);
        assert!((n.length() - 1.0).abs() < 1e-4);
        assert!(n.z > 0.0);
    }
}
