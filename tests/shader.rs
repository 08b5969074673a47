use std::collections::BTreeMap;

use beams_wasm::config::BeamsConfig;
use beams_wasm::scene::SceneRig;
use beams_wasm::shader::{
    beam_compose_config, compose_displacement_shader, BaseMaterial, ComposeConfig,
    MaterialParams, UniformValue,
};
use beams_wasm::{BeamField, BeamsError};

fn beam_config() -> ComposeConfig {
    let config = BeamsConfig::default();
    let rig = SceneRig::new(config.rotation, config.light().unwrap());
    beam_compose_config(&config, &rig)
}

#[test]
fn caller_uniforms_win_over_defaults() {
    let mut cfg = ComposeConfig {
        material: MaterialParams {
            roughness: Some(0.9),
            ..MaterialParams::default()
        },
        ..ComposeConfig::default()
    };
    cfg.uniforms.insert("roughness".into(), UniformValue::Float(0.25));
    cfg.uniforms.insert("time".into(), UniformValue::Float(3.0));

    let program = compose_displacement_shader(BaseMaterial::Standard, &cfg);
    assert_eq!(program.uniform("roughness"), Some(&UniformValue::Float(0.25)));
    assert_eq!(program.time(), Some(3.0));
    // Untouched template defaults survive the merge.
    assert_eq!(program.uniform("metalness"), Some(&UniformValue::Float(0.0)));
}

#[test]
fn material_params_override_template_defaults() {
    let cfg = ComposeConfig {
        material: MaterialParams {
            metalness: Some(0.3),
            env_map_intensity: Some(10.0),
            ..MaterialParams::default()
        },
        ..ComposeConfig::default()
    };
    let program = compose_displacement_shader(BaseMaterial::Standard, &cfg);
    assert_eq!(program.uniform("metalness"), Some(&UniformValue::Float(0.3)));
    assert_eq!(program.uniform("envMapIntensity"), Some(&UniformValue::Float(10.0)));
}

#[test]
fn absent_marker_leaves_source_untouched() {
    let plain = compose_displacement_shader(BaseMaterial::Standard, &ComposeConfig::default());

    let mut vertex = BTreeMap::new();
    vertex.insert("no_such_marker".to_string(), "float broken = 1.0;".to_string());
    let mut fragment = BTreeMap::new();
    fragment.insert("also_missing".to_string(), "discard;".to_string());
    let cfg = ComposeConfig {
        vertex,
        fragment,
        ..ComposeConfig::default()
    };
    let injected = compose_displacement_shader(BaseMaterial::Standard, &cfg);

    assert_eq!(injected.vertex_shader, plain.vertex_shader);
    assert_eq!(injected.fragment_shader, plain.fragment_shader);
}

#[test]
fn present_marker_is_replaced_once() {
    let mut vertex = BTreeMap::new();
    vertex.insert("begin_vertex".to_string(), "vec3 transformed = position * 2.0;".to_string());
    let cfg = ComposeConfig {
        vertex,
        ..ComposeConfig::default()
    };
    let program = compose_displacement_shader(BaseMaterial::Lambert, &cfg);
    assert!(!program.vertex_shader.contains("#include <begin_vertex>"));
    assert_eq!(program.vertex_shader.matches("position * 2.0").count(), 1);
    assert!(program.vertex_shader.contains("#include <project_vertex>"));
}

#[test]
fn headers_are_prepended_to_each_stage() {
    let cfg = ComposeConfig {
        header: "// shared".to_string(),
        vertex_header: Some("// vertex only".to_string()),
        fragment_header: Some("// fragment only".to_string()),
        ..ComposeConfig::default()
    };
    let program = compose_displacement_shader(BaseMaterial::Basic, &cfg);
    assert!(program.vertex_shader.starts_with("// shared\n// vertex only\n"));
    assert!(program.fragment_shader.starts_with("// shared\n// fragment only\n"));
    assert!(!program.vertex_shader.contains("fragment only"));
}

#[test]
fn unknown_material_falls_back_to_standard() {
    assert_eq!(BaseMaterial::from_type_name("MeshToonMaterial"), BaseMaterial::Standard);
    assert_eq!(BaseMaterial::from_type_name("MeshStandardMaterial"), BaseMaterial::Standard);
    assert_eq!(BaseMaterial::from_type_name("MeshPhysicalMaterial"), BaseMaterial::Physical);
    assert_eq!(BaseMaterial::from_type_name("lambert"), BaseMaterial::Lambert);

    let cfg = beam_config();
    let fallback = compose_displacement_shader("MeshToonMaterial", &cfg);
    let standard = compose_displacement_shader(BaseMaterial::Standard, &cfg);
    assert_eq!(fallback, standard);
}

#[test]
fn composition_does_not_touch_the_template() {
    let before = BaseMaterial::Standard.template().vertex;
    let _ = compose_displacement_shader(BaseMaterial::Standard, &beam_config());
    assert_eq!(BaseMaterial::Standard.template().vertex, before);
    assert!(before.contains("#include <project_vertex>"));
}

#[test]
fn beam_program_replaces_projection_and_normal_maps() {
    let program = compose_displacement_shader(BaseMaterial::Standard, &beam_config());
    assert!(program.vertex_shader.contains("getCurrentPos(position)"));
    assert!(!program.vertex_shader.contains("#include <project_vertex>"));
    assert!(!program.fragment_shader.contains("#include <normal_fragment_maps>"));
    assert!(program.fragment_shader.contains("float cnoise(vec3 P)"));
    assert_eq!(program.time(), Some(0.0));
    assert_eq!(program.uniform("uSpeed"), Some(&UniformValue::Float(2.0)));
    assert_eq!(program.uniform("uNoiseIntensity"), Some(&UniformValue::Float(1.75)));
    assert_eq!(program.uniform("uScale"), Some(&UniformValue::Float(0.2)));
    assert_eq!(program.uniform("roughness"), Some(&UniformValue::Float(0.3)));
}

#[test]
fn every_lit_template_builds_with_the_beam_config() {
    let cfg = beam_config();
    for base in [
        BaseMaterial::Standard,
        BaseMaterial::Physical,
        BaseMaterial::Lambert,
        BaseMaterial::Basic,
    ] {
        let program = compose_displacement_shader(base, &cfg);
        program.check_uniforms().unwrap();
        let sources = program.build_sources().unwrap();
        assert!(sources.vertex.starts_with("#version 300 es\n"));
        assert!(sources.fragment.starts_with("#version 300 es\n"));
        assert!(!sources.vertex.contains("#include"));
        assert!(!sources.fragment.contains("#include"));
    }
}

#[test]
fn defines_and_lights_reach_the_prefix() {
    let program = compose_displacement_shader(BaseMaterial::Physical, &beam_config());
    let sources = program.build_sources().unwrap();
    assert!(sources.fragment.contains("#define PHYSICAL"));
    assert!(sources.fragment.contains("#define STANDARD"));
    assert!(sources.fragment.contains("#define NUM_DIR_LIGHTS 1"));
    assert!(!sources.fragment.contains("#define USE_FOG"));
}

#[test]
fn undeclared_uniform_value_is_reported() {
    let cfg = ComposeConfig {
        header: "uniform float uMissing;".to_string(),
        ..ComposeConfig::default()
    };
    let program = compose_displacement_shader(BaseMaterial::Basic, &cfg);
    let err = program.check_uniforms().unwrap_err();
    assert!(matches!(err, BeamsError::MissingUniform(name) if name == "uMissing"));
}

#[test]
fn beam_field_mounts_from_defaults() {
    let field = BeamField::new(BeamsConfig::default()).unwrap();
    assert_eq!(field.geometry.count(), 12);
    assert_eq!(field.geometry.height_segments(), 100);
    assert_eq!(field.geometry.vertex_count(), 12 * 101 * 2);
    assert_eq!(field.program.time(), Some(0.0));
}
