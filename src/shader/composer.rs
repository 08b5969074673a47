use std::collections::BTreeMap;

use super::program::{ShaderProgram, UniformValue, Uniforms};
use super::template::BaseMaterial;

/// Surface parameters forwarded into the base material's uniforms.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct MaterialParams {
    pub roughness: Option<f32>,
    pub metalness: Option<f32>,
    pub env_map_intensity: Option<f32>,
    pub fog: bool,
}

impl MaterialParams {
    fn apply(&self, uniforms: &mut Uniforms) {
        let params = [
            ("roughness", self.roughness),
            ("metalness", self.metalness),
            ("envMapIntensity", self.env_map_intensity),
        ];
        for (name, value) in params {
            if let Some(v) = value {
                uniforms.insert(name.to_string(), UniformValue::Float(v));
            }
        }
    }
}

/// What to splice into a base material.
///
/// `vertex` and `fragment` map an injection marker name (the `name` in
/// `#include <name>`) to the code that replaces it.
#[derive(Clone, Debug, Default)]
pub struct ComposeConfig {
    pub header: String,
    pub vertex_header: Option<String>,
    pub fragment_header: Option<String>,
    pub material: MaterialParams,
    pub uniforms: Uniforms,
    pub vertex: BTreeMap<String, String>,
    pub fragment: BTreeMap<String, String>,
}

/// Build a new program from `base` with the config's header and injections.
///
/// Uniforms are the template's defaults, then material params, then the
/// config's own uniforms; later entries win. Injections whose marker is not in
/// the base source are skipped.
pub fn compose_displacement_shader(
    base: impl Into<BaseMaterial>,
    config: &ComposeConfig,
) -> ShaderProgram {
    let base = base.into();
    let template = base.template();

    let mut uniforms = base.default_uniforms();
    config.material.apply(&mut uniforms);
    for (name, value) in &config.uniforms {
        uniforms.insert(name.clone(), *value);
    }

    let mut vertex_shader = format!(
        "{}\n{}\n{}",
        config.header,
        config.vertex_header.as_deref().unwrap_or(""),
        template.vertex
    );
    let mut fragment_shader = format!(
        "{}\n{}\n{}",
        config.header,
        config.fragment_header.as_deref().unwrap_or(""),
        template.fragment
    );

    inject(&mut vertex_shader, &config.vertex, "vertex");
    inject(&mut fragment_shader, &config.fragment, "fragment");

    ShaderProgram {
        vertex_shader,
        fragment_shader,
        uniforms,
        defines: template
            .defines
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect(),
        lights: template.lights,
        fog: config.material.fog,
    }
}

fn inject(source: &mut String, injections: &BTreeMap<String, String>, stage: &str) {
    for (marker, code) in injections {
        let token = format!("#include <{marker}>");
        if source.contains(&token) {
            *source = source.replacen(&token, code, 1);
        } else {
            log::debug!("{stage} marker <{marker}> not present, skipping injection");
        }
    }
}
