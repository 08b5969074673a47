use std::collections::BTreeMap;

use glam::{Mat3, Mat4, Vec2, Vec3};

use super::chunks::{resolve_includes, FRAGMENT_PREFIX, VERTEX_PREFIX};
use crate::error::{BeamsError, Result};

/// A value bound to a named shader uniform.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum UniformValue {
    Float(f32),
    Int(i32),
    Vec2(Vec2),
    Vec3(Vec3),
    Mat3(Mat3),
    Mat4(Mat4),
}

impl From<f32> for UniformValue {
    fn from(v: f32) -> Self {
        UniformValue::Float(v)
    }
}

impl From<i32> for UniformValue {
    fn from(v: i32) -> Self {
        UniformValue::Int(v)
    }
}

impl From<Vec3> for UniformValue {
    fn from(v: Vec3) -> Self {
        UniformValue::Vec3(v)
    }
}

impl From<Mat4> for UniformValue {
    fn from(v: Mat4) -> Self {
        UniformValue::Mat4(v)
    }
}

pub type Uniforms = BTreeMap<String, UniformValue>;

/// Uniforms declared by the program prefix and written by the renderer every
/// draw. They never appear in [`ShaderProgram::uniforms`].
pub const BUILTIN_UNIFORMS: &[&str] = &[
    "modelMatrix",
    "modelViewMatrix",
    "projectionMatrix",
    "viewMatrix",
    "normalMatrix",
    "cameraPosition",
];

/// Vertex/fragment source pair plus the uniform values it runs with.
///
/// Sources still carry any `#include <..>` markers that were not replaced
/// during composition; they are resolved against the chunk library when the
/// program is built for the GPU.
#[derive(Clone, Debug, PartialEq)]
pub struct ShaderProgram {
    pub vertex_shader: String,
    pub fragment_shader: String,
    pub uniforms: Uniforms,
    pub defines: BTreeMap<String, String>,
    pub lights: bool,
    pub fog: bool,
}

/// Final GLSL ES 3.00 text handed to the GL compiler.
#[derive(Clone, Debug)]
pub struct ShaderSources {
    pub vertex: String,
    pub fragment: String,
}

impl ShaderProgram {
    pub fn uniform(&self, name: &str) -> Option<&UniformValue> {
        self.uniforms.get(name)
    }

    pub fn uniform_mut(&mut self, name: &str) -> Option<&mut UniformValue> {
        self.uniforms.get_mut(name)
    }

    pub fn time(&self) -> Option<f32> {
        match self.uniforms.get("time") {
            Some(UniformValue::Float(t)) => Some(*t),
            _ => None,
        }
    }

    /// Resolve includes, check uniforms and prepend the GLSL ES 3.00 prefix.
    pub fn build_sources(&self) -> Result<ShaderSources> {
        let vertex = resolve_includes(&self.vertex_shader)?;
        let fragment = resolve_includes(&self.fragment_shader)?;
        self.check_declarations(&vertex)?;
        self.check_declarations(&fragment)?;

        let defines = self.define_block();
        Ok(ShaderSources {
            vertex: format!("{VERTEX_PREFIX}{defines}\n{vertex}"),
            fragment: format!("{FRAGMENT_PREFIX}{defines}\n{fragment}"),
        })
    }

    /// Every uniform the resolved sources declare must have a value.
    pub fn check_uniforms(&self) -> Result<()> {
        self.check_declarations(&resolve_includes(&self.vertex_shader)?)?;
        self.check_declarations(&resolve_includes(&self.fragment_shader)?)
    }

    fn check_declarations(&self, source: &str) -> Result<()> {
        for name in declared_uniforms(source) {
            if !self.uniforms.contains_key(name) && !BUILTIN_UNIFORMS.contains(&name) {
                return Err(BeamsError::MissingUniform(name.to_string()));
            }
        }
        Ok(())
    }

    fn define_block(&self) -> String {
        let mut block = String::new();
        for (key, value) in &self.defines {
            block.push_str(&format!("#define {key} {value}\n"));
        }
        if self.lights {
            block.push_str("#define NUM_DIR_LIGHTS 1\n");
        }
        if self.fog {
            block.push_str("#define USE_FOG\n");
        }
        block
    }
}

/// Names of uniforms declared at the start of a line, e.g.
/// `uniform highp float time;`.
pub(crate) fn declared_uniforms(source: &str) -> Vec<&str> {
    let mut names = Vec::new();
    for line in source.lines() {
        let mut tokens = line.split_whitespace();
        if tokens.next() != Some("uniform") {
            continue;
        }
        let mut tokens = tokens.skip_while(|t| matches!(*t, "lowp" | "mediump" | "highp"));
        let _ty = tokens.next();
        if let Some(raw) = tokens.next() {
            let name = raw.trim_end_matches(';');
            let name = name.split('[').next().unwrap_or(name);
            if !name.is_empty() {
                names.push(name);
            }
        }
    }
    names
}
