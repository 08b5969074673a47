//! Shader programs assembled from a base material template plus injected
//! code.

mod beam;
mod chunks;
mod composer;
mod program;
mod template;

pub use beam::beam_compose_config;
pub use chunks::{resolve_includes, shader_chunk};
pub use composer::{compose_displacement_shader, ComposeConfig, MaterialParams};
pub use program::{ShaderProgram, ShaderSources, UniformValue, Uniforms, BUILTIN_UNIFORMS};
pub use template::{BaseMaterial, ShaderTemplate};
