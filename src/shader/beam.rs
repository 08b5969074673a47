use std::collections::BTreeMap;

use super::composer::{ComposeConfig, MaterialParams};
use super::program::{UniformValue, Uniforms};
use crate::config::BeamsConfig;
use crate::noise::NOISE_GLSL;
use crate::scene::SceneRig;

const BEAM_UNIFORMS: &str = "
varying vec3 vEye;
varying float vNoise;
varying vec2 vUv;
varying vec3 vPosition;
uniform float time;
uniform float uSpeed;
uniform float uNoiseIntensity;
uniform float uScale;
";

const BEAM_VERTEX_HEADER: &str = "
float getPos(vec3 pos) {
  vec3 noisePos =
    vec3(pos.x * 0., pos.y - uv.y, pos.z + time * uSpeed * 3.) * uScale;
  return cnoise(noisePos);
}
vec3 getCurrentPos(vec3 pos) {
  float noise = getPos(pos);
  return pos + normal * noise * uNoiseIntensity;
}
vec3 getNormal(vec3 pos, vec3 tangent, vec3 bitangent) {
  float delta = 0.02;
  vec3 p1 = getCurrentPos(pos + tangent * delta) - getCurrentPos(pos);
  vec3 p2 = getCurrentPos(pos + bitangent * delta) - getCurrentPos(pos);
  return normalize(cross(p1, p2));
}
";

const BEAM_PROJECT_VERTEX: &str = "
  vec3 newPosition = getCurrentPos(position);
  vec3 tangent = vec3(1.0, 0.0, 0.0);
  vec3 bitangent = vec3(0.0, 1.0, 0.0);
  vec3 newNormal = getNormal(position, tangent, bitangent);
  vNormal = normalMatrix * newNormal;
  vNoise = getPos(position);
  vPosition = newPosition;
  vec4 mvPosition = modelViewMatrix * vec4(newPosition, 1.0);
  gl_Position = projectionMatrix * mvPosition;
  vUv = uv;
";

const ROUGHNESS: f32 = 0.3;
const METALNESS: f32 = 0.3;
const ENV_MAP_INTENSITY: f32 = 10.0;

/// Displacement setup for the beam strips: noise header, the replaced
/// `project_vertex` and a no-op `normal_fragment_maps`.
pub fn beam_compose_config(config: &BeamsConfig, rig: &SceneRig) -> ComposeConfig {
    let mut uniforms: Uniforms = rig.light_uniforms();
    let values = [
        ("time", 0.0),
        ("roughness", ROUGHNESS),
        ("metalness", METALNESS),
        ("envMapIntensity", ENV_MAP_INTENSITY),
        ("uSpeed", config.speed),
        ("uNoiseIntensity", config.noise_intensity),
        ("uScale", config.scale),
    ];
    for (name, value) in values {
        uniforms.insert(name.to_string(), UniformValue::Float(value));
    }

    let mut vertex = BTreeMap::new();
    vertex.insert("project_vertex".to_string(), BEAM_PROJECT_VERTEX.to_string());
    let mut fragment = BTreeMap::new();
    fragment.insert(
        "normal_fragment_maps".to_string(),
        "\n  // normals come from the vertex stage\n".to_string(),
    );

    ComposeConfig {
        header: format!("{BEAM_UNIFORMS}{NOISE_GLSL}"),
        vertex_header: Some(BEAM_VERTEX_HEADER.to_string()),
        fragment_header: None,
        material: MaterialParams {
            roughness: Some(ROUGHNESS),
            metalness: Some(METALNESS),
            env_map_intensity: Some(ENV_MAP_INTENSITY),
            fog: false,
        },
        uniforms,
        vertex,
        fragment,
    }
}
