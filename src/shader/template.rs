use glam::Vec3;

use super::program::{UniformValue, Uniforms};

/// The base materials the composer knows how to extend.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum BaseMaterial {
    #[default]
    Standard,
    Physical,
    Lambert,
    Basic,
}

impl BaseMaterial {
    /// Map a material type name (`"MeshStandardMaterial"`, `"standard"`, ...)
    /// to a template. Names with no template get [`BaseMaterial::Standard`].
    pub fn from_type_name(name: &str) -> Self {
        let key = name
            .trim()
            .trim_end_matches("Material")
            .trim_start_matches("Mesh")
            .to_ascii_lowercase();
        match key.as_str() {
            "standard" => BaseMaterial::Standard,
            "physical" => BaseMaterial::Physical,
            "lambert" => BaseMaterial::Lambert,
            "basic" => BaseMaterial::Basic,
            _ => {
                log::debug!("no shader template for material `{name}`, using standard");
                BaseMaterial::Standard
            }
        }
    }

    pub fn template(self) -> ShaderTemplate {
        match self {
            BaseMaterial::Standard => ShaderTemplate {
                vertex: MESH_LIT_VERT,
                fragment: MESH_STANDARD_FRAG,
                defines: &[("STANDARD", "")],
                lights: true,
            },
            BaseMaterial::Physical => ShaderTemplate {
                vertex: MESH_LIT_VERT,
                fragment: MESH_PHYSICAL_FRAG,
                defines: &[("STANDARD", ""), ("PHYSICAL", "")],
                lights: true,
            },
            BaseMaterial::Lambert => ShaderTemplate {
                vertex: MESH_LIT_VERT,
                fragment: MESH_LAMBERT_FRAG,
                defines: &[("LAMBERT", "")],
                lights: true,
            },
            BaseMaterial::Basic => ShaderTemplate {
                vertex: MESH_BASIC_VERT,
                fragment: MESH_BASIC_FRAG,
                defines: &[],
                lights: false,
            },
        }
    }

    /// Fresh copy of the uniform set the template declares, at its defaults.
    pub fn default_uniforms(self) -> Uniforms {
        let mut u = Uniforms::new();
        u.insert("diffuse".into(), UniformValue::Vec3(Vec3::ONE));
        u.insert("opacity".into(), UniformValue::Float(1.0));
        u.insert("toneMappingExposure".into(), UniformValue::Float(1.0));
        if self == BaseMaterial::Basic {
            return u;
        }

        u.insert("emissive".into(), UniformValue::Vec3(Vec3::ZERO));
        u.insert("ambientLightColor".into(), UniformValue::Vec3(Vec3::ZERO));
        u.insert("directionalLightColor".into(), UniformValue::Vec3(Vec3::ZERO));
        u.insert("directionalLightDirection".into(), UniformValue::Vec3(Vec3::Z));
        if matches!(self, BaseMaterial::Standard | BaseMaterial::Physical) {
            u.insert("roughness".into(), UniformValue::Float(1.0));
            u.insert("metalness".into(), UniformValue::Float(0.0));
            u.insert("envMapIntensity".into(), UniformValue::Float(1.0));
        }
        if self == BaseMaterial::Physical {
            u.insert("ior".into(), UniformValue::Float(1.5));
            u.insert("specularIntensity".into(), UniformValue::Float(1.0));
        }
        u
    }
}

impl From<&str> for BaseMaterial {
    fn from(name: &str) -> Self {
        BaseMaterial::from_type_name(name)
    }
}

/// Static source text of a base material.
#[derive(Clone, Copy, Debug)]
pub struct ShaderTemplate {
    pub vertex: &'static str,
    pub fragment: &'static str,
    pub defines: &'static [(&'static str, &'static str)],
    pub lights: bool,
}

const MESH_LIT_VERT: &str = "
varying vec3 vViewPosition;
#include <common>
#include <normal_pars_vertex>
void main() {
	#include <beginnormal_vertex>
	#include <defaultnormal_vertex>
	#include <normal_vertex>
	#include <begin_vertex>
	#include <project_vertex>
	vViewPosition = - mvPosition.xyz;
}
";

const MESH_BASIC_VERT: &str = "
#include <common>
#include <normal_pars_vertex>
void main() {
	#include <beginnormal_vertex>
	#include <defaultnormal_vertex>
	#include <normal_vertex>
	#include <begin_vertex>
	#include <project_vertex>
}
";

const MESH_STANDARD_FRAG: &str = "
uniform vec3 diffuse;
uniform vec3 emissive;
uniform float roughness;
uniform float metalness;
uniform float opacity;
varying vec3 vViewPosition;
#include <common>
#include <normal_pars_fragment>
#include <bsdfs>
#include <lights_pars_begin>
#include <lights_physical_pars_fragment>
#include <tonemapping_pars_fragment>
#include <colorspace_pars_fragment>
void main() {
	vec4 diffuseColor = vec4( diffuse, opacity );
	ReflectedLight reflectedLight = ReflectedLight( vec3( 0.0 ), vec3( 0.0 ), vec3( 0.0 ), vec3( 0.0 ) );
	#include <emissivemap_fragment>
	#include <roughnessmap_fragment>
	#include <metalnessmap_fragment>
	#include <normal_fragment_begin>
	#include <normal_fragment_maps>
	#include <lights_physical_fragment>
	#include <lights_fragment_begin>
	vec3 outgoingLight = reflectedLight.directDiffuse + reflectedLight.indirectDiffuse + reflectedLight.directSpecular + reflectedLight.indirectSpecular + totalEmissiveRadiance;
	#include <opaque_fragment>
	#include <tonemapping_fragment>
	#include <colorspace_fragment>
}
";

const MESH_PHYSICAL_FRAG: &str = "
uniform vec3 diffuse;
uniform vec3 emissive;
uniform float roughness;
uniform float metalness;
uniform float opacity;
#include <physical_pars_fragment>
varying vec3 vViewPosition;
#include <common>
#include <normal_pars_fragment>
#include <bsdfs>
#include <lights_pars_begin>
#include <lights_physical_pars_fragment>
#include <tonemapping_pars_fragment>
#include <colorspace_pars_fragment>
void main() {
	vec4 diffuseColor = vec4( diffuse, opacity );
	ReflectedLight reflectedLight = ReflectedLight( vec3( 0.0 ), vec3( 0.0 ), vec3( 0.0 ), vec3( 0.0 ) );
	#include <emissivemap_fragment>
	#include <roughnessmap_fragment>
	#include <metalnessmap_fragment>
	#include <normal_fragment_begin>
	#include <normal_fragment_maps>
	#include <lights_physical_fragment>
	#include <lights_fragment_begin>
	vec3 outgoingLight = reflectedLight.directDiffuse + reflectedLight.indirectDiffuse + reflectedLight.directSpecular + reflectedLight.indirectSpecular + totalEmissiveRadiance;
	#include <opaque_fragment>
	#include <tonemapping_fragment>
	#include <colorspace_fragment>
}
";

const MESH_LAMBERT_FRAG: &str = "
uniform vec3 diffuse;
uniform vec3 emissive;
uniform float opacity;
varying vec3 vViewPosition;
#include <common>
#include <normal_pars_fragment>
#include <bsdfs>
#include <lights_pars_begin>
#include <lights_lambert_pars_fragment>
#include <tonemapping_pars_fragment>
#include <colorspace_pars_fragment>
void main() {
	vec4 diffuseColor = vec4( diffuse, opacity );
	ReflectedLight reflectedLight = ReflectedLight( vec3( 0.0 ), vec3( 0.0 ), vec3( 0.0 ), vec3( 0.0 ) );
	#include <emissivemap_fragment>
	#include <normal_fragment_begin>
	#include <normal_fragment_maps>
	#include <lights_lambert_fragment>
	#include <lights_fragment_begin>
	vec3 outgoingLight = reflectedLight.directDiffuse + reflectedLight.indirectDiffuse + totalEmissiveRadiance;
	#include <opaque_fragment>
	#include <tonemapping_fragment>
	#include <colorspace_fragment>
}
";

const MESH_BASIC_FRAG: &str = "
uniform vec3 diffuse;
uniform float opacity;
#include <common>
#include <normal_pars_fragment>
#include <tonemapping_pars_fragment>
#include <colorspace_pars_fragment>
void main() {
	vec4 diffuseColor = vec4( diffuse, opacity );
	vec3 outgoingLight = diffuseColor.rgb;
	#include <opaque_fragment>
	#include <tonemapping_fragment>
	#include <colorspace_fragment>
}
";
