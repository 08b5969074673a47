//! GLSL chunk library backing the `#include <name>` markers in the base
//! templates.

use crate::error::{BeamsError, Result};

pub(crate) const VERTEX_PREFIX: &str = "#version 300 es
precision highp float;
precision highp int;
#define attribute in
#define varying out
#define texture2D texture
uniform mat4 modelMatrix;
uniform mat4 modelViewMatrix;
uniform mat4 projectionMatrix;
uniform mat4 viewMatrix;
uniform mat3 normalMatrix;
uniform vec3 cameraPosition;
layout(location = 0) in vec3 position;
layout(location = 1) in vec3 normal;
layout(location = 2) in vec2 uv;
";

pub(crate) const FRAGMENT_PREFIX: &str = "#version 300 es
precision highp float;
precision highp int;
#define varying in
#define texture2D texture
layout(location = 0) out highp vec4 pc_fragColor;
#define gl_FragColor pc_fragColor
uniform mat4 viewMatrix;
uniform vec3 cameraPosition;
";

const COMMON: &str = "
#define PI 3.141592653589793
#define RECIPROCAL_PI 0.3183098861837907
#define EPSILON 1e-6
#define saturate( a ) clamp( a, 0.0, 1.0 )
float pow2( const in float x ) { return x * x; }
struct IncidentLight {
	vec3 color;
	vec3 direction;
};
struct ReflectedLight {
	vec3 directDiffuse;
	vec3 directSpecular;
	vec3 indirectDiffuse;
	vec3 indirectSpecular;
};
";

const NORMAL_PARS: &str = "varying vec3 vNormal;";

const BEGINNORMAL_VERTEX: &str = "vec3 objectNormal = vec3( normal );";

const DEFAULTNORMAL_VERTEX: &str = "vec3 transformedNormal = normalMatrix * objectNormal;";

const NORMAL_VERTEX: &str = "vNormal = normalize( transformedNormal );";

const BEGIN_VERTEX: &str = "vec3 transformed = vec3( position );";

const PROJECT_VERTEX: &str = "
vec4 mvPosition = vec4( transformed, 1.0 );
mvPosition = modelViewMatrix * mvPosition;
gl_Position = projectionMatrix * mvPosition;
";

const ROUGHNESSMAP_FRAGMENT: &str = "float roughnessFactor = roughness;";

const METALNESSMAP_FRAGMENT: &str = "float metalnessFactor = metalness;";

const NORMAL_FRAGMENT_BEGIN: &str = "vec3 normal = normalize( vNormal );";

// No normal map support; the marker exists so callers can take it over.
const NORMAL_FRAGMENT_MAPS: &str = "";

const EMISSIVEMAP_FRAGMENT: &str = "vec3 totalEmissiveRadiance = emissive;";

const LIGHTS_PARS_BEGIN: &str = "
uniform vec3 ambientLightColor;
uniform vec3 directionalLightColor;
uniform vec3 directionalLightDirection;
vec3 getAmbientLightIrradiance( const in vec3 irradiance ) {
	return irradiance;
}
";

const BSDFS: &str = "
vec3 BRDF_Lambert( const in vec3 diffuseColor ) {
	return RECIPROCAL_PI * diffuseColor;
}
vec3 F_Schlick( const in vec3 f0, const in float f90, const in float dotVH ) {
	float fresnel = exp2( ( - 5.55473 * dotVH - 6.98316 ) * dotVH );
	return f0 * ( 1.0 - fresnel ) + ( f90 * fresnel );
}
float V_GGX_SmithCorrelated( const in float alpha, const in float dotNL, const in float dotNV ) {
	float a2 = pow2( alpha );
	float gv = dotNL * sqrt( a2 + ( 1.0 - a2 ) * pow2( dotNV ) );
	float gl = dotNV * sqrt( a2 + ( 1.0 - a2 ) * pow2( dotNL ) );
	return 0.5 / max( gv + gl, EPSILON );
}
float D_GGX( const in float alpha, const in float dotNH ) {
	float a2 = pow2( alpha );
	float denom = pow2( dotNH ) * ( a2 - 1.0 ) + 1.0;
	return RECIPROCAL_PI * a2 / pow2( denom );
}
vec3 BRDF_GGX( const in vec3 lightDir, const in vec3 viewDir, const in vec3 surfaceNormal, const in vec3 f0, const in float f90, const in float alphaRoughness ) {
	float alpha = pow2( alphaRoughness );
	vec3 halfDir = normalize( lightDir + viewDir );
	float dotNL = saturate( dot( surfaceNormal, lightDir ) );
	float dotNV = saturate( dot( surfaceNormal, viewDir ) );
	float dotNH = saturate( dot( surfaceNormal, halfDir ) );
	float dotVH = saturate( dot( viewDir, halfDir ) );
	vec3 F = F_Schlick( f0, f90, dotVH );
	float V = V_GGX_SmithCorrelated( alpha, dotNL, dotNV );
	float D = D_GGX( alpha, dotNH );
	return F * ( V * D );
}
";

const PHYSICAL_PARS_FRAGMENT: &str = "
uniform float ior;
uniform float specularIntensity;
";

const LIGHTS_PHYSICAL_PARS_FRAGMENT: &str = "
struct PhysicalMaterial {
	vec3 diffuseColor;
	float roughness;
	vec3 specularColor;
	float specularF90;
};
void RE_Direct_Physical( const in IncidentLight directLight, const in vec3 geometryNormal, const in vec3 viewDir, const in PhysicalMaterial material, inout ReflectedLight reflectedLight ) {
	float dotNL = saturate( dot( geometryNormal, directLight.direction ) );
	vec3 irradiance = dotNL * directLight.color;
	reflectedLight.directSpecular += irradiance * BRDF_GGX( directLight.direction, viewDir, geometryNormal, material.specularColor, material.specularF90, material.roughness );
	reflectedLight.directDiffuse += irradiance * BRDF_Lambert( material.diffuseColor );
}
void RE_IndirectDiffuse_Physical( const in vec3 irradiance, const in PhysicalMaterial material, inout ReflectedLight reflectedLight ) {
	reflectedLight.indirectDiffuse += irradiance * BRDF_Lambert( material.diffuseColor );
}
#define RE_Direct RE_Direct_Physical
#define RE_IndirectDiffuse RE_IndirectDiffuse_Physical
";

const LIGHTS_PHYSICAL_FRAGMENT: &str = "
PhysicalMaterial material;
material.diffuseColor = diffuseColor.rgb * ( 1.0 - metalnessFactor );
material.roughness = clamp( roughnessFactor, 0.0525, 1.0 );
#ifdef PHYSICAL
	material.specularColor = mix( min( pow2( ( ior - 1.0 ) / ( ior + 1.0 ) ) * vec3( specularIntensity ), vec3( 1.0 ) ), diffuseColor.rgb, metalnessFactor );
#else
	material.specularColor = mix( vec3( 0.04 ), diffuseColor.rgb, metalnessFactor );
#endif
material.specularF90 = 1.0;
";

const LIGHTS_LAMBERT_PARS_FRAGMENT: &str = "
struct LambertMaterial {
	vec3 diffuseColor;
};
void RE_Direct_Lambert( const in IncidentLight directLight, const in vec3 geometryNormal, const in vec3 viewDir, const in LambertMaterial material, inout ReflectedLight reflectedLight ) {
	float dotNL = saturate( dot( geometryNormal, directLight.direction ) );
	vec3 irradiance = dotNL * directLight.color;
	reflectedLight.directDiffuse += irradiance * BRDF_Lambert( material.diffuseColor );
}
void RE_IndirectDiffuse_Lambert( const in vec3 irradiance, const in LambertMaterial material, inout ReflectedLight reflectedLight ) {
	reflectedLight.indirectDiffuse += irradiance * BRDF_Lambert( material.diffuseColor );
}
#define RE_Direct RE_Direct_Lambert
#define RE_IndirectDiffuse RE_IndirectDiffuse_Lambert
";

const LIGHTS_LAMBERT_FRAGMENT: &str = "
LambertMaterial material;
material.diffuseColor = diffuseColor.rgb;
";

const LIGHTS_FRAGMENT_BEGIN: &str = "
vec3 geometryNormal = normal;
vec3 geometryViewDir = normalize( vViewPosition );
IncidentLight directLight;
directLight.color = directionalLightColor;
directLight.direction = directionalLightDirection;
RE_Direct( directLight, geometryNormal, geometryViewDir, material, reflectedLight );
vec3 ambientIrradiance = getAmbientLightIrradiance( ambientLightColor );
RE_IndirectDiffuse( ambientIrradiance, material, reflectedLight );
";

const OPAQUE_FRAGMENT: &str = "gl_FragColor = vec4( outgoingLight, diffuseColor.a );";

const TONEMAPPING_PARS_FRAGMENT: &str = "
uniform float toneMappingExposure;
vec3 RRTAndODTFit( vec3 v ) {
	vec3 a = v * ( v + 0.0245786 ) - 0.000090537;
	vec3 b = v * ( 0.983729 * v + 0.4329510 ) + 0.238081;
	return a / b;
}
vec3 ACESFilmicToneMapping( vec3 color ) {
	const mat3 ACESInputMat = mat3(
		vec3( 0.59719, 0.07600, 0.02840 ),
		vec3( 0.35458, 0.90834, 0.13383 ),
		vec3( 0.04823, 0.01566, 0.83777 )
	);
	const mat3 ACESOutputMat = mat3(
		vec3(  1.60475, -0.10208, -0.00327 ),
		vec3( -0.53108,  1.10813, -0.07276 ),
		vec3( -0.07367, -0.00605,  1.07602 )
	);
	color *= toneMappingExposure / 0.6;
	color = ACESInputMat * color;
	color = RRTAndODTFit( color );
	color = ACESOutputMat * color;
	return saturate( color );
}
";

const TONEMAPPING_FRAGMENT: &str = "gl_FragColor.rgb = ACESFilmicToneMapping( gl_FragColor.rgb );";

const COLORSPACE_PARS_FRAGMENT: &str = "
vec4 sRGBTransferOETF( in vec4 value ) {
	return vec4( mix( pow( value.rgb, vec3( 0.41666 ) ) * 1.055 - vec3( 0.055 ), value.rgb * 12.92, vec3( lessThanEqual( value.rgb, vec3( 0.0031308 ) ) ) ), value.a );
}
";

const COLORSPACE_FRAGMENT: &str = "gl_FragColor = sRGBTransferOETF( gl_FragColor );";

pub fn shader_chunk(name: &str) -> Option<&'static str> {
    let chunk = match name {
        "common" => COMMON,
        "normal_pars_vertex" | "normal_pars_fragment" => NORMAL_PARS,
        "beginnormal_vertex" => BEGINNORMAL_VERTEX,
        "defaultnormal_vertex" => DEFAULTNORMAL_VERTEX,
        "normal_vertex" => NORMAL_VERTEX,
        "begin_vertex" => BEGIN_VERTEX,
        "project_vertex" => PROJECT_VERTEX,
        "roughnessmap_fragment" => ROUGHNESSMAP_FRAGMENT,
        "metalnessmap_fragment" => METALNESSMAP_FRAGMENT,
        "normal_fragment_begin" => NORMAL_FRAGMENT_BEGIN,
        "normal_fragment_maps" => NORMAL_FRAGMENT_MAPS,
        "emissivemap_fragment" => EMISSIVEMAP_FRAGMENT,
        "lights_pars_begin" => LIGHTS_PARS_BEGIN,
        "bsdfs" => BSDFS,
        "physical_pars_fragment" => PHYSICAL_PARS_FRAGMENT,
        "lights_physical_pars_fragment" => LIGHTS_PHYSICAL_PARS_FRAGMENT,
        "lights_physical_fragment" => LIGHTS_PHYSICAL_FRAGMENT,
        "lights_lambert_pars_fragment" => LIGHTS_LAMBERT_PARS_FRAGMENT,
        "lights_lambert_fragment" => LIGHTS_LAMBERT_FRAGMENT,
        "lights_fragment_begin" => LIGHTS_FRAGMENT_BEGIN,
        "opaque_fragment" => OPAQUE_FRAGMENT,
        "tonemapping_pars_fragment" => TONEMAPPING_PARS_FRAGMENT,
        "tonemapping_fragment" => TONEMAPPING_FRAGMENT,
        "colorspace_pars_fragment" => COLORSPACE_PARS_FRAGMENT,
        "colorspace_fragment" => COLORSPACE_FRAGMENT,
        _ => return None,
    };
    Some(chunk)
}

// Chunks are flat today; the bound only guards against a chunk that
// includes itself.
const MAX_INCLUDE_DEPTH: usize = 8;

/// Replace every `#include <name>` marker with its chunk text.
pub fn resolve_includes(source: &str) -> Result<String> {
    let mut current = source.to_string();
    for _ in 0..MAX_INCLUDE_DEPTH {
        if !current.contains("#include <") {
            return Ok(current);
        }
        current = resolve_once(&current)?;
    }
    Ok(current)
}

fn resolve_once(source: &str) -> Result<String> {
    let mut out = String::with_capacity(source.len() * 2);
    let mut rest = source;
    while let Some(start) = rest.find("#include <") {
        out.push_str(&rest[..start]);
        let after = &rest[start + "#include <".len()..];
        let end = after
            .find('>')
            .ok_or_else(|| BeamsError::UnknownChunk(after.lines().next().unwrap_or("").to_string()))?;
        let name = after[..end].trim();
        let chunk = shader_chunk(name).ok_or_else(|| BeamsError::UnknownChunk(name.to_string()))?;
        out.push_str(chunk);
        rest = &after[end + 1..];
    }
    out.push_str(rest);
    Ok(out)
}
