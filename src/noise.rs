//! Classic 3D gradient noise, evaluated on the CPU.
//!
//! The same function ships to the GPU as GLSL (`NOISE_GLSL`); the Rust side
//! follows it step for step so displacement can be sampled without a GL
//! context.

use glam::{Vec3, Vec4};

/// Stateless gradient noise field.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoiseField;

impl NoiseField {
    pub fn sample(&self, p: Vec3) -> f32 {
        cnoise(p)
    }
}

fn mod289(x: Vec4) -> Vec4 {
    x - (x / 289.0).floor() * 289.0
}

fn mod289_3(x: Vec3) -> Vec3 {
    x - (x / 289.0).floor() * 289.0
}

fn permute(x: Vec4) -> Vec4 {
    mod289((x * 34.0 + Vec4::ONE) * x)
}

fn taylor_inv_sqrt(r: Vec4) -> Vec4 {
    Vec4::splat(1.79284291400159) - r * 0.85373472095314
}

fn fade(t: Vec3) -> Vec3 {
    t * t * t * (t * (t * 6.0 - Vec3::splat(15.0)) + Vec3::splat(10.0))
}

fn fract4(x: Vec4) -> Vec4 {
    x - x.floor()
}

// GLSL `step(edge, x)`: 0 where x < edge, else 1.
fn step4(edge: Vec4, x: Vec4) -> Vec4 {
    Vec4::select(x.cmplt(edge), Vec4::ZERO, Vec4::ONE)
}

/// Gradient components for one z layer of the lattice cell.
fn gradients(ixy: Vec4) -> (Vec4, Vec4, Vec4) {
    let mut gx = ixy / 7.0;
    let mut gy = fract4((gx).floor() / 7.0) - Vec4::splat(0.5);
    gx = fract4(gx);
    let gz = Vec4::splat(0.5) - gx.abs() - gy.abs();
    let sz = step4(gz, Vec4::ZERO);
    gx -= sz * (step4(Vec4::ZERO, gx) - Vec4::splat(0.5));
    gy -= sz * (step4(Vec4::ZERO, gy) - Vec4::splat(0.5));
    (gx, gy, gz)
}

fn cnoise(p: Vec3) -> f32 {
    let pi0 = mod289_3(p.floor());
    let pi1 = mod289_3(p.floor() + Vec3::ONE);
    let pf0 = p - p.floor();
    let pf1 = pf0 - Vec3::ONE;

    let ix = Vec4::new(pi0.x, pi1.x, pi0.x, pi1.x);
    let iy = Vec4::new(pi0.y, pi0.y, pi1.y, pi1.y);
    let iz0 = Vec4::splat(pi0.z);
    let iz1 = Vec4::splat(pi1.z);

    let ixy = permute(permute(ix) + iy);
    let ixy0 = permute(ixy + iz0);
    let ixy1 = permute(ixy + iz1);

    let (gx0, gy0, gz0) = gradients(ixy0);
    let (gx1, gy1, gz1) = gradients(ixy1);

    let mut g000 = Vec3::new(gx0.x, gy0.x, gz0.x);
    let mut g100 = Vec3::new(gx0.y, gy0.y, gz0.y);
    let mut g010 = Vec3::new(gx0.z, gy0.z, gz0.z);
    let mut g110 = Vec3::new(gx0.w, gy0.w, gz0.w);
    let mut g001 = Vec3::new(gx1.x, gy1.x, gz1.x);
    let mut g101 = Vec3::new(gx1.y, gy1.y, gz1.y);
    let mut g011 = Vec3::new(gx1.z, gy1.z, gz1.z);
    let mut g111 = Vec3::new(gx1.w, gy1.w, gz1.w);

    let norm0 = taylor_inv_sqrt(Vec4::new(
        g000.dot(g000),
        g010.dot(g010),
        g100.dot(g100),
        g110.dot(g110),
    ));
    g000 *= norm0.x;
    g010 *= norm0.y;
    g100 *= norm0.z;
    g110 *= norm0.w;
    let norm1 = taylor_inv_sqrt(Vec4::new(
        g001.dot(g001),
        g011.dot(g011),
        g101.dot(g101),
        g111.dot(g111),
    ));
    g001 *= norm1.x;
    g011 *= norm1.y;
    g101 *= norm1.z;
    g111 *= norm1.w;

    let n000 = g000.dot(pf0);
    let n100 = g100.dot(Vec3::new(pf1.x, pf0.y, pf0.z));
    let n010 = g010.dot(Vec3::new(pf0.x, pf1.y, pf0.z));
    let n110 = g110.dot(Vec3::new(pf1.x, pf1.y, pf0.z));
    let n001 = g001.dot(Vec3::new(pf0.x, pf0.y, pf1.z));
    let n101 = g101.dot(Vec3::new(pf1.x, pf0.y, pf1.z));
    let n011 = g011.dot(Vec3::new(pf0.x, pf1.y, pf1.z));
    let n111 = g111.dot(pf1);

    let f = fade(pf0);
    let n_z = Vec4::new(n000, n100, n010, n110).lerp(Vec4::new(n001, n101, n011, n111), f.z);
    let n_yz_x = n_z.x + (n_z.z - n_z.x) * f.y;
    let n_yz_y = n_z.y + (n_z.w - n_z.y) * f.y;
    let n_xyz = n_yz_x + (n_yz_y - n_yz_x) * f.x;
    2.2 * n_xyz
}

/// GLSL twin of [`NoiseField::sample`], exposed to shaders as `cnoise`.
pub const NOISE_GLSL: &str = r#"
vec4 permute(vec4 x){return mod(((x*34.0)+1.0)*x, 289.0);}
vec4 taylorInvSqrt(vec4 r){return 1.79284291400159 - 0.85373472095314 * r;}
vec3 fade(vec3 t) {return t*t*t*(t*(t*6.0-15.0)+10.0);}
float cnoise(vec3 P){
  vec3 Pi0 = floor(P);
  vec3 Pi1 = Pi0 + vec3(1.0);
  Pi0 = mod(Pi0, 289.0);
  Pi1 = mod(Pi1, 289.0);
  vec3 Pf0 = fract(P);
  vec3 Pf1 = Pf0 - vec3(1.0);
  vec4 ix = vec4(Pi0.x,Pi1.x,Pi0.x,Pi1.x);
  vec4 iy = vec4(Pi0.yy,Pi1.yy);
  vec4 iz0 = Pi0.zzzz;
  vec4 iz1 = Pi1.zzzz;
  vec4 ixy = permute(permute(ix)+iy);
  vec4 ixy0 = permute(ixy+iz0);
  vec4 ixy1 = permute(ixy+iz1);
  vec4 gx0 = ixy0 / 7.0;
  vec4 gy0 = fract(floor(gx0) / 7.0) - 0.5;
  gx0 = fract(gx0);
  vec4 gz0 = vec4(0.5) - abs(gx0) - abs(gy0);
  vec4 sz0 = step(gz0, vec4(0.0));
  gx0 -= sz0 * (step(0.0, gx0) - 0.5);
  gy0 -= sz0 * (step(0.0, gy0) - 0.5);
  vec4 gx1 = ixy1 / 7.0;
  vec4 gy1 = fract(floor(gx1) / 7.0) - 0.5;
  gx1 = fract(gx1);
  vec4 gz1 = vec4(0.5) - abs(gx1) - abs(gy1);
  vec4 sz1 = step(gz1, vec4(0.0));
  gx1 -= sz1 * (step(0.0, gx1) - 0.5);
  gy1 -= sz1 * (step(0.0, gy1) - 0.5);
  vec3 g000 = vec3(gx0.x,gy0.x,gz0.x);
  vec3 g100 = vec3(gx0.y,gy0.y,gz0.y);
  vec3 g010 = vec3(gx0.z,gy0.z,gz0.z);
  vec3 g110 = vec3(gx0.w,gy0.w,gz0.w);
  vec3 g001 = vec3(gx1.x,gy1.x,gz1.x);
  vec3 g101 = vec3(gx1.y,gy1.y,gz1.y);
  vec3 g011 = vec3(gx1.z,gy1.z,gz1.z);
  vec3 g111 = vec3(gx1.w,gy1.w,gz1.w);
  vec4 norm0 = taylorInvSqrt(vec4(dot(g000,g000),dot(g010,g010),dot(g100,g100),dot(g110,g110)));
  g000 *= norm0.x;
  g010 *= norm0.y;
  g100 *= norm0.z;
  g110 *= norm0.w;
  vec4 norm1 = taylorInvSqrt(vec4(dot(g001,g001),dot(g011,g011),dot(g101,g101),dot(g111,g111)));
  g001 *= norm1.x;
  g011 *= norm1.y;
  g101 *= norm1.z;
  g111 *= norm1.w;
  float n000 = dot(g000, Pf0);
  float n100 = dot(g100, vec3(Pf1.x,Pf0.yz));
  float n010 = dot(g010, vec3(Pf0.x,Pf1.y,Pf0.z));
  float n110 = dot(g110, vec3(Pf1.xy,Pf0.z));
  float n001 = dot(g001, vec3(Pf0.xy,Pf1.z));
  float n101 = dot(g101, vec3(Pf1.x,Pf0.y,Pf1.z));
  float n011 = dot(g011, vec3(Pf0.x,Pf1.yz));
  float n111 = dot(g111, Pf1);
  vec3 fade_xyz = fade(Pf0);
  vec4 n_z = mix(vec4(n000,n100,n010,n110),vec4(n001,n101,n011,n111),fade_xyz.z);
  vec2 n_yz = mix(n_z.xy,n_z.zw,fade_xyz.y);
  float n_xyz = mix(n_yz.x,n_yz.y,fade_xyz.x);
  return 2.2 * n_xyz;
}
"#;
