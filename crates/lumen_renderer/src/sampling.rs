//! Random sampling helpers shared by the photon and camera passes.

use lumen_math::{from_local, Vec2, Vec3};
use lumen_scene::RectLight;
use rand::{Rng, RngCore};
use std::f32::consts::PI;

/// Distance that spawned rays are pushed off a surface to avoid
/// re-hitting it.
pub const RAY_OFFSET: f32 = 0.001;

/// Uniform float in [0, 1).
#[inline]
pub fn gen_f32(rng: &mut dyn RngCore) -> f32 {
    rng.gen()
}

/// Offset a ray origin along `normal` to avoid self-intersection.
#[inline]
pub fn offset_ray_origin(point: Vec3, normal: Vec3) -> Vec3 {
    point + RAY_OFFSET * normal
}

/// Map two uniform numbers to a cosine-weighted direction around +Z.
///
/// The density is `cos(theta) / pi`.
pub fn cosine_hemisphere(u1: f32, u2: f32) -> Vec3 {
    let phi = 2.0 * PI * u1;
    let sin_theta = u2.sqrt();
    let cos_theta = (1.0 - u2).max(0.0).sqrt();
    Vec3::new(sin_theta * phi.cos(), sin_theta * phi.sin(), cos_theta)
}

/// Cosine-weighted direction in the hemisphere around `normal`.
pub fn sample_cosine_direction(normal: Vec3, rng: &mut dyn RngCore) -> Vec3 {
    let local = cosine_hemisphere(gen_f32(rng), gen_f32(rng));
    from_local(local, normal)
}

/// Uniform point on the light rectangle.
pub fn sample_light_point(light: &RectLight, rng: &mut dyn RngCore) -> Vec3 {
    light.point_at(gen_f32(rng), gen_f32(rng))
}

/// Uniform offset inside a pixel footprint, in [0, 1)^2.
pub fn sample_pixel_offset(rng: &mut dyn RngCore) -> Vec2 {
    Vec2::new(gen_f32(rng), gen_f32(rng))
}
