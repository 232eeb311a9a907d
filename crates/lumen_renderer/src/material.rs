//! Surface scattering: the Lambertian BRDF and ideal dielectric interfaces.

use lumen_math::{Color, Ray, Vec3};
use std::f32::consts::PI;

use crate::sampling::offset_ray_origin;

/// Indices of refraction on either side of every dielectric surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ior {
    /// Medium the camera and light sit in (air).
    pub outside: f32,
    /// Medium behind dielectric surfaces.
    pub inside: f32,
}

impl Ior {
    /// Ratio `eta_incident / eta_transmitted` for a crossing.
    #[inline]
    pub fn ratio(&self, entering: bool) -> f32 {
        if entering {
            self.outside / self.inside
        } else {
            self.inside / self.outside
        }
    }
}

/// Lambertian BRDF, `albedo / pi`.
#[inline]
pub fn lambertian_brdf(albedo: Color) -> Color {
    albedo / PI
}

/// Mirror `v` about `n`.
#[inline]
pub fn reflect(v: Vec3, n: Vec3) -> Vec3 {
    v - 2.0 * v.dot(n) * n
}

/// Refract via Snell's law.
///
/// `wi` points away from the surface on the incident side and `n` is the
/// normal on that same side. `eta` is `eta_incident / eta_transmitted`.
/// Returns the transmitted direction, or `None` on total internal
/// reflection.
pub fn refract(wi: Vec3, n: Vec3, eta: f32) -> Option<Vec3> {
    let cos_i = wi.dot(n);
    let sin2_t = eta * eta * (1.0 - cos_i * cos_i);
    if sin2_t > 1.0 {
        return None;
    }
    let cos_t = (1.0 - sin2_t).sqrt();
    Some(-(eta * (wi - cos_i * n) + cos_t * n))
}

/// Normal flipped to face against `direction`, and whether the ray
/// arrives from the side `normal` points to.
#[inline]
pub fn face_forward(normal: Vec3, direction: Vec3) -> (Vec3, bool) {
    if direction.dot(normal) < 0.0 {
        (normal, true)
    } else {
        (-normal, false)
    }
}

/// Continuation of a ray crossing a dielectric at `point`.
///
/// Under total internal reflection the ray is mirrored instead, so power is
/// never absorbed at the interface. The flag tells whether the ray
/// actually crossed into the other medium.
pub fn transmitted_ray(point: Vec3, direction: Vec3, normal: Vec3, ior: &Ior) -> (Ray, bool) {
    let (facing, entering) = face_forward(normal, direction);
    match refract(-direction, facing, ior.ratio(entering)) {
        Some(refracted) => (
            Ray::new(offset_ray_origin(point, -facing), refracted.normalize()),
            true,
        ),
        None => (reflected_ray(point, direction, normal), false),
    }
}

/// Mirror reflection of a ray at `point`, spawned on the incident side.
pub fn reflected_ray(point: Vec3, direction: Vec3, normal: Vec3) -> Ray {
    let (facing, _) = face_forward(normal, direction);
    Ray::new(offset_ray_origin(point, facing), reflect(direction, facing))
}
