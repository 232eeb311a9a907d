//! Ray-sphere intersection.

use lumen_math::{Interval, Ray, Vec3};

/// Nearest intersection of a ray with a sphere inside `ray_t`.
///
/// When the origin is inside the sphere the near root is negative and the
/// far root is returned.
pub fn hit_sphere(center: Vec3, radius: f32, ray: &Ray, ray_t: Interval) -> Option<f32> {
    let oc = center - ray.origin;
    let a = ray.direction.length_squared();
    let h = ray.direction.dot(oc);
    let c = oc.length_squared() - radius * radius;

    let discriminant = h * h - a * c;
    if discriminant < 0.0 {
        return None;
    }

    let sqrtd = discriminant.sqrt();

    // Find the nearest root in the acceptable range
    let mut root = (h - sqrtd) / a;
    if !ray_t.surrounds(root) {
        root = (h + sqrtd) / a;
        if !ray_t.surrounds(root) {
            return None;
        }
    }

    Some(root)
}

/// Outward unit normal of a sphere at a surface point.
#[inline]
pub fn sphere_normal(center: Vec3, point: Vec3) -> Vec3 {
    (point - center).normalize()
}
