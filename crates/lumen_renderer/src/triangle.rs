//! Ray-triangle intersection.
//!
//! Uses the Möller-Trumbore algorithm.

use lumen_math::{Interval, Ray, Vec3};

/// Determinants smaller than this mean the ray is parallel to the
/// triangle's plane or the triangle is degenerate.
const PARALLEL_EPSILON: f32 = 1e-8;

/// Möller-Trumbore ray-triangle intersection algorithm.
///
/// Returns the ray parameter of the hit if it lies inside `ray_t`.
pub fn hit_triangle(p1: Vec3, p2: Vec3, p3: Vec3, ray: &Ray, ray_t: Interval) -> Option<f32> {
    let edge1 = p2 - p1;
    let edge2 = p3 - p1;

    let h = ray.direction.cross(edge2);
    let a = edge1.dot(h);

    // Ray is parallel to triangle
    if a.abs() < PARALLEL_EPSILON {
        return None;
    }

    let f = 1.0 / a;
    let s = ray.origin - p1;
    let u = f * s.dot(h);

    // Check if intersection is outside triangle (u parameter)
    if !(0.0..=1.0).contains(&u) {
        return None;
    }

    let q = s.cross(edge1);
    let v = f * ray.direction.dot(q);

    // Check if intersection is outside triangle (v parameter)
    if v < 0.0 || u + v > 1.0 {
        return None;
    }

    let t = f * edge2.dot(q);
    ray_t.surrounds(t).then_some(t)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn triangle() -> (Vec3, Vec3, Vec3) {
        // Triangle in XY plane at z=-1
        (
            Vec3::new(-1.0, -1.0, -1.0),
            Vec3::new(1.0, -1.0, -1.0),
            Vec3::new(0.0, 1.0, -1.0),
        )
    }

    #[test]
    fn test_triangle_hit_at_centroid() {
        let (p1, p2, p3) = triangle();
        let centroid = (p1 + p2 + p3) / 3.0;
        let origin = Vec3::new(0.3, 0.2, 2.0);
        let ray = Ray::towards(origin, centroid);

        let t = hit_triangle(p1, p2, p3, &ray, Interval::POSITIVE).unwrap();
        assert!((t - (centroid - origin).length()).abs() < 1e-5);
    }

    #[test]
    fn test_triangle_hit_from_behind() {
        let (p1, p2, p3) = triangle();
        let ray = Ray::new(Vec3::new(0.0, 0.0, -3.0), Vec3::Z);
        let t = hit_triangle(p1, p2, p3, &ray, Interval::POSITIVE).unwrap();
        assert!((t - 2.0).abs() < 1e-6);
    }

    #[test]
    fn test_triangle_miss() {
        let (p1, p2, p3) = triangle();

        // Ray pointing away
        let ray = Ray::new(Vec3::ZERO, Vec3::Z);
        assert!(hit_triangle(p1, p2, p3, &ray, Interval::POSITIVE).is_none());

        // Ray passing beside the triangle
        let ray = Ray::new(Vec3::new(5.0, 0.0, 0.0), -Vec3::Z);
        assert!(hit_triangle(p1, p2, p3, &ray, Interval::POSITIVE).is_none());
    }

    #[test]
    fn test_triangle_parallel_ray_misses() {
        let (p1, p2, p3) = triangle();
        let ray = Ray::new(Vec3::new(-5.0, 0.0, -1.0), Vec3::X);
        assert!(hit_triangle(p1, p2, p3, &ray, Interval::POSITIVE).is_none());
    }

    #[test]
    fn test_degenerate_triangle_misses() {
        let p = Vec3::new(0.0, 0.0, -1.0);
        let ray = Ray::new(Vec3::ZERO, -Vec3::Z);
        assert!(hit_triangle(p, p, Vec3::new(1.0, 0.0, -1.0), &ray, Interval::POSITIVE).is_none());
    }
}
