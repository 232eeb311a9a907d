use crate::Vec3;

/// A ray in 3D space with origin and direction.
///
/// Directions produced by the renderer are unit length, but nothing here
/// relies on it.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
}

impl Ray {
    /// Create a new ray.
    #[inline]
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self { origin, direction }
    }

    /// Create a ray from `origin` towards `target`, with a unit direction.
    #[inline]
    pub fn towards(origin: Vec3, target: Vec3) -> Self {
        Self::new(origin, (target - origin).normalize())
    }

    /// Compute a point along the ray at parameter t.
    /// P(t) = origin + t * direction
    #[inline]
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + t * self.direction
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ray_at() {
        let ray = Ray::new(Vec3::new(1.0, 2.0, 3.0), Vec3::new(0.0, 1.0, 0.0));
        assert_eq!(ray.at(0.0), Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(ray.at(2.5), Vec3::new(1.0, 4.5, 3.0));
    }

    #[test]
    fn test_ray_towards_is_unit() {
        let ray = Ray::towards(Vec3::ZERO, Vec3::new(3.0, 4.0, 0.0));
        assert!((ray.direction.length() - 1.0).abs() < 1e-6);
        assert!((ray.at(5.0) - Vec3::new(3.0, 4.0, 0.0)).length() < 1e-5);
    }
}
