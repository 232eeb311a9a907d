// Re-export glam for convenience
pub use glam::*;

// Lumen math types
mod aabb;
mod frame;
mod interval;
mod ray;

pub use aabb::Aabb;
pub use frame::{coordinate_system, from_local};
pub use interval::Interval;
pub use ray::Ray;

/// Linear RGB triple. Used for radiance, power and albedo alike.
pub type Color = Vec3;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_is_componentwise() {
        let power = Color::new(1.0, 0.5, 0.25);
        let albedo = Color::new(0.5, 0.5, 1.0);
        assert_eq!(power * albedo, Color::new(0.5, 0.25, 0.25));
    }
}
