//! Closest-hit queries over the scene's primitives.
//!
//! A linear scan; scenes are a handful of primitives.

use lumen_math::{Interval, Ray, Vec3};
use lumen_scene::{Primitive, Scene, Shape};

use crate::sphere::{hit_sphere, sphere_normal};
use crate::triangle::hit_triangle;

/// Record of a ray-primitive intersection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hit {
    /// Parameter t where the intersection occurs
    pub t: f32,
    /// Index of the primitive in the scene
    pub primitive: usize,
}

/// Trait for geometry that can be hit by rays.
pub trait Hittable {
    /// Ray parameter of the nearest intersection inside `ray_t`, if any.
    fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<f32>;
}

impl Hittable for Shape {
    fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<f32> {
        match *self {
            Shape::Triangle { p1, p2, p3 } => hit_triangle(p1, p2, p3, ray, ray_t),
            Shape::Sphere { center, radius } => hit_sphere(center, radius, ray, ray_t),
        }
    }
}

impl Hittable for Primitive {
    fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<f32> {
        self.shape.hit(ray, ray_t)
    }
}

/// Nearest hit with positive `t` over all primitives.
pub fn closest_hit(ray: &Ray, primitives: &[Primitive]) -> Option<Hit> {
    let mut closest: Option<Hit> = None;
    let mut closest_so_far = f32::INFINITY;

    for (index, primitive) in primitives.iter().enumerate() {
        let interval = Interval::new(Interval::POSITIVE.min, closest_so_far);
        if let Some(t) = primitive.hit(ray, interval) {
            closest_so_far = t;
            closest = Some(Hit {
                t,
                primitive: index,
            });
        }
    }

    closest
}

/// Geometric normal of a primitive at a point on its surface.
///
/// Triangles use the normal stored with their surface; spheres use the
/// outward radial direction.
pub fn surface_normal(scene: &Scene, primitive: usize, point: Vec3) -> Vec3 {
    let prim = &scene.primitives[primitive];
    match prim.shape {
        Shape::Sphere { center, .. } => sphere_normal(center, point),
        Shape::Triangle { .. } => scene.surface_of(primitive).normal(),
    }
}
