//! Scene primitives.

use lumen_math::Vec3;
use serde::{Deserialize, Serialize};

use crate::SurfaceId;

/// Geometry of a primitive.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Shape {
    Triangle { p1: Vec3, p2: Vec3, p3: Vec3 },
    Sphere { center: Vec3, radius: f32 },
}

/// A shape bound to the surface that shades it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Primitive {
    #[serde(flatten)]
    pub shape: Shape,
    pub surface: SurfaceId,
}

impl Primitive {
    /// Create a triangle primitive.
    pub fn triangle(p1: Vec3, p2: Vec3, p3: Vec3, surface: SurfaceId) -> Self {
        Self {
            shape: Shape::Triangle { p1, p2, p3 },
            surface,
        }
    }

    /// Create a sphere primitive.
    pub fn sphere(center: Vec3, radius: f32, surface: SurfaceId) -> Self {
        Self {
            shape: Shape::Sphere { center, radius },
            surface,
        }
    }
}
