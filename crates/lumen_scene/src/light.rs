//! Rectangular area light.

use lumen_math::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

use crate::{Primitive, SurfaceId};

/// An axis-aligned rectangular emitter lying in a plane of constant z.
///
/// The rectangle spans `size.x` along +X and `size.y` along +Y from
/// `corner` and emits `power` watts (per channel) from the side that
/// `normal` points to.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RectLight {
    pub corner: Vec3,
    pub size: Vec2,
    pub normal: Vec3,
    pub power: f32,
    /// Surface id of the primitives that make up the visible emitter.
    pub surface: SurfaceId,
}

impl RectLight {
    /// Area of the rectangle.
    pub fn area(&self) -> f32 {
        self.size.x * self.size.y
    }

    /// Point on the rectangle at parametric coordinates `(u, v)` in [0,1]^2.
    ///
    /// Feeding uniform `u, v` gives uniform area samples.
    pub fn point_at(&self, u: f32, v: f32) -> Vec3 {
        self.corner + Vec3::new(self.size.x * u, self.size.y * v, 0.0)
    }

    /// Emitted radiance, constant over the rectangle.
    ///
    /// Power is spread over area only; the cosine-weighted emission lobe
    /// is accounted for by the samplers.
    pub fn radiance(&self) -> f32 {
        self.power / self.area()
    }

    /// Two triangles covering the rectangle, tagged with the emitter surface.
    ///
    /// Camera rays and shadow rays recognise the light by hitting these.
    pub fn primitives(&self) -> [Primitive; 2] {
        let c00 = self.point_at(0.0, 0.0);
        let c10 = self.point_at(1.0, 0.0);
        let c01 = self.point_at(0.0, 1.0);
        let c11 = self.point_at(1.0, 1.0);
        [
            Primitive::triangle(c01, c10, c00, self.surface),
            Primitive::triangle(c01, c11, c10, self.surface),
        ]
    }
}
