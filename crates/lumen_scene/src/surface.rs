//! Surface materials.

use lumen_math::{Color, Vec3};
use serde::{Deserialize, Serialize};

/// Index into [`crate::Scene::surfaces`].
pub type SurfaceId = usize;

/// The two materials the renderer understands.
///
/// `normal` is the geometric normal shared by every triangle that uses the
/// surface; spheres compute their normal at the hit point instead.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Surface {
    /// Ideal diffuse reflector.
    Lambertian {
        #[serde(default)]
        normal: Vec3,
        albedo: Color,
    },
    /// Non-absorbing refractive material (glass). Albedo is carried for
    /// completeness but never scales transported power.
    Dielectric {
        #[serde(default)]
        normal: Vec3,
        #[serde(default = "white")]
        albedo: Color,
    },
}

fn white() -> Color {
    Color::ONE
}

impl Surface {
    /// Geometric normal stored with the surface.
    pub fn normal(&self) -> Vec3 {
        match *self {
            Surface::Lambertian { normal, .. } | Surface::Dielectric { normal, .. } => normal,
        }
    }
}
