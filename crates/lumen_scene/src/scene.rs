//! Scene container, lookups, and JSON scene files.

use std::path::Path;

use lumen_math::Vec3;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{Camera, Primitive, RectLight, Shape, Surface, SurfaceId};

/// Errors that can occur while loading or validating a scene.
#[derive(Error, Debug)]
pub enum SceneError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Scene parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Primitive {primitive} references unknown surface {surface}")]
    UnknownSurface {
        primitive: usize,
        surface: SurfaceId,
    },

    #[error("Triangle {primitive} uses surface {surface} with non-unit normal {normal}")]
    InvalidNormal {
        primitive: usize,
        surface: SurfaceId,
        normal: Vec3,
    },

    #[error("Light references unknown surface {0}")]
    UnknownEmitter(SurfaceId),

    #[error("Invalid light: {0}")]
    InvalidLight(String),

    #[error("Sphere {primitive} has non-positive radius {radius}")]
    InvalidSphere { primitive: usize, radius: f32 },

    #[error("Camera resolution {0}x{1} is empty")]
    EmptyImage(u32, u32),
}

/// Result type for scene operations.
pub type SceneResult<T> = Result<T, SceneError>;

/// A static scene: geometry, materials, one rectangular light and a camera.
///
/// Read-only once rendering starts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scene {
    pub primitives: Vec<Primitive>,
    pub surfaces: Vec<Surface>,
    pub light: RectLight,
    pub camera: Camera,
}

impl Scene {
    /// Parse and validate a scene from a JSON string.
    pub fn from_json_str(json: &str) -> SceneResult<Self> {
        let scene: Scene = serde_json::from_str(json)?;
        scene.validate()?;
        Ok(scene)
    }

    /// Load and validate a scene from a JSON file.
    pub fn from_json_file(path: impl AsRef<Path>) -> SceneResult<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let scene = Self::from_json_str(&json)?;
        log::info!(
            "Loaded scene {}: {} primitives, {} surfaces",
            path.display(),
            scene.primitives.len(),
            scene.surfaces.len()
        );
        Ok(scene)
    }

    /// Check internal references and light/camera sanity.
    pub fn validate(&self) -> SceneResult<()> {
        for (i, prim) in self.primitives.iter().enumerate() {
            if prim.surface >= self.surfaces.len() {
                return Err(SceneError::UnknownSurface {
                    primitive: i,
                    surface: prim.surface,
                });
            }
            match prim.shape {
                Shape::Sphere { radius, .. } => {
                    if radius <= 0.0 || !radius.is_finite() {
                        return Err(SceneError::InvalidSphere {
                            primitive: i,
                            radius,
                        });
                    }
                }
                // Triangles shade with their surface's normal; spheres compute their own.
                Shape::Triangle { .. } => {
                    let normal = self.surfaces[prim.surface].normal();
                    if !is_unit(normal) {
                        return Err(SceneError::InvalidNormal {
                            primitive: i,
                            surface: prim.surface,
                            normal,
                        });
                    }
                }
            }
        }

        if self.light.surface >= self.surfaces.len() {
            return Err(SceneError::UnknownEmitter(self.light.surface));
        }
        if self.light.size.x <= 0.0 || self.light.size.y <= 0.0 {
            return Err(SceneError::InvalidLight(format!(
                "extents must be positive, got {:?}",
                self.light.size
            )));
        }
        if !is_unit(self.light.normal) {
            return Err(SceneError::InvalidLight(format!(
                "normal must be unit length, got {:?}",
                self.light.normal
            )));
        }
        if self.light.power < 0.0 {
            return Err(SceneError::InvalidLight(format!(
                "power must be non-negative, got {}",
                self.light.power
            )));
        }

        if self.camera.width == 0 || self.camera.height == 0 {
            return Err(SceneError::EmptyImage(self.camera.width, self.camera.height));
        }

        if !self.primitives.iter().any(|p| p.surface == self.light.surface) {
            log::warn!("No primitive uses the emitter surface; direct lighting will be black");
        }

        Ok(())
    }

    /// Surface by id.
    #[inline]
    pub fn surface(&self, id: SurfaceId) -> &Surface {
        &self.surfaces[id]
    }

    /// Surface of the primitive at `primitive`.
    #[inline]
    pub fn surface_of(&self, primitive: usize) -> &Surface {
        self.surface(self.primitives[primitive].surface)
    }

    /// True if the primitive at `primitive` is part of the light.
    #[inline]
    pub fn is_emitter(&self, primitive: usize) -> bool {
        self.primitives[primitive].surface == self.light.surface
    }
}

fn is_unit(v: Vec3) -> bool {
    (v.length() - 1.0).abs() <= 1e-3
}
