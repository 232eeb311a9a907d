//! Pinhole camera with an explicit image plane.

use lumen_math::{Ray, Vec3};
use serde::{Deserialize, Serialize};

/// Camera for generating rays into the scene.
///
/// The image plane is the parallelogram `bottom_left + u * right + v * up`
/// for `u, v` in [0, 1]. Pixel rows count down from the top edge.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Camera {
    pub position: Vec3,
    pub bottom_left: Vec3,
    pub right: Vec3,
    pub up: Vec3,
    pub width: u32,
    pub height: u32,
}

impl Camera {
    /// Set image resolution.
    pub fn with_resolution(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Point on the image plane for normalized image coordinates.
    ///
    /// `x` runs left to right and `y` top to bottom, both in [0, 1].
    pub fn plane_point(&self, x: f32, y: f32) -> Vec3 {
        self.bottom_left + x * self.right + (1.0 - y) * self.up
    }

    /// Primary ray through the image-plane point at `(x, y)` in pixel units.
    ///
    /// Fractional parts select the position inside the pixel footprint.
    pub fn ray(&self, x: f32, y: f32) -> Ray {
        let target = self.plane_point(x / self.width as f32, y / self.height as f32);
        Ray::towards(self.position, target)
    }

    /// Project a world-space point onto the image, returning its pixel.
    ///
    /// Returns `None` for points behind the camera or outside the image.
    pub fn project(&self, point: Vec3) -> Option<(u32, u32)> {
        let plane_normal = self.right.cross(self.up);
        let d = point - self.position;
        let denom = d.dot(plane_normal);
        if denom.abs() < f32::EPSILON {
            return None;
        }

        let t = (self.bottom_left - self.position).dot(plane_normal) / denom;
        if t <= 0.0 {
            return None;
        }

        let local = self.position + t * d - self.bottom_left;
        let u = local.dot(self.right) / self.right.length_squared();
        let v = local.dot(self.up) / self.up.length_squared();

        let x = (u * self.width as f32).floor();
        let y = ((1.0 - v) * self.height as f32).floor();
        if x < 0.0 || y < 0.0 || x >= self.width as f32 || y >= self.height as f32 {
            return None;
        }
        Some((x as u32, y as u32))
    }
}
