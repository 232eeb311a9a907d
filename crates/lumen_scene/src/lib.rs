//! Lumen Scene - static scene description for the photon mapper.
//!
//! This crate provides:
//!
//! - **Scene types**: `Scene`, `Primitive`, `Shape`, `Surface`, `RectLight`, `Camera`
//! - **Built-in scene**: `Scene::cornell_box()`
//! - **Scene files**: JSON loading and validation
//!
//! # Example
//!
//! ```ignore
//! use lumen_scene::Scene;
//!
//! let scene = Scene::from_json_file("box.json")?;
//! println!("Loaded {} primitives, {} surfaces",
//!     scene.primitives.len(),
//!     scene.surfaces.len());
//! ```

pub mod camera;
pub mod cornell;
pub mod light;
pub mod primitive;
pub mod scene;
pub mod surface;

// Re-export commonly used types
pub use camera::Camera;
pub use light::RectLight;
pub use primitive::{Primitive, Shape};
pub use scene::{Scene, SceneError, SceneResult};
pub use surface::{Surface, SurfaceId};
