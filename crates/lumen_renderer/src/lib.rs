//! Lumen Renderer - CPU photon mapping
//!
//! Renders a static scene in two passes:
//! - **Photon transport**: photons leave the area light and are recorded on
//!   diffuse surfaces, split into a diffuse and a caustic map
//! - **Camera pass**: direct light is sampled explicitly, indirect and
//!   caustic light are density estimates over kd-tree indexed photons
//!
//! Row bands are rendered in parallel with rayon and tone mapped with an
//! ACES filmic curve.

mod band;
mod config;
mod hittable;
mod integrator;
mod kdtree;
mod material;
mod photon;
mod preview;
mod renderer;
mod sampling;
mod sphere;
mod transport;
mod triangle;

pub mod output;

#[cfg(test)]
mod test_scenes;

pub use band::{generate_bands, RowBand};
pub use config::{ConfigError, ConfigResult, RenderConfig};
pub use hittable::{closest_hit, Hit, Hittable};
pub use integrator::{density_estimate, Gather, Integrator};
pub use kdtree::{Neighbor, Neighbors, PhotonIndex};
pub use material::Ior;
pub use photon::{total_power, Photon, PhotonMaps, Store};
pub use preview::render_photon_preview;
pub use renderer::{color_to_rgba, render, render_pixel, tone_map_aces, ImageBuffer};
pub use transport::{PathEnd, PhotonTracer, TransportStats};

/// Re-export common math types from lumen_math
pub use lumen_math::{Color, Ray, Vec3};
