//! Render configuration.
//!
//! Every option has a default, so a JSON config file only needs the
//! options it changes.

use std::path::Path;

use lumen_math::Vec3;
use lumen_scene::SurfaceId;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::material::Ior;

/// Errors that can occur while loading or validating a configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid option `{option}`: {reason}")]
    Invalid {
        option: &'static str,
        reason: String,
    },
}

/// Result type for configuration operations.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Render configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RenderConfig {
    /// Photons emitted from the light in the transport pass
    pub photon_count: usize,
    /// Photons gathered per density estimate
    pub k_neighbors: usize,
    /// Camera rays per pixel
    pub samples_per_pixel: u32,
    /// Output image width in pixels
    pub width: u32,
    /// Output image height in pixels
    pub height: u32,
    /// Bounce cap for photon paths
    pub max_photon_bounces: u32,
    /// Bounce cap for camera paths through glass
    pub max_specular_depth: u32,
    /// Weight of the mirror reflection off glass seen from outside
    pub specular_reflectance: f32,
    /// Index of refraction outside glass
    pub eta_outside: f32,
    /// Index of refraction inside glass
    pub eta_inside: f32,
    /// Also record photons arriving straight from the light
    pub store_direct_photons: bool,
    /// Gather photons on every sample instead of once per pixel
    pub gather_each_sample: bool,
    /// Horizontal bands the image is split into for parallel rendering
    pub row_groups: u32,
    /// Base seed for every random stream
    pub seed: u64,
    /// Reference point highlighted in the photon preview images
    pub preview_point: Vec3,
    /// Surface the preview reference point lies on
    pub preview_surface: SurfaceId,
    /// Replaces the scene light's power when set
    pub light_power: Option<f32>,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            photon_count: 100_000,
            k_neighbors: 500,
            samples_per_pixel: 1024,
            width: 1024,
            height: 1024,
            max_photon_bounces: 64,
            max_specular_depth: 32,
            specular_reflectance: 0.05,
            eta_outside: 1.000_293,
            eta_inside: 2.058,
            store_direct_photons: false,
            gather_each_sample: false,
            row_groups: 16,
            seed: 0,
            preview_point: Vec3::new(0.27, -0.56, 0.27),
            preview_surface: 1,
            light_power: None,
        }
    }
}

impl RenderConfig {
    /// Parse and validate a configuration from a JSON string.
    pub fn from_json_str(json: &str) -> ConfigResult<Self> {
        let config: RenderConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a configuration from a JSON file.
    pub fn from_json_file(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Indices of refraction of the glass interface.
    pub fn ior(&self) -> Ior {
        Ior {
            outside: self.eta_outside,
            inside: self.eta_inside,
        }
    }

    /// Reject options the renderer cannot work with.
    pub fn validate(&self) -> ConfigResult<()> {
        fn invalid(option: &'static str, reason: impl Into<String>) -> ConfigResult<()> {
            Err(ConfigError::Invalid {
                option,
                reason: reason.into(),
            })
        }

        if self.photon_count == 0 {
            return invalid("photon_count", "must be at least 1");
        }
        if self.k_neighbors == 0 {
            return invalid("k_neighbors", "must be at least 1");
        }
        if self.samples_per_pixel == 0 {
            return invalid("samples_per_pixel", "must be at least 1");
        }
        if self.width == 0 || self.height == 0 {
            return invalid("width/height", format!("{}x{} is empty", self.width, self.height));
        }
        if self.row_groups == 0 {
            return invalid("row_groups", "must be at least 1");
        }
        if !(self.eta_outside > 0.0 && self.eta_inside > 0.0) {
            return invalid("eta_outside/eta_inside", "indices of refraction must be positive");
        }
        if !(0.0..=1.0).contains(&self.specular_reflectance) {
            return invalid(
                "specular_reflectance",
                format!("{} is outside [0, 1]", self.specular_reflectance),
            );
        }
        if let Some(power) = self.light_power {
            if !(power >= 0.0 && power.is_finite()) {
                return invalid("light_power", format!("{} is not a valid power", power));
            }
        }
        Ok(())
    }
}
