//! Final-image rendering.
//!
//! Implements the camera pass with:
//! - Jittered multi-sampling per pixel
//! - Parallel row bands with per-band seeded random streams
//! - ACES filmic tone mapping

use lumen_math::Color;
use lumen_scene::Camera;
use rand::RngCore;
use rayon::prelude::*;

use crate::band::{generate_bands, render_band, rows_per_band};
use crate::config::RenderConfig;
use crate::integrator::{Gather, Integrator};
use crate::sampling::sample_pixel_offset;

/// Exposure applied before the filmic curve.
const EXPOSURE: f32 = 0.6;

/// ACES filmic tone mapping (Narkowicz fit) after a fixed exposure.
pub fn tone_map_aces(color: Color) -> Color {
    const A: f32 = 2.51;
    const B: f32 = 0.03;
    const C: f32 = 2.43;
    const D: f32 = 0.59;
    const E: f32 = 0.14;

    let x = color * EXPOSURE;
    (x * (A * x + B)) / (x * (C * x + D) + E)
}

/// Clamp a value to [0, 1] range.
#[inline]
pub fn clamp_01(x: f32) -> f32 {
    x.clamp(0.0, 1.0)
}

/// Convert a pixel to 8-bit RGBA.
///
/// Pixels that were never rendered come out fully transparent.
pub fn color_to_rgba(pixel: Option<Color>) -> [u8; 4] {
    let Some(color) = pixel else {
        return [0, 0, 0, 0];
    };
    let mapped = tone_map_aces(color);
    let r = (255.0 * clamp_01(mapped.x)) as u8;
    let g = (255.0 * clamp_01(mapped.y)) as u8;
    let b = (255.0 * clamp_01(mapped.z)) as u8;
    [r, g, b, 255]
}

/// Render a single pixel by averaging jittered samples.
pub fn render_pixel(
    camera: &Camera,
    integrator: &Integrator<'_>,
    x: u32,
    y: u32,
    config: &RenderConfig,
    rng: &mut dyn RngCore,
) -> Color {
    let spp = config.samples_per_pixel;
    let mut pixel_color = Color::ZERO;

    for sample in 0..spp {
        let offset = sample_pixel_offset(rng);
        let ray = camera.ray(x as f32 + offset.x, y as f32 + offset.y);
        let gather = Gather::for_sample(sample, spp, config.gather_each_sample);
        pixel_color += integrator.shade(ray, gather, rng);
    }

    pixel_color / spp as f32
}

/// Linear radiance image. `None` marks pixels that were never rendered.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageBuffer {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<Option<Color>>,
}

impl ImageBuffer {
    /// Create an image with every pixel untouched.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![None; width as usize * height as usize],
        }
    }

    /// Set the pixel at (x, y).
    pub fn set(&mut self, x: u32, y: u32, color: Color) {
        self.pixels[(y * self.width + x) as usize] = Some(color);
    }

    /// Tone-mapped RGBA bytes, row-major from the top row.
    pub fn to_rgba8(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.pixels.len() * 4);
        for pixel in &self.pixels {
            bytes.extend_from_slice(&color_to_rgba(*pixel));
        }
        bytes
    }
}

/// Render the whole image in parallel, one task per row band.
///
/// Output depends only on the configuration, never on thread scheduling.
pub fn render(camera: &Camera, integrator: &Integrator<'_>, config: &RenderConfig) -> ImageBuffer {
    let mut image = ImageBuffer::new(camera.width, camera.height);
    let bands = generate_bands(camera.height, config.row_groups);
    let chunk = rows_per_band(camera.height, config.row_groups) as usize * camera.width as usize;
    log::info!(
        "Rendering {}x{} at {} spp in {} bands",
        camera.width,
        camera.height,
        config.samples_per_pixel,
        bands.len()
    );

    if chunk == 0 {
        return image;
    }

    image
        .pixels
        .par_chunks_mut(chunk)
        .zip(bands.par_iter())
        .for_each(|(pixels, band)| {
            render_band(band, pixels, camera, integrator, config);
            log::debug!("Band {}/{} done", band.index + 1, bands.len());
        });

    image
}
