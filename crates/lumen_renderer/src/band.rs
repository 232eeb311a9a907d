//! Row-band partitioning for parallel rendering.
//!
//! The image is split into horizontal bands of whole rows that are
//! rendered independently with rayon. Each band owns a slice of the pixel
//! buffer and its own random stream.

use lumen_math::Color;
use lumen_scene::Camera;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::config::RenderConfig;
use crate::integrator::Integrator;
use crate::renderer::render_pixel;

/// A run of consecutive image rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowBand {
    /// First row of the band
    pub y: u32,
    /// Number of rows in the band
    pub height: u32,
    /// Index of this band, top to bottom
    pub index: usize,
}

impl RowBand {
    /// Number of pixels in the band for an image `width` pixels wide.
    pub fn pixel_count(&self, width: u32) -> usize {
        self.height as usize * width as usize
    }

    /// Seed of this band's random stream.
    pub fn seed(&self, base: u64) -> u64 {
        base ^ (self.index as u64 + 1).wrapping_mul(0x9E37_79B9_7F4A_7C15)
    }
}

/// Rows per band when `height` rows are split into at most `count` bands.
pub fn rows_per_band(height: u32, count: u32) -> u32 {
    height.div_ceil(count.max(1)).max(1)
}

/// Split `height` rows into bands of `rows_per_band(height, count)` rows.
///
/// The last band takes the remainder, so there may be fewer than `count`
/// bands when `height` does not divide evenly.
pub fn generate_bands(height: u32, count: u32) -> Vec<RowBand> {
    let rows = rows_per_band(height, count);
    let mut bands = Vec::new();
    let mut y = 0;
    while y < height {
        let band_height = rows.min(height - y);
        bands.push(RowBand {
            y,
            height: band_height,
            index: bands.len(),
        });
        y += rows;
    }
    bands
}

/// Render every pixel of `band` into `pixels`, row-major within the band.
pub fn render_band(
    band: &RowBand,
    pixels: &mut [Option<Color>],
    camera: &Camera,
    integrator: &Integrator<'_>,
    config: &RenderConfig,
) {
    let mut rng = StdRng::seed_from_u64(band.seed(config.seed));
    let width = camera.width;
    debug_assert_eq!(pixels.len(), band.pixel_count(width));

    for local_y in 0..band.height {
        for x in 0..width {
            let color = render_pixel(camera, integrator, x, band.y + local_y, config, &mut rng);
            pixels[(local_y * width + x) as usize] = Some(color);
        }
    }
}
