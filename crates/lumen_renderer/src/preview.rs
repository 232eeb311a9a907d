//! Diagnostic photon previews.
//!
//! Splats every photon of one map onto the image through the camera, and
//! tints the photons a density estimate at the reference point would use.

use image::{Rgb, RgbImage};
use lumen_math::Color;
use lumen_scene::Camera;

use crate::config::RenderConfig;
use crate::kdtree::PhotonIndex;

/// Contribution of one photon to its pixel.
const PHOTON_SPLAT: Color = Color::new(0.5, 0.5, 0.5);
/// Contribution of a photon in the reference point's neighbourhood.
const NEIGHBOR_SPLAT: Color = Color::new(1.0, 0.0, 0.0);

/// Render the photons of `index` as seen from `camera`.
///
/// Photons projecting outside the image are skipped. Pixel values
/// saturate at 1.
pub fn render_photon_preview(
    camera: &Camera,
    index: &PhotonIndex<'_>,
    config: &RenderConfig,
) -> RgbImage {
    let photons = index.photons();
    let mut highlighted = vec![false; photons.len()];
    for neighbor in index
        .locate(config.preview_point, config.k_neighbors, config.preview_surface)
        .iter()
    {
        highlighted[neighbor.photon] = true;
    }

    let width = camera.width as usize;
    let mut accum = vec![Color::ZERO; width * camera.height as usize];
    let mut discarded = 0usize;
    for (photon, &near) in photons.iter().zip(&highlighted) {
        let Some((x, y)) = camera.project(photon.position) else {
            discarded += 1;
            continue;
        };
        accum[y as usize * width + x as usize] += if near { NEIGHBOR_SPLAT } else { PHOTON_SPLAT };
    }
    if discarded > 0 {
        log::debug!("{} of {} photons fall outside the preview", discarded, photons.len());
    }

    RgbImage::from_fn(camera.width, camera.height, |x, y| {
        let c = accum[y as usize * width + x as usize].min(Color::ONE);
        Rgb([(255.0 * c.x) as u8, (255.0 * c.y) as u8, (255.0 * c.z) as u8])
    })
}
