//! PNG output.

use std::path::Path;

use image::{ColorType, RgbImage};
use thiserror::Error;

use crate::renderer::ImageBuffer;

/// Errors that can occur while writing images.
#[derive(Error, Debug)]
pub enum OutputError {
    #[error("Failed to write {path}: {source}")]
    Image {
        path: String,
        #[source]
        source: image::ImageError,
    },
}

/// Result type for output operations.
pub type OutputResult<T> = Result<T, OutputError>;

fn write_error(path: &Path) -> impl FnOnce(image::ImageError) -> OutputError + '_ {
    move |source| OutputError::Image {
        path: path.display().to_string(),
        source,
    }
}

/// Tone map `image` and save it as an RGBA PNG.
pub fn save_rgba_png(image: &ImageBuffer, path: impl AsRef<Path>) -> OutputResult<()> {
    let path = path.as_ref();
    image::save_buffer(path, &image.to_rgba8(), image.width, image.height, ColorType::Rgba8)
        .map_err(write_error(path))?;
    log::info!("Wrote {}", path.display());
    Ok(())
}

/// Save a diagnostic preview as an RGB PNG.
pub fn save_rgb_png(image: &RgbImage, path: impl AsRef<Path>) -> OutputResult<()> {
    let path = path.as_ref();
    image.save(path).map_err(write_error(path))?;
    log::info!("Wrote {}", path.display());
    Ok(())
}
