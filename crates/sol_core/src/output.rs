//! Writing rendered images to disk.
//!
//! The format is picked from the file extension: `.png` goes through the
//! `image` crate, anything else is written as a 32-bit bitmap.

use std::path::Path;

use sol_math::unpack_argb;
use thiserror::Error;

use crate::bitmap::{save_bitmap, BitmapError};
use crate::buffer::Image32;

/// Errors that can occur while saving an image.
#[derive(Error, Debug)]
pub enum OutputError {
    #[error("Bitmap error: {0}")]
    Bitmap(#[from] BitmapError),

    #[error("PNG encoding error: {0}")]
    Png(#[from] image::ImageError),
}

/// Supported output formats.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    Bitmap,
    Png,
}

impl OutputFormat {
    /// Guess the format from a path's extension. Defaults to bitmap.
    pub fn from_path(path: &Path) -> Self {
        match path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase())
            .as_deref()
        {
            Some("png") => OutputFormat::Png,
            _ => OutputFormat::Bitmap,
        }
    }
}

/// Convert to a top-down RGBA8 image.
pub fn to_rgba_image(image: &Image32) -> image::RgbaImage {
    let height = image.height();
    image::RgbaImage::from_fn(image.width(), height, |x, y| {
        let word = image.get(x, height - 1 - y).unwrap_or_default();
        image::Rgba(unpack_argb(word))
    })
}

/// Save `image` to `path` in the format implied by its extension.
pub fn save_image<P: AsRef<Path>>(image: &Image32, path: P) -> Result<(), OutputError> {
    let path = path.as_ref();
    let format = OutputFormat::from_path(path);
    log::debug!("Writing {:?} image to {}", format, path.display());

    match format {
        OutputFormat::Bitmap => save_bitmap(image, path)?,
        OutputFormat::Png => {
            to_rgba_image(image).save_with_format(path, image::ImageFormat::Png)?
        }
    }
    Ok(())
}
