//! Image preparation for OCR and storage.

use std::io::Cursor;

use image::{DynamicImage, GenericImageView, ImageFormat};
use tracing::debug;

use crate::error::Result;

/// Image preprocessor for the card pipeline.
///
/// The recognizer gets a downscaled copy; storage gets a lossless PNG of the
/// original.
pub struct ImagePreprocessor {
    /// Maximum image dimension.
    max_size: u32,
}

impl ImagePreprocessor {
    /// Create a new preprocessor with default settings.
    pub fn new() -> Self {
        Self { max_size: 2048 }
    }

    /// Set maximum image dimension.
    pub fn with_max_size(mut self, size: u32) -> Self {
        self.max_size = size;
        self
    }

    /// Decode an image from raw file bytes.
    pub fn decode(&self, bytes: &[u8]) -> Result<DynamicImage> {
        Ok(image::load_from_memory(bytes)?)
    }

    /// Re-encode an image as PNG for storage.
    pub fn encode_png(&self, image: &DynamicImage) -> Result<Vec<u8>> {
        let mut buffer = Cursor::new(Vec::new());
        image.write_to(&mut buffer, ImageFormat::Png)?;
        let bytes = buffer.into_inner();
        debug!("Encoded {}x{} image to {} PNG bytes", image.width(), image.height(), bytes.len());
        Ok(bytes)
    }

    /// Downscale an image so that its longer side fits `max_size`.
    pub fn prepare_for_ocr(&self, image: &DynamicImage) -> DynamicImage {
        let (orig_width, orig_height) = image.dimensions();
        let (new_width, new_height) =
            self.calculate_resize_dimensions(orig_width, orig_height, self.max_size);

        if (new_width, new_height) == (orig_width, orig_height) {
            return image.clone();
        }

        debug!(
            "Resizing image for OCR: {}x{} -> {}x{}",
            orig_width, orig_height, new_width, new_height
        );

        image.resize_exact(
            new_width,
            new_height,
            image::imageops::FilterType::Lanczos3,
        )
    }

    fn calculate_resize_dimensions(
        &self,
        width: u32,
        height: u32,
        target_size: u32,
    ) -> (u32, u32) {
        let max_dim = width.max(height);

        if target_size == 0 || max_dim <= target_size {
            return (width, height);
        }

        let scale = target_size as f32 / max_dim as f32;
        let new_width = (width as f32 * scale) as u32;
        let new_height = (height as f32 * scale) as u32;

        (new_width.max(1), new_height.max(1))
    }
}

impl Default for ImagePreprocessor {
    fn default() -> Self {
        Self::new()
    }
}
