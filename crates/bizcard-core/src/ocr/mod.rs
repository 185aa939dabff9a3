//! Recognizer adapter: image in, ordered text fragments out.

mod preprocessing;
#[cfg(feature = "native")]
mod pure_engine;

pub use preprocessing::ImagePreprocessor;
#[cfg(feature = "native")]
pub use pure_engine::PureOcrEngine;

use image::DynamicImage;
use serde::{Deserialize, Serialize};

use crate::error::OcrError;

/// Anything that turns a decoded image into recognized text boxes.
///
/// Implementations must return boxes in reading order; the classifier relies
/// on the first two being the name and the designation.
pub trait Recognizer {
    /// Recognize text in the image.
    fn recognize(&self, image: &DynamicImage) -> Result<OcrResult, OcrError>;
}

/// A detected text box with its coordinates and content.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextBox {
    /// Bounding box coordinates (x1, y1, x2, y2, x3, y3, x4, y4) for quadrilateral.
    pub bbox: [f32; 8],

    /// Recognized text content.
    pub text: String,

    /// Recognition confidence score (0.0 - 1.0).
    pub recognition_score: f32,
}

impl TextBox {
    /// Create a box without geometry, e.g. for text supplied by hand.
    pub fn from_text(text: impl Into<String>) -> Self {
        Self {
            bbox: [0.0; 8],
            text: text.into(),
            recognition_score: 1.0,
        }
    }

    /// Get the axis-aligned bounding rectangle.
    pub fn rect(&self) -> (f32, f32, f32, f32) {
        let xs = [self.bbox[0], self.bbox[2], self.bbox[4], self.bbox[6]];
        let ys = [self.bbox[1], self.bbox[3], self.bbox[5], self.bbox[7]];

        let min_x = xs.iter().cloned().fold(f32::INFINITY, f32::min);
        let max_x = xs.iter().cloned().fold(f32::NEG_INFINITY, f32::max);
        let min_y = ys.iter().cloned().fold(f32::INFINITY, f32::min);
        let max_y = ys.iter().cloned().fold(f32::NEG_INFINITY, f32::max);

        (min_x, min_y, max_x, max_y)
    }
}

/// Result of OCR processing on an image.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OcrResult {
    /// Recognized text boxes in reading order.
    pub boxes: Vec<TextBox>,

    /// Processing time in milliseconds.
    pub processing_time_ms: u64,

    /// Image dimensions (width, height).
    pub image_size: (u32, u32),
}

impl OcrResult {
    /// Create an empty result.
    pub fn empty(width: u32, height: u32) -> Self {
        Self {
            boxes: Vec::new(),
            processing_time_ms: 0,
            image_size: (width, height),
        }
    }

    /// Build a result from plain fragments, one box per fragment.
    pub fn from_fragments<I, S>(fragments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            boxes: fragments.into_iter().map(TextBox::from_text).collect(),
            processing_time_ms: 0,
            image_size: (0, 0),
        }
    }

    /// Recognized fragments in reading order.
    pub fn fragments(&self) -> Vec<String> {
        self.boxes.iter().map(|b| b.text.clone()).collect()
    }

    /// Sort boxes by reading order (top-to-bottom, left-to-right).
    ///
    /// Boxes whose top edges fall in the same `line_height` band count as one
    /// line and are ordered by their left edge.
    pub fn sort_by_reading_order(&mut self, line_height: f32) {
        let line_height = if line_height > 0.0 { line_height } else { 1.0 };

        self.boxes.sort_by(|a, b| {
            let (ax, ay, _, _) = a.rect();
            let (bx, by, _, _) = b.rect();

            let row_a = (ay / line_height) as i32;
            let row_b = (by / line_height) as i32;

            if row_a != row_b {
                row_a.cmp(&row_b)
            } else {
                ax.partial_cmp(&bx).unwrap_or(std::cmp::Ordering::Equal)
            }
        });
    }
}

/// Recognizer returning a fixed list of fragments regardless of the image.
///
/// Used when the card text is already known (typed in, or read from a file).
#[derive(Debug, Clone, Default)]
pub struct StaticRecognizer {
    fragments: Vec<String>,
}

impl StaticRecognizer {
    /// Create a recognizer that always yields `fragments`.
    pub fn new<I, S>(fragments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            fragments: fragments.into_iter().map(Into::into).collect(),
        }
    }
}

impl Recognizer for StaticRecognizer {
    fn recognize(&self, image: &DynamicImage) -> Result<OcrResult, OcrError> {
        let mut result = OcrResult::from_fragments(self.fragments.iter().cloned());
        result.image_size = (image.width(), image.height());
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn text_box(text: &str, x: f32, y: f32) -> TextBox {
        TextBox {
            bbox: [x, y, x + 50.0, y, x + 50.0, y + 10.0, x, y + 10.0],
            text: text.to_string(),
            recognition_score: 0.9,
        }
    }

    #[test]
    fn test_sort_by_reading_order() {
        let mut result = OcrResult::empty(200, 200);
        result.boxes = vec![
            text_box("street", 10.0, 100.0),
            text_box("title", 10.0, 40.0),
            text_box("surname", 80.0, 5.0),
            text_box("first", 10.0, 2.0),
        ];

        result.sort_by_reading_order(20.0);

        assert_eq!(result.fragments(), vec!["first", "surname", "title", "street"]);
    }

    #[test]
    fn test_static_recognizer_reports_image_size() {
        let recognizer = StaticRecognizer::new(["Jane Doe", "CTO"]);
        let image = DynamicImage::new_rgb8(32, 16);

        let result = recognizer.recognize(&image).unwrap();

        assert_eq!(result.fragments(), vec!["Jane Doe", "CTO"]);
        assert_eq!(result.image_size, (32, 16));
        assert_eq!(result.boxes[0].recognition_score, 1.0);
    }
}
