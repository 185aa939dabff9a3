//! Image → record pipeline: recognize, classify, re-encode for storage.

use image::DynamicImage;
use tracing::info;

use crate::error::Result;
use crate::models::card::CardEntry;
use crate::models::config::BizCardConfig;
use crate::ocr::{ImagePreprocessor, Recognizer};

use super::classifier::{CardClassifier, ClassificationResult};

/// A scanned card ready for preview or saving.
#[derive(Debug, Clone)]
pub struct ScannedCard {
    /// Classification outcome.
    pub classification: ClassificationResult,
    /// Source image re-encoded as PNG.
    pub image_png: Vec<u8>,
}

impl ScannedCard {
    /// Convert into a storable entry.
    pub fn into_entry(self) -> CardEntry {
        CardEntry::new(self.classification.record, self.image_png)
    }
}

/// Runs a recognizer and the classifier over card images.
pub struct CardScanner<R: Recognizer> {
    recognizer: R,
    classifier: CardClassifier,
    preprocessor: ImagePreprocessor,
}

impl<R: Recognizer> CardScanner<R> {
    /// Create a scanner with default classifier settings.
    pub fn new(recognizer: R) -> Self {
        Self {
            recognizer,
            classifier: CardClassifier::new(),
            preprocessor: ImagePreprocessor::new(),
        }
    }

    /// Create a scanner configured from `config`.
    pub fn from_config(recognizer: R, config: &BizCardConfig) -> Self {
        Self {
            recognizer,
            classifier: CardClassifier::from_config(&config.extraction),
            preprocessor: ImagePreprocessor::new().with_max_size(config.ocr.max_image_size),
        }
    }

    /// Replace the classifier.
    pub fn with_classifier(mut self, classifier: CardClassifier) -> Self {
        self.classifier = classifier;
        self
    }

    /// Scan an already decoded image.
    pub fn scan(&self, image: &DynamicImage) -> Result<ScannedCard> {
        let ocr_result = self.recognizer.recognize(image)?;
        info!("Recognizer returned {} fragments", ocr_result.boxes.len());

        let classification = self.classifier.classify_ocr(&ocr_result)?;
        let image_png = self.preprocessor.encode_png(image)?;

        Ok(ScannedCard {
            classification,
            image_png,
        })
    }

    /// Decode image bytes and scan them.
    pub fn scan_bytes(&self, bytes: &[u8]) -> Result<ScannedCard> {
        let image = self.preprocessor.decode(bytes)?;
        self.scan(&image)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{BizCardError, ClassifyError};
    use crate::ocr::StaticRecognizer;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_scan_produces_entry() {
        let scanner = CardScanner::new(StaticRecognizer::new([
            "Jane Doe",
            "CTO",
            "ACME CORP",
            "jane@acme.com",
        ]));
        let image = DynamicImage::new_rgb8(16, 8);

        let entry = scanner.scan(&image).unwrap().into_entry();

        assert_eq!(entry.name(), "Jane Doe");
        assert_eq!(entry.record.company_name, "ACME CORP");
        assert_eq!(entry.record.email, "jane@acme.com");

        let decoded = image::load_from_memory(&entry.image).unwrap();
        assert_eq!(decoded.width(), 16);
        assert_eq!(decoded.height(), 8);
    }

    #[test]
    fn test_scan_without_text() {
        let scanner = CardScanner::new(StaticRecognizer::new(["lonely"]));
        let image = DynamicImage::new_rgb8(4, 4);

        let err = scanner.scan(&image).unwrap_err();

        assert!(matches!(
            err,
            BizCardError::Classify(ClassifyError::TooFewFragments { found: 1 })
        ));
    }

    #[test]
    fn test_scan_bytes_rejects_non_images() {
        let scanner = CardScanner::new(StaticRecognizer::new(["a", "b"]));
        assert!(matches!(
            scanner.scan_bytes(b"plain text"),
            Err(BizCardError::Image(_))
        ));
    }
}
