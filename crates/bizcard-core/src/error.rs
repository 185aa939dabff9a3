//! Error types for the bizcard-core library.

use thiserror::Error;

/// Main error type for the bizcard library.
#[derive(Error, Debug)]
pub enum BizCardError {
    /// OCR processing error.
    #[error("OCR error: {0}")]
    Ocr(#[from] OcrError),

    /// Field classification error.
    #[error("classification error: {0}")]
    Classify(#[from] ClassifyError),

    /// Image processing error.
    #[error("image error: {0}")]
    Image(#[from] image::ImageError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors related to OCR processing.
#[derive(Error, Debug)]
pub enum OcrError {
    /// Failed to load OCR models.
    #[error("failed to load model: {0}")]
    ModelLoad(String),

    /// Text detection failed.
    #[error("text detection failed: {0}")]
    Detection(String),

    /// Invalid image format or dimensions.
    #[error("invalid image: {0}")]
    InvalidImage(String),
}

/// Errors related to card field classification.
#[derive(Error, Debug, PartialEq)]
pub enum ClassifyError {
    /// Name and designation are taken from the first two fragments, so at
    /// least two are required.
    #[error("need at least 2 text fragments, found {found}")]
    TooFewFragments { found: usize },

    /// One of the positional fragments was recognized with a score below
    /// the configured threshold.
    #[error("fragment {index} recognized with low confidence ({score:.2})")]
    LowPositionalConfidence { index: usize, score: f32 },

    /// A field name could not be mapped to a field key.
    #[error("unknown field: {0}")]
    UnknownField(String),
}

/// Result type for the bizcard library.
pub type Result<T> = std::result::Result<T, BizCardError>;
