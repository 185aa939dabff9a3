//! Core library for business card OCR processing.
//!
//! This crate provides:
//! - A recognizer adapter turning card images into ordered text fragments
//! - The rule-based field classifier (name, designation, company, contact,
//!   email, website, address, pincode)
//! - Card data models and pipeline configuration

pub mod card;
pub mod error;
pub mod models;
pub mod ocr;

pub use card::{classify, CardClassifier, CardScanner, ClassificationResult, ScannedCard};
pub use error::{BizCardError, ClassifyError, OcrError, Result};
pub use models::card::{CardEntry, ExtractedRecord, FieldKey, NOT_AVAILABLE};
pub use models::config::BizCardConfig;
pub use ocr::{ImagePreprocessor, OcrResult, Recognizer, StaticRecognizer, TextBox};

#[cfg(feature = "native")]
pub use ocr::PureOcrEngine;
