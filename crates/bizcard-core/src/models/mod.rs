//! Data models and configuration.

pub mod card;
pub mod config;

pub use card::{CardEntry, ExtractedRecord, FieldKey, FIELD_SEPARATOR, NOT_AVAILABLE};
pub use config::{BizCardConfig, ExtractionConfig, ModelConfig, OcrConfig, StoreConfig};
