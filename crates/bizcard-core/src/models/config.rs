//! Configuration structures for the card pipeline.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main configuration for the bizcard pipeline.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BizCardConfig {
    /// OCR configuration.
    pub ocr: OcrConfig,

    /// Field extraction configuration.
    pub extraction: ExtractionConfig,

    /// Model configuration.
    pub models: ModelConfig,

    /// Record store configuration.
    pub store: StoreConfig,
}

/// OCR engine configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OcrConfig {
    /// Maximum image dimension (longer side) fed to the recognizer.
    pub max_image_size: u32,

    /// Keep `[UNK]` tokens emitted by the recognizer instead of blanking them.
    pub keep_unk: bool,

    /// Vertical band height (pixels) treated as one line when sorting boxes
    /// into reading order.
    pub line_height: f32,
}

impl Default for OcrConfig {
    fn default() -> Self {
        Self {
            max_image_size: 2048,
            keep_unk: false,
            line_height: 20.0,
        }
    }
}

/// Field extraction configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Region name treated as part of the postal code line (e.g. "Tamil Nadu").
    ///
    /// When set, fragments mentioning the region are classified as pincode
    /// and the region name is stripped from the stored value.
    pub region: Option<String>,

    /// Minimum recognition score for the name and designation fragments.
    pub min_positional_confidence: f32,

    /// Fail instead of warning when a positional fragment is below
    /// `min_positional_confidence`.
    pub reject_low_confidence: bool,

    /// Drop fragments that are empty after trimming before classification.
    pub skip_blank_fragments: bool,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            region: None,
            min_positional_confidence: 0.3,
            reject_low_confidence: false,
            skip_blank_fragments: true,
        }
    }
}

/// Model file paths.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    /// Directory containing model files.
    pub model_dir: PathBuf,

    /// Text detection model file name.
    pub detection_model: String,

    /// Text recognition model file name.
    pub recognition_model: String,

    /// Character dictionary file name.
    pub dictionary: String,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            model_dir: PathBuf::from("models"),
            detection_model: "det.onnx".to_string(),
            recognition_model: "latin_rec.onnx".to_string(),
            dictionary: "latin_dict.txt".to_string(),
        }
    }
}

/// Record store configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// SQLite database file. `None` uses the platform data directory.
    pub database: Option<PathBuf>,
}

impl BizCardConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &std::path::Path) -> Result<Self, std::io::Error> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content).map_err(|e| {
            std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string())
        })
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &std::path::Path) -> Result<(), std::io::Error> {
        let content = serde_json::to_string_pretty(self).map_err(|e| {
            std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string())
        })?;
        std::fs::write(path, content)
    }

    /// Get full path to a model file.
    pub fn model_path(&self, model_name: &str) -> PathBuf {
        self.models.model_dir.join(model_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: BizCardConfig =
            serde_json::from_str(r#"{"extraction": {"region": "Tamil Nadu"}}"#).unwrap();

        assert_eq!(config.extraction.region.as_deref(), Some("Tamil Nadu"));
        assert!(config.extraction.skip_blank_fragments);
        assert_eq!(config.ocr.max_image_size, 2048);
        assert_eq!(config.models.recognition_model, "latin_rec.onnx");
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");

        let mut config = BizCardConfig::default();
        config.store.database = Some(PathBuf::from("/tmp/cards.db"));
        config.save(&path).unwrap();

        let loaded = BizCardConfig::from_file(&path).unwrap();
        assert_eq!(loaded.store.database, Some(PathBuf::from("/tmp/cards.db")));
    }

    #[test]
    fn test_model_path() {
        let config = BizCardConfig::default();
        assert_eq!(config.model_path("det.onnx"), PathBuf::from("models/det.onnx"));
    }
}
