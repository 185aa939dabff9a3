//! Subcommands and the state they share.

pub mod batch;
pub mod classify;
pub mod config;
pub mod output;
pub mod records;
pub mod scan;

use std::path::{Path, PathBuf};

use console::style;
use tracing::{debug, warn};

use bizcard_core::models::config::BizCardConfig;
use bizcard_core::{CardEntry, PureOcrEngine};
use bizcard_store::CardStore;

/// Global options resolved once and handed to every command.
pub struct CliContext {
    config_path: Option<PathBuf>,
    db_path: Option<PathBuf>,
}

impl CliContext {
    pub fn new(config_path: Option<PathBuf>, db_path: Option<PathBuf>) -> Self {
        Self {
            config_path,
            db_path,
        }
    }

    /// Config file in use: `--config` or the platform default.
    pub fn config_path(&self) -> PathBuf {
        self.config_path.clone().unwrap_or_else(default_config_path)
    }

    /// Load the configuration. A missing default file yields the defaults;
    /// a missing file named with `--config` is an error.
    pub fn load_config(&self) -> anyhow::Result<BizCardConfig> {
        let path = self.config_path();

        if path.exists() {
            debug!("Loading configuration from {}", path.display());
            return BizCardConfig::from_file(&path).map_err(|e| {
                anyhow::anyhow!("Failed to read config {}: {}", path.display(), e)
            });
        }

        if self.config_path.is_some() {
            anyhow::bail!("Config file not found: {}", path.display());
        }

        Ok(BizCardConfig::default())
    }

    /// Database file: `--db`, then `store.database` from the config, then
    /// the platform data directory.
    pub fn db_path(&self, config: &BizCardConfig) -> PathBuf {
        self.db_path
            .clone()
            .or_else(|| config.store.database.clone())
            .unwrap_or_else(default_db_path)
    }

    /// Open the card store, creating the schema if needed.
    pub fn open_store(&self, config: &BizCardConfig) -> anyhow::Result<CardStore> {
        let path = self.db_path(config);
        CardStore::open(&path)
            .map_err(|e| anyhow::anyhow!("Failed to open card database {}: {}", path.display(), e))
    }
}

pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("bizcard")
        .join("config.json")
}

pub fn default_db_path() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("bizcard")
        .join("cards.db")
}

/// Load the OCR engine from `model_dir`, or the directory named in the config.
pub fn load_engine(model_dir: Option<&Path>, config: &BizCardConfig) -> anyhow::Result<PureOcrEngine> {
    let model_dir = model_dir.unwrap_or(config.models.model_dir.as_path());

    PureOcrEngine::from_dir(model_dir, &config.models, config.ocr.clone()).map_err(|e| {
        anyhow::anyhow!(
            "Failed to load OCR models from {}: {}\n\n\
             Place {}, {} and {} there or pass --model-dir.",
            model_dir.display(),
            e,
            config.models.detection_model,
            config.models.recognition_model,
            config.models.dictionary
        )
    })
}

/// Insert a card, telling the user how to retry if the write failed.
pub fn save_entry(store: &CardStore, entry: &CardEntry) -> anyhow::Result<()> {
    match store.insert(entry) {
        Ok(()) => {
            eprintln!(
                "{} Saved card for {} to {}",
                style("✓").green(),
                entry.name(),
                store.path().display()
            );
            Ok(())
        }
        Err(e) if e.is_retryable() => {
            warn!("Insert failed: {}", e);
            anyhow::bail!("Card was not saved: {}. Nothing was written; run the command again to retry.", e)
        }
        Err(e) => Err(e.into()),
    }
}
