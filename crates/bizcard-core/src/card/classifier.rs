//! Positional + rule-chain classifier turning fragments into a card record.

use std::collections::BTreeMap;
use std::time::Instant;

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::error::ClassifyError;
use crate::models::card::{ExtractedRecord, FieldKey, FIELD_SEPARATOR};
use crate::models::config::ExtractionConfig;
use crate::ocr::OcrResult;

use super::rules::RuleChain;

/// Number of leading fragments assigned by position (name, designation).
pub const POSITIONAL_FRAGMENTS: usize = 2;

/// Result of classifying one card.
#[derive(Debug, Clone, Serialize)]
pub struct ClassificationResult {
    /// Labeled record.
    pub record: ExtractedRecord,
    /// Fragments that were classified, in input order.
    pub fragments: Vec<String>,
    /// Fragments no rule accepted.
    pub discarded: Vec<String>,
    /// Non-fatal issues (e.g. low positional confidence).
    pub warnings: Vec<String>,
    /// Processing time in milliseconds.
    pub processing_time_ms: u64,
}

/// Classifies ordered OCR fragments into card fields.
pub struct CardClassifier {
    rules: RuleChain,
    min_positional_confidence: f32,
    reject_low_confidence: bool,
    skip_blank_fragments: bool,
}

impl CardClassifier {
    /// Create a classifier with the standard rules and default settings.
    pub fn new() -> Self {
        Self::from_config(&ExtractionConfig::default())
    }

    /// Create a classifier from extraction settings.
    pub fn from_config(config: &ExtractionConfig) -> Self {
        Self {
            rules: RuleChain::with_region(config.region.as_deref()),
            min_positional_confidence: config.min_positional_confidence,
            reject_low_confidence: config.reject_low_confidence,
            skip_blank_fragments: config.skip_blank_fragments,
        }
    }

    /// Replace the rule chain.
    pub fn with_rules(mut self, rules: RuleChain) -> Self {
        self.rules = rules;
        self
    }

    /// Set the minimum recognition score for name and designation.
    pub fn with_min_positional_confidence(mut self, confidence: f32) -> Self {
        self.min_positional_confidence = confidence;
        self
    }

    /// Fail instead of warning on low positional confidence.
    pub fn with_low_confidence_rejection(mut self, reject: bool) -> Self {
        self.reject_low_confidence = reject;
        self
    }

    /// Set whether blank recognizer boxes are dropped.
    pub fn with_blank_skipping(mut self, skip: bool) -> Self {
        self.skip_blank_fragments = skip;
        self
    }

    /// Classify fragments into a record.
    ///
    /// The first fragment is the name and the second the designation,
    /// whatever they contain; fewer than two fragments is an error.
    pub fn classify<S: AsRef<str>>(&self, fragments: &[S]) -> Result<ExtractedRecord, ClassifyError> {
        self.classify_detailed(fragments).map(|result| result.record)
    }

    /// Classify fragments, keeping the discarded ones and timing.
    pub fn classify_detailed<S: AsRef<str>>(
        &self,
        fragments: &[S],
    ) -> Result<ClassificationResult, ClassifyError> {
        let start = Instant::now();

        if fragments.len() < POSITIONAL_FRAGMENTS {
            return Err(ClassifyError::TooFewFragments {
                found: fragments.len(),
            });
        }

        let mut matched: BTreeMap<FieldKey, Vec<String>> = BTreeMap::new();
        let mut discarded = Vec::new();

        matched
            .entry(FieldKey::Name)
            .or_default()
            .push(fragments[0].as_ref().to_string());
        matched
            .entry(FieldKey::Designation)
            .or_default()
            .push(fragments[1].as_ref().to_string());

        for fragment in &fragments[POSITIONAL_FRAGMENTS..] {
            let fragment = fragment.as_ref();
            match self.rules.apply(fragment) {
                Some(rule_match) if rule_match.value.is_empty() => {
                    debug!("{:?} -> {} (nothing left after normalization)", fragment, rule_match.key);
                }
                Some(rule_match) => {
                    debug!("{:?} -> {}", fragment, rule_match.key);
                    matched.entry(rule_match.key).or_default().push(rule_match.value);
                }
                None => {
                    debug!("{:?} matched no rule, discarding", fragment);
                    discarded.push(fragment.to_string());
                }
            }
        }

        let mut record = ExtractedRecord::empty();
        for (key, values) in &matched {
            record.set(*key, values.join(FIELD_SEPARATOR));
        }

        let processing_time_ms = start.elapsed().as_millis() as u64;

        info!(
            "Classified {} fragments: {} fields filled, {} discarded",
            fragments.len(),
            matched.len(),
            discarded.len()
        );

        Ok(ClassificationResult {
            record,
            fragments: fragments.iter().map(|f| f.as_ref().to_string()).collect(),
            discarded,
            warnings: Vec::new(),
            processing_time_ms,
        })
    }

    /// Classify recognizer output, checking the confidence of the
    /// positional fragments.
    pub fn classify_ocr(&self, ocr_result: &OcrResult) -> Result<ClassificationResult, ClassifyError> {
        let boxes: Vec<_> = ocr_result
            .boxes
            .iter()
            .filter(|b| !self.skip_blank_fragments || !b.text.trim().is_empty())
            .collect();

        if boxes.len() < POSITIONAL_FRAGMENTS {
            return Err(ClassifyError::TooFewFragments { found: boxes.len() });
        }

        let mut warnings = Vec::new();
        for (index, text_box) in boxes.iter().take(POSITIONAL_FRAGMENTS).enumerate() {
            if text_box.recognition_score >= self.min_positional_confidence {
                continue;
            }

            if self.reject_low_confidence {
                return Err(ClassifyError::LowPositionalConfidence {
                    index,
                    score: text_box.recognition_score,
                });
            }

            let field = if index == 0 { FieldKey::Name } else { FieldKey::Designation };
            warn!(
                "{} fragment {:?} recognized with low confidence {:.2}",
                field, text_box.text, text_box.recognition_score
            );
            warnings.push(format!(
                "{} may be misread (confidence {:.2})",
                field, text_box.recognition_score
            ));
        }

        let fragments: Vec<&str> = boxes.iter().map(|b| b.text.as_str()).collect();
        let mut result = self.classify_detailed(&fragments)?;
        result.warnings = warnings;
        result.processing_time_ms += ocr_result.processing_time_ms;

        Ok(result)
    }
}

impl Default for CardClassifier {
    fn default() -> Self {
        Self::new()
    }
}

/// Classify fragments with the standard rules.
pub fn classify<S: AsRef<str>>(fragments: &[S]) -> Result<ExtractedRecord, ClassifyError> {
    CardClassifier::new().classify(fragments)
}
