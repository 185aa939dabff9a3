//! Business card field extraction.

mod classifier;
mod pipeline;
pub mod rules;

pub use classifier::{classify, CardClassifier, ClassificationResult, POSITIONAL_FRAGMENTS};
pub use pipeline::{CardScanner, ScannedCard};
