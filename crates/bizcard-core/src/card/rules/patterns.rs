//! Regex patterns for card field matching.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // Standalone six-digit postal code (Indian PIN format)
    pub static ref PINCODE: Regex = Regex::new(
        r"\b\d{6}\b"
    ).unwrap();

    pub static ref WHITESPACE: Regex = Regex::new(
        r"\s+"
    ).unwrap();
}

/// Build a case-insensitive pattern for a region name that also matches the
/// name written without its inner spaces ("Tamil Nadu" / "TamilNadu"). A
/// trailing comma is consumed with the name.
pub fn region_pattern(region: &str) -> Option<Regex> {
    let words: Vec<String> = region.split_whitespace().map(regex::escape).collect();
    if words.is_empty() {
        return None;
    }

    Regex::new(&format!(r"(?i){},?", words.join(r"\s*"))).ok()
}
