//! Postal code matching.

use regex::Regex;

use super::patterns::{region_pattern, PINCODE, WHITESPACE};
use super::FieldRule;
use crate::models::card::FieldKey;

/// Matches fragments containing a standalone six-digit number.
///
/// With a region configured, fragments naming the region also match and the
/// region name is removed from the stored value.
pub struct PincodeRule {
    region: Option<Regex>,
}

impl PincodeRule {
    /// Create a rule without a region keyword.
    pub fn new() -> Self {
        Self { region: None }
    }

    /// Fold a region name (e.g. "Tamil Nadu") into the rule.
    pub fn with_region(mut self, region: &str) -> Self {
        self.region = region_pattern(region);
        self
    }
}

impl Default for PincodeRule {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldRule for PincodeRule {
    fn key(&self) -> FieldKey {
        FieldKey::Pincode
    }

    fn matches(&self, fragment: &str) -> bool {
        PINCODE.is_match(fragment)
            || self
                .region
                .as_ref()
                .is_some_and(|region| region.is_match(fragment))
    }

    fn normalize(&self, fragment: &str) -> String {
        match &self.region {
            Some(region) if region.is_match(fragment) => {
                let stripped = region.replace_all(fragment, " ");
                WHITESPACE
                    .replace_all(&stripped, " ")
                    .trim_matches(|c: char| c.is_whitespace() || c == ',')
                    .to_string()
            }
            _ => fragment.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_six_digits() {
        let rule = PincodeRule::new();
        assert!(rule.matches("600028"));
        assert!(rule.matches("Chennai 600028"));
        assert!(!rule.matches("60002"));
        assert!(!rule.matches("9876543210"));
    }

    #[test]
    fn test_value_kept_verbatim_without_region() {
        let rule = PincodeRule::new();
        assert_eq!(rule.normalize("Tamil Nadu 600028"), "Tamil Nadu 600028");
    }

    #[test]
    fn test_region_keyword() {
        let rule = PincodeRule::new().with_region("Tamil Nadu");

        assert!(rule.matches("TamilNadu"));
        assert_eq!(rule.normalize("Tamil Nadu 600028"), "600028");
        assert_eq!(rule.normalize("TamilNadu 600 113"), "600 113");
        assert_eq!(rule.normalize("Chennai, Tamil Nadu, 600028"), "Chennai, 600028");
        assert_eq!(rule.normalize("600028"), "600028");
    }
}
