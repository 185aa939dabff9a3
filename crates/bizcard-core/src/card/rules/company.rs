//! Company name matching.

use super::FieldRule;
use crate::models::card::FieldKey;

/// Matches fully upper-case fragments longer than two characters.
pub struct CompanyNameRule;

impl FieldRule for CompanyNameRule {
    fn key(&self) -> FieldKey {
        FieldKey::CompanyName
    }

    fn matches(&self, fragment: &str) -> bool {
        fragment.chars().count() > 2 && is_upper_case(fragment)
    }
}

/// At least one cased character and no lower-case ones.
fn is_upper_case(text: &str) -> bool {
    text.chars().any(char::is_uppercase) && !text.chars().any(char::is_lowercase)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matches_upper_case() {
        assert!(CompanyNameRule.matches("ACME CORP"));
        assert!(CompanyNameRule.matches("ACME & SONS"));
        assert!(CompanyNameRule.matches("A1B"));
    }

    #[test]
    fn test_rejects_short_or_mixed() {
        assert!(!CompanyNameRule.matches("IT"));
        assert!(!CompanyNameRule.matches("Acme Corp"));
        assert!(!CompanyNameRule.matches("123"));
        assert!(!CompanyNameRule.matches("..."));
    }
}
