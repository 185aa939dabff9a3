//! Website matching.

use super::FieldRule;
use crate::models::card::FieldKey;

/// Matches fragments mentioning `www` or `.com` in any case; the stored value
/// is lower-cased.
pub struct WebsiteRule;

impl FieldRule for WebsiteRule {
    fn key(&self) -> FieldKey {
        FieldKey::Website
    }

    fn matches(&self, fragment: &str) -> bool {
        let lower = fragment.to_lowercase();
        lower.contains("www") || lower.contains(".com")
    }

    fn normalize(&self, fragment: &str) -> String {
        fragment.to_lowercase()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matches_any_case() {
        assert!(WebsiteRule.matches("www.acme.com"));
        assert!(WebsiteRule.matches("WWW.acme.in"));
        assert!(WebsiteRule.matches("wWw acme"));
        assert!(WebsiteRule.matches("acme.COM"));
    }

    #[test]
    fn test_rejects_other_text() {
        assert!(!WebsiteRule.matches("acme.in"));
        assert!(!WebsiteRule.matches("Web Designer"));
    }

    #[test]
    fn test_lowercases_value() {
        assert_eq!(WebsiteRule.normalize("WWW.Acme.COM"), "www.acme.com");
    }
}
