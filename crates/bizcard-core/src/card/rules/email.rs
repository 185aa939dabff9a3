//! Email address matching.

use super::FieldRule;
use crate::models::card::FieldKey;

/// Matches fragments containing `@` and a lower-case `.com`.
pub struct EmailRule;

impl FieldRule for EmailRule {
    fn key(&self) -> FieldKey {
        FieldKey::Email
    }

    fn matches(&self, fragment: &str) -> bool {
        fragment.contains('@') && fragment.contains(".com")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matches_com_addresses() {
        assert!(EmailRule.matches("jane@acme.com"));
        assert!(EmailRule.matches("sales@acme.com.au"));
    }

    #[test]
    fn test_com_is_case_sensitive() {
        assert!(!EmailRule.matches("JANE@ACME.COM"));
    }

    #[test]
    fn test_requires_both_parts() {
        assert!(!EmailRule.matches("jane@acme.in"));
        assert!(!EmailRule.matches("www.acme.com"));
    }
}
