//! Phone number matching.

use super::FieldRule;
use crate::models::card::FieldKey;

/// Matches phone numbers: anything starting with `+`, or digit groups
/// joined by dashes (`044-2345-6789`).
pub struct ContactRule;

impl FieldRule for ContactRule {
    fn key(&self) -> FieldKey {
        FieldKey::Contact
    }

    fn matches(&self, fragment: &str) -> bool {
        fragment.starts_with('+') || is_dashed_number(fragment)
    }
}

/// A fragment with at least one `-` whose remaining characters are all digits.
fn is_dashed_number(fragment: &str) -> bool {
    if !fragment.contains('-') {
        return false;
    }

    let mut digits = fragment.chars().filter(|c| *c != '-').peekable();
    digits.peek().is_some() && digits.all(|c| c.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plus_prefix() {
        assert!(ContactRule.matches("+91-9876543210"));
        assert!(ContactRule.matches("+91 98765 43210"));
        assert!(ContactRule.matches("+"));
    }

    #[test]
    fn test_dashed_digits() {
        assert!(ContactRule.matches("044-2345-6789"));
        assert!(ContactRule.matches("123-456"));
        assert!(ContactRule.matches("1234-"));
    }

    #[test]
    fn test_rejects_plain_numbers_and_text() {
        assert!(!ContactRule.matches("600028"));
        assert!(!ContactRule.matches("044 2345 6789"));
        assert!(!ContactRule.matches("Tel-044"));
        assert!(!ContactRule.matches("--"));
        assert!(!ContactRule.matches(""));
    }

    #[test]
    fn test_value_kept_verbatim() {
        assert_eq!(ContactRule.normalize("+91-111"), "+91-111");
    }
}
