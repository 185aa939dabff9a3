//! Street address matching.

use super::FieldRule;
use crate::models::card::FieldKey;

/// Matches fragments of more than two words; `,` and `;` are stripped from
/// the stored value.
pub struct AddressRule;

impl FieldRule for AddressRule {
    fn key(&self) -> FieldKey {
        FieldKey::Address
    }

    fn matches(&self, fragment: &str) -> bool {
        fragment.split_whitespace().count() > 2
    }

    fn normalize(&self, fragment: &str) -> String {
        fragment.replace([',', ';'], "")
    }
}
