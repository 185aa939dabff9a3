//! Rule-based field matchers for business card fragments.
//!
//! Rules are evaluated in order and the first match wins, so structured
//! patterns (phone, email, website, postal code) come before the shape-based
//! heuristics (all-caps company name, multi-word address).

pub mod address;
pub mod company;
pub mod contact;
pub mod email;
pub mod patterns;
pub mod pincode;
pub mod website;

pub use address::AddressRule;
pub use company::CompanyNameRule;
pub use contact::ContactRule;
pub use email::EmailRule;
pub use pincode::PincodeRule;
pub use website::WebsiteRule;

use crate::models::card::FieldKey;

/// A single predicate/label pair in the rule chain.
pub trait FieldRule: Send + Sync {
    /// Field assigned to fragments this rule matches.
    fn key(&self) -> FieldKey;

    /// Whether the fragment belongs to this rule's field.
    fn matches(&self, fragment: &str) -> bool;

    /// Value stored for a matched fragment.
    fn normalize(&self, fragment: &str) -> String {
        fragment.to_string()
    }
}

/// A fragment accepted by a rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleMatch {
    /// Field the fragment was assigned to.
    pub key: FieldKey,
    /// Normalized value.
    pub value: String,
}

/// Ordered, first-match-wins list of rules.
pub struct RuleChain {
    rules: Vec<Box<dyn FieldRule>>,
}

impl RuleChain {
    /// Create a chain from explicit rules.
    pub fn new(rules: Vec<Box<dyn FieldRule>>) -> Self {
        Self { rules }
    }

    /// The standard card rule order.
    pub fn standard() -> Self {
        Self::with_region(None)
    }

    /// The standard rule order with an optional region keyword folded into
    /// the postal code rule.
    pub fn with_region(region: Option<&str>) -> Self {
        let pincode = match region {
            Some(region) => PincodeRule::new().with_region(region),
            None => PincodeRule::new(),
        };

        Self::new(vec![
            Box::new(ContactRule),
            Box::new(EmailRule),
            Box::new(WebsiteRule),
            Box::new(pincode),
            Box::new(CompanyNameRule),
            Box::new(AddressRule),
        ])
    }

    /// Classify a single fragment. `None` means no rule matched.
    pub fn apply(&self, fragment: &str) -> Option<RuleMatch> {
        self.rules
            .iter()
            .find(|rule| rule.matches(fragment))
            .map(|rule| RuleMatch {
                key: rule.key(),
                value: rule.normalize(fragment),
            })
    }

    /// Field keys in evaluation order.
    pub fn keys(&self) -> Vec<FieldKey> {
        self.rules.iter().map(|rule| rule.key()).collect()
    }
}

impl Default for RuleChain {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn key_of(fragment: &str) -> Option<FieldKey> {
        RuleChain::standard().apply(fragment).map(|m| m.key)
    }

    #[test]
    fn test_standard_order() {
        assert_eq!(
            RuleChain::standard().keys(),
            vec![
                FieldKey::Contact,
                FieldKey::Email,
                FieldKey::Website,
                FieldKey::Pincode,
                FieldKey::CompanyName,
                FieldKey::Address,
            ]
        );
    }

    #[test]
    fn test_contact_beats_company_name() {
        assert_eq!(key_of("+91-123456"), Some(FieldKey::Contact));
        assert_eq!(key_of("+ACME"), Some(FieldKey::Contact));
    }

    #[test]
    fn test_email_beats_website() {
        assert_eq!(key_of("jane@acme.com"), Some(FieldKey::Email));
        assert_eq!(key_of("jane@acme.in"), None);
    }

    #[test]
    fn test_pincode_beats_address_and_company() {
        assert_eq!(key_of("Chennai Tamil Nadu 600028"), Some(FieldKey::Pincode));
        assert_eq!(key_of("TN 600028"), Some(FieldKey::Pincode));
    }

    #[test]
    fn test_website_is_lowercased() {
        let matched = RuleChain::standard().apply("WWW.ACME.COM").unwrap();
        assert_eq!(matched.key, FieldKey::Website);
        assert_eq!(matched.value, "www.acme.com");
    }

    #[test]
    fn test_noise_is_not_matched() {
        assert_eq!(key_of("IT"), None);
        assert_eq!(key_of("&"), None);
        assert_eq!(key_of("Main St"), None);
        assert_eq!(key_of("-"), None);
    }

    #[test]
    fn test_custom_chain() {
        let chain = RuleChain::new(vec![Box::new(AddressRule), Box::new(ContactRule)]);
        assert_eq!(chain.apply("+91 98 76").map(|m| m.key), Some(FieldKey::Address));
    }
}
