//! Business card data models.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ClassifyError;

/// Value stored for a field that no fragment matched.
pub const NOT_AVAILABLE: &str = "NA";

/// Separator used when several fragments land in the same field.
pub const FIELD_SEPARATOR: &str = ", ";

/// Canonical fields extracted from a business card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FieldKey {
    /// Person name (always the first fragment).
    Name,
    /// Job title (always the second fragment).
    Designation,
    /// Company name.
    CompanyName,
    /// Phone number.
    Contact,
    /// Email address.
    Email,
    /// Website URL.
    Website,
    /// Street address.
    Address,
    /// Postal code.
    Pincode,
}

impl FieldKey {
    /// All keys in canonical (persisted column) order.
    pub const ALL: [FieldKey; 8] = [
        FieldKey::Name,
        FieldKey::Designation,
        FieldKey::CompanyName,
        FieldKey::Contact,
        FieldKey::Email,
        FieldKey::Website,
        FieldKey::Address,
        FieldKey::Pincode,
    ];

    /// Human-readable label used in previews.
    pub fn label(&self) -> &'static str {
        match self {
            FieldKey::Name => "NAME",
            FieldKey::Designation => "DESIGNATION",
            FieldKey::CompanyName => "COMPANY NAME",
            FieldKey::Contact => "CONTACT",
            FieldKey::Email => "EMAIL",
            FieldKey::Website => "WEBSITE",
            FieldKey::Address => "ADDRESS",
            FieldKey::Pincode => "PINCODE",
        }
    }

    /// Column name in the persisted row layout.
    pub fn column(&self) -> &'static str {
        match self {
            FieldKey::Name => "name",
            FieldKey::Designation => "designation",
            FieldKey::CompanyName => "company_name",
            FieldKey::Contact => "contact",
            FieldKey::Email => "email",
            FieldKey::Website => "website",
            FieldKey::Address => "address",
            FieldKey::Pincode => "pin_code",
        }
    }
}

impl fmt::Display for FieldKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for FieldKey {
    type Err = ClassifyError;

    /// Accepts labels and column names in any case (`company name`,
    /// `COMPANY_NAME`, `pin_code`, ...).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_uppercase().replace([' ', '-'], "_");

        match normalized.as_str() {
            "NAME" => Ok(FieldKey::Name),
            "DESIGNATION" | "TITLE" => Ok(FieldKey::Designation),
            "COMPANY_NAME" | "COMPANY" => Ok(FieldKey::CompanyName),
            "CONTACT" | "PHONE" => Ok(FieldKey::Contact),
            "EMAIL" => Ok(FieldKey::Email),
            "WEBSITE" => Ok(FieldKey::Website),
            "ADDRESS" => Ok(FieldKey::Address),
            "PINCODE" | "PIN_CODE" => Ok(FieldKey::Pincode),
            _ => Err(ClassifyError::UnknownField(s.to_string())),
        }
    }
}

/// Labeled record produced by the classifier.
///
/// Every field is always present; a field without a matching fragment holds
/// [`NOT_AVAILABLE`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractedRecord {
    #[serde(rename = "NAME")]
    pub name: String,

    #[serde(rename = "DESIGNATION")]
    pub designation: String,

    #[serde(rename = "COMPANY NAME")]
    pub company_name: String,

    #[serde(rename = "CONTACT")]
    pub contact: String,

    #[serde(rename = "EMAIL")]
    pub email: String,

    #[serde(rename = "WEBSITE")]
    pub website: String,

    #[serde(rename = "ADDRESS")]
    pub address: String,

    #[serde(rename = "PINCODE")]
    pub pincode: String,
}

impl ExtractedRecord {
    /// Create a record with every field set to [`NOT_AVAILABLE`].
    pub fn empty() -> Self {
        Self {
            name: NOT_AVAILABLE.to_string(),
            designation: NOT_AVAILABLE.to_string(),
            company_name: NOT_AVAILABLE.to_string(),
            contact: NOT_AVAILABLE.to_string(),
            email: NOT_AVAILABLE.to_string(),
            website: NOT_AVAILABLE.to_string(),
            address: NOT_AVAILABLE.to_string(),
            pincode: NOT_AVAILABLE.to_string(),
        }
    }

    /// Get the value of a field.
    pub fn get(&self, key: FieldKey) -> &str {
        match key {
            FieldKey::Name => &self.name,
            FieldKey::Designation => &self.designation,
            FieldKey::CompanyName => &self.company_name,
            FieldKey::Contact => &self.contact,
            FieldKey::Email => &self.email,
            FieldKey::Website => &self.website,
            FieldKey::Address => &self.address,
            FieldKey::Pincode => &self.pincode,
        }
    }

    fn slot_mut(&mut self, key: FieldKey) -> &mut String {
        match key {
            FieldKey::Name => &mut self.name,
            FieldKey::Designation => &mut self.designation,
            FieldKey::CompanyName => &mut self.company_name,
            FieldKey::Contact => &mut self.contact,
            FieldKey::Email => &mut self.email,
            FieldKey::Website => &mut self.website,
            FieldKey::Address => &mut self.address,
            FieldKey::Pincode => &mut self.pincode,
        }
    }

    /// Replace the value of a field.
    pub fn set(&mut self, key: FieldKey, value: impl Into<String>) {
        *self.slot_mut(key) = value.into();
    }

    /// Builder-style variant of [`ExtractedRecord::set`].
    pub fn with_field(mut self, key: FieldKey, value: impl Into<String>) -> Self {
        self.set(key, value);
        self
    }

    /// Iterate over `(key, value)` pairs in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = (FieldKey, &str)> + '_ {
        FieldKey::ALL.iter().map(move |key| (*key, self.get(*key)))
    }

    /// Whether a fragment was found for the field.
    pub fn is_available(&self, key: FieldKey) -> bool {
        self.get(key) != NOT_AVAILABLE
    }

    /// Fields that hold the sentinel value.
    pub fn missing_fields(&self) -> Vec<FieldKey> {
        self.iter()
            .filter(|(_, value)| *value == NOT_AVAILABLE)
            .map(|(key, _)| key)
            .collect()
    }
}

impl Default for ExtractedRecord {
    fn default() -> Self {
        Self::empty()
    }
}

/// A persisted card: extracted fields plus the PNG-encoded source image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardEntry {
    /// Classified fields.
    pub record: ExtractedRecord,

    /// PNG-encoded card photo.
    pub image: Vec<u8>,
}

impl CardEntry {
    /// Create a new entry.
    pub fn new(record: ExtractedRecord, image: Vec<u8>) -> Self {
        Self { record, image }
    }

    /// Lookup name of the entry.
    pub fn name(&self) -> &str {
        &self.record.name
    }

    /// Designation of the entry.
    pub fn designation(&self) -> &str {
        &self.record.designation
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_empty_record_has_all_fields_na() {
        let record = ExtractedRecord::empty();
        assert_eq!(record.iter().count(), 8);
        assert!(record.iter().all(|(_, v)| v == NOT_AVAILABLE));
        assert_eq!(record.missing_fields(), FieldKey::ALL.to_vec());
    }

    #[test]
    fn test_set_and_get() {
        let record = ExtractedRecord::empty()
            .with_field(FieldKey::Name, "Jane Doe")
            .with_field(FieldKey::Pincode, "600028");

        assert_eq!(record.get(FieldKey::Name), "Jane Doe");
        assert_eq!(record.pincode, "600028");
        assert!(record.is_available(FieldKey::Name));
        assert!(!record.is_available(FieldKey::Email));
    }

    #[test]
    fn test_field_key_parsing() {
        assert_eq!("name".parse::<FieldKey>(), Ok(FieldKey::Name));
        assert_eq!("COMPANY NAME".parse::<FieldKey>(), Ok(FieldKey::CompanyName));
        assert_eq!("company_name".parse::<FieldKey>(), Ok(FieldKey::CompanyName));
        assert_eq!("pin_code".parse::<FieldKey>(), Ok(FieldKey::Pincode));
        assert_eq!(
            "fax".parse::<FieldKey>(),
            Err(ClassifyError::UnknownField("fax".to_string()))
        );
    }

    #[test]
    fn test_field_key_round_trips_through_column_and_label() {
        for key in FieldKey::ALL {
            assert_eq!(key.column().parse::<FieldKey>(), Ok(key));
            assert_eq!(key.label().parse::<FieldKey>(), Ok(key));
        }
    }

    #[test]
    fn test_record_serializes_with_labels() {
        let record = ExtractedRecord::empty().with_field(FieldKey::CompanyName, "ACME CORP");
        let json = serde_json::to_value(&record).unwrap();

        assert_eq!(json["COMPANY NAME"], "ACME CORP");
        assert_eq!(json["PINCODE"], "NA");
        assert_eq!(json.as_object().unwrap().len(), 8);
    }
}
