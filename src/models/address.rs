//! Address data shared by providers, the lookup manager and the API.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Field name → layout metadata describing an address form.
pub type FormatLayout = BTreeMap<String, serde_json::Value>;

// == Address Summary ==
/// One candidate address returned by a search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddressSummary {
    /// Provider-defined address identifier
    pub id: String,
    /// Street (address line 1)
    pub street: String,
    /// Remainder of the address
    pub place: String,
}

impl AddressSummary {
    pub fn new(id: impl Into<String>, street: impl Into<String>, place: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            street: street.into(),
            place: place.into(),
        }
    }
}

// == Address Details ==
/// Full structured record for one address.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddressDetails {
    /// Provider-defined address identifier
    pub id: String,
    #[serde(default)]
    pub sub_premise: String,
    /// Apartment or suite number
    #[serde(default)]
    pub premise: String,
    /// Street address
    #[serde(default)]
    pub thoroughfare: String,
    #[serde(default)]
    pub dependent_locality: String,
    /// City
    #[serde(default)]
    pub locality: String,
    #[serde(default)]
    pub postal_code: String,
    /// State or province
    #[serde(default)]
    pub administrative_area: String,
    #[serde(default)]
    pub organisation_name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_serialize() {
        let summary = AddressSummary::new("1234", "Example Street", "Example City");
        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["id"], "1234");
        assert_eq!(json["street"], "Example Street");
        assert_eq!(json["place"], "Example City");
    }

    #[test]
    fn test_details_deserialize_with_missing_fields() {
        let json = r#"{"id": "1234", "postal_code": "TS1 1ST"}"#;
        let details: AddressDetails = serde_json::from_str(json).unwrap();
        assert_eq!(details.id, "1234");
        assert_eq!(details.postal_code, "TS1 1ST");
        assert!(details.thoroughfare.is_empty());
    }
}
