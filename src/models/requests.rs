//! Request DTOs for the lookup API
//!
//! Defines the structure of incoming query strings and request bodies.

use serde::Deserialize;

use crate::models::{AddressDetails, FormatLayout};

/// Query string for address searches (GET /addresses)
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AddressSearchQuery {
    /// Free-text search term, usually a postcode
    #[serde(default)]
    pub term: String,
    /// Optional ISO2 country code
    #[serde(default)]
    pub country: Option<String>,
    /// Bypass both cache tiers for this read
    #[serde(default)]
    pub reset: bool,
}

/// Query string for address details (GET /addresses/:id)
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AddressDetailsQuery {
    #[serde(default)]
    pub reset: bool,
}

/// Request body for selecting the default service (PUT /services/default)
#[derive(Debug, Clone, Deserialize)]
pub struct SetDefaultServiceRequest {
    /// Identifier of a registered provider
    pub id: String,
}

/// Request body for updating settings (PUT /settings)
///
/// Absent fields keep their current value.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateSettingsRequest {
    #[serde(default)]
    pub default_service: Option<String>,
    #[serde(default)]
    pub cache_length: Option<u64>,
}

impl UpdateSettingsRequest {
    /// Validates the request data
    ///
    /// Returns an error message if validation fails, None if valid.
    pub fn validate(&self) -> Option<String> {
        if matches!(self.default_service.as_deref(), Some(id) if id.trim().is_empty()) {
            return Some("Default service cannot be empty".to_string());
        }
        None
    }
}

/// Request body for format updates (POST /format)
#[derive(Debug, Clone, Deserialize)]
pub struct FormatUpdateRequest {
    pub format: FormatLayout,
    #[serde(default)]
    pub address: AddressDetails,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_query_defaults() {
        let query: AddressSearchQuery = serde_json::from_str(r#"{"term": "TS1 1ST"}"#).unwrap();
        assert_eq!(query.term, "TS1 1ST");
        assert!(query.country.is_none());
        assert!(!query.reset);
    }

    #[test]
    fn test_update_settings_partial() {
        let req: UpdateSettingsRequest = serde_json::from_str(r#"{"cache_length": 60}"#).unwrap();
        assert_eq!(req.cache_length, Some(60));
        assert!(req.default_service.is_none());
        assert!(req.validate().is_none());
    }

    #[test]
    fn test_validate_blank_default_service() {
        let req = UpdateSettingsRequest {
            default_service: Some("  ".to_string()),
            cache_length: None,
        };
        assert!(req.validate().is_some());
    }

    #[test]
    fn test_format_request_without_address() {
        let json = r#"{"format": {"premise": {"weight": 1}}}"#;
        let req: FormatUpdateRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.format["premise"]["weight"], 1);
        assert!(req.address.id.is_empty());
    }
}
