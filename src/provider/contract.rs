//! Provider Contract
//!
//! The interface every address lookup provider implements, plus the metadata
//! it is registered with.

use serde::{Deserialize, Serialize};

use crate::models::{AddressDetails, AddressSummary, FormatLayout};

/// ISO2 country a provider is bound to when none is requested.
pub const DEFAULT_COUNTRY: &str = "GB";

/// Returns the country a provider instance should be bound to.
pub fn resolve_country(country: Option<&str>) -> &str {
    match country {
        Some(code) if !code.is_empty() => code,
        _ => DEFAULT_COUNTRY,
    }
}

// == Provider Definition ==
/// Metadata a provider is registered with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderDefinition {
    /// Unique provider identifier
    pub id: String,
    /// Human readable name
    pub label: String,
    pub description: String,
    /// Route of the provider's configuration page
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub route: Option<String>,
    /// Search term used to check connectivity to the provider
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub test_data: Option<String>,
}

impl ProviderDefinition {
    pub fn new(
        id: impl Into<String>,
        label: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            description: description.into(),
            route: None,
            test_data: None,
        }
    }

    pub fn with_test_data(mut self, test_data: impl Into<String>) -> Self {
        self.test_data = Some(test_data.into());
        self
    }
}

// == Address Lookup ==
/// An address lookup provider bound to one country.
///
/// Calls are blocking from the caller's point of view. Timeouts and retries,
/// if any, belong to the implementation. Errors are reported through
/// `anyhow` and surface to callers as `LookupError::LookupFailed`.
pub trait AddressLookup: Send {
    /// ISO2 code of the country this instance searches in.
    fn country(&self) -> &str;

    /// Searches for addresses matching `term`.
    ///
    /// An empty vector means no match, which is not an error.
    fn lookup(&self, term: &str) -> anyhow::Result<Vec<AddressSummary>>;

    /// Fetches the full details of `address_id`, or `None` if unknown.
    fn address_details(&self, address_id: &str) -> anyhow::Result<Option<AddressDetails>>;

    /// Optionally rewrites the cache key used for search results.
    ///
    /// Returning `None` keeps the derived key. The rewrite must be
    /// deterministic for the same inputs.
    fn alter_cache_key(&self, _cache_key: &str, _country: Option<&str>) -> Option<String> {
        None
    }

    /// Optionally rewrites an address form layout for `address`.
    fn alter_format(&self, format: FormatLayout, _address: &AddressDetails) -> FormatLayout {
        format
    }
}
