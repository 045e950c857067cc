//! Example Provider
//!
//! A mock address lookup service with a single known address. Used by the
//! demo server and as a fixture in tests.

use crate::models::{AddressDetails, AddressSummary};
use crate::provider::{AddressLookup, ProviderDefinition, ProviderRegistry};

pub const EXAMPLE_ID: &str = "example";

/// Search term that matches the mock address.
pub const EXAMPLE_SEARCH_TERM: &str = "TS1 1ST";

/// Identifier of the mock address.
pub const EXAMPLE_ADDRESS_ID: &str = "1234";

const SUPPORTED_COUNTRIES: [&str; 2] = ["GB", "FR"];

/// Definition the example provider is registered with.
pub fn definition() -> ProviderDefinition {
    ProviderDefinition::new(
        EXAMPLE_ID,
        "Example",
        "Provides an example address field lookup service.",
    )
    .with_test_data(EXAMPLE_SEARCH_TERM)
}

/// Registers the example provider.
pub fn register(registry: &mut ProviderRegistry) {
    registry.register(definition(), |_, country| {
        Box::new(ExampleLookup::new(country))
    });
}

// == Example Lookup ==
#[derive(Debug, Clone)]
pub struct ExampleLookup {
    country: String,
}

impl ExampleLookup {
    pub fn new(country: impl Into<String>) -> Self {
        Self {
            country: country.into(),
        }
    }

    fn supports_country(&self) -> bool {
        SUPPORTED_COUNTRIES.contains(&self.country.as_str())
    }
}

impl AddressLookup for ExampleLookup {
    fn country(&self) -> &str {
        &self.country
    }

    fn lookup(&self, term: &str) -> anyhow::Result<Vec<AddressSummary>> {
        if !self.supports_country() || term != EXAMPLE_SEARCH_TERM {
            return Ok(Vec::new());
        }

        Ok(vec![AddressSummary::new(
            EXAMPLE_ADDRESS_ID,
            "Example Street",
            "Example City",
        )])
    }

    fn address_details(&self, address_id: &str) -> anyhow::Result<Option<AddressDetails>> {
        if address_id != EXAMPLE_ADDRESS_ID {
            return Ok(None);
        }

        Ok(Some(AddressDetails {
            id: EXAMPLE_ADDRESS_ID.to_string(),
            premise: "10".to_string(),
            thoroughfare: "Example Street".to_string(),
            locality: "Example City".to_string(),
            postal_code: EXAMPLE_SEARCH_TERM.to_string(),
            administrative_area: "Example State".to_string(),
            ..AddressDetails::default()
        }))
    }
}
