//! Process Memo
//!
//! The in-memory tier owned by a single lookup manager. It lives exactly as
//! long as the manager and is consulted before the persistent cache.

use std::collections::HashMap;

use crate::models::{AddressDetails, AddressSummary};

/// Memo country used when a search names no country.
pub const DEFAULT_MEMO_COUNTRY: &str = "default";

#[derive(Debug, Default)]
pub struct ProcessMemo {
    /// (country or "default", search term) → results
    addresses: HashMap<(String, String), Vec<AddressSummary>>,
    /// address id → details, `None` recording a known miss
    details: HashMap<String, Option<AddressDetails>>,
}

impl ProcessMemo {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn addresses(&self, country: Option<&str>, search_term: &str) -> Option<&[AddressSummary]> {
        self.addresses
            .get(&addresses_key(country, search_term))
            .map(Vec::as_slice)
    }

    pub fn set_addresses(
        &mut self,
        country: Option<&str>,
        search_term: &str,
        addresses: Vec<AddressSummary>,
    ) {
        self.addresses
            .insert(addresses_key(country, search_term), addresses);
    }

    pub fn details(&self, address_id: &str) -> Option<&Option<AddressDetails>> {
        self.details.get(address_id)
    }

    pub fn set_details(&mut self, address_id: &str, details: Option<AddressDetails>) {
        self.details.insert(address_id.to_string(), details);
    }

    pub fn is_empty(&self) -> bool {
        self.addresses.is_empty() && self.details.is_empty()
    }
}

fn addresses_key(country: Option<&str>, search_term: &str) -> (String, String) {
    let country = country
        .filter(|code| !code.is_empty())
        .unwrap_or(DEFAULT_MEMO_COUNTRY);
    (country.to_string(), search_term.to_string())
}
