//! Lookup Manager
//!
//! Resolves the default provider and serves searches and address details
//! through two cache tiers: the manager's own process memo, then the shared
//! persistent cache. Only a miss in both reaches the provider.
//!
//! One manager serves one logical request or session. The memo is a plain
//! field; cross-request isolation comes from each request owning its own
//! manager. Two managers missing on the same key concurrently may both call
//! the provider.

use std::sync::Arc;

use serde::{de::DeserializeOwned, Serialize};
use tracing::{debug, error, warn};

use crate::cache::{CacheBackend, CacheBin};
use crate::clock::Clock;
use crate::config::Settings;
use crate::error::{LookupError, Result};
use crate::lookup::cache_key::{details_cache_key, search_cache_key};
use crate::lookup::ProcessMemo;
use crate::models::{AddressDetails, AddressSummary, FormatLayout};
use crate::provider::{AddressLookup, ProviderRegistry};

// == Lookup Manager ==
pub struct LookupManager {
    registry: Arc<ProviderRegistry>,
    cache: Arc<dyn CacheBackend>,
    settings: Settings,
    clock: Arc<dyn Clock>,
    memo: ProcessMemo,
}

impl LookupManager {
    // == Constructor ==
    /// Creates a manager with an empty memo.
    ///
    /// # Arguments
    /// * `registry` - Providers available for lookups
    /// * `cache` - Persistent cache shared with other managers
    /// * `settings` - Default provider and cache length
    /// * `clock` - Source of the request time used for cache expiry
    pub fn new(
        registry: Arc<ProviderRegistry>,
        cache: Arc<dyn CacheBackend>,
        settings: Settings,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            registry,
            cache,
            settings,
            clock,
            memo: ProcessMemo::new(),
        }
    }

    pub fn registry(&self) -> &ProviderRegistry {
        &self.registry
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    // == Default Provider ==
    /// Returns the identifier of the provider serving lookups.
    ///
    /// The configured default wins; without one the registry's first provider
    /// is used. Either way the identifier must still be registered.
    pub fn default_id(&self) -> Option<&str> {
        self.settings
            .default_service
            .as_deref()
            .or_else(|| self.registry.first_id())
            .filter(|id| self.registry.contains(id))
    }

    /// Instantiates the default provider bound to `country`.
    pub fn default_provider(&self, country: Option<&str>) -> Result<Box<dyn AddressLookup>> {
        let id = self.default_id().ok_or(LookupError::NoProviderAvailable)?;
        self.registry.instantiate(id, country)
    }

    // == Address Search ==
    /// Looks up addresses matching `search_term` with the default provider.
    ///
    /// An empty result means the provider found nothing; it is cached like
    /// any other result. With `reset` both cache tiers are skipped on read
    /// and overwritten with the fresh result.
    ///
    /// # Errors
    /// - `InvalidArgument` if `search_term` is empty
    /// - `NoProviderAvailable` if no default provider resolves
    /// - `LookupFailed` if the provider fails; nothing is cached
    pub fn addresses(
        &mut self,
        search_term: &str,
        country: Option<&str>,
        reset: bool,
    ) -> Result<Vec<AddressSummary>> {
        if search_term.is_empty() {
            return Err(LookupError::InvalidArgument(
                "Search term cannot be empty".to_string(),
            ));
        }

        let provider_id = self
            .default_id()
            .ok_or(LookupError::NoProviderAvailable)?
            .to_string();
        let country = country.filter(|code| !code.is_empty());

        if !reset {
            if let Some(addresses) = self.memo.addresses(country, search_term) {
                debug!(provider = %provider_id, "Address search served from process memo");
                return Ok(addresses.to_vec());
            }
        }

        let provider = self.registry.instantiate(&provider_id, country)?;
        let candidate_key = search_cache_key(&provider_id, search_term, country);
        let cache_key = provider
            .alter_cache_key(&candidate_key, country)
            .unwrap_or(candidate_key);
        let now = self.clock.now();

        if !reset {
            if let Some(addresses) =
                self.read_cache::<Vec<AddressSummary>>(CacheBin::Addresses, &cache_key, now)
            {
                debug!(provider = %provider_id, cache_key = %cache_key, "Address search served from cache");
                self.memo
                    .set_addresses(country, search_term, addresses.clone());
                return Ok(addresses);
            }
        }

        let addresses = provider.lookup(search_term).map_err(|source| {
            error!(
                provider = %provider_id,
                country = provider.country(),
                "Address search failed: {source:#}"
            );
            LookupError::lookup_failed(provider_id.as_str(), source)
        })?;

        debug!(
            provider = %provider_id,
            results = addresses.len(),
            "Address search fetched from provider"
        );
        self.write_cache(CacheBin::Addresses, &cache_key, &addresses, now);
        self.memo
            .set_addresses(country, search_term, addresses.clone());

        Ok(addresses)
    }

    // == Address Details ==
    /// Fetches the full details of `address_id` with the default provider.
    ///
    /// An empty `address_id` yields `Ok(None)` without touching any cache.
    /// An unknown address is also `Ok(None)` and is cached as such.
    ///
    /// # Errors
    /// - `NoProviderAvailable` if no default provider resolves
    /// - `LookupFailed` if the provider fails; nothing is cached
    pub fn address_details(
        &mut self,
        address_id: &str,
        reset: bool,
    ) -> Result<Option<AddressDetails>> {
        if address_id.is_empty() {
            return Ok(None);
        }

        let provider_id = self
            .default_id()
            .ok_or(LookupError::NoProviderAvailable)?
            .to_string();

        // Address ids are only meaningful to the provider that issued them,
        // the memo is not scoped any further.
        if !reset {
            if let Some(details) = self.memo.details(address_id) {
                debug!(provider = %provider_id, "Address details served from process memo");
                return Ok(details.clone());
            }
        }

        let cache_key = details_cache_key(&provider_id, address_id);
        let now = self.clock.now();

        if !reset {
            if let Some(details) =
                self.read_cache::<Option<AddressDetails>>(CacheBin::AddressDetails, &cache_key, now)
            {
                debug!(provider = %provider_id, cache_key = %cache_key, "Address details served from cache");
                self.memo.set_details(address_id, details.clone());
                return Ok(details);
            }
        }

        let provider = self.registry.instantiate(&provider_id, None)?;
        let details = provider.address_details(address_id).map_err(|source| {
            error!(
                provider = %provider_id,
                address_id,
                "Address details lookup failed: {source:#}"
            );
            LookupError::lookup_failed(provider_id.as_str(), source)
        })?;

        self.write_cache(CacheBin::AddressDetails, &cache_key, &details, now);
        self.memo.set_details(address_id, details.clone());

        Ok(details)
    }

    // == Format Updates ==
    /// Lets the default provider rewrite an address form layout.
    ///
    /// Best effort: without a default provider the layout is returned as is.
    pub fn format_updates(&self, format: FormatLayout, address: &AddressDetails) -> FormatLayout {
        match self.default_provider(None) {
            Ok(provider) => provider.alter_format(format, address),
            Err(err) => {
                debug!("Skipping address format updates: {err}");
                format
            }
        }
    }

    fn read_cache<T: DeserializeOwned>(&self, bin: CacheBin, key: &str, now: i64) -> Option<T> {
        let payload = self.cache.get(bin, key, now)?;
        match serde_json::from_str(&payload) {
            Ok(value) => Some(value),
            Err(err) => {
                warn!(bin = %bin, key, "Ignoring unreadable cache entry: {err}");
                None
            }
        }
    }

    fn write_cache<T: Serialize>(&self, bin: CacheBin, key: &str, value: &T, now: i64) {
        let cache_length = i64::try_from(self.settings.cache_length).unwrap_or(i64::MAX);
        let expires_at = now.saturating_add(cache_length);

        match serde_json::to_string(value) {
            Ok(payload) => self.cache.set(bin, key, payload, expires_at, now),
            Err(err) => warn!(bin = %bin, key, "Could not serialize cache entry: {err}"),
        }
    }
}
