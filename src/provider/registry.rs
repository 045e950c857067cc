//! Provider Registry
//!
//! Maps provider identifiers to their definition and a factory producing
//! country-bound instances.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use tracing::{debug, info};

use crate::error::{LookupError, Result};
use crate::provider::{resolve_country, AddressLookup, ProviderDefinition};

/// Builds a provider instance for a definition and a resolved country code.
pub type ProviderFactory =
    Arc<dyn Fn(&ProviderDefinition, &str) -> Box<dyn AddressLookup> + Send + Sync>;

struct RegisteredProvider {
    definition: ProviderDefinition,
    factory: ProviderFactory,
}

// == Provider Registry ==
/// Registry of available providers, ordered by identifier.
#[derive(Default)]
pub struct ProviderRegistry {
    providers: BTreeMap<String, RegisteredProvider>,
}

impl ProviderRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a provider, replacing any earlier registration with the same id.
    pub fn register<F>(&mut self, definition: ProviderDefinition, factory: F)
    where
        F: Fn(&ProviderDefinition, &str) -> Box<dyn AddressLookup> + Send + Sync + 'static,
    {
        let id = definition.id.clone();
        let replaced = self
            .providers
            .insert(
                id.clone(),
                RegisteredProvider {
                    definition,
                    factory: Arc::new(factory),
                },
            )
            .is_some();

        if replaced {
            info!(provider = %id, "Replaced address lookup provider registration");
        } else {
            info!(provider = %id, "Registered address lookup provider");
        }
    }

    pub fn definition(&self, id: &str) -> Option<&ProviderDefinition> {
        self.providers.get(id).map(|provider| &provider.definition)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.providers.contains_key(id)
    }

    /// Iterates over all definitions in identifier order.
    pub fn definitions(&self) -> impl Iterator<Item = &ProviderDefinition> {
        self.providers.values().map(|provider| &provider.definition)
    }

    /// Returns the first provider in registry order, if any.
    pub fn first_id(&self) -> Option<&str> {
        self.providers.keys().next().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.providers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }

    /// Creates an instance of provider `id` bound to `country`.
    ///
    /// A missing or empty country binds the instance to the default country.
    pub fn instantiate(&self, id: &str, country: Option<&str>) -> Result<Box<dyn AddressLookup>> {
        let provider = self
            .providers
            .get(id)
            .ok_or_else(|| LookupError::UnknownProvider(id.to_string()))?;

        let country = resolve_country(country);
        debug!(provider = %id, country, "Instantiating address lookup provider");
        Ok((provider.factory)(&provider.definition, country))
    }
}

impl fmt::Debug for ProviderRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderRegistry")
            .field("providers", &self.providers.keys().collect::<Vec<_>>())
            .finish()
    }
}
