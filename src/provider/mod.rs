//! Provider Module
//!
//! The provider contract, the registry providers are discovered through, and
//! the bundled example provider.

mod contract;
pub mod example;
mod registry;

pub use contract::{resolve_country, AddressLookup, ProviderDefinition, DEFAULT_COUNTRY};
pub use registry::{ProviderFactory, ProviderRegistry};
