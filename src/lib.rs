//! Address Lookup - a pluggable address lookup service
//!
//! Resolves address suggestions and full address details through
//! interchangeable providers, with a per-manager memo in front of a shared,
//! expiring cache.

pub mod api;
pub mod cache;
pub mod clock;
pub mod config;
pub mod error;
pub mod lookup;
pub mod models;
pub mod provider;

pub use api::AppState;
pub use config::{Config, Settings};
pub use error::LookupError;
pub use lookup::LookupManager;
