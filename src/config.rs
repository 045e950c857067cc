//! Configuration Module
//!
//! Handles loading server configuration and the lookup settings consumed by
//! the lookup manager.

use std::env;

use serde::{Deserialize, Serialize};

/// Default cache length in seconds for search results and address details.
pub const DEFAULT_CACHE_LENGTH: u64 = 3600;

/// Lookup settings read by the lookup manager.
///
/// This is the editable part of the configuration; the HTTP admin surface
/// can change it at runtime.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Identifier of the provider used for all lookups, if configured
    #[serde(default)]
    pub default_service: Option<String>,
    /// Seconds a cached search result or address stays valid
    pub cache_length: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            default_service: None,
            cache_length: DEFAULT_CACHE_LENGTH,
        }
    }
}

/// Server configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Initial lookup settings
    pub settings: Settings,
    /// HTTP server port
    pub server_port: u16,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `DEFAULT_SERVICE` - Default provider identifier (default: unset)
    /// - `CACHE_LENGTH` - Cache length in seconds (default: 3600)
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    pub fn from_env() -> Self {
        Self {
            settings: Settings {
                default_service: env::var("DEFAULT_SERVICE")
                    .ok()
                    .filter(|v| !v.trim().is_empty()),
                cache_length: env::var("CACHE_LENGTH")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(DEFAULT_CACHE_LENGTH),
            },
            server_port: env::var("SERVER_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3000),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            settings: Settings::default(),
            server_port: 3000,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.settings.default_service, None);
        assert_eq!(config.settings.cache_length, DEFAULT_CACHE_LENGTH);
        assert_eq!(config.server_port, 3000);
    }

    #[test]
    fn test_config_from_env_defaults() {
        env::remove_var("DEFAULT_SERVICE");
        env::remove_var("CACHE_LENGTH");
        env::remove_var("SERVER_PORT");

        let config = Config::from_env();
        assert_eq!(config.settings, Settings::default());
        assert_eq!(config.server_port, 3000);
    }

    #[test]
    fn test_settings_deserialize_without_default_service() {
        let settings: Settings = serde_json::from_str(r#"{"cache_length": 60}"#).unwrap();
        assert_eq!(settings.default_service, None);
        assert_eq!(settings.cache_length, 60);
    }
}
