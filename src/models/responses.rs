//! Response DTOs for the lookup API
//!
//! Defines the structure of outgoing HTTP response bodies.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::cache::CacheStats;
use crate::lookup::ServiceTestReport;
use crate::models::AddressSummary;
use crate::provider::ProviderDefinition;

/// Response body for address searches (GET /addresses)
#[derive(Debug, Clone, Serialize)]
pub struct AddressesResponse {
    /// Matching addresses; empty when nothing matched
    pub addresses: Vec<AddressSummary>,
}

/// One provider in the services overview
#[derive(Debug, Clone, Serialize)]
pub struct ServiceSummary {
    #[serde(flatten)]
    pub definition: ProviderDefinition,
    /// Whether this provider currently serves lookups
    pub is_default: bool,
}

/// Response body for the services overview (GET /services)
#[derive(Debug, Clone, Serialize)]
pub struct ServicesResponse {
    /// Provider serving lookups, if one resolves
    pub default_service: Option<String>,
    pub services: Vec<ServiceSummary>,
}

impl ServicesResponse {
    pub fn new<'a>(
        definitions: impl IntoIterator<Item = &'a ProviderDefinition>,
        default_service: Option<&str>,
    ) -> Self {
        let services = definitions
            .into_iter()
            .map(|definition| ServiceSummary {
                is_default: default_service == Some(definition.id.as_str()),
                definition: definition.clone(),
            })
            .collect();

        Self {
            default_service: default_service.map(str::to_string),
            services,
        }
    }
}

/// Response body for the default service test (POST /services/test)
#[derive(Debug, Clone, Serialize)]
pub struct ServiceTestResponse {
    pub passed: bool,
    pub message: String,
    pub report: ServiceTestReport,
}

impl From<ServiceTestReport> for ServiceTestResponse {
    fn from(report: ServiceTestReport) -> Self {
        Self {
            passed: report.passed(),
            message: report.message(),
            report,
        }
    }
}

/// Statistics of one cache bin
#[derive(Debug, Clone, Serialize)]
pub struct BinStatsResponse {
    #[serde(flatten)]
    pub stats: CacheStats,
    /// Hit rate (hits / (hits + misses))
    pub hit_rate: f64,
}

impl From<CacheStats> for BinStatsResponse {
    fn from(stats: CacheStats) -> Self {
        Self {
            hit_rate: stats.hit_rate(),
            stats,
        }
    }
}

/// Response body for the stats endpoint (GET /stats)
#[derive(Debug, Clone, Serialize)]
pub struct StatsResponse {
    /// Statistics keyed by bin name
    pub bins: BTreeMap<String, BinStatsResponse>,
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_services_response_marks_default() {
        let definitions = [
            ProviderDefinition::new("alpha", "Alpha", ""),
            ProviderDefinition::new("example", "Example", "").with_test_data("TS1 1ST"),
        ];
        let resp = ServicesResponse::new(definitions.iter(), Some("example"));

        assert_eq!(resp.default_service.as_deref(), Some("example"));
        assert!(!resp.services[0].is_default);
        assert!(resp.services[1].is_default);

        let json = serde_json::to_value(&resp).unwrap();
        assert_eq!(json["services"][1]["id"], "example");
        assert_eq!(json["services"][1]["test_data"], "TS1 1ST");
    }

    #[test]
    fn test_bin_stats_hit_rate() {
        let stats = CacheStats {
            hits: 8,
            misses: 2,
            ..CacheStats::default()
        };
        let resp = BinStatsResponse::from(stats);
        assert!((resp.hit_rate - 0.8).abs() < 0.001);

        let json = serde_json::to_value(&resp).unwrap();
        assert_eq!(json["hits"], 8);
    }

    #[test]
    fn test_service_test_response_from_report() {
        let resp = ServiceTestResponse::from(ServiceTestReport::NoDefaultService);
        assert!(!resp.passed);
        assert_eq!(resp.message, "Could not find the default service.");
    }

    #[test]
    fn test_health_response_serialize() {
        let resp = HealthResponse::healthy();
        let json = serde_json::to_string(&resp).unwrap();
        assert!(json.contains("healthy"));
        assert!(json.contains("timestamp"));
    }
}
