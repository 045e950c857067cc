//! Default service self-test.
//!
//! Runs a search with the default provider's test data, then fetches the
//! details of the first result, bypassing both cache tiers.

use serde::Serialize;
use tracing::{info, warn};

use crate::lookup::LookupManager;

// == Service Test Report ==
/// Outcome of testing the default provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ServiceTestReport {
    /// No default provider could be resolved
    NoDefaultService,
    /// The provider defines no test data to search with
    NoTestData { service: String },
    /// The search returned nothing or failed
    SearchFailed {
        service: String,
        reason: Option<String>,
    },
    /// The search worked but the details of its first result did not
    DetailsFailed {
        service: String,
        reason: Option<String>,
    },
    Passed { service: String },
}

impl ServiceTestReport {
    pub fn passed(&self) -> bool {
        matches!(self, ServiceTestReport::Passed { .. })
    }

    /// Human readable summary of the outcome.
    pub fn message(&self) -> String {
        match self {
            ServiceTestReport::NoDefaultService => "Could not find the default service.".to_string(),
            ServiceTestReport::NoTestData { service } => format!(
                "Could not test the default service ({service}) as it does not define any test data."
            ),
            ServiceTestReport::SearchFailed { service, .. } => format!(
                "The default service ({service}) test failed. The address lookup failed."
            ),
            ServiceTestReport::DetailsFailed { service, .. } => format!(
                "The default service ({service}) test failed. The full address details lookup failed."
            ),
            ServiceTestReport::Passed { service } => {
                format!("The default service ({service}) test was successful.")
            }
        }
    }
}

impl LookupManager {
    /// Checks that the default provider answers a search and a details fetch.
    ///
    /// Provider errors are reported in the returned outcome, not raised.
    pub fn test_default_service(&mut self) -> ServiceTestReport {
        let Some(definition) = self
            .default_id()
            .and_then(|id| self.registry().definition(id))
            .cloned()
        else {
            warn!("Default service test skipped: no default service");
            return ServiceTestReport::NoDefaultService;
        };

        let service = definition.label.clone();
        let Some(test_data) = definition.test_data.as_deref() else {
            return ServiceTestReport::NoTestData { service };
        };

        let report = match self.addresses(test_data, None, true) {
            Ok(addresses) => match addresses.first() {
                Some(first) => match self.address_details(&first.id, true) {
                    Ok(Some(_)) => ServiceTestReport::Passed { service },
                    Ok(None) => ServiceTestReport::DetailsFailed {
                        service,
                        reason: None,
                    },
                    Err(err) => ServiceTestReport::DetailsFailed {
                        service,
                        reason: Some(err.client_message()),
                    },
                },
                None => ServiceTestReport::SearchFailed {
                    service,
                    reason: None,
                },
            },
            Err(err) => ServiceTestReport::SearchFailed {
                service,
                reason: Some(err.client_message()),
            },
        };

        info!(
            provider = %definition.id,
            passed = report.passed(),
            "Default service test finished"
        );
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use crate::cache::MemoryCacheStore;
    use crate::clock::SystemClock;
    use crate::config::Settings;
    use crate::models::{AddressDetails, AddressSummary};
    use crate::provider::{example, AddressLookup, ProviderDefinition, ProviderRegistry};

    struct NoDetailsLookup;

    impl AddressLookup for NoDetailsLookup {
        fn country(&self) -> &str {
            "GB"
        }

        fn lookup(&self, _term: &str) -> anyhow::Result<Vec<AddressSummary>> {
            Ok(vec![AddressSummary::new("5", "Lone Lane", "Nowhere")])
        }

        fn address_details(&self, _address_id: &str) -> anyhow::Result<Option<AddressDetails>> {
            anyhow::bail!("details endpoint unavailable")
        }
    }

    fn manager_with(registry: ProviderRegistry) -> LookupManager {
        LookupManager::new(
            Arc::new(registry),
            Arc::new(MemoryCacheStore::new()),
            Settings::default(),
            Arc::new(SystemClock),
        )
    }

    #[test]
    fn test_example_service_passes() {
        let mut registry = ProviderRegistry::new();
        example::register(&mut registry);

        let report = manager_with(registry).test_default_service();
        assert_eq!(
            report,
            ServiceTestReport::Passed {
                service: "Example".to_string()
            }
        );
        assert!(report.message().contains("successful"));
    }

    #[test]
    fn test_no_default_service() {
        let report = manager_with(ProviderRegistry::new()).test_default_service();
        assert_eq!(report, ServiceTestReport::NoDefaultService);
        assert!(!report.passed());
    }

    #[test]
    fn test_missing_test_data() {
        let mut registry = ProviderRegistry::new();
        registry.register(ProviderDefinition::new("bare", "Bare", ""), |_, _| {
            Box::new(NoDetailsLookup)
        });

        let report = manager_with(registry).test_default_service();
        assert!(matches!(report, ServiceTestReport::NoTestData { .. }));
    }

    #[test]
    fn test_details_failure_is_reported() {
        let mut registry = ProviderRegistry::new();
        registry.register(
            ProviderDefinition::new("flaky", "Flaky", "").with_test_data("AB1 2CD"),
            |_, _| Box::new(NoDetailsLookup),
        );

        let report = manager_with(registry).test_default_service();
        match report {
            ServiceTestReport::DetailsFailed { service, reason } => {
                assert_eq!(service, "Flaky");
                assert!(reason.unwrap().contains("details endpoint unavailable"));
            }
            other => panic!("unexpected report: {other:?}"),
        }
    }

    #[test]
    fn test_report_serializes_with_status_tag() {
        let json = serde_json::to_value(ServiceTestReport::NoTestData {
            service: "Example".to_string(),
        })
        .unwrap();
        assert_eq!(json["status"], "no_test_data");
        assert_eq!(json["service"], "Example");
    }
}
