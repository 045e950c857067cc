//! API Handlers
//!
//! HTTP request handlers for each lookup service endpoint.

use std::collections::BTreeMap;
use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use tokio::sync::RwLock;
use tracing::info;

use crate::cache::{CacheBackend, CacheBin, MemoryCacheStore};
use crate::clock::{Clock, SystemClock};
use crate::config::{Config, Settings};
use crate::error::{LookupError, Result};
use crate::lookup::LookupManager;
use crate::models::{
    AddressDetailsQuery, AddressSearchQuery, AddressesResponse, BinStatsResponse,
    FormatLayout, FormatUpdateRequest, HealthResponse, ServiceTestResponse, ServicesResponse,
    SetDefaultServiceRequest, StatsResponse, UpdateSettingsRequest,
};
use crate::provider::ProviderRegistry;

/// Application state shared across all handlers.
///
/// Every request builds its own `LookupManager` from this state, so each
/// request gets a fresh process memo over the shared persistent cache.
#[derive(Clone)]
pub struct AppState {
    /// Registered providers
    pub registry: Arc<ProviderRegistry>,
    /// Persistent cache shared by all requests
    pub cache: Arc<dyn CacheBackend>,
    /// Editable lookup settings
    pub settings: Arc<RwLock<Settings>>,
    pub clock: Arc<dyn Clock>,
}

impl AppState {
    /// Creates a new AppState with the given collaborators.
    pub fn new(
        registry: ProviderRegistry,
        cache: Arc<dyn CacheBackend>,
        settings: Settings,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            registry: Arc::new(registry),
            cache,
            settings: Arc::new(RwLock::new(settings)),
            clock,
        }
    }

    /// Creates a new AppState from configuration.
    ///
    /// Uses an in-memory cache store and the system clock.
    pub fn from_config(config: &Config, registry: ProviderRegistry) -> Self {
        Self::new(
            registry,
            Arc::new(MemoryCacheStore::new()),
            config.settings.clone(),
            Arc::new(SystemClock),
        )
    }

    /// Builds a lookup manager for one request from the current settings.
    pub async fn manager(&self) -> LookupManager {
        let settings = self.settings.read().await.clone();
        LookupManager::new(
            self.registry.clone(),
            self.cache.clone(),
            settings,
            self.clock.clone(),
        )
    }
}

/// Runs `task` against a fresh manager on the blocking pool.
///
/// Provider calls block, so they never run on the async workers.
async fn run_lookup<T, F>(state: &AppState, task: F) -> Result<T>
where
    F: FnOnce(&mut LookupManager) -> Result<T> + Send + 'static,
    T: Send + 'static,
{
    let mut manager = state.manager().await;
    tokio::task::spawn_blocking(move || task(&mut manager))
        .await
        .map_err(|err| LookupError::Internal(format!("Lookup task failed: {err}")))?
}

/// Handler for GET /addresses
///
/// Searches addresses with the default service.
pub async fn search_handler(
    State(state): State<AppState>,
    Query(query): Query<AddressSearchQuery>,
) -> Result<Json<AddressesResponse>> {
    let addresses = run_lookup(&state, move |manager| {
        manager.addresses(&query.term, query.country.as_deref(), query.reset)
    })
    .await?;

    Ok(Json(AddressesResponse { addresses }))
}

/// Handler for GET /addresses/:id
///
/// Returns the full details of an address, or 404 if the service has none.
pub async fn details_handler(
    State(state): State<AppState>,
    Path(address_id): Path<String>,
    Query(query): Query<AddressDetailsQuery>,
) -> Result<Response> {
    let lookup_id = address_id.clone();
    let details = run_lookup(&state, move |manager| {
        manager.address_details(&lookup_id, query.reset)
    })
    .await?;

    Ok(match details {
        Some(details) => Json(details).into_response(),
        None => (
            StatusCode::NOT_FOUND,
            Json(json!({
                "error": format!("No address found for id '{address_id}'")
            })),
        )
            .into_response(),
    })
}

/// Handler for GET /services
///
/// Lists the registered services and which one is the default.
pub async fn services_handler(State(state): State<AppState>) -> Json<ServicesResponse> {
    let manager = state.manager().await;
    Json(ServicesResponse::new(
        state.registry.definitions(),
        manager.default_id(),
    ))
}

/// Handler for PUT /services/default
///
/// Selects the service used for all lookups.
pub async fn set_default_handler(
    State(state): State<AppState>,
    Json(req): Json<SetDefaultServiceRequest>,
) -> Result<Json<ServicesResponse>> {
    if !state.registry.contains(&req.id) {
        return Err(LookupError::UnknownProvider(req.id));
    }

    state.settings.write().await.default_service = Some(req.id.clone());
    info!(provider = %req.id, "Default address lookup service changed");

    Ok(Json(ServicesResponse::new(
        state.registry.definitions(),
        Some(req.id.as_str()),
    )))
}

/// Handler for POST /services/test
///
/// Runs a search and a details fetch against the default service.
pub async fn test_service_handler(
    State(state): State<AppState>,
) -> Result<Json<ServiceTestResponse>> {
    let report = run_lookup(&state, |manager| Ok(manager.test_default_service())).await?;
    Ok(Json(ServiceTestResponse::from(report)))
}

/// Handler for GET /settings
pub async fn get_settings_handler(State(state): State<AppState>) -> Json<Settings> {
    Json(state.settings.read().await.clone())
}

/// Handler for PUT /settings
///
/// Updates the cache length and/or the default service.
pub async fn update_settings_handler(
    State(state): State<AppState>,
    Json(req): Json<UpdateSettingsRequest>,
) -> Result<Json<Settings>> {
    if let Some(error_msg) = req.validate() {
        return Err(LookupError::InvalidArgument(error_msg));
    }

    if let Some(id) = req.default_service.as_deref() {
        if !state.registry.contains(id) {
            return Err(LookupError::UnknownProvider(id.to_string()));
        }
    }

    let mut settings = state.settings.write().await;
    if let Some(id) = req.default_service {
        settings.default_service = Some(id);
    }
    if let Some(cache_length) = req.cache_length {
        settings.cache_length = cache_length;
    }
    info!(
        default_service = ?settings.default_service,
        cache_length = settings.cache_length,
        "Lookup settings updated"
    );

    Ok(Json(settings.clone()))
}

/// Handler for POST /format
///
/// Lets the default service rewrite an address form layout.
pub async fn format_handler(
    State(state): State<AppState>,
    Json(req): Json<FormatUpdateRequest>,
) -> Result<Json<FormatLayout>> {
    let format = run_lookup(&state, move |manager| {
        Ok(manager.format_updates(req.format, &req.address))
    })
    .await?;

    Ok(Json(format))
}

/// Handler for GET /stats
///
/// Returns statistics for both cache bins.
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    let bins: BTreeMap<String, BinStatsResponse> = CacheBin::ALL
        .into_iter()
        .map(|bin| (bin.name().to_string(), state.cache.stats(bin).into()))
        .collect();

    Json(StatsResponse { bins })
}

/// Handler for GET /health
///
/// Returns health status of the server.
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::example;

    fn example_state() -> AppState {
        let mut registry = ProviderRegistry::new();
        example::register(&mut registry);
        AppState::from_config(&Config::default(), registry)
    }

    fn search(term: &str) -> Query<AddressSearchQuery> {
        Query(AddressSearchQuery {
            term: term.to_string(),
            ..AddressSearchQuery::default()
        })
    }

    #[tokio::test]
    async fn test_search_handler() {
        let state = example_state();

        let response = search_handler(State(state), search("TS1 1ST")).await.unwrap();
        assert_eq!(response.addresses.len(), 1);
        assert_eq!(response.addresses[0].street, "Example Street");
    }

    #[tokio::test]
    async fn test_search_handler_empty_term() {
        let state = example_state();

        let result = search_handler(State(state), search("")).await;
        assert!(matches!(result, Err(LookupError::InvalidArgument(_))));
    }

    #[tokio::test]
    async fn test_details_handler_not_found() {
        let state = example_state();

        let response = details_handler(
            State(state),
            Path("9999".to_string()),
            Query(AddressDetailsQuery::default()),
        )
        .await
        .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_set_default_unknown_service() {
        let state = example_state();

        let req = SetDefaultServiceRequest {
            id: "missing".to_string(),
        };
        let result = set_default_handler(State(state.clone()), Json(req)).await;
        assert!(matches!(result, Err(LookupError::UnknownProvider(_))));
        assert!(state.settings.read().await.default_service.is_none());
    }

    #[tokio::test]
    async fn test_update_settings_handler() {
        let state = example_state();

        let req = UpdateSettingsRequest {
            default_service: Some("example".to_string()),
            cache_length: Some(60),
        };
        let response = update_settings_handler(State(state.clone()), Json(req))
            .await
            .unwrap();
        assert_eq!(response.cache_length, 60);

        let manager = state.manager().await;
        assert_eq!(manager.settings().cache_length, 60);
        assert_eq!(manager.default_id(), Some("example"));
    }

    #[tokio::test]
    async fn test_stats_handler_lists_both_bins() {
        let state = example_state();

        let response = stats_handler(State(state)).await;
        assert!(response.bins.contains_key("addresses"));
        assert!(response.bins.contains_key("address-details"));
    }

    #[tokio::test]
    async fn test_health_handler() {
        let response = health_handler().await;
        assert_eq!(response.status, "healthy");
    }
}
