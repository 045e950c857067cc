//! API Routes
//!
//! Configures the Axum router with all lookup service endpoints.

use axum::{
    routing::{get, post, put},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{
    details_handler, format_handler, get_settings_handler, health_handler, search_handler,
    services_handler, set_default_handler, stats_handler, test_service_handler,
    update_settings_handler, AppState,
};

/// Creates the main router with all endpoints configured.
///
/// # Endpoints
/// - `GET /addresses?term=&country=&reset=` - Search addresses
/// - `GET /addresses/:id?reset=` - Full details of an address
/// - `GET /services` - Registered services and the default
/// - `PUT /services/default` - Select the default service
/// - `POST /services/test` - Test the default service
/// - `GET /settings`, `PUT /settings` - Read or update lookup settings
/// - `POST /format` - Apply the default service's format updates
/// - `GET /stats` - Cache bin statistics
/// - `GET /health` - Health check endpoint
///
/// # Middleware
/// - CORS: Allows any origin (configurable for production)
/// - Tracing: Logs all requests for debugging
pub fn create_router(state: AppState) -> Router {
    // Configure CORS middleware
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/addresses", get(search_handler))
        .route("/addresses/:id", get(details_handler))
        .route("/services", get(services_handler))
        .route("/services/default", put(set_default_handler))
        .route("/services/test", post(test_service_handler))
        .route(
            "/settings",
            get(get_settings_handler).put(update_settings_handler),
        )
        .route("/format", post(format_handler))
        .route("/stats", get(stats_handler))
        .route("/health", get(health_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
