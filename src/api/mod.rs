//! API Module
//!
//! HTTP handlers and routing for the address lookup REST API.
//!
//! # Endpoints
//! - `GET /addresses` - Search addresses with the default service
//! - `GET /addresses/:id` - Full details of an address
//! - `GET /services`, `PUT /services/default`, `POST /services/test` - Service admin
//! - `GET /settings`, `PUT /settings` - Lookup settings
//! - `POST /format` - Address format updates
//! - `GET /stats` - Cache statistics
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
