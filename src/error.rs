//! Error types for the address lookup service
//!
//! Provides unified error handling using thiserror.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

// == Lookup Error Enum ==
/// Unified error type for address lookups.
///
/// "No results found" is never an error: an empty search result or a missing
/// address is returned as a value.
#[derive(Error, Debug)]
pub enum LookupError {
    /// A required argument was empty
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// The requested provider is not registered
    #[error("Unknown address lookup provider: {0}")]
    UnknownProvider(String),

    /// No default provider is configured or resolvable
    #[error("No address lookup service available")]
    NoProviderAvailable,

    /// The selected provider failed during a search or detail fetch
    #[error("Address lookup via '{provider}' failed")]
    LookupFailed {
        provider: String,
        #[source]
        source: anyhow::Error,
    },

    /// Internal server error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl LookupError {
    /// Wraps a provider failure, keeping the original cause.
    pub fn lookup_failed(provider: impl Into<String>, source: anyhow::Error) -> Self {
        LookupError::LookupFailed {
            provider: provider.into(),
            source,
        }
    }

    /// Message returned to HTTP clients, including the provider's cause chain.
    pub fn client_message(&self) -> String {
        match self {
            LookupError::LookupFailed { source, .. } => format!("{self}: {source:#}"),
            _ => self.to_string(),
        }
    }

    /// HTTP status the error maps to.
    pub fn status_code(&self) -> StatusCode {
        match self {
            LookupError::InvalidArgument(_) => StatusCode::BAD_REQUEST,
            LookupError::UnknownProvider(_) => StatusCode::NOT_FOUND,
            LookupError::NoProviderAvailable => StatusCode::SERVICE_UNAVAILABLE,
            LookupError::LookupFailed { .. } => StatusCode::BAD_GATEWAY,
            LookupError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

// == IntoResponse Implementation ==
impl IntoResponse for LookupError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = Json(json!({
            "error": self.client_message()
        }));

        (status, body).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for address lookups.
pub type Result<T> = std::result::Result<T, LookupError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_failed_keeps_cause() {
        let err = LookupError::lookup_failed("example", anyhow::anyhow!("connection refused"));
        let message = err.to_string();
        assert!(message.contains("example"));
        assert!(!message.contains("connection refused"));

        let source = std::error::Error::source(&err).unwrap();
        assert_eq!(source.to_string(), "connection refused");
    }

    #[test]
    fn test_client_message_includes_cause_once() {
        let cause = anyhow::anyhow!("connection refused").context("search request failed");
        let err = LookupError::lookup_failed("example", cause);

        let message = err.client_message();
        assert_eq!(
            message,
            "Address lookup via 'example' failed: search request failed: connection refused"
        );
        assert_eq!(message.matches("connection refused").count(), 1);
        assert_eq!(
            LookupError::NoProviderAvailable.client_message(),
            "No address lookup service available"
        );
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(
            LookupError::InvalidArgument("term".to_string()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            LookupError::UnknownProvider("nope".to_string()).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            LookupError::NoProviderAvailable.status_code(),
            StatusCode::SERVICE_UNAVAILABLE
        );
        assert_eq!(
            LookupError::lookup_failed("example", anyhow::anyhow!("boom")).status_code(),
            StatusCode::BAD_GATEWAY
        );
    }
}
