//! Data models for the address lookup service
//!
//! Address records shared with providers, plus the DTOs used for
//! serializing/deserializing HTTP request and response bodies.

pub mod address;
pub mod requests;
pub mod responses;

// Re-export commonly used types
pub use address::{AddressDetails, AddressSummary, FormatLayout};
pub use requests::{
    AddressDetailsQuery, AddressSearchQuery, FormatUpdateRequest, SetDefaultServiceRequest,
    UpdateSettingsRequest,
};
pub use responses::{
    AddressesResponse, BinStatsResponse, HealthResponse, ServiceSummary, ServiceTestResponse,
    ServicesResponse, StatsResponse,
};
