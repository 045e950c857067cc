//! Cache Module
//!
//! Provides the persistent cache tier: expiring entries grouped in bins.

mod entry;
mod stats;
mod store;


// Re-export public types
pub use entry::CacheEntry;
pub use stats::CacheStats;
pub use store::{CacheBackend, CacheBin, MemoryCacheStore};

// == Public Constants ==
/// Maximum allowed key length in bytes
///
/// Detail keys embed the provider's address id verbatim, so this is sized
/// well above any id a provider is expected to issue.
pub const MAX_KEY_LENGTH: usize = 4096;

/// Maximum allowed value size in bytes
pub const MAX_VALUE_SIZE: usize = 1024 * 1024; // 1 MB
