//! Cache Entry Module
//!
//! Defines the structure for individual cache entries with an absolute expiry.

// == Cache Entry ==
/// Represents a single cached payload and its lifetime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheEntry {
    /// The serialized payload
    pub value: String,
    /// Creation timestamp (Unix seconds)
    pub created_at: i64,
    /// Expiration timestamp (Unix seconds)
    pub expires_at: i64,
}

impl CacheEntry {
    // == Constructor ==
    /// Creates a new cache entry.
    ///
    /// # Arguments
    /// * `value` - The serialized payload to store
    /// * `created_at` - Request time the entry was written at
    /// * `expires_at` - Absolute expiry timestamp
    pub fn new(value: String, created_at: i64, expires_at: i64) -> Self {
        Self {
            value,
            created_at,
            expires_at,
        }
    }

    // == Is Expired ==
    /// Checks if the entry has expired at `now`.
    ///
    /// An entry is expired once `now` reaches its expiry timestamp, so an
    /// entry written with a zero cache length is never served.
    pub fn is_expired(&self, now: i64) -> bool {
        now >= self.expires_at
    }
}
