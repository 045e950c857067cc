//! Cache Store Module
//!
//! The persistent cache tier: named bins of expiring entries shared across
//! lookup manager instances.

use std::collections::HashMap;
use std::fmt;
use std::sync::{PoisonError, RwLock};

use serde::Serialize;
use tracing::{debug, warn};

use crate::cache::{CacheEntry, CacheStats, MAX_KEY_LENGTH, MAX_VALUE_SIZE};

// == Cache Bin ==
/// The named namespaces the lookup manager writes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum CacheBin {
    /// Search results keyed by provider, search term and country
    Addresses,
    /// Full address records keyed by provider and address identifier
    AddressDetails,
}

impl CacheBin {
    pub const ALL: [CacheBin; 2] = [CacheBin::Addresses, CacheBin::AddressDetails];

    /// Name of the bin as seen by external readers.
    pub fn name(self) -> &'static str {
        match self {
            CacheBin::Addresses => "addresses",
            CacheBin::AddressDetails => "address-details",
        }
    }
}

impl fmt::Display for CacheBin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// == Cache Backend ==
/// A key-value store with per-entry expiry, organised in bins.
///
/// Implementations must tolerate concurrent readers and writers from several
/// lookup managers. Callers pass the request time so expiry is evaluated
/// against the same clock that stamped the entry.
pub trait CacheBackend: Send + Sync {
    /// Returns the payload stored under `key`, unless missing or expired at `now`.
    fn get(&self, bin: CacheBin, key: &str, now: i64) -> Option<String>;

    /// Stores `value` under `key` until `expires_at`, replacing any previous entry.
    fn set(&self, bin: CacheBin, key: &str, value: String, expires_at: i64, now: i64);

    /// Returns the statistics of `bin`.
    fn stats(&self, bin: CacheBin) -> CacheStats;
}

#[derive(Debug, Default)]
struct BinState {
    entries: HashMap<String, CacheEntry>,
    stats: CacheStats,
}

// == Memory Cache Store ==
/// In-memory cache backend shared by every manager in the process.
///
/// Expired entries are dropped lazily when read; there is no sweep.
#[derive(Debug, Default)]
pub struct MemoryCacheStore {
    bins: RwLock<HashMap<CacheBin, BinState>>,
}

impl MemoryCacheStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of entries held in `bin`, expired ones included.
    pub fn len(&self, bin: CacheBin) -> usize {
        let bins = self.bins.read().unwrap_or_else(PoisonError::into_inner);
        bins.get(&bin).map_or(0, |state| state.entries.len())
    }

    /// Returns true if `bin` holds no entries.
    pub fn is_empty(&self, bin: CacheBin) -> bool {
        self.len(bin) == 0
    }

    /// Returns the raw entry under `key`, without checking expiry.
    pub fn entry(&self, bin: CacheBin, key: &str) -> Option<CacheEntry> {
        let bins = self.bins.read().unwrap_or_else(PoisonError::into_inner);
        bins.get(&bin).and_then(|state| state.entries.get(key).cloned())
    }
}

impl CacheBackend for MemoryCacheStore {
    fn get(&self, bin: CacheBin, key: &str, now: i64) -> Option<String> {
        // Write lock: an expired entry is removed and stats are updated
        let mut bins = self.bins.write().unwrap_or_else(PoisonError::into_inner);
        let state = bins.entry(bin).or_default();

        let Some(entry) = state.entries.get(key) else {
            state.stats.record_miss();
            return None;
        };

        if entry.is_expired(now) {
            state.entries.remove(key);
            state.stats.record_expired();
            state.stats.set_total_entries(state.entries.len());
            debug!(bin = %bin, key, "Dropped expired cache entry");
            return None;
        }

        let value = entry.value.clone();
        state.stats.record_hit();
        Some(value)
    }

    fn set(&self, bin: CacheBin, key: &str, value: String, expires_at: i64, now: i64) {
        let mut bins = self.bins.write().unwrap_or_else(PoisonError::into_inner);
        let state = bins.entry(bin).or_default();

        if key.len() > MAX_KEY_LENGTH {
            state.stats.record_rejected();
            warn!(bin = %bin, "Cache key exceeds maximum length of {} bytes", MAX_KEY_LENGTH);
            return;
        }

        if value.len() > MAX_VALUE_SIZE {
            state.stats.record_rejected();
            warn!(bin = %bin, key, "Cache value exceeds maximum size of {} bytes", MAX_VALUE_SIZE);
            return;
        }

        state
            .entries
            .insert(key.to_string(), CacheEntry::new(value, now, expires_at));
        state.stats.record_write();
        state.stats.set_total_entries(state.entries.len());
    }

    fn stats(&self, bin: CacheBin) -> CacheStats {
        let bins = self.bins.read().unwrap_or_else(PoisonError::into_inner);
        bins.get(&bin)
            .map(|state| {
                let mut stats = state.stats.clone();
                stats.set_total_entries(state.entries.len());
                stats
            })
            .unwrap_or_default()
    }
}
