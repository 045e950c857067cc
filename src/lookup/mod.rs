//! Lookup Module
//!
//! The provider-agnostic lookup core: cache key derivation, the per-manager
//! process memo and the lookup manager itself.

pub mod cache_key;
mod diagnostics;
mod manager;
mod memo;

pub use diagnostics::ServiceTestReport;
pub use manager::LookupManager;
pub use memo::{ProcessMemo, DEFAULT_MEMO_COUNTRY};
