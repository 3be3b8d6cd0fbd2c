//! Cache Module
//!
//! Budgeted storage for decoded images with pluggable eviction.

mod entry;
mod eviction;
mod lru;
mod stats;
mod store;


// Re-export public types
pub use entry::{compute_cost, CacheEntry, ENTRY_OVERHEAD};
pub use eviction::{EvictionPolicy, EvictionStrategy, RandomEviction};
pub use lru::LruEviction;
pub use stats::CacheStats;
pub use store::CacheStore;

// == Public Constants ==
/// One megabyte as used by the budget setters.
pub const MEGABYTE: u64 = 1024 * 1024;

/// Default budget in megabytes.
pub const DEFAULT_BUDGET_MB: u64 = 384;

/// Default budget in bytes.
pub const DEFAULT_BUDGET: u64 = DEFAULT_BUDGET_MB * MEGABYTE;
