//! Cache Statistics Module
//!
//! Tracks cache performance metrics including hits, misses, decodes and
//! evictions.

use serde::Serialize;

// == Cache Stats ==
/// Tracks cache performance metrics.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CacheStats {
    /// Loads answered from an existing entry
    pub hits: u64,
    /// Loads that had to fetch and decode
    pub misses: u64,
    /// Entries removed to satisfy the budget
    pub evictions: u64,
    /// Successful decodes
    pub decodes: u64,
    /// Fetch or decode failures
    pub decode_failures: u64,
    /// Current number of entries in the cache
    pub total_entries: usize,
    /// Sum of entry costs in bytes
    pub total_cost: u64,
    /// Budget in bytes
    pub budget: u64,
}

impl CacheStats {
    // == Constructor ==
    /// Creates a new CacheStats with all counters at zero.
    pub fn new() -> Self {
        Self::default()
    }

    // == Hit Rate ==
    /// Calculates the cache hit rate.
    ///
    /// Returns hits / (hits + misses), or 0.0 if no loads have been made.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }

    pub fn record_hit(&mut self) {
        self.hits += 1;
    }

    pub fn record_miss(&mut self) {
        self.misses += 1;
    }

    pub fn record_eviction(&mut self) {
        self.evictions += 1;
    }

    pub fn record_decode(&mut self) {
        self.decodes += 1;
    }

    pub fn record_decode_failure(&mut self) {
        self.decode_failures += 1;
    }
}
