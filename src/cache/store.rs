//! Cache Store Module
//!
//! Keyed storage of decoded images with running cost accounting and budget
//! enforcement.

use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::sync::Arc;

use tracing::{debug, error, info, warn};

use crate::cache::{CacheEntry, CacheStats, EvictionPolicy, RandomEviction, DEFAULT_BUDGET};
use crate::decode::DecodedImage;
use crate::error::CacheError;
use crate::handle::ImageHandle;

// == Cache Store ==
/// Decoded images keyed by path or content id.
///
/// `total_cost` is always the sum of the costs of the entries present, and no
/// two entries share a key.
#[derive(Debug)]
pub struct CacheStore {
    /// Key-entry storage
    entries: HashMap<String, CacheEntry>,
    /// Sum of entry costs in bytes
    total_cost: u64,
    /// Ceiling on `total_cost` in bytes
    budget: u64,
    /// Performance statistics
    stats: CacheStats,
    /// Victim selection
    policy: Box<dyn EvictionPolicy>,
}

impl Default for CacheStore {
    fn default() -> Self {
        Self::new(DEFAULT_BUDGET)
    }
}

impl CacheStore {
    // == Constructor ==
    /// Creates an empty store with a `budget` in bytes and random eviction.
    pub fn new(budget: u64) -> Self {
        Self::with_policy(budget, Box::new(RandomEviction::new()))
    }

    pub fn with_policy(budget: u64, policy: Box<dyn EvictionPolicy>) -> Self {
        Self {
            entries: HashMap::new(),
            total_cost: 0,
            budget,
            stats: CacheStats::new(),
            policy,
        }
    }

    // == Lookup ==
    /// Returns the entry stored under exactly `key`. Does not touch any state.
    pub fn lookup(&self, key: &str) -> Option<&CacheEntry> {
        self.entries.get(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    // == Record Hit ==
    /// Counts a hit on `key` and returns a fresh handle to it.
    pub fn record_hit(&mut self, key: &str) -> Option<ImageHandle> {
        let entry = self.entries.get_mut(key)?;
        entry.record_hit();
        self.stats.record_hit();
        self.policy.on_hit(key);
        Some(entry.handle())
    }

    pub fn record_miss(&mut self) {
        self.stats.record_miss();
    }

    pub fn record_decode(&mut self) {
        self.stats.record_decode();
    }

    pub fn record_decode_failure(&mut self) {
        self.stats.record_decode_failure();
    }

    // == Insert ==
    /// Adds a new entry and charges its cost. Never evicts.
    ///
    /// Inserting a key that is already present is a caller bug: the store is
    /// left untouched and `CacheError::DuplicateKey` is returned.
    pub fn insert(
        &mut self,
        key: String,
        image: Arc<DecodedImage>,
        cost: u64,
    ) -> Result<&CacheEntry, CacheError> {
        debug_assert!(cost > 0, "entry cost must be positive");
        let new_len = self.entries.len() + 1;

        match self.entries.entry(key) {
            Entry::Occupied(occupied) => {
                error!(key = %occupied.key(), "insert of a key already in the image cache");
                Err(CacheError::DuplicateKey(occupied.key().clone()))
            }
            Entry::Vacant(vacant) => {
                let key = vacant.key().clone();
                self.policy.on_insert(&key);
                self.total_cost += cost;
                self.stats.total_entries = new_len;
                debug!(key = %key, cost, total_cost = self.total_cost, "image cached");
                Ok(vacant.insert(CacheEntry::new(key, image, cost)))
            }
        }
    }

    // == Remove ==
    /// Removes `key` and refunds its cost. Absent keys are a logged no-op.
    pub fn remove(&mut self, key: &str) -> Option<CacheEntry> {
        match self.entries.remove(key) {
            Some(entry) => {
                self.total_cost -= entry.cost();
                self.policy.on_remove(key);
                self.stats.total_entries = self.entries.len();
                Some(entry)
            }
            None => {
                debug!(key, "remove of a key not in the image cache");
                None
            }
        }
    }

    // == Clear ==
    /// Drops every entry. Not counted as evictions.
    pub fn clear(&mut self) {
        let keys: Vec<String> = self.entries.keys().cloned().collect();
        for key in keys {
            self.remove(&key);
        }
    }

    // == Budget ==
    pub fn total_cost(&self) -> u64 {
        self.total_cost
    }

    pub fn budget(&self) -> u64 {
        self.budget
    }

    /// Changes the budget and immediately evicts down to it.
    ///
    /// Returns the number of entries evicted.
    pub fn set_budget(&mut self, budget: u64) -> usize {
        info!(
            old = self.budget,
            new = budget,
            policy = self.policy.name(),
            "image cache budget changed"
        );
        self.budget = budget;
        self.enforce_budget()
    }

    // == Enforce Budget ==
    /// Evicts until `total_cost <= budget` or the store is empty.
    ///
    /// Returns the number of entries evicted.
    pub fn enforce_budget(&mut self) -> usize {
        let mut evicted = 0;
        while self.total_cost > self.budget && !self.entries.is_empty() {
            if self.evict_one().is_none() {
                break;
            }
            evicted += 1;
        }
        evicted
    }

    // Entries without live handles are offered first; when every entry is
    // referenced all of them are offered, since handles keep their pixels
    // alive regardless.
    fn evict_one(&mut self) -> Option<CacheEntry> {
        let mut candidates: Vec<&str> = self
            .entries
            .values()
            .filter(|entry| !entry.is_referenced())
            .map(CacheEntry::key)
            .collect();
        if candidates.is_empty() {
            candidates = self.entries.keys().map(String::as_str).collect();
        }
        candidates.sort_unstable();

        let first = candidates.first()?.to_string();
        let victim = match self.policy.choose_victim(&candidates) {
            Some(key) if self.entries.contains_key(&key) => key,
            other => {
                warn!(
                    policy = self.policy.name(),
                    choice = ?other,
                    "eviction policy gave no usable victim, evicting {first}"
                );
                first
            }
        };

        let entry = self.remove(&victim)?;
        self.stats.record_eviction();
        debug!(
            key = %victim,
            cost = entry.cost(),
            total_cost = self.total_cost,
            budget = self.budget,
            "image evicted"
        );
        Some(entry)
    }

    // == Introspection ==
    /// Returns current cache statistics.
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.total_entries = self.entries.len();
        stats.total_cost = self.total_cost;
        stats.budget = self.budget;
        stats
    }

    pub fn policy_name(&self) -> &'static str {
        self.policy.name()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn entries(&self) -> impl Iterator<Item = &CacheEntry> {
        self.entries.values()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
