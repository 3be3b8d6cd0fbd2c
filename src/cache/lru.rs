//! LRU Eviction Module
//!
//! Least Recently Used victim selection, available as an alternative to the
//! default random policy.

use std::collections::VecDeque;

use crate::cache::EvictionPolicy;

// == LRU Eviction ==
/// Tracks access order for LRU eviction.
///
/// Keys are stored in a VecDeque where:
/// - Front = Most recently used
/// - Back = Least recently used
#[derive(Debug, Default)]
pub struct LruEviction {
    order: VecDeque<String>,
}

impl LruEviction {
    // == Constructor ==
    pub fn new() -> Self {
        Self {
            order: VecDeque::new(),
        }
    }

    // == Touch ==
    /// Marks a key as recently used (moves to front).
    pub fn touch(&mut self, key: &str) {
        self.forget(key);
        self.order.push_front(key.to_string());
    }

    /// Stops tracking a key.
    pub fn forget(&mut self, key: &str) {
        self.order.retain(|k| k != key);
    }

    /// Returns the least recently used key without removing it.
    pub fn peek_oldest(&self) -> Option<&str> {
        self.order.back().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

impl EvictionPolicy for LruEviction {
    fn name(&self) -> &'static str {
        "lru"
    }

    fn on_insert(&mut self, key: &str) {
        self.touch(key);
    }

    fn on_hit(&mut self, key: &str) {
        self.touch(key);
    }

    fn on_remove(&mut self, key: &str) {
        self.forget(key);
    }

    // Oldest tracked key that is also a candidate; untracked candidates
    // count as older than anything tracked.
    fn choose_victim(&mut self, candidates: &[&str]) -> Option<String> {
        if let Some(untracked) = candidates.iter().find(|c| !self.order.iter().any(|k| k == *c)) {
            return Some(untracked.to_string());
        }
        self.order
            .iter()
            .rev()
            .find(|k| candidates.contains(&k.as_str()))
            .cloned()
    }
}
