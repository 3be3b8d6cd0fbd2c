//! Cache Entry Module
//!
//! Defines a single decoded image held by the cache together with its cost.

use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::decode::{DecodedImage, BYTES_PER_PIXEL};
use crate::handle::ImageHandle;

/// Fixed per-entry cost on top of the pixel bytes, covering metadata and
/// allocator slack.
pub const ENTRY_OVERHEAD: u64 = 1024 + std::mem::size_of::<DecodedImage>() as u64;

// == Cost ==
/// Accounting cost of a `width` x `height` image: `w * h * 4 + ENTRY_OVERHEAD`.
///
/// Always positive, which is what guarantees the eviction loop terminates.
pub fn compute_cost(width: u32, height: u32) -> u64 {
    u64::from(width) * u64::from(height) * BYTES_PER_PIXEL as u64 + ENTRY_OVERHEAD
}

// == Cache Entry ==
/// A decoded image stored under one key.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    key: String,
    image: Arc<DecodedImage>,
    cost: u64,
    created_at: DateTime<Utc>,
    hits: u64,
}

impl CacheEntry {
    // == Constructor ==
    pub fn new(key: String, image: Arc<DecodedImage>, cost: u64) -> Self {
        Self {
            key,
            image,
            cost,
            created_at: Utc::now(),
            hits: 0,
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn image(&self) -> &Arc<DecodedImage> {
        &self.image
    }

    pub fn cost(&self) -> u64 {
        self.cost
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Number of lookups served from this entry since it was inserted.
    pub fn hits(&self) -> u64 {
        self.hits
    }

    // == Is Referenced ==
    /// True while at least one [`ImageHandle`] for this entry is alive.
    pub fn is_referenced(&self) -> bool {
        Arc::strong_count(&self.image) > 1
    }

    /// Hands out a new reference-counted handle to the pixels.
    pub fn handle(&self) -> ImageHandle {
        ImageHandle::new(self.key.clone(), Arc::clone(&self.image))
    }

    pub(crate) fn record_hit(&mut self) {
        self.hits += 1;
    }
}
