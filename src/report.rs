//! Load and statistics reports
//!
//! Serializable summaries of cache activity, printed as JSON by the binary.

use serde::Serialize;

use crate::cache::{compute_cost, CacheStats, MEGABYTE};
use crate::error::LoadError;
use crate::handle::ImageHandle;

/// Outcome of loading one path
#[derive(Debug, Clone, Serialize)]
pub struct LoadReport {
    /// The requested path
    pub path: String,
    /// Whether a handle was produced
    pub loaded: bool,
    /// Cache key of the entry, when loaded
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
    /// Detected source format, e.g. "png"
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    /// Cost charged against the budget in bytes
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cost: Option<u64>,
    /// Answered from an existing entry without decoding
    pub cache_hit: bool,
    /// Error message describing what went wrong
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl LoadReport {
    /// Creates a report for a successful load
    pub fn success(path: impl Into<String>, handle: &ImageHandle, cache_hit: bool) -> Self {
        Self {
            path: path.into(),
            loaded: true,
            key: Some(handle.key().to_string()),
            width: Some(handle.width()),
            height: Some(handle.height()),
            format: Some(handle.format().to_string()),
            cost: Some(compute_cost(handle.width(), handle.height())),
            cache_hit,
            error: None,
        }
    }

    /// Creates a report for a failed load
    pub fn failure(path: impl Into<String>, error: &LoadError) -> Self {
        Self {
            path: path.into(),
            loaded: false,
            key: None,
            width: None,
            height: None,
            format: None,
            cost: None,
            cache_hit: false,
            error: Some(error.to_string()),
        }
    }
}

/// Snapshot of cache statistics with a timestamp
#[derive(Debug, Clone, Serialize)]
pub struct StatsReport {
    pub hits: u64,
    pub misses: u64,
    pub evictions: u64,
    pub decodes: u64,
    pub decode_failures: u64,
    /// Current number of entries in cache
    pub total_entries: usize,
    /// Sum of entry costs in bytes
    pub total_cost: u64,
    /// Budget in whole megabytes
    pub budget_mb: u64,
    /// Hit rate (hits / (hits + misses))
    pub hit_rate: f64,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl From<&CacheStats> for StatsReport {
    fn from(stats: &CacheStats) -> Self {
        Self {
            hits: stats.hits,
            misses: stats.misses,
            evictions: stats.evictions,
            decodes: stats.decodes,
            decode_failures: stats.decode_failures,
            total_entries: stats.total_entries,
            total_cost: stats.total_cost,
            budget_mb: stats.budget / MEGABYTE,
            hit_rate: stats.hit_rate(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}
