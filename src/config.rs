//! Configuration Module
//!
//! Handles loading image cache configuration from environment variables.

use std::env;

use crate::cache::{EvictionStrategy, DEFAULT_BUDGET_MB, MEGABYTE};
use crate::error::ConfigError;

/// Environment variable holding the budget in megabytes.
pub const ENV_BUDGET_MB: &str = "PIXEL_CACHE_BUDGET_MB";
/// Environment variable selecting `random` or `lru` eviction.
pub const ENV_EVICTION: &str = "PIXEL_CACHE_EVICTION";
/// Environment variable seeding random eviction.
pub const ENV_SEED: &str = "PIXEL_CACHE_SEED";

/// Image cache configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Budget in megabytes
    pub budget_mb: u64,
    /// Victim selection policy
    pub eviction: EvictionStrategy,
    /// Fixed seed for random eviction, None = OS entropy
    pub eviction_seed: Option<u64>,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// Unparseable values fall back to their defaults.
    ///
    /// # Environment Variables
    /// - `PIXEL_CACHE_BUDGET_MB` - Budget in megabytes (default: 384)
    /// - `PIXEL_CACHE_EVICTION` - `random` or `lru` (default: random)
    /// - `PIXEL_CACHE_SEED` - Seed for random eviction (default: unset)
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Like [`Config::from_env`] but reports unparseable values.
    pub fn try_from_env() -> Result<Self, ConfigError> {
        Self::try_from_lookup(|key| env::var(key).ok())
    }

    /// Builds a config from any key lookup, defaulting bad values.
    pub fn from_lookup<L>(lookup: L) -> Self
    where
        L: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        Self {
            budget_mb: lookup(ENV_BUDGET_MB)
                .and_then(|v| v.trim().parse().ok())
                .unwrap_or(defaults.budget_mb),
            eviction: lookup(ENV_EVICTION)
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.eviction),
            eviction_seed: lookup(ENV_SEED).and_then(|v| v.trim().parse().ok()),
        }
    }

    /// Builds a config from any key lookup, rejecting bad values.
    pub fn try_from_lookup<L>(lookup: L) -> Result<Self, ConfigError>
    where
        L: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(value) = lookup(ENV_BUDGET_MB) {
            config.budget_mb = value.trim().parse().map_err(|_| invalid(ENV_BUDGET_MB, &value))?;
        }
        if let Some(value) = lookup(ENV_EVICTION) {
            config.eviction = value.parse().map_err(|_| invalid(ENV_EVICTION, &value))?;
        }
        if let Some(value) = lookup(ENV_SEED) {
            config.eviction_seed = Some(value.trim().parse().map_err(|_| invalid(ENV_SEED, &value))?);
        }

        Ok(config)
    }

    /// Sets the budget in megabytes.
    pub fn with_budget_mb(mut self, mb: u64) -> Self {
        self.budget_mb = mb;
        self
    }

    pub fn with_eviction(mut self, eviction: EvictionStrategy) -> Self {
        self.eviction = eviction;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.eviction_seed = Some(seed);
        self
    }

    /// Budget in bytes.
    pub fn budget_bytes(&self) -> u64 {
        self.budget_mb.saturating_mul(MEGABYTE)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            budget_mb: DEFAULT_BUDGET_MB,
            eviction: EvictionStrategy::Random,
            eviction_seed: None,
        }
    }
}

fn invalid(key: &str, value: &str) -> ConfigError {
    ConfigError::InvalidValue {
        key: key.to_string(),
        value: value.to_string(),
    }
}
