//! Eviction Policy Module
//!
//! Victim selection for budget enforcement. The store owns the accounting;
//! a policy only decides which key goes next.

use std::fmt;
use std::str::FromStr;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use crate::cache::LruEviction;
use crate::error::ConfigError;

// == Eviction Policy ==
/// Chooses which entry to drop when the cache is over budget.
///
/// The store calls the hooks as entries come and go so stateful policies can
/// keep their own bookkeeping in step with the entry map.
pub trait EvictionPolicy: fmt::Debug + Send {
    /// Short name used in logs and reports.
    fn name(&self) -> &'static str;

    fn on_insert(&mut self, _key: &str) {}

    fn on_hit(&mut self, _key: &str) {}

    fn on_remove(&mut self, _key: &str) {}

    /// Picks one of `candidates` (never empty, sorted by key).
    fn choose_victim(&mut self, candidates: &[&str]) -> Option<String>;
}

// == Random Eviction ==
/// Uniformly random victim selection; no recency bookkeeping at all.
#[derive(Debug, Clone)]
pub struct RandomEviction {
    rng: StdRng,
}

impl RandomEviction {
    /// Seeds from OS entropy.
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Deterministic sequence of choices, for reproducible runs and tests.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomEviction {
    fn default() -> Self {
        Self::new()
    }
}

impl EvictionPolicy for RandomEviction {
    fn name(&self) -> &'static str {
        "random"
    }

    fn choose_victim(&mut self, candidates: &[&str]) -> Option<String> {
        candidates.choose(&mut self.rng).map(|key| key.to_string())
    }
}

// == Eviction Strategy ==
/// Configurable choice of policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EvictionStrategy {
    #[default]
    Random,
    Lru,
}

impl EvictionStrategy {
    /// Builds the policy; `seed` only affects [`RandomEviction`].
    pub fn build(self, seed: Option<u64>) -> Box<dyn EvictionPolicy> {
        match self {
            Self::Random => Box::new(seed.map_or_else(RandomEviction::new, RandomEviction::with_seed)),
            Self::Lru => Box::new(LruEviction::new()),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Random => "random",
            Self::Lru => "lru",
        }
    }
}

impl FromStr for EvictionStrategy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "random" => Ok(Self::Random),
            "lru" => Ok(Self::Lru),
            _ => Err(ConfigError::InvalidValue {
                key: "eviction".to_string(),
                value: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for EvictionStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
