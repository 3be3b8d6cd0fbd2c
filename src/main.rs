//! Pixel Cache - decoded image loading and caching
//!
//! Loads every image path given on the command line through one cache and
//! prints a JSON report per path followed by the final cache statistics.

use std::env;

use anyhow::{bail, Context};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use pixel_cache::{Config, ImageCache, LoadReport, StatsReport};

/// Main entry point for the pixel cache tool.
///
/// # Startup Sequence
/// 1. Initialize tracing subscriber for logging
/// 2. Load configuration from environment variables
/// 3. Create the image cache with the configured budget and policy
/// 4. Load each path, printing one report line per path
/// 5. Print the final statistics
fn main() -> anyhow::Result<()> {
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "pixel_cache=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let paths: Vec<String> = env::args().skip(1).collect();
    if paths.is_empty() {
        bail!("usage: pixel_cache <image-path>...");
    }

    let config = Config::try_from_env().context("reading configuration")?;
    info!(
        "Configuration loaded: budget={}MB, eviction={}, seed={:?}",
        config.budget_mb, config.eviction, config.eviction_seed
    );

    let mut cache = ImageCache::from_config(&config);

    for path in &paths {
        let hits_before = cache.stats().hits;
        let report = match cache.try_query_image(path) {
            Ok(handle) => LoadReport::success(path, &handle, cache.stats().hits > hits_before),
            Err(err) => {
                warn!(path = %path, error = %err, "Skipping image");
                LoadReport::failure(path, &err)
            }
        };
        println!("{}", serde_json::to_string(&report)?);
    }

    let stats = cache.stats();
    println!("{}", serde_json::to_string(&StatsReport::from(&stats))?);
    info!(
        "Done: {} entries, {} bytes cached, {} evictions",
        stats.total_entries, stats.total_cost, stats.evictions
    );

    Ok(())
}
