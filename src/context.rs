//! Image Cache Facade
//!
//! The public query/forget/budget operations over one explicitly owned cache.

use tracing::debug;

use crate::cache::{CacheStats, CacheStore, MEGABYTE};
use crate::config::Config;
use crate::decode::{ImageDecoder, RasterDecoder};
use crate::error::Result;
use crate::handle::ImageHandle;
use crate::loader::{ContentFetcher, FsFetcher, Loader, Source};

// == Image Cache ==
/// A cache of decoded images plus the fetcher and decoder that fill it.
///
/// Every operation runs to completion on the calling thread. Wrap it in a
/// [`SharedImageCache`](crate::SharedImageCache) to use it from several
/// threads.
#[derive(Debug)]
pub struct ImageCache<F = FsFetcher, D = RasterDecoder> {
    store: CacheStore,
    loader: Loader<F, D>,
}

impl ImageCache {
    /// File system fetcher, default decoder, 384 MB budget, random eviction.
    pub fn new() -> Self {
        Self::from_config(&Config::default())
    }

    pub fn from_config(config: &Config) -> Self {
        let policy = config.eviction.build(config.eviction_seed);
        let store = CacheStore::with_policy(config.budget_bytes(), policy);
        Self::with_parts(store, FsFetcher, RasterDecoder)
    }
}

impl Default for ImageCache {
    fn default() -> Self {
        Self::new()
    }
}

impl<F, D> ImageCache<F, D> {
    pub fn with_parts(store: CacheStore, fetcher: F, decoder: D) -> Self {
        Self {
            store,
            loader: Loader::new(fetcher, decoder),
        }
    }

    /// Swaps the content fetcher, keeping the store and decoder.
    pub fn with_fetcher<G>(self, fetcher: G) -> ImageCache<G, D> {
        let (_, decoder) = self.loader.into_parts();
        ImageCache::with_parts(self.store, fetcher, decoder)
    }

    /// Swaps the decoder, keeping the store and fetcher.
    pub fn with_decoder<E>(self, decoder: E) -> ImageCache<F, E> {
        let (fetcher, _) = self.loader.into_parts();
        ImageCache::with_parts(self.store, fetcher, decoder)
    }

    // == Budget ==
    /// Sets the budget in megabytes, evicting immediately if now over it.
    ///
    /// Returns the number of entries evicted.
    pub fn set_cache_budget_mb(&mut self, mb: u64) -> usize {
        self.store.set_budget(mb.saturating_mul(MEGABYTE))
    }

    /// Budget in whole megabytes.
    pub fn cache_budget_mb(&self) -> u64 {
        self.store.budget() / MEGABYTE
    }

    // == Forget ==
    /// Drops the entry for `key` so the next query decodes afresh.
    ///
    /// Idempotent; returns whether an entry was present.
    pub fn forget_image(&mut self, key: &str) -> bool {
        self.store.remove(key).is_some()
    }

    // == Introspection ==
    pub fn stats(&self) -> CacheStats {
        self.store.stats()
    }

    pub fn total_cost(&self) -> u64 {
        self.store.total_cost()
    }

    pub fn len(&self) -> usize {
        self.store.len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    pub fn store(&self) -> &CacheStore {
        &self.store
    }

    pub fn loader(&self) -> &Loader<F, D> {
        &self.loader
    }
}

impl<F: ContentFetcher, D: ImageDecoder> ImageCache<F, D> {
    // == Query Image ==
    /// Handle for the image at `path`, or `None` if it cannot be loaded.
    pub fn query_image(&mut self, path: &str) -> Option<ImageHandle> {
        self.try_query_image(path).ok()
    }

    /// Like [`ImageCache::query_image`] but reports why a load failed.
    pub fn try_query_image(&mut self, path: &str) -> Result<ImageHandle> {
        self.load(Source::Path(path))
    }

    // == Query Image Memory ==
    /// Handle for an in-memory image, or `None` if it cannot be decoded.
    ///
    /// Without `id` the key is the content hash of `bytes`. With `id` the
    /// first buffer stored under that id wins: later buffers under the same
    /// id get the cached image back and are never decoded.
    pub fn query_image_memory(&mut self, bytes: &[u8], id: Option<&str>) -> Option<ImageHandle> {
        self.try_query_image_memory(bytes, id).ok()
    }

    /// Like [`ImageCache::query_image_memory`] but reports why a load failed.
    pub fn try_query_image_memory(&mut self, bytes: &[u8], id: Option<&str>) -> Result<ImageHandle> {
        self.load(Source::Memory { bytes, id })
    }

    fn load(&mut self, source: Source<'_>) -> Result<ImageHandle> {
        self.loader.load(&mut self.store, source).map_err(|err| {
            debug!(error = %err, "image unavailable");
            err
        })
    }
}
