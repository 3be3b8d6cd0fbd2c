//! Shared Image Cache
//!
//! Serializes every cache operation behind one exclusive lock for hosts that
//! load images from more than one thread.

use std::sync::Arc;

use parking_lot::Mutex;

use crate::cache::CacheStats;
use crate::context::ImageCache;
use crate::decode::{ImageDecoder, RasterDecoder};
use crate::error::Result;
use crate::handle::ImageHandle;
use crate::loader::{ContentFetcher, FsFetcher};

// == Shared Image Cache ==
/// Cheaply cloneable, thread-safe handle to one [`ImageCache`].
///
/// Decodes run while the lock is held, so two threads asking for the same
/// key never decode it twice.
#[derive(Debug)]
pub struct SharedImageCache<F = FsFetcher, D = RasterDecoder> {
    inner: Arc<Mutex<ImageCache<F, D>>>,
}

impl<F, D> Clone for SharedImageCache<F, D> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<F, D> SharedImageCache<F, D> {
    pub fn new(cache: ImageCache<F, D>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(cache)),
        }
    }

    /// Runs `f` with exclusive access to the cache.
    pub fn with_cache<R>(&self, f: impl FnOnce(&mut ImageCache<F, D>) -> R) -> R {
        let mut guard = self.inner.lock();
        f(&mut guard)
    }

    pub fn forget_image(&self, key: &str) -> bool {
        self.inner.lock().forget_image(key)
    }

    pub fn set_cache_budget_mb(&self, mb: u64) -> usize {
        self.inner.lock().set_cache_budget_mb(mb)
    }

    pub fn cache_budget_mb(&self) -> u64 {
        self.inner.lock().cache_budget_mb()
    }

    pub fn stats(&self) -> CacheStats {
        self.inner.lock().stats()
    }
}

impl<F: ContentFetcher, D: ImageDecoder> SharedImageCache<F, D> {
    pub fn query_image(&self, path: &str) -> Option<ImageHandle> {
        self.inner.lock().query_image(path)
    }

    pub fn try_query_image(&self, path: &str) -> Result<ImageHandle> {
        self.inner.lock().try_query_image(path)
    }

    pub fn query_image_memory(&self, bytes: &[u8], id: Option<&str>) -> Option<ImageHandle> {
        self.inner.lock().query_image_memory(bytes, id)
    }
}

impl<F, D> From<ImageCache<F, D>> for SharedImageCache<F, D> {
    fn from(cache: ImageCache<F, D>) -> Self {
        Self::new(cache)
    }
}
