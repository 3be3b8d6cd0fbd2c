//! Loader Module
//!
//! Resolves a path or buffer to a cached image: lookup, fetch, decode,
//! insert, then enforce the budget.

use std::borrow::Cow;
use std::fs;
use std::io;
use std::sync::Arc;

use tracing::debug;

use crate::cache::{compute_cost, CacheStore};
use crate::decode::{ImageDecoder, RasterDecoder};
use crate::error::{LoadError, Result};
use crate::hash::content_id;
use crate::handle::ImageHandle;

// == Content Fetcher ==
/// Supplies the raw bytes behind a path.
pub trait ContentFetcher {
    fn fetch(&self, path: &str) -> io::Result<Vec<u8>>;
}

/// Reads paths from the local file system.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsFetcher;

impl ContentFetcher for FsFetcher {
    fn fetch(&self, path: &str) -> io::Result<Vec<u8>> {
        fs::read(path)
    }
}

impl<F> ContentFetcher for F
where
    F: Fn(&str) -> io::Result<Vec<u8>>,
{
    fn fetch(&self, path: &str) -> io::Result<Vec<u8>> {
        self(path)
    }
}

// == Source ==
/// Where the bytes of an image come from.
#[derive(Debug, Clone, Copy)]
pub enum Source<'a> {
    /// Fetched through the [`ContentFetcher`]; the path is the cache key
    Path(&'a str),
    /// Caller-supplied bytes, keyed by `id` or else by their content hash
    Memory { bytes: &'a [u8], id: Option<&'a str> },
}

impl<'a> Source<'a> {
    // == Key ==
    /// Cache key for this source.
    pub fn key(&self) -> Cow<'a, str> {
        match *self {
            Source::Path(path) => Cow::Borrowed(path),
            Source::Memory { id: Some(id), .. } => Cow::Borrowed(id),
            Source::Memory { bytes, id: None } => Cow::Owned(content_id(bytes)),
        }
    }

    /// Name whose suffix may identify the format when the bytes do not.
    pub fn name_hint(&self) -> Option<&'a str> {
        match *self {
            Source::Path(path) => Some(path),
            Source::Memory { id, .. } => id,
        }
    }
}

// == Loader ==
/// Couples a fetcher and a decoder; the cache store is passed in per call.
#[derive(Debug, Clone, Default)]
pub struct Loader<F = FsFetcher, D = RasterDecoder> {
    fetcher: F,
    decoder: D,
}

impl<F, D> Loader<F, D> {
    pub fn new(fetcher: F, decoder: D) -> Self {
        Self { fetcher, decoder }
    }

    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    pub fn decoder(&self) -> &D {
        &self.decoder
    }

    pub(crate) fn into_parts(self) -> (F, D) {
        (self.fetcher, self.decoder)
    }
}

impl<F: ContentFetcher, D: ImageDecoder> Loader<F, D> {
    // == Load ==
    /// Returns a handle for `source`, decoding only on a cache miss.
    ///
    /// On failure nothing is inserted and `total_cost` is unchanged.
    pub fn load(&self, store: &mut CacheStore, source: Source<'_>) -> Result<ImageHandle> {
        let key = source.key();

        if let Some(handle) = store.record_hit(&key) {
            debug!(key = %key, "image cache hit");
            return Ok(handle);
        }
        store.record_miss();

        let fetched;
        let bytes = match source {
            Source::Path(path) => {
                fetched = self.fetcher.fetch(path).map_err(|source| {
                    store.record_decode_failure();
                    debug!(path, error = %source, "image fetch failed");
                    LoadError::NotFound {
                        path: path.to_string(),
                        source,
                    }
                })?;
                &fetched[..]
            }
            Source::Memory { bytes, .. } => bytes,
        };

        let image = self
            .decoder
            .decode(bytes, source.name_hint())
            .map_err(|err| {
                store.record_decode_failure();
                debug!(key = %key, error = %err, "image decode failed");
                err
            })?;
        store.record_decode();

        let cost = compute_cost(image.width(), image.height());
        let key = key.into_owned();
        let handle = match store.insert(key.clone(), Arc::new(image), cost) {
            Ok(entry) => entry.handle(),
            Err(err) => {
                // Unreachable after a miss on the same thread
                debug_assert!(false, "{err}");
                match store.lookup(&key) {
                    Some(entry) => entry.handle(),
                    None => return Err(LoadError::Unreadable(err.to_string())),
                }
            }
        };

        // The fresh handle pins the new entry, so older entries go first
        store.enforce_budget();
        Ok(handle)
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::{ENTRY_OVERHEAD, MEGABYTE};
    use crate::test_support::{encode, TextDecoder};

    fn memory<'a>(bytes: &'a [u8], id: Option<&'a str>) -> Source<'a> {
        Source::Memory { bytes, id }
    }

    fn no_files(_: &str) -> io::Result<Vec<u8>> {
        Err(io::Error::from(io::ErrorKind::NotFound))
    }

    #[test]
    fn test_source_keys() {
        assert_eq!(Source::Path("a/b.png").key(), "a/b.png");
        assert_eq!(memory(b"abc", Some("thumb-1")).key(), "thumb-1");
        assert_eq!(memory(b"abc", None).key(), content_id(b"abc"));
    }

    #[test]
    fn test_source_name_hints() {
        assert_eq!(Source::Path("a.tga").name_hint(), Some("a.tga"));
        assert_eq!(memory(b"", Some("x.png")).name_hint(), Some("x.png"));
        assert_eq!(memory(b"", None).name_hint(), None);
    }

    #[test]
    fn test_load_memory_inserts_entry() {
        let loader = Loader::new(no_files, TextDecoder::new());
        let mut store = CacheStore::new(MEGABYTE);

        let handle = loader.load(&mut store, memory(b"100x100", None)).unwrap();

        assert_eq!((handle.width(), handle.height()), (100, 100));
        assert_eq!(store.total_cost(), 100 * 100 * 4 + ENTRY_OVERHEAD);
        assert_eq!(store.len(), 1);
        assert_eq!(handle.key(), content_id(b"100x100"));
    }

    #[test]
    fn test_hit_skips_decoder() {
        let decoder = TextDecoder::new();
        let loader = Loader::new(no_files, decoder.clone());
        let mut store = CacheStore::new(MEGABYTE);

        let first = loader.load(&mut store, memory(b"abc", None)).unwrap();
        let calls = decoder.calls();
        let second = loader.load(&mut store, memory(b"abc", None)).unwrap();

        assert_eq!(decoder.calls(), calls);
        assert!(first.ptr_eq(&second));
        assert_eq!(first.key(), second.key());
        assert_eq!(store.stats().hits, 1);
        assert_eq!(store.stats().misses, 1);
    }

    #[test]
    fn test_load_path_through_fetcher() {
        let fetch = |path: &str| -> io::Result<Vec<u8>> {
            match path {
                "icons/ok.png" => Ok(encode(image::ImageFormat::Png, 3, 2)),
                _ => Err(io::Error::from(io::ErrorKind::NotFound)),
            }
        };
        let loader = Loader::new(fetch, RasterDecoder);
        let mut store = CacheStore::new(MEGABYTE);

        let handle = loader.load(&mut store, Source::Path("icons/ok.png")).unwrap();

        assert_eq!(handle.key(), "icons/ok.png");
        assert_eq!((handle.width(), handle.height()), (3, 2));
        assert!(store.contains("icons/ok.png"));
    }

    #[test]
    fn test_fetch_failure_is_not_found() {
        let loader = Loader::new(no_files, TextDecoder::new());
        let mut store = CacheStore::new(MEGABYTE);

        let result = loader.load(&mut store, Source::Path("missing.png"));

        assert!(matches!(result, Err(LoadError::NotFound { .. })));
        assert!(store.is_empty());
        assert_eq!(store.stats().decode_failures, 1);
    }

    #[test]
    fn test_decode_failure_leaves_store_unchanged() {
        let loader = Loader::new(no_files, TextDecoder::new());
        let mut store = CacheStore::new(MEGABYTE);
        loader.load(&mut store, memory(b"4x4", None)).unwrap();
        let before = store.total_cost();

        let result = loader.load(&mut store, memory(b"notanimage", None));

        assert!(matches!(result, Err(LoadError::UnsupportedFormat(_))));
        assert_eq!(store.total_cost(), before);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_load_enforces_budget() {
        let loader = Loader::new(no_files, TextDecoder::new());
        let mut store = CacheStore::new(MEGABYTE);

        for i in 0..5 {
            let bytes = format!("500x500#{i}");
            loader.load(&mut store, memory(bytes.as_bytes(), None)).unwrap();
            assert!(store.total_cost() <= MEGABYTE);
        }
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_oversized_image_still_returns_valid_handle() {
        let loader = Loader::new(no_files, TextDecoder::new());
        let mut store = CacheStore::new(1024);

        let handle = loader.load(&mut store, memory(b"64x64", None)).unwrap();

        assert!(store.is_empty());
        assert_eq!(store.total_cost(), 0);
        assert_eq!(handle.pixels().len(), 64 * 64 * 4);
    }

    #[test]
    fn test_newest_entry_survives_its_own_eviction_pass() {
        let loader = Loader::new(no_files, TextDecoder::new());
        let mut store = CacheStore::new(MEGABYTE);

        loader.load(&mut store, memory(b"400x400#old", None)).unwrap();
        let fresh = loader.load(&mut store, memory(b"400x400#new", None)).unwrap();

        assert_eq!(store.len(), 1);
        assert!(store.contains(fresh.key()));
    }
}
