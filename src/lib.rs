//! Pixel Cache - decoded image loading and caching
//!
//! Loads images from paths or memory, decodes them to BGRA bitmaps and keeps
//! them in a byte-budgeted cache with random or LRU eviction.

pub mod cache;
pub mod config;
pub mod context;
pub mod decode;
pub mod error;
pub mod handle;
pub mod hash;
pub mod loader;
pub mod report;
pub mod shared;

#[cfg(test)]
mod test_support;

pub use cache::{CacheStats, CacheStore, EvictionPolicy, EvictionStrategy};
pub use config::Config;
pub use context::ImageCache;
pub use decode::{DecodedImage, ImageDecoder, ImageFormat, PixelLayout, RasterDecoder};
pub use error::{LoadError, Result};
pub use handle::ImageHandle;
pub use hash::content_id;
pub use loader::{ContentFetcher, FsFetcher, Loader, Source};
pub use report::{LoadReport, StatsReport};
pub use shared::SharedImageCache;
