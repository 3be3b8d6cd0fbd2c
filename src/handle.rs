//! Image Handles
//!
//! What a load returns to the renderer.

use std::sync::Arc;

use crate::decode::{DecodedImage, ImageFormat, PixelLayout};

// == Image Handle ==
/// Shared, read-only reference to a cached image.
///
/// The handle co-owns the pixel buffer, so it stays valid after the entry is
/// evicted or forgotten; the memory is released when the last handle drops.
/// While any handle is alive the entry is offered for eviction only after
/// every unreferenced entry has gone.
#[derive(Debug, Clone)]
pub struct ImageHandle {
    key: String,
    image: Arc<DecodedImage>,
}

impl ImageHandle {
    pub(crate) fn new(key: String, image: Arc<DecodedImage>) -> Self {
        Self { key, image }
    }

    /// Cache key the image was stored under.
    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn image(&self) -> &DecodedImage {
        &self.image
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// BGRA rows for the renderer, `stride()` bytes each.
    pub fn pixels(&self) -> &[u8] {
        self.image.pixels()
    }

    pub fn stride(&self) -> usize {
        self.image.stride()
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        self.image.pixel(x, y)
    }

    pub fn format(&self) -> ImageFormat {
        self.image.format()
    }

    pub fn layout(&self) -> PixelLayout {
        self.image.layout()
    }

    /// True when both handles point at the same decoded buffer.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.image, &other.image)
    }
}
