//! Helpers shared by unit tests.

use std::io::Cursor;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use image::{DynamicImage, ImageFormat, RgbaImage};

use crate::decode::{self, DecodedImage, ImageDecoder};
use crate::error::LoadError;

/// Deterministic opaque RGBA value for pixel (x, y).
pub fn pattern_rgba(x: u32, y: u32) -> [u8; 4] {
    [
        (x * 40 % 256) as u8,
        (y * 40 % 256) as u8,
        ((x + y) * 10 % 256) as u8,
        255,
    ]
}

/// Encodes a `width` x `height` pattern image in `format`.
pub fn encode(format: ImageFormat, width: u32, height: u32) -> Vec<u8> {
    let rgba = RgbaImage::from_fn(width, height, |x, y| image::Rgba(pattern_rgba(x, y)));
    let img = match format {
        // No alpha channel in JPEG
        ImageFormat::Jpeg => DynamicImage::ImageRgb8(DynamicImage::ImageRgba8(rgba).to_rgb8()),
        _ => DynamicImage::ImageRgba8(rgba),
    };

    let mut bytes = Vec::new();
    img.write_to(&mut Cursor::new(&mut bytes), format)
        .expect("encode test image");
    bytes
}

/// Decoder stub that reads its output size from the bytes themselves.
///
/// `b"WxH"` (optionally followed by `#anything`) decodes to a W x H image,
/// any other bytes to 1 x 1, and bytes starting with `not` are rejected.
/// Pixels are filled with the wrapping sum of the input bytes so different
/// buffers give different images. Clones share the call counter.
#[derive(Debug, Clone, Default)]
pub struct TextDecoder {
    calls: Arc<AtomicUsize>,
}

impl TextDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl ImageDecoder for TextDecoder {
    fn decode(&self, bytes: &[u8], _name_hint: Option<&str>) -> Result<DecodedImage, LoadError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if bytes.starts_with(b"not") {
            return Err(LoadError::UnsupportedFormat("not an image".to_string()));
        }

        let (width, height) = parse_dims(bytes).unwrap_or((1, 1));
        let fill = bytes.iter().fold(0u8, |acc, b| acc.wrapping_add(*b));
        let len = width as usize * height as usize * 4;
        DecodedImage::from_bgra(vec![fill; len], width, height, decode::ImageFormat::Unknown)
    }
}

fn parse_dims(bytes: &[u8]) -> Option<(u32, u32)> {
    let text = std::str::from_utf8(bytes).ok()?;
    let dims = text.split('#').next()?;
    let (w, h) = dims.split_once('x')?;
    Some((w.parse().ok()?, h.parse().ok()?))
}
