//! Decode Module
//!
//! Turns raw image bytes into normalized BGRA bitmaps. PNG goes through the
//! dedicated `png` codec; everything else goes through the `image` crate.

mod decoded;
mod format;
mod generic;
mod pixel;
mod png_codec;

use tracing::trace;

// Re-export public types
pub use decoded::DecodedImage;
pub use format::ImageFormat;
pub use pixel::{expand_to_rgba, rgba_to_bgra_in_place, PixelLayout, BYTES_PER_PIXEL};

use crate::error::LoadError;

// == Decoder Seam ==
/// Anything that can turn bytes into a [`DecodedImage`].
///
/// `name_hint` is the path or explicit id the bytes were requested under; it
/// is only consulted when the bytes carry no recognisable signature.
pub trait ImageDecoder {
    fn decode(&self, bytes: &[u8], name_hint: Option<&str>) -> Result<DecodedImage, LoadError>;
}

// == Raster Decoder ==
/// Default decoder: signature sniffing, PNG fast path, generic fallback.
#[derive(Debug, Clone, Copy, Default)]
pub struct RasterDecoder;

impl ImageDecoder for RasterDecoder {
    fn decode(&self, bytes: &[u8], name_hint: Option<&str>) -> Result<DecodedImage, LoadError> {
        let format = ImageFormat::detect(bytes, name_hint);
        trace!(%format, len = bytes.len(), "dispatching decode");

        match format {
            ImageFormat::Png => png_codec::decode(bytes),
            ImageFormat::Unknown => Err(LoadError::UnsupportedFormat(match name_hint {
                Some(name) => format!("no decoder for {name}"),
                None => format!("no decoder for {} byte buffer", bytes.len()),
            })),
            other => generic::decode(bytes, other),
        }
    }
}

impl<D: ImageDecoder + ?Sized> ImageDecoder for &D {
    fn decode(&self, bytes: &[u8], name_hint: Option<&str>) -> Result<DecodedImage, LoadError> {
        (**self).decode(bytes, name_hint)
    }
}
