//! Generic Fallback Path
//!
//! Decodes every non-PNG format through the `image` crate.

use crate::decode::decoded::DecodedImage;
use crate::decode::format::ImageFormat;
use crate::error::LoadError;

/// Decodes `bytes` as `format` and normalizes the result to BGRA.
pub fn decode(bytes: &[u8], format: ImageFormat) -> Result<DecodedImage, LoadError> {
    let target = format
        .to_image_format()
        .ok_or_else(|| LoadError::UnsupportedFormat(format.to_string()))?;

    let img = image::load_from_memory_with_format(bytes, target).map_err(|err| match err {
        image::ImageError::Unsupported(_) => LoadError::UnsupportedFormat(err.to_string()),
        other => LoadError::Unreadable(format!("{format}: {other}")),
    })?;

    let rgba = img.to_rgba8();
    let (width, height) = rgba.dimensions();
    DecodedImage::from_rgba(rgba.into_raw(), width, height, format)
}
