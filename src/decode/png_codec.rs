//! PNG Fast Path
//!
//! Decodes PNG through the dedicated `png` codec rather than the generic
//! decoder.

use std::io::Cursor;

use png::{ColorType, Decoder, Transformations};

use crate::decode::decoded::DecodedImage;
use crate::decode::format::ImageFormat;
use crate::decode::pixel::expand_to_rgba;
use crate::error::LoadError;

/// Decodes the first frame of a PNG stream into a BGRA image.
pub fn decode(bytes: &[u8]) -> Result<DecodedImage, LoadError> {
    let mut decoder = Decoder::new(Cursor::new(bytes));
    // Palette and sub-byte depths expand to 8 bits, 16-bit samples are stripped.
    decoder.set_transformations(Transformations::normalize_to_color8());

    let mut reader = decoder.read_info().map_err(unreadable)?;
    let mut buf = vec![0; reader.output_buffer_size()];
    let frame = reader.next_frame(&mut buf).map_err(unreadable)?;
    buf.truncate(frame.buffer_size());

    let channels = match frame.color_type {
        ColorType::Grayscale => 1,
        ColorType::GrayscaleAlpha => 2,
        ColorType::Rgb => 3,
        ColorType::Rgba => 4,
        ColorType::Indexed => {
            return Err(LoadError::Unreadable(
                "png: palette was not expanded".to_string(),
            ))
        }
    };

    let rgba = expand_to_rgba(&buf, channels)
        .ok_or_else(|| LoadError::Unreadable(format!("png: {channels} channels")))?;

    DecodedImage::from_rgba(rgba, frame.width, frame.height, ImageFormat::Png)
}

fn unreadable(err: png::DecodingError) -> LoadError {
    LoadError::Unreadable(format!("png: {err}"))
}
