//! Decoded Image
//!
//! The immutable, renderer-ready bitmap stored in every cache entry.

use crate::decode::format::ImageFormat;
use crate::decode::pixel::{rgba_to_bgra_in_place, PixelLayout, BYTES_PER_PIXEL};
use crate::error::LoadError;

// == Decoded Image ==
/// A 4-channel, 8-bit pixel buffer in [`PixelLayout::Bgra8`] order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedImage {
    pixels: Vec<u8>,
    width: u32,
    height: u32,
    format: ImageFormat,
}

impl DecodedImage {
    // == Constructors ==
    /// Takes RGBA samples straight from a codec and reorders them to BGRA.
    pub fn from_rgba(
        mut pixels: Vec<u8>,
        width: u32,
        height: u32,
        format: ImageFormat,
    ) -> Result<Self, LoadError> {
        check_len(&pixels, width, height)?;
        rgba_to_bgra_in_place(&mut pixels);
        Ok(Self {
            pixels,
            width,
            height,
            format,
        })
    }

    /// Wraps a buffer that is already in BGRA order.
    pub fn from_bgra(
        pixels: Vec<u8>,
        width: u32,
        height: u32,
        format: ImageFormat,
    ) -> Result<Self, LoadError> {
        check_len(&pixels, width, height)?;
        Ok(Self {
            pixels,
            width,
            height,
            format,
        })
    }

    // == Accessors ==
    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Format the bytes were decoded from.
    pub fn format(&self) -> ImageFormat {
        self.format
    }

    pub fn layout(&self) -> PixelLayout {
        PixelLayout::Bgra8
    }

    /// Raw pixel rows, top to bottom, with no padding between rows.
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// Bytes per row.
    pub fn stride(&self) -> usize {
        self.width as usize * BYTES_PER_PIXEL
    }

    /// Returns the BGRA bytes of the pixel at (x, y).
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = y as usize * self.stride() + x as usize * BYTES_PER_PIXEL;
        let px = self.pixels.get(idx..idx + BYTES_PER_PIXEL)?;
        Some([px[0], px[1], px[2], px[3]])
    }
}

fn check_len(pixels: &[u8], width: u32, height: u32) -> Result<(), LoadError> {
    let expected = (width as usize)
        .checked_mul(height as usize)
        .and_then(|n| n.checked_mul(BYTES_PER_PIXEL))
        .ok_or_else(|| LoadError::Unreadable(format!("{width}x{height} overflows")))?;

    if pixels.len() != expected {
        return Err(LoadError::Unreadable(format!(
            "{width}x{height} image needs {expected} bytes, decoder produced {}",
            pixels.len()
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_rgba_reorders_channels() {
        // 2x1: opaque red, half transparent blue
        let rgba = vec![255, 0, 0, 255, 0, 0, 255, 128];
        let img = DecodedImage::from_rgba(rgba, 2, 1, ImageFormat::Png).unwrap();

        assert_eq!(img.pixel(0, 0), Some([0, 0, 255, 255]));
        assert_eq!(img.pixel(1, 0), Some([255, 0, 0, 128]));
        assert_eq!(img.layout(), PixelLayout::Bgra8);
    }

    #[test]
    fn test_from_bgra_keeps_bytes() {
        let bgra = vec![1, 2, 3, 4];
        let img = DecodedImage::from_bgra(bgra.clone(), 1, 1, ImageFormat::Unknown).unwrap();
        assert_eq!(img.pixels(), &bgra[..]);
    }

    #[test]
    fn test_rejects_wrong_length() {
        let result = DecodedImage::from_rgba(vec![0; 15], 2, 2, ImageFormat::Png);
        assert!(matches!(result, Err(LoadError::Unreadable(_))));
    }

    #[test]
    fn test_stride_and_bounds() {
        let img = DecodedImage::from_bgra(vec![0; 3 * 2 * 4], 3, 2, ImageFormat::Bmp).unwrap();
        assert_eq!(img.stride(), 12);
        assert!(img.pixel(2, 1).is_some());
        assert!(img.pixel(3, 0).is_none());
        assert!(img.pixel(0, 2).is_none());
    }

    #[test]
    fn test_pixel_addresses_rows() {
        let mut bgra = vec![0u8; 2 * 2 * 4];
        bgra[12..16].copy_from_slice(&[9, 8, 7, 6]); // (1, 1)
        let img = DecodedImage::from_bgra(bgra, 2, 2, ImageFormat::Unknown).unwrap();
        assert_eq!(img.pixel(1, 1), Some([9, 8, 7, 6]));
        assert_eq!(img.pixel(0, 1), Some([0, 0, 0, 0]));
    }
}
