//! Pixel Normalization
//!
//! Converts decoder output into the renderer's native surface layout.

use serde::Serialize;

/// Bytes per pixel in every decoded buffer.
pub const BYTES_PER_PIXEL: usize = 4;

// == Pixel Layout ==
/// Byte order of a decoded pixel buffer.
///
/// `Bgra8` is the in-memory order of a 32-bit ARGB word on a little-endian
/// host, which is what raster surfaces such as cairo's ARGB32 expect. The
/// order is defined per byte, so it does not change with host endianness.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PixelLayout {
    Bgra8,
}

impl PixelLayout {
    /// Index of red, green, blue and alpha within one pixel.
    pub const fn channel_offsets(self) -> [usize; 4] {
        match self {
            Self::Bgra8 => [2, 1, 0, 3],
        }
    }
}

// == RGBA -> BGRA ==
/// Swaps channels 0 and 2 of every pixel; channel 1 and 3 stay put.
///
/// A trailing partial pixel is left untouched.
pub fn rgba_to_bgra_in_place(buf: &mut [u8]) {
    for px in buf.chunks_exact_mut(BYTES_PER_PIXEL) {
        px.swap(0, 2);
    }
}

// == Expand To RGBA ==
/// Widens 8-bit gray, gray+alpha and RGB samples to RGBA.
///
/// Returns `None` for a channel count outside 1..=4.
pub fn expand_to_rgba(samples: &[u8], channels: usize) -> Option<Vec<u8>> {
    let pixel_count = match channels {
        1..=4 => samples.len() / channels,
        _ => return None,
    };
    let mut out = Vec::with_capacity(pixel_count * BYTES_PER_PIXEL);

    for px in samples.chunks_exact(channels) {
        match *px {
            [g] => out.extend_from_slice(&[g, g, g, 0xFF]),
            [g, a] => out.extend_from_slice(&[g, g, g, a]),
            [r, g, b] => out.extend_from_slice(&[r, g, b, 0xFF]),
            [r, g, b, a] => out.extend_from_slice(&[r, g, b, a]),
            _ => unreachable!("chunks_exact yields slices of length channels"),
        }
    }

    Some(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_swap_is_fixed_permutation() {
        let mut buf = vec![1, 2, 3, 4, 10, 20, 30, 40];
        rgba_to_bgra_in_place(&mut buf);
        assert_eq!(buf, vec![3, 2, 1, 4, 30, 20, 10, 40]);
    }

    #[test]
    fn test_swap_twice_is_identity() {
        let original: Vec<u8> = (0..=255).collect();
        let mut buf = original.clone();
        rgba_to_bgra_in_place(&mut buf);
        rgba_to_bgra_in_place(&mut buf);
        assert_eq!(buf, original);
    }

    #[test]
    fn test_swap_ignores_trailing_bytes() {
        let mut buf = vec![1, 2, 3, 4, 5, 6];
        rgba_to_bgra_in_place(&mut buf);
        assert_eq!(buf, vec![3, 2, 1, 4, 5, 6]);
    }

    #[test]
    fn test_bgra_offsets_match_swap() {
        let [r, g, b, a] = PixelLayout::Bgra8.channel_offsets();
        let mut px = [0xAA, 0xBB, 0xCC, 0xDD]; // r, g, b, a
        rgba_to_bgra_in_place(&mut px);
        assert_eq!(px[r], 0xAA);
        assert_eq!(px[g], 0xBB);
        assert_eq!(px[b], 0xCC);
        assert_eq!(px[a], 0xDD);
    }

    #[test]
    fn test_expand_gray_and_rgb() {
        assert_eq!(expand_to_rgba(&[7], 1).unwrap(), vec![7, 7, 7, 255]);
        assert_eq!(expand_to_rgba(&[7, 9], 2).unwrap(), vec![7, 7, 7, 9]);
        assert_eq!(expand_to_rgba(&[1, 2, 3], 3).unwrap(), vec![1, 2, 3, 255]);
        assert_eq!(expand_to_rgba(&[1, 2, 3, 4], 4).unwrap(), vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_expand_rejects_bad_channel_count() {
        assert!(expand_to_rgba(&[1, 2, 3, 4, 5], 5).is_none());
        assert!(expand_to_rgba(&[], 0).is_none());
    }
}
