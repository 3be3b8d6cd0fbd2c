//! Format Detection
//!
//! Identifies raster formats from magic bytes, with the file name suffix as a
//! last resort for formats that carry no signature.

use std::fmt;
use std::path::Path;

use serde::Serialize;

// == Image Format ==
/// Source formats the decoder knows how to dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageFormat {
    Png,
    Jpeg,
    Gif,
    Bmp,
    Tga,
    WebP,
    Unknown,
}

const PNG_SIGNATURE: [u8; 8] = [0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];

impl ImageFormat {
    // == Magic Bytes ==
    /// Detects the format from the leading bytes of `data`.
    ///
    /// TGA has no signature and is never reported here.
    pub fn from_bytes(data: &[u8]) -> Self {
        if data.starts_with(&PNG_SIGNATURE) {
            return Self::Png;
        }

        if data.starts_with(&[0xFF, 0xD8, 0xFF]) {
            return Self::Jpeg;
        }

        if data.starts_with(b"GIF87a") || data.starts_with(b"GIF89a") {
            return Self::Gif;
        }

        if data.len() >= 12 && data.starts_with(b"RIFF") && &data[8..12] == b"WEBP" {
            return Self::WebP;
        }

        // "BM" followed by the 4 byte file size and 4 reserved bytes
        if data.len() >= 14 && data.starts_with(b"BM") {
            return Self::Bmp;
        }

        Self::Unknown
    }

    // == Name Suffix ==
    /// Guesses the format from the extension of a path or id, ignoring case.
    pub fn from_name(name: &str) -> Self {
        let ext = match Path::new(name).extension().and_then(|e| e.to_str()) {
            Some(ext) => ext.to_ascii_lowercase(),
            None => return Self::Unknown,
        };

        match ext.as_str() {
            "png" => Self::Png,
            "jpg" | "jpeg" => Self::Jpeg,
            "gif" => Self::Gif,
            "bmp" => Self::Bmp,
            "tga" => Self::Tga,
            "webp" => Self::WebP,
            _ => Self::Unknown,
        }
    }

    // == Detect ==
    /// Signature first, name suffix only when the bytes are not recognised.
    pub fn detect(data: &[u8], name_hint: Option<&str>) -> Self {
        match Self::from_bytes(data) {
            Self::Unknown => name_hint.map(Self::from_name).unwrap_or(Self::Unknown),
            known => known,
        }
    }

    /// Maps to the `image` crate's format enum.
    pub(crate) fn to_image_format(self) -> Option<image::ImageFormat> {
        match self {
            Self::Png => Some(image::ImageFormat::Png),
            Self::Jpeg => Some(image::ImageFormat::Jpeg),
            Self::Gif => Some(image::ImageFormat::Gif),
            Self::Bmp => Some(image::ImageFormat::Bmp),
            Self::Tga => Some(image::ImageFormat::Tga),
            Self::WebP => Some(image::ImageFormat::WebP),
            Self::Unknown => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Jpeg => "jpeg",
            Self::Gif => "gif",
            Self::Bmp => "bmp",
            Self::Tga => "tga",
            Self::WebP => "webp",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for ImageFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
