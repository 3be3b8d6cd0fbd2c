//! Error types for the image cache
//!
//! Provides unified error handling using thiserror.

use std::io;

use thiserror::Error;

// == Load Error Enum ==
/// Why an image could not be produced for a path or buffer.
///
/// None of these are fatal: the facade turns them into an absent result and
/// the caller simply skips drawing the image.
#[derive(Error, Debug)]
pub enum LoadError {
    /// The bytes behind a path could not be fetched
    #[error("Image not found: {path}")]
    NotFound {
        path: String,
        #[source]
        source: io::Error,
    },

    /// No decoder recognised the data
    #[error("Unsupported image format: {0}")]
    UnsupportedFormat(String),

    /// The format was recognised but the data is corrupt or truncated
    #[error("Unreadable image data: {0}")]
    Unreadable(String),
}

// == Cache Error Enum ==
/// Violations of the cache store contract.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CacheError {
    /// Insert of a key that is already present; callers must lookup first
    #[error("Duplicate cache key: {0}")]
    DuplicateKey(String),
}

// == Config Error Enum ==
/// Errors raised while reading configuration.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// An environment variable held a value that could not be parsed
    #[error("Invalid value for {key}: {value:?}")]
    InvalidValue { key: String, value: String },
}

// == Result Type Alias ==
/// Convenience Result type for image loads.
pub type Result<T> = std::result::Result<T, LoadError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_keeps_io_source() {
        let err = LoadError::NotFound {
            path: "missing.png".to_string(),
            source: io::Error::new(io::ErrorKind::NotFound, "no such file"),
        };

        assert_eq!(err.to_string(), "Image not found: missing.png");
        let source = std::error::Error::source(&err).unwrap();
        assert_eq!(source.to_string(), "no such file");
    }

    #[test]
    fn test_config_error_display() {
        let err = ConfigError::InvalidValue {
            key: "PIXEL_CACHE_BUDGET_MB".to_string(),
            value: "lots".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Invalid value for PIXEL_CACHE_BUDGET_MB: \"lots\""
        );
    }
}
