//! Content Addressing
//!
//! Derives cache keys for anonymous buffers from their contents.

use sha2::{Digest, Sha256};

/// Length in characters of every id returned by [`content_id`].
pub const CONTENT_ID_LEN: usize = 64;

// == Content Id ==
/// Returns the lowercase hex SHA-256 digest of `bytes`.
///
/// Identical buffers always map to the same id, so repeated anonymous loads of
/// the same content share one cache entry without any caller bookkeeping.
pub fn content_id(bytes: &[u8]) -> String {
    let hash = Sha256::digest(bytes);
    hash.iter().map(|b| format!("{b:02x}")).collect()
}
