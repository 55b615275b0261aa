//! Content digesting for change comparison.

use sha2::{Digest, Sha256};

/// Hex SHA-256 digest of the canonical text.
///
/// Used as an equality proxy for "content unchanged", not as a security
/// primitive; no keying or salting is applied. Byte-identical canonical text
/// always produces an identical digest.
pub fn fingerprint(canonical_text: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(canonical_text.as_bytes());
    hex::encode(hasher.finalize())
}
