use sha2::{Digest, Sha256};

/// ## Summary
/// Generates a strong `ETag` from the canonical bytes of a resource and the
/// revision token of the write that stored them.
///
/// The result is the quoted lowercase hex SHA-256 digest. Storing identical
/// bytes under a new revision yields a new tag.
#[must_use]
pub fn generate_etag(canonical_bytes: &[u8], revision: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(canonical_bytes);
    hasher.update(b"\0");
    hasher.update(revision.as_bytes());
    let hash = hasher.finalize();
    format!("\"{}\"", hex::encode(hash))
}
