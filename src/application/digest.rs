//! Content digests for rebuild identity
//!
//! A step sequence is identified by a short digest of its raw text, so an
//! unchanged input can be recognized without comparing whole sequences.

use sha2::{Digest, Sha256};

/// Compute 8-character hex digest of content (first 32 bits of SHA-256).
///
/// # Arguments
/// * `content` - Byte slice to digest
///
/// # Returns
/// 8-character lowercase hex string (e.g., "a1b2c3d4")
pub fn content_digest(content: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(content);
    let result = hasher.finalize();
    // First 4 bytes = 8 hex characters
    hex::encode(&result[..4])
}

/// Digest an ordered sequence of step lines.
///
/// Each line is fed with a trailing newline so that moving characters across
/// line boundaries changes the digest. Order matters: the same lines in a
/// different order identify a different input.
pub fn sequence_digest<'a, I>(lines: I) -> String
where
    I: IntoIterator<Item = &'a str>,
{
    let mut hasher = Sha256::new();
    for line in lines {
        hasher.update(line.as_bytes());
        hasher.update(b"\n");
    }
    hex::encode(&hasher.finalize()[..4])
}
