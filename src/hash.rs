//! BLAKE3 hashing for downloaded artifacts

use blake3::Hasher;

/// Hash prefix for BLAKE3 digests
pub const HASH_PREFIX: &str = "blake3:";

/// Hash an in-memory buffer, returning `blake3:<hex>`
pub fn hash_bytes(data: &[u8]) -> String {
    let mut hasher = Hasher::new();
    hasher.update(data);
    format!("{}{}", HASH_PREFIX, hasher.finalize().to_hex())
}

/// Check that `digest` looks like `blake3:` followed by 64 hex digits
pub fn is_valid_digest(digest: &str) -> bool {
    digest
        .strip_prefix(HASH_PREFIX)
        .is_some_and(|hex| hex.len() == 64 && hex.chars().all(|c| c.is_ascii_hexdigit()))
}

/// Compare a buffer against an expected digest (hex case-insensitive)
pub fn verify(data: &[u8], expected: &str) -> std::result::Result<(), String> {
    let actual = hash_bytes(data);
    if actual.eq_ignore_ascii_case(expected) {
        Ok(())
    } else {
        Err(actual)
    }
}
