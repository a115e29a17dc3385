//! BLAKE3 fingerprints for text blobs and identity material.
//!
//! The vector store's reuse contract compares blob fingerprints across runs,
//! so the hex encoding here is part of the manifest format.

/// Hex-encoded BLAKE3 digest of a record's text blob.
#[inline]
pub fn hash_text_blob(blob: &str) -> String {
    blake3::hash(blob.as_bytes()).to_hex().to_string()
}

/// 64-bit truncation of a BLAKE3 digest.
///
/// Used for fast in-memory keys where a rare collision only costs a
/// redundant recomputation, never corrupt output.
#[inline]
pub fn hash_to_u64(data: &[u8]) -> u64 {
    let hash = blake3::hash(data);
    let bytes: [u8; 8] = hash.as_bytes()[0..8]
        .try_into()
        .expect("BLAKE3 always produces at least 8 bytes");
    u64::from_le_bytes(bytes)
}
