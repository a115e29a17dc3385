//! Cross-cutting, shared constants.
//!
//! Prefer deriving secondary constants (e.g. byte sizes) from primary ones to avoid drift.

/// Default sentence-embedding dimension (MiniLM-class encoders).
pub const DEFAULT_EMBEDDING_DIM: usize = 384;

/// On-disk bytes per vector at the default dimension (little-endian f16).
pub const EMBEDDING_F16_BYTES: usize = DEFAULT_EMBEDDING_DIM * 2;

/// Default token limit per record text blob.
pub const DEFAULT_MAX_SEQ_LEN: usize = 256;

/// Field separator for record text blobs.
///
/// The blob is the only signal the encoder sees, so catalog-time and
/// query-time construction must join fields identically.
pub const TEXT_BLOB_DELIMITER: &str = "\n";

/// Model version recorded in the vector-store manifest when none is configured.
pub const DEFAULT_MODEL_VERSION: &str = "all-minilm-l6-v2";
