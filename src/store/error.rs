use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("vector store not found under {dir}")]
    NotFound { dir: PathBuf },

    #[error("vector store I/O failure at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("vector store manifest is corrupt: {reason}")]
    CorruptManifest { reason: String },

    #[error("vector file size mismatch: expected {expected} bytes for {rows} rows, got {actual}")]
    SizeMismatch {
        expected: usize,
        actual: usize,
        rows: usize,
    },

    #[error("vector dimension mismatch for {product_id}: expected {expected}, got {actual}")]
    DimensionMismatch {
        product_id: String,
        expected: usize,
        actual: usize,
    },

    #[error("duplicate product id in vector store: {product_id}")]
    DuplicateProduct { product_id: String },
}

pub type StoreResult<T> = Result<T, StoreError>;
