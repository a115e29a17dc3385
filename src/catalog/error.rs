use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("catalog snapshot not found: {path}")]
    NotFound { path: PathBuf },

    #[error("failed to read catalog snapshot {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write catalog snapshot {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to serialize record {product_id}: {reason}")]
    Serialize { product_id: String, reason: String },

    #[error("failed to serialize report: {reason}")]
    SerializeReport { reason: String },
}
