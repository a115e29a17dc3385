//! Semantic embedding of catalog records.
//!
//! - [`encoder`] wraps the pretrained sentence-embedding model.
//! - [`text`] owns text-blob construction (shared with query-time callers).
//! - [`embed_catalog`] runs the catalog pass with cross-run vector reuse.

/// Compute device selection (CPU / Metal / CUDA).
pub mod device;
/// Sentence encoder (model + stub backends).
pub mod encoder;
mod error;
/// Text-blob construction.
pub mod text;


pub use encoder::{
    ENCODER_BATCH_SIZE, ENCODER_EMBEDDING_DIM, ENCODER_MAX_SEQ_LEN, EncoderConfig, SentenceEncoder,
};
pub use error::EmbeddingError;
pub use text::{is_embeddable, text_blob};

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::catalog::CatalogRecord;
use crate::hashing::hash_text_blob;
use crate::store::{VectorStore, VectorStoreBuilder};

/// What happened during one catalog-embedding pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct EmbeddingReport {
    /// Records embedded by model inference this run.
    pub embedded: usize,
    /// Records whose vectors were carried over from the previous store.
    pub reused: usize,
    /// Records excluded for empty or whitespace-only text blobs.
    pub skipped_empty: Vec<String>,
}

impl EmbeddingReport {
    /// Rows present in the produced vector store.
    pub fn stored(&self) -> usize {
        self.embedded + self.reused
    }
}

enum RowPlan {
    Reuse,
    Encode,
}

/// Embeds every embeddable catalog record, reusing vectors from `previous`
/// when the model version and text-blob fingerprint both match.
///
/// Row order in the produced store follows catalog order, so unchanged
/// inputs always yield an identical store.
pub fn embed_catalog(
    catalog: &[CatalogRecord],
    encoder: &SentenceEncoder,
    previous: Option<&VectorStore>,
) -> Result<(VectorStoreBuilder, EmbeddingReport), EmbeddingError> {
    let mut report = EmbeddingReport::default();
    let mut builder =
        VectorStoreBuilder::new(encoder.model_version().to_string(), encoder.embedding_dim());

    let reusable = previous.filter(|store| {
        store.model_version() == encoder.model_version()
            && store.embedding_dim() == encoder.embedding_dim()
    });

    let mut plans: Vec<(String, String, RowPlan)> = Vec::with_capacity(catalog.len());
    let mut pending: Vec<String> = Vec::new();

    for record in catalog {
        let blob = text_blob(record);
        if !is_embeddable(&blob) {
            warn!(product_id = %record.product_id, "Excluding record with empty text blob");
            report.skipped_empty.push(record.product_id.clone());
            continue;
        }

        let text_hash = hash_text_blob(&blob);
        let plan = match reusable {
            Some(store) if store.fingerprint(&record.product_id) == Some(text_hash.as_str()) => {
                RowPlan::Reuse
            }
            _ => {
                pending.push(blob);
                RowPlan::Encode
            }
        };
        plans.push((record.product_id.clone(), text_hash, plan));
    }

    debug!(
        total = plans.len(),
        to_encode = pending.len(),
        "Planned catalog embedding pass"
    );

    let mut encoded = Vec::with_capacity(pending.len());
    for chunk in pending.chunks(encoder.batch_size().max(1)) {
        let texts: Vec<&str> = chunk.iter().map(String::as_str).collect();
        encoded.extend(encoder.embed_batch(&texts)?);
    }

    let mut next_encoded = encoded.into_iter();
    for (product_id, text_hash, plan) in plans {
        let vector = match plan {
            RowPlan::Reuse => {
                report.reused += 1;
                reusable
                    .and_then(|store| store.vector(&product_id))
                    .map(<[_]>::to_vec)
                    .ok_or_else(|| EmbeddingError::InferenceFailed {
                        reason: format!("vector for {product_id} vanished from previous store"),
                    })?
            }
            RowPlan::Encode => {
                report.embedded += 1;
                next_encoded.next().ok_or_else(|| {
                    EmbeddingError::InferenceFailed {
                        reason: "encoder returned fewer vectors than requested".to_string(),
                    }
                })?
            }
        };

        builder
            .push(product_id, text_hash, &vector)
            .map_err(|e| EmbeddingError::InvalidConfig {
                reason: format!("vector store rejected row: {e}"),
            })?;
    }

    info!(
        embedded = report.embedded,
        reused = report.reused,
        skipped_empty = report.skipped_empty.len(),
        "Catalog embedding pass complete"
    );

    Ok((builder, report))
}
