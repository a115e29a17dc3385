//! Undercut library crate (used by the pipeline binary and integration tests).
//!
//! # Public API Surface
//!
//! The exports are organized by module:
//!
//! ## Catalog & Injection
//! - [`CatalogRecord`], [`ReferenceRecord`], [`RecordSource`] - Data model
//! - [`Injector`], [`IdentityKeyer`], [`NormalizedKeyer`] - Reference fusion
//! - [`PurityFilter`], [`InjectionReport`] - Catalog screening and reporting
//!
//! ## Embedding & Vector Store
//! - [`SentenceEncoder`], [`EncoderConfig`] - Embedding generation
//! - [`embed_catalog`], [`EmbeddingReport`] - Catalog embedding pass
//! - [`VectorStore`], [`VectorStoreBuilder`] - Flat-file vector persistence
//!
//! ## Scoring
//! - [`DisruptionScorer`], [`ScorerConfig`], [`ScoreWeights`] - Ranked search
//! - [`DisruptionResult`], [`AnchorReport`] - Per-anchor output
//! - [`cosine_similarity`], [`trust_modifier`] - Score terms
//!
//! ## Pipeline
//! - [`Config`], [`ConfigError`] - Environment-backed configuration
//! - `pipeline::run_injection` / `run_embedding` / `run_scoring` / `run_all`
//!
//! ## Constants
//! Dimension and format constants are exported for consistency across
//! modules; see [`constants`].

pub mod catalog;
pub mod config;
pub mod constants;
pub mod embedding;
pub mod hashing;
pub mod inject;
pub mod pipeline;
pub mod scoring;
pub mod store;

pub use catalog::{CatalogError, CatalogRecord, RecordSource, ReferenceRecord};
pub use config::{Config, ConfigError};
pub use embedding::{
    EmbeddingError, EmbeddingReport, EncoderConfig, SentenceEncoder, embed_catalog, is_embeddable,
    text_blob,
};
pub use hashing::{hash_text_blob, hash_to_u64};
pub use inject::{
    IdentityKeyer, InjectionReport, Injector, NormalizedKeyer, PurityFilter, RejectReason,
    RejectedReference,
};
pub use pipeline::{PipelineError, PipelineSummary, ScoringSummary};
pub use scoring::{
    AnchorReport, AnchorSkip, DisruptionResult, DisruptionScorer, ScoreWeights, ScorerConfig,
    ScoringError, SkipTally, cosine_similarity, disruption_score, trust_modifier,
};
pub use store::{
    MANIFEST_FILE, RowEntry, StoreError, StoreManifest, VECTORS_FILE, VectorStore,
    VectorStoreBuilder,
};
