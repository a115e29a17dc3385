//! Stage orchestration: inject → embed → score.
//!
//! Each stage reads an immutable snapshot of its inputs and commits its
//! output as a complete atomic replacement, so aborting between stages
//! never corrupts already-written artifacts and concurrent runs against
//! distinct data directories never interfere.

pub mod error;

pub use error::PipelineError;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::catalog;
use crate::config::Config;
use crate::embedding::{EmbeddingReport, SentenceEncoder, embed_catalog};
use crate::inject::{InjectionReport, Injector};
use crate::scoring::{AnchorReport, DisruptionScorer};
use crate::store::VectorStore;

/// Summary of one scoring stage run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoringSummary {
    pub anchors: usize,
    pub anchors_with_disruptors: usize,
    pub result_rows: usize,
}

/// Summary of a full pipeline run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineSummary {
    pub injection: InjectionReport,
    pub embedding: EmbeddingReport,
    pub scoring: ScoringSummary,
}

/// Merges references into the scraped catalog and commits the merged
/// snapshot.
pub fn run_injection(config: &Config) -> Result<InjectionReport, PipelineError> {
    let (scraped, scraped_skipped) = catalog::read_catalog(&config.catalog_path)?;
    let (references, reference_skipped) = catalog::read_references(&config.reference_path)?;

    info!(
        scraped = scraped.len(),
        scraped_skipped,
        references = references.len(),
        reference_skipped,
        "Loaded injection inputs"
    );

    let injector = Injector::new().with_filter(config.purity_filter());
    let (merged, report) = injector.inject(&scraped, &references);

    std::fs::create_dir_all(&config.data_dir).map_err(|source| {
        catalog::CatalogError::Write {
            path: config.data_dir.clone(),
            source,
        }
    })?;
    catalog::write_catalog(&config.merged_catalog_path(), &merged)?;

    Ok(report)
}

/// Embeds the merged catalog and commits a new vector-store generation,
/// reusing unchanged vectors from the previous generation.
pub fn run_embedding(config: &Config) -> Result<EmbeddingReport, PipelineError> {
    let (merged, _) = catalog::read_catalog(&config.merged_catalog_path())?;
    let encoder = SentenceEncoder::load(config.encoder_config())?;
    let previous = VectorStore::open_if_exists(config.store_dir())?;

    let (builder, report) = embed_catalog(&merged, &encoder, previous.as_ref())?;
    builder.commit(config.store_dir())?;

    Ok(report)
}

/// Scores every designated anchor and commits the ranked results.
pub fn run_scoring(config: &Config) -> Result<ScoringSummary, PipelineError> {
    // Fail on a misconfigured scorer before touching any input.
    let scorer = DisruptionScorer::new(config.scorer.clone())?;

    let (merged, _) = catalog::read_catalog(&config.merged_catalog_path())?;
    let store = VectorStore::open(config.store_dir())?;
    let (references, _) = catalog::read_references(&config.reference_path)?;

    let anchor_ids: Vec<String> = references
        .iter()
        .filter(|r| r.is_anchor)
        .map(|r| r.product_id.clone())
        .collect();

    info!(
        anchors = anchor_ids.len(),
        catalog = merged.len(),
        vectors = store.len(),
        "Loaded scoring inputs"
    );

    let reports = scorer.score_all(&anchor_ids, &merged, &store);
    let summary = write_results(config, &reports)?;

    Ok(summary)
}

/// Runs all three stages in order.
pub fn run_all(config: &Config) -> Result<PipelineSummary, PipelineError> {
    let injection = run_injection(config)?;
    let embedding = run_embedding(config)?;
    let scoring = run_scoring(config)?;

    Ok(PipelineSummary {
        injection,
        embedding,
        scoring,
    })
}

fn write_results(
    config: &Config,
    reports: &[AnchorReport],
) -> Result<ScoringSummary, PipelineError> {
    let rows: Vec<_> = reports.iter().flat_map(|r| r.disruptors.iter()).collect();

    // Flat rows, grouped by anchor in report order.
    let mut lines = String::new();
    for row in &rows {
        let line = serde_json::to_string(row).map_err(|e| catalog::CatalogError::SerializeReport {
            reason: e.to_string(),
        })?;
        lines.push_str(&line);
        lines.push('\n');
    }

    let results_path = config.results_path();
    let temp_path = results_path.with_extension("jsonl.tmp");
    std::fs::write(&temp_path, lines).map_err(|source| catalog::CatalogError::Write {
        path: temp_path.clone(),
        source,
    })?;
    std::fs::rename(&temp_path, &results_path).map_err(|source| catalog::CatalogError::Write {
        path: results_path,
        source,
    })?;

    catalog::write_report(&config.scoring_report_path(), &reports)?;

    Ok(ScoringSummary {
        anchors: reports.len(),
        anchors_with_disruptors: reports.iter().filter(|r| r.found_disruptors()).count(),
        result_rows: rows.len(),
    })
}
