use std::cmp::Ordering;
use std::collections::HashSet;

use tracing::{debug, info, warn};

use crate::catalog::CatalogRecord;
use crate::store::VectorStore;

use super::config::{ScoreWeights, ScorerConfig};
use super::error::ScoringError;
use super::similarity::cosine_similarity;
use super::trust::trust_modifier;
use super::types::{AnchorReport, AnchorSkip, DisruptionResult, SkipTally};

/// Searches the embedded catalog for cheaper equivalents of anchor products.
///
/// A pure function of (anchor set, catalog, vector store, configuration):
/// it never mutates catalog or vector data and repeated runs over unchanged
/// inputs produce identical output.
#[derive(Debug, Clone)]
pub struct DisruptionScorer {
    config: ScorerConfig,
}

impl DisruptionScorer {
    /// Builds a scorer, rejecting misconfigured gates and weights up front.
    pub fn new(config: ScorerConfig) -> Result<Self, ScoringError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &ScorerConfig {
        &self.config
    }

    /// Scores every anchor id against the catalog.
    ///
    /// Reports come back in anchor-id input order.
    pub fn score_all(
        &self,
        anchor_ids: &[String],
        catalog: &[CatalogRecord],
        store: &VectorStore,
    ) -> Vec<AnchorReport> {
        let anchor_set: HashSet<&str> = anchor_ids.iter().map(String::as_str).collect();

        let reports: Vec<AnchorReport> = anchor_ids
            .iter()
            .map(|anchor_id| match catalog.iter().find(|r| r.product_id == *anchor_id) {
                Some(anchor) => self.score_anchor(anchor, catalog, store, &anchor_set),
                None => {
                    warn!(anchor_id = %anchor_id, "Anchor id not present in catalog");
                    AnchorReport {
                        anchor_id: anchor_id.clone(),
                        anchor_skip: Some(AnchorSkip::NotInCatalog),
                        disruptors: Vec::new(),
                        skipped: SkipTally::default(),
                    }
                }
            })
            .collect();

        info!(
            anchors = reports.len(),
            with_disruptors = reports.iter().filter(|r| r.found_disruptors()).count(),
            "Disruption scoring complete"
        );

        reports
    }

    /// Scores one anchor against every other catalog record.
    pub fn score_anchor(
        &self,
        anchor: &CatalogRecord,
        catalog: &[CatalogRecord],
        store: &VectorStore,
        anchor_set: &HashSet<&str>,
    ) -> AnchorReport {
        let mut report = AnchorReport {
            anchor_id: anchor.product_id.clone(),
            anchor_skip: None,
            disruptors: Vec::new(),
            skipped: SkipTally::default(),
        };

        let Some(anchor_price) = anchor.price.filter(|p| *p > 0.0) else {
            warn!(anchor_id = %anchor.product_id, "Anchor has no usable price");
            report.anchor_skip = Some(AnchorSkip::MissingPrice);
            return report;
        };
        let Some(anchor_vector) = store.vector(&anchor.product_id) else {
            warn!(anchor_id = %anchor.product_id, "Anchor has no embedding");
            report.anchor_skip = Some(AnchorSkip::MissingVector);
            return report;
        };

        let price_ceiling = anchor_price * (1.0 - self.config.min_savings);

        for candidate in catalog {
            if candidate.product_id == anchor.product_id {
                continue;
            }
            if !self.config.score_anchor_candidates
                && anchor_set.contains(candidate.product_id.as_str())
            {
                report.skipped.anchor_excluded += 1;
                continue;
            }

            let Some(candidate_vector) = store.vector(&candidate.product_id) else {
                report.skipped.missing_vector += 1;
                continue;
            };

            let similarity = cosine_similarity(anchor_vector, candidate_vector);
            if similarity < self.config.similarity_floor {
                report.skipped.below_floor += 1;
                continue;
            }

            let Some(candidate_price) = candidate.price.filter(|p| *p > 0.0) else {
                report.skipped.missing_price += 1;
                continue;
            };
            if candidate_price >= price_ceiling {
                report.skipped.insufficient_savings += 1;
                continue;
            }

            let price_ratio = candidate_price / anchor_price;
            let trust = trust_modifier(
                candidate.average_rating,
                candidate.rating_number,
                self.config.rating_saturation,
                self.config.min_trust,
            );

            report.disruptors.push(DisruptionResult {
                anchor_id: anchor.product_id.clone(),
                candidate_id: candidate.product_id.clone(),
                similarity,
                price_ratio,
                trust_modifier: trust,
                disruption_score: disruption_score(
                    similarity,
                    price_ratio,
                    trust,
                    &self.config.weights,
                ),
                savings_pct: (1.0 - price_ratio) * 100.0,
            });
        }

        rank_disruptors(&mut report.disruptors);
        if let Some(k) = self.config.top_k {
            report.disruptors.truncate(k);
        }

        debug!(
            anchor_id = %anchor.product_id,
            eligible = report.disruptors.len(),
            skipped = report.skipped.total(),
            "Anchor scored"
        );

        report
    }
}

/// Weighted combination of the three pre-normalized terms.
///
/// Similarity is clamped into [0, 1] before weighting; the price and trust
/// terms already live there once the gates have passed.
pub fn disruption_score(
    similarity: f32,
    price_ratio: f64,
    trust: f64,
    weights: &ScoreWeights,
) -> f64 {
    let sim_term = f64::from(similarity).clamp(0.0, 1.0);
    let price_term = (1.0 - price_ratio).clamp(0.0, 1.0);

    weights.similarity * sim_term + weights.price * price_term + weights.trust * trust
}

/// Best score first; ties broken by higher similarity, then lower price ratio.
fn rank_disruptors(disruptors: &mut [DisruptionResult]) {
    disruptors.sort_by(|a, b| {
        b.disruption_score
            .partial_cmp(&a.disruption_score)
            .unwrap_or(Ordering::Equal)
            .then_with(|| {
                b.similarity
                    .partial_cmp(&a.similarity)
                    .unwrap_or(Ordering::Equal)
            })
            .then_with(|| {
                a.price_ratio
                    .partial_cmp(&b.price_ratio)
                    .unwrap_or(Ordering::Equal)
            })
    });
}
