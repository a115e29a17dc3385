use serde::{Deserialize, Serialize};

/// One eligible `(anchor, candidate)` pair with its score breakdown.
///
/// Only candidates that passed every gate are represented; rejection is
/// binary per gate and rejected candidates get no partial scores.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisruptionResult {
    pub anchor_id: String,
    pub candidate_id: String,
    /// Cosine similarity in [floor, 1].
    pub similarity: f32,
    /// Candidate price over anchor price.
    pub price_ratio: f64,
    /// Confidence-weighted rating score.
    pub trust_modifier: f64,
    /// Weighted combination of the three terms.
    pub disruption_score: f64,
    /// Discount relative to the anchor, in percent.
    pub savings_pct: f64,
}

/// Why candidates were excluded while scoring one anchor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct SkipTally {
    /// No embedding in the vector store.
    pub missing_vector: usize,
    /// Below the hard similarity floor.
    pub below_floor: usize,
    /// Priced above the required discount.
    pub insufficient_savings: usize,
    /// No usable price on the candidate.
    pub missing_price: usize,
    /// Designated anchors excluded from the candidate pool.
    pub anchor_excluded: usize,
}

impl SkipTally {
    pub fn total(&self) -> usize {
        self.missing_vector
            + self.below_floor
            + self.insufficient_savings
            + self.missing_price
            + self.anchor_excluded
    }
}

/// Why an anchor could not be scored at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnchorSkip {
    /// The anchor has no embedding in the vector store.
    MissingVector,
    /// The anchor has no usable price.
    MissingPrice,
    /// The anchor id does not exist in the merged catalog.
    NotInCatalog,
}

/// Ranked disruptors for one anchor.
///
/// An empty `disruptors` list with `anchor_skip: None` is a valid business
/// finding (no disruptors exist), not a failure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnchorReport {
    pub anchor_id: String,
    /// Set when the anchor itself could not be scored.
    pub anchor_skip: Option<AnchorSkip>,
    /// Eligible candidates, best disruption score first.
    pub disruptors: Vec<DisruptionResult>,
    pub skipped: SkipTally,
}

impl AnchorReport {
    pub fn found_disruptors(&self) -> bool {
        !self.disruptors.is_empty()
    }
}
