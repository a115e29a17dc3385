use serde::{Deserialize, Serialize};

use super::error::ScoringError;

/// Default hard similarity floor.
pub const DEFAULT_SIMILARITY_FLOOR: f32 = 0.60;

/// Default minimum fractional discount a disruptor must offer.
pub const DEFAULT_MIN_SAVINGS: f64 = 0.15;

/// Default review count at which rating confidence reaches one half.
pub const DEFAULT_RATING_SATURATION: f64 = 50.0;

/// Default trust assigned when rating data is absent.
pub const DEFAULT_MIN_TRUST: f64 = 0.10;

/// Tolerance for the weight-sum check.
pub const WEIGHT_SUM_TOLERANCE: f64 = 1e-6;

/// Relative importance of the three score terms. Must sum to 1.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreWeights {
    pub similarity: f64,
    pub price: f64,
    pub trust: f64,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            similarity: 0.5,
            price: 0.3,
            trust: 0.2,
        }
    }
}

impl ScoreWeights {
    pub fn sum(&self) -> f64 {
        self.similarity + self.price + self.trust
    }
}

/// Disruption scorer configuration.
///
/// Every knob is explicit; [`validate`](ScorerConfig::validate) must pass
/// before any scoring runs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScorerConfig {
    /// Candidates below this cosine similarity are categorically rejected.
    pub similarity_floor: f32,
    /// A disruptor must undercut the anchor price by at least this fraction.
    pub min_savings: f64,
    pub weights: ScoreWeights,
    /// Review count at which the confidence term reaches one half.
    pub rating_saturation: f64,
    /// Trust assigned to candidates with absent rating data, and the lower
    /// clamp for computed trust.
    pub min_trust: f64,
    /// Disruptors kept per anchor; `None` returns every eligible candidate.
    pub top_k: Option<usize>,
    /// Whether designated anchors may appear as candidates for other anchors.
    pub score_anchor_candidates: bool,
}

impl Default for ScorerConfig {
    fn default() -> Self {
        Self {
            similarity_floor: DEFAULT_SIMILARITY_FLOOR,
            min_savings: DEFAULT_MIN_SAVINGS,
            weights: ScoreWeights::default(),
            rating_saturation: DEFAULT_RATING_SATURATION,
            min_trust: DEFAULT_MIN_TRUST,
            top_k: None,
            score_anchor_candidates: false,
        }
    }
}

impl ScorerConfig {
    /// Rejects configurations that would produce meaningless scores.
    pub fn validate(&self) -> Result<(), ScoringError> {
        for (name, value) in [
            ("similarity", self.weights.similarity),
            ("price", self.weights.price),
            ("trust", self.weights.trust),
        ] {
            if value < 0.0 {
                return Err(ScoringError::NegativeWeight { name, value });
            }
        }

        let sum = self.weights.sum();
        if (sum - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
            return Err(ScoringError::WeightsNotNormalized { sum });
        }

        if !(0.0..=1.0).contains(&self.similarity_floor) {
            return Err(ScoringError::FloorOutOfRange {
                value: self.similarity_floor,
            });
        }
        if !(0.0..1.0).contains(&self.min_savings) {
            return Err(ScoringError::SavingsOutOfRange {
                value: self.min_savings,
            });
        }
        if self.rating_saturation <= 0.0 {
            return Err(ScoringError::SaturationNotPositive {
                value: self.rating_saturation,
            });
        }
        if !(0.0..=1.0).contains(&self.min_trust) {
            return Err(ScoringError::MinTrustOutOfRange {
                value: self.min_trust,
            });
        }

        Ok(())
    }
}
