use thiserror::Error;

/// Configuration faults that would make scores silently meaningless.
///
/// All variants are fatal before any scoring runs.
#[derive(Debug, Error)]
pub enum ScoringError {
    #[error("score weights must sum to 1 (got {sum})")]
    WeightsNotNormalized { sum: f64 },

    #[error("score weight {name} must be non-negative (got {value})")]
    NegativeWeight { name: &'static str, value: f64 },

    #[error("similarity floor must lie in [0, 1] (got {value})")]
    FloorOutOfRange { value: f32 },

    #[error("minimum savings fraction must lie in [0, 1) (got {value})")]
    SavingsOutOfRange { value: f64 },

    #[error("rating saturation constant must be positive (got {value})")]
    SaturationNotPositive { value: f64 },

    #[error("minimum trust must lie in [0, 1] (got {value})")]
    MinTrustOutOfRange { value: f64 },
}
