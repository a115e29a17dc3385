use std::path::PathBuf;
use thiserror::Error;

use crate::scoring::ScoringError;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {value:?}")]
    InvalidValue { var: &'static str, value: String },

    #[error("configured path does not exist: {path}")]
    PathNotFound { path: PathBuf },

    #[error("configured path is not a directory: {path}")]
    NotADirectory { path: PathBuf },

    #[error(transparent)]
    Scoring(#[from] ScoringError),
}
