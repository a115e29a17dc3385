//! Environment-backed configuration.
//!
//! Every knob has a default. Override with `UNDERCUT_*` environment
//! variables; malformed numeric values are loud errors rather than silent
//! fallbacks, because a mistyped weight would quietly distort every score.

pub mod error;


pub use error::ConfigError;

use std::env;
use std::path::{Path, PathBuf};

use crate::embedding::EncoderConfig;
use crate::inject::PurityFilter;
use crate::scoring::{ScoreWeights, ScorerConfig};

/// Pipeline configuration loaded from environment variables.
///
/// Use [`Config::from_env`] to read `UNDERCUT_*` overrides on top of
/// defaults, then [`Config::validate`] before running any stage.
#[derive(Debug, Clone)]
pub struct Config {
    /// Directory where pipeline artifacts are written. Default: `./data`.
    pub data_dir: PathBuf,

    /// Scraped catalog snapshot (JSONL). Default: `./data/catalog_raw.jsonl`.
    pub catalog_path: PathBuf,

    /// Reference snapshot (JSONL). Default: `./data/references.jsonl`.
    pub reference_path: PathBuf,

    /// Directory holding the sentence-encoder model files. When unset the
    /// encoder runs in deterministic stub mode.
    pub model_dir: Option<PathBuf>,

    /// Version tag for vector reuse across runs.
    pub model_version: String,

    /// Records per inference batch.
    pub batch_size: usize,

    /// Scorer gates and weights.
    pub scorer: ScorerConfig,

    /// Purity-screen blacklist terms (comma-separated in the environment).
    pub filter_blacklist: Vec<String>,

    /// Purity-screen required keywords (comma-separated in the environment).
    pub filter_keywords: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("./data"),
            catalog_path: PathBuf::from("./data/catalog_raw.jsonl"),
            reference_path: PathBuf::from("./data/references.jsonl"),
            model_dir: None,
            model_version: crate::constants::DEFAULT_MODEL_VERSION.to_string(),
            batch_size: crate::embedding::ENCODER_BATCH_SIZE,
            scorer: ScorerConfig::default(),
            filter_blacklist: Vec::new(),
            filter_keywords: Vec::new(),
        }
    }
}

impl Config {
    const ENV_DATA_DIR: &'static str = "UNDERCUT_DATA_DIR";
    const ENV_CATALOG: &'static str = "UNDERCUT_CATALOG";
    const ENV_REFERENCES: &'static str = "UNDERCUT_REFERENCES";
    const ENV_MODEL_DIR: &'static str = "UNDERCUT_MODEL_DIR";
    const ENV_MODEL_VERSION: &'static str = "UNDERCUT_MODEL_VERSION";
    const ENV_BATCH_SIZE: &'static str = "UNDERCUT_BATCH_SIZE";
    const ENV_SIMILARITY_FLOOR: &'static str = "UNDERCUT_SIMILARITY_FLOOR";
    const ENV_MIN_SAVINGS: &'static str = "UNDERCUT_MIN_SAVINGS";
    const ENV_W_SIM: &'static str = "UNDERCUT_W_SIM";
    const ENV_W_PRICE: &'static str = "UNDERCUT_W_PRICE";
    const ENV_W_TRUST: &'static str = "UNDERCUT_W_TRUST";
    const ENV_RATING_SATURATION: &'static str = "UNDERCUT_RATING_SATURATION";
    const ENV_MIN_TRUST: &'static str = "UNDERCUT_MIN_TRUST";
    const ENV_TOP_K: &'static str = "UNDERCUT_TOP_K";
    const ENV_SCORE_ANCHOR_CANDIDATES: &'static str = "UNDERCUT_SCORE_ANCHOR_CANDIDATES";
    const ENV_FILTER_BLACKLIST: &'static str = "UNDERCUT_FILTER_BLACKLIST";
    const ENV_FILTER_KEYWORDS: &'static str = "UNDERCUT_FILTER_KEYWORDS";

    /// Loads configuration from environment variables (falling back to defaults).
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let data_dir = path_from_env(Self::ENV_DATA_DIR).unwrap_or(defaults.data_dir);
        let catalog_path =
            path_from_env(Self::ENV_CATALOG).unwrap_or_else(|| data_dir.join("catalog_raw.jsonl"));
        let reference_path = path_from_env(Self::ENV_REFERENCES)
            .unwrap_or_else(|| data_dir.join("references.jsonl"));

        let weights = ScoreWeights {
            similarity: parse_from_env(Self::ENV_W_SIM, defaults.scorer.weights.similarity)?,
            price: parse_from_env(Self::ENV_W_PRICE, defaults.scorer.weights.price)?,
            trust: parse_from_env(Self::ENV_W_TRUST, defaults.scorer.weights.trust)?,
        };

        let scorer = ScorerConfig {
            similarity_floor: parse_from_env(
                Self::ENV_SIMILARITY_FLOOR,
                defaults.scorer.similarity_floor,
            )?,
            min_savings: parse_from_env(Self::ENV_MIN_SAVINGS, defaults.scorer.min_savings)?,
            weights,
            rating_saturation: parse_from_env(
                Self::ENV_RATING_SATURATION,
                defaults.scorer.rating_saturation,
            )?,
            min_trust: parse_from_env(Self::ENV_MIN_TRUST, defaults.scorer.min_trust)?,
            top_k: parse_optional_from_env(Self::ENV_TOP_K)?,
            score_anchor_candidates: parse_from_env(
                Self::ENV_SCORE_ANCHOR_CANDIDATES,
                defaults.scorer.score_anchor_candidates,
            )?,
        };

        Ok(Self {
            data_dir,
            catalog_path,
            reference_path,
            model_dir: path_from_env(Self::ENV_MODEL_DIR),
            model_version: env::var(Self::ENV_MODEL_VERSION).unwrap_or(defaults.model_version),
            batch_size: parse_from_env(Self::ENV_BATCH_SIZE, defaults.batch_size)?,
            scorer,
            filter_blacklist: list_from_env(Self::ENV_FILTER_BLACKLIST),
            filter_keywords: list_from_env(Self::ENV_FILTER_KEYWORDS),
        })
    }

    /// Validates paths and scoring invariants (does not create directories).
    ///
    /// Runs before any stage so a misconfigured weight set halts the
    /// pipeline instead of silently producing meaningless scores.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(ref dir) = self.model_dir {
            if !dir.exists() {
                return Err(ConfigError::PathNotFound { path: dir.clone() });
            }
            if !dir.is_dir() {
                return Err(ConfigError::NotADirectory { path: dir.clone() });
            }
        }

        self.scorer.validate()?;
        Ok(())
    }

    /// Merged catalog artifact produced by the injection stage.
    pub fn merged_catalog_path(&self) -> PathBuf {
        self.data_dir.join("catalog.jsonl")
    }

    /// Directory holding the vector store artifacts.
    pub fn store_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Flat disruptor rows produced by the scoring stage.
    pub fn results_path(&self) -> PathBuf {
        self.data_dir.join("disruptors.jsonl")
    }

    /// Per-anchor scoring reports.
    pub fn scoring_report_path(&self) -> PathBuf {
        self.data_dir.join("scoring_report.json")
    }

    /// Encoder configuration implied by this pipeline configuration.
    pub fn encoder_config(&self) -> EncoderConfig {
        match &self.model_dir {
            Some(dir) => EncoderConfig {
                model_version: self.model_version.clone(),
                batch_size: self.batch_size,
                ..EncoderConfig::new(dir.clone())
            },
            None => EncoderConfig {
                batch_size: self.batch_size,
                ..EncoderConfig::stub()
            },
        }
    }

    /// Purity screen implied by the configured keyword lists.
    pub fn purity_filter(&self) -> PurityFilter {
        PurityFilter::new(self.filter_blacklist.clone(), self.filter_keywords.clone())
    }
}

fn path_from_env(var: &str) -> Option<PathBuf> {
    env::var(var)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
}

fn list_from_env(var: &str) -> Vec<String> {
    env::var(var)
        .map(|v| parse_list(&v))
        .unwrap_or_default()
}

fn parse_from_env<T: std::str::FromStr>(var: &'static str, default: T) -> Result<T, ConfigError> {
    match env::var(var) {
        Ok(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidValue { var, value }),
        Err(_) => Ok(default),
    }
}

fn parse_optional_from_env<T: std::str::FromStr>(
    var: &'static str,
) -> Result<Option<T>, ConfigError> {
    match env::var(var) {
        Ok(value) if !value.trim().is_empty() => value
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::InvalidValue { var, value }),
        _ => Ok(None),
    }
}

pub(crate) fn parse_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}
