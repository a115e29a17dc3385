//! Catalog record types.

use serde::{Deserialize, Serialize};

/// Provenance tag for a catalog record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum RecordSource {
    /// Harvested from a marketplace listing.
    #[default]
    Scraped,
    /// Manually verified benchmark data.
    GoldStandard,
}

/// One product in the merged catalog.
///
/// `product_id` is unique across the merged catalog. `price` is a positive
/// currency amount when present; listings without a usable price survive in
/// the catalog but are never eligible disruptors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogRecord {
    /// Stable product identifier.
    pub product_id: String,
    /// Listing title.
    pub title: String,
    /// Concatenated descriptive fields.
    #[serde(default)]
    pub feature_text: String,
    /// Store or brand name.
    #[serde(default)]
    pub store: String,
    /// Currency amount, absent when the listing had no usable price.
    #[serde(default)]
    pub price: Option<f64>,
    /// Average customer rating on a 0-5 scale.
    #[serde(default)]
    pub average_rating: Option<f32>,
    /// Number of ratings behind `average_rating`.
    #[serde(default)]
    pub rating_number: u64,
    /// Where this record came from.
    #[serde(default)]
    pub source: RecordSource,
}

impl CatalogRecord {
    /// Returns `true` when the record carries a usable positive price.
    pub fn has_price(&self) -> bool {
        self.price.is_some_and(|p| p > 0.0)
    }

    /// Returns `true` for verified benchmark records.
    pub fn is_gold_standard(&self) -> bool {
        self.source == RecordSource::GoldStandard
    }
}

/// A manually curated benchmark product with verified physical specs.
///
/// References are injected into the catalog as [`RecordSource::GoldStandard`]
/// records; those flagged `is_anchor` additionally form the anchor set the
/// scorer searches against.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReferenceRecord {
    /// Stable product identifier.
    pub product_id: String,
    /// Verified brand + model name.
    pub title: String,
    #[serde(default)]
    pub feature_text: String,
    #[serde(default)]
    pub store: String,
    /// Verified price; required for injection.
    #[serde(default)]
    pub price: Option<f64>,
    #[serde(default)]
    pub average_rating: Option<f32>,
    #[serde(default)]
    pub rating_number: u64,
    /// Stroke amplitude in millimetres.
    #[serde(default)]
    pub amplitude_mm: Option<f64>,
    /// Stall force in pounds.
    #[serde(default)]
    pub stall_force_lbs: Option<f64>,
    /// Maximum percussions per minute.
    #[serde(default)]
    pub max_ppm: Option<u32>,
    /// Device weight in pounds.
    #[serde(default)]
    pub weight_lbs: Option<f64>,
    /// Measured noise ceiling in dBA.
    #[serde(default)]
    pub noise_dba: Option<f64>,
    /// Whether this reference is searched against as an anchor.
    #[serde(default)]
    pub is_anchor: bool,
}

impl ReferenceRecord {
    /// Renders the record as a gold-standard catalog entry.
    ///
    /// Verified specs are folded into `feature_text` so they reach the
    /// encoder the same way scraped feature bullets do.
    pub fn to_catalog_record(&self) -> CatalogRecord {
        let mut features: Vec<String> = Vec::new();
        if !self.feature_text.trim().is_empty() {
            features.push(self.feature_text.clone());
        }
        if let Some(amplitude) = self.amplitude_mm {
            features.push(format!("Amplitude: {amplitude}mm"));
        }
        if let Some(stall_force) = self.stall_force_lbs {
            features.push(format!("Stall Force: {stall_force}lbs"));
        }
        if let Some(ppm) = self.max_ppm {
            features.push(format!("Max PPM: {ppm}"));
        }
        if let Some(weight) = self.weight_lbs {
            features.push(format!("Weight: {weight}lbs"));
        }
        if let Some(noise) = self.noise_dba {
            features.push(format!("Noise: {noise}dBA"));
        }

        CatalogRecord {
            product_id: self.product_id.clone(),
            title: self.title.clone(),
            feature_text: features.join(" | "),
            store: self.store.clone(),
            price: self.price,
            average_rating: self.average_rating,
            rating_number: self.rating_number,
            source: RecordSource::GoldStandard,
        }
    }
}
