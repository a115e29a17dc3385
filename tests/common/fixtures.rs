//! Test fixtures for integration tests.

use std::path::Path;

use undercut::config::Config;
use undercut::{CatalogRecord, RecordSource, ReferenceRecord};

pub const DEFAULT_PRICE: f64 = 79.99;

#[derive(Default)]
pub struct CatalogRecordBuilder {
    product_id: Option<String>,
    title: Option<String>,
    feature_text: Option<String>,
    store: Option<String>,
    price: Option<Option<f64>>,
    average_rating: Option<Option<f32>>,
    rating_number: Option<u64>,
    source: Option<RecordSource>,
}

impl CatalogRecordBuilder {
    pub fn new(product_id: &str) -> Self {
        Self {
            product_id: Some(product_id.to_string()),
            ..Self::default()
        }
    }

    pub fn title(mut self, title: &str) -> Self {
        self.title = Some(title.to_string());
        self
    }

    pub fn feature_text(mut self, features: &str) -> Self {
        self.feature_text = Some(features.to_string());
        self
    }

    pub fn store(mut self, store: &str) -> Self {
        self.store = Some(store.to_string());
        self
    }

    pub fn price(mut self, price: f64) -> Self {
        self.price = Some(Some(price));
        self
    }

    pub fn no_price(mut self) -> Self {
        self.price = Some(None);
        self
    }

    pub fn rating(mut self, average: f32, count: u64) -> Self {
        self.average_rating = Some(Some(average));
        self.rating_number = Some(count);
        self
    }

    pub fn build(self) -> CatalogRecord {
        let product_id = self.product_id.unwrap_or_else(|| "B0TEST".to_string());
        CatalogRecord {
            title: self
                .title
                .unwrap_or_else(|| format!("Massage Gun {product_id}")),
            product_id,
            feature_text: self
                .feature_text
                .unwrap_or_else(|| "Percussion therapy device".to_string()),
            store: self.store.unwrap_or_else(|| "TestMart".to_string()),
            price: self.price.unwrap_or(Some(DEFAULT_PRICE)),
            average_rating: self.average_rating.unwrap_or(Some(4.2)),
            rating_number: self.rating_number.unwrap_or(250),
            source: self.source.unwrap_or_default(),
        }
    }
}

pub fn reference(product_id: &str, title: &str, price: f64, is_anchor: bool) -> ReferenceRecord {
    // Brand is the leading word of the verified model name, matching how
    // the scraped fixtures fill their store field.
    let brand = title.split_whitespace().next().unwrap_or("").to_string();
    ReferenceRecord {
        product_id: product_id.to_string(),
        title: title.to_string(),
        feature_text: String::new(),
        store: brand,
        price: Some(price),
        average_rating: Some(5.0),
        rating_number: 1000,
        amplitude_mm: Some(16.0),
        stall_force_lbs: Some(40.0),
        max_ppm: Some(2400),
        weight_lbs: Some(2.2),
        noise_dba: Some(65.0),
        is_anchor,
    }
}

/// Writes values as a JSONL snapshot.
pub fn write_jsonl<T: serde::Serialize>(path: &Path, values: &[T]) {
    let mut lines = String::new();
    for value in values {
        lines.push_str(&serde_json::to_string(value).unwrap());
        lines.push('\n');
    }
    std::fs::write(path, lines).unwrap();
}

/// Pipeline config rooted in a temp directory, stub encoder, permissive
/// similarity floor (stub vectors of distinct texts are near-orthogonal).
pub fn test_config(root: &Path) -> Config {
    let mut config = Config {
        data_dir: root.join("data"),
        catalog_path: root.join("catalog_raw.jsonl"),
        reference_path: root.join("references.jsonl"),
        model_dir: None,
        ..Config::default()
    };
    config.scorer.similarity_floor = 0.0;
    config
}
