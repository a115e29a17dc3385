use super::*;

use half::f16;
use tempfile::{TempDir, tempdir};

use crate::catalog::{CatalogRecord, RecordSource};
use crate::store::{VectorStore, VectorStoreBuilder};

fn record(id: &str, price: Option<f64>, rating: Option<f32>, count: u64) -> CatalogRecord {
    CatalogRecord {
        product_id: id.to_string(),
        title: format!("product {id}"),
        feature_text: String::new(),
        store: String::new(),
        price,
        average_rating: rating,
        rating_number: count,
        source: RecordSource::Scraped,
    }
}

fn vec_f16(values: &[f32]) -> Vec<f16> {
    values.iter().map(|&v| f16::from_f32(v)).collect()
}

/// Store with one 4-dim vector per `(id, vector)` pair, in iteration order.
fn store_with(vectors: &[(&str, [f32; 4])]) -> (TempDir, VectorStore) {
    let dir = tempdir().unwrap();
    let mut builder = VectorStoreBuilder::new("test-model".to_string(), 4);
    for (id, values) in vectors {
        builder
            .push(id.to_string(), format!("hash-{id}"), &vec_f16(values))
            .unwrap();
    }
    let store = builder.commit(dir.path()).unwrap();
    (dir, store)
}

fn base_config() -> ScorerConfig {
    ScorerConfig {
        similarity_floor: 0.60,
        min_savings: 0.15,
        weights: ScoreWeights {
            similarity: 0.5,
            price: 0.3,
            trust: 0.2,
        },
        rating_saturation: 50.0,
        min_trust: 0.1,
        top_k: None,
        score_anchor_candidates: false,
    }
}

mod config_validation {
    use super::*;

    #[test]
    fn test_weights_must_sum_to_one() {
        let config = ScorerConfig {
            weights: ScoreWeights {
                similarity: 0.5,
                price: 0.3,
                trust: 0.3,
            },
            ..base_config()
        };

        assert!(matches!(
            DisruptionScorer::new(config).unwrap_err(),
            ScoringError::WeightsNotNormalized { .. }
        ));
    }

    #[test]
    fn test_negative_weight_is_rejected() {
        let config = ScorerConfig {
            weights: ScoreWeights {
                similarity: 1.2,
                price: -0.2,
                trust: 0.0,
            },
            ..base_config()
        };

        assert!(matches!(
            DisruptionScorer::new(config).unwrap_err(),
            ScoringError::NegativeWeight { name: "price", .. }
        ));
    }

    #[test]
    fn test_floor_outside_unit_interval_is_rejected() {
        for bad in [-0.1f32, 1.5] {
            let config = ScorerConfig {
                similarity_floor: bad,
                ..base_config()
            };
            assert!(matches!(
                DisruptionScorer::new(config).unwrap_err(),
                ScoringError::FloorOutOfRange { .. }
            ));
        }
    }

    #[test]
    fn test_savings_and_saturation_ranges() {
        let config = ScorerConfig {
            min_savings: 1.0,
            ..base_config()
        };
        assert!(matches!(
            DisruptionScorer::new(config).unwrap_err(),
            ScoringError::SavingsOutOfRange { .. }
        ));

        let config = ScorerConfig {
            rating_saturation: 0.0,
            ..base_config()
        };
        assert!(matches!(
            DisruptionScorer::new(config).unwrap_err(),
            ScoringError::SaturationNotPositive { .. }
        ));
    }

    #[test]
    fn test_default_config_is_valid() {
        assert!(ScorerConfig::default().validate().is_ok());
    }
}

#[test]
fn test_weighted_score_matches_hand_computation() {
    // Anchor at $423.00, candidate at $59.99, sim 0.66, trust 0.9.
    let weights = ScoreWeights {
        similarity: 0.60,
        price: 0.25,
        trust: 0.15,
    };
    let price_ratio = 59.99 / 423.00;

    let score = disruption_score(0.66, price_ratio, 0.9, &weights);

    assert!((price_ratio - 0.142).abs() < 1e-3);
    assert!((score - 0.746).abs() < 1e-3, "score = {score}");
}

#[test]
fn test_below_floor_is_excluded_despite_huge_price_incentive() {
    // cos(anchor, cheap) = 0.55 < 0.60 floor, price ratio 0.10.
    let (_dir, store) = store_with(&[
        ("anchor", [1.0, 0.0, 0.0, 0.0]),
        ("cheap", [0.55, 0.8352, 0.0, 0.0]),
    ]);
    let catalog = vec![
        record("anchor", Some(400.0), Some(5.0), 1000),
        record("cheap", Some(40.0), Some(5.0), 1000),
    ];

    let scorer = DisruptionScorer::new(base_config()).unwrap();
    let reports = scorer.score_all(&["anchor".to_string()], &catalog, &store);

    assert_eq!(reports.len(), 1);
    assert!(reports[0].disruptors.is_empty());
    assert_eq!(reports[0].skipped.below_floor, 1);
}

#[test]
fn test_insufficient_discount_is_excluded_despite_high_similarity() {
    // $360 against a $400 anchor fails the 15% savings gate ($340 ceiling).
    let (_dir, store) = store_with(&[
        ("anchor", [1.0, 0.0, 0.0, 0.0]),
        ("near", [1.0, 0.0, 0.0, 0.0]),
    ]);
    let catalog = vec![
        record("anchor", Some(400.0), Some(5.0), 1000),
        record("near", Some(360.0), Some(5.0), 1000),
    ];

    let scorer = DisruptionScorer::new(base_config()).unwrap();
    let reports = scorer.score_all(&["anchor".to_string()], &catalog, &store);

    assert!(reports[0].disruptors.is_empty());
    assert_eq!(reports[0].skipped.insufficient_savings, 1);
}

#[test]
fn test_eligible_candidate_passes_all_gates() {
    let (_dir, store) = store_with(&[
        ("anchor", [1.0, 0.0, 0.0, 0.0]),
        ("disruptor", [0.9, 0.1, 0.0, 0.0]),
    ]);
    let catalog = vec![
        record("anchor", Some(400.0), Some(5.0), 1000),
        record("disruptor", Some(100.0), Some(4.5), 800),
    ];

    let scorer = DisruptionScorer::new(base_config()).unwrap();
    let reports = scorer.score_all(&["anchor".to_string()], &catalog, &store);

    assert_eq!(reports[0].disruptors.len(), 1);
    let hit = &reports[0].disruptors[0];
    assert_eq!(hit.candidate_id, "disruptor");
    assert!(hit.similarity > 0.99);
    assert!((hit.price_ratio - 0.25).abs() < 1e-9);
    assert!((hit.savings_pct - 75.0).abs() < 1e-9);
    assert!(hit.disruption_score > 0.0 && hit.disruption_score <= 1.0);
}

#[test]
fn test_candidates_without_vector_or_price_are_tallied() {
    let (_dir, store) = store_with(&[
        ("anchor", [1.0, 0.0, 0.0, 0.0]),
        ("no-price", [1.0, 0.0, 0.0, 0.0]),
    ]);
    let catalog = vec![
        record("anchor", Some(400.0), Some(5.0), 1000),
        record("no-vector", Some(50.0), Some(4.0), 100),
        record("no-price", None, Some(4.0), 100),
    ];

    let scorer = DisruptionScorer::new(base_config()).unwrap();
    let reports = scorer.score_all(&["anchor".to_string()], &catalog, &store);

    assert!(reports[0].disruptors.is_empty());
    assert_eq!(reports[0].skipped.missing_vector, 1);
    assert_eq!(reports[0].skipped.missing_price, 1);
}

#[test]
fn test_other_anchors_are_not_candidates_by_default() {
    let (_dir, store) = store_with(&[
        ("anchor-a", [1.0, 0.0, 0.0, 0.0]),
        ("anchor-b", [1.0, 0.0, 0.0, 0.0]),
    ]);
    let catalog = vec![
        record("anchor-a", Some(400.0), Some(5.0), 1000),
        record("anchor-b", Some(100.0), Some(5.0), 1000),
    ];
    let anchors = vec!["anchor-a".to_string(), "anchor-b".to_string()];

    let scorer = DisruptionScorer::new(base_config()).unwrap();
    let reports = scorer.score_all(&anchors, &catalog, &store);

    assert!(reports[0].disruptors.is_empty());
    assert_eq!(reports[0].skipped.anchor_excluded, 1);

    // Re-admitting anchors as candidates is a configuration choice.
    let scorer = DisruptionScorer::new(ScorerConfig {
        score_anchor_candidates: true,
        ..base_config()
    })
    .unwrap();
    let reports = scorer.score_all(&anchors, &catalog, &store);
    assert_eq!(reports[0].disruptors.len(), 1);
}

#[test]
fn test_ranking_breaks_ties_by_similarity_then_price_ratio() {
    // Trust-only weights make every eligible candidate score identically
    // (no rating data anywhere), exposing the tie-break chain.
    let (_dir, store) = store_with(&[
        ("anchor", [1.0, 0.0, 0.0, 0.0]),
        ("closest", [1.0, 0.0, 0.0, 0.0]),
        ("far-cheap", [0.8, 0.6, 0.0, 0.0]),
        ("far-pricey", [0.8, 0.6, 0.0, 0.0]),
    ]);
    let catalog = vec![
        record("anchor", Some(100.0), None, 0),
        record("far-pricey", Some(80.0), None, 0),
        record("closest", Some(80.0), None, 0),
        record("far-cheap", Some(40.0), None, 0),
    ];

    let scorer = DisruptionScorer::new(ScorerConfig {
        similarity_floor: 0.0,
        weights: ScoreWeights {
            similarity: 0.0,
            price: 0.0,
            trust: 1.0,
        },
        ..base_config()
    })
    .unwrap();
    let reports = scorer.score_all(&["anchor".to_string()], &catalog, &store);

    let order: Vec<&str> = reports[0]
        .disruptors
        .iter()
        .map(|d| d.candidate_id.as_str())
        .collect();
    assert_eq!(order, vec!["closest", "far-cheap", "far-pricey"]);
}

#[test]
fn test_top_k_truncates_the_ranking() {
    let (_dir, store) = store_with(&[
        ("anchor", [1.0, 0.0, 0.0, 0.0]),
        ("c1", [1.0, 0.0, 0.0, 0.0]),
        ("c2", [0.95, 0.05, 0.0, 0.0]),
        ("c3", [0.9, 0.1, 0.0, 0.0]),
    ]);
    let catalog = vec![
        record("anchor", Some(400.0), Some(5.0), 1000),
        record("c1", Some(100.0), Some(4.0), 500),
        record("c2", Some(110.0), Some(4.0), 500),
        record("c3", Some(120.0), Some(4.0), 500),
    ];

    let scorer = DisruptionScorer::new(ScorerConfig {
        top_k: Some(2),
        ..base_config()
    })
    .unwrap();
    let reports = scorer.score_all(&["anchor".to_string()], &catalog, &store);

    assert_eq!(reports[0].disruptors.len(), 2);
}

#[test]
fn test_no_disruptors_found_is_an_explicit_empty_result() {
    let (_dir, store) = store_with(&[
        ("anchor", [1.0, 0.0, 0.0, 0.0]),
        ("orthogonal", [0.0, 1.0, 0.0, 0.0]),
    ]);
    let catalog = vec![
        record("anchor", Some(400.0), Some(5.0), 1000),
        record("orthogonal", Some(40.0), Some(5.0), 1000),
    ];

    let scorer = DisruptionScorer::new(base_config()).unwrap();
    let reports = scorer.score_all(&["anchor".to_string()], &catalog, &store);

    assert_eq!(reports.len(), 1);
    assert!(reports[0].anchor_skip.is_none());
    assert!(!reports[0].found_disruptors());
}

#[test]
fn test_unscorable_anchors_are_marked_not_fatal() {
    let (_dir, store) = store_with(&[("priced", [1.0, 0.0, 0.0, 0.0])]);
    let catalog = vec![
        record("priced", None, Some(5.0), 10),
        record("unembedded", Some(100.0), Some(5.0), 10),
    ];
    let anchors = vec![
        "priced".to_string(),
        "unembedded".to_string(),
        "ghost".to_string(),
    ];

    let scorer = DisruptionScorer::new(base_config()).unwrap();
    let reports = scorer.score_all(&anchors, &catalog, &store);

    assert_eq!(reports[0].anchor_skip, Some(AnchorSkip::MissingPrice));
    assert_eq!(reports[1].anchor_skip, Some(AnchorSkip::MissingVector));
    assert_eq!(reports[2].anchor_skip, Some(AnchorSkip::NotInCatalog));
}

#[test]
fn test_scoring_is_deterministic_across_runs() {
    let (_dir, store) = store_with(&[
        ("anchor", [0.7, 0.2, 0.1, 0.0]),
        ("c1", [0.6, 0.3, 0.1, 0.0]),
        ("c2", [0.7, 0.1, 0.2, 0.0]),
    ]);
    let catalog = vec![
        record("anchor", Some(423.0), Some(4.8), 2000),
        record("c1", Some(59.99), Some(4.4), 900),
        record("c2", Some(119.99), Some(4.6), 150),
    ];

    let scorer = DisruptionScorer::new(ScorerConfig {
        similarity_floor: 0.5,
        ..base_config()
    })
    .unwrap();

    let first = scorer.score_all(&["anchor".to_string()], &catalog, &store);
    let second = scorer.score_all(&["anchor".to_string()], &catalog, &store);

    assert_eq!(first, second);
}
