//! Confidence-weighted rating score.

/// Trust modifier in `[min_trust, 1]`.
///
/// `(rating / 5) * n / (n + saturation)`: the confidence term discounts a
/// high average backed by few reviews and saturates toward 1 as the review
/// count grows. Monotone non-decreasing in both rating and count. Absent
/// rating data yields `min_trust` exactly rather than exclusion.
pub fn trust_modifier(
    average_rating: Option<f32>,
    rating_number: u64,
    saturation: f64,
    min_trust: f64,
) -> f64 {
    let Some(rating) = average_rating else {
        return min_trust;
    };

    let rating = f64::from(rating).clamp(0.0, 5.0) / 5.0;
    let count = rating_number as f64;
    let confidence = count / (count + saturation);

    (rating * confidence).clamp(min_trust, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SATURATION: f64 = 50.0;
    const MIN_TRUST: f64 = 0.1;

    fn trust(rating: Option<f32>, count: u64) -> f64 {
        trust_modifier(rating, count, SATURATION, MIN_TRUST)
    }

    #[test]
    fn test_absent_rating_gets_min_trust() {
        assert_eq!(trust(None, 0), MIN_TRUST);
        assert_eq!(trust(None, 10_000), MIN_TRUST);
    }

    #[test]
    fn test_few_reviews_discount_a_high_rating() {
        let thin = trust(Some(5.0), 3);
        let deep = trust(Some(5.0), 5_000);

        assert!(thin < deep);
        assert!(deep > 0.95);
    }

    #[test]
    fn test_monotone_in_review_count() {
        let counts = [0u64, 1, 5, 50, 500, 50_000];
        let values: Vec<f64> = counts.iter().map(|&n| trust(Some(4.5), n)).collect();

        for pair in values.windows(2) {
            assert!(pair[0] <= pair[1], "trust decreased: {pair:?}");
        }
    }

    #[test]
    fn test_monotone_in_rating() {
        let ratings = [1.0f32, 2.0, 3.0, 4.0, 5.0];
        let values: Vec<f64> = ratings.iter().map(|&r| trust(Some(r), 200)).collect();

        for pair in values.windows(2) {
            assert!(pair[0] <= pair[1], "trust decreased: {pair:?}");
        }
    }

    #[test]
    fn test_saturates_below_one() {
        assert!(trust(Some(5.0), u64::MAX / 2) < 1.0 + f64::EPSILON);
        assert!(trust(Some(5.0), 1_000_000) <= 1.0);
    }

    #[test]
    fn test_computed_trust_never_drops_below_floor() {
        // 1-star with a single review computes near zero; the floor holds.
        assert_eq!(trust(Some(1.0), 1), MIN_TRUST);
    }

    #[test]
    fn test_out_of_scale_ratings_are_clamped() {
        assert!(trust(Some(9.9), 1_000) <= 1.0);
        assert_eq!(trust(Some(-2.0), 1_000), MIN_TRUST);
    }
}
