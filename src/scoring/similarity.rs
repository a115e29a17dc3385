//! Cosine similarity over stored f16 vectors.

use half::f16;

/// Cosine similarity of two vectors.
///
/// Dot product over the product of L2 norms, accumulated in f32. Vectors
/// are normalized here, never assumed unit-length. Mismatched lengths or a
/// zero-norm operand yield 0.
#[inline]
pub fn cosine_similarity(a: &[f16], b: &[f16]) -> f32 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }

    let (dot, norm_a_sq, norm_b_sq) =
        a.iter()
            .zip(b.iter())
            .fold((0.0f32, 0.0f32, 0.0f32), |(dot, na, nb), (av, bv)| {
                let av = av.to_f32();
                let bv = bv.to_f32();
                (dot + av * bv, na + av * av, nb + bv * bv)
            });

    let norm_a = norm_a_sq.sqrt();
    let norm_b = norm_b_sq.sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        0.0
    } else {
        dot / (norm_a * norm_b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vec_f16(values: &[f32]) -> Vec<f16> {
        values.iter().map(|&v| f16::from_f32(v)).collect()
    }

    #[test]
    fn test_self_similarity_is_one() {
        let v = vec_f16(&[0.3, -0.2, 0.9, 0.1]);
        assert!((cosine_similarity(&v, &v) - 1.0).abs() < 1e-3);
    }

    #[test]
    fn test_symmetry() {
        let a = vec_f16(&[0.1, 0.7, -0.4, 0.2]);
        let b = vec_f16(&[0.9, -0.3, 0.5, 0.0]);

        assert_eq!(cosine_similarity(&a, &b), cosine_similarity(&b, &a));
    }

    #[test]
    fn test_bounded_in_minus_one_to_one() {
        let vectors = [
            vec_f16(&[1.0, 0.0]),
            vec_f16(&[-1.0, 0.0]),
            vec_f16(&[3.0, 4.0]),
            vec_f16(&[-0.7, 0.7]),
        ];

        for a in &vectors {
            for b in &vectors {
                let sim = cosine_similarity(a, b);
                assert!((-1.0 - 1e-3..=1.0 + 1e-3).contains(&sim), "sim = {sim}");
            }
        }
    }

    #[test]
    fn test_opposite_vectors_score_minus_one() {
        let a = vec_f16(&[0.5, -0.5]);
        let b = vec_f16(&[-0.5, 0.5]);

        assert!((cosine_similarity(&a, &b) + 1.0).abs() < 1e-3);
    }

    #[test]
    fn test_magnitude_is_irrelevant() {
        let small = vec_f16(&[0.1, 0.2, 0.3]);
        let large = vec_f16(&[1.0, 2.0, 3.0]);
        let probe = vec_f16(&[0.4, 0.1, 0.8]);

        let sim_small = cosine_similarity(&probe, &small);
        let sim_large = cosine_similarity(&probe, &large);

        assert!((sim_small - sim_large).abs() < 1e-3);
    }

    #[test]
    fn test_degenerate_inputs_score_zero() {
        let a = vec_f16(&[1.0, 0.0]);
        let zero = vec_f16(&[0.0, 0.0]);
        let short = vec_f16(&[1.0]);

        assert_eq!(cosine_similarity(&a, &zero), 0.0);
        assert_eq!(cosine_similarity(&a, &short), 0.0);
        assert_eq!(cosine_similarity(&[], &[]), 0.0);
    }
}
