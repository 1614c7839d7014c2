/// Cosine similarity of two equal-length vectors, clamped to [0, 1].
///
/// Returns 0 when either vector has zero magnitude (a document that tokenized to
/// nothing). Panics if the lengths differ: both vectors must come from the same
/// vocabulary, so a mismatch is a caller bug, not a data condition.
pub fn cosine_similarity(a: &[f64], b: &[f64]) -> f64 {
    assert_eq!(
        a.len(),
        b.len(),
        "cosine_similarity: vectors must share one vocabulary"
    );

    let mut dot = 0.0_f64;
    let mut norm_a = 0.0_f64;
    let mut norm_b = 0.0_f64;
    for (x, y) in a.iter().zip(b) {
        dot += x * y;
        norm_a += x * x;
        norm_b += y * y;
    }

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }

    (dot / (norm_a.sqrt() * norm_b.sqrt())).clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_identical_vectors_are_one() {
        let v = [1.0, 2.0, 3.0];
        assert!((cosine_similarity(&v, &v) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_orthogonal_vectors_are_zero() {
        assert_eq!(cosine_similarity(&[1.0, 0.0], &[0.0, 1.0]), 0.0);
    }

    #[test]
    fn test_zero_vector_is_zero_not_nan() {
        let sim = cosine_similarity(&[1.0, 2.0], &[0.0, 0.0]);
        assert_eq!(sim, 0.0);
        assert_eq!(cosine_similarity(&[0.0, 0.0], &[0.0, 0.0]), 0.0);
    }

    #[test]
    fn test_empty_vectors_are_zero() {
        assert_eq!(cosine_similarity(&[], &[]), 0.0);
    }

    #[test]
    fn test_scale_invariant() {
        let sim = cosine_similarity(&[1.0, 1.0], &[5.0, 5.0]);
        assert!((sim - 1.0).abs() < 1e-12);
    }

    #[test]
    #[should_panic(expected = "share one vocabulary")]
    fn test_length_mismatch_panics() {
        cosine_similarity(&[1.0, 2.0], &[1.0]);
    }

    proptest! {
        #[test]
        fn prop_self_similarity_is_one(v in prop::collection::vec(0.01f64..100.0, 1..32)) {
            prop_assert!((cosine_similarity(&v, &v) - 1.0).abs() < 1e-9);
        }

        #[test]
        fn prop_similarity_is_bounded(
            pair in (1usize..32).prop_flat_map(|n| (
                prop::collection::vec(0.0f64..100.0, n),
                prop::collection::vec(0.0f64..100.0, n),
            ))
        ) {
            let sim = cosine_similarity(&pair.0, &pair.1);
            prop_assert!((0.0..=1.0).contains(&sim));
        }
    }
}
