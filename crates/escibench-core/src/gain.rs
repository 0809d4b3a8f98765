//! Rank-discounted cumulative gain.
//!
//! DCG rewards placing high-gain products early in a ranking; NDCG
//! normalizes against the best ordering achievable for the same judgment
//! set, yielding a score in [0, 1].

/// Discounted Cumulative Gain over the first `k` positions.
///
/// # Formula
///
/// `dcg@k = Σ_{i=1..min(k, len)} (2^rel_i − 1) / log2(i + 1)`, 1-indexed.
///
/// A relevance of 0 still consumes a rank slot: it contributes no gain but
/// does not shift later positions up. An empty sequence or `k == 0` yields
/// 0.0.
#[must_use]
pub fn dcg(relevances: &[u32], k: usize) -> f64 {
    relevances
        .iter()
        .take(k)
        .enumerate()
        .map(|(i, &rel)| {
            let position = (i + 2) as f64; // 1-indexed rank + 1
            (2f64.powi(rel as i32) - 1.0) / position.log2()
        })
        .sum()
}

/// Normalized Discounted Cumulative Gain at `k`.
///
/// The ideal ordering sorts the **full** ground-truth relevance multiset in
/// descending order, not just the relevant subset; zero-gain judgments are
/// part of the normalizer. When the ideal DCG is 0 (no positive gain
/// anywhere in the judgment set) the result is 0.0 rather than a division
/// error.
#[must_use]
pub fn ndcg(ground_truth: &[u32], retrieved: &[u32], k: usize) -> f64 {
    let mut ideal = ground_truth.to_vec();
    ideal.sort_unstable_by(|a, b| b.cmp(a));

    let idcg = dcg(&ideal, k);
    if idcg > 0.0 {
        dcg(retrieved, k) / idcg
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    #[test]
    fn test_dcg_empty_is_zero() {
        for k in [0, 1, 5, 100] {
            assert_eq!(dcg(&[], k), 0.0);
        }
    }

    #[test]
    fn test_dcg_zero_cutoff_is_zero() {
        assert_eq!(dcg(&[3, 2, 1], 0), 0.0);
    }

    #[test]
    fn test_dcg_single_position() {
        // (2^3 - 1) / log2(2) = 7
        assert!((dcg(&[3], 5) - 7.0).abs() < EPS);
    }

    #[test]
    fn test_dcg_zero_relevance_consumes_rank_slot() {
        // [0, 3]: the 3 sits at rank 2 and is discounted by log2(3),
        // not promoted to rank 1.
        let expected = 7.0 / 3f64.log2();
        assert!((dcg(&[0, 3], 5) - expected).abs() < EPS);
    }

    #[test]
    fn test_dcg_truncates_at_k() {
        let relevances = [3, 2, 1, 3, 2];
        assert!((dcg(&relevances, 2) - dcg(&relevances[..2], 5)).abs() < EPS);
    }

    #[test]
    fn test_ndcg_ideal_ordering_is_one() {
        let truth = [3, 2, 1, 0];
        let ideal = [3, 2, 1, 0];
        assert!((ndcg(&truth, &ideal, 4) - 1.0).abs() < EPS);
    }

    #[test]
    fn test_ndcg_unsorted_ground_truth_normalizes_against_sorted() {
        // Ideal ordering is built by sorting, so the ground-truth order
        // must not matter.
        let retrieved = [3, 2];
        assert!((ndcg(&[1, 3, 2], &retrieved, 2) - ndcg(&[3, 2, 1], &retrieved, 2)).abs() < EPS);
    }

    #[test]
    fn test_ndcg_higher_gain_first_wins() {
        let truth = [3, 2];
        let good = ndcg(&truth, &[3, 2], 2);
        let swapped = ndcg(&truth, &[2, 3], 2);
        assert!(good > swapped);
        assert!((good - 1.0).abs() < EPS);
    }

    #[test]
    fn test_ndcg_tied_grades_order_equal() {
        let truth = [2, 2];
        assert!((ndcg(&truth, &[2, 2], 2) - 1.0).abs() < EPS);
    }

    #[test]
    fn test_ndcg_all_zero_ground_truth_is_zero() {
        assert_eq!(ndcg(&[0, 0, 0], &[0, 0, 0], 3), 0.0);
        assert_eq!(ndcg(&[], &[3, 2], 2), 0.0);
    }

    #[test]
    fn test_ndcg_bounded() {
        let truth = [3, 2, 1];
        let retrieved = [0, 3, 0, 2, 1];
        let score = ndcg(&truth, &retrieved, 5);
        assert!((0.0..=1.0).contains(&score), "got {score}");
    }
}
