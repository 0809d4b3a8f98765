//! Per-query ranking metrics.
//!
//! This module scores one retrieved ranking against one query's judgment
//! set at a cutoff `k`:
//! - **Precision@k / Recall@k / F1@k**: set overlap between the relevant
//!   judged products and the retrieved top-k
//! - **Reciprocal rank**: 1/rank of the first relevant hit
//! - **NDCG@k**: graded, rank-discounted gain (see [`crate::gain`])
//!
//! Product identifiers are canonicalized (case-folded) on both sides of
//! every comparison; retrieved ids that differ from judged ids only in
//! case must still match. Every degenerate input resolves to 0, never an
//! error.

use std::collections::{HashMap, HashSet};

use crate::dataset::QueryJudgment;
use crate::gain;
use crate::relevance::RelevanceMapping;

/// Metric values for one (query, cutoff) evaluation.
///
/// Transient: computed per query and immediately folded into the
/// aggregate, never persisted individually.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MetricSample {
    /// Precision@k.
    pub precision: f64,
    /// Recall@k.
    pub recall: f64,
    /// F1@k.
    pub f1: f64,
    /// NDCG@k over graded gains.
    pub ndcg: f64,
    /// 1/rank of the first relevant retrieved product, 0 if none.
    pub reciprocal_rank: f64,
    /// Count of relevant products among the retrieved top-k.
    pub relevant_retrieved: usize,
}

/// Canonical form of a product identifier for membership comparison.
///
/// ASINs are upper-case alphanumerics by convention, but backends echo
/// them back in arbitrary case; both sides are folded before comparing.
#[must_use]
pub fn canonical_id(id: &str) -> String {
    id.to_uppercase()
}

/// Scores one retrieved ranking against one query's judgments at cutoff `k`.
#[must_use]
pub fn evaluate_query(
    judgment: &QueryJudgment,
    retrieved: &[String],
    mapping: &RelevanceMapping,
    k: usize,
) -> MetricSample {
    // Canonicalized judgment table: id -> gain. Drives NDCG lookups for
    // retrieved ids; absent ids score 0.
    let mut gain_by_id: HashMap<String, u32> = judgment
        .judgments
        .iter()
        .map(|j| (canonical_id(&j.product_id), mapping.gain_for(j.grade)))
        .collect();

    let relevant_set: HashSet<String> = judgment
        .judgments
        .iter()
        .filter(|j| j.grade.is_some_and(|g| g.is_relevant()))
        .map(|j| canonical_id(&j.product_id))
        .collect();

    let retrieved_topk: Vec<String> = retrieved.iter().take(k).map(|id| canonical_id(id)).collect();
    let retrieved_set: HashSet<&String> = retrieved_topk.iter().collect();

    let relevant_retrieved = relevant_set
        .iter()
        .filter(|id| retrieved_set.contains(id))
        .count();

    let precision = if retrieved_topk.is_empty() {
        0.0
    } else {
        relevant_retrieved as f64 / retrieved_topk.len() as f64
    };

    let recall = if relevant_set.is_empty() {
        0.0
    } else {
        relevant_retrieved as f64 / relevant_set.len() as f64
    };

    let f1 = if precision + recall > 0.0 {
        2.0 * precision * recall / (precision + recall)
    } else {
        0.0
    };

    let reciprocal_rank = retrieved_topk
        .iter()
        .position(|id| relevant_set.contains(id))
        .map_or(0.0, |rank| 1.0 / (rank + 1) as f64);

    let ground_truth_gains: Vec<u32> = judgment
        .judgments
        .iter()
        .map(|j| mapping.gain_for(j.grade))
        .collect();
    // Each judged id yields its gain once, at its best rank; a repeated
    // occurrence counts as unjudged.
    let retrieved_gains: Vec<u32> = retrieved_topk
        .iter()
        .map(|id| gain_by_id.remove(id).unwrap_or(0))
        .collect();
    let ndcg = gain::ndcg(&ground_truth_gains, &retrieved_gains, k);

    MetricSample {
        precision,
        recall,
        f1,
        ndcg,
        reciprocal_rank,
        relevant_retrieved,
    }
}
