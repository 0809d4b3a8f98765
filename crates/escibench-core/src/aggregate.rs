//! Cross-query aggregation into per-backend summary metrics.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::dataset::QueryJudgment;
use crate::metrics::{evaluate_query, MetricSample};
use crate::relevance::RelevanceMapping;

/// Per-backend summary: each metric averaged over the eligible queries.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AggregateReport {
    /// Mean Precision@k.
    #[serde(rename = "precision@k")]
    pub precision_at_k: f64,
    /// Mean Recall@k.
    #[serde(rename = "recall@k")]
    pub recall_at_k: f64,
    /// Mean F1@k.
    #[serde(rename = "f1_score")]
    pub f1_score: f64,
    /// Mean NDCG@k.
    #[serde(rename = "ndcg@k")]
    pub ndcg_at_k: f64,
    /// Mean reciprocal rank.
    #[serde(rename = "mrr")]
    pub mrr: f64,
    /// Mean count of relevant products among the retrieved top-k.
    #[serde(rename = "avg_relevant_products")]
    pub avg_relevant_products: f64,
}

/// Queries eligible for evaluation at cutoff `k`.
///
/// A query with fewer than `k` judged products cannot be fairly scored at
/// that depth and is excluded (not zero-filled). The returned slice order
/// follows the input.
#[must_use]
pub fn eligible_queries<'a>(judgments: &'a [QueryJudgment], k: usize) -> Vec<&'a QueryJudgment> {
    judgments.iter().filter(|j| j.judged_count() >= k).collect()
}

/// Aggregates per-query samples into an [`AggregateReport`] at cutoff `k`.
///
/// Every mean, including `avg_relevant_products`, is taken over the one
/// eligible-query collection iterated below, so the denominators cannot
/// drift apart if the eligibility rule changes. Queries with no entry in
/// `retrieved_by_query` are scored against an empty ranking. Zero eligible
/// queries yield an all-zero report.
#[must_use]
pub fn aggregate(
    judgments: &[QueryJudgment],
    retrieved_by_query: &HashMap<String, Vec<String>>,
    mapping: &RelevanceMapping,
    k: usize,
) -> AggregateReport {
    let eligible = eligible_queries(judgments, k);
    if eligible.is_empty() {
        return AggregateReport::default();
    }

    let mut totals = Totals::default();
    for judgment in &eligible {
        let empty = Vec::new();
        let retrieved = retrieved_by_query.get(&judgment.query_id).unwrap_or(&empty);
        totals.add(&evaluate_query(judgment, retrieved, mapping, k));
    }

    totals.mean_over(eligible.len())
}

#[derive(Default)]
struct Totals {
    precision: f64,
    recall: f64,
    f1: f64,
    ndcg: f64,
    reciprocal_rank: f64,
    relevant_retrieved: usize,
}

impl Totals {
    fn add(&mut self, sample: &MetricSample) {
        self.precision += sample.precision;
        self.recall += sample.recall;
        self.f1 += sample.f1;
        self.ndcg += sample.ndcg;
        self.reciprocal_rank += sample.reciprocal_rank;
        self.relevant_retrieved += sample.relevant_retrieved;
    }

    fn mean_over(&self, count: usize) -> AggregateReport {
        let n = count as f64;
        AggregateReport {
            precision_at_k: self.precision / n,
            recall_at_k: self.recall / n,
            f1_score: self.f1 / n,
            ndcg_at_k: self.ndcg / n,
            mrr: self.reciprocal_rank / n,
            avg_relevant_products: self.relevant_retrieved as f64 / n,
        }
    }
}

#[cfg(test)]
#[path = "aggregate_tests.rs"]
mod tests;
