//! Ground-truth judgments and retrieved-ranking records.
//!
//! The on-disk ground-truth format is positional (aligned `product_asins`
//! and `esci_labels` arrays, one record per query). Loading validates the
//! alignment and converts each record to explicit (product id, grade)
//! pairs so the invariant cannot be violated silently downstream.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::error::{Error, Result};
use crate::relevance::EsciLabel;

/// One judged product within a query's judgment set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JudgedProduct {
    /// Product identifier (ASIN), as stored in the dataset.
    pub product_id: String,
    /// Relevance grade; `None` if the label was outside the vocabulary.
    pub grade: Option<EsciLabel>,
}

/// Complete judgment set for one evaluated query.
///
/// `judgments` is the full judged-product set for the query; product ids
/// are unique within it. Read-only once loaded.
#[derive(Debug, Clone)]
pub struct QueryJudgment {
    /// Query identifier.
    pub query_id: String,
    /// Query text.
    pub query: String,
    /// Ordered (product id, grade) pairs.
    pub judgments: Vec<JudgedProduct>,
}

impl QueryJudgment {
    /// Number of judged products for this query.
    #[must_use]
    pub fn judged_count(&self) -> usize {
        self.judgments.len()
    }
}

/// On-disk ground-truth record: positionally aligned arrays.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroundTruthRecord {
    /// Query identifier (numeric in the upstream dataset).
    pub query_id: serde_json::Value,
    /// Query text.
    pub query: String,
    /// Judged product identifiers.
    pub product_asins: Vec<String>,
    /// Grade labels, aligned with `product_asins`.
    pub esci_labels: Vec<String>,
    /// Product locales, aligned with `product_asins`.
    #[serde(default)]
    pub product_locales: Vec<String>,
}

/// One retrieved ranking for a (query, backend) pair.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankedResult {
    /// Query identifier.
    pub query_id: serde_json::Value,
    /// Query text.
    pub query: String,
    /// Rank-ordered retrieved product identifiers.
    pub response: Vec<String>,
}

/// Renders a JSON query id as a plain string key.
///
/// The upstream dataset stores numeric ids; result files written by other
/// tooling sometimes quote them. Both forms must address the same query.
#[must_use]
pub fn query_id_key(id: &serde_json::Value) -> String {
    match id {
        serde_json::Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

impl GroundTruthRecord {
    /// Converts the positional record into explicit pairs.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MisalignedJudgment`] if the id and grade arrays
    /// differ in length. Labels outside the closed vocabulary become
    /// `None` grades with a warning; they still occupy a judgment slot.
    pub fn into_judgment(self) -> Result<QueryJudgment> {
        if self.product_asins.len() != self.esci_labels.len() {
            return Err(Error::MisalignedJudgment {
                query_id: query_id_key(&self.query_id),
                product_ids: self.product_asins.len(),
                grades: self.esci_labels.len(),
            });
        }

        let query_id = query_id_key(&self.query_id);
        let judgments = self
            .product_asins
            .into_iter()
            .zip(self.esci_labels)
            .map(|(product_id, label)| {
                let grade = EsciLabel::parse(&label);
                if grade.is_none() {
                    tracing::warn!(
                        "Query {}: unknown grade '{}' for product {}, scoring 0",
                        query_id,
                        label,
                        product_id
                    );
                }
                JudgedProduct { product_id, grade }
            })
            .collect();

        Ok(QueryJudgment {
            query_id,
            query: self.query,
            judgments,
        })
    }
}

/// Loads the ground-truth judgment set from a JSON file.
///
/// # Errors
///
/// A missing file or malformed JSON is an explicit load failure; it is
/// never silently treated as an empty judgment set.
pub fn load_judgments(path: &Path) -> Result<Vec<QueryJudgment>> {
    let file = File::open(path)?;
    let records: Vec<GroundTruthRecord> = serde_json::from_reader(BufReader::new(file))
        .map_err(|e| Error::MalformedJson {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;

    records.into_iter().map(GroundTruthRecord::into_judgment).collect()
}

/// Loads one backend's retrieved rankings from a JSON file.
///
/// # Errors
///
/// Same failure policy as [`load_judgments`].
pub fn load_results(path: &Path) -> Result<Vec<RankedResult>> {
    let file = File::open(path)?;
    serde_json::from_reader(BufReader::new(file)).map_err(|e| Error::MalformedJson {
        path: path.display().to_string(),
        message: e.to_string(),
    })
}

/// Indexes ranked results by query id for per-query lookup.
///
/// Later records win on duplicate query ids.
#[must_use]
pub fn results_by_query(results: Vec<RankedResult>) -> HashMap<String, Vec<String>> {
    results
        .into_iter()
        .map(|r| (query_id_key(&r.query_id), r.response))
        .collect()
}

#[cfg(test)]
#[path = "dataset_tests.rs"]
mod tests;
