//! Ground-truth builder.
//!
//! Turns the ESCI examples table (CSV export) into the positional
//! ground-truth JSON the evaluator consumes: one record per query with its
//! complete judged-product set. Rows are filtered to the validated product
//! catalog, one locale and one grade set before grouping.

use serde::Deserialize;
use std::collections::HashSet;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use tracing::info;

use escibench_core::GroundTruthRecord;

use crate::error::{Error, Result};

/// Row filters applied before grouping.
#[derive(Debug, Clone)]
pub struct GroundTruthFilter {
    /// Product locale to keep (e.g. "us").
    pub locale: String,
    /// Grade labels to keep (e.g. E/S for a strict benchmark, E/S/C/I for
    /// graded evaluation).
    pub labels: Vec<String>,
    /// Dataset split to keep.
    pub split: String,
    /// Restrict to the reduced dataset version.
    pub small_version_only: bool,
}

impl Default for GroundTruthFilter {
    fn default() -> Self {
        Self {
            locale: "us".to_string(),
            labels: vec![
                "E".to_string(),
                "S".to_string(),
                "C".to_string(),
                "I".to_string(),
            ],
            split: "train".to_string(),
            small_version_only: true,
        }
    }
}

/// One row of the ESCI examples export.
#[derive(Debug, Deserialize)]
struct ExampleRow {
    query_id: u64,
    query: String,
    product_id: String,
    product_locale: String,
    esci_label: String,
    split: String,
    #[serde(default)]
    small_version: u8,
}

impl ExampleRow {
    fn matches(&self, filter: &GroundTruthFilter, valid_asins: &HashSet<String>) -> bool {
        valid_asins.contains(&self.product_id)
            && self.product_locale == filter.locale
            && filter.labels.iter().any(|l| l == &self.esci_label)
            && self.split == filter.split
            && (!filter.small_version_only || self.small_version == 1)
    }
}

/// Loads the valid-ASIN set written by the product validation pass.
fn load_valid_asins(path: &Path) -> Result<HashSet<String>> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        Error::Dataset(format!(
            "cannot read valid ASINs {}: {e}; run `escibench dataset products` first",
            path.display()
        ))
    })?;
    let asins: Vec<String> = serde_json::from_str(&content)?;
    Ok(asins.into_iter().collect())
}

/// Builds the ground-truth judgment file.
///
/// Reads the examples CSV, keeps the rows passing `filter` whose product
/// is in the validated ASIN set, groups them by query id preserving row
/// order, and writes one positional [`GroundTruthRecord`] per query.
///
/// # Errors
///
/// Returns an error if an input cannot be read or the output cannot be
/// written. Rows are trusted to be well-formed CSV; a malformed row is a
/// dataset error, not a skip.
pub fn build_ground_truth(
    examples_csv: &Path,
    valid_asins: &Path,
    output: &Path,
    filter: &GroundTruthFilter,
) -> Result<usize> {
    let asins = load_valid_asins(valid_asins)?;
    info!("Loaded {} valid ASINs from {}", asins.len(), valid_asins.display());

    let file = File::open(examples_csv).map_err(|e| {
        Error::Dataset(format!("cannot open examples {}: {e}", examples_csv.display()))
    })?;
    let mut reader = csv::Reader::from_reader(BufReader::with_capacity(128 * 1024, file));

    // Group by query id preserving first-seen query order and row order
    // within each query.
    let mut order: Vec<u64> = Vec::new();
    let mut grouped: std::collections::HashMap<u64, GroundTruthRecord> =
        std::collections::HashMap::new();

    let mut scanned = 0u64;
    for row in reader.deserialize::<ExampleRow>() {
        let row = row?;
        scanned += 1;

        if !row.matches(filter, &asins) {
            continue;
        }

        let record = grouped.entry(row.query_id).or_insert_with(|| {
            order.push(row.query_id);
            GroundTruthRecord {
                query_id: serde_json::json!(row.query_id),
                query: row.query.clone(),
                product_asins: Vec::new(),
                esci_labels: Vec::new(),
                product_locales: Vec::new(),
            }
        });
        record.product_asins.push(row.product_id);
        record.esci_labels.push(row.esci_label);
        record.product_locales.push(row.product_locale);
    }

    let records: Vec<&GroundTruthRecord> = order.iter().map(|id| &grouped[id]).collect();

    if let Some(parent) = output.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(output, serde_json::to_string_pretty(&records)?)?;

    info!(
        "Ground truth: {} rows scanned, {} queries written to {}",
        scanned,
        records.len(),
        output.display()
    );

    Ok(records.len())
}

#[cfg(test)]
#[path = "queries_tests.rs"]
mod tests;
