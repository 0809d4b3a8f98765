//! Error types for `escibench-core`.
//!
//! This module provides a unified error type for evaluation-engine
//! operations. Degenerate metric inputs (empty rankings, empty relevant
//! sets, zero IDCG) are never errors; they resolve to metric value 0.

use thiserror::Error;

/// Result type alias for evaluation operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while loading or aggregating evaluation data.
///
/// Error codes follow the pattern `BENCH-XXX` for easy debugging.
#[derive(Error, Debug)]
pub enum Error {
    /// Ground-truth or result file could not be read (BENCH-001).
    #[error("[BENCH-001] IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Ground-truth or result file could not be parsed (BENCH-002).
    #[error("[BENCH-002] Malformed JSON in {path}: {message}")]
    MalformedJson {
        /// File that failed to parse.
        path: String,
        /// Parser error message.
        message: String,
    },

    /// Positional judgment arrays are not aligned (BENCH-003).
    #[error(
        "[BENCH-003] Judgment arrays misaligned for query '{query_id}': \
         {product_ids} product ids vs {grades} grades"
    )]
    MisalignedJudgment {
        /// Query whose record is inconsistent.
        query_id: String,
        /// Number of product identifiers in the record.
        product_ids: usize,
        /// Number of grade labels in the record.
        grades: usize,
    },

    /// Invalid evaluation configuration (BENCH-004).
    #[error("[BENCH-004] Configuration error: {0}")]
    Config(String),

    /// Report store could not be written (BENCH-005).
    #[error("[BENCH-005] Report store error: {0}")]
    Report(String),
}
