//! # `escibench` Core
//!
//! Ranking-quality evaluation engine for the ESCI search benchmark.
//!
//! Given graded relevance judgments for (query, product) pairs and a
//! rank-ordered list of retrieved product identifiers per query, this
//! crate computes standard information-retrieval metrics (Precision@k,
//! Recall@k, F1@k, NDCG@k, Mean Reciprocal Rank) and aggregates them
//! across queries into a per-backend report.
//!
//! The engine scores externally produced rankings against externally
//! supplied ground truth; it does not rank or retrieve anything itself.
//! All computation is pure given its inputs, and every degenerate input
//! (empty ranking, empty relevant set, zero ideal gain) resolves to a
//! metric value of 0 rather than an error.
//!
//! ## Quick Start
//!
//! ```rust
//! use escibench_core::aggregate::aggregate;
//! use escibench_core::dataset::{JudgedProduct, QueryJudgment};
//! use escibench_core::relevance::{EsciLabel, RelevanceMapping};
//! use std::collections::HashMap;
//!
//! let judgments = vec![QueryJudgment {
//!     query_id: "42".to_string(),
//!     query: "usb c cable".to_string(),
//!     judgments: vec![
//!         JudgedProduct { product_id: "B01".into(), grade: Some(EsciLabel::Exact) },
//!         JudgedProduct { product_id: "B02".into(), grade: Some(EsciLabel::Irrelevant) },
//!     ],
//! }];
//! let retrieved = HashMap::from([("42".to_string(), vec!["B01".to_string()])]);
//!
//! let report = aggregate(&judgments, &retrieved, &RelevanceMapping::default(), 2);
//! assert!(report.ndcg_at_k > 0.99);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::cast_precision_loss)] // Acceptable for metric averaging
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::uninlined_format_args)]

pub mod aggregate;
pub mod config;
pub mod dataset;
pub mod error;
pub mod gain;
pub mod metrics;
pub mod relevance;
pub mod report;

pub use aggregate::{aggregate, AggregateReport};
pub use config::{ConfigError, EvalConfig};
pub use dataset::{
    load_judgments, load_results, results_by_query, GroundTruthRecord, JudgedProduct,
    QueryJudgment, RankedResult,
};
pub use error::{Error, Result};
pub use metrics::{evaluate_query, MetricSample};
pub use relevance::{EsciLabel, RelevanceMapping};
pub use report::{ReportEntry, ReportStore};
