// Benchmark tool - pedantic lints relaxed for CLI ergonomics
#![allow(clippy::pedantic)]

//! # `escibench` CLI
//!
//! `escibench` is a CLI tool and library for benchmarking hosted search
//! backends against the ESCI graded-relevance dataset.
//!
//! ## Supported Backends
//!
//! | Backend | Status | Notes |
//! |---------|--------|-------|
//! | Algolia | ✅ | Multi-queries REST API |
//! | Doofinder | ✅ | Region-scoped search API |
//! | Shopify | ✅ | Admin GraphQL API, paced at ~1 req/s |
//!
//! ## Quick Start
//!
//! ```bash
//! # Run the configured backends over the benchmark queries
//! escibench search --config benchmark.yaml
//!
//! # Score the collected result files and append to the report store
//! escibench evaluate --config benchmark.yaml
//! ```
//!
//! ## Configuration Example
//!
//! ```yaml
//! backends:
//!   - type: algolia
//!     app_id: YOUR_APP_ID
//!     api_key: YOUR_API_KEY
//!     index_name: products
//!
//! queries_file: data/electronics_us_queries.json
//! results_dir: results
//! report_file: results/benchmark_metrics.json
//!
//! evaluation:
//!   k: 5
//!
//! options:
//!   count: 25
//!   concurrency: 4
//! ```

#![warn(missing_docs)]

pub mod config;
pub mod connectors;
pub mod dataset;
pub mod error;
pub mod pipeline;
pub mod retry;
pub mod search;

pub use config::{BackendConfig, BenchmarkConfig, RunOptions};
pub use connectors::{create_backend, SearchBackend};
pub use error::{Error, Result};
pub use pipeline::{Pipeline, RunSummary};
pub use search::{run_queries, save_results, SearchRunStats};
