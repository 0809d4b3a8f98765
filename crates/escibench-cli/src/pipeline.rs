//! Cross-backend evaluation pipeline.
//!
//! Loads the shared ground truth once, then per backend loads that
//! backend's retrieved rankings, aggregates metrics at the configured
//! cutoff and appends the result to the report store. One backend's load
//! failure never affects the others or the store.

use tracing::{error, info};

use escibench_core::{aggregate, results_by_query, AggregateReport, ReportStore};

use crate::config::BenchmarkConfig;
use crate::error::Result;

/// Summary of one evaluation run.
#[derive(Debug, Default, Clone)]
pub struct RunSummary {
    /// Backends evaluated and appended to the report store.
    pub evaluated: u64,
    /// Backends skipped because their results failed to load.
    pub failed: u64,
    /// Duration in seconds.
    pub duration_secs: f64,
}

/// Evaluation pipeline.
pub struct Pipeline {
    config: BenchmarkConfig,
}

impl Pipeline {
    /// Creates a pipeline for the given configuration.
    #[must_use]
    pub fn new(config: BenchmarkConfig) -> Self {
        Self { config }
    }

    /// Evaluates every configured backend and appends each report.
    ///
    /// # Errors
    ///
    /// Returns an error if the shared ground truth cannot be loaded or a
    /// report append fails; a single backend's unreadable results file is
    /// reported and skipped instead.
    pub fn run(&self) -> Result<RunSummary> {
        let start = std::time::Instant::now();
        let mut summary = RunSummary::default();

        let judgments = escibench_core::load_judgments(&self.config.queries_file)?;
        let k = self.config.evaluation.k;
        let (mapping, unknown) = self.config.evaluation.mapping();
        for grade in &unknown {
            error!("Relevance mapping contains unknown grade '{}'", grade);
        }

        let eligible = escibench_core::aggregate::eligible_queries(&judgments, k).len();
        info!(
            "Ground truth: {} queries, {} eligible at k={}",
            judgments.len(),
            eligible,
            k
        );

        let store = ReportStore::new(&self.config.report_file);
        if let Some(parent) = self.config.report_file.parent() {
            std::fs::create_dir_all(parent)?;
        }

        for backend in &self.config.backends {
            let name = backend.name();
            let results_file = self.config.results_file(name);

            let results = match escibench_core::load_results(&results_file) {
                Ok(results) => results,
                Err(e) => {
                    error!("Skipping {}: failed to load {:?}: {}", name, results_file, e);
                    summary.failed += 1;
                    continue;
                }
            };

            let retrieved = results_by_query(results);
            let report = aggregate(&judgments, &retrieved, &mapping, k);
            log_report(name, k, &report);

            store.append(name, report)?;
            summary.evaluated += 1;
        }

        summary.duration_secs = start.elapsed().as_secs_f64();
        info!(
            "Evaluation complete: {} backends evaluated, {} skipped in {:.2}s",
            summary.evaluated, summary.failed, summary.duration_secs
        );

        Ok(summary)
    }
}

fn log_report(name: &str, k: usize, report: &AggregateReport) {
    info!(
        "{name}: precision@{k}={:.4} recall@{k}={:.4} f1={:.4} ndcg@{k}={:.4} mrr={:.4} avg_relevant={:.2}",
        report.precision_at_k,
        report.recall_at_k,
        report.f1_score,
        report.ndcg_at_k,
        report.mrr,
        report.avg_relevant_products
    );
}
