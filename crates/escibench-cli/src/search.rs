//! Query runner: drives one search backend over the benchmark queries.

use futures::stream::{self, StreamExt};
use indicatif::{ProgressBar, ProgressStyle};
use serde_json::Value;
use tracing::{info, warn};

use escibench_core::dataset::RankedResult;
use escibench_core::QueryJudgment;

use crate::config::RunOptions;
use crate::connectors::SearchBackend;
use crate::error::Result;
use crate::retry::{with_retry, RetryConfig};

/// Statistics for one backend's query run.
#[derive(Debug, Default, Clone)]
pub struct SearchRunStats {
    /// Queries submitted.
    pub queries: u64,
    /// Queries that still failed after retries (recorded with an empty
    /// response so downstream evaluation sees the miss).
    pub failed: u64,
    /// Duration in seconds.
    pub duration_secs: f64,
}

impl SearchRunStats {
    /// Queries per second over the whole run.
    #[must_use]
    pub fn throughput(&self) -> f64 {
        if self.duration_secs > 0.0 {
            self.queries as f64 / self.duration_secs
        } else {
            0.0
        }
    }
}

/// Runs every benchmark query against one backend.
///
/// Queries run through a bounded-concurrency worker pool with per-query
/// retry; the output preserves the input query order regardless of
/// completion order. A query that exhausts its retries yields an empty
/// ranking and is counted in `failed` rather than aborting the run.
pub async fn run_queries(
    backend: &dyn SearchBackend,
    judgments: &[QueryJudgment],
    options: &RunOptions,
) -> (Vec<RankedResult>, SearchRunStats) {
    let start = std::time::Instant::now();
    let retry = RetryConfig::with_max_retries(options.max_retries);

    let progress = create_progress_bar(judgments.len() as u64, options.progress);
    progress.set_message(format!("Querying {}", backend.backend_type()));

    let mut indexed: Vec<(usize, RankedResult, bool)> = stream::iter(
        judgments.iter().enumerate().map(|(index, judgment)| {
            let retry = &retry;
            let progress = &progress;
            async move {
                let op_name = format!("{}:{}", backend.backend_type(), judgment.query_id);
                let outcome = with_retry(retry, &op_name, || {
                    backend.search(&judgment.query, options.count)
                })
                .await;

                let (response, failed) = match outcome {
                    Ok(ids) => (ids, false),
                    Err(e) => {
                        warn!("Query {} failed: {}", judgment.query_id, e);
                        (Vec::new(), true)
                    }
                };

                progress.inc(1);
                let result = RankedResult {
                    query_id: Value::String(judgment.query_id.clone()),
                    query: judgment.query.clone(),
                    response,
                };
                (index, result, failed)
            }
        }),
    )
    .buffer_unordered(options.concurrency)
    .collect()
    .await;

    progress.finish_with_message(format!("{} done", backend.backend_type()));

    indexed.sort_by_key(|(index, _, _)| *index);

    let mut stats = SearchRunStats {
        queries: judgments.len() as u64,
        ..Default::default()
    };
    let results = indexed
        .into_iter()
        .map(|(_, result, failed)| {
            if failed {
                stats.failed += 1;
            }
            result
        })
        .collect();

    stats.duration_secs = start.elapsed().as_secs_f64();
    info!(
        "{}: {} queries, {} failed in {:.1}s ({:.1} q/sec)",
        backend.backend_type(),
        stats.queries,
        stats.failed,
        stats.duration_secs,
        stats.throughput()
    );

    (results, stats)
}

/// Writes a backend's ranked results as pretty-printed JSON.
///
/// # Errors
///
/// Returns an error if the parent directory cannot be created or the file
/// cannot be written.
pub fn save_results(path: &std::path::Path, results: &[RankedResult]) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(results)?;
    std::fs::write(path, json)?;
    Ok(())
}

fn create_progress_bar(total: u64, show: bool) -> ProgressBar {
    if !show {
        return ProgressBar::hidden();
    }

    let pb = ProgressBar::new(total);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("#>-"),
    );
    pb
}
