//! Error types for the benchmark CLI.

use thiserror::Error;

/// Result type alias for benchmark operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while querying backends or running evaluations.
#[derive(Error, Debug)]
pub enum Error {
    /// Could not reach or negotiate with a search backend.
    #[error("Backend connection error: {0}")]
    BackendConnection(String),

    /// Backend rejected the configured credentials.
    #[error("Authentication failed: {0}")]
    Authentication(String),

    /// Backend throttled the request; retry after the given seconds.
    #[error("Rate limited, retry after {0}s")]
    RateLimit(u64),

    /// Backend answered but the response could not be used.
    #[error("Search error: {0}")]
    Search(String),

    /// Invalid benchmark configuration.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Dataset ingestion failure.
    #[error("Dataset error: {0}")]
    Dataset(String),

    /// Evaluation-engine failure (ground truth, results, report store).
    #[error(transparent)]
    Core(#[from] escibench_core::Error),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// HTTP transport error.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON (de)serialization error.
    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML configuration parsing error.
    #[error("Configuration parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// CSV parsing error.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}
