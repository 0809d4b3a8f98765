//! Configuration types for the benchmark CLI.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use escibench_core::EvalConfig;

use crate::error::{Error, Result};

/// Main benchmark configuration, loaded from YAML.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BenchmarkConfig {
    /// Backends under test.
    pub backends: Vec<BackendConfig>,
    /// Ground-truth judgment file (also the benchmark query source).
    pub queries_file: PathBuf,
    /// Directory holding `<backend>_results.json` files.
    #[serde(default = "default_results_dir")]
    pub results_dir: PathBuf,
    /// Cross-run report store.
    #[serde(default = "default_report_file")]
    pub report_file: PathBuf,
    /// Evaluation settings (cutoff k, grade gains).
    #[serde(default)]
    pub evaluation: EvalConfig,
    /// Query-run options.
    #[serde(default)]
    pub options: RunOptions,
}

fn default_results_dir() -> PathBuf {
    PathBuf::from("results")
}

fn default_report_file() -> PathBuf {
    PathBuf::from("results/benchmark_metrics.json")
}

/// Search-backend configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum BackendConfig {
    /// Algolia hosted search.
    #[serde(rename = "algolia")]
    Algolia(AlgoliaConfig),
    /// Doofinder site search.
    #[serde(rename = "doofinder")]
    Doofinder(DoofinderConfig),
    /// Shopify storefront search via the Admin API.
    #[serde(rename = "shopify")]
    Shopify(ShopifyConfig),
}

impl BackendConfig {
    /// Backend type name, matching the connector's `backend_type`.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Algolia(_) => "algolia",
            Self::Doofinder(_) => "doofinder",
            Self::Shopify(_) => "shopify",
        }
    }
}

/// Algolia configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlgoliaConfig {
    /// Algolia application ID.
    pub app_id: String,
    /// Search-capable API key.
    pub api_key: String,
    /// Index to query.
    pub index_name: String,
    /// Endpoint override for self-hosted proxies and tests.
    #[serde(default)]
    pub base_url: Option<String>,
}

/// Doofinder configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DoofinderConfig {
    /// API token.
    pub token: String,
    /// Search cluster region (eu1, us1, ...).
    pub region: String,
    /// Search engine hash id.
    pub hash_id: String,
    /// Endpoint override for tests.
    #[serde(default)]
    pub base_url: Option<String>,
}

/// Shopify configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShopifyConfig {
    /// Store domain (e.g. your-store.myshopify.com).
    pub shop_url: String,
    /// Admin API access token.
    pub access_token: String,
    /// Admin API version.
    #[serde(default = "default_api_version")]
    pub api_version: String,
}

fn default_api_version() -> String {
    "2024-10".to_string()
}

/// Query-run options.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RunOptions {
    /// Results requested per query.
    pub count: usize,
    /// Concurrent in-flight queries per backend.
    pub concurrency: usize,
    /// Retry attempts per query on transient failures.
    pub max_retries: u32,
    /// Show progress bars.
    pub progress: bool,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            count: 25,
            concurrency: 4,
            max_retries: 3,
            progress: true,
        }
    }
}

impl BenchmarkConfig {
    /// Loads a configuration from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Ok(serde_yaml::from_str(&content)?)
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error on an empty backend list, duplicate backends, a
    /// zero cutoff, or zero-valued run options.
    pub fn validate(&self) -> Result<()> {
        if self.backends.is_empty() {
            return Err(Error::Config("at least one backend is required".to_string()));
        }

        let mut names: Vec<&str> = self.backends.iter().map(BackendConfig::name).collect();
        names.sort_unstable();
        names.dedup();
        if names.len() != self.backends.len() {
            return Err(Error::Config(
                "each backend type may be configured once per run".to_string(),
            ));
        }

        self.evaluation
            .validate()
            .map_err(|e| Error::Config(e.to_string()))?;

        if self.options.count == 0 {
            return Err(Error::Config("options.count must be >= 1".to_string()));
        }
        if self.options.concurrency == 0 {
            return Err(Error::Config("options.concurrency must be >= 1".to_string()));
        }

        Ok(())
    }

    /// Path of one backend's results file.
    #[must_use]
    pub fn results_file(&self, backend_name: &str) -> PathBuf {
        self.results_dir.join(format!("{backend_name}_results.json"))
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
