//! Search-backend connectors.
//!
//! Each connector wraps one hosted search product behind the
//! [`SearchBackend`] trait: given a query string it returns the
//! rank-ordered product identifiers the backend serves for it. Connectors
//! do no scoring; the evaluation engine consumes their output.

pub mod algolia;
pub mod common;
pub mod doofinder;
pub mod shopify;

use async_trait::async_trait;

use crate::config::BackendConfig;
use crate::error::Result;

/// Trait for search-backend connectors.
///
/// Implement this trait to benchmark a new search product.
#[async_trait]
pub trait SearchBackend: Send + Sync {
    /// Short backend type name, used for result files and the report.
    fn backend_type(&self) -> &'static str;

    /// Validates configuration and reachability before the query run.
    async fn connect(&mut self) -> Result<()>;

    /// Runs one search query.
    ///
    /// # Arguments
    ///
    /// * `query` - Free-text query to submit
    /// * `count` - Maximum number of results to request
    ///
    /// # Returns
    ///
    /// Rank-ordered product identifiers, best hit first. May be shorter
    /// than `count` if the backend has fewer matches.
    async fn search(&self, query: &str, count: usize) -> Result<Vec<String>>;
}

/// Create a backend connector from configuration.
pub fn create_backend(config: &BackendConfig) -> Box<dyn SearchBackend> {
    match config {
        BackendConfig::Algolia(cfg) => Box::new(algolia::AlgoliaBackend::new(cfg.clone())),
        BackendConfig::Doofinder(cfg) => Box::new(doofinder::DoofinderBackend::new(cfg.clone())),
        BackendConfig::Shopify(cfg) => Box::new(shopify::ShopifyBackend::new(cfg.clone())),
    }
}
