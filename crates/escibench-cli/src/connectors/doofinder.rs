//! Doofinder connector.
//!
//! Queries the Doofinder search API for a hashid-scoped index. The search
//! endpoint lives on a per-region host (`{region}-search.doofinder.com`)
//! and authenticates with a token header.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use crate::config::DoofinderConfig;
use crate::connectors::common::{create_http_client, handle_http_error};
use crate::connectors::SearchBackend;
use crate::error::{Error, Result};

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    results: Vec<ResultItem>,
}

#[derive(Debug, Deserialize)]
struct ResultItem {
    id: serde_json::Value,
}

/// Doofinder connector.
pub struct DoofinderBackend {
    config: DoofinderConfig,
    client: Client,
}

impl DoofinderBackend {
    /// Creates a new Doofinder connector with a configured HTTP client.
    pub fn new(config: DoofinderConfig) -> Self {
        Self {
            config,
            client: create_http_client(),
        }
    }

    /// Builds the search URL for the configured region.
    fn build_search_url(&self) -> String {
        match &self.config.base_url {
            Some(base) => format!("{}/5/search", base.trim_end_matches('/')),
            None => format!("https://{}-search.doofinder.com/5/search", self.config.region),
        }
    }

    /// Extracts product identifiers from a search response.
    fn extract_product_ids(response: SearchResponse) -> Vec<String> {
        response
            .results
            .into_iter()
            .map(|item| match item.id {
                serde_json::Value::String(s) => s,
                other => other.to_string(),
            })
            .collect()
    }
}

#[async_trait]
impl SearchBackend for DoofinderBackend {
    fn backend_type(&self) -> &'static str {
        "doofinder"
    }

    async fn connect(&mut self) -> Result<()> {
        if self.config.token.is_empty() || self.config.hash_id.is_empty() {
            return Err(Error::Config(
                "Doofinder requires token and hash_id".to_string(),
            ));
        }
        if self.config.region.is_empty() && self.config.base_url.is_none() {
            return Err(Error::Config(
                "Doofinder requires a region (eu1, us1, ...)".to_string(),
            ));
        }

        self.search("", 1).await.map(|_| ())
    }

    async fn search(&self, query: &str, count: usize) -> Result<Vec<String>> {
        let url = self.build_search_url();

        let response = self
            .client
            .get(&url)
            .header("Authorization", format!("Token {}", self.config.token))
            .query(&[
                ("hashid", self.config.hash_id.as_str()),
                ("query", query),
                ("rpp", &count.to_string()),
            ])
            .send()
            .await
            .map_err(|e| Error::BackendConnection(format!("Doofinder request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(handle_http_error(status.as_u16(), &body, "Doofinder"));
        }

        let parsed: SearchResponse = response
            .json()
            .await
            .map_err(|e| Error::Search(format!("Failed to parse Doofinder response: {}", e)))?;

        Ok(Self::extract_product_ids(parsed))
    }
}

#[cfg(test)]
#[path = "doofinder_tests.rs"]
mod tests;
