//! Algolia connector.
//!
//! Queries an Algolia index through the multi-queries REST endpoint and
//! extracts the product identifier each hit carries in its `id` attribute.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::config::AlgoliaConfig;
use crate::connectors::common::{create_http_client, handle_http_error};
use crate::connectors::SearchBackend;
use crate::error::{Error, Result};

/// One query in a multi-queries request.
#[derive(Debug, Serialize)]
struct QueryRequest<'a> {
    #[serde(rename = "indexName")]
    index_name: &'a str,
    query: &'a str,
    #[serde(rename = "hitsPerPage")]
    hits_per_page: usize,
}

#[derive(Debug, Serialize)]
struct MultiQueryRequest<'a> {
    requests: Vec<QueryRequest<'a>>,
}

#[derive(Debug, Deserialize)]
struct MultiQueryResponse {
    results: Vec<QueryResult>,
}

#[derive(Debug, Deserialize)]
struct QueryResult {
    hits: Vec<Hit>,
}

#[derive(Debug, Deserialize)]
struct Hit {
    /// Product identifier indexed alongside the record.
    id: Option<String>,
    #[serde(rename = "objectID")]
    object_id: String,
}

/// Algolia connector.
pub struct AlgoliaBackend {
    config: AlgoliaConfig,
    client: Client,
}

impl AlgoliaBackend {
    /// Creates a new Algolia connector with a configured HTTP client.
    pub fn new(config: AlgoliaConfig) -> Self {
        Self {
            config,
            client: create_http_client(),
        }
    }

    /// Builds the multi-queries URL for the configured application.
    fn build_queries_url(&self) -> String {
        match &self.config.base_url {
            Some(base) => format!("{}/1/indexes/*/queries", base.trim_end_matches('/')),
            None => format!(
                "https://{}-dsn.algolia.net/1/indexes/*/queries",
                self.config.app_id.to_lowercase()
            ),
        }
    }

    fn build_request(&self, url: &str) -> reqwest::RequestBuilder {
        self.client
            .post(url)
            .header("X-Algolia-Application-Id", &self.config.app_id)
            .header("X-Algolia-API-Key", &self.config.api_key)
            .header("Content-Type", "application/json")
    }

    /// Extracts product identifiers from a multi-queries response.
    ///
    /// Records carry the catalog product id in `id`; `objectID` is the
    /// Algolia-internal fallback when the attribute is absent.
    fn extract_product_ids(response: MultiQueryResponse) -> Vec<String> {
        response
            .results
            .into_iter()
            .next()
            .map(|r| {
                r.hits
                    .into_iter()
                    .map(|hit| hit.id.unwrap_or(hit.object_id))
                    .collect()
            })
            .unwrap_or_default()
    }
}

#[async_trait]
impl SearchBackend for AlgoliaBackend {
    fn backend_type(&self) -> &'static str {
        "algolia"
    }

    async fn connect(&mut self) -> Result<()> {
        if self.config.app_id.is_empty() || self.config.api_key.is_empty() {
            return Err(Error::Config(
                "Algolia requires app_id and api_key".to_string(),
            ));
        }
        if self.config.index_name.is_empty() {
            return Err(Error::Config("Algolia requires index_name".to_string()));
        }

        // Probe with an empty query; auth errors surface here, before the
        // full query run starts.
        self.search("", 1).await.map(|_| ())
    }

    async fn search(&self, query: &str, count: usize) -> Result<Vec<String>> {
        let url = self.build_queries_url();
        let body = MultiQueryRequest {
            requests: vec![QueryRequest {
                index_name: &self.config.index_name,
                query,
                hits_per_page: count,
            }],
        };

        let response = self
            .build_request(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| Error::BackendConnection(format!("Algolia request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(handle_http_error(status.as_u16(), &body, "Algolia"));
        }

        let parsed: MultiQueryResponse = response
            .json()
            .await
            .map_err(|e| Error::Search(format!("Failed to parse Algolia response: {}", e)))?;

        Ok(Self::extract_product_ids(parsed))
    }
}

#[cfg(test)]
#[path = "algolia_tests.rs"]
mod tests;
