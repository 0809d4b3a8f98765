//! Shopify connector.
//!
//! Queries the Shopify Admin GraphQL API with a title search and extracts
//! each product's SKU. Shopify throttles by leaky bucket, so requests are
//! paced at a fixed interval instead of bursting until the first 429.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::{sleep_until, Instant};

use crate::config::ShopifyConfig;
use crate::connectors::common::{create_http_client, handle_http_error};
use crate::connectors::SearchBackend;
use crate::error::{Error, Result};

/// Minimum interval between two Admin API calls.
const REQUEST_INTERVAL: Duration = Duration::from_secs(1);

#[derive(Debug, Serialize)]
struct GraphqlRequest {
    query: String,
}

#[derive(Debug, Deserialize)]
struct GraphqlResponse {
    data: Option<ProductsData>,
    #[serde(default)]
    errors: Vec<GraphqlError>,
}

#[derive(Debug, Deserialize)]
struct GraphqlError {
    message: String,
}

#[derive(Debug, Deserialize)]
struct ProductsData {
    products: ProductConnection,
}

#[derive(Debug, Deserialize)]
struct ProductConnection {
    edges: Vec<ProductEdge>,
}

#[derive(Debug, Deserialize)]
struct ProductEdge {
    node: ProductNode,
}

#[derive(Debug, Deserialize)]
struct ProductNode {
    sku: Option<String>,
}

/// Shopify connector.
pub struct ShopifyBackend {
    config: ShopifyConfig,
    client: Client,
    next_request_at: Mutex<Instant>,
}

impl ShopifyBackend {
    /// Creates a new Shopify connector with a configured HTTP client.
    pub fn new(config: ShopifyConfig) -> Self {
        Self {
            config,
            client: create_http_client(),
            next_request_at: Mutex::new(Instant::now()),
        }
    }

    /// Builds the Admin GraphQL endpoint URL.
    fn build_graphql_url(&self) -> String {
        format!(
            "https://{}/admin/api/{}/graphql.json",
            self.config.shop_url.trim_end_matches('/'),
            self.config.api_version
        )
    }

    /// Builds the product-search GraphQL document.
    fn build_graphql_query(query: &str, count: usize) -> String {
        // Escape double quotes so the query text cannot break out of the
        // search string literal.
        let escaped = query.replace('\\', "\\\\").replace('"', "\\\"");
        format!(
            r#"query SearchProducts {{
    products(first: {count}, query: "title:{escaped}") {{
        edges {{
            node {{
                id
                title
                sku
            }}
        }}
    }}
}}"#
        )
    }

    /// Extracts product SKUs from a GraphQL response.
    ///
    /// Products without a SKU are dropped; they cannot be matched against
    /// the judgment set.
    fn extract_product_ids(data: ProductsData) -> Vec<String> {
        data.products
            .edges
            .into_iter()
            .filter_map(|edge| edge.node.sku)
            .filter(|sku| !sku.is_empty())
            .collect()
    }

    /// Waits until the pacing window allows the next request.
    async fn pace(&self) {
        let mut next = self.next_request_at.lock().await;
        let now = Instant::now();
        if *next > now {
            sleep_until(*next).await;
        }
        *next = Instant::now() + REQUEST_INTERVAL;
    }
}

#[async_trait]
impl SearchBackend for ShopifyBackend {
    fn backend_type(&self) -> &'static str {
        "shopify"
    }

    async fn connect(&mut self) -> Result<()> {
        if self.config.shop_url.is_empty() || self.config.access_token.is_empty() {
            return Err(Error::Config(
                "Shopify requires shop_url and access_token".to_string(),
            ));
        }

        self.search("", 1).await.map(|_| ())
    }

    async fn search(&self, query: &str, count: usize) -> Result<Vec<String>> {
        self.pace().await;

        let url = self.build_graphql_url();
        let body = GraphqlRequest {
            query: Self::build_graphql_query(query, count),
        };

        let response = self
            .client
            .post(&url)
            .header("X-Shopify-Access-Token", &self.config.access_token)
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| Error::BackendConnection(format!("Shopify request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(handle_http_error(status.as_u16(), &body, "Shopify"));
        }

        let parsed: GraphqlResponse = response
            .json()
            .await
            .map_err(|e| Error::Search(format!("Failed to parse Shopify response: {}", e)))?;

        if let Some(err) = parsed.errors.first() {
            return Err(Error::Search(format!("Shopify GraphQL error: {}", err.message)));
        }

        let data = parsed
            .data
            .ok_or_else(|| Error::Search("Shopify response missing data".to_string()))?;

        Ok(Self::extract_product_ids(data))
    }
}

#[cfg(test)]
#[path = "shopify_tests.rs"]
mod tests;
