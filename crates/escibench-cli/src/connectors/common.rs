//! Common utilities shared across connectors.

use reqwest::Client;
use std::time::Duration;

use crate::error::{Error, Result};

/// Default HTTP timeout for all connectors.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Creates a configured HTTP client with timeout.
#[must_use]
pub fn create_http_client() -> Client {
    Client::builder()
        .timeout(DEFAULT_TIMEOUT)
        .connect_timeout(Duration::from_secs(10))
        .build()
        .unwrap_or_else(|_| Client::new())
}

/// Validates a backend URL (http/https only).
pub fn validate_url(url: &str) -> Result<()> {
    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Err(Error::Config(format!(
            "Invalid URL scheme in '{}'. Allowed: http, https",
            url
        )));
    }
    if url.len() < 10 {
        return Err(Error::Config(format!("Invalid URL format: {}", url)));
    }
    Ok(())
}

/// Maps an HTTP error response to the connector error taxonomy.
pub fn handle_http_error(status_code: u16, body: &str, backend_name: &str) -> Error {
    match status_code {
        429 => Error::RateLimit(60),
        401 | 403 => Error::Authentication(format!("{} auth failed: {}", backend_name, body)),
        _ => Error::BackendConnection(format!("{} error {}: {}", backend_name, status_code, body)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_url_valid() {
        assert!(validate_url("http://localhost:9200").is_ok());
        assert!(validate_url("https://eu1-search.doofinder.com").is_ok());
    }

    #[test]
    fn test_validate_url_invalid_scheme() {
        assert!(validate_url("ftp://files.example.com").is_err());
        assert!(validate_url("file:///etc/passwd").is_err());
    }

    #[test]
    fn test_handle_http_error_rate_limit() {
        let err = handle_http_error(429, "too many requests", "Algolia");
        assert!(matches!(err, Error::RateLimit(60)));
    }

    #[test]
    fn test_handle_http_error_auth() {
        let err = handle_http_error(401, "unauthorized", "Shopify");
        assert!(matches!(err, Error::Authentication(_)));
        let err = handle_http_error(403, "forbidden", "Shopify");
        assert!(matches!(err, Error::Authentication(_)));
    }

    #[test]
    fn test_handle_http_error_other() {
        let err = handle_http_error(500, "internal error", "Doofinder");
        assert!(matches!(err, Error::BackendConnection(_)));
    }

    #[test]
    fn test_create_http_client() {
        let client = create_http_client();
        assert!(client.get("http://example.com").build().is_ok());
    }
}
