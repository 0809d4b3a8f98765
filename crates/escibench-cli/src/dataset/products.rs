//! Product-catalog validation.
//!
//! Streams a product catalog in JSON Lines form, keeps the products of one
//! category whose image URL is actually downloadable, and writes the
//! surviving products (and their ASINs) for the ground-truth builder.
//! Products indexed into a search backend need a working image; dead image
//! links would skew any storefront comparison.

use futures::stream::{self, StreamExt};
use indicatif::{ProgressBar, ProgressStyle};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;
use std::time::Duration;
use tracing::{debug, info};

use crate::error::{Error, Result};

/// Options for the validation pass.
#[derive(Debug, Clone)]
pub struct ProductValidationOptions {
    /// Keep only products whose first category entry matches.
    pub category: String,
    /// Concurrent image checks in flight.
    pub concurrency: usize,
    /// Per-image fetch timeout.
    pub timeout: Duration,
    /// Show a progress bar.
    pub progress: bool,
}

impl Default for ProductValidationOptions {
    fn default() -> Self {
        Self {
            category: String::new(),
            concurrency: 16,
            timeout: Duration::from_secs(10),
            progress: true,
        }
    }
}

/// Statistics from one validation pass.
#[derive(Debug, Default, Clone)]
pub struct ProductValidationStats {
    /// Catalog lines read.
    pub scanned: u64,
    /// Products in the requested category.
    pub in_category: u64,
    /// Products with a reachable image, written out.
    pub valid: u64,
    /// Products dropped (missing/unreachable image or malformed line).
    pub rejected: u64,
}

/// One catalog product, as stored in the JSONL dump.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogProduct {
    /// Product identifier.
    pub asin: String,
    /// Product title.
    #[serde(default)]
    pub title: String,
    /// Image URL to validate.
    #[serde(default)]
    pub image: Option<String>,
    /// Category path, most general first.
    #[serde(default)]
    pub category: Vec<String>,
    /// Listed price, as scraped.
    #[serde(default)]
    pub price: Option<String>,
    /// Star rating, as scraped.
    #[serde(default)]
    pub stars: Option<String>,
    /// Rating count, as scraped.
    #[serde(default)]
    pub ratings: Option<String>,
    /// Catalog locale.
    #[serde(default)]
    pub locale: Option<String>,
    /// Remaining catalog attributes, carried through untouched.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl CatalogProduct {
    fn in_category(&self, category: &str) -> bool {
        self.category.first().is_some_and(|c| c == category)
    }
}

/// Checks that an image URL serves at least one body chunk.
///
/// A 200 status alone is not enough; CDNs answer 200 with an empty body
/// for purged assets, so the first chunk must actually arrive.
async fn image_is_reachable(client: &Client, url: &str, timeout: Duration) -> bool {
    let response = match client.get(url).timeout(timeout).send().await {
        Ok(r) => r,
        Err(e) => {
            debug!("Image fetch failed for {}: {}", url, e);
            return false;
        }
    };

    if !response.status().is_success() {
        return false;
    }

    let mut body = response.bytes_stream();
    matches!(body.next().await, Some(Ok(chunk)) if !chunk.is_empty())
}

/// Validates a product catalog and writes the surviving records.
///
/// Writes the kept products as JSON Lines to `products_out` and their
/// ASINs as one JSON array to `asins_out`. Unreachable images are counted,
/// never fatal; only I/O on the local files aborts the pass.
///
/// # Errors
///
/// Returns an error if the catalog cannot be read or an output file
/// cannot be written.
pub async fn validate_products(
    catalog: &Path,
    products_out: &Path,
    asins_out: &Path,
    options: &ProductValidationOptions,
) -> Result<ProductValidationStats> {
    let file = File::open(catalog).map_err(|e| {
        Error::Dataset(format!("cannot open catalog {}: {e}", catalog.display()))
    })?;

    let mut stats = ProductValidationStats::default();
    let mut candidates = Vec::new();

    for line in BufReader::with_capacity(128 * 1024, file).lines() {
        let line = line?;
        stats.scanned += 1;

        match serde_json::from_str::<CatalogProduct>(&line) {
            Ok(product) if product.in_category(&options.category) => {
                stats.in_category += 1;
                candidates.push(product);
            }
            Ok(_) => {}
            Err(e) => {
                debug!("Skipping malformed catalog line {}: {}", stats.scanned, e);
                stats.rejected += 1;
            }
        }
    }

    info!(
        "Catalog {}: {} products, {} in category '{}'",
        catalog.display(),
        stats.scanned,
        stats.in_category,
        options.category
    );

    let client = Client::builder()
        .timeout(options.timeout)
        .build()
        .unwrap_or_else(|_| Client::new());

    let progress = if options.progress {
        let pb = ProgressBar::new(candidates.len() as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} validating images")
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("#>-"),
        );
        pb
    } else {
        ProgressBar::hidden()
    };

    let checked: Vec<(CatalogProduct, bool)> = stream::iter(candidates.into_iter().map(|product| {
        let client = &client;
        let progress = &progress;
        let timeout = options.timeout;
        async move {
            let reachable = match product.image.as_deref() {
                Some(url) if !url.is_empty() => image_is_reachable(client, url, timeout).await,
                _ => false,
            };
            progress.inc(1);
            (product, reachable)
        }
    }))
    .buffer_unordered(options.concurrency)
    .collect()
    .await;

    progress.finish_with_message("image validation done");

    let mut products_writer = BufWriter::new(File::create(products_out)?);
    let mut asins = Vec::new();

    for (product, reachable) in checked {
        if reachable {
            serde_json::to_writer(&mut products_writer, &product)?;
            products_writer.write_all(b"\n")?;
            asins.push(product.asin);
            stats.valid += 1;
        } else {
            stats.rejected += 1;
        }
    }
    products_writer.flush()?;

    std::fs::write(asins_out, serde_json::to_string_pretty(&asins)?)?;

    info!(
        "Validated {}/{} products, ASINs written to {}",
        stats.valid,
        stats.in_category,
        asins_out.display()
    );

    Ok(stats)
}

#[cfg(test)]
#[path = "products_tests.rs"]
mod tests;
