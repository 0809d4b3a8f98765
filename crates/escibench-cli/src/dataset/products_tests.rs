//! Tests for product-catalog validation.

use super::*;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn catalog_line(asin: &str, category: &str, image: Option<&str>) -> String {
    serde_json::json!({
        "asin": asin,
        "title": format!("Product {asin}"),
        "image": image,
        "category": [category, "Sub"],
        "price": "19.99",
        "locale": "us",
    })
    .to_string()
}

fn options(category: &str) -> ProductValidationOptions {
    ProductValidationOptions {
        category: category.to_string(),
        concurrency: 4,
        timeout: Duration::from_secs(2),
        progress: false,
    }
}

#[test]
fn test_catalog_product_parses_with_extras() {
    let line = r#"{"asin":"B01","title":"T","category":["Electronics"],"bullets":["a","b"],"info":{"brand":"X"}}"#;
    let product: CatalogProduct = serde_json::from_str(line).unwrap();

    assert_eq!(product.asin, "B01");
    assert!(product.in_category("Electronics"));
    assert!(product.extra.contains_key("bullets"));
    assert!(product.extra.contains_key("info"));
}

#[test]
fn test_in_category_checks_first_entry() {
    let product: CatalogProduct =
        serde_json::from_str(r#"{"asin":"B01","category":["Home","Electronics"]}"#).unwrap();
    assert!(product.in_category("Home"));
    assert!(!product.in_category("Electronics"));
}

#[tokio::test]
async fn test_validate_products_keeps_reachable_images() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/good.jpg"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(vec![0xFF_u8; 512]))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/missing.jpg"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/empty.jpg"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let catalog = dir.path().join("catalog.jsonl");
    std::fs::write(
        &catalog,
        [
            catalog_line("B01", "Electronics", Some(&format!("{}/good.jpg", server.uri()))),
            catalog_line("B02", "Electronics", Some(&format!("{}/missing.jpg", server.uri()))),
            catalog_line("B03", "Electronics", Some(&format!("{}/empty.jpg", server.uri()))),
            catalog_line("B04", "Electronics", None),
            catalog_line("B05", "Books", Some(&format!("{}/good.jpg", server.uri()))),
        ]
        .join("\n"),
    )
    .unwrap();

    let products_out = dir.path().join("valid_products.jsonl");
    let asins_out = dir.path().join("valid_asins.json");

    let stats = validate_products(&catalog, &products_out, &asins_out, &options("Electronics"))
        .await
        .unwrap();

    assert_eq!(stats.scanned, 5);
    assert_eq!(stats.in_category, 4);
    assert_eq!(stats.valid, 1);

    let asins: Vec<String> =
        serde_json::from_str(&std::fs::read_to_string(&asins_out).unwrap()).unwrap();
    assert_eq!(asins, vec!["B01".to_string()]);

    let products = std::fs::read_to_string(&products_out).unwrap();
    assert_eq!(products.lines().count(), 1);
    let kept: CatalogProduct = serde_json::from_str(products.lines().next().unwrap()).unwrap();
    assert_eq!(kept.asin, "B01");
}

#[tokio::test]
async fn test_validate_products_missing_catalog_is_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = validate_products(
        &dir.path().join("absent.jsonl"),
        &dir.path().join("p.jsonl"),
        &dir.path().join("a.json"),
        &options("Electronics"),
    )
    .await
    .unwrap_err();

    assert!(matches!(err, Error::Dataset(_)));
}

#[tokio::test]
async fn test_malformed_lines_counted_not_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let catalog = dir.path().join("catalog.jsonl");
    std::fs::write(&catalog, "not json at all\n").unwrap();

    let stats = validate_products(
        &catalog,
        &dir.path().join("p.jsonl"),
        &dir.path().join("a.json"),
        &options("Electronics"),
    )
    .await
    .unwrap();

    assert_eq!(stats.scanned, 1);
    assert_eq!(stats.rejected, 1);
    assert_eq!(stats.valid, 0);
}
