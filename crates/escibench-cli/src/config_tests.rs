//! Tests for benchmark configuration.

use super::*;

const SAMPLE_YAML: &str = r#"
backends:
  - type: algolia
    app_id: APP123
    api_key: key
    index_name: products
  - type: shopify
    shop_url: store.myshopify.com
    access_token: shpat_x

queries_file: data/electronics_us_queries.json
results_dir: results
report_file: results/benchmark_metrics.json

evaluation:
  k: 5
  gains:
    E: 3
    S: 2
    C: 1
    I: 0

options:
  count: 25
  concurrency: 4
"#;

#[test]
fn test_parse_sample_yaml() {
    let config: BenchmarkConfig = serde_yaml::from_str(SAMPLE_YAML).unwrap();

    assert_eq!(config.backends.len(), 2);
    assert_eq!(config.backends[0].name(), "algolia");
    assert_eq!(config.backends[1].name(), "shopify");
    assert_eq!(config.evaluation.k, 5);
    assert_eq!(config.options.count, 25);
    assert!(config.validate().is_ok());
}

#[test]
fn test_defaults_applied() {
    let yaml = r#"
backends:
  - type: doofinder
    token: t
    region: eu1
    hash_id: h
queries_file: queries.json
"#;
    let config: BenchmarkConfig = serde_yaml::from_str(yaml).unwrap();

    assert_eq!(config.results_dir, PathBuf::from("results"));
    assert_eq!(
        config.report_file,
        PathBuf::from("results/benchmark_metrics.json")
    );
    assert_eq!(config.evaluation.k, 10);
    assert_eq!(config.options.max_retries, 3);
    assert!(config.options.progress);
}

#[test]
fn test_empty_backends_rejected() {
    let yaml = "backends: []\nqueries_file: q.json\n";
    let config: BenchmarkConfig = serde_yaml::from_str(yaml).unwrap();
    assert!(matches!(config.validate(), Err(Error::Config(_))));
}

#[test]
fn test_duplicate_backend_rejected() {
    let yaml = r#"
backends:
  - type: algolia
    app_id: A
    api_key: k
    index_name: i
  - type: algolia
    app_id: B
    api_key: k
    index_name: i
queries_file: q.json
"#;
    let config: BenchmarkConfig = serde_yaml::from_str(yaml).unwrap();
    assert!(matches!(config.validate(), Err(Error::Config(_))));
}

#[test]
fn test_zero_cutoff_rejected() {
    let yaml = r#"
backends:
  - type: doofinder
    token: t
    region: eu1
    hash_id: h
queries_file: q.json
evaluation:
  k: 0
"#;
    let config: BenchmarkConfig = serde_yaml::from_str(yaml).unwrap();
    assert!(matches!(config.validate(), Err(Error::Config(_))));
}

#[test]
fn test_results_file_naming() {
    let config: BenchmarkConfig = serde_yaml::from_str(SAMPLE_YAML).unwrap();
    assert_eq!(
        config.results_file("algolia"),
        PathBuf::from("results/algolia_results.json")
    );
}

#[test]
fn test_from_file_missing_is_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = BenchmarkConfig::from_file(&dir.path().join("absent.yaml")).unwrap_err();
    assert!(matches!(err, Error::Io(_)));
}
