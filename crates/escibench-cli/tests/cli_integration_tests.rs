//! CLI integration tests using `assert_cmd`.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

/// Get the CLI binary command
#[allow(deprecated)]
fn escibench_cmd() -> Command {
    Command::cargo_bin("escibench").unwrap()
}

fn write_fixture(dir: &TempDir) -> std::path::PathBuf {
    let queries = dir.path().join("queries.json");
    fs::write(
        &queries,
        r#"[
            {
                "query": "usb c cable",
                "query_id": 1,
                "product_asins": ["B01", "B02"],
                "esci_labels": ["E", "S"],
                "product_locales": ["us", "us"]
            }
        ]"#,
    )
    .unwrap();

    let results_dir = dir.path().join("results");
    fs::create_dir_all(&results_dir).unwrap();
    fs::write(
        results_dir.join("algolia_results.json"),
        r#"[{"query_id": 1, "query": "usb c cable", "response": ["B01", "B99"]}]"#,
    )
    .unwrap();

    let config = dir.path().join("benchmark.yaml");
    fs::write(
        &config,
        format!(
            r#"
backends:
  - type: algolia
    app_id: APP
    api_key: KEY
    index_name: products
queries_file: {}
results_dir: {}
report_file: {}
evaluation:
  k: 2
"#,
            queries.display(),
            results_dir.display(),
            results_dir.join("benchmark_metrics.json").display()
        ),
    )
    .unwrap();

    config
}

#[test]
fn test_help_displays_usage() {
    escibench_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("search backends"))
        .stdout(predicate::str::contains("Usage:"));
}

#[test]
fn test_version_displays_version() {
    escibench_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("escibench"));
}

#[test]
fn test_invalid_command_shows_error() {
    escibench_cmd()
        .arg("invalid_command_xyz")
        .assert()
        .failure()
        .stderr(predicate::str::contains("error"));
}

#[test]
fn test_init_writes_template() {
    let temp_dir = TempDir::new().unwrap();
    let output = temp_dir.path().join("benchmark.yaml");

    escibench_cmd()
        .arg("init")
        .arg("--output")
        .arg(&output)
        .assert()
        .success()
        .stdout(predicate::str::contains("Generated configuration"));

    let content = fs::read_to_string(&output).unwrap();
    assert!(content.contains("type: algolia"));
    assert!(content.contains("type: shopify"));
}

#[test]
fn test_validate_accepts_generated_fixture() {
    let temp_dir = TempDir::new().unwrap();
    let config = write_fixture(&temp_dir);

    escibench_cmd()
        .arg("validate")
        .arg("--config")
        .arg(&config)
        .assert()
        .success()
        .stdout(predicate::str::contains("Configuration is valid"))
        .stdout(predicate::str::contains("algolia"));
}

#[test]
fn test_validate_missing_config_fails() {
    escibench_cmd()
        .arg("validate")
        .arg("--config")
        .arg("does-not-exist.yaml")
        .assert()
        .failure();
}

#[test]
fn test_evaluate_appends_report() {
    let temp_dir = TempDir::new().unwrap();
    let config = write_fixture(&temp_dir);

    escibench_cmd()
        .arg("evaluate")
        .arg("--config")
        .arg(&config)
        .assert()
        .success()
        .stdout(predicate::str::contains("Evaluation Complete"))
        .stdout(predicate::str::contains("Evaluated: 1"));

    let report = fs::read_to_string(temp_dir.path().join("results/benchmark_metrics.json")).unwrap();
    let entries: serde_json::Value = serde_json::from_str(&report).unwrap();
    assert_eq!(entries.as_array().unwrap().len(), 1);
    assert!(entries[0]["algolia"]["precision@k"].is_number());
}

#[test]
fn test_evaluate_twice_appends_two_entries() {
    let temp_dir = TempDir::new().unwrap();
    let config = write_fixture(&temp_dir);

    for _ in 0..2 {
        escibench_cmd()
            .arg("evaluate")
            .arg("--config")
            .arg(&config)
            .assert()
            .success();
    }

    let report = fs::read_to_string(temp_dir.path().join("results/benchmark_metrics.json")).unwrap();
    let entries: serde_json::Value = serde_json::from_str(&report).unwrap();
    assert_eq!(entries.as_array().unwrap().len(), 2);
}
