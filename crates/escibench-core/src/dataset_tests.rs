//! Tests for dataset loading and record conversion.

use super::*;

#[test]
fn test_ground_truth_record_into_pairs() {
    let record = GroundTruthRecord {
        query_id: serde_json::json!(42),
        query: "usb c cable".to_string(),
        product_asins: vec!["B01".to_string(), "B02".to_string()],
        esci_labels: vec!["E".to_string(), "I".to_string()],
        product_locales: vec!["us".to_string(), "us".to_string()],
    };

    let judgment = record.into_judgment().unwrap();
    assert_eq!(judgment.query_id, "42");
    assert_eq!(judgment.judged_count(), 2);
    assert_eq!(judgment.judgments[0].grade, Some(EsciLabel::Exact));
    assert_eq!(judgment.judgments[1].grade, Some(EsciLabel::Irrelevant));
}

#[test]
fn test_misaligned_arrays_rejected() {
    let record = GroundTruthRecord {
        query_id: serde_json::json!(7),
        query: "laptop stand".to_string(),
        product_asins: vec!["B01".to_string(), "B02".to_string()],
        esci_labels: vec!["E".to_string()],
        product_locales: vec![],
    };

    let err = record.into_judgment().unwrap_err();
    assert!(matches!(
        err,
        Error::MisalignedJudgment {
            product_ids: 2,
            grades: 1,
            ..
        }
    ));
}

#[test]
fn test_unknown_grade_loads_as_none() {
    let record = GroundTruthRecord {
        query_id: serde_json::json!(1),
        query: "q".to_string(),
        product_asins: vec!["B01".to_string()],
        esci_labels: vec!["Z".to_string()],
        product_locales: vec![],
    };

    let judgment = record.into_judgment().unwrap();
    assert_eq!(judgment.judgments[0].grade, None);
}

#[test]
fn test_query_id_key_numeric_and_string_agree() {
    assert_eq!(query_id_key(&serde_json::json!(42)), "42");
    assert_eq!(query_id_key(&serde_json::json!("42")), "42");
}

#[test]
fn test_load_judgments_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("queries.json");
    std::fs::write(
        &path,
        r#"[
            {
                "query": "usb c cable",
                "query_id": 42,
                "product_asins": ["B01", "B02", "B03"],
                "esci_labels": ["E", "S", "I"],
                "product_locales": ["us", "us", "us"]
            }
        ]"#,
    )
    .unwrap();

    let judgments = load_judgments(&path).unwrap();
    assert_eq!(judgments.len(), 1);
    assert_eq!(judgments[0].query, "usb c cable");
    assert_eq!(judgments[0].judged_count(), 3);
}

#[test]
fn test_load_judgments_missing_file_is_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = load_judgments(&dir.path().join("absent.json")).unwrap_err();
    assert!(matches!(err, Error::Io(_)));
}

#[test]
fn test_load_judgments_malformed_json_is_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("queries.json");
    std::fs::write(&path, "[{\"query\":").unwrap();

    let err = load_judgments(&path).unwrap_err();
    assert!(matches!(err, Error::MalformedJson { .. }));
}

#[test]
fn test_load_results_and_index() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("algolia_results.json");
    std::fs::write(
        &path,
        r#"[
            {"query_id": 42, "query": "usb c cable", "response": ["B02", "B01"]},
            {"query_id": "43", "query": "hdmi cable", "response": []}
        ]"#,
    )
    .unwrap();

    let results = load_results(&path).unwrap();
    assert_eq!(results.len(), 2);

    let by_query = results_by_query(results);
    assert_eq!(by_query["42"], vec!["B02".to_string(), "B01".to_string()]);
    assert!(by_query["43"].is_empty());
}
