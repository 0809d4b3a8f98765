//! Tests for evaluation configuration.

use super::*;
use crate::relevance::EsciLabel;

#[test]
fn test_default_config() {
    let config = EvalConfig::default();
    assert_eq!(config.k, 10);
    assert_eq!(config.gains.get("E"), Some(&3));
    assert_eq!(config.gains.get("I"), Some(&0));
    assert!(config.validate().is_ok());
}

#[test]
fn test_zero_cutoff_rejected() {
    let config = EvalConfig {
        k: 0,
        ..Default::default()
    };
    assert!(matches!(
        config.validate(),
        Err(ConfigError::InvalidValue { .. })
    ));
}

#[test]
fn test_toml_overrides_defaults() {
    let figment = Figment::new()
        .merge(Serialized::defaults(EvalConfig::default()))
        .merge(Toml::string("k = 5\n[gains]\nE = 4\nS = 2\nC = 1\nI = 0\n"));

    let config: EvalConfig = figment.extract().unwrap();
    assert_eq!(config.k, 5);
    assert_eq!(config.gains.get("E"), Some(&4));
}

#[test]
fn test_load_from_missing_file_uses_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let config = EvalConfig::load_from_path(dir.path().join("escibench.toml")).unwrap();
    assert_eq!(config.k, 10);
}

#[test]
fn test_load_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("escibench.toml");
    std::fs::write(&path, "k = 3\n").unwrap();

    let config = EvalConfig::load_from_path(&path).unwrap();
    assert_eq!(config.k, 3);
    // Gains not mentioned in the file keep their defaults.
    assert_eq!(config.gains.get("S"), Some(&2));
}

#[test]
fn test_mapping_surfaces_unknown_grades() {
    let config = EvalConfig {
        k: 5,
        gains: HashMap::from([("E".to_string(), 3), ("bogus".to_string(), 9)]),
    };

    let (mapping, unknown) = config.mapping();
    assert_eq!(unknown, vec!["bogus".to_string()]);
    assert_eq!(mapping.gain(EsciLabel::Exact), 3);
}
