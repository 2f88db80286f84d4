//! Integration tests for config module public API.

use prereq::config::{
    load_config, load_merged_config, validate, validate_config, DependencyConfig, OutputMode,
    PrereqConfig,
};
use prereq::dependency::LifecycleSettings;
use std::fs;
use std::time::Duration;
use tempfile::TempDir;

#[test]
fn public_api_is_accessible() {
    let _config = PrereqConfig::default();
    let _dep = DependencyConfig::default();
    let _mode = OutputMode::Verbose;
}

#[test]
fn full_config_workflow() {
    let temp = TempDir::new().unwrap();
    let config_dir = temp.path().join(".prereq");
    fs::create_dir_all(&config_dir).unwrap();
    fs::write(
        config_dir.join("config.yml"),
        r#"
settings:
  poll_interval_secs: 2
  poll_attempts: 10
dependencies:
  node:
    check: node --version
    validate: "^v\\d+"
    requires: [homebrew]
    install: [brew install node]
"#,
    )
    .unwrap();

    let config = load_merged_config(temp.path()).unwrap();
    validate(&config).unwrap();

    let settings = LifecycleSettings::from(&config.settings);
    assert_eq!(settings.poll_interval, Duration::from_secs(2));
    assert_eq!(settings.poll_attempts, 10);
    assert_eq!(settings.max_depth, 16);
}

#[test]
fn validation_collects_every_problem() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("bad.yml");
    fs::write(
        &path,
        r#"
settings:
  max_depth: 0
dependencies:
  broken:
    check: ""
    validate: "[unclosed"
    requires: [ghost]
"#,
    )
    .unwrap();

    let config = load_config(temp.path(), Some(path.as_path())).unwrap();
    let errors = validate_config(&config);

    let rules: Vec<_> = errors.iter().map(|e| e.rule.as_str()).collect();
    assert_eq!(
        rules,
        vec!["max-depth", "missing-check", "invalid-pattern", "unknown-dependency"]
    );
    assert!(validate(&config).is_err());
}
