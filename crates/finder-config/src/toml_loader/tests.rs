//! Tests for TOML config loading, creation, and path resolution.

use super::*;
use finder_common::ConfigError;
use std::path::Path;

#[test]
fn load_from_nonexistent_returns_file_not_found() {
    let result = load_from_path(Path::new("/tmp/nonexistent_textfinder_config.toml"));
    assert!(matches!(result, Err(ConfigError::FileNotFound(_))));
}

#[test]
fn load_valid_partial_toml() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(
        &path,
        r##"
[search]
whole_word = true
debounce_ms = 150

[indicator]
badge_color = "#00d4ff"
"##,
    )
    .unwrap();

    let config = load_from_path(&path).unwrap();
    assert!(config.search.whole_word);
    assert_eq!(config.search.debounce_ms, 150);
    assert_eq!(config.indicator.badge_color, "#00d4ff");
    // Defaults preserved
    assert_eq!(config.indicator.text_color, "#ffffff");
    assert_eq!(config.reveal.trigger_settle_ms, 300);
}

#[test]
fn load_invalid_toml_returns_parse_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "this is not valid toml {{{").unwrap();

    let result = load_from_path(&path);
    assert!(matches!(result, Err(ConfigError::ParseError(_))));
}

#[test]
fn load_config_with_invalid_values_returns_parsed_config() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(
        &path,
        r#"
[search]
debounce_ms = 100000
"#,
    )
    .unwrap();

    let config = load_from_path(&path).unwrap();
    assert_eq!(config.search.debounce_ms, 100_000);
}

#[test]
fn create_and_load_default_config() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("textfinder").join("config.toml");

    create_default_config(&path).unwrap();
    assert!(path.exists());

    let config = load_from_path(&path).unwrap();
    assert_eq!(config.highlight.class, "tf-highlight");
    assert_eq!(config.visibility.collapsed_classes, vec!["collapsed", "closed"]);
}

#[test]
fn default_config_toml_is_valid() {
    use super::template::default_config_toml;
    use crate::schema::FinderConfig;

    let config: FinderConfig = toml::from_str(default_config_toml()).unwrap();
    assert_eq!(config.search.debounce_ms, 300);
    assert!(crate::validation::validate(&config).is_ok());
}

#[test]
fn default_config_path_is_reasonable() {
    // May not resolve in every CI environment.
    if let Ok(path) = default_config_path() {
        let path_str = path.to_string_lossy();
        assert!(path_str.contains("textfinder"));
        assert!(path_str.ends_with("config.toml"));
    }
}
