//! textfinder configuration system.
//!
//! Provides TOML-based configuration with full validation. All config
//! sections use sensible defaults so partial configs work out of the box.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use finder_config::{load_config, config_to_json};
//!
//! let config = load_config(None).expect("failed to load config");
//! let json = config_to_json(&config);
//! println!("{json}");
//! ```

pub mod colors;
pub mod schema;
pub mod toml_loader;
pub mod validation;

pub use schema::{
    FinderConfig, HighlightConfig, IndicatorConfig, LogLevel, LoggingConfig, RevealConfig,
    SearchConfig, VisibilityConfig, CONFIG_SCHEMA_VERSION,
};

use finder_common::ConfigError;
use std::path::Path;

/// Load and validate config.
///
/// With an explicit path the file must exist. Without one, `config.toml` is
/// read from the OS config directory and created with defaults if missing.
pub fn load_config(path: Option<&Path>) -> Result<FinderConfig, ConfigError> {
    let config = match path {
        Some(path) => toml_loader::load_from_path(path)?,
        None => toml_loader::load_default()?,
    };
    validation::validate(&config)?;
    Ok(config)
}

/// Serialize a config to a pretty-printed JSON string.
pub fn config_to_json(config: &FinderConfig) -> String {
    serde_json::to_string_pretty(config)
        .unwrap_or_else(|e| format!("{{\"error\": \"failed to serialize config: {e}\"}}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_to_json_contains_all_sections() {
        let config = FinderConfig::default();
        let json = config_to_json(&config);
        assert!(json.contains("\"search\""));
        assert!(json.contains("\"reveal\""));
        assert!(json.contains("\"highlight\""));
        assert!(json.contains("\"indicator\""));
        assert!(json.contains("\"visibility\""));
        assert!(json.contains("\"logging\""));
    }

    #[test]
    fn config_schema_version_is_1() {
        assert_eq!(CONFIG_SCHEMA_VERSION, 1);
    }

    #[test]
    fn default_config_round_trips_through_json() {
        let config = FinderConfig::default();
        let json = config_to_json(&config);
        let parsed: FinderConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.highlight.class, "tf-highlight");
        assert_eq!(parsed.search.debounce_ms, 300);
    }

    #[test]
    fn load_config_rejects_invalid_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[indicator]\nbadge_color = \"nope\"\n").unwrap();
        let err = load_config(Some(&path)).unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(_)));
    }

    #[test]
    fn load_config_requires_explicit_file_to_exist() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.toml");
        assert!(matches!(
            load_config(Some(&path)),
            Err(ConfigError::FileNotFound(_))
        ));
    }
}
