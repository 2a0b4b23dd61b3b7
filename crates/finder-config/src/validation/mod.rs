//! Full configuration validation.
//!
//! Validates timing ranges, class and attribute names, and badge colors.
//! Each domain has its own submodule; this orchestrator calls them all
//! and collects errors into a single `ConfigError`.

mod helpers;
mod markup;
mod timing;


use crate::schema::FinderConfig;
use finder_common::ConfigError;

/// Run all validations on a config, collecting all errors.
pub fn validate(config: &FinderConfig) -> Result<(), ConfigError> {
    let mut errors: Vec<String> = Vec::new();

    timing::validate_search(&mut errors, config);
    timing::validate_reveal(&mut errors, config);
    markup::validate_highlight(&mut errors, config);
    markup::validate_indicator(&mut errors, config);
    markup::validate_visibility(&mut errors, config);

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ConfigError::ValidationError(errors.join("; ")))
    }
}
