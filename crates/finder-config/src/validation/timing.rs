//! Search and reveal timing validation.

use crate::schema::FinderConfig;

use super::helpers::validate_range;

/// Validate search constraints.
pub(crate) fn validate_search(errors: &mut Vec<String>, config: &FinderConfig) {
    validate_range(
        errors,
        "search.debounce_ms",
        config.search.debounce_ms,
        0,
        5000,
    );
}

/// Validate reveal delays.
pub(crate) fn validate_reveal(errors: &mut Vec<String>, config: &FinderConfig) {
    let reveal = &config.reveal;
    validate_range(
        errors,
        "reveal.trigger_settle_ms",
        reveal.trigger_settle_ms,
        0,
        10_000,
    );
    validate_range(
        errors,
        "reveal.reentrancy_release_ms",
        reveal.reentrancy_release_ms,
        0,
        10_000,
    );
    validate_range(
        errors,
        "reveal.expand_settle_ms",
        reveal.expand_settle_ms,
        0,
        10_000,
    );
}
