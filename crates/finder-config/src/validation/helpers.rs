//! Shared validation helpers used by all domain validators.

use regex::Regex;
use std::sync::LazyLock;

/// CSS class or HTML tag/attribute identifier.
static NAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z_-][A-Za-z0-9_-]*$").unwrap());

/// Push an error if `value` is outside `[min, max]` (integer).
pub(crate) fn validate_range(errors: &mut Vec<String>, name: &str, value: u32, min: u32, max: u32) {
    if value < min || value > max {
        errors.push(format!("{name} = {value} is out of range [{min}, {max}]"));
    }
}

/// Push an error if `value` is not a usable class, tag or attribute name.
pub(crate) fn validate_name(errors: &mut Vec<String>, name: &str, value: &str) {
    if !NAME_RE.is_match(value) {
        errors.push(format!("{name} = {value:?} is not a valid identifier"));
    }
}
