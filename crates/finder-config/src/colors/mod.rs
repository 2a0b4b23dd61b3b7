//! Color validation for the indicator badge.
//!
//! Accepts `#RGB`, `#RRGGBB`, `#RRGGBBAA`, `rgb(r,g,b)` and
//! `rgba(r,g,b,a)`. Values end up in inline CSS, so anything else is
//! rejected rather than passed through.


use regex::Regex;
use std::sync::LazyLock;

/// Regex for hex color: #RGB, #RRGGBB, or #RRGGBBAA.
static HEX_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^#([0-9a-fA-F]{3}|[0-9a-fA-F]{6}|[0-9a-fA-F]{8})$").unwrap());

/// Regex for rgb()/rgba() with an optional float or int alpha.
static RGBA_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^rgba?\(\s*(\d{1,3})\s*,\s*(\d{1,3})\s*,\s*(\d{1,3})\s*(,\s*([0-9]*\.?[0-9]+)\s*)?\)$",
    )
    .unwrap()
});

/// Validate that a string is a recognized color format.
pub fn validate_color(s: &str) -> bool {
    let s = s.trim();
    if s.is_empty() {
        return false;
    }
    if s.starts_with('#') {
        return HEX_RE.is_match(s);
    }
    if let Some(caps) = RGBA_RE.captures(s) {
        let channels_ok = (1..=3).all(|i| caps[i].parse::<u16>().is_ok_and(|v| v <= 255));
        let alpha_ok = caps
            .get(5)
            .map(|a| a.as_str().parse::<f64>().is_ok_and(|v| v <= 1.0))
            .unwrap_or(true);
        return channels_ok && alpha_ok;
    }
    false
}
