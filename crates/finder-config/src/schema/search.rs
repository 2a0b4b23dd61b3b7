//! Search defaults and timing.

use serde::{Deserialize, Serialize};

/// Default search options and input debouncing.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    pub match_case: bool,
    pub whole_word: bool,
    /// Delay after the last keystroke before an input search runs
    /// (valid range: 0-5000).
    pub debounce_ms: u32,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            match_case: false,
            whole_word: false,
            debounce_ms: 300,
        }
    }
}

/// Delays used when revealing hidden matches.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RevealConfig {
    /// Wait after a trigger click before re-searching (valid range: 0-10000).
    pub trigger_settle_ms: u32,
    /// Wait after a trigger re-search before accepting another click
    /// (valid range: 0-10000).
    pub reentrancy_release_ms: u32,
    /// Wait after "reveal all" before re-searching (valid range: 0-10000).
    pub expand_settle_ms: u32,
}

impl Default for RevealConfig {
    fn default() -> Self {
        Self {
            trigger_settle_ms: 300,
            reentrancy_release_ms: 500,
            expand_settle_ms: 500,
        }
    }
}
