//! Search options and navigation direction.

use serde::{Deserialize, Serialize};

use finder_config::SearchConfig;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SearchOptions {
    pub match_case: bool,
    pub whole_word: bool,
}

impl From<&SearchConfig> for SearchOptions {
    fn from(config: &SearchConfig) -> Self {
        Self {
            match_case: config.match_case,
            whole_word: config.whole_word,
        }
    }
}

/// Cursor movement over the highlight list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Previous,
    Next,
}

impl Direction {
    /// `-1` is previous, `1` is next; anything else is rejected.
    pub fn from_step(step: i64) -> Option<Self> {
        match step {
            -1 => Some(Self::Previous),
            1 => Some(Self::Next),
            _ => None,
        }
    }
}
