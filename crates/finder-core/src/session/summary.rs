use serde::Serialize;

/// Lifecycle of a session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Phase {
    #[default]
    Idle,
    Searching,
    Highlighted,
}

/// Counts reported to the caller after every search and navigation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchSummary {
    /// Number of highlights, i.e. navigable matches.
    pub match_count: usize,
    /// 1-based position of the current highlight, 0 when there is none.
    pub current_match: usize,
    pub visible_count: usize,
    pub hidden_count: usize,
    pub expandable_count: usize,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RevealResult {
    pub success: bool,
    /// Triggers that accepted the click.
    pub clicked: usize,
}
