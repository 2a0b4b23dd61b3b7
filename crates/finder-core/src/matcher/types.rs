//! Match results.

use serde::Serialize;

use finder_dom::NodeId;

use crate::trigger::Trigger;

/// All occurrences of the query inside one text node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TextSpan {
    pub node: NodeId,
    /// Char offsets where the query starts, ascending.
    pub offsets: Vec<usize>,
    /// Node text when the offsets were computed.
    pub original_text: String,
    /// Query length in chars.
    pub query_len: usize,
}

impl TextSpan {
    pub fn match_count(&self) -> usize {
        self.offsets.len()
    }
}

/// Classified result of one matching pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MatchSet {
    pub visible: Vec<TextSpan>,
    pub hidden: Vec<TextSpan>,
    /// Triggers owning hidden matches, in first-seen order.
    pub expandable: Vec<Trigger>,
}

impl MatchSet {
    pub fn visible_count(&self) -> usize {
        self.visible.iter().map(TextSpan::match_count).sum()
    }

    pub fn hidden_count(&self) -> usize {
        self.hidden.iter().map(TextSpan::match_count).sum()
    }

    pub fn total_count(&self) -> usize {
        self.visible_count() + self.hidden_count()
    }

    pub fn is_empty(&self) -> bool {
        self.visible.is_empty() && self.hidden.is_empty()
    }
}
