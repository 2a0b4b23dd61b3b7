//! Mutable state of one find session.

use finder_dom::NodeId;

use crate::highlight::HighlightList;
use crate::matcher::TextSpan;
use crate::options::SearchOptions;
use crate::trigger::Trigger;

#[derive(Debug, Clone, Default)]
pub struct SessionState {
    pub highlights: HighlightList,
    pub hidden_spans: Vec<TextSpan>,
    pub triggers: Vec<Trigger>,
    /// Set between a trigger click and the release after its re-search.
    pub re_searching: bool,
    pub query: String,
    pub options: SearchOptions,
}

impl SessionState {
    /// Forget the last result. The re-entrancy flag is owned by the caller.
    pub fn reset(&mut self) {
        self.highlights = HighlightList::default();
        self.hidden_spans.clear();
        self.triggers.clear();
        self.query.clear();
        self.options = SearchOptions::default();
    }

    pub fn hidden_count(&self) -> usize {
        self.hidden_spans.iter().map(TextSpan::match_count).sum()
    }

    pub fn hidden_nodes(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.hidden_spans.iter().map(|s| s.node)
    }
}
