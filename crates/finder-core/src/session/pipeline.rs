//! User-facing operations: search, navigate, clear.

use std::collections::HashSet;

use tracing::{debug, warn};

use finder_common::FinderError;
use finder_dom::{Document, NodeId};

use super::{FindSession, Phase, SearchSummary};
use crate::options::{Direction, SearchOptions};

impl FindSession {
    /// Search the document, replacing any previous result.
    ///
    /// Pending deferred work is cancelled and trigger clicks are accepted
    /// again. An empty query just clears.
    pub fn search(&mut self, doc: &mut Document, query: &str, options: SearchOptions) -> SearchSummary {
        self.scheduler.clear();
        self.state.re_searching = false;
        self.run_pipeline(doc, query, options)
    }

    /// Remove all highlights and indicators. Returns the number of
    /// highlights removed.
    pub fn clear(&mut self, doc: &mut Document) -> usize {
        self.scheduler.clear();
        self.state.re_searching = false;
        let removed = self.remove_markup(doc);
        self.state.reset();
        self.phase = Phase::Idle;
        removed
    }

    /// Move the cursor one highlight in `direction`, wrapping at the ends.
    /// Only meaningful while highlighted.
    pub fn navigate(&mut self, doc: &mut Document, direction: Direction) -> SearchSummary {
        if self.phase != Phase::Highlighted {
            return self.summary();
        }
        let moved = match direction {
            Direction::Next => self.highlighter.next(doc, &mut self.state.highlights),
            Direction::Previous => self.highlighter.previous(doc, &mut self.state.highlights),
        };
        if let Err(e) = moved {
            warn!(error = %e, ?direction, "navigation failed");
        }
        self.summary()
    }

    /// Clear, match, highlight and annotate. Failures roll back to an empty
    /// idle session.
    pub(super) fn run_pipeline(
        &mut self,
        doc: &mut Document,
        query: &str,
        options: SearchOptions,
    ) -> SearchSummary {
        self.phase = Phase::Searching;
        let previously_hidden: HashSet<NodeId> = self.state.hidden_nodes().collect();

        self.remove_markup(doc);
        self.state.reset();

        if query.is_empty() {
            self.phase = Phase::Idle;
            return self.summary();
        }
        self.state.query = query.to_string();
        self.state.options = options;

        if let Err(e) = self.populate(doc, query, options, &previously_hidden) {
            warn!(query, error = %e, "search failed, rolling back");
            self.remove_markup(doc);
            self.state.reset();
            self.phase = Phase::Idle;
            return self.summary();
        }

        let summary = self.summary();
        self.phase = if summary.visible_count + summary.hidden_count > 0 {
            Phase::Highlighted
        } else {
            Phase::Idle
        };
        debug!(
            query,
            matches = summary.match_count,
            hidden = summary.hidden_count,
            expandable = summary.expandable_count,
            "search finished"
        );
        summary
    }

    fn populate(
        &mut self,
        doc: &mut Document,
        query: &str,
        options: SearchOptions,
        previously_hidden: &HashSet<NodeId>,
    ) -> Result<(), FinderError> {
        let set = self.matcher.perform_search(doc, query, options);
        self.highlighter
            .highlight(doc, &mut self.state.highlights, &set, previously_hidden)?;
        self.indicators.annotate(doc, &set.expandable, query)?;
        self.highlighter
            .set_current(doc, &mut self.state.highlights, 0)?;
        self.state.hidden_spans = set.hidden;
        self.state.triggers = set.expandable;
        Ok(())
    }

    /// Strip highlights and badges from the document.
    pub(super) fn remove_markup(&mut self, doc: &mut Document) -> usize {
        let removed = self.highlighter.clear(doc, &mut self.state.highlights);
        self.indicators.detach_all(doc);
        removed
    }
}
