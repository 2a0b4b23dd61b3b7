//! Highlighting: wrap visible occurrences in marker elements and keep a
//! cursor over them.
//!
//! Only the highlighter rewrites the text nodes it wraps. `clear` puts the
//! text back and normalizes the touched parents, so a highlight/clear cycle
//! leaves the document's text unchanged. Wrapped text nodes and removed
//! markers are released, so repeated cycles do not grow the arena.

mod marks;


use std::collections::HashSet;

use serde::Serialize;
use tracing::{debug, warn};

use finder_common::{DomError, FinderError, ScrollBlock};
use finder_config::HighlightConfig;
use finder_dom::{Document, NodeId};

use crate::matcher::{MatchSet, TextSpan};
use marks::{split_pieces, Piece};

/// Markers in document order plus the cursor.
#[derive(Debug, Clone, Default)]
pub struct HighlightList {
    pub(crate) markers: Vec<NodeId>,
    pub(crate) current: Option<usize>,
}

impl HighlightList {
    pub fn markers(&self) -> &[NodeId] {
        &self.markers
    }

    pub fn current(&self) -> Option<usize> {
        self.current
    }

    pub fn current_marker(&self) -> Option<NodeId> {
        self.current.and_then(|i| self.markers.get(i).copied())
    }

    pub fn len(&self) -> usize {
        self.markers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }
}

/// Outcome of one highlight pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HighlightCounts {
    pub visible: usize,
    pub hidden: usize,
    pub triggers: usize,
}

#[derive(Debug, Clone)]
pub struct Highlighter {
    config: HighlightConfig,
}

impl Highlighter {
    pub fn new(config: &HighlightConfig) -> Self {
        Self {
            config: config.clone(),
        }
    }

    pub fn config(&self) -> &HighlightConfig {
        &self.config
    }

    /// Wrap every visible occurrence of `set` in a marker.
    ///
    /// Markers of spans whose node is in `previously_hidden` also get the
    /// revealed class. Markers are appended to `list` as they are created,
    /// so a failure part way leaves everything done so far clearable.
    pub fn highlight(
        &self,
        doc: &mut Document,
        list: &mut HighlightList,
        set: &MatchSet,
        previously_hidden: &HashSet<NodeId>,
    ) -> Result<HighlightCounts, FinderError> {
        for span in &set.visible {
            let revealed = previously_hidden.contains(&span.node);
            self.wrap_span(doc, list, span, revealed)?;
        }

        let counts = HighlightCounts {
            visible: list.markers.len(),
            hidden: set.hidden_count(),
            triggers: set.expandable.len(),
        };
        debug!(
            visible = counts.visible,
            hidden = counts.hidden,
            triggers = counts.triggers,
            "highlighted"
        );
        Ok(counts)
    }

    fn wrap_span(
        &self,
        doc: &mut Document,
        list: &mut HighlightList,
        span: &TextSpan,
        revealed: bool,
    ) -> Result<(), FinderError> {
        if doc.text(span.node) != Some(span.original_text.as_str()) {
            return Err(FinderError::StaleMatch(format!(
                "text of node {} changed since matching",
                span.node
            )));
        }
        let parent = doc
            .parent(span.node)
            .ok_or(DomError::Detached(span.node.index()))?;
        let pieces = split_pieces(&span.original_text, &span.offsets, span.query_len)
            .ok_or_else(|| {
                FinderError::StaleMatch(format!("offsets out of range in node {}", span.node))
            })?;

        for piece in pieces {
            let node = match piece {
                Piece::Text(text) => doc.create_text(&text),
                Piece::Mark(text) => {
                    let marker = self.create_marker(doc, &text, list.markers.len(), revealed)?;
                    list.markers.push(marker);
                    marker
                }
            };
            doc.insert_before(parent, node, Some(span.node))?;
        }
        doc.release(span.node)?;
        Ok(())
    }

    fn create_marker(
        &self,
        doc: &mut Document,
        text: &str,
        index: usize,
        revealed: bool,
    ) -> Result<NodeId, DomError> {
        let marker = doc.create_element(&self.config.marker_tag);
        doc.add_class(marker, &self.config.class)?;
        if revealed {
            doc.add_class(marker, &self.config.revealed_class)?;
        }
        doc.set_attribute(marker, &self.config.index_attribute, &index.to_string())?;
        let content = doc.create_text(text);
        doc.append_child(marker, content)?;
        Ok(marker)
    }

    /// Replace every marker by its text. Returns how many were replaced.
    ///
    /// Markers the host already removed are skipped. Safe to call on an
    /// empty list.
    pub fn clear(&self, doc: &mut Document, list: &mut HighlightList) -> usize {
        let mut touched: Vec<NodeId> = Vec::new();
        let mut restored = 0;

        for marker in list.markers.drain(..) {
            let Some(parent) = doc.parent(marker) else {
                continue;
            };
            let content = doc.text_content(marker);
            let text = doc.create_text(&content);
            match doc
                .replace_child(parent, text, marker)
                .and_then(|()| doc.release(marker))
            {
                Ok(()) => {
                    restored += 1;
                    if !touched.contains(&parent) {
                        touched.push(parent);
                    }
                }
                Err(e) => warn!(node = %marker, error = %e, "failed to remove highlight"),
            }
        }
        list.current = None;

        for parent in touched {
            if let Err(e) = doc.normalize(parent) {
                warn!(node = %parent, error = %e, "failed to normalize after clear");
            }
        }
        if restored > 0 {
            debug!(restored, "highlights cleared");
        }
        restored
    }

    /// Make the marker at `index` current and scroll it to the center.
    ///
    /// The index wraps around the list length. No-op on an empty list.
    pub fn set_current(
        &self,
        doc: &mut Document,
        list: &mut HighlightList,
        index: usize,
    ) -> Result<(), FinderError> {
        if list.markers.is_empty() {
            list.current = None;
            return Ok(());
        }
        let index = index % list.markers.len();

        if let Some(previous) = list.current_marker() {
            doc.remove_class(previous, &self.config.current_class)?;
        }
        let marker = list.markers[index];
        doc.add_class(marker, &self.config.current_class)?;
        list.current = Some(index);

        if let Err(e) = doc.scroll_into_view(marker, ScrollBlock::Center) {
            warn!(node = %marker, error = %e, "cannot scroll to highlight");
        }
        Ok(())
    }

    pub fn next(&self, doc: &mut Document, list: &mut HighlightList) -> Result<(), FinderError> {
        if list.markers.is_empty() {
            return Ok(());
        }
        let index = list.current.map_or(0, |i| (i + 1) % list.markers.len());
        self.set_current(doc, list, index)
    }

    pub fn previous(&self, doc: &mut Document, list: &mut HighlightList) -> Result<(), FinderError> {
        let len = list.markers.len();
        if len == 0 {
            return Ok(());
        }
        let index = list.current.map_or(len - 1, |i| (i + len - 1) % len);
        self.set_current(doc, list, index)
    }
}

impl Default for Highlighter {
    fn default() -> Self {
        Self::new(&HighlightConfig::default())
    }
}
