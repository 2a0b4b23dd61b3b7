//! Lookup tables shared by every trigger lookup of one search.
//!
//! Built with one walk of the document and filled in lazily as levels are
//! resolved. Only valid while the document stays unchanged, so a scan never
//! outlives the search that built it.

use std::collections::HashMap;

use finder_dom::{Document, NodeId};

use super::TriggerMatch;

/// Attributes that can point at another element by id.
pub(crate) const TARGET_ATTRIBUTES: &[&str] = &["aria-controls", "data-target", "data-bs-target"];

#[derive(Debug, Default)]
pub struct TriggerScan {
    /// Elements with an id-referencing attribute or a fragment `href`.
    pub(crate) links: Vec<NodeId>,
    /// Elements with an inline `onclick` handler.
    pub(crate) handlers: Vec<NodeId>,
    /// Header-convention matches per scope element.
    conventions: HashMap<NodeId, Vec<NodeId>>,
    lookalikes: HashMap<NodeId, bool>,
    /// Best candidate per level, `None` when the level had none.
    levels: HashMap<NodeId, Option<TriggerMatch>>,
}

impl TriggerScan {
    pub fn new(doc: &Document) -> Self {
        let mut scan = Self::default();
        for el in doc.elements() {
            let targets = TARGET_ATTRIBUTES.iter().any(|a| doc.has_attribute(el, a));
            let fragment = doc.attribute(el, "href").is_some_and(|v| v.contains('#'));
            if targets || fragment {
                scan.links.push(el);
            }
            if doc.has_attribute(el, "onclick") {
                scan.handlers.push(el);
            }
        }
        scan
    }

    pub(crate) fn conventions_in(
        &mut self,
        scope: NodeId,
        collect: impl FnOnce() -> Vec<NodeId>,
    ) -> &[NodeId] {
        self.conventions.entry(scope).or_insert_with(collect)
    }

    pub(crate) fn looks_like(&mut self, el: NodeId, check: impl FnOnce() -> bool) -> bool {
        *self.lookalikes.entry(el).or_insert_with(check)
    }

    pub(crate) fn level(&self, level: NodeId) -> Option<Option<TriggerMatch>> {
        self.levels.get(&level).copied()
    }

    pub(crate) fn remember_level(&mut self, level: NodeId, found: Option<TriggerMatch>) {
        self.levels.insert(level, found);
    }

    pub fn resolved_levels(&self) -> usize {
        self.levels.len()
    }
}
