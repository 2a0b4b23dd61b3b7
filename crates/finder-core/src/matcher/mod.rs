//! Matching: find the query in every searchable text node and split the
//! occurrences into visible and hidden ones.
//!
//! Each text node with at least one occurrence is classified once. The
//! parent element of a hidden node goes to the trigger resolver and the
//! hidden occurrence count accumulates on the trigger it resolves to.
//! All trigger lookups of one search share a [`TriggerScan`], built on the
//! first hidden match. Matching never mutates the document.

mod find;
mod text_walk;
mod types;

pub use find::find_offsets;
pub use text_walk::searchable_text_nodes;
pub use types::{MatchSet, TextSpan};

use tracing::debug;

use finder_config::FinderConfig;
use finder_dom::{Document, NodeId};

use crate::options::SearchOptions;
use crate::trigger::{Trigger, TriggerResolver, TriggerScan};
use crate::visibility::VisibilityClassifier;

#[derive(Debug, Clone)]
pub struct Matcher {
    classifier: VisibilityClassifier,
    resolver: TriggerResolver,
    /// Classes of inserted markup (markers, badges) whose text is ignored.
    skip_classes: Vec<String>,
}

impl Matcher {
    pub fn new(config: &FinderConfig) -> Self {
        Self {
            classifier: VisibilityClassifier::new(&config.visibility),
            resolver: TriggerResolver::new(&config.indicator.class),
            skip_classes: vec![config.highlight.class.clone(), config.indicator.class.clone()],
        }
    }

    pub fn classifier(&self) -> &VisibilityClassifier {
        &self.classifier
    }

    pub fn perform_search(&self, doc: &Document, query: &str, options: SearchOptions) -> MatchSet {
        let mut set = MatchSet::default();
        if query.is_empty() {
            return set;
        }
        let query_len = query.chars().count();
        let mut scan: Option<TriggerScan> = None;

        for node in searchable_text_nodes(doc, doc.body(), &self.skip_classes) {
            let Some(text) = doc.text(node) else {
                continue;
            };
            let offsets = find_offsets(text, query, options);
            if offsets.is_empty() {
                continue;
            }
            let span = TextSpan {
                node,
                offsets,
                original_text: text.to_string(),
                query_len,
            };

            if self.classifier.is_visible(doc, node) {
                set.visible.push(span);
            } else {
                let scan = scan.get_or_insert_with(|| TriggerScan::new(doc));
                self.record_trigger(doc, scan, node, span.match_count(), &mut set.expandable);
                set.hidden.push(span);
            }
        }

        debug!(
            query,
            visible = set.visible_count(),
            hidden = set.hidden_count(),
            triggers = set.expandable.len(),
            "search complete"
        );
        set
    }

    fn record_trigger(
        &self,
        doc: &Document,
        scan: &mut TriggerScan,
        node: NodeId,
        count: usize,
        triggers: &mut Vec<Trigger>,
    ) {
        let Some(parent) = doc.parent_element(node) else {
            return;
        };
        let Some(found) = self.resolver.find_trigger_in(doc, scan, parent) else {
            return;
        };
        match triggers.iter_mut().find(|t| t.element == found.element) {
            Some(existing) => existing.hidden_count += count,
            None => triggers.push(Trigger::from_match(&found, count)),
        }
    }
}

impl Default for Matcher {
    fn default() -> Self {
        Self::new(&FinderConfig::default())
    }
}
