//! Trigger discovery: guess which control would reveal a hidden element.
//!
//! Starting at the hidden element and moving up toward `<body>`, each level
//! collects candidates from the rules in [`TriggerRule`] order, drops the
//! level itself, anything inside it and indicator badges, then scores the
//! rest. The first level with a candidate scoring above zero decides; ties
//! go to the earliest discovered candidate.
//!
//! Lookups made during one search share a [`TriggerScan`], so the document
//! is indexed once and each level is resolved at most once.
//!
//! This is a heuristic. It finds the usual accordion, details, tab and
//! dropdown patterns and can pick the wrong control on unusual markup.

mod rules;
mod scan;
mod score;
mod types;

pub use scan::TriggerScan;
pub use score::score_candidate;
pub use types::{Trigger, TriggerMatch, TriggerRule};

use tracing::trace;

use finder_dom::{Document, NodeId};

#[derive(Debug, Clone)]
pub struct TriggerResolver {
    badge_class: String,
}

impl TriggerResolver {
    /// `badge_class` marks indicator badges, which are never triggers.
    pub fn new(badge_class: &str) -> Self {
        Self {
            badge_class: badge_class.to_string(),
        }
    }

    /// Best trigger for a hidden node; text nodes start at their parent.
    pub fn find_trigger(&self, doc: &Document, hidden: NodeId) -> Option<TriggerMatch> {
        self.find_trigger_in(doc, &mut TriggerScan::new(doc), hidden)
    }

    /// [`find_trigger`](Self::find_trigger) reusing a scan built for the
    /// current search.
    pub fn find_trigger_in(
        &self,
        doc: &Document,
        scan: &mut TriggerScan,
        hidden: NodeId,
    ) -> Option<TriggerMatch> {
        let body = doc.body();
        let mut level = if doc.is_element(hidden) {
            Some(hidden)
        } else {
            doc.parent_element(hidden)
        };

        while let Some(current) = level {
            if current == body || !doc.contains(body, current) {
                break;
            }
            let best = match scan.level(current) {
                Some(known) => known,
                None => {
                    let best = self.best_at_level(doc, scan, current);
                    scan.remember_level(current, best);
                    best
                }
            };
            if let Some(found) = best {
                trace!(level = %current, trigger = %found.element, rule = ?found.rule, score = found.score, "trigger found");
                return Some(found);
            }
            level = doc.parent_element(current);
        }
        None
    }

    /// Candidates proposed for one level, deduplicated, in discovery order.
    pub fn candidates(&self, doc: &Document, level: NodeId) -> Vec<(NodeId, TriggerRule)> {
        self.collect_candidates(doc, &mut TriggerScan::new(doc), level)
    }

    fn collect_candidates(
        &self,
        doc: &Document,
        scan: &mut TriggerScan,
        level: NodeId,
    ) -> Vec<(NodeId, TriggerRule)> {
        let mut raw = Vec::new();
        rules::aria_links(doc, scan, level, &mut raw);
        rules::structural_disclosure(doc, level, &mut raw);
        rules::class_conventions(doc, scan, level, &mut raw);
        rules::sibling_proximity(doc, scan, level, &self.badge_class, &mut raw);
        rules::handler_text(doc, scan, level, &mut raw);

        let mut out: Vec<(NodeId, TriggerRule)> = Vec::with_capacity(raw.len());
        for (candidate, rule) in raw {
            if out.iter().any(|(c, _)| *c == candidate) {
                continue;
            }
            if candidate == level || self.is_badge(doc, candidate) {
                continue;
            }
            // A details' own summary stays eligible for the details level.
            if doc.contains(level, candidate) && rule != TriggerRule::StructuralDisclosure {
                continue;
            }
            out.push((candidate, rule));
        }
        out
    }

    fn best_at_level(
        &self,
        doc: &Document,
        scan: &mut TriggerScan,
        level: NodeId,
    ) -> Option<TriggerMatch> {
        let mut best: Option<TriggerMatch> = None;
        for (element, rule) in self.collect_candidates(doc, scan, level) {
            let score = score_candidate(doc, element, level);
            if score > best.map_or(0, |b| b.score) {
                best = Some(TriggerMatch {
                    element,
                    rule,
                    score,
                    level,
                });
            }
        }
        best
    }

    fn is_badge(&self, doc: &Document, node: NodeId) -> bool {
        std::iter::once(node)
            .chain(doc.ancestors(node))
            .any(|n| doc.has_class(n, &self.badge_class))
    }
}
