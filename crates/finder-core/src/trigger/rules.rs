//! Candidate collection, one function per [`TriggerRule`].

use finder_dom::{Document, NodeId};

use super::scan::TriggerScan;
use super::TriggerRule;

/// Verbs that mark an inline click handler as a show/hide toggle.
const HANDLER_VERBS: &[&str] = &["toggle", "show", "expand", "collapse"];

/// Class fragments of elements that usually act as disclosure controls.
const TRIGGER_CLASS_HINTS: &[&str] = &["toggle", "expand", "collapse", "dropdown", "accordion", "tab"];

/// Text fragments of "show more" style controls.
const TRIGGER_TEXT_HINTS: &[&str] = &["show", "more", "expand", "▼", "▲", "►", "▶", "⯈", "⯆"];

/// (a) Elements linking to `level` by id. Pages without an id on the
/// hidden element get no links.
pub(crate) fn aria_links(
    doc: &Document,
    scan: &TriggerScan,
    level: NodeId,
    out: &mut Vec<(NodeId, TriggerRule)>,
) {
    let Some(id) = doc.element_id(level) else {
        return;
    };
    let fragment = format!("#{id}");
    for &el in &scan.links {
        let controls = doc.attribute(el, "aria-controls") == Some(id);
        let targets = ["data-target", "data-bs-target"]
            .iter()
            .any(|attr| doc.attribute(el, attr).is_some_and(|v| v.contains(id)));
        let href = doc
            .attribute(el, "href")
            .is_some_and(|v| v.contains(&fragment));
        if controls || targets || href {
            out.push((el, TriggerRule::AriaLink));
        }
    }
}

/// (b) The summary of a details that is `level` itself or its parent.
pub(crate) fn structural_disclosure(
    doc: &Document,
    level: NodeId,
    out: &mut Vec<(NodeId, TriggerRule)>,
) {
    let holders = std::iter::once(level).chain(doc.parent_element(level));
    for details in holders {
        if doc.tag_name(details) != Some("details") {
            continue;
        }
        if let Some(summary) = doc.details_summary(details) {
            out.push((summary, TriggerRule::StructuralDisclosure));
        }
    }
}

/// (c) Accordion, tab and dropdown headers inside `level`'s parent.
pub(crate) fn class_conventions(
    doc: &Document,
    scan: &mut TriggerScan,
    level: NodeId,
    out: &mut Vec<(NodeId, TriggerRule)>,
) {
    let Some(parent) = doc.parent_element(level) else {
        return;
    };
    let headers = scan.conventions_in(parent, || {
        doc.descendants(parent)
            .into_iter()
            .filter(|el| doc.is_element(*el) && matches_header_convention(doc, parent, *el))
            .collect()
    });
    out.extend(headers.iter().map(|el| (*el, TriggerRule::ClassConvention)));
}

fn matches_header_convention(doc: &Document, scope: NodeId, el: NodeId) -> bool {
    let tag = doc.tag_name(el).unwrap_or("");
    let attr = |name: &str| doc.attribute(el, name);
    let inside_class = |class: &str| {
        doc.ancestors(el)
            .take_while(|a| *a != scope)
            .any(|a| doc.has_class(a, class))
    };

    (tag == "button" && (inside_class("accordion-header") || inside_class("card-header")))
        || (tag == "a" && inside_class("panel-heading"))
        || doc.has_class(el, "collapsible-header")
        || doc.has_class(el, "toggle-header")
        || attr("role") == Some("tab")
        || (attr("role") == Some("button") && attr("aria-expanded").is_some())
        || doc.has_class(el, "dropdown-toggle")
        || doc.has_class(el, "dropdown-button")
        || attr("data-toggle") == Some("dropdown")
        || attr("data-bs-toggle") == Some("dropdown")
        || (tag == "button" && attr("aria-haspopup") == Some("true"))
}

/// (d) Nearest preceding element sibling of `level` that looks clickable.
pub(crate) fn sibling_proximity(
    doc: &Document,
    scan: &mut TriggerScan,
    level: NodeId,
    badge_class: &str,
    out: &mut Vec<(NodeId, TriggerRule)>,
) {
    if doc.parent_element(level).is_none() {
        return;
    }
    let mut sibling = doc.previous_element_sibling(level);
    while let Some(current) = sibling {
        if scan.looks_like(current, || looks_like_trigger(doc, current, badge_class)) {
            out.push((current, TriggerRule::SiblingProximity));
            return;
        }
        sibling = doc.previous_element_sibling(current);
    }
}

/// (e) Elements whose inline `onclick` mentions `level`'s id or a
/// show/hide verb.
pub(crate) fn handler_text(
    doc: &Document,
    scan: &TriggerScan,
    level: NodeId,
    out: &mut Vec<(NodeId, TriggerRule)>,
) {
    let id = doc.element_id(level);
    for &el in &scan.handlers {
        let Some(handler) = doc.attribute(el, "onclick") else {
            continue;
        };
        let mentions_id = id.is_some_and(|id| handler.contains(id));
        if mentions_id || HANDLER_VERBS.iter().any(|v| handler.contains(v)) {
            out.push((el, TriggerRule::HandlerText));
        }
    }
}

/// Tag, class, text and ARIA hints of a clickable disclosure control.
/// Text inside indicator badges does not count.
pub(crate) fn looks_like_trigger(doc: &Document, el: NodeId, badge_class: &str) -> bool {
    if matches!(doc.tag_name(el), Some("button" | "a" | "summary")) {
        return true;
    }

    let class = doc.class_name(el).to_lowercase();
    if TRIGGER_CLASS_HINTS.iter().any(|h| class.contains(h)) {
        return true;
    }

    let text = text_outside_badges(doc, el, badge_class).to_lowercase();
    if TRIGGER_TEXT_HINTS.iter().any(|h| text.contains(h)) {
        return true;
    }

    doc.has_attribute(el, "aria-expanded")
        || doc.has_attribute(el, "aria-controls")
        || matches!(doc.attribute(el, "role"), Some("button" | "tab"))
}

fn text_outside_badges(doc: &Document, el: NodeId, badge_class: &str) -> String {
    let mut out = String::new();
    let mut stack = vec![el];
    while let Some(node) = stack.pop() {
        if let Some(text) = doc.text(node) {
            out.push_str(text);
        } else if !doc.has_class(node, badge_class) {
            stack.extend(doc.children(node).iter().rev().copied());
        }
    }
    out
}
