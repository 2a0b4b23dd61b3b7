//! Visibility classification.
//!
//! A node is hidden when any element from itself (or its parent, for text)
//! up to the document element is hidden by style, attribute, ARIA state,
//! collapsed-class convention or a zero-sized box. A text node whose own box
//! is empty is hidden too. Nothing is cached and the document is not touched.

use serde::Serialize;

use finder_config::VisibilityConfig;
use finder_dom::{Display, Document, NodeId, Visibility};

/// First reason found for a node being hidden, innermost element first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "reason", rename_all = "camelCase")]
pub enum HiddenReason {
    Detached,
    DisplayNone { element: NodeId },
    VisibilityHidden { element: NodeId },
    ZeroOpacity { element: NodeId },
    HiddenAttribute { element: NodeId },
    AriaHidden { element: NodeId },
    AriaCollapsed { element: NodeId },
    CollapsedClass { element: NodeId, class: String },
    ZeroSize { element: NodeId },
    /// The text itself lays out to nothing, e.g. loose text in a closed
    /// `<details>`.
    NoTextBox,
}

#[derive(Debug, Clone)]
pub struct VisibilityClassifier {
    collapsed_classes: Vec<String>,
}

impl VisibilityClassifier {
    pub fn new(config: &VisibilityConfig) -> Self {
        Self {
            collapsed_classes: config.collapsed_classes.clone(),
        }
    }

    pub fn is_visible(&self, doc: &Document, node: NodeId) -> bool {
        self.hidden_reason(doc, node).is_none()
    }

    pub fn hidden_reason(&self, doc: &Document, node: NodeId) -> Option<HiddenReason> {
        if !doc.is_connected(node) {
            return Some(HiddenReason::Detached);
        }

        let start = if doc.is_element(node) {
            Some(node)
        } else {
            doc.parent_element(node)
        };
        let chain = start
            .into_iter()
            .chain(start.into_iter().flat_map(|s| doc.ancestors(s)))
            .filter(|n| doc.is_element(*n));

        for element in chain {
            if let Some(reason) = self.element_reason(doc, element) {
                return Some(reason);
            }
        }

        if doc.is_text(node) && !doc.has_rendered_box(node) {
            return Some(HiddenReason::NoTextBox);
        }
        None
    }

    fn element_reason(&self, doc: &Document, element: NodeId) -> Option<HiddenReason> {
        let style = doc.computed_style(element)?;

        if style.display == Display::None {
            return Some(HiddenReason::DisplayNone { element });
        }
        if style.visibility != Visibility::Visible {
            return Some(HiddenReason::VisibilityHidden { element });
        }
        if style.opacity == 0.0 {
            return Some(HiddenReason::ZeroOpacity { element });
        }
        if doc.has_attribute(element, "hidden") {
            return Some(HiddenReason::HiddenAttribute { element });
        }
        if doc.attribute(element, "aria-hidden") == Some("true") {
            return Some(HiddenReason::AriaHidden { element });
        }
        if doc.attribute(element, "aria-expanded") == Some("false") {
            return Some(HiddenReason::AriaCollapsed { element });
        }
        if let Some(class) = self
            .collapsed_classes
            .iter()
            .find(|c| doc.has_class(element, c))
        {
            return Some(HiddenReason::CollapsedClass {
                element,
                class: class.clone(),
            });
        }
        if !doc.has_rendered_box(element) {
            return Some(HiddenReason::ZeroSize { element });
        }
        None
    }
}

impl Default for VisibilityClassifier {
    fn default() -> Self {
        Self::new(&VisibilityConfig::default())
    }
}
