use serde::Serialize;

use finder_dom::NodeId;

/// Heuristic that proposed a trigger candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum TriggerRule {
    /// `aria-controls`, `data-target`, `data-bs-target` or `href` naming
    /// the hidden element's id.
    AriaLink,
    /// The `<summary>` of an enclosing `<details>`.
    StructuralDisclosure,
    /// Accordion, tab and dropdown header conventions near the element.
    ClassConvention,
    /// The nearest preceding sibling that looks clickable.
    SiblingProximity,
    /// An inline `onclick` mentioning the id or a show/hide verb.
    HandlerText,
}

/// Best candidate for one hidden element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TriggerMatch {
    pub element: NodeId,
    pub rule: TriggerRule,
    pub score: u32,
    /// Ancestor level at which the candidate was found.
    pub level: NodeId,
}

/// A trigger with the number of hidden occurrences it reveals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Trigger {
    pub element: NodeId,
    pub hidden_count: usize,
    pub rule: TriggerRule,
    pub score: u32,
}

impl Trigger {
    pub fn from_match(found: &TriggerMatch, hidden_count: usize) -> Self {
        Self {
            element: found.element,
            hidden_count,
            rule: found.rule,
            score: found.score,
        }
    }
}
