//! Candidate scoring.

use finder_dom::{Document, NodeId};

pub const ARIA_CONTROLS_SCORE: u32 = 100;
pub const TARGET_LINK_SCORE: u32 = 80;
pub const SHARED_PARENT_SCORE: u32 = 50;
pub const SUMMARY_TAG_SCORE: u32 = 40;
pub const PRECEDING_SIBLING_SCORE: u32 = 30;
pub const BUTTON_TAG_SCORE: u32 = 20;
pub const CLASS_HINT_SCORE: u32 = 15;

const SCORED_CLASS_HINTS: &[&str] = &["toggle", "expand", "dropdown"];

/// Score of `candidate` as the control revealing `level`.
pub fn score_candidate(doc: &Document, candidate: NodeId, level: NodeId) -> u32 {
    let mut score = 0;

    if doc.parent(candidate).is_some() && doc.parent(candidate) == doc.parent(level) {
        score += SHARED_PARENT_SCORE;
    }
    if doc.next_element_sibling(candidate) == Some(level) {
        score += PRECEDING_SIBLING_SCORE;
    }

    if let Some(id) = doc.element_id(level) {
        if doc.attribute(candidate, "aria-controls") == Some(id) {
            score += ARIA_CONTROLS_SCORE;
        }
        let data_target = ["data-target", "data-bs-target"]
            .iter()
            .filter_map(|attr| doc.attribute(candidate, attr))
            .any(|v| v.contains(id));
        let href = doc
            .attribute(candidate, "href")
            .is_some_and(|v| v.contains(&format!("#{id}")));
        if data_target || href {
            score += TARGET_LINK_SCORE;
        }
    }

    match doc.tag_name(candidate) {
        Some("button") => score += BUTTON_TAG_SCORE,
        Some("summary") => score += SUMMARY_TAG_SCORE,
        _ => {}
    }

    let class = doc.class_name(candidate).to_lowercase();
    for hint in SCORED_CLASS_HINTS {
        if class.contains(hint) {
            score += CLASS_HINT_SCORE;
        }
    }
    score
}
