//! Class names, attributes and colors of the elements the finder inserts.

use serde::{Deserialize, Serialize};

/// Highlight marker naming.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HighlightConfig {
    pub marker_tag: String,
    pub class: String,
    pub current_class: String,
    pub revealed_class: String,
    /// Attribute holding the marker's index in the highlight list.
    pub index_attribute: String,
}

impl Default for HighlightConfig {
    fn default() -> Self {
        Self {
            marker_tag: "span".into(),
            class: "tf-highlight".into(),
            current_class: "tf-current-highlight".into(),
            revealed_class: "tf-revealed-highlight".into(),
            index_attribute: "data-tf-index".into(),
        }
    }
}

/// Hidden-match indicator badge.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct IndicatorConfig {
    pub class: String,
    /// Marker attribute set on annotated triggers.
    pub annotated_attribute: String,
    pub badge_color: String,
    pub text_color: String,
}

impl Default for IndicatorConfig {
    fn default() -> Self {
        Self {
            class: "tf-hidden-indicator".into(),
            annotated_attribute: "data-tf-annotated".into(),
            badge_color: "#ff6600".into(),
            text_color: "#ffffff".into(),
        }
    }
}

/// Visibility classification.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct VisibilityConfig {
    /// Class names that mark a collapsed container.
    pub collapsed_classes: Vec<String>,
}

impl Default for VisibilityConfig {
    fn default() -> Self {
        Self {
            collapsed_classes: vec!["collapsed".into(), "closed".into()],
        }
    }
}
