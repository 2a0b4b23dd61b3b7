//! Computed style: UA defaults by tag, the `hidden` attribute and the
//! inline `style` attribute. There is no stylesheet cascade.

use serde::{Deserialize, Serialize};

use crate::document::Document;
use crate::node::NodeId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Display {
    None,
    Block,
    Inline,
    InlineBlock,
    Flex,
    Grid,
    ListItem,
    Table,
    Contents,
}

impl Display {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "none" => Some(Self::None),
            "block" | "flow-root" => Some(Self::Block),
            "inline" => Some(Self::Inline),
            "inline-block" | "inline-flex" | "inline-grid" => Some(Self::InlineBlock),
            "flex" => Some(Self::Flex),
            "grid" => Some(Self::Grid),
            "list-item" => Some(Self::ListItem),
            "table" | "table-row" | "table-cell" | "table-row-group" => Some(Self::Table),
            "contents" => Some(Self::Contents),
            _ => None,
        }
    }

    /// Block-level boxes span the containing width.
    pub fn is_block_level(self) -> bool {
        matches!(
            self,
            Self::Block | Self::Flex | Self::Grid | Self::ListItem | Self::Table
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    Visible,
    Hidden,
    Collapse,
}

impl Visibility {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "visible" => Some(Self::Visible),
            "hidden" => Some(Self::Hidden),
            "collapse" => Some(Self::Collapse),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Position {
    Static,
    Relative,
    Absolute,
    Fixed,
    Sticky,
}

impl Position {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "static" => Some(Self::Static),
            "relative" => Some(Self::Relative),
            "absolute" => Some(Self::Absolute),
            "fixed" => Some(Self::Fixed),
            "sticky" => Some(Self::Sticky),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ComputedStyle {
    pub display: Display,
    pub visibility: Visibility,
    pub opacity: f64,
    pub position: Position,
}

const DISPLAY_NONE_TAGS: &[&str] = &[
    "head", "script", "style", "noscript", "template", "title", "meta", "link", "base",
];

const BLOCK_TAGS: &[&str] = &[
    "html", "body", "div", "p", "h1", "h2", "h3", "h4", "h5", "h6", "ul", "ol", "section",
    "article", "nav", "aside", "header", "footer", "main", "details", "summary", "form",
    "fieldset", "blockquote", "pre", "dl", "dt", "dd", "figure", "figcaption", "address", "hr",
    "menu", "dialog",
];

/// Default `display` for a tag, before attributes and inline style.
pub fn default_display(tag: &str) -> Display {
    if DISPLAY_NONE_TAGS.contains(&tag) {
        Display::None
    } else if tag == "li" {
        Display::ListItem
    } else if matches!(tag, "table" | "tr" | "td" | "th" | "tbody" | "thead" | "tfoot") {
        Display::Table
    } else if BLOCK_TAGS.contains(&tag) {
        Display::Block
    } else {
        Display::Inline
    }
}

/// Split a `style` attribute into lowercase property names and values.
/// `!important` is dropped; malformed declarations are skipped.
pub fn parse_declarations(style: &str) -> Vec<(String, String)> {
    style
        .split(';')
        .filter_map(|decl| {
            let (name, value) = decl.split_once(':')?;
            let name = name.trim().to_ascii_lowercase();
            let value = value.trim();
            let value = value
                .strip_suffix("!important")
                .map(str::trim_end)
                .unwrap_or(value);
            if name.is_empty() || value.is_empty() {
                None
            } else {
                Some((name, value.to_string()))
            }
        })
        .collect()
}

pub fn serialize_declarations(declarations: &[(String, String)]) -> String {
    declarations
        .iter()
        .map(|(name, value)| format!("{name}: {value};"))
        .collect::<Vec<_>>()
        .join(" ")
}

fn parse_opacity(value: &str) -> Option<f64> {
    let value = value.trim();
    let parsed = match value.strip_suffix('%') {
        Some(pct) => pct.trim().parse::<f64>().ok()? / 100.0,
        None => value.parse::<f64>().ok()?,
    };
    Some(parsed.clamp(0.0, 1.0))
}

impl Document {
    /// Computed style of an element; `None` for text and document nodes.
    ///
    /// `visibility` inherits from the parent element; the other properties
    /// do not.
    pub fn computed_style(&self, id: NodeId) -> Option<ComputedStyle> {
        let element = self.element(id)?;
        let declarations = parse_declarations(element.attr("style").unwrap_or(""));
        let inline = |prop: &str| {
            declarations
                .iter()
                .rev()
                .find(|(name, _)| name == prop)
                .map(|(_, value)| value.as_str())
        };

        let mut display = default_display(element.tag());
        if element.attr("hidden").is_some() {
            display = Display::None;
        }
        if let Some(value) = inline("display").and_then(Display::parse) {
            display = value;
        }

        let visibility = match inline("visibility").and_then(Visibility::parse) {
            Some(value) => value,
            None => self
                .parent_element(id)
                .and_then(|p| self.computed_style(p))
                .map(|s| s.visibility)
                .unwrap_or(Visibility::Visible),
        };

        let opacity = inline("opacity").and_then(parse_opacity).unwrap_or(1.0);
        let position = inline("position")
            .and_then(Position::parse)
            .unwrap_or(Position::Static);

        Some(ComputedStyle {
            display,
            visibility,
            opacity,
            position,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse_html;

    fn first(doc: &Document, tag: &str) -> NodeId {
        doc.elements()
            .into_iter()
            .find(|n| doc.tag_name(*n) == Some(tag))
            .unwrap()
    }

    #[test]
    fn parse_declarations_handles_spacing_and_important() {
        let decls = parse_declarations(" Display : none !important; color:red;;bogus");
        assert_eq!(
            decls,
            vec![
                ("display".to_string(), "none".to_string()),
                ("color".to_string(), "red".to_string())
            ]
        );
    }

    #[test]
    fn serialize_declarations_round_trips() {
        let decls = vec![("position".to_string(), "relative".to_string())];
        let css = serialize_declarations(&decls);
        assert_eq!(css, "position: relative;");
        assert_eq!(parse_declarations(&css), decls);
    }

    #[test]
    fn default_display_by_tag() {
        assert_eq!(default_display("script"), Display::None);
        assert_eq!(default_display("div"), Display::Block);
        assert_eq!(default_display("li"), Display::ListItem);
        assert_eq!(default_display("span"), Display::Inline);
    }

    #[test]
    fn hidden_attribute_maps_to_display_none() {
        let doc = parse_html("<div hidden>x</div>").unwrap();
        let div = first(&doc, "div");
        assert_eq!(doc.computed_style(div).unwrap().display, Display::None);
    }

    #[test]
    fn inline_display_overrides_defaults() {
        let doc = parse_html(r#"<span style="display: block">x</span>"#).unwrap();
        let span = first(&doc, "span");
        assert_eq!(doc.computed_style(span).unwrap().display, Display::Block);
    }

    #[test]
    fn visibility_is_inherited() {
        let doc = parse_html(r#"<div style="visibility:hidden"><p>x</p></div>"#).unwrap();
        let p = first(&doc, "p");
        assert_eq!(doc.computed_style(p).unwrap().visibility, Visibility::Hidden);
    }

    #[test]
    fn opacity_accepts_percentages() {
        let doc = parse_html(r#"<div style="opacity: 50%">x</div>"#).unwrap();
        let div = first(&doc, "div");
        assert_eq!(doc.computed_style(div).unwrap().opacity, 0.5);
    }

    #[test]
    fn text_nodes_have_no_computed_style() {
        let doc = parse_html("<p>x</p>").unwrap();
        let p = first(&doc, "p");
        let text = doc.children(p)[0];
        assert!(doc.computed_style(text).is_none());
    }
}
