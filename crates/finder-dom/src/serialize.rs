//! HTML serialization.

use crate::document::Document;
use crate::node::{NodeData, NodeId};

fn is_void_tag(tag: &str) -> bool {
    matches!(
        tag,
        "area"
            | "base"
            | "br"
            | "col"
            | "embed"
            | "hr"
            | "img"
            | "input"
            | "link"
            | "meta"
            | "param"
            | "source"
            | "track"
            | "wbr"
    )
}

fn is_raw_text_tag(tag: &str) -> bool {
    matches!(tag, "script" | "style" | "textarea" | "title")
}

fn escape_text(text: &str, out: &mut String) {
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '\u{00A0}' => out.push_str("&nbsp;"),
            _ => out.push(ch),
        }
    }
}

fn escape_attr(value: &str, out: &mut String) {
    for ch in value.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            '\u{00A0}' => out.push_str("&nbsp;"),
            _ => out.push(ch),
        }
    }
}

impl Document {
    /// Serialize the whole document, with a doctype.
    pub fn to_html(&self) -> String {
        let mut out = String::from("<!DOCTYPE html>");
        self.write_node(self.document_element(), &mut out);
        out
    }

    /// Markup of the node itself.
    pub fn outer_html(&self, id: NodeId) -> String {
        let mut out = String::new();
        self.write_node(id, &mut out);
        out
    }

    /// Markup of the node's children.
    pub fn inner_html(&self, id: NodeId) -> String {
        let mut out = String::new();
        let raw = self.tag_name(id).is_some_and(|t| matches!(t, "script" | "style"));
        for child in self.children(id) {
            match self.text(*child) {
                Some(text) if raw => out.push_str(text),
                _ => self.write_node(*child, &mut out),
            }
        }
        out
    }

    fn write_node(&self, id: NodeId, out: &mut String) {
        let Some(node) = self.get(id) else {
            return;
        };
        match &node.data {
            NodeData::Document => {
                for child in &node.children {
                    self.write_node(*child, out);
                }
            }
            NodeData::Text(text) => escape_text(text, out),
            NodeData::Element(element) => {
                out.push('<');
                out.push_str(element.tag());
                for (name, value) in element.attrs() {
                    out.push(' ');
                    out.push_str(name);
                    if !value.is_empty() {
                        out.push_str("=\"");
                        escape_attr(value, out);
                        out.push('"');
                    }
                }
                out.push('>');
                if is_void_tag(element.tag()) {
                    return;
                }
                if is_raw_text_tag(element.tag()) {
                    out.push_str(&self.inner_html(id));
                } else {
                    for child in &node.children {
                        self.write_node(*child, out);
                    }
                }
                out.push_str("</");
                out.push_str(element.tag());
                out.push('>');
            }
        }
    }
}
