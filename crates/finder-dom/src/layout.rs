//! Approximate layout boxes.
//!
//! The host may pin an exact rect per node with [`Document::set_layout_rect`];
//! everything else gets an estimate from computed style and text length.
//! Only sizes are estimated, positions stay at the origin.

use finder_common::Rect;

use crate::document::Document;
use crate::node::{NodeData, NodeId};
use crate::style::Display;

/// Estimated advance of one glyph, in px.
pub const GLYPH_WIDTH: f64 = 8.0;
/// Estimated height of one line box, in px.
pub const LINE_HEIGHT: f64 = 16.0;

fn parse_px(value: &str) -> Option<f64> {
    let value = value.trim();
    let number = value.strip_suffix("px").unwrap_or(value).trim();
    number.parse::<f64>().ok().map(|v| v.max(0.0))
}

/// Intrinsic size of replaced and form elements.
fn intrinsic_size(tag: &str) -> Option<(f64, f64)> {
    match tag {
        "img" => Some((0.0, 0.0)),
        "input" | "select" => Some((150.0, 20.0)),
        "textarea" => Some((200.0, 40.0)),
        "iframe" | "canvas" | "video" | "svg" | "object" | "embed" => Some((300.0, 150.0)),
        "br" => Some((0.0, LINE_HEIGHT)),
        _ => None,
    }
}

impl Document {
    pub fn viewport(&self) -> Rect {
        self.viewport
    }

    pub fn set_viewport(&mut self, viewport: Rect) {
        self.viewport = viewport;
    }

    /// Pin the layout box of a node, overriding the estimate.
    pub fn set_layout_rect(&mut self, id: NodeId, rect: Rect) {
        self.layout_overrides.insert(id, rect);
    }

    pub fn clear_layout_rect(&mut self, id: NodeId) {
        self.layout_overrides.remove(&id);
    }

    /// True if the node generates a box at all.
    ///
    /// A node is not rendered when it or an ancestor computes to
    /// `display: none`, or when it sits inside a closed `<details>` without
    /// being (inside) that details' summary.
    pub fn is_rendered(&self, id: NodeId) -> bool {
        if !self.is_connected(id) {
            return false;
        }
        let mut child = id;
        for current in std::iter::once(id).chain(self.ancestors(id)) {
            if let Some(style) = self.computed_style(current) {
                if style.display == Display::None {
                    return false;
                }
            }
            if current != id
                && self.tag_name(current) == Some("details")
                && !self.has_attribute(current, "open")
                && self.details_summary(current) != Some(child)
            {
                return false;
            }
            child = current;
        }
        true
    }

    /// The summary that toggles a details element: its first `summary`
    /// element child.
    pub fn details_summary(&self, details: NodeId) -> Option<NodeId> {
        self.element_children(details)
            .find(|c| self.tag_name(*c) == Some("summary"))
    }

    /// Border box of a node: the pinned rect, or an estimate.
    pub fn client_rect(&self, id: NodeId) -> Rect {
        if let Some(rect) = self.layout_overrides.get(&id) {
            return *rect;
        }
        if !self.is_rendered(id) {
            return Rect::ZERO;
        }
        let (width, height) = self.estimate_size(id, self.viewport.width);
        Rect::new(0.0, 0.0, width, height)
    }

    /// True if the node's box has a non-zero width or height.
    ///
    /// Same answer as `!client_rect(id).is_empty()`, but stops at the first
    /// evidence of a box instead of estimating the whole subtree.
    pub fn has_rendered_box(&self, id: NodeId) -> bool {
        if let Some(rect) = self.layout_overrides.get(&id) {
            return !rect.is_empty();
        }
        self.is_rendered(id) && self.has_extent(id, self.viewport.width)
    }

    /// Width or height of the estimate would be non-zero. `id` is rendered.
    fn has_extent(&self, id: NodeId, available: f64) -> bool {
        if let Some(rect) = self.layout_overrides.get(&id) {
            return !rect.is_empty();
        }
        let Some(node) = self.get(id) else {
            return false;
        };
        let element = match &node.data {
            NodeData::Text(text) => return !text.trim().is_empty(),
            NodeData::Document => return available > 0.0 || self.viewport.height > 0.0,
            NodeData::Element(element) => element,
        };
        let Some(style) = self.computed_style(id) else {
            return false;
        };
        if style.display == Display::None {
            return false;
        }

        let (explicit_width, explicit_height) = self.explicit_size(id);
        if intrinsic_size(element.tag()).is_some() || element.tag() == "hr" {
            let (w, h) = self.estimate_size(id, available);
            return w > 0.0 || h > 0.0;
        }

        let width = match explicit_width {
            Some(w) => Some(w),
            None if style.display.is_block_level() => Some(available),
            None => None,
        };
        if width.is_some_and(|w| w > 0.0) || explicit_height.is_some_and(|h| h > 0.0) {
            return true;
        }
        match (width, explicit_height) {
            (Some(_), Some(_)) => false,
            // Both sides come from the children: any child with a box will do.
            (None, None) if available > 0.0 => self
                .children(id)
                .iter()
                .any(|c| self.is_rendered(*c) && self.has_extent(*c, available)),
            _ => {
                let (w, h) = self.estimate_size(id, available);
                w > 0.0 || h > 0.0
            }
        }
    }

    /// Width and height fixed by inline style. A zero `max-height` only
    /// counts together with `overflow: hidden`.
    fn explicit_size(&self, id: NodeId) -> (Option<f64>, Option<f64>) {
        let width = self.style_property(id, "width").and_then(|v| parse_px(&v));
        let height = self
            .style_property(id, "height")
            .and_then(|v| parse_px(&v))
            .or_else(|| {
                let clipped = self
                    .style_property(id, "overflow")
                    .is_some_and(|v| v.trim() == "hidden");
                self.style_property(id, "max-height")
                    .and_then(|v| parse_px(&v))
                    .filter(|h| clipped && *h == 0.0)
            });
        (width, height)
    }

    fn estimate_size(&self, id: NodeId, available: f64) -> (f64, f64) {
        if let Some(rect) = self.layout_overrides.get(&id) {
            return (rect.width, rect.height);
        }
        let Some(node) = self.get(id) else {
            return (0.0, 0.0);
        };
        let element = match &node.data {
            NodeData::Text(text) => {
                let chars = text.trim().chars().count();
                if chars == 0 {
                    return (0.0, 0.0);
                }
                return ((chars as f64 * GLYPH_WIDTH).min(available.max(GLYPH_WIDTH)), LINE_HEIGHT);
            }
            NodeData::Document => return (available, self.viewport.height),
            NodeData::Element(element) => element,
        };

        let Some(style) = self.computed_style(id) else {
            return (0.0, 0.0);
        };
        if style.display == Display::None {
            return (0.0, 0.0);
        }

        let (explicit_width, explicit_height) = self.explicit_size(id);

        if let Some((w, h)) = intrinsic_size(element.tag()) {
            let w = explicit_width
                .or_else(|| self.attribute(id, "width").and_then(parse_px))
                .unwrap_or(w);
            let h = explicit_height
                .or_else(|| self.attribute(id, "height").and_then(parse_px))
                .unwrap_or(h);
            return (w, h);
        }
        if element.tag() == "hr" {
            return (explicit_width.unwrap_or(available), explicit_height.unwrap_or(2.0));
        }

        let block = style.display.is_block_level();
        let inner_available = explicit_width.unwrap_or(available);

        // Stack block children, run inline children into one line box.
        let mut stacked = 0.0_f64;
        let mut line_width = 0.0_f64;
        let mut line_height = 0.0_f64;
        let mut widest = 0.0_f64;
        for child in self.children(id) {
            if !self.is_rendered(*child) {
                continue;
            }
            let (w, h) = self.estimate_size(*child, inner_available);
            let child_block = self
                .computed_style(*child)
                .is_some_and(|s| s.display.is_block_level());
            if child_block {
                if line_height > 0.0 {
                    stacked += line_height;
                    widest = widest.max(line_width);
                    line_width = 0.0;
                    line_height = 0.0;
                }
                stacked += h;
                widest = widest.max(w);
            } else {
                line_width += w;
                line_height = line_height.max(h);
            }
        }
        stacked += line_height;
        widest = widest.max(line_width);

        let width = match explicit_width {
            Some(w) => w,
            None if block => available,
            None => widest.min(available),
        };
        (width, explicit_height.unwrap_or(stacked))
    }
}
