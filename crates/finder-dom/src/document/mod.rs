//! The document arena: node storage, lookups and traversal.
//!
//! Mutation lives in `tree.rs`, attribute/class/style helpers in `attrs.rs`.

mod attrs;
mod tree;


use std::collections::HashMap;
use std::fmt;

use finder_common::{DomError, Rect, ScrollBlock};

use crate::events::{Listener, PageBehavior};
use crate::node::{Element, Node, NodeData, NodeId};

/// Default viewport used by the layout estimate.
pub const DEFAULT_VIEWPORT: Rect = Rect {
    x: 0.0,
    y: 0.0,
    width: 1280.0,
    height: 800.0,
};

/// One arena slot. A released slot keeps its generation so the next node
/// stored there gets a fresh one.
#[derive(Debug, Clone)]
pub(crate) struct Slot {
    pub(crate) generation: u32,
    pub(crate) node: Option<Node>,
}

/// A live, mutable page.
///
/// A fresh document always has the `html`/`head`/`body` skeleton, so
/// [`Document::body`] never fails.
pub struct Document {
    pub(crate) nodes: Vec<Slot>,
    pub(crate) free: Vec<usize>,
    pub(crate) root: NodeId,
    pub(crate) html: NodeId,
    pub(crate) head: NodeId,
    pub(crate) body: NodeId,
    pub(crate) viewport: Rect,
    pub(crate) layout_overrides: HashMap<NodeId, Rect>,
    pub(crate) listeners: Vec<Listener>,
    pub(crate) next_listener: u64,
    pub(crate) behaviors: HashMap<NodeId, Vec<PageBehavior>>,
    pub(crate) last_scroll: Option<(NodeId, ScrollBlock)>,
}

impl Document {
    pub fn new() -> Self {
        let root = NodeId::new(0, 0);
        let mut doc = Self {
            nodes: vec![Slot {
                generation: 0,
                node: Some(Node::new(NodeData::Document)),
            }],
            free: Vec::new(),
            root,
            html: root,
            head: root,
            body: root,
            viewport: DEFAULT_VIEWPORT,
            layout_overrides: HashMap::new(),
            listeners: Vec::new(),
            next_listener: 1,
            behaviors: HashMap::new(),
            last_scroll: None,
        };
        let html = doc.push_node(NodeData::Element(Element::new("html")), Some(root));
        let head = doc.push_node(NodeData::Element(Element::new("head")), Some(html));
        let body = doc.push_node(NodeData::Element(Element::new("body")), Some(html));
        doc.html = html;
        doc.head = head;
        doc.body = body;
        doc
    }

    /// Store a node, reusing a released slot when there is one.
    pub(crate) fn push_node(&mut self, data: NodeData, parent: Option<NodeId>) -> NodeId {
        let mut node = Node::new(data);
        node.parent = parent;
        let id = match self.free.pop() {
            Some(index) => {
                let slot = &mut self.nodes[index];
                slot.node = Some(node);
                NodeId::new(index, slot.generation)
            }
            None => {
                self.nodes.push(Slot {
                    generation: 0,
                    node: Some(node),
                });
                NodeId::new(self.nodes.len() - 1, 0)
            }
        };
        if let Some(parent) = parent.and_then(|p| self.get_mut(p)) {
            parent.children.push(id);
        }
        id
    }

    // -----------------------------------------------------------------------
    // Well-known nodes
    // -----------------------------------------------------------------------

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn document_element(&self) -> NodeId {
        self.html
    }

    pub fn head(&self) -> NodeId {
        self.head
    }

    pub fn body(&self) -> NodeId {
        self.body
    }

    // -----------------------------------------------------------------------
    // Node access
    // -----------------------------------------------------------------------

    /// The node behind a handle, `None` once it has been released.
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes
            .get(id.index)
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.node.as_ref())
    }

    fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes
            .get_mut(id.index)
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.node.as_mut())
    }

    pub fn node(&self, id: NodeId) -> Result<&Node, DomError> {
        self.get(id).ok_or(DomError::UnknownNode(id.index))
    }

    pub(crate) fn node_mut(&mut self, id: NodeId) -> Result<&mut Node, DomError> {
        self.get_mut(id).ok_or(DomError::UnknownNode(id.index))
    }

    pub fn element(&self, id: NodeId) -> Option<&Element> {
        self.get(id).and_then(Node::as_element)
    }

    pub(crate) fn element_mut(&mut self, id: NodeId) -> Result<&mut Element, DomError> {
        match &mut self.node_mut(id)?.data {
            NodeData::Element(element) => Ok(element),
            _ => Err(DomError::NotAnElement(id.index)),
        }
    }

    pub fn is_element(&self, id: NodeId) -> bool {
        self.element(id).is_some()
    }

    pub fn is_text(&self, id: NodeId) -> bool {
        self.text(id).is_some()
    }

    /// Lowercase tag name, `None` for text and document nodes.
    pub fn tag_name(&self, id: NodeId) -> Option<&str> {
        self.element(id).map(Element::tag)
    }

    /// Data of a text node.
    pub fn text(&self, id: NodeId) -> Option<&str> {
        self.get(id).and_then(Node::as_text)
    }

    /// Concatenated text of the node and all its descendants.
    pub fn text_content(&self, id: NodeId) -> String {
        let mut out = String::new();
        self.collect_text(id, &mut out);
        out
    }

    fn collect_text(&self, id: NodeId, out: &mut String) {
        let Some(node) = self.get(id) else {
            return;
        };
        match &node.data {
            NodeData::Text(text) => out.push_str(text),
            _ => {
                for child in &node.children {
                    self.collect_text(*child, out);
                }
            }
        }
    }

    // -----------------------------------------------------------------------
    // Tree navigation
    // -----------------------------------------------------------------------

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|n| n.parent)
    }

    /// Parent if it is an element (the document node is skipped).
    pub fn parent_element(&self, id: NodeId) -> Option<NodeId> {
        self.parent(id).filter(|p| self.is_element(*p))
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.get(id).map(|n| n.children.as_slice()).unwrap_or(&[])
    }

    pub fn element_children(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.children(id)
            .iter()
            .copied()
            .filter(|c| self.is_element(*c))
    }

    fn sibling_index(&self, id: NodeId) -> Option<(NodeId, usize)> {
        let parent = self.parent(id)?;
        let index = self.children(parent).iter().position(|c| *c == id)?;
        Some((parent, index))
    }

    pub fn previous_sibling(&self, id: NodeId) -> Option<NodeId> {
        let (parent, index) = self.sibling_index(id)?;
        index
            .checked_sub(1)
            .and_then(|i| self.children(parent).get(i).copied())
    }

    pub fn next_sibling(&self, id: NodeId) -> Option<NodeId> {
        let (parent, index) = self.sibling_index(id)?;
        self.children(parent).get(index + 1).copied()
    }

    pub fn previous_element_sibling(&self, id: NodeId) -> Option<NodeId> {
        let mut cursor = self.previous_sibling(id);
        while let Some(current) = cursor {
            if self.is_element(current) {
                return Some(current);
            }
            cursor = self.previous_sibling(current);
        }
        None
    }

    pub fn next_element_sibling(&self, id: NodeId) -> Option<NodeId> {
        let mut cursor = self.next_sibling(id);
        while let Some(current) = cursor {
            if self.is_element(current) {
                return Some(current);
            }
            cursor = self.next_sibling(current);
        }
        None
    }

    /// Ancestors from the parent upward, ending with the document node.
    pub fn ancestors(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        std::iter::successors(self.parent(id), move |n| self.parent(*n))
    }

    /// True if `node` is `ancestor` or lies inside it.
    pub fn contains(&self, ancestor: NodeId, node: NodeId) -> bool {
        node == ancestor || self.ancestors(node).any(|a| a == ancestor)
    }

    /// True if the node is reachable from the document root.
    pub fn is_connected(&self, id: NodeId) -> bool {
        id == self.root || self.ancestors(id).any(|a| a == self.root)
    }

    /// Descendants of `id` in document (pre-)order, excluding `id` itself.
    pub fn descendants(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = self.children(id).iter().rev().copied().collect();
        while let Some(current) = stack.pop() {
            out.push(current);
            stack.extend(self.children(current).iter().rev().copied());
        }
        out
    }

    /// Every connected element in document order.
    pub fn elements(&self) -> Vec<NodeId> {
        self.descendants(self.root)
            .into_iter()
            .filter(|n| self.is_element(*n))
            .collect()
    }

    /// First connected element whose `id` attribute equals `id`.
    pub fn element_by_id(&self, id: &str) -> Option<NodeId> {
        if id.is_empty() {
            return None;
        }
        self.elements()
            .into_iter()
            .find(|n| self.attribute(*n, "id") == Some(id))
    }

    /// Nearest inclusive ancestor element with the given tag.
    pub fn closest_tag(&self, id: NodeId, tag: &str) -> Option<NodeId> {
        std::iter::once(id)
            .chain(self.ancestors(id))
            .find(|n| self.tag_name(*n) == Some(tag))
    }

    // -----------------------------------------------------------------------
    // Scrolling
    // -----------------------------------------------------------------------

    /// Record a request to bring `id` into view. Only the latest request
    /// is kept.
    pub fn scroll_into_view(&mut self, id: NodeId, block: ScrollBlock) -> Result<(), DomError> {
        if !self.is_connected(id) {
            return Err(DomError::Detached(id.index));
        }
        self.last_scroll = Some((id, block));
        tracing::trace!(node = %id, ?block, "scroll into view");
        Ok(())
    }

    pub fn last_scroll(&self) -> Option<(NodeId, ScrollBlock)> {
        self.last_scroll
    }

    /// Nodes currently stored, attached or not. Released nodes do not count.
    pub fn node_count(&self) -> usize {
        self.nodes.len() - self.free.len()
    }

    /// Arena slots allocated so far, including released ones awaiting reuse.
    pub fn slot_count(&self) -> usize {
        self.nodes.len()
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Document")
            .field("nodes", &self.node_count())
            .field("free", &self.free.len())
            .field("listeners", &self.listeners.len())
            .field("behaviors", &self.behaviors.len())
            .finish()
    }
}
