//! Tree mutation: node creation, insertion, removal and normalization.

use finder_common::DomError;

use super::Document;
use crate::node::{Element, NodeData, NodeId};

impl Document {
    /// Create a detached element.
    pub fn create_element(&mut self, tag: &str) -> NodeId {
        self.push_node(NodeData::Element(Element::new(tag)), None)
    }

    /// Create a detached text node.
    pub fn create_text(&mut self, text: &str) -> NodeId {
        self.push_node(NodeData::Text(text.to_string()), None)
    }

    /// Replace the data of a text node.
    pub fn set_text(&mut self, id: NodeId, text: &str) -> Result<(), DomError> {
        match &mut self.node_mut(id)?.data {
            NodeData::Text(data) => {
                *data = text.to_string();
                Ok(())
            }
            _ => Err(DomError::NotText(id.index())),
        }
    }

    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> Result<(), DomError> {
        self.insert_before(parent, child, None)
    }

    /// Insert `child` into `parent` before `reference` (or at the end).
    ///
    /// The child is detached from its current parent first.
    pub fn insert_before(
        &mut self,
        parent: NodeId,
        child: NodeId,
        reference: Option<NodeId>,
    ) -> Result<(), DomError> {
        self.check_insertable(parent, child)?;
        if let Some(reference) = reference {
            if self.parent(reference) != Some(parent) {
                return Err(DomError::NotAChild {
                    parent: parent.index(),
                    child: reference.index(),
                });
            }
            if reference == child {
                return Ok(());
            }
        }

        self.detach(child)?;

        let index = match reference {
            Some(reference) => self
                .children(parent)
                .iter()
                .position(|c| *c == reference)
                .ok_or(DomError::NotAChild {
                    parent: parent.index(),
                    child: reference.index(),
                })?,
            None => self.children(parent).len(),
        };
        self.node_mut(parent)?.children.insert(index, child);
        self.node_mut(child)?.parent = Some(parent);
        Ok(())
    }

    pub fn remove_child(&mut self, parent: NodeId, child: NodeId) -> Result<(), DomError> {
        if self.parent(child) != Some(parent) {
            return Err(DomError::NotAChild {
                parent: parent.index(),
                child: child.index(),
            });
        }
        self.detach(child)
    }

    /// Detach a node from its parent. A no-op for nodes without a parent.
    pub fn detach(&mut self, id: NodeId) -> Result<(), DomError> {
        let Some(parent) = self.node(id)?.parent else {
            return Ok(());
        };
        self.node_mut(parent)?.children.retain(|c| *c != id);
        self.node_mut(id)?.parent = None;
        Ok(())
    }

    /// Put `new_child` in the place of `old_child`.
    pub fn replace_child(
        &mut self,
        parent: NodeId,
        new_child: NodeId,
        old_child: NodeId,
    ) -> Result<(), DomError> {
        if new_child == old_child {
            return Ok(());
        }
        if self.parent(old_child) != Some(parent) {
            return Err(DomError::NotAChild {
                parent: parent.index(),
                child: old_child.index(),
            });
        }
        self.insert_before(parent, new_child, Some(old_child))?;
        self.detach(old_child)
    }

    /// Detach a node and free it together with its subtree.
    ///
    /// Handles to released nodes stop resolving, and their listeners,
    /// behaviors and pinned rects go with them. The document skeleton
    /// cannot be released.
    pub fn release(&mut self, id: NodeId) -> Result<(), DomError> {
        self.node(id)?;
        let mut doomed = self.descendants(id);
        doomed.push(id);
        if let Some(kept) = doomed
            .iter()
            .find(|n| [self.root, self.html, self.head, self.body].contains(*n))
        {
            return Err(DomError::HierarchyRequest(format!(
                "{kept} is part of the document skeleton"
            )));
        }
        self.detach(id)?;
        for node in doomed {
            self.free_slot(node);
        }
        Ok(())
    }

    pub(crate) fn free_slot(&mut self, id: NodeId) {
        let Some(slot) = self
            .nodes
            .get_mut(id.index)
            .filter(|slot| slot.generation == id.generation && slot.node.is_some())
        else {
            return;
        };
        slot.node = None;
        slot.generation = slot.generation.wrapping_add(1);
        self.free.push(id.index);
        self.layout_overrides.remove(&id);
        self.behaviors.remove(&id);
        self.listeners.retain(|l| l.target != id);
        if self.last_scroll.is_some_and(|(node, _)| node == id) {
            self.last_scroll = None;
        }
    }

    /// Merge adjacent text children and drop empty text nodes, recursively.
    ///
    /// Merged and dropped text nodes are released.
    pub fn normalize(&mut self, id: NodeId) -> Result<(), DomError> {
        let children = self.node(id)?.children.clone();
        let mut kept: Vec<NodeId> = Vec::with_capacity(children.len());

        for child in children {
            let text = self.text(child).map(str::to_string);
            match text {
                Some(text) if text.is_empty() => {
                    self.free_slot(child);
                }
                Some(text) => match kept.last().copied() {
                    Some(prev) if self.is_text(prev) => {
                        let merged = format!("{}{}", self.text(prev).unwrap_or(""), text);
                        self.set_text(prev, &merged)?;
                        self.free_slot(child);
                    }
                    _ => kept.push(child),
                },
                None => {
                    self.normalize(child)?;
                    kept.push(child);
                }
            }
        }

        self.node_mut(id)?.children = kept;
        Ok(())
    }

    fn check_insertable(&self, parent: NodeId, child: NodeId) -> Result<(), DomError> {
        let parent_node = self.node(parent)?;
        self.node(child)?;
        if parent_node.as_text().is_some() {
            return Err(DomError::HierarchyRequest(format!(
                "text node {parent} cannot have children"
            )));
        }
        if child == self.root {
            return Err(DomError::HierarchyRequest(
                "the document node cannot be inserted".into(),
            ));
        }
        if self.contains(child, parent) {
            return Err(DomError::HierarchyRequest(format!(
                "inserting {child} into {parent} would create a cycle"
            )));
        }
        Ok(())
    }
}
