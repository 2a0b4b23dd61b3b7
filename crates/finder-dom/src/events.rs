//! Click listeners, page behaviors and default actions.
//!
//! Listeners are plain registrations: dispatch reports which ones a click
//! reached and the owner of a listener reacts to that report. Page
//! behaviors are closures standing in for the page's own scripts and run
//! against the document during dispatch.

use serde::{Deserialize, Serialize};

use finder_common::DomError;

use crate::document::Document;
use crate::node::NodeId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ListenerId(pub u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventKind {
    Click,
}

#[derive(Debug, Clone)]
pub(crate) struct Listener {
    pub(crate) id: ListenerId,
    pub(crate) target: NodeId,
    pub(crate) kind: EventKind,
}

/// Script-like page behavior bound to an element. Receives the click target.
pub type PageBehavior = Box<dyn FnMut(&mut Document, NodeId)>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum DefaultAction {
    ToggledDetails { details: NodeId, open: bool },
}

/// What a dispatched click did.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClickOutcome {
    /// Listeners reached, from the target outward.
    pub fired: Vec<ListenerId>,
    pub default_action: Option<DefaultAction>,
}

impl Document {
    pub fn add_listener(&mut self, target: NodeId, kind: EventKind) -> Result<ListenerId, DomError> {
        self.node(target)?;
        let id = ListenerId(self.next_listener);
        self.next_listener += 1;
        self.listeners.push(Listener { id, target, kind });
        Ok(id)
    }

    /// Returns false when the listener was already gone.
    pub fn remove_listener(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|l| l.id != id);
        self.listeners.len() != before
    }

    pub fn listeners_on(&self, target: NodeId, kind: EventKind) -> Vec<ListenerId> {
        self.listeners
            .iter()
            .filter(|l| l.target == target && l.kind == kind)
            .map(|l| l.id)
            .collect()
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    /// Bind a page behavior to an element; it runs for clicks on the
    /// element or inside it.
    pub fn add_behavior(&mut self, target: NodeId, behavior: PageBehavior) -> Result<(), DomError> {
        self.node(target)?;
        self.behaviors.entry(target).or_default().push(behavior);
        Ok(())
    }

    /// Dispatch a click at `target`, bubbling to the document node.
    ///
    /// Listeners are collected before behaviors run, page behaviors run
    /// innermost first, then the default action is applied.
    pub fn click(&mut self, target: NodeId) -> Result<ClickOutcome, DomError> {
        if !self.is_connected(target) {
            return Err(DomError::Detached(target.index()));
        }
        let path: Vec<NodeId> = std::iter::once(target).chain(self.ancestors(target)).collect();

        let fired = path
            .iter()
            .flat_map(|node| self.listeners_on(*node, EventKind::Click))
            .collect();

        for node in &path {
            let Some(mut behaviors) = self.behaviors.remove(node) else {
                continue;
            };
            for behavior in behaviors.iter_mut() {
                behavior(self, target);
            }
            // Behaviors registered during dispatch go after the existing ones.
            if let Some(added) = self.behaviors.remove(node) {
                behaviors.extend(added);
            }
            self.behaviors.insert(*node, behaviors);
        }

        let default_action = self.click_default_action(target)?;
        tracing::trace!(node = %target, ?default_action, "click dispatched");
        Ok(ClickOutcome {
            fired,
            default_action,
        })
    }

    fn click_default_action(&mut self, target: NodeId) -> Result<Option<DefaultAction>, DomError> {
        let Some(summary) = self.closest_tag(target, "summary") else {
            return Ok(None);
        };
        let Some(details) = self.parent_element(summary) else {
            return Ok(None);
        };
        if self.tag_name(details) != Some("details") || self.details_summary(details) != Some(summary)
        {
            return Ok(None);
        }
        let open = !self.has_attribute(details, "open");
        if open {
            self.set_attribute(details, "open", "")?;
        } else {
            self.remove_attribute(details, "open")?;
        }
        Ok(Some(DefaultAction::ToggledDetails { details, open }))
    }
}
