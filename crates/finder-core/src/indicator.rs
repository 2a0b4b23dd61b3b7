//! Hidden-match indicators.
//!
//! Each trigger owning hidden matches gets a small badge with the hidden
//! count and one click listener. The manager owns both and removes them
//! together; a statically positioned trigger is made `position: relative`
//! for the badge and gets its previous inline value back on detach.

use tracing::{debug, warn};

use finder_common::{DomError, FinderError};
use finder_config::IndicatorConfig;
use finder_dom::{Document, EventKind, ListenerId, NodeId, Position};

use crate::trigger::Trigger;

#[derive(Debug, Clone)]
struct Annotation {
    trigger: NodeId,
    badge: NodeId,
    badge_text: NodeId,
    listener: ListenerId,
    /// Inline `position` before it was forced; `None` when it was not forced.
    forced_position: Option<Option<String>>,
    hidden_count: usize,
}

#[derive(Debug, Clone)]
pub struct IndicatorManager {
    config: IndicatorConfig,
    annotations: Vec<Annotation>,
}

fn badge_title(count: usize, query: &str) -> String {
    let noun = if count == 1 { "match" } else { "matches" };
    format!("{count} hidden {noun} for \"{query}\"")
}

impl IndicatorManager {
    pub fn new(config: &IndicatorConfig) -> Self {
        Self {
            config: config.clone(),
            annotations: Vec::new(),
        }
    }

    /// Badge every trigger. A trigger that is already annotated only has its
    /// count and title updated. Returns the number of triggers annotated.
    pub fn annotate(
        &mut self,
        doc: &mut Document,
        triggers: &[Trigger],
        query: &str,
    ) -> Result<usize, FinderError> {
        for trigger in triggers {
            match self
                .annotations
                .iter_mut()
                .find(|a| a.trigger == trigger.element)
            {
                Some(existing) => {
                    existing.hidden_count = trigger.hidden_count;
                    doc.set_text(existing.badge_text, &trigger.hidden_count.to_string())?;
                    doc.set_attribute(
                        existing.badge,
                        "title",
                        &badge_title(trigger.hidden_count, query),
                    )?;
                }
                None => {
                    let annotation = self.attach(doc, trigger, query)?;
                    self.annotations.push(annotation);
                }
            }
        }
        debug!(triggers = triggers.len(), query, "triggers annotated");
        Ok(triggers.len())
    }

    fn attach(
        &self,
        doc: &mut Document,
        trigger: &Trigger,
        query: &str,
    ) -> Result<Annotation, DomError> {
        let element = trigger.element;

        let badge = doc.create_element("span");
        doc.add_class(badge, &self.config.class)?;
        doc.set_attribute(badge, "title", &badge_title(trigger.hidden_count, query))?;
        doc.set_style_property(badge, "background-color", &self.config.badge_color)?;
        doc.set_style_property(badge, "color", &self.config.text_color)?;
        let badge_text = doc.create_text(&trigger.hidden_count.to_string());
        doc.append_child(badge, badge_text)?;

        let forced_position = match doc.computed_style(element) {
            Some(style) if style.position == Position::Static => {
                let previous = doc.style_property(element, "position");
                doc.set_style_property(element, "position", "relative")?;
                Some(previous)
            }
            _ => None,
        };

        doc.append_child(element, badge)?;
        doc.set_attribute(element, &self.config.annotated_attribute, "true")?;
        let listener = doc.add_listener(element, EventKind::Click)?;

        Ok(Annotation {
            trigger: element,
            badge,
            badge_text,
            listener,
            forced_position,
            hidden_count: trigger.hidden_count,
        })
    }

    /// Remove every badge and listener and restore trigger styles.
    ///
    /// Nodes the page already removed are tolerated. Returns the number of
    /// annotations dropped.
    pub fn detach_all(&mut self, doc: &mut Document) -> usize {
        let count = self.annotations.len();
        for annotation in self.annotations.drain(..) {
            if let Err(e) = Self::detach_one(doc, &self.config, &annotation) {
                warn!(
                    trigger = %annotation.trigger,
                    error = %e,
                    "failed to fully remove indicator"
                );
            }
        }
        if count > 0 {
            debug!(count, "indicators detached");
        }
        count
    }

    fn detach_one(
        doc: &mut Document,
        config: &IndicatorConfig,
        annotation: &Annotation,
    ) -> Result<(), DomError> {
        doc.remove_listener(annotation.listener);
        doc.release(annotation.badge)?;
        doc.remove_attribute(annotation.trigger, &config.annotated_attribute)?;
        match &annotation.forced_position {
            Some(Some(previous)) => doc.set_style_property(annotation.trigger, "position", previous)?,
            Some(None) => doc.remove_style_property(annotation.trigger, "position")?,
            None => {}
        }
        Ok(())
    }

    /// Trigger element behind a listener this manager registered.
    pub fn trigger_for_listener(&self, listener: ListenerId) -> Option<NodeId> {
        self.annotations
            .iter()
            .find(|a| a.listener == listener)
            .map(|a| a.trigger)
    }

    pub fn badge_for(&self, trigger: NodeId) -> Option<NodeId> {
        self.annotations
            .iter()
            .find(|a| a.trigger == trigger)
            .map(|a| a.badge)
    }

    pub fn hidden_count(&self, trigger: NodeId) -> Option<usize> {
        self.annotations
            .iter()
            .find(|a| a.trigger == trigger)
            .map(|a| a.hidden_count)
    }

    pub fn len(&self) -> usize {
        self.annotations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.annotations.is_empty()
    }
}

impl Default for IndicatorManager {
    fn default() -> Self {
        Self::new(&IndicatorConfig::default())
    }
}
