//! Attribute, class-list and inline-style helpers.

use finder_common::DomError;

use super::Document;
use crate::node::NodeId;
use crate::style::{parse_declarations, serialize_declarations};

impl Document {
    pub fn attribute(&self, id: NodeId, name: &str) -> Option<&str> {
        self.element(id).and_then(|e| e.attr(name))
    }

    pub fn has_attribute(&self, id: NodeId, name: &str) -> bool {
        self.attribute(id, name).is_some()
    }

    pub fn set_attribute(&mut self, id: NodeId, name: &str, value: &str) -> Result<(), DomError> {
        self.element_mut(id)?.set_attr(name, value);
        Ok(())
    }

    /// Remove an attribute, returning its previous value.
    pub fn remove_attribute(&mut self, id: NodeId, name: &str) -> Result<Option<String>, DomError> {
        Ok(self.element_mut(id)?.remove_attr(name))
    }

    /// The element's non-empty `id` attribute.
    pub fn element_id(&self, id: NodeId) -> Option<&str> {
        self.attribute(id, "id").filter(|v| !v.is_empty())
    }

    /// Raw `class` attribute, empty when absent.
    pub fn class_name(&self, id: NodeId) -> &str {
        self.attribute(id, "class").unwrap_or("")
    }

    pub fn has_class(&self, id: NodeId, class: &str) -> bool {
        self.element(id)
            .map(|e| e.classes().any(|c| c == class))
            .unwrap_or(false)
    }

    pub fn add_class(&mut self, id: NodeId, class: &str) -> Result<(), DomError> {
        if self.has_class(id, class) {
            return Ok(());
        }
        let current = self.element_mut(id)?.attr("class").unwrap_or("").trim().to_string();
        let next = if current.is_empty() {
            class.to_string()
        } else {
            format!("{current} {class}")
        };
        self.set_attribute(id, "class", &next)
    }

    /// Remove a class token; the attribute is dropped when it becomes empty.
    pub fn remove_class(&mut self, id: NodeId, class: &str) -> Result<(), DomError> {
        let element = self.element_mut(id)?;
        let remaining: Vec<String> = element
            .classes()
            .filter(|c| *c != class)
            .map(str::to_string)
            .collect();
        if remaining.is_empty() {
            element.remove_attr("class");
        } else {
            element.set_attr("class", &remaining.join(" "));
        }
        Ok(())
    }

    /// Value of a property declared in the inline `style` attribute.
    pub fn style_property(&self, id: NodeId, property: &str) -> Option<String> {
        let style = self.attribute(id, "style")?;
        parse_declarations(style)
            .into_iter()
            .rev()
            .find(|(name, _)| name.eq_ignore_ascii_case(property))
            .map(|(_, value)| value)
    }

    pub fn set_style_property(
        &mut self,
        id: NodeId,
        property: &str,
        value: &str,
    ) -> Result<(), DomError> {
        let property = property.to_ascii_lowercase();
        let mut declarations = parse_declarations(self.attribute(id, "style").unwrap_or(""));
        declarations.retain(|(name, _)| *name != property);
        declarations.push((property, value.to_string()));
        self.set_attribute(id, "style", &serialize_declarations(&declarations))
    }

    /// Remove an inline style property; the attribute is dropped when empty.
    pub fn remove_style_property(&mut self, id: NodeId, property: &str) -> Result<(), DomError> {
        let Some(style) = self.element_mut(id)?.attr("style").map(str::to_string) else {
            return Ok(());
        };
        let mut declarations = parse_declarations(&style);
        declarations.retain(|(name, _)| !name.eq_ignore_ascii_case(property));
        if declarations.is_empty() {
            self.remove_attribute(id, "style")?;
        } else {
            self.set_attribute(id, "style", &serialize_declarations(&declarations))?;
        }
        Ok(())
    }
}
