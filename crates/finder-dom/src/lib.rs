//! Mutable document arena used as the live page for in-page search.
//!
//! Provides:
//! - An arena of element and text nodes addressed by [`NodeId`]
//! - Tree mutation (append, insert, replace, remove, release, normalize)
//!   with released slots reused under a new generation
//! - Attribute, class and inline-style helpers
//! - A UA-default computed style and an approximate layout box
//! - Click dispatch with listener registration, page behaviors and the
//!   `<summary>`/`<details>` default action
//! - HTML loading through `scraper` (html5ever) and a serializer for
//!   inspecting pages

pub mod document;
pub mod events;
pub mod layout;
pub mod node;
pub mod parse;
pub mod serialize;
pub mod style;

pub use document::Document;
pub use events::{ClickOutcome, DefaultAction, EventKind, ListenerId, PageBehavior};
pub use node::{Element, Node, NodeData, NodeId};
pub use parse::parse_html;
pub use style::{ComputedStyle, Display, Position, Visibility};
