//! In-page text search over a live [`finder_dom::Document`].
//!
//! The pipeline runs leaf-first:
//! - [`visibility`] decides whether a node is currently shown
//! - [`trigger`] guesses which control would reveal a hidden node
//! - [`matcher`] finds literal occurrences and classifies them
//! - [`highlight`] wraps visible occurrences in marker elements
//! - [`indicator`] badges triggers and routes their clicks
//! - [`session`] ties it together with a navigable cursor and deferred
//!   re-searches driven by [`scheduler`]

pub mod highlight;
pub mod indicator;
pub mod matcher;
pub mod options;
pub mod scheduler;
pub mod session;
pub mod trigger;
pub mod visibility;

pub use highlight::{HighlightCounts, HighlightList, Highlighter};
pub use indicator::IndicatorManager;
pub use matcher::{MatchSet, Matcher, TextSpan};
pub use options::{Direction, SearchOptions};
pub use scheduler::{Clock, ManualClock, Scheduler, SystemClock, TaskId};
pub use session::{FindSession, Phase, RevealResult, SearchSummary};
pub use trigger::{Trigger, TriggerMatch, TriggerResolver, TriggerRule, TriggerScan};
pub use visibility::{HiddenReason, VisibilityClassifier};
