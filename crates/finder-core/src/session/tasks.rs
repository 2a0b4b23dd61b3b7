//! Deferred work queued by a session.

use crate::options::SearchOptions;

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Task {
    /// Input search after the typing pause.
    DebouncedSearch { query: String, options: SearchOptions },
    /// Re-run the last search once a clicked trigger has settled.
    TriggerReSearch,
    /// Accept trigger clicks again.
    ReleaseReentrancy,
    /// Search again after "reveal all" clicked every trigger.
    ExpandReSearch { query: String, options: SearchOptions },
}

impl Task {
    pub(crate) fn name(&self) -> &'static str {
        match self {
            Task::DebouncedSearch { .. } => "debounced_search",
            Task::TriggerReSearch => "trigger_re_search",
            Task::ReleaseReentrancy => "release_reentrancy",
            Task::ExpandReSearch { .. } => "expand_re_search",
        }
    }
}
