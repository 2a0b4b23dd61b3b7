//! Find session: the search, highlight and reveal lifecycle over one
//! document.
//!
//! The host owns the [`Document`] and lends it to every call. Delayed work
//! is queued on the session's [`Scheduler`] and runs when the host calls
//! [`FindSession::poll`].
//!
//! Phases: `Idle -> Searching -> Highlighted | Idle`. A search from any
//! phase first clears the previous result; `clear` always ends in `Idle`.

mod deferred;
mod pipeline;
mod state;
mod summary;
mod tasks;

#[cfg(test)]
mod tests;

pub use state::SessionState;
pub use summary::{Phase, RevealResult, SearchSummary};

use std::time::Duration;

use finder_common::SessionId;
use finder_config::FinderConfig;
use finder_dom::Document;

use crate::highlight::Highlighter;
use crate::indicator::IndicatorManager;
use crate::matcher::Matcher;
use crate::scheduler::{Clock, Scheduler, SystemClock};
use tasks::Task;

#[derive(Debug, Clone, Copy)]
struct Delays {
    debounce: Duration,
    trigger_settle: Duration,
    reentrancy_release: Duration,
    expand_settle: Duration,
}

impl Delays {
    fn from_config(config: &FinderConfig) -> Self {
        let ms = |v: u32| Duration::from_millis(u64::from(v));
        Self {
            debounce: ms(config.search.debounce_ms),
            trigger_settle: ms(config.reveal.trigger_settle_ms),
            reentrancy_release: ms(config.reveal.reentrancy_release_ms),
            expand_settle: ms(config.reveal.expand_settle_ms),
        }
    }
}

pub struct FindSession {
    id: SessionId,
    matcher: Matcher,
    highlighter: Highlighter,
    indicators: IndicatorManager,
    scheduler: Scheduler<Task>,
    clock: Box<dyn Clock>,
    delays: Delays,
    state: SessionState,
    phase: Phase,
}

impl FindSession {
    pub fn new(config: &FinderConfig) -> Self {
        Self::with_clock(config, Box::new(SystemClock::new()))
    }

    pub fn with_clock(config: &FinderConfig, clock: Box<dyn Clock>) -> Self {
        Self {
            id: SessionId::new(),
            matcher: Matcher::new(config),
            highlighter: Highlighter::new(&config.highlight),
            indicators: IndicatorManager::new(&config.indicator),
            scheduler: Scheduler::new(),
            clock,
            delays: Delays::from_config(config),
            state: SessionState::default(),
            phase: Phase::Idle,
        }
    }

    pub fn id(&self) -> &SessionId {
        &self.id
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn indicators(&self) -> &IndicatorManager {
        &self.indicators
    }

    /// Counts for the current result.
    pub fn summary(&self) -> SearchSummary {
        let highlights = &self.state.highlights;
        SearchSummary {
            match_count: highlights.len(),
            current_match: highlights.current().map_or(0, |i| i + 1),
            visible_count: highlights.len(),
            hidden_count: self.state.hidden_count(),
            expandable_count: self.state.triggers.len(),
        }
    }

    /// Tasks waiting in the scheduler.
    pub fn pending_tasks(&self) -> usize {
        self.scheduler.len()
    }

    /// When the next deferred task becomes due, on the session clock.
    pub fn next_deadline(&self) -> Option<Duration> {
        self.scheduler.next_deadline()
    }

    /// Drop every pending task, remove all inserted markup and go idle.
    /// Called when the page goes away.
    pub fn teardown(&mut self, doc: &mut Document) {
        self.scheduler.clear();
        self.state.re_searching = false;
        self.remove_markup(doc);
        self.state.reset();
        self.phase = Phase::Idle;
        tracing::debug!(session = %self.id, "session torn down");
    }
}
