//! Delayed work: debounced input, trigger clicks and "reveal all".

use tracing::{debug, info, warn};

use finder_common::FinderError;
use finder_dom::{ClickOutcome, Document, NodeId};

use super::tasks::Task;
use super::{FindSession, RevealResult, SearchSummary};
use crate::options::SearchOptions;
use crate::scheduler::TaskId;

impl FindSession {
    /// Queue a search for typed input. Each call replaces the previous
    /// pending input search.
    pub fn input(&mut self, query: &str, options: SearchOptions) -> TaskId {
        self.scheduler
            .cancel_where(|t| matches!(t, Task::DebouncedSearch { .. }));
        let task = Task::DebouncedSearch {
            query: query.to_string(),
            options,
        };
        self.scheduler
            .schedule(self.clock.now(), self.delays.debounce, task)
    }

    /// Run every task that is due. Returns the summary of the last search
    /// that ran, if any did.
    pub fn poll(&mut self, doc: &mut Document) -> Option<SearchSummary> {
        let mut last = None;
        while let Some(task) = self.scheduler.pop_due(self.clock.now()) {
            debug!(task = task.name(), "running deferred task");
            match task {
                Task::DebouncedSearch { query, options }
                | Task::ExpandReSearch { query, options } => {
                    last = Some(self.search(doc, &query, options));
                }
                Task::TriggerReSearch => {
                    let query = self.state.query.clone();
                    let options = self.state.options;
                    last = Some(self.run_pipeline(doc, &query, options));
                    self.scheduler.schedule(
                        self.clock.now(),
                        self.delays.reentrancy_release,
                        Task::ReleaseReentrancy,
                    );
                }
                Task::ReleaseReentrancy => {
                    self.state.re_searching = false;
                }
            }
        }
        last
    }

    /// Dispatch a click from the host and react if it reached one of our
    /// trigger listeners.
    pub fn handle_click(&mut self, doc: &mut Document, node: NodeId) -> Result<ClickOutcome, FinderError> {
        let outcome = doc.click(node)?;
        let trigger = outcome
            .fired
            .iter()
            .find_map(|id| self.indicators.trigger_for_listener(*id));
        if let Some(trigger) = trigger {
            self.on_trigger_click(trigger);
        }
        Ok(outcome)
    }

    fn on_trigger_click(&mut self, trigger: NodeId) {
        if self.state.re_searching {
            debug!(trigger = %trigger, "re-search in flight, click ignored");
            return;
        }
        self.state.re_searching = true;
        self.scheduler.schedule(
            self.clock.now(),
            self.delays.trigger_settle,
            Task::TriggerReSearch,
        );
        debug!(trigger = %trigger, "trigger clicked, re-search scheduled");
    }

    /// Click every trigger from the last search, then search `query` again
    /// once the page has settled.
    ///
    /// Fails when `query` is empty or there is nothing to reveal.
    pub fn reveal_all(&mut self, doc: &mut Document, query: &str) -> RevealResult {
        if query.is_empty() || self.state.triggers.is_empty() {
            return RevealResult::default();
        }

        let triggers: Vec<NodeId> = self.state.triggers.iter().map(|t| t.element).collect();
        let mut clicked = 0;
        for trigger in triggers {
            match doc.click(trigger) {
                Ok(_) => clicked += 1,
                Err(e) => warn!(trigger = %trigger, error = %e, "cannot click trigger"),
            }
        }

        let task = Task::ExpandReSearch {
            query: query.to_string(),
            options: self.state.options,
        };
        self.scheduler
            .schedule(self.clock.now(), self.delays.expand_settle, task);
        info!(query, clicked, "revealing hidden matches");

        RevealResult {
            success: clicked > 0,
            clicked,
        }
    }

    /// Cancel a task returned by [`FindSession::input`].
    pub fn cancel(&mut self, task: TaskId) -> bool {
        self.scheduler.cancel(task)
    }
}
