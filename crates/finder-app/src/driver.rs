//! Runs requests against one loaded page.
//!
//! Time is driven by the requests themselves: `wait` advances a manual
//! clock and polls the session, so a replayed script always behaves the
//! same way.

use std::time::Duration;

use finder_common::FinderError;
use finder_config::FinderConfig;
use finder_core::{Direction, FindSession, ManualClock};
use finder_dom::Document;

use crate::protocol::{Request, Response};

pub struct Driver {
    doc: Document,
    session: FindSession,
    clock: ManualClock,
}

impl Driver {
    pub fn new(doc: Document, config: &FinderConfig) -> Self {
        let clock = ManualClock::new();
        let session = FindSession::with_clock(config, Box::new(clock.clone()));
        tracing::info!(session = %session.id(), nodes = doc.node_count(), "page loaded");
        Self {
            doc,
            session,
            clock,
        }
    }

    pub fn document(&self) -> &Document {
        &self.doc
    }

    /// Decode and run one request line; failures become error replies.
    pub fn handle_line(&mut self, line: &str) -> Response {
        match Request::from_line(line).and_then(|req| self.handle(req)) {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!(error = %e, "request failed");
                Response::error(&e)
            }
        }
    }

    pub fn handle(&mut self, request: Request) -> Result<Response, FinderError> {
        tracing::debug!(?request, "request dispatched");
        let doc = &mut self.doc;
        let session = &mut self.session;

        let response = match request {
            Request::PerformSearch {
                search_text,
                options,
            } => Response::Summary(session.search(doc, &search_text, options)),
            Request::InputSearch {
                search_text,
                options,
            } => {
                session.input(&search_text, options);
                Response::Scheduled { scheduled: true }
            }
            Request::NavigateHighlight { direction } => {
                let direction = Direction::from_step(direction).ok_or_else(|| {
                    FinderError::Protocol(format!("direction must be -1 or 1, got {direction}"))
                })?;
                Response::Summary(session.navigate(doc, direction))
            }
            Request::RevealAll { search_text } => {
                Response::Reveal(session.reveal_all(doc, &search_text))
            }
            Request::ClearHighlights => Response::Cleared {
                cleared: session.clear(doc),
            },
            Request::ClickElement { id } => {
                let node = doc
                    .element_by_id(&id)
                    .ok_or_else(|| FinderError::Other(format!("no element with id {id:?}")))?;
                let before = session.pending_tasks();
                session.handle_click(doc, node)?;
                Response::Clicked {
                    clicked: true,
                    trigger_click: session.pending_tasks() > before,
                }
            }
            Request::Wait { ms } => {
                self.clock.advance(Duration::from_millis(ms));
                let mut ran = None;
                while let Some(summary) = session.poll(doc) {
                    ran = Some(summary);
                }
                Response::Waited { ran }
            }
            Request::Ping => Response::Pong {
                success: true,
                message: "textfinder is loaded".into(),
                session: session.id().to_string(),
            },
        };
        Ok(response)
    }

    /// Remove everything the session added to the page.
    pub fn finish(&mut self) {
        self.session.teardown(&mut self.doc);
    }

    /// Run every non-empty, non-comment line of a script.
    pub fn run_script(&mut self, script: &str) -> Vec<Response> {
        script
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('#'))
            .map(|line| self.handle_line(line))
            .collect()
    }
}
