//! JSON request lines and their replies.
//!
//! Requests carry an `action` plus action-specific fields, the same shape
//! the browser popup sends to its content script:
//!
//! ```json
//! {"action": "performSearch", "searchText": "hello", "options": {"matchCase": false}}
//! {"action": "navigateHighlight", "direction": 1}
//! ```

use serde::{Deserialize, Serialize};

use finder_common::FinderError;
use finder_core::{RevealResult, SearchOptions, SearchSummary};

// =============================================================================
// ACTION ALLOWLIST
// =============================================================================

/// Actions accepted from a request line. Anything else is rejected before
/// the payload is decoded.
const ALLOWED_ACTIONS: &[&str] = &[
    "performSearch",
    "inputSearch",
    "navigateHighlight",
    "revealAll",
    "clearHighlights",
    "clickElement",
    "wait",
    "ping",
];

pub fn is_action_allowed(action: &str) -> bool {
    ALLOWED_ACTIONS.contains(&action)
}

// =============================================================================
// REQUESTS
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "action", rename_all = "camelCase")]
pub enum Request {
    PerformSearch {
        #[serde(rename = "searchText", default)]
        search_text: String,
        #[serde(default)]
        options: SearchOptions,
    },
    /// Typed input; runs after the debounce delay.
    InputSearch {
        #[serde(rename = "searchText", default)]
        search_text: String,
        #[serde(default)]
        options: SearchOptions,
    },
    NavigateHighlight {
        direction: i64,
    },
    RevealAll {
        #[serde(rename = "searchText", default)]
        search_text: String,
    },
    ClearHighlights,
    /// Click the element with this id, as the user would.
    ClickElement {
        id: String,
    },
    /// Let time pass and run whatever became due.
    Wait {
        ms: u64,
    },
    Ping,
}

impl Request {
    /// Decode one request line, checking the action against the allowlist.
    pub fn from_line(line: &str) -> Result<Self, FinderError> {
        let value: serde_json::Value = serde_json::from_str(line)
            .map_err(|e| FinderError::Protocol(format!("invalid json: {e}")))?;
        let action = value
            .get("action")
            .and_then(serde_json::Value::as_str)
            .ok_or_else(|| FinderError::Protocol("missing action".into()))?
            .to_owned();
        if !is_action_allowed(&action) {
            return Err(FinderError::Protocol(format!("unknown action: {action}")));
        }
        serde_json::from_value(value)
            .map_err(|e| FinderError::Protocol(format!("bad {action} request: {e}")))
    }
}

// =============================================================================
// RESPONSES
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Response {
    Summary(SearchSummary),
    Reveal(RevealResult),
    Cleared {
        cleared: usize,
    },
    Scheduled {
        scheduled: bool,
    },
    Clicked {
        clicked: bool,
        #[serde(rename = "triggerClick")]
        trigger_click: bool,
    },
    Waited {
        ran: Option<SearchSummary>,
    },
    Pong {
        success: bool,
        message: String,
        session: String,
    },
    Error {
        success: bool,
        error: String,
    },
}

impl Response {
    pub fn error(err: &FinderError) -> Self {
        Response::Error {
            success: false,
            error: err.to_string(),
        }
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string(self)
            .unwrap_or_else(|e| format!("{{\"success\":false,\"error\":\"{e}\"}}"))
    }
}

// =============================================================================
// TESTS
// =============================================================================
