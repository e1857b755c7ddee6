//! Storage-event and response types.

use serde::{Deserialize, Serialize};

/// A file-arrival notification from the object store.
///
/// Only the bucket matters to the trigger: the key announces *that*
/// something arrived, not *what* gets processed; the landing prefix is
/// re-scanned on every invocation.
#[derive(Debug, Clone, Deserialize)]
pub struct StorageEvent {
    pub bucket: String,
    pub key: String,
}

/// Structured response returned to the invoking host environment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TriggerResponse {
    /// 200 for success-or-waiting, 500 for error.
    pub status_code: u16,
    pub message: String,
    /// Identifier of the started job run, when one was started.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub run_id: Option<String>,
}

impl TriggerResponse {
    /// Both inputs were present and a job run was started.
    #[must_use]
    pub fn started(run_id: String) -> Self {
        Self {
            status_code: 200,
            message: format!("transform job started: {run_id}"),
            run_id: Some(run_id),
        }
    }

    /// The input pair is incomplete; nothing was done.
    #[must_use]
    pub fn waiting() -> Self {
        Self {
            status_code: 200,
            message: "waiting for both csv and json files".to_string(),
            run_id: None,
        }
    }

    /// Something failed; the error was logged and absorbed.
    #[must_use]
    pub fn error(message: String) -> Self {
        Self {
            status_code: 500,
            message,
            run_id: None,
        }
    }
}
