//! Headless mode - NDJSON commands in, NDJSON events out
//!
//! Drives a dialog without any UI. Commands are read from stdin, one JSON
//! object per line, and dialog events are written to stdout the same way.
//!
//! # Command Format
//!
//! ```json
//! {"command":"set","field":"name","value":"Widget"}
//! {"command":"submit"}
//! {"command":"cancel"}
//! {"command":"dismiss"}
//! {"command":"show"}
//! ```
//!
//! # Example Output
//!
//! ```json
//! {"event":"form_ready","title":"Update Item","fields":{"name":"Widget"},"timestamp":1704700001000}
//! {"event":"submission_started","operation":"update","record_id":"abc","timestamp":1704700002000}
//! {"event":"completed","reason":"saved","timestamp":1704700002150}
//! ```

pub mod runner;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::io::{self, Write};
use tracing::error;

use recform_app::{CloseReason, DialogView, EngineEvent, Message, WriteKind};
use recform_core::FieldMap;

/// Commands accepted on stdin
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum HeadlessCommand {
    /// Edit a form field
    Set { field: String, value: String },
    Submit,
    Cancel,
    Dismiss,
    /// Print the current render model
    Show,
}

impl HeadlessCommand {
    pub fn parse(line: &str) -> serde_json::Result<Self> {
        serde_json::from_str(line)
    }

    /// The dialog message for this command; `None` for output-only commands
    pub fn into_message(self) -> Option<Message> {
        match self {
            HeadlessCommand::Set { field, value } => Some(Message::FieldChanged { field, value }),
            HeadlessCommand::Submit => Some(Message::Submit),
            HeadlessCommand::Cancel => Some(Message::Cancel),
            HeadlessCommand::Dismiss => Some(Message::Dismiss),
            HeadlessCommand::Show => None,
        }
    }

    /// Commands that make sense before the form is shown
    fn applies_while_loading(&self) -> bool {
        matches!(
            self,
            HeadlessCommand::Show | HeadlessCommand::Cancel | HeadlessCommand::Dismiss
        )
    }
}

/// Events emitted in headless mode
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum HeadlessEvent {
    /// The form is visible and accepts input
    FormReady {
        title: String,
        fields: FieldMap,
        timestamp: i64,
    },

    /// The record to edit could not be loaded
    FetchFailed { message: String, timestamp: i64 },

    /// Submit was blocked by field validation
    ValidationFailed { errors: FieldMap, timestamp: i64 },

    /// A create/update call was issued
    SubmissionStarted {
        operation: String,
        record_id: Option<String>,
        timestamp: i64,
    },

    /// The create/update call was rejected
    SubmissionFailed { message: String, timestamp: i64 },

    /// The dialog handed control back to its caller
    Completed { reason: CloseReason, timestamp: i64 },

    /// Current render model, in response to `show`
    View {
        view: Option<DialogView>,
        timestamp: i64,
    },

    /// Error occurred
    Error {
        message: String,
        fatal: bool,
        timestamp: i64,
    },
}

impl HeadlessEvent {
    /// Emit this event to stdout as JSON
    pub fn emit(&self) {
        // Serialize to JSON
        let json = match serde_json::to_string(self) {
            Ok(json) => json,
            Err(e) => {
                error!("Failed to serialize headless event: {}", e);
                return;
            }
        };

        // Write to stdout with newline (NDJSON format)
        let mut stdout = io::stdout().lock();
        if let Err(e) = writeln!(stdout, "{}", json) {
            error!("Failed to write headless event to stdout: {}", e);
            return;
        }

        // Flush to ensure immediate output
        if let Err(e) = stdout.flush() {
            error!("Failed to flush headless stdout: {}", e);
        }
    }

    /// Get current timestamp in milliseconds
    fn now() -> i64 {
        Utc::now().timestamp_millis()
    }

    pub fn from_engine_event(event: EngineEvent) -> Self {
        let timestamp = Self::now();
        match event {
            EngineEvent::FormReady { title, fields } => Self::FormReady {
                title,
                fields,
                timestamp,
            },
            EngineEvent::FetchFailed { message } => Self::FetchFailed { message, timestamp },
            EngineEvent::ValidationFailed { errors } => Self::ValidationFailed { errors, timestamp },
            EngineEvent::SubmissionStarted { kind } => {
                let (operation, record_id) = match kind {
                    WriteKind::Create => ("create", None),
                    WriteKind::Update { id } => ("update", Some(id.to_string())),
                };
                Self::SubmissionStarted {
                    operation: operation.to_string(),
                    record_id,
                    timestamp,
                }
            }
            EngineEvent::SubmissionFailed { message } => {
                Self::SubmissionFailed { message, timestamp }
            }
            EngineEvent::Completed { reason } => Self::Completed { reason, timestamp },
        }
    }

    pub fn view(view: Option<DialogView>) -> Self {
        Self::View {
            view,
            timestamp: Self::now(),
        }
    }

    pub fn error(message: String, fatal: bool) -> Self {
        Self::Error {
            message,
            fatal,
            timestamp: Self::now(),
        }
    }
}
