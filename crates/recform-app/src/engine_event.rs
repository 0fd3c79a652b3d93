//! Domain events emitted by the Engine for external consumers
//!
//! Events are broadcast after each message processing cycle via
//! `Engine::subscribe()`. The headless driver turns them into NDJSON.

use recform_core::{FieldMap, RecordId};

use crate::state::CloseReason;

/// Which write a submission issued
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WriteKind {
    Create,
    Update { id: RecordId },
}

/// Domain events emitted by the Engine for external consumers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    /// The form body became visible (immediately in create mode, after the
    /// fetch in edit mode)
    FormReady { title: String, fields: FieldMap },

    /// The record could not be loaded; the form stays hidden
    FetchFailed { message: String },

    /// A submit was blocked by validation
    ValidationFailed { errors: FieldMap },

    /// A write was issued
    SubmissionStarted { kind: WriteKind },

    /// The write was rejected; the dialog is open for retry
    SubmissionFailed { message: String },

    /// Control was handed back to the caller
    Completed { reason: CloseReason },
}
