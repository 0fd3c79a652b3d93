//! Message types for the dialog (TEA pattern)

use recform_core::Record;

/// All possible messages/actions in the dialog
#[derive(Debug, Clone)]
pub enum Message {
    /// The dialog was mounted; starts the fetch in edit mode
    Open,

    // ─────────────────────────────────────────────────────────
    // User Input
    // ─────────────────────────────────────────────────────────
    /// A form field was edited
    FieldChanged { field: String, value: String },

    /// Submit button pressed
    Submit,

    /// Cancel button pressed (ignored while a write is pending)
    Cancel,

    /// Dialog frame closed (escape, backdrop click); always available
    Dismiss,

    // ─────────────────────────────────────────────────────────
    // Record Store Results
    // ─────────────────────────────────────────────────────────
    /// Pre-population fetch resolved
    RecordFetched { record: Record },

    /// Pre-population fetch failed
    RecordFetchFailed { error: String },

    /// Create/update resolved
    WriteSucceeded { record: Record },

    /// Create/update rejected
    WriteFailed { error: String },
}
