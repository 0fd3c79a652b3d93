//! Main update function - handles state transitions (TEA pattern)

use tracing::debug;

use crate::message::Message;
use crate::state::DialogState;

use super::{fetch, fields, submit, UpdateResult};

/// Process a message and update state
/// Returns optional follow-up message and/or action
pub fn update(state: &mut DialogState, message: Message) -> UpdateResult {
    // Nothing reaches a closed dialog: late store results and stray input
    // must not produce a second completion
    if let Some(reason) = state.close_reason() {
        debug!("Dialog already closed ({:?}), ignoring {:?}", reason, message);
        return UpdateResult::none();
    }

    match message {
        Message::Open => fetch::handle_open(state),

        // ─────────────────────────────────────────────────────────
        // User Input
        // ─────────────────────────────────────────────────────────
        Message::FieldChanged { field, value } => {
            fields::handle_field_changed(state, &field, value)
        }
        Message::Submit => submit::handle_submit(state),
        Message::Cancel => submit::handle_cancel(state),
        Message::Dismiss => submit::handle_dismiss(state),

        // ─────────────────────────────────────────────────────────
        // Record Store Results
        // ─────────────────────────────────────────────────────────
        Message::RecordFetched { record } => fetch::handle_record_fetched(state, record),
        Message::RecordFetchFailed { error } => fetch::handle_record_fetch_failed(state, error),
        Message::WriteSucceeded { record } => submit::handle_write_succeeded(state, record),
        Message::WriteFailed { error } => submit::handle_write_failed(state, error),
    }
}
