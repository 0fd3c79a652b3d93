//! Submission state machine handlers
//!
//! `Idle -> Pending -> {closed, Failed}`, `Failed -> Pending` on resubmit.
//! The `Pending` guard is what keeps a dialog at one write in flight: a submit
//! arriving while pending produces no task at all.

use recform_core::Record;
use tracing::{debug, info, warn};

use crate::form::Submission;
use crate::handler::{Task, UpdateAction, UpdateResult};
use crate::state::{CloseReason, DialogMode, DialogState};

/// Handle the submit button
pub fn handle_submit(state: &mut DialogState) -> UpdateResult {
    if !state.is_form_visible() {
        debug!("Submit ignored: form is not shown");
        return UpdateResult::none();
    }

    if state.form.submission.is_pending() {
        debug!("Submit ignored: a write is already in flight");
        return UpdateResult::none();
    }

    state.form.submit_attempts += 1;
    if !state.form.validate() {
        debug!(
            "Submit blocked by {} field error(s)",
            state.form.field_errors.len()
        );
        return UpdateResult::none();
    }

    // Entering Pending drops any previous failure from the alert
    state.form.submission = Submission::Pending;
    let fields = state.form.fields.clone();

    let task = match &state.mode {
        DialogMode::Create => Task::CreateRecord { fields },
        DialogMode::Edit(id) => Task::UpdateRecord {
            id: id.clone(),
            fields,
        },
    };
    debug!("Submitting: {:?}", task);
    UpdateResult::task(task)
}

/// Handle a successful create/update: close and notify the caller
pub fn handle_write_succeeded(state: &mut DialogState, record: Record) -> UpdateResult {
    if !state.form.submission.is_pending() {
        debug!("Ignoring write result for {} with no write pending", record.id);
        return UpdateResult::none();
    }

    info!("Record {} saved", record.id);
    state.form.submission = Submission::Idle;
    close(state, CloseReason::Saved)
}

/// Handle a rejected create/update: re-enable submit, keep the values
pub fn handle_write_failed(state: &mut DialogState, error: String) -> UpdateResult {
    if !state.form.submission.is_pending() {
        debug!("Ignoring write failure with no write pending: {}", error);
        return UpdateResult::none();
    }

    warn!("Save failed: {}", error);
    state.form.submission = Submission::Failed(error);
    UpdateResult::none()
}

/// Handle the cancel button. Not reachable while a write is pending.
pub fn handle_cancel(state: &mut DialogState) -> UpdateResult {
    if state.form.submission.is_pending() {
        debug!("Cancel ignored: a write is in flight");
        return UpdateResult::none();
    }
    close(state, CloseReason::Cancelled)
}

/// Handle the dialog frame being dismissed. Available in every state; a write
/// still in flight completes in the store but its result is dropped.
pub fn handle_dismiss(state: &mut DialogState) -> UpdateResult {
    if state.form.submission.is_pending() {
        info!("Dialog dismissed with a write in flight");
    }
    close(state, CloseReason::Dismissed)
}

fn close(state: &mut DialogState, reason: CloseReason) -> UpdateResult {
    if state.close(reason) {
        UpdateResult::action(UpdateAction::NotifyComplete { reason })
    } else {
        UpdateResult::none()
    }
}
