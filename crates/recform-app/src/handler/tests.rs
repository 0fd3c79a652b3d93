//! Tests for handler module

use super::*;
use crate::form::{Submission, NAME_REQUIRED_MESSAGE};
use crate::message::Message;
use crate::state::{CloseReason, DialogState, FetchState};
use recform_core::Record;

fn set_name(state: &mut DialogState, name: &str) -> UpdateResult {
    update(
        state,
        Message::FieldChanged {
            field: "name".to_string(),
            value: name.to_string(),
        },
    )
}

fn name_fields(name: &str) -> FieldMap {
    [("name", name)].into_iter().collect()
}

/// Edit-mode dialog whose fetch has resolved with `{name: <name>}`
fn loaded_edit_state(id: &str, name: &str) -> DialogState {
    let mut state = DialogState::new(Some(RecordId::from(id)));
    update(&mut state, Message::Open);
    update(
        &mut state,
        Message::RecordFetched {
            record: Record::new(id).with_field("name", name),
        },
    );
    state
}

fn submitted_task(result: UpdateResult) -> Option<Task> {
    match result.action {
        Some(UpdateAction::SpawnTask(task)) => Some(task),
        _ => None,
    }
}

fn completion(result: &UpdateResult) -> Option<CloseReason> {
    match result.action {
        Some(UpdateAction::NotifyComplete { reason }) => Some(reason),
        _ => None,
    }
}

// ─────────────────────────────────────────────────────────
// Mode selection
// ─────────────────────────────────────────────────────────

#[test]
fn test_create_mode_submit_issues_create() {
    let mut state = DialogState::new(None);
    set_name(&mut state, "Widget");

    let task = submitted_task(update(&mut state, Message::Submit));

    assert_eq!(
        task,
        Some(Task::CreateRecord {
            fields: name_fields("Widget")
        })
    );
    assert_eq!(state.form.submission, Submission::Pending);
}

#[test]
fn test_edit_mode_submit_issues_update_with_id() {
    let mut state = loaded_edit_state("abc", "Widget");
    set_name(&mut state, "Gadget");

    let task = submitted_task(update(&mut state, Message::Submit));

    assert_eq!(
        task,
        Some(Task::UpdateRecord {
            id: RecordId::from("abc"),
            fields: name_fields("Gadget"),
        })
    );
}

#[test]
fn test_open_in_create_mode_does_nothing() {
    let mut state = DialogState::new(None);
    let result = update(&mut state, Message::Open);
    assert!(result.action.is_none());
}

// ─────────────────────────────────────────────────────────
// Validation gating
// ─────────────────────────────────────────────────────────

#[test]
fn test_blank_name_blocks_submit() {
    for blank in ["", "   ", "\t"] {
        let mut state = DialogState::new(None);
        set_name(&mut state, blank);

        let result = update(&mut state, Message::Submit);

        assert!(result.action.is_none(), "{blank:?} must not submit");
        assert_eq!(
            state.form.field_errors.get("name"),
            Some(NAME_REQUIRED_MESSAGE)
        );
        assert_eq!(state.form.submission, Submission::Idle);
    }
}

#[test]
fn test_corrected_field_loses_error_on_resubmit() {
    let mut state = DialogState::new(None);
    state.revalidate_on_change = false;
    update(&mut state, Message::Submit);
    assert!(!state.form.field_errors.is_empty());

    set_name(&mut state, "Widget");
    // Without change-time revalidation the old message stays until submit
    assert!(!state.form.field_errors.is_empty());

    let result = update(&mut state, Message::Submit);

    assert!(state.form.field_errors.is_empty());
    assert!(submitted_task(result).is_some());
}

#[test]
fn test_revalidate_on_change_after_first_submit() {
    let mut state = DialogState::new(None);
    update(&mut state, Message::Submit);
    assert_eq!(
        state.form.field_errors.get("name"),
        Some(NAME_REQUIRED_MESSAGE)
    );

    set_name(&mut state, "W");
    assert!(state.form.field_errors.is_empty());

    set_name(&mut state, "  ");
    assert_eq!(
        state.form.field_errors.get("name"),
        Some(NAME_REQUIRED_MESSAGE)
    );
}

#[test]
fn test_no_validation_on_change_before_first_submit() {
    let mut state = DialogState::new(None);
    set_name(&mut state, "");
    assert!(state.form.field_errors.is_empty());
}

#[test]
fn test_unknown_field_is_ignored() {
    let mut state = DialogState::new(None);
    update(
        &mut state,
        Message::FieldChanged {
            field: "color".to_string(),
            value: "red".to_string(),
        },
    );
    assert!(!state.form.fields.contains("color"));
}

// ─────────────────────────────────────────────────────────
// Single in-flight write
// ─────────────────────────────────────────────────────────

#[test]
fn test_submit_while_pending_is_ignored() {
    let mut state = DialogState::new(None);
    set_name(&mut state, "Widget");
    assert!(submitted_task(update(&mut state, Message::Submit)).is_some());

    for _ in 0..3 {
        let result = update(&mut state, Message::Submit);
        assert!(result.action.is_none());
    }
    assert_eq!(state.form.submission, Submission::Pending);
    assert_eq!(state.form.submit_attempts, 1);
}

#[test]
fn test_cancel_while_pending_is_ignored() {
    let mut state = DialogState::new(None);
    set_name(&mut state, "Widget");
    update(&mut state, Message::Submit);

    let result = update(&mut state, Message::Cancel);

    assert!(result.action.is_none());
    assert!(!state.is_closed());
}

// ─────────────────────────────────────────────────────────
// Success / failure
// ─────────────────────────────────────────────────────────

#[test]
fn test_write_success_completes_once_without_alert() {
    let mut state = DialogState::new(None);
    set_name(&mut state, "Widget");
    update(&mut state, Message::Submit);

    let result = update(
        &mut state,
        Message::WriteSucceeded {
            record: Record::new("rec-1").with_field("name", "Widget"),
        },
    );

    assert_eq!(completion(&result), Some(CloseReason::Saved));
    assert_eq!(state.form.alert(), None);
    assert!(state.is_closed());

    let again = update(
        &mut state,
        Message::WriteSucceeded {
            record: Record::new("rec-1"),
        },
    );
    assert!(again.action.is_none());
}

#[test]
fn test_write_failure_preserves_input() {
    let mut state = loaded_edit_state("abc", "Widget");
    set_name(&mut state, "Gadget");
    let before = state.form.fields.clone();
    update(&mut state, Message::Submit);

    let result = update(
        &mut state,
        Message::WriteFailed {
            error: "network error".to_string(),
        },
    );

    assert!(result.action.is_none());
    assert_eq!(
        state.form.submission,
        Submission::Failed("network error".to_string())
    );
    assert!(state.form.can_submit());
    assert_eq!(state.form.fields, before);
    assert!(!state.is_closed());
}

#[test]
fn test_resubmit_after_failure_clears_alert() {
    let mut state = DialogState::new(None);
    set_name(&mut state, "Widget");
    update(&mut state, Message::Submit);
    update(
        &mut state,
        Message::WriteFailed {
            error: "network error".to_string(),
        },
    );
    assert_eq!(state.form.alert(), Some("network error"));

    let task = submitted_task(update(&mut state, Message::Submit));

    assert!(task.is_some());
    assert_eq!(state.form.submission, Submission::Pending);
    assert_eq!(state.form.alert(), None);
}

#[test]
fn test_alert_holds_latest_error_only() {
    let mut state = DialogState::new(None);
    set_name(&mut state, "Widget");
    for error in ["first", "second"] {
        update(&mut state, Message::Submit);
        update(
            &mut state,
            Message::WriteFailed {
                error: error.to_string(),
            },
        );
    }
    assert_eq!(state.form.alert(), Some("second"));
}

#[test]
fn test_write_result_without_pending_is_ignored() {
    let mut state = DialogState::new(None);

    let result = update(
        &mut state,
        Message::WriteFailed {
            error: "late".to_string(),
        },
    );

    assert!(result.action.is_none());
    assert_eq!(state.form.submission, Submission::Idle);
}

// ─────────────────────────────────────────────────────────
// Fetch gate
// ─────────────────────────────────────────────────────────

#[test]
fn test_open_in_edit_mode_requests_fetch_once() {
    let mut state = DialogState::new(Some(RecordId::from("abc")));

    let first = submitted_task(update(&mut state, Message::Open));
    let second = update(&mut state, Message::Open);

    assert_eq!(
        first,
        Some(Task::FetchRecord {
            id: RecordId::from("abc")
        })
    );
    assert!(second.action.is_none());
}

#[test]
fn test_fetch_gate_hides_form_until_ready() {
    let mut state = DialogState::new(Some(RecordId::from("abc")));
    update(&mut state, Message::Open);
    assert!(!state.is_form_visible());

    // Input and submit are unreachable while hidden
    set_name(&mut state, "Early");
    assert!(update(&mut state, Message::Submit).action.is_none());

    update(
        &mut state,
        Message::RecordFetched {
            record: Record::new("abc").with_field("name", "Widget"),
        },
    );

    assert!(state.is_form_visible());
    assert_eq!(state.form.fields.get("name"), Some("Widget"));
}

#[test]
fn test_population_is_a_snapshot() {
    let mut state = loaded_edit_state("abc", "Widget");
    set_name(&mut state, "Edited");

    update(
        &mut state,
        Message::RecordFetched {
            record: Record::new("abc").with_field("name", "Concurrent"),
        },
    );

    assert_eq!(state.form.fields.get("name"), Some("Edited"));
}

#[test]
fn test_fetch_failure_is_terminal_and_hides_form() {
    let mut state = DialogState::new(Some(RecordId::from("abc")));
    update(&mut state, Message::Open);

    update(
        &mut state,
        Message::RecordFetchFailed {
            error: "Record not found: abc".to_string(),
        },
    );

    assert_eq!(
        state.fetch,
        Some(FetchState::Error("Record not found: abc".to_string()))
    );
    assert!(!state.is_form_visible());
    assert!(update(&mut state, Message::Submit).action.is_none());

    // A late record does not reopen the gate
    update(
        &mut state,
        Message::RecordFetched {
            record: Record::new("abc").with_field("name", "Widget"),
        },
    );
    assert!(!state.is_form_visible());

    let result = update(&mut state, Message::Cancel);
    assert_eq!(completion(&result), Some(CloseReason::Cancelled));
}

// ─────────────────────────────────────────────────────────
// Cancel / dismiss
// ─────────────────────────────────────────────────────────

#[test]
fn test_cancel_in_idle_completes_without_write() {
    let mut state = DialogState::new(None);
    set_name(&mut state, "Widget");

    let result = update(&mut state, Message::Cancel);

    assert_eq!(completion(&result), Some(CloseReason::Cancelled));
    assert!(state.is_closed());
}

#[test]
fn test_cancel_in_failed_completes_without_write() {
    let mut state = DialogState::new(None);
    set_name(&mut state, "Widget");
    update(&mut state, Message::Submit);
    update(
        &mut state,
        Message::WriteFailed {
            error: "network error".to_string(),
        },
    );

    let result = update(&mut state, Message::Cancel);

    assert_eq!(completion(&result), Some(CloseReason::Cancelled));
}

#[test]
fn test_dismiss_while_pending_closes_and_drops_late_result() {
    let mut state = DialogState::new(None);
    set_name(&mut state, "Widget");
    update(&mut state, Message::Submit);

    let dismissed = update(&mut state, Message::Dismiss);
    assert_eq!(completion(&dismissed), Some(CloseReason::Dismissed));

    let late = update(
        &mut state,
        Message::WriteSucceeded {
            record: Record::new("rec-1"),
        },
    );
    assert!(late.action.is_none());
    assert_eq!(state.close_reason(), Some(CloseReason::Dismissed));
}

#[test]
fn test_nothing_after_close() {
    let mut state = DialogState::new(None);
    update(&mut state, Message::Cancel);

    assert!(update(&mut state, Message::Cancel).action.is_none());
    assert!(update(&mut state, Message::Dismiss).action.is_none());
    set_name(&mut state, "Widget");
    assert!(update(&mut state, Message::Submit).action.is_none());
}
