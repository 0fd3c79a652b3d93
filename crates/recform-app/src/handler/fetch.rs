//! Fetch gate handlers
//!
//! In edit mode the form stays hidden until the record store returns the
//! record. The first record received seeds the form; anything later is
//! ignored so the open form behaves as a snapshot.

use recform_core::Record;
use tracing::{debug, info, warn};

use crate::handler::{Task, UpdateResult};
use crate::state::DialogState;

/// Handle the dialog being mounted: request the record in edit mode
pub fn handle_open(state: &mut DialogState) -> UpdateResult {
    match state.begin_fetch() {
        Some(id) => {
            debug!("Fetching record {} for edit dialog", id);
            UpdateResult::task(Task::FetchRecord { id })
        }
        None => UpdateResult::none(),
    }
}

/// Handle a resolved fetch: open the gate and populate fields once
pub fn handle_record_fetched(state: &mut DialogState, record: Record) -> UpdateResult {
    let id = record.id.clone();
    if state.apply_fetched(record) {
        info!("Record {} loaded, form ready", id);
    } else {
        debug!("Ignoring record {} received after the form was populated", id);
    }
    UpdateResult::none()
}

/// Handle a failed fetch: surface the error and keep the form hidden
pub fn handle_record_fetch_failed(state: &mut DialogState, error: String) -> UpdateResult {
    if state.fail_fetch(error.clone()) {
        warn!("Failed to load record for edit dialog: {}", error);
    } else {
        debug!("Ignoring fetch failure outside loading state: {}", error);
    }
    UpdateResult::none()
}
