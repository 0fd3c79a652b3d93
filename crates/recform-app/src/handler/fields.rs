//! Field edit handlers

use tracing::warn;

use crate::handler::UpdateResult;
use crate::state::DialogState;

/// Handle a field edit.
///
/// Edits are accepted while a write is pending; the write already carries the
/// values captured at submit time. Once a submit has been attempted, the
/// messages are recomputed on every change (if enabled) so a corrected field
/// loses its error immediately.
pub fn handle_field_changed(state: &mut DialogState, field: &str, value: String) -> UpdateResult {
    if !state.is_form_visible() {
        warn!("Field '{}' changed while the form is hidden, ignoring", field);
        return UpdateResult::none();
    }

    if !state.form.set_field(field, value) {
        warn!("Unknown field '{}', ignoring", field);
        return UpdateResult::none();
    }

    if state.revalidate_on_change && state.form.submit_attempts > 0 {
        state.form.validate();
    }

    UpdateResult::none()
}
