//! Handler module - TEA update function and event handlers
//!
//! Organized into submodules:
//! - `update`: Main update() function and message dispatch
//! - `fetch`: Fetch gate and field population
//! - `fields`: Field edits and change-time revalidation
//! - `submit`: Submission state machine, cancel and dismiss

pub(crate) mod fetch;
pub(crate) mod fields;
pub(crate) mod submit;
pub(crate) mod update;

#[cfg(test)]
mod tests;

use recform_core::{FieldMap, RecordId};

use crate::state::CloseReason;

// Re-export main entry point
pub use update::update;

/// Actions that the event loop should perform after update
#[derive(Debug, Clone)]
pub enum UpdateAction {
    /// Spawn a background record store request
    SpawnTask(Task),

    /// Hand control back to the caller. Emitted at most once per dialog.
    NotifyComplete { reason: CloseReason },
}

/// Background record store requests
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Task {
    /// Load the record being edited
    FetchRecord { id: RecordId },
    /// Create a new record; the owner is resolved from the session at dispatch
    CreateRecord { fields: FieldMap },
    /// Write `fields` to an existing record
    UpdateRecord { id: RecordId, fields: FieldMap },
}

/// Result of processing a message
#[derive(Debug, Default)]
pub struct UpdateResult {
    /// Optional action for the event loop to perform
    pub action: Option<UpdateAction>,
}

impl UpdateResult {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn action(action: UpdateAction) -> Self {
        Self {
            action: Some(action),
        }
    }

    pub fn task(task: Task) -> Self {
        Self::action(UpdateAction::SpawnTask(task))
    }
}
