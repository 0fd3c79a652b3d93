//! Record store operations
//!
//! The dialog never persists anything itself. Every read and write goes
//! through this trait so the backing store (database, HTTP API, in-memory map)
//! stays an external collaborator.

use recform_core::prelude::*;
use recform_core::{FieldMap, OwnerId, Record, RecordId};

/// Async access to persisted records.
///
/// `RecordStore` is the `Send` variant used by the dialog engine, whose
/// requests run on spawned tokio tasks.
#[trait_variant::make(RecordStore: Send)]
pub trait LocalRecordStore {
    /// Fetch an existing record for pre-populating an edit form
    async fn fetch_record(&self, id: &RecordId) -> Result<Record>;

    /// Create a new record owned by `owner`
    async fn create_record(&self, fields: FieldMap, owner: OwnerId) -> Result<Record>;

    /// Apply `fields` to an existing record
    async fn update_record(&self, id: &RecordId, fields: FieldMap) -> Result<Record>;
}
