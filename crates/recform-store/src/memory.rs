//! In-memory record store
//!
//! Backs the headless driver. Records live for the lifetime of the process.
//! Optional artificial latency and forced write failures make the pending and
//! failure paths of the dialog observable without a real backend.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use tokio::sync::RwLock;

use recform_core::prelude::*;
use recform_core::{FieldMap, OwnerId, Record, RecordId};

use crate::store::RecordStore;

/// Record store holding everything in a `Vec`
#[derive(Debug, Default)]
pub struct InMemoryRecordStore {
    records: RwLock<Vec<Record>>,
    next_id: AtomicU64,
    latency: Duration,
    write_failure: Option<String>,
}

impl InMemoryRecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with `records`
    pub fn with_records(records: impl IntoIterator<Item = Record>) -> Self {
        Self {
            records: RwLock::new(records.into_iter().collect()),
            ..Self::default()
        }
    }

    /// Delay every operation by `latency`
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    /// Reject every create/update with `message`
    pub fn failing_writes(mut self, message: impl Into<String>) -> Self {
        self.write_failure = Some(message.into());
        self
    }

    /// Snapshot of all stored records
    pub async fn records(&self) -> Vec<Record> {
        self.records.read().await.clone()
    }

    async fn simulate_latency(&self) {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
    }

    fn check_write(&self) -> Result<()> {
        match &self.write_failure {
            Some(message) => Err(Error::store(message.clone())),
            None => Ok(()),
        }
    }

    fn allocate_id(&self, records: &[Record]) -> RecordId {
        loop {
            let n = self.next_id.fetch_add(1, Ordering::Relaxed) + 1;
            let id = RecordId::new(format!("rec-{n:04}"));
            if !records.iter().any(|r| r.id == id) {
                return id;
            }
        }
    }
}

impl RecordStore for InMemoryRecordStore {
    async fn fetch_record(&self, id: &RecordId) -> Result<Record> {
        self.simulate_latency().await;

        let records = self.records.read().await;
        records
            .iter()
            .find(|r| &r.id == id)
            .cloned()
            .ok_or_else(|| Error::not_found(id.as_str()))
    }

    async fn create_record(&self, fields: FieldMap, owner: OwnerId) -> Result<Record> {
        self.simulate_latency().await;
        self.check_write()?;

        let mut records = self.records.write().await;
        let id = self.allocate_id(&records);
        let record = Record {
            id,
            owner: Some(owner),
            fields,
        };
        debug!("Created record {}", record.id);
        records.push(record.clone());
        Ok(record)
    }

    async fn update_record(&self, id: &RecordId, fields: FieldMap) -> Result<Record> {
        self.simulate_latency().await;
        self.check_write()?;

        let mut records = self.records.write().await;
        let record = records
            .iter_mut()
            .find(|r| &r.id == id)
            .ok_or_else(|| Error::not_found(id.as_str()))?;

        for (name, value) in fields.iter() {
            record.fields.set(name, value);
        }
        debug!("Updated record {}", record.id);
        Ok(record.clone())
    }
}
