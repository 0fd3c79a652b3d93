//! Test utilities for record store collaborators
//!
//! [`ScriptedRecordStore`] records every call and answers from queues of
//! scripted results. Fetches and writes can be held behind a gate so a test
//! can observe the dialog while a request is still outstanding.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, PoisonError};

use tokio::sync::watch;

use recform_core::prelude::*;
use recform_core::{FieldMap, OwnerId, Record, RecordId};

use crate::store::RecordStore;

/// A call received by [`ScriptedRecordStore`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreCall {
    Fetch { id: RecordId },
    Create { fields: FieldMap, owner: OwnerId },
    Update { id: RecordId, fields: FieldMap },
}

impl StoreCall {
    pub fn is_write(&self) -> bool {
        !matches!(self, StoreCall::Fetch { .. })
    }
}

struct Inner {
    calls: Mutex<Vec<StoreCall>>,
    call_count: watch::Sender<usize>,
    fetch_results: Mutex<VecDeque<Result<Record>>>,
    write_results: Mutex<VecDeque<Result<Record>>>,
    fetch_gate: watch::Sender<bool>,
    write_gate: watch::Sender<bool>,
}

/// Record store driven entirely by the test.
///
/// With empty queues a fetch fails with `NotFound` and a write succeeds,
/// echoing the submitted fields back as the stored record.
#[derive(Clone)]
pub struct ScriptedRecordStore {
    inner: Arc<Inner>,
}

impl Default for ScriptedRecordStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ScriptedRecordStore {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Inner {
                calls: Mutex::new(Vec::new()),
                call_count: watch::Sender::new(0),
                fetch_results: Mutex::new(VecDeque::new()),
                write_results: Mutex::new(VecDeque::new()),
                fetch_gate: watch::Sender::new(true),
                write_gate: watch::Sender::new(true),
            }),
        }
    }

    /// Queue the result of the next fetch
    pub fn push_fetch(&self, result: Result<Record>) {
        lock(&self.inner.fetch_results).push_back(result);
    }

    /// Queue the result of the next create or update
    pub fn push_write(&self, result: Result<Record>) {
        lock(&self.inner.write_results).push_back(result);
    }

    /// Keep fetches outstanding until [`release_fetches`](Self::release_fetches)
    pub fn hold_fetches(&self) {
        self.inner.fetch_gate.send_replace(false);
    }

    pub fn release_fetches(&self) {
        self.inner.fetch_gate.send_replace(true);
    }

    /// Keep writes outstanding until [`release_writes`](Self::release_writes)
    pub fn hold_writes(&self) {
        self.inner.write_gate.send_replace(false);
    }

    pub fn release_writes(&self) {
        self.inner.write_gate.send_replace(true);
    }

    /// Every call received so far, in order
    pub fn calls(&self) -> Vec<StoreCall> {
        lock(&self.inner.calls).clone()
    }

    pub fn write_calls(&self) -> Vec<StoreCall> {
        self.calls().into_iter().filter(StoreCall::is_write).collect()
    }

    /// Wait until at least `n` calls have been received
    pub async fn wait_for_calls(&self, n: usize) {
        let mut rx = self.inner.call_count.subscribe();
        let _ = rx.wait_for(|count| *count >= n).await;
    }

    fn record_call(&self, call: StoreCall) {
        let count = {
            let mut calls = lock(&self.inner.calls);
            calls.push(call);
            calls.len()
        };
        self.inner.call_count.send_replace(count);
    }

    async fn wait_gate(gate: &watch::Sender<bool>) {
        let mut rx = gate.subscribe();
        let _ = rx.wait_for(|open| *open).await;
    }

    fn next_write(&self, fallback: Record) -> Result<Record> {
        lock(&self.inner.write_results)
            .pop_front()
            .unwrap_or(Ok(fallback))
    }
}

fn lock<T>(mutex: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl RecordStore for ScriptedRecordStore {
    async fn fetch_record(&self, id: &RecordId) -> Result<Record> {
        self.record_call(StoreCall::Fetch { id: id.clone() });
        Self::wait_gate(&self.inner.fetch_gate).await;

        let scripted = lock(&self.inner.fetch_results).pop_front();
        scripted.unwrap_or_else(|| Err(Error::not_found(id.as_str())))
    }

    async fn create_record(&self, fields: FieldMap, owner: OwnerId) -> Result<Record> {
        self.record_call(StoreCall::Create {
            fields: fields.clone(),
            owner: owner.clone(),
        });
        Self::wait_gate(&self.inner.write_gate).await;

        self.next_write(Record {
            id: RecordId::new("scripted-new"),
            owner: Some(owner),
            fields,
        })
    }

    async fn update_record(&self, id: &RecordId, fields: FieldMap) -> Result<Record> {
        self.record_call(StoreCall::Update {
            id: id.clone(),
            fields: fields.clone(),
        });
        Self::wait_gate(&self.inner.write_gate).await;

        self.next_write(Record {
            id: id.clone(),
            owner: None,
            fields,
        })
    }
}
