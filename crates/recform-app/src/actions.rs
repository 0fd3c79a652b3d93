//! Action handlers: record store task spawning
//!
//! Each [`Task`] runs on its own tokio task and reports back to the TEA loop
//! as exactly one [`Message`]. Store failures never escape: they become
//! `RecordFetchFailed` / `WriteFailed` carrying a human-readable message.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tracing::{debug, warn};

use recform_core::prelude::*;
use recform_store::{RecordStore, SessionProvider};

use crate::config::RequestSettings;
use crate::handler::Task;
use crate::message::Message;

/// Execute a store task in the background, sending its result to `msg_tx`
pub fn spawn_task<S>(
    task: Task,
    msg_tx: mpsc::Sender<Message>,
    store: Arc<S>,
    session: Arc<dyn SessionProvider>,
    requests: RequestSettings,
) where
    S: RecordStore + Sync + 'static,
{
    tokio::spawn(async move {
        let msg = execute_task(task, store.as_ref(), session.as_ref(), &requests).await;
        if msg_tx.send(msg).await.is_err() {
            debug!("Dialog dropped before the store result was delivered");
        }
    });
}

/// Run a single store task and convert the outcome into a message
pub async fn execute_task<S>(
    task: Task,
    store: &S,
    session: &dyn SessionProvider,
    requests: &RequestSettings,
) -> Message
where
    S: RecordStore + Sync,
{
    match task {
        Task::FetchRecord { id } => {
            let fetch = store.fetch_record(&id);
            match with_timeout("fetch", requests.fetch_timeout_ms, fetch).await {
                Ok(record) => Message::RecordFetched { record },
                Err(e) => {
                    warn!("Fetching record {} failed: {}", id, e);
                    Message::RecordFetchFailed {
                        error: e.user_message(),
                    }
                }
            }
        }

        Task::CreateRecord { fields } => {
            let owner = session.current_owner_id();
            debug!("Creating record for owner {}", owner);
            let create = store.create_record(fields, owner);
            write_outcome(with_timeout("create", requests.write_timeout_ms, create).await)
        }

        Task::UpdateRecord { id, fields } => {
            let update = store.update_record(&id, fields);
            write_outcome(with_timeout("update", requests.write_timeout_ms, update).await)
        }
    }
}

fn write_outcome(result: Result<recform_core::Record>) -> Message {
    match result {
        Ok(record) => Message::WriteSucceeded { record },
        Err(e) => {
            warn!("Write failed: {:?}", e);
            Message::WriteFailed {
                error: e.user_message(),
            }
        }
    }
}

/// Await `request`, giving up after `timeout_ms` (0 waits forever)
async fn with_timeout<T>(
    operation: &str,
    timeout_ms: u64,
    request: impl Future<Output = Result<T>>,
) -> Result<T> {
    if timeout_ms == 0 {
        return request.await;
    }

    match tokio::time::timeout(Duration::from_millis(timeout_ms), request).await {
        Ok(result) => result,
        Err(_) => Err(Error::timeout(operation, timeout_ms)),
    }
}
