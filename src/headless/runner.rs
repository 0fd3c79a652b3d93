//! Headless mode runner - dialog event loop without a UI
//!
//! Wires an [`Engine`] to an in-memory store, reads NDJSON commands from
//! stdin and writes NDJSON events to stdout.

use std::collections::VecDeque;
use std::io::BufRead;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{broadcast, mpsc};

use recform_app::config::load_settings;
use recform_app::{Engine, EngineEvent, FetchState};
use recform_core::prelude::*;
use recform_core::{OwnerId, Record, RecordId};
use recform_store::{InMemoryRecordStore, StaticSession};

use super::{HeadlessCommand, HeadlessEvent};

/// Everything the headless driver needs to set up one dialog
#[derive(Debug, Clone)]
pub struct HeadlessOptions {
    /// Record to edit; `None` opens the dialog in create mode
    pub id: Option<RecordId>,
    /// Principal that owns created records
    pub owner: OwnerId,
    /// JSON array of records to preload into the store
    pub seed: Option<PathBuf>,
    /// Reject every write with this message
    pub fail_writes: Option<String>,
    /// Artificial latency for every store call
    pub latency_ms: u64,
    /// Directory containing `.recform/config.toml`
    pub config_dir: PathBuf,
}

/// Run one dialog headlessly until it completes or input is exhausted
pub async fn run_headless(options: HeadlessOptions) -> Result<()> {
    info!("═══════════════════════════════════════════════════════");
    info!("recform starting in HEADLESS mode");
    match &options.id {
        Some(id) => info!("Editing record: {}", id),
        None => info!("Creating a new record"),
    }
    info!("═══════════════════════════════════════════════════════");

    let settings = load_settings(&options.config_dir);
    let store = Arc::new(build_store(&options)?);
    let session = Arc::new(StaticSession::new(options.owner.clone()));

    let mut engine = Engine::new(options.id.clone(), store, session, settings, || {
        info!("Caller notified: dialog finished")
    });
    let mut events = engine.subscribe();

    // Stdin is blocking, so it gets its own thread
    let (cmd_tx, cmd_rx) = mpsc::channel::<HeadlessCommand>(64);
    std::thread::spawn(move || {
        spawn_stdin_reader_blocking(cmd_tx);
    });

    engine.start();
    flush_events(&mut events);

    let result = headless_event_loop(&mut engine, &mut events, cmd_rx).await;

    info!("recform headless mode exiting");
    result
}

fn build_store(options: &HeadlessOptions) -> Result<InMemoryRecordStore> {
    let records = match &options.seed {
        Some(path) => load_seed(path)?,
        None => Vec::new(),
    };
    info!("Seeded store with {} record(s)", records.len());

    let mut store = InMemoryRecordStore::with_records(records)
        .with_latency(Duration::from_millis(options.latency_ms));
    if let Some(message) = &options.fail_writes {
        store = store.failing_writes(message.clone());
    }
    Ok(store)
}

/// Read a JSON array of records
fn load_seed(path: &Path) -> Result<Vec<Record>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("reading seed file {}", path.display()))?;
    let records = serde_json::from_str(&content)?;
    Ok(records)
}

/// Main headless event loop
///
/// Exits once the dialog closes, or once stdin is exhausted and no request
/// is outstanding.
async fn headless_event_loop(
    engine: &mut Engine<InMemoryRecordStore>,
    events: &mut broadcast::Receiver<EngineEvent>,
    mut cmd_rx: mpsc::Receiver<HeadlessCommand>,
) -> Result<()> {
    let mut stdin_open = true;
    let mut queued: VecDeque<HeadlessCommand> = VecDeque::new();

    loop {
        if engine.is_closed() {
            info!("Dialog closed");
            break;
        }

        if !stdin_open && !engine.state.has_outstanding_request() {
            info!("Input exhausted with no outstanding request");
            break;
        }

        tokio::select! {
            msg = engine.msg_rx.recv() => match msg {
                Some(msg) => engine.process_message(msg),
                None => {
                    info!("Message channel closed");
                    break;
                }
            },
            cmd = cmd_rx.recv(), if stdin_open => match cmd {
                Some(cmd) => queued.push_back(cmd),
                None => {
                    info!("Stdin closed");
                    stdin_open = false;
                }
            },
        }

        flush_events(events);
        apply_queued_commands(engine, events, &mut queued);
    }

    flush_events(events);
    Ok(())
}

/// Feed queued commands to the engine.
///
/// Form edits are held back while the record is still loading so a scripted
/// session can be piped in before the fetch completes.
fn apply_queued_commands(
    engine: &mut Engine<InMemoryRecordStore>,
    events: &mut broadcast::Receiver<EngineEvent>,
    queued: &mut VecDeque<HeadlessCommand>,
) {
    while let Some(cmd) = queued.pop_front() {
        if engine.is_closed() {
            if !queued.is_empty() {
                info!("Dropping {} command(s) after close", queued.len() + 1);
            }
            queued.clear();
            return;
        }

        let loading = matches!(engine.state.fetch, Some(FetchState::Loading));
        if loading && !cmd.applies_while_loading() {
            queued.push_front(cmd);
            return;
        }

        match cmd.into_message() {
            Some(msg) => engine.process_message(msg),
            None => HeadlessEvent::view(engine.view()).emit(),
        }
        flush_events(events);
    }
}

fn flush_events(events: &mut broadcast::Receiver<EngineEvent>) {
    loop {
        match events.try_recv() {
            Ok(event) => HeadlessEvent::from_engine_event(event).emit(),
            Err(broadcast::error::TryRecvError::Lagged(skipped)) => {
                warn!("Event receiver lagged, skipped {} event(s)", skipped);
            }
            Err(_) => break,
        }
    }
}

/// Read NDJSON commands from stdin and forward them (blocking version)
fn spawn_stdin_reader_blocking(cmd_tx: mpsc::Sender<HeadlessCommand>) {
    info!("Stdin reader started");

    let stdin = std::io::stdin();
    let reader = stdin.lock();

    for line in reader.lines() {
        let line = match line {
            Ok(line) => line,
            Err(e) => {
                error!("Failed to read stdin: {}", e);
                break;
            }
        };

        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }

        match HeadlessCommand::parse(trimmed) {
            Ok(cmd) => {
                if cmd_tx.blocking_send(cmd).is_err() {
                    // Event loop is gone
                    break;
                }
            }
            Err(e) => {
                warn!("Unknown stdin command: {} ({})", trimmed, e);
                HeadlessEvent::error(format!("Invalid command: {}", e), false).emit();
            }
        }
    }

    info!("Stdin reader finished");
}
