//! Engine - orchestration for one dialog instance
//!
//! The Engine owns the TEA state, the message channel, the collaborators and
//! the completion callback. Frontends (the headless driver, tests, a real UI
//! layer) feed it [`Message`]s and read [`DialogView`]s and [`EngineEvent`]s.

use std::sync::Arc;

use tokio::sync::{broadcast, mpsc};
use tracing::{debug, info};

use recform_core::RecordId;
use recform_store::{RecordStore, SessionProvider};

use crate::actions;
use crate::config::Settings;
use crate::engine_event::{EngineEvent, WriteKind};
use crate::form::{default_schema, FieldSpec};
use crate::handler::{self, UpdateAction};
use crate::message::Message;
use crate::state::{CloseReason, DialogMode, DialogState};
use crate::view::DialogView;

/// Caller notification fired once when the dialog's work is finished
pub type CompletionCallback = Box<dyn FnOnce() + Send>;

/// Lightweight snapshot of state for change detection.
///
/// Captured before message processing, compared after to detect
/// what changed and emit appropriate EngineEvents.
#[derive(Debug, Clone)]
struct StateSnapshot {
    form_visible: bool,
    fetch_failed: bool,
    pending: bool,
    submit_attempts: u32,
}

impl StateSnapshot {
    fn capture(state: &DialogState) -> Self {
        Self {
            form_visible: state.is_form_visible(),
            fetch_failed: state.fetch_error().is_some(),
            pending: state.form.submission.is_pending(),
            submit_attempts: state.form.submit_attempts,
        }
    }
}

/// Orchestration engine for an edit/create dialog.
///
/// `S` is the record store. Session access is injected as a
/// [`SessionProvider`] rather than read from ambient state.
pub struct Engine<S> {
    /// TEA dialog state (the Model)
    pub state: DialogState,

    /// Sender half of the message channel. Clone this for input sources.
    pub msg_tx: mpsc::Sender<Message>,

    /// Receiver half of the message channel. Store task results arrive here.
    pub msg_rx: mpsc::Receiver<Message>,

    /// Settings the dialog was created with
    pub settings: Settings,

    store: Arc<S>,

    session: Arc<dyn SessionProvider>,

    on_complete: Option<CompletionCallback>,

    event_tx: broadcast::Sender<EngineEvent>,
}

impl<S> Engine<S>
where
    S: RecordStore + Sync + 'static,
{
    /// Create a dialog with the default single-field schema.
    ///
    /// `id` selects the mode: `None` creates, `Some` edits that record.
    pub fn new(
        id: Option<RecordId>,
        store: Arc<S>,
        session: Arc<dyn SessionProvider>,
        settings: Settings,
        on_complete: impl FnOnce() + Send + 'static,
    ) -> Self {
        Self::with_schema(id, default_schema(), store, session, settings, on_complete)
    }

    pub fn with_schema(
        id: Option<RecordId>,
        schema: Vec<FieldSpec>,
        store: Arc<S>,
        session: Arc<dyn SessionProvider>,
        settings: Settings,
        on_complete: impl FnOnce() + Send + 'static,
    ) -> Self {
        let state = DialogState::with_settings(id, schema, &settings);
        let (msg_tx, msg_rx) = mpsc::channel::<Message>(64);
        let (event_tx, _) = broadcast::channel(64);

        Self {
            state,
            msg_tx,
            msg_rx,
            settings,
            store,
            session,
            on_complete: Some(Box::new(on_complete)),
            event_tx,
        }
    }

    /// Subscribe to engine events.
    ///
    /// Subscribe before [`start`](Self::start) to see `FormReady` in create
    /// mode.
    pub fn subscribe(&self) -> broadcast::Receiver<EngineEvent> {
        self.event_tx.subscribe()
    }

    /// Get a clone of the message sender for input sources
    pub fn msg_sender(&self) -> mpsc::Sender<Message> {
        self.msg_tx.clone()
    }

    /// Mount the dialog: opens the form in create mode, starts the fetch in
    /// edit mode. Must be called from within a tokio runtime.
    pub fn start(&mut self) {
        info!("Opening dialog: {}", self.state.title());
        self.process_message(Message::Open);
        if self.state.mode == DialogMode::Create {
            self.emit(EngineEvent::FormReady {
                title: self.state.title(),
                fields: self.state.form.fields.clone(),
            });
        }
    }

    /// Process a single message through the TEA update cycle.
    pub fn process_message(&mut self, msg: Message) {
        let pre = StateSnapshot::capture(&self.state);

        let result = handler::update(&mut self.state, msg);

        self.emit_state_events(&pre);

        if let Some(action) = result.action {
            self.handle_action(action);
        }
    }

    /// Wait for the next message (usually a store result) and process it.
    /// Returns `false` if the channel is closed.
    pub async fn process_next(&mut self) -> bool {
        match self.msg_rx.recv().await {
            Some(msg) => {
                self.process_message(msg);
                true
            }
            None => false,
        }
    }

    /// Process messages until the dialog closes
    pub async fn run(&mut self) {
        while !self.state.is_closed() {
            if !self.process_next().await {
                break;
            }
        }
    }

    pub fn is_closed(&self) -> bool {
        self.state.is_closed()
    }

    /// What the UI should currently show
    pub fn view(&self) -> Option<DialogView> {
        DialogView::from_state(&self.state)
    }

    fn handle_action(&mut self, action: UpdateAction) {
        match action {
            UpdateAction::SpawnTask(task) => {
                actions::spawn_task(
                    task,
                    self.msg_tx.clone(),
                    Arc::clone(&self.store),
                    Arc::clone(&self.session),
                    self.settings.requests.clone(),
                );
            }
            UpdateAction::NotifyComplete { reason } => self.complete(reason),
        }
    }

    fn complete(&mut self, reason: CloseReason) {
        match self.on_complete.take() {
            Some(on_complete) => {
                info!("Dialog complete: {:?}", reason);
                on_complete();
                self.emit(EngineEvent::Completed { reason });
            }
            None => debug!("Completion already signalled, ignoring {:?}", reason),
        }
    }

    fn emit_state_events(&self, pre: &StateSnapshot) {
        let state = &self.state;
        let post = StateSnapshot::capture(state);

        if !pre.form_visible && post.form_visible {
            self.emit(EngineEvent::FormReady {
                title: state.title(),
                fields: state.form.fields.clone(),
            });
        }

        if !pre.fetch_failed && post.fetch_failed {
            if let Some(message) = state.fetch_error() {
                self.emit(EngineEvent::FetchFailed {
                    message: message.to_string(),
                });
            }
        }

        if post.submit_attempts > pre.submit_attempts && !state.form.field_errors.is_empty() {
            self.emit(EngineEvent::ValidationFailed {
                errors: state.form.field_errors.clone(),
            });
        }

        if !pre.pending && post.pending {
            let kind = match &state.mode {
                DialogMode::Create => WriteKind::Create,
                DialogMode::Edit(id) => WriteKind::Update { id: id.clone() },
            };
            self.emit(EngineEvent::SubmissionStarted { kind });
        }

        if pre.pending && !post.pending {
            if let Some(message) = state.form.alert() {
                self.emit(EngineEvent::SubmissionFailed {
                    message: message.to_string(),
                });
            }
        }
    }

    fn emit(&self, event: EngineEvent) {
        // No subscribers is fine
        let _ = self.event_tx.send(event);
    }
}
