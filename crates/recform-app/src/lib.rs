//! recform-app - Edit/create dialog state and orchestration
//!
//! This crate implements the TEA (The Elm Architecture) pattern for a single
//! dialog that either edits an existing record or creates a new one:
//! fetch gate, field validation, one in-flight write, error surfacing and the
//! completion handoff to the caller.

pub mod actions;
pub mod config;
pub mod engine;
pub mod engine_event;
pub mod form;
pub mod handler;
pub mod message;
pub mod state;
pub mod validation;
pub mod view;

// Re-export primary types
pub use engine::{CompletionCallback, Engine};
pub use engine_event::{EngineEvent, WriteKind};
pub use form::{FieldSpec, FormState, Submission};
pub use handler::{Task, UpdateAction, UpdateResult};
pub use message::Message;
pub use state::{CloseReason, DialogMode, DialogState, FetchState};
pub use view::DialogView;
