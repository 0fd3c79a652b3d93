//! recform - headless edit-or-create record dialog
//!
//! The dialog logic lives in the workspace crates. This crate only hosts the
//! NDJSON driver used by the `recform` binary.

pub mod headless;

pub use headless::runner::{run_headless, HeadlessOptions};
