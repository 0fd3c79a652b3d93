//! Configuration file parsing for recform
//!
//! Supports `.recform/config.toml` for dialog and request settings.

pub mod settings;
pub mod types;

pub use settings::{init_config_dir, load_settings};
pub use types::*;
