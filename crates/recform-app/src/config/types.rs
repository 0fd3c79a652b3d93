//! Configuration types

use serde::{Deserialize, Serialize};

/// Settings from `.recform/config.toml`
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Settings {
    #[serde(default)]
    pub dialog: DialogSettings,

    #[serde(default)]
    pub requests: RequestSettings,
}

/// Dialog presentation and validation behaviour
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DialogSettings {
    /// Entity name used in the title ("Create Item" / "Update Item")
    #[serde(default = "default_entity_label")]
    pub entity_label: String,

    /// Re-run validation on every field change once a submit was attempted
    #[serde(default = "default_true")]
    pub revalidate_on_change: bool,
}

impl Default for DialogSettings {
    fn default() -> Self {
        Self {
            entity_label: default_entity_label(),
            revalidate_on_change: true,
        }
    }
}

/// Record store request limits. `0` disables a timeout.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RequestSettings {
    #[serde(default)]
    pub fetch_timeout_ms: u64,

    #[serde(default)]
    pub write_timeout_ms: u64,
}

fn default_entity_label() -> String {
    "Item".to_string()
}

fn default_true() -> bool {
    true
}
