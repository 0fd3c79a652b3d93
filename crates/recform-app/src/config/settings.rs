//! Settings parser for .recform/config.toml

use super::types::Settings;
use recform_core::prelude::*;
use std::path::Path;

const CONFIG_FILENAME: &str = "config.toml";
const RECFORM_DIR: &str = ".recform";

/// Load settings from `<dir>/.recform/config.toml`.
///
/// A missing or unreadable file yields defaults; problems are logged, never
/// returned.
pub fn load_settings(dir: &Path) -> Settings {
    let config_path = dir.join(RECFORM_DIR).join(CONFIG_FILENAME);

    if !config_path.exists() {
        debug!("No config file at {:?}, using defaults", config_path);
        return Settings::default();
    }

    match std::fs::read_to_string(&config_path) {
        Ok(content) => match toml::from_str(&content) {
            Ok(settings) => {
                debug!("Loaded settings from {:?}", config_path);
                settings
            }
            Err(e) => {
                warn!("Failed to parse {:?}: {}", config_path, e);
                Settings::default()
            }
        },
        Err(e) => {
            warn!("Failed to read {:?}: {}", config_path, e);
            Settings::default()
        }
    }
}

/// Create a commented default config file in `<dir>/.recform/`
pub fn init_config_dir(dir: &Path) -> Result<()> {
    let recform_dir = dir.join(RECFORM_DIR);

    if !recform_dir.exists() {
        std::fs::create_dir_all(&recform_dir)
            .map_err(|e| Error::config(format!("Failed to create .recform dir: {}", e)))?;
    }

    let config_path = recform_dir.join(CONFIG_FILENAME);
    if !config_path.exists() {
        let default_content = r#"# recform configuration

[dialog]
# Entity name shown in the dialog title ("Create Item" / "Update Item")
entity_label = "Item"
# Re-validate fields as they change once a submit has been attempted
revalidate_on_change = true

[requests]
# Milliseconds before a record fetch is reported as failed (0 = wait forever)
fetch_timeout_ms = 0
# Milliseconds before a save is reported as failed (0 = wait forever)
write_timeout_ms = 0
"#;
        std::fs::write(&config_path, default_content)
            .map_err(|e| Error::config(format!("Failed to write config.toml: {}", e)))?;
        info!("Created default config at {:?}", config_path);
    }

    Ok(())
}
