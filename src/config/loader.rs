//! Configuration loading from file system
//!
//! Handles reading and parsing a JSON shortcut declaration.

use std::fs;
use std::path::PathBuf;
use tracing::{info, instrument, warn};

use super::defaults::{DEFAULT_CONFIG_DIR, DEFAULT_CONFIG_FILE};
use super::types::Declaration;
use crate::error::{Result, WebShortsError};

/// Default declaration path: ~/.webshorts/webshorts.json
pub fn default_config_path() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_default()
        .join(DEFAULT_CONFIG_DIR)
        .join(DEFAULT_CONFIG_FILE)
}

/// Load a declaration from `path` (a leading `~` is expanded).
/// A missing or malformed file is an error.
#[instrument(name = "load_declaration")]
pub fn load_declaration(path: &str) -> Result<Declaration> {
    let path = PathBuf::from(shellexpand::tilde(path).as_ref());

    let content = fs::read_to_string(&path).map_err(|source| WebShortsError::ConfigRead {
        path: path.display().to_string(),
        source,
    })?;

    match Declaration::from_json_str(&content) {
        Ok(declaration) => {
            info!(
                path = %path.display(),
                pages = declaration.pages.len(),
                "Successfully loaded shortcut declaration"
            );
            Ok(declaration)
        }
        Err(e) => {
            // Common mistake: a page mapped to a single object instead of an array
            let hint = if e.to_string().contains("expected a sequence") {
                "Hint: every page must map to an array of shortcuts, e.g. \"/settings\": [{ \"keys\": \"CTRL + S\", \"action\": \"save\" }]"
            } else {
                ""
            };
            warn!(path = %path.display(), error = %e, hint, "Failed to parse shortcut declaration");
            Err(e)
        }
    }
}
