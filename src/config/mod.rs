//! Configuration module - shortcut declarations and options
//!
//! This module provides functionality for:
//! - Loading a JSON shortcut declaration from disk
//! - Default values for all options
//! - Binding declared action names to real actions
//!
//! # Module Structure
//!
//! - `defaults` - All default constant values
//! - `types` - `WebShortsOptions`, `Declaration`, `ShortcutTable`
//! - `loader` - File system loading and parsing

mod defaults;
mod loader;
mod types;

pub use defaults::{DEFAULT_HELP_DIALOG_COLUMNS, OPTIONS_KEY};

pub use types::{Declaration, ShortcutEntry, ShortcutTable, WebShortsOptions};

pub use loader::{default_config_path, load_declaration};

#[cfg(test)]
pub use defaults::{DEFAULT_DIALOG_HEIGHT, DEFAULT_DIALOG_WIDTH};

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
