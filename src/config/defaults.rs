//! Default configuration values
//!
//! All constants used throughout the config module are defined here.

/// Reserved top-level key carrying options in a declaration file
pub const OPTIONS_KEY: &str = "WEBSHORTS_OPTIONS";

/// Default debug notifications flag
pub const DEFAULT_DEBUG: bool = false;

/// Default help overlay settings
pub const DEFAULT_SHOW_DESCRIPTIONS: bool = true;
pub const DEFAULT_HELP_DIALOG_COLUMNS: usize = 2;
pub const DEFAULT_DIALOG_WIDTH: u32 = 800;
pub const DEFAULT_DIALOG_HEIGHT: u32 = 600;

/// Default key parsing mode (false = last non-modifier token wins)
pub const DEFAULT_STRICT_KEYS: bool = false;

/// Default declaration file, relative to the home directory
pub const DEFAULT_CONFIG_DIR: &str = ".webshorts";
pub const DEFAULT_CONFIG_FILE: &str = "webshorts.json";
