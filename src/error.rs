use thiserror::Error;
use tracing::{error, warn};

use crate::shortcuts::KeyParseError;

/// Error severity for debug notifications
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    Info,     // informational
    Warning,  // recoverable
    Error,    // operation failed
    Critical, // requires user action
}

/// Domain-specific errors for WebShorts
#[derive(Error, Debug)]
pub enum WebShortsError {
    #[error("Invalid shortcut keys '{keys}': {source}")]
    InvalidKeys {
        keys: String,
        #[source]
        source: KeyParseError,
    },

    #[error("Shortcut action is not a function: {action}")]
    ActionNotInvocable { action: String },

    #[error("Shortcut action '{action}' failed: {message}")]
    ActionFailed { action: String, message: String },

    #[error("Failed to read config '{path}': {source}")]
    ConfigRead {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config: {0}")]
    ConfigParse(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl WebShortsError {
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            Self::InvalidKeys { .. } => ErrorSeverity::Warning,
            Self::ActionNotInvocable { .. } => ErrorSeverity::Warning,
            Self::ActionFailed { .. } => ErrorSeverity::Error,
            Self::ConfigRead { .. } => ErrorSeverity::Error,
            Self::ConfigParse(_) => ErrorSeverity::Error,
            Self::Config(_) => ErrorSeverity::Warning,
        }
    }

    pub fn user_message(&self) -> String {
        match self {
            Self::InvalidKeys { keys, .. } => format!("Invalid shortcut keys: {}", keys),
            Self::ActionNotInvocable { .. } => "Action is not a function".to_string(),
            Self::ActionFailed { message, .. } => message.clone(),
            Self::ConfigRead { path, .. } => format!("Could not read config from {}", path),
            Self::ConfigParse(e) => format!("Invalid config format: {}", e),
            Self::Config(msg) => format!("Configuration issue: {}", msg),
        }
    }
}

pub type Result<T> = std::result::Result<T, WebShortsError>;

/// Extension trait for silent error logging with caller location tracking.
/// Use when the operation is recoverable and the caller only needs a log line.
///
/// # Examples
///
/// ```ignore
/// use webshorts::error::ResultExt;
///
/// // Log and continue if a declaration entry is malformed
/// registry.register(page, spec).warn_on_err();
/// ```
pub trait ResultExt<T> {
    /// Log error with caller location and return None. Use for recoverable failures.
    fn log_err(self) -> Option<T>;
    /// Log as warning with caller location and return None. Use for expected failures.
    fn warn_on_err(self) -> Option<T>;
}

impl<T, E: std::fmt::Display> ResultExt<T> for std::result::Result<T, E> {
    #[track_caller]
    fn log_err(self) -> Option<T> {
        match self {
            Ok(value) => Some(value),
            Err(error) => {
                let caller = std::panic::Location::caller();
                error!(
                    error = %error,
                    file = caller.file(),
                    line = caller.line(),
                    "Operation failed"
                );
                None
            }
        }
    }

    #[track_caller]
    fn warn_on_err(self) -> Option<T> {
        match self {
            Ok(value) => Some(value),
            Err(error) => {
                let caller = std::panic::Location::caller();
                warn!(
                    error = %error,
                    file = caller.file(),
                    line = caller.line(),
                    "Operation had warning"
                );
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_of_action_failures() {
        let failed = WebShortsError::ActionFailed {
            action: "save".into(),
            message: "boom".into(),
        };
        assert_eq!(failed.severity(), ErrorSeverity::Error);
        assert_eq!(failed.user_message(), "boom");

        let unbound = WebShortsError::ActionNotInvocable {
            action: "save".into(),
        };
        assert_eq!(unbound.severity(), ErrorSeverity::Warning);
        assert_eq!(unbound.user_message(), "Action is not a function");
    }

    #[test]
    fn test_invalid_keys_message_includes_source() {
        let err = WebShortsError::InvalidKeys {
            keys: "CTRL + SHIFT".into(),
            source: KeyParseError::MissingKey,
        };
        assert_eq!(
            err.to_string(),
            "Invalid shortcut keys 'CTRL + SHIFT': key combination has no key, only modifiers"
        );
    }

    #[test]
    fn test_result_ext_returns_none_on_error() {
        let ok: std::result::Result<u8, WebShortsError> = Ok(3);
        assert_eq!(ok.warn_on_err(), Some(3));

        let err: std::result::Result<u8, WebShortsError> =
            Err(WebShortsError::Config("bad".into()));
        assert_eq!(err.log_err(), None);
    }
}
