//! Structured logging: human-readable stderr plus optional JSONL file output.
//!
//! - **Pretty to stderr** - compact, for developers
//! - **JSONL to file** (~/.webshorts/logs/webshorts.jsonl) - one JSON object per event
//!
//! # Usage
//!
//! ```rust,ignore
//! use webshorts::logging;
//!
//! // MUST keep guard alive for duration of program
//! let _guard = logging::init(logging::LogOptions::default());
//! tracing::info!(event_type = "shortcut_executed", keys = "Ctrl + S", "Shortcut executed");
//! ```

use std::fs::{self, OpenOptions};
use std::path::PathBuf;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter, Layer};

const LOG_FILE_NAME: &str = "webshorts.jsonl";

#[derive(Debug, Clone, Copy, Default)]
pub struct LogOptions {
    /// Default filter `debug` instead of `info` (RUST_LOG still wins).
    pub verbose: bool,
    /// Also write JSONL to [`log_path`].
    pub json_file: bool,
}

/// Guard that must be kept alive for the duration of the program.
/// Dropping this guard will flush and close the log file.
pub struct LoggingGuard {
    _file_guard: Option<WorkerGuard>,
}

/// Initialize logging.
///
/// Returns a guard that MUST be kept alive for the duration of the program.
pub fn init(options: LogOptions) -> LoggingGuard {
    let default_filter = if options.verbose { "debug" } else { "info" };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    let pretty_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_ansi(true)
        .with_target(false)
        .with_level(true)
        .with_thread_ids(false)
        .compact();

    let (json_layer, file_guard) = if options.json_file {
        match open_log_file() {
            Some(file) => {
                let (non_blocking_file, guard) = tracing_appender::non_blocking(file);
                let layer = fmt::layer()
                    .json()
                    .with_writer(non_blocking_file)
                    .with_timer(fmt::time::UtcTime::rfc_3339())
                    .with_target(true)
                    .with_level(true)
                    .with_file(false)
                    .with_line_number(false)
                    .with_span_events(FmtSpan::NONE)
                    .boxed();
                (Some(layer), Some(guard))
            }
            None => (None, None),
        }
    } else {
        (None, None)
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(json_layer)
        .with(pretty_layer)
        .init();

    if file_guard.is_some() {
        tracing::debug!(
            event_type = "app_lifecycle",
            log_path = %log_path().display(),
            "JSONL logging enabled"
        );
    }

    LoggingGuard {
        _file_guard: file_guard,
    }
}

fn open_log_file() -> Option<fs::File> {
    let log_dir = get_log_dir();
    if let Err(e) = fs::create_dir_all(&log_dir) {
        eprintln!("[LOGGING] Failed to create log directory: {}", e);
        return None;
    }

    match OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_dir.join(LOG_FILE_NAME))
    {
        Ok(file) => Some(file),
        Err(e) => {
            eprintln!("[LOGGING] Failed to open log file: {}", e);
            None
        }
    }
}

/// Get the log directory path (~/.webshorts/logs/)
fn get_log_dir() -> PathBuf {
    dirs::home_dir()
        .map(|h| h.join(".webshorts").join("logs"))
        .unwrap_or_else(|| std::env::temp_dir().join("webshorts-logs"))
}

/// Get the path to the JSONL log file
pub fn log_path() -> PathBuf {
    get_log_dir().join(LOG_FILE_NAME)
}
