//! Debug sink: the side channel told about registrations, executions and misses.
//!
//! The sink is optional. Every `notify_*` helper takes an `Option<&dyn DebugSink>`
//! and falls back to a local `tracing::warn!` when there is none.

use tracing::{info, warn};

/// Receiver of debug notifications.
pub trait DebugSink {
    fn registration(&self, keys: &str, action: &str, page: &str);
    fn execution(&self, keys: &str, action: &str, success: bool, error: Option<&str>);
    fn not_found(&self, keys: &str, page: &str);
    fn help_opened(&self, count: usize);
}

/// Toast variant determines the visual style of a debug toast
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ToastVariant {
    Success,
    Warning,
    Error,
    #[default]
    Info,
}

/// A formatted debug notification, ready for a toast renderer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DebugToast {
    pub message: String,
    pub variant: ToastVariant,
}

impl DebugToast {
    fn new(message: String, variant: ToastVariant) -> Self {
        Self { message, variant }
    }

    pub fn registration(keys: &str, action: &str, page: &str) -> Self {
        Self::new(
            format!("Shortcut registered: {} → {} ({})", keys, action, page),
            ToastVariant::Success,
        )
    }

    pub fn execution(keys: &str, action: &str, success: bool, error: Option<&str>) -> Self {
        if success {
            Self::new(
                format!("Shortcut executed: {} → {}", keys, action),
                ToastVariant::Success,
            )
        } else {
            Self::new(
                format!(
                    "Shortcut failed: {} → {} ({})",
                    keys,
                    action,
                    error.unwrap_or("unknown error")
                ),
                ToastVariant::Error,
            )
        }
    }

    pub fn not_found(keys: &str, page: &str) -> Self {
        Self::new(
            format!("No shortcut found for: {} on page: {}", keys, page),
            ToastVariant::Warning,
        )
    }

    pub fn help_opened(count: usize) -> Self {
        Self::new(
            format!("Help dialog opened with {} shortcuts", count),
            ToastVariant::Info,
        )
    }
}

/// Formats notifications as toasts and hands them to a callback.
pub struct ToastSink<F: Fn(DebugToast)> {
    emit: F,
}

impl<F: Fn(DebugToast)> ToastSink<F> {
    pub fn new(emit: F) -> Self {
        Self { emit }
    }
}

impl<F: Fn(DebugToast)> DebugSink for ToastSink<F> {
    fn registration(&self, keys: &str, action: &str, page: &str) {
        (self.emit)(DebugToast::registration(keys, action, page));
    }

    fn execution(&self, keys: &str, action: &str, success: bool, error: Option<&str>) {
        (self.emit)(DebugToast::execution(keys, action, success, error));
    }

    fn not_found(&self, keys: &str, page: &str) {
        (self.emit)(DebugToast::not_found(keys, page));
    }

    fn help_opened(&self, count: usize) {
        (self.emit)(DebugToast::help_opened(count));
    }
}

/// Writes notifications as structured tracing events.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl DebugSink for TracingSink {
    fn registration(&self, keys: &str, action: &str, page: &str) {
        info!(event_type = "shortcut_registered", keys, action, page, "Shortcut registered");
    }

    fn execution(&self, keys: &str, action: &str, success: bool, error: Option<&str>) {
        if success {
            info!(event_type = "shortcut_executed", keys, action, "Shortcut executed");
        } else {
            warn!(
                event_type = "shortcut_failed",
                keys,
                action,
                error = error.unwrap_or("unknown error"),
                "Shortcut failed"
            );
        }
    }

    fn not_found(&self, keys: &str, page: &str) {
        info!(event_type = "shortcut_not_found", keys, page, "No shortcut found");
    }

    fn help_opened(&self, count: usize) {
        info!(event_type = "help_opened", count, "Help dialog opened");
    }
}

fn missing_sink(notification: &str) {
    warn!(notification, "Debug sink not available");
}

pub fn notify_registration(sink: Option<&dyn DebugSink>, keys: &str, action: &str, page: &str) {
    match sink {
        Some(sink) => sink.registration(keys, action, page),
        None => missing_sink("registration"),
    }
}

pub fn notify_execution(
    sink: Option<&dyn DebugSink>,
    keys: &str,
    action: &str,
    success: bool,
    error: Option<&str>,
) {
    match sink {
        Some(sink) => sink.execution(keys, action, success, error),
        None => missing_sink("execution"),
    }
}

pub fn notify_not_found(sink: Option<&dyn DebugSink>, keys: &str, page: &str) {
    match sink {
        Some(sink) => sink.not_found(keys, page),
        None => missing_sink("not_found"),
    }
}

pub fn notify_help_opened(sink: Option<&dyn DebugSink>, count: usize) {
    match sink {
        Some(sink) => sink.help_opened(count),
        None => missing_sink("help_opened"),
    }
}
