//! Keydown dispatch.
//!
//! Each event is handled on its own; the only state consulted is the
//! registry snapshot and the current page. Order of checks:
//!
//! 1. Text-entry targets are ignored outright.
//! 2. Shift+? opens the help overlay, shadowing any registered binding.
//! 3. Registered records are scanned for a structural match. Ties between
//!    colliding descriptors are broken by scope, then registration order:
//!    current page first, then global (`"*"`), then any other page.
//! 4. A match suppresses the default and runs the action; failures are
//!    caught here and reported, never propagated.
//! 5. Otherwise the miss is reported and the default proceeds.

use tracing::{debug, error, warn};

use super::debug::{notify_execution, notify_not_found, DebugSink};
use super::event::KeyEvent;
use super::registry::{RegistrySnapshot, ShortcutRecord};
use super::types::{from_event, to_display_string, KeyDescriptor};
use crate::error::{ErrorSeverity, WebShortsError};

/// The reserved help-overlay combination: Shift + "?" and nothing else.
pub fn help_trigger() -> KeyDescriptor {
    KeyDescriptor::key("?").with_shift()
}

pub fn is_help_trigger(descriptor: &KeyDescriptor) -> bool {
    descriptor.shift
        && !descriptor.ctrl
        && !descriptor.alt
        && !descriptor.meta
        && descriptor.key.as_deref() == Some("?")
}

/// Result of dispatching one event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// Target was a text-entry surface; nothing was looked at.
    Ignored,
    /// The reserved trigger was pressed; the host should open the help overlay.
    HelpRequested,
    /// A record matched and its action ran.
    Executed { id: String },
    /// A record matched but its action failed or was not invocable.
    Failed { id: String, error: String },
    /// No record matched `keys` (display form of the pressed combination).
    NotFound { keys: String },
}

impl DispatchOutcome {
    /// Whether the host should suppress its default handling of the key.
    pub fn prevents_default(&self) -> bool {
        matches!(
            self,
            Self::HelpRequested | Self::Executed { .. } | Self::Failed { .. }
        )
    }

    pub fn is_match(&self) -> bool {
        matches!(self, Self::Executed { .. } | Self::Failed { .. })
    }
}

/// Per-event inputs besides the event and the registry.
#[derive(Clone, Copy)]
pub struct DispatchContext<'a> {
    pub page: &'a str,
    /// Send notifications to the sink.
    pub debug: bool,
    pub sink: Option<&'a dyn DebugSink>,
}

impl<'a> DispatchContext<'a> {
    pub fn new(page: &'a str) -> Self {
        Self {
            page,
            debug: false,
            sink: None,
        }
    }

    pub fn with_debug(mut self, sink: Option<&'a dyn DebugSink>) -> Self {
        self.debug = true;
        self.sink = sink;
        self
    }
}

fn scope_rank(record: &ShortcutRecord, page: &str) -> u8 {
    if record.page == page {
        0
    } else if record.is_global() {
        1
    } else {
        2
    }
}

/// Find the record that handles `descriptor` on `page`.
pub fn resolve<'a>(
    descriptor: &KeyDescriptor,
    page: &str,
    snapshot: &'a RegistrySnapshot,
) -> Option<&'a ShortcutRecord> {
    snapshot
        .iter()
        .filter(|record| record.keys == *descriptor)
        .min_by_key(|record| scope_rank(record, page))
}

/// Dispatch one keydown event against `snapshot`.
pub fn dispatch(event: &KeyEvent, snapshot: &RegistrySnapshot, ctx: DispatchContext<'_>) -> DispatchOutcome {
    if event.target.is_text_entry() {
        return DispatchOutcome::Ignored;
    }

    let pressed = from_event(event);
    if is_help_trigger(&pressed) {
        debug!(page = ctx.page, "Help trigger pressed");
        return DispatchOutcome::HelpRequested;
    }

    let pressed_keys = to_display_string(&pressed);

    let Some(record) = resolve(&pressed, ctx.page, snapshot) else {
        debug!(keys = %pressed_keys, page = ctx.page, "No shortcut found");
        if ctx.debug {
            notify_not_found(ctx.sink, &pressed_keys, ctx.page);
        }
        return DispatchOutcome::NotFound { keys: pressed_keys };
    };

    match record.action.invoke() {
        Ok(()) => {
            debug!(id = %record.id, keys = %pressed_keys, "Shortcut executed");
            if ctx.debug {
                notify_execution(ctx.sink, &pressed_keys, record.action_name(), true, None);
            }
            DispatchOutcome::Executed {
                id: record.id.clone(),
            }
        }
        Err(err) => {
            let (action, message) = match &err {
                WebShortsError::ActionNotInvocable { action } => {
                    warn!(id = %record.id, action = %action, "Shortcut action is not a function");
                    ("invalid", err.user_message())
                }
                _ => {
                    match err.severity() {
                        ErrorSeverity::Info | ErrorSeverity::Warning => {
                            warn!(id = %record.id, error = %err, "Shortcut action reported a problem")
                        }
                        _ => error!(id = %record.id, error = %err, "Error executing shortcut"),
                    }
                    (record.action_name(), err.user_message())
                }
            };
            if ctx.debug {
                notify_execution(ctx.sink, &pressed_keys, action, false, Some(&message));
            }
            DispatchOutcome::Failed {
                id: record.id.clone(),
                error: message,
            }
        }
    }
}
