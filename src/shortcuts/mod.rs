//! Keyboard shortcut matching engine.
//!
//! This module provides:
//! - Key combination normalization (`"CTRL + S"` and live events alike)
//! - A per-page shortcut registry with copy-on-write snapshots
//! - Keydown dispatch with a reserved help trigger and deterministic precedence
//! - A narrow debug-sink interface for registration/execution/miss notifications
//!
//! # Example
//!
//! ```ignore
//! use webshorts::shortcuts::{dispatch, Action, DispatchContext, KeyEvent, ShortcutRegistry, ShortcutSpec};
//!
//! let mut registry = ShortcutRegistry::new();
//! registry.register("/settings", ShortcutSpec::new("CTRL + S", Action::new("save", save)))?;
//!
//! let outcome = dispatch(&KeyEvent::new("s").ctrl(), &registry.snapshot(), DispatchContext::new("/settings"));
//! assert!(outcome.prevents_default());
//! ```

mod action;
mod debug;
mod dispatch;
mod event;
mod registry;
mod types;



#[cfg(test)]
#[path = "dispatch_tests.rs"]
mod dispatch_tests;

pub use action::{Action, ActionSet};

pub use debug::{
    notify_execution, notify_help_opened, notify_not_found, notify_registration, DebugSink,
    DebugToast, ToastSink, ToastVariant, TracingSink,
};

pub use dispatch::{dispatch, help_trigger, is_help_trigger, resolve, DispatchContext, DispatchOutcome};

pub use event::{EventTarget, KeyEvent};

pub use registry::{
    shortcut_id, RegistrySnapshot, ShortcutRecord, ShortcutRegistry, ShortcutSpec, GLOBAL_PAGE,
};

pub use types::{
    from_event, is_complete, is_valid_key_combination, parse, parse_with, to_display_string,
    KeyDescriptor, KeyParseError, ParseMode,
};
