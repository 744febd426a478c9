//! WebShorts - page-scoped keyboard shortcuts with a generated help overlay
//!
//! This library provides the shortcut-matching engine (key normalization,
//! registry, keydown dispatch), the provider that ties it to a page context,
//! and the declaration/config layer that feeds it.

pub mod config;
pub mod error;
pub mod help;
pub mod listener;
pub mod logging;
pub mod provider;
pub mod shortcuts;

pub use config::{Declaration, ShortcutTable, WebShortsOptions};
pub use error::{Result, WebShortsError};
pub use help::HelpOverlay;
pub use listener::ShortcutListener;
pub use provider::ShortcutProvider;
pub use shortcuts::{Action, ActionSet, DispatchOutcome, KeyDescriptor, KeyEvent, ShortcutSpec};
