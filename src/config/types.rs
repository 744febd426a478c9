//! Configuration type definitions
//!
//! This module contains the struct definitions for options and declarations.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::warn;

use super::defaults::*;
use crate::error::WebShortsError;
use crate::shortcuts::{ActionSet, ParseMode, ShortcutSpec, GLOBAL_PAGE};

// ============================================
// OPTIONS
// ============================================

/// Options carried under the reserved `WEBSHORTS_OPTIONS` key
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WebShortsOptions {
    /// Send registration/execution/miss notifications to the debug sink (default: false)
    #[serde(default = "default_debug")]
    pub debug: bool,
    /// Show descriptions in the help overlay (default: true)
    #[serde(default = "default_show_descriptions")]
    pub show_descriptions: bool,
    /// Number of columns in the help overlay (default: 2)
    #[serde(default = "default_help_dialog_columns")]
    pub help_dialog_columns: usize,
    /// Help overlay width in px (default: 800)
    #[serde(default = "default_dialog_width")]
    pub dialog_width: u32,
    /// Help overlay height in px (default: 600)
    #[serde(default = "default_dialog_height")]
    pub dialog_height: u32,
    /// Reject key strings naming more than one key instead of keeping the last (default: false)
    #[serde(default = "default_strict_keys")]
    pub strict_keys: bool,
}

fn default_debug() -> bool {
    DEFAULT_DEBUG
}
fn default_show_descriptions() -> bool {
    DEFAULT_SHOW_DESCRIPTIONS
}
fn default_help_dialog_columns() -> usize {
    DEFAULT_HELP_DIALOG_COLUMNS
}
fn default_dialog_width() -> u32 {
    DEFAULT_DIALOG_WIDTH
}
fn default_dialog_height() -> u32 {
    DEFAULT_DIALOG_HEIGHT
}
fn default_strict_keys() -> bool {
    DEFAULT_STRICT_KEYS
}

impl Default for WebShortsOptions {
    fn default() -> Self {
        WebShortsOptions {
            debug: DEFAULT_DEBUG,
            show_descriptions: DEFAULT_SHOW_DESCRIPTIONS,
            help_dialog_columns: DEFAULT_HELP_DIALOG_COLUMNS,
            dialog_width: DEFAULT_DIALOG_WIDTH,
            dialog_height: DEFAULT_DIALOG_HEIGHT,
            strict_keys: DEFAULT_STRICT_KEYS,
        }
    }
}

impl WebShortsOptions {
    pub fn parse_mode(&self) -> ParseMode {
        ParseMode::from_strict(self.strict_keys)
    }

    /// Column count, never less than one
    pub fn columns(&self) -> usize {
        self.help_dialog_columns.max(1)
    }
}

// ============================================
// DECLARATION (on-disk form)
// ============================================

/// One declared shortcut. `action` names an entry of an `ActionSet`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShortcutEntry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub keys: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub short_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// A static shortcut declaration: page id (or `"*"`) to entries, plus options.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Declaration {
    #[serde(rename = "WEBSHORTS_OPTIONS", default)]
    pub options: WebShortsOptions,
    #[serde(flatten)]
    pub pages: BTreeMap<String, Vec<ShortcutEntry>>,
}

impl Declaration {
    pub fn from_json_str(json: &str) -> crate::error::Result<Self> {
        let declaration: Self = serde_json::from_str(json)?;
        if declaration.pages.keys().any(|page| page.trim().is_empty()) {
            return Err(WebShortsError::Config("page names must not be empty".to_string()));
        }
        Ok(declaration)
    }

    /// Every (page, keys) pair declared, for validation.
    pub fn declared_keys(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pages.iter().flat_map(|(page, entries)| {
            entries
                .iter()
                .filter_map(move |e| e.keys.as_deref().map(|k| (page.as_str(), k)))
        })
    }

    /// Resolve action names against `actions`.
    ///
    /// Entries without `keys` or `action` are skipped. Names missing from
    /// `actions` become non-invocable actions.
    pub fn bind(&self, actions: &ActionSet) -> ShortcutTable {
        let mut table = ShortcutTable::new().with_options(self.options.clone());
        for (page, entries) in &self.pages {
            for entry in entries {
                let (Some(keys), Some(action)) = (&entry.keys, &entry.action) else {
                    warn!(page = %page, entry = ?entry, "Shortcut entry needs keys and action, skipping");
                    continue;
                };
                let mut spec = ShortcutSpec::new(keys.clone(), actions.resolve(action));
                spec.short_name = entry.short_name.clone();
                spec.description = entry.description.clone();
                table = table.page(page.clone(), spec);
            }
        }
        table
    }
}

// ============================================
// SHORTCUT TABLE (bound form)
// ============================================

/// A declaration with real actions, ready to load into a provider.
#[derive(Debug, Clone, Default)]
pub struct ShortcutTable {
    pub options: WebShortsOptions,
    pages: BTreeMap<String, Vec<ShortcutSpec>>,
}

impl ShortcutTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(mut self, options: WebShortsOptions) -> Self {
        self.options = options;
        self
    }

    /// Add a shortcut active on every page.
    pub fn global(self, spec: ShortcutSpec) -> Self {
        self.page(GLOBAL_PAGE, spec)
    }

    pub fn page(mut self, page: impl Into<String>, spec: ShortcutSpec) -> Self {
        self.pages.entry(page.into()).or_default().push(spec);
        self
    }

    pub fn entries(&self, page: &str) -> &[ShortcutSpec] {
        self.pages.get(page).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn pages(&self) -> impl Iterator<Item = &str> {
        self.pages.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.pages.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
