//! Shortcut registry keyed by `page + ":" + raw key string`.
//!
//! Records live in a Vec (registration order, which is also the dispatch
//! tie-break order) with a HashMap index for O(1) lookup by id. The whole
//! table sits behind an `Rc` and is copied on write, so a `RegistrySnapshot`
//! taken before a mutation keeps seeing the old table. Readers never observe
//! a half-applied clear + reload.

use std::collections::HashMap;
use std::rc::Rc;
use std::time::Instant;

use tracing::{debug, warn};

use super::action::Action;
use super::types::{parse_with, KeyDescriptor, KeyParseError, ParseMode};
use crate::error::{Result, WebShortsError};

/// Page sentinel for shortcuts that apply on every page.
pub const GLOBAL_PAGE: &str = "*";

/// Registry id for a (page, raw keys) pair.
pub fn shortcut_id(page: &str, keys: &str) -> String {
    format!("{}:{}", page, keys)
}

/// What a caller hands to `register`.
#[derive(Clone, Debug)]
pub struct ShortcutSpec {
    pub keys: String,
    pub action: Action,
    pub short_name: Option<String>,
    pub description: Option<String>,
}

impl ShortcutSpec {
    pub fn new(keys: impl Into<String>, action: Action) -> Self {
        Self {
            keys: keys.into(),
            action,
            short_name: None,
            description: None,
        }
    }

    pub fn with_short_name(mut self, short_name: impl Into<String>) -> Self {
        self.short_name = Some(short_name.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// One registered binding. Never mutated after insertion.
#[derive(Clone, Debug)]
pub struct ShortcutRecord {
    pub id: String,
    pub keys: KeyDescriptor,
    /// The string the caller registered, kept for display and unregister.
    pub keys_string: String,
    pub action: Action,
    pub short_name: Option<String>,
    pub description: Option<String>,
    pub page: String,
    /// Monotonic per-registry counter. Debugging only; not used in matching.
    pub sequence: u64,
    pub registered_at: Instant,
}

impl ShortcutRecord {
    pub fn is_global(&self) -> bool {
        self.page == GLOBAL_PAGE
    }

    pub fn action_name(&self) -> &str {
        self.action.name()
    }

    /// Short name, or the action name when none was given.
    pub fn display_name(&self) -> &str {
        self.short_name.as_deref().unwrap_or_else(|| self.action.name())
    }
}

#[derive(Clone, Debug, Default)]
struct RegistryTable {
    records: Vec<ShortcutRecord>,
    id_to_index: HashMap<String, usize>,
}

impl RegistryTable {
    fn rebuild_index(&mut self) {
        self.id_to_index = self
            .records
            .iter()
            .enumerate()
            .map(|(i, r)| (r.id.clone(), i))
            .collect();
    }
}

/// Point-in-time view of the registry.
#[derive(Clone, Debug)]
pub struct RegistrySnapshot {
    table: Rc<RegistryTable>,
}

impl RegistrySnapshot {
    pub fn records(&self) -> &[ShortcutRecord] {
        &self.table.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ShortcutRecord> {
        self.table.records.iter()
    }

    pub fn get(&self, page: &str, keys: &str) -> Option<&ShortcutRecord> {
        self.table
            .id_to_index
            .get(&shortcut_id(page, keys))
            .and_then(|&i| self.table.records.get(i))
    }

    /// Records visible on `page`: its own plus the global ones.
    pub fn for_page<'a>(&'a self, page: &'a str) -> impl Iterator<Item = &'a ShortcutRecord> + 'a {
        self.iter().filter(move |r| r.page == page || r.is_global())
    }

    pub fn len(&self) -> usize {
        self.table.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.records.is_empty()
    }
}

impl<'a> IntoIterator for &'a RegistrySnapshot {
    type Item = &'a ShortcutRecord;
    type IntoIter = std::slice::Iter<'a, ShortcutRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Mapping from (page, raw keys) to shortcut records.
#[derive(Debug, Default)]
pub struct ShortcutRegistry {
    table: Rc<RegistryTable>,
    next_sequence: u64,
    mode: ParseMode,
}

impl ShortcutRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_parse_mode(mode: ParseMode) -> Self {
        Self {
            mode,
            ..Self::default()
        }
    }

    pub fn parse_mode(&self) -> ParseMode {
        self.mode
    }

    pub fn set_parse_mode(&mut self, mode: ParseMode) {
        self.mode = mode;
    }

    /// Register `spec` under `page`, replacing any record with the same
    /// (page, raw keys). Malformed keys are logged and rejected; the registry
    /// is left untouched.
    pub fn register(&mut self, page: &str, spec: ShortcutSpec) -> Result<&ShortcutRecord> {
        let keys = match self.parse_keys(&spec.keys) {
            Ok(keys) => keys,
            Err(source) => {
                warn!(keys = %spec.keys, page, error = %source, "Invalid shortcut keys");
                return Err(WebShortsError::InvalidKeys {
                    keys: spec.keys,
                    source,
                });
            }
        };

        let id = shortcut_id(page, &spec.keys);
        let sequence = self.next_sequence;
        self.next_sequence += 1;

        let record = ShortcutRecord {
            id: id.clone(),
            keys,
            keys_string: spec.keys,
            action: spec.action,
            short_name: spec.short_name,
            description: spec.description,
            page: page.to_string(),
            sequence,
            registered_at: Instant::now(),
        };

        let table = Rc::make_mut(&mut self.table);
        let index = match table.id_to_index.get(&id) {
            Some(&existing) => {
                debug!(id = %id, "Replacing shortcut");
                table.records[existing] = record;
                existing
            }
            None => {
                let index = table.records.len();
                table.records.push(record);
                table.id_to_index.insert(id, index);
                index
            }
        };

        Ok(&table.records[index])
    }

    fn parse_keys(&self, keys: &str) -> std::result::Result<KeyDescriptor, KeyParseError> {
        let descriptor = parse_with(keys, self.mode)?;
        if descriptor.is_complete() {
            Ok(descriptor)
        } else {
            Err(KeyParseError::MissingKey)
        }
    }

    /// Remove the record for (page, keys). Absent entries are a no-op.
    pub fn unregister(&mut self, page: &str, keys: &str) -> Option<ShortcutRecord> {
        let id = shortcut_id(page, keys);
        let index = *self.table.id_to_index.get(&id)?;

        let table = Rc::make_mut(&mut self.table);
        let removed = table.records.remove(index);
        table.rebuild_index();
        Some(removed)
    }

    /// Drop every record, or only those of `page`. Returns how many were removed.
    pub fn clear(&mut self, page: Option<&str>) -> usize {
        let before = self.table.records.len();
        match page {
            None => {
                self.table = Rc::new(RegistryTable::default());
            }
            Some(page) => {
                if !self.table.records.iter().any(|r| r.page == page) {
                    return 0;
                }
                let table = Rc::make_mut(&mut self.table);
                table.records.retain(|r| r.page != page);
                table.rebuild_index();
            }
        }
        before - self.table.records.len()
    }

    pub fn snapshot(&self) -> RegistrySnapshot {
        RegistrySnapshot {
            table: Rc::clone(&self.table),
        }
    }

    pub fn get(&self, page: &str, keys: &str) -> Option<&ShortcutRecord> {
        self.table
            .id_to_index
            .get(&shortcut_id(page, keys))
            .and_then(|&i| self.table.records.get(i))
    }

    pub fn len(&self) -> usize {
        self.table.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.records.is_empty()
    }
}
