//! Help overlay model.
//!
//! Turns a registry snapshot into the sections the help overlay shows:
//! records of the current page plus the global ones, grouped by page, laid
//! out in a fixed number of columns. Drawing is left to the host.

use crate::config::WebShortsOptions;
use crate::shortcuts::{to_display_string, RegistrySnapshot, ShortcutRecord, GLOBAL_PAGE};

pub const EMPTY_TEXT: &str = "No shortcuts available for this page";
pub const FOOTER_TEXT: &str = "Press Shift + ? to open this dialog from anywhere.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HelpEntry {
    /// Canonical display form, e.g. "Ctrl + S".
    pub keys: String,
    /// The string as registered.
    pub raw_keys: String,
    pub name: String,
    /// Present only when descriptions are enabled.
    pub description: Option<String>,
}

impl HelpEntry {
    fn from_record(record: &ShortcutRecord, show_descriptions: bool) -> Self {
        let name = match record.display_name() {
            "" => "Unnamed Action",
            name => name,
        };
        Self {
            keys: to_display_string(&record.keys),
            raw_keys: record.keys_string.clone(),
            name: name.to_string(),
            description: if show_descriptions {
                record.description.clone()
            } else {
                None
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HelpSection {
    pub page: String,
    pub title: String,
    pub entries: Vec<HelpEntry>,
}

impl HelpSection {
    fn new(page: &str) -> Self {
        let title = if page == GLOBAL_PAGE {
            "Global Shortcuts".to_string()
        } else {
            format!("Page: {}", page)
        };
        Self {
            page: page.to_string(),
            title,
            entries: Vec::new(),
        }
    }

    pub fn is_global(&self) -> bool {
        self.page == GLOBAL_PAGE
    }

    /// Entries chunked into rows of `columns` (at least one).
    pub fn rows(&self, columns: usize) -> std::slice::Chunks<'_, HelpEntry> {
        self.entries.chunks(columns.max(1))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HelpOverlay {
    pub current_page: String,
    pub sections: Vec<HelpSection>,
    pub columns: usize,
    pub width: u32,
    pub height: u32,
}

impl HelpOverlay {
    pub fn build(snapshot: &RegistrySnapshot, current_page: &str, options: &WebShortsOptions) -> Self {
        let mut sections: Vec<HelpSection> = Vec::new();

        for record in snapshot.for_page(current_page) {
            let index = match sections.iter().position(|s| s.page == record.page) {
                Some(index) => index,
                None => {
                    sections.push(HelpSection::new(&record.page));
                    sections.len() - 1
                }
            };
            sections[index]
                .entries
                .push(HelpEntry::from_record(record, options.show_descriptions));
        }

        Self {
            current_page: current_page.to_string(),
            sections,
            columns: options.columns(),
            width: options.dialog_width,
            height: options.dialog_height,
        }
    }

    pub fn len(&self) -> usize {
        self.sections.iter().map(|s| s.entries.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// Plain-text rendering of the overlay, one grid row per line.
    pub fn render_text(&self) -> String {
        let mut out = String::new();
        out.push_str(&format!("Keyboard Shortcuts ({})\n", self.current_page));

        if self.is_empty() {
            out.push('\n');
            out.push_str(EMPTY_TEXT);
            out.push('\n');
        }

        for section in &self.sections {
            out.push('\n');
            out.push_str(&section.title);
            out.push('\n');

            let cells: Vec<String> = section.entries.iter().map(render_cell).collect();
            let width = cells.iter().map(|c| c.chars().count()).max().unwrap_or(0);

            for row in cells.chunks(self.columns.max(1)) {
                let line = row
                    .iter()
                    .map(|cell| format!("{:<width$}", cell, width = width))
                    .collect::<Vec<_>>()
                    .join("    ");
                out.push_str("  ");
                out.push_str(line.trim_end());
                out.push('\n');
            }
        }

        out.push('\n');
        out.push_str(FOOTER_TEXT);
        out.push('\n');
        out
    }
}

fn render_cell(entry: &HelpEntry) -> String {
    match &entry.description {
        Some(description) => format!("[{}] {} - {}", entry.keys, entry.name, description),
        None => format!("[{}] {}", entry.keys, entry.name),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shortcuts::{Action, ShortcutRegistry, ShortcutSpec};

    fn registry() -> ShortcutRegistry {
        let mut registry = ShortcutRegistry::new();
        registry
            .register(
                "*",
                ShortcutSpec::new("alt + h", Action::new("goHome", || {}))
                    .with_short_name("Home Page")
                    .with_description("Navigate to the home page"),
            )
            .unwrap();
        registry
            .register("*", ShortcutSpec::new("CTRL + /", Action::new("search", || {})))
            .unwrap();
        registry
            .register(
                "/settings",
                ShortcutSpec::new("CTRL + S", Action::new("save", || {})).with_short_name("Save Settings"),
            )
            .unwrap();
        registry
            .register("/other", ShortcutSpec::new("CTRL + O", Action::new("open", || {})))
            .unwrap();
        registry
    }

    #[test]
    fn build_groups_current_page_and_globals() {
        let overlay = HelpOverlay::build(&registry().snapshot(), "/settings", &WebShortsOptions::default());

        assert_eq!(overlay.sections.len(), 2);
        assert_eq!(overlay.sections[0].title, "Global Shortcuts");
        assert!(overlay.sections[0].is_global());
        assert_eq!(overlay.sections[1].title, "Page: /settings");
        assert_eq!(overlay.len(), 3);
    }

    #[test]
    fn entries_use_canonical_display_and_name_fallback() {
        let overlay = HelpOverlay::build(&registry().snapshot(), "/", &WebShortsOptions::default());
        let globals = &overlay.sections[0].entries;

        assert_eq!(globals[0].keys, "Alt + H");
        assert_eq!(globals[0].raw_keys, "alt + h");
        assert_eq!(globals[0].name, "Home Page");
        assert_eq!(globals[0].description.as_deref(), Some("Navigate to the home page"));
        assert_eq!(globals[1].name, "search");
    }

    #[test]
    fn descriptions_hidden_when_disabled() {
        let options = WebShortsOptions {
            show_descriptions: false,
            ..Default::default()
        };
        let overlay = HelpOverlay::build(&registry().snapshot(), "/", &options);
        assert!(overlay.sections[0].entries.iter().all(|e| e.description.is_none()));
    }

    #[test]
    fn rows_follow_column_count() {
        let overlay = HelpOverlay::build(&registry().snapshot(), "/", &WebShortsOptions::default());
        let globals = &overlay.sections[0];

        assert_eq!(globals.rows(2).count(), 1);
        assert_eq!(globals.rows(1).count(), 2);
        assert_eq!(globals.rows(0).count(), 2);
    }

    #[test]
    fn columns_and_dimensions_come_from_options() {
        let options = WebShortsOptions {
            help_dialog_columns: 0,
            dialog_width: 1024,
            ..Default::default()
        };
        let overlay = HelpOverlay::build(&registry().snapshot(), "/", &options);
        assert_eq!(overlay.columns, 1);
        assert_eq!(overlay.width, 1024);
        assert_eq!(overlay.height, 600);
    }

    #[test]
    fn render_text_lists_sections_and_footer() {
        let overlay = HelpOverlay::build(&registry().snapshot(), "/settings", &WebShortsOptions::default());
        let text = overlay.render_text();

        assert!(text.starts_with("Keyboard Shortcuts (/settings)"));
        assert!(text.contains("Global Shortcuts"));
        assert!(text.contains("[Ctrl + S] Save Settings"));
        assert!(!text.contains("Ctrl + O"));
        assert!(text.trim_end().ends_with(FOOTER_TEXT));
    }

    #[test]
    fn render_text_empty_state() {
        let overlay = HelpOverlay::build(&ShortcutRegistry::new().snapshot(), "/", &WebShortsOptions::default());
        assert!(overlay.is_empty());
        assert!(overlay.render_text().contains(EMPTY_TEXT));
    }
}
