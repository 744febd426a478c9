//! Shortcut provider: one per application instance.
//!
//! Owns the registry, the current page, the options and the help-overlay
//! flag. Loading a `ShortcutTable` clears the registry and registers the
//! global entries followed by the current page's entries; changing page
//! repeats that, so bindings of the previous page never survive the switch.

use tracing::{debug, info};

use crate::config::{ShortcutTable, WebShortsOptions};
use crate::help::HelpOverlay;
use crate::shortcuts::{
    dispatch, notify_help_opened, notify_registration, DebugSink, DispatchContext,
    DispatchOutcome, KeyEvent, RegistrySnapshot, ShortcutRecord, ShortcutRegistry, ShortcutSpec,
    GLOBAL_PAGE,
};

pub struct ShortcutProvider {
    registry: ShortcutRegistry,
    current_page: String,
    options: WebShortsOptions,
    config: Option<ShortcutTable>,
    sink: Option<Box<dyn DebugSink>>,
    help_dialog_open: bool,
}

impl ShortcutProvider {
    pub fn new(current_page: impl Into<String>) -> Self {
        Self {
            registry: ShortcutRegistry::new(),
            current_page: current_page.into(),
            options: WebShortsOptions::default(),
            config: None,
            sink: None,
            help_dialog_open: false,
        }
    }

    pub fn with_options(mut self, options: WebShortsOptions) -> Self {
        self.set_options(options);
        self
    }

    pub fn with_sink(mut self, sink: Box<dyn DebugSink>) -> Self {
        self.sink = Some(sink);
        self
    }

    /// Load `table`; its options replace the current ones.
    pub fn with_config(mut self, table: ShortcutTable) -> Self {
        self.load_config(table);
        self
    }

    pub fn set_options(&mut self, options: WebShortsOptions) {
        self.registry.set_parse_mode(options.parse_mode());
        self.options = options;
    }

    pub fn load_config(&mut self, table: ShortcutTable) {
        self.set_options(table.options.clone());
        self.config = Some(table);
        self.reload_config();
    }

    fn reload_config(&mut self) {
        let Some(table) = self.config.take() else {
            return;
        };

        self.registry.clear(None);

        for spec in table.entries(GLOBAL_PAGE) {
            self.register_shortcut(spec.clone(), Some(GLOBAL_PAGE));
        }
        if self.current_page != GLOBAL_PAGE {
            let page = self.current_page.clone();
            for spec in table.entries(&page) {
                self.register_shortcut(spec.clone(), Some(page.as_str()));
            }
        }

        info!(
            page = %self.current_page,
            count = self.registry.len(),
            "Loaded shortcuts from config"
        );
        self.config = Some(table);
    }

    /// Switch page context. With a config loaded, the registry is rebuilt.
    pub fn set_current_page(&mut self, page: impl Into<String>) {
        let page = page.into();
        if page == self.current_page {
            return;
        }
        debug!(from = %self.current_page, to = %page, "Page context changed");
        self.current_page = page;
        self.reload_config();
    }

    /// Register on `page`, or the current page when `None`.
    ///
    /// Invalid keys are logged by the registry and yield `None`.
    pub fn register_shortcut(&mut self, spec: ShortcutSpec, page: Option<&str>) -> Option<&ShortcutRecord> {
        let page = page.unwrap_or(&self.current_page).to_string();
        let record = self.registry.register(&page, spec).ok()?;
        if self.options.debug {
            notify_registration(
                self.sink.as_deref(),
                &record.keys_string,
                record.action_name(),
                &record.page,
            );
        }
        Some(record)
    }

    pub fn unregister_shortcut(&mut self, keys: &str, page: Option<&str>) -> Option<ShortcutRecord> {
        let page = page.unwrap_or(&self.current_page).to_string();
        self.registry.unregister(&page, keys)
    }

    /// Handle one keydown event.
    pub fn handle_key_down(&mut self, event: &KeyEvent) -> DispatchOutcome {
        let snapshot = self.registry.snapshot();
        let debug = self.options.debug;

        let mut ctx = DispatchContext::new(&self.current_page);
        if debug {
            ctx = ctx.with_debug(self.sink.as_deref());
        }
        let outcome = dispatch(event, &snapshot, ctx);

        if outcome == DispatchOutcome::HelpRequested {
            self.help_dialog_open = true;
            if debug {
                let count = snapshot.for_page(&self.current_page).count();
                notify_help_opened(self.sink.as_deref(), count);
            }
        }

        outcome
    }

    pub fn shortcuts(&self) -> RegistrySnapshot {
        self.registry.snapshot()
    }

    pub fn registry(&self) -> &ShortcutRegistry {
        &self.registry
    }

    pub fn current_page(&self) -> &str {
        &self.current_page
    }

    pub fn options(&self) -> &WebShortsOptions {
        &self.options
    }

    pub fn help_dialog_open(&self) -> bool {
        self.help_dialog_open
    }

    pub fn set_help_dialog_open(&mut self, open: bool) {
        self.help_dialog_open = open;
    }

    pub fn help_overlay(&self) -> HelpOverlay {
        HelpOverlay::build(&self.registry.snapshot(), &self.current_page, &self.options)
    }
}

#[cfg(test)]
#[path = "provider_tests.rs"]
mod tests;
