//! Component-style shortcut registration.
//!
//! A `ShortcutListener` registers one binding when mounted and removes
//! exactly that binding when unmounted, in the page it resolved at mount.
//! A page change with a config loaded rebuilds the registry and drops the
//! binding; the host re-mounts after `set_current_page`.

use tracing::warn;

use crate::provider::ShortcutProvider;
use crate::shortcuts::{Action, ShortcutSpec};

#[derive(Debug, Clone)]
pub struct ShortcutListener {
    pub keys: String,
    pub action: Action,
    pub short_name: Option<String>,
    pub description: Option<String>,
    /// Target page; the provider's current page when `None`.
    pub page: Option<String>,
    mounted_page: Option<String>,
}

impl ShortcutListener {
    pub fn new(keys: impl Into<String>, action: Action) -> Self {
        Self {
            keys: keys.into(),
            action,
            short_name: None,
            description: None,
            page: None,
            mounted_page: None,
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

    pub fn on_page(mut self, page: impl Into<String>) -> Self {
        self.page = Some(page.into());
        self
    }

    /// Whether this listener's binding is still present in `provider`.
    pub fn is_mounted(&self, provider: &ShortcutProvider) -> bool {
        self.mounted_page
            .as_deref()
            .is_some_and(|page| provider.registry().get(page, &self.keys).is_some())
    }

    /// Register with `provider`. Returns whether a binding was registered.
    pub fn mount(&mut self, provider: &mut ShortcutProvider) -> bool {
        if self.keys.trim().is_empty() {
            warn!("ShortcutListener: keys and action are required");
            return false;
        }
        if self.mounted_page.is_some() {
            self.unmount(provider);
        }

        let page = self
            .page
            .clone()
            .unwrap_or_else(|| provider.current_page().to_string());

        let spec = ShortcutSpec {
            keys: self.keys.clone(),
            action: self.action.clone(),
            short_name: self.short_name.clone(),
            description: self.description.clone(),
        };

        if provider.register_shortcut(spec, Some(page.as_str())).is_some() {
            self.mounted_page = Some(page);
            true
        } else {
            false
        }
    }

    pub fn unmount(&mut self, provider: &mut ShortcutProvider) {
        if let Some(page) = self.mounted_page.take() {
            provider.unregister_shortcut(&self.keys, Some(page.as_str()));
        }
    }
}
