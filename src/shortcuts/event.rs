//! Host input boundary: one `KeyEvent` per physical keypress.

use serde::{Deserialize, Serialize};

use super::types::KeyDescriptor;

/// The element a key event was delivered to.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum EventTarget {
    /// No focused element (body / document).
    #[default]
    Document,
    Element {
        /// Tag name as reported by the host ("INPUT", "div").
        tag_name: String,
        #[serde(default)]
        content_editable: bool,
    },
}

impl EventTarget {
    pub fn element(tag_name: impl Into<String>) -> Self {
        Self::Element {
            tag_name: tag_name.into(),
            content_editable: false,
        }
    }

    pub fn content_editable(tag_name: impl Into<String>) -> Self {
        Self::Element {
            tag_name: tag_name.into(),
            content_editable: true,
        }
    }

    /// Inputs, textareas and content-editable elements swallow shortcuts.
    pub fn is_text_entry(&self) -> bool {
        match self {
            Self::Document => false,
            Self::Element {
                tag_name,
                content_editable,
            } => {
                *content_editable
                    || tag_name.eq_ignore_ascii_case("INPUT")
                    || tag_name.eq_ignore_ascii_case("TEXTAREA")
            }
        }
    }
}

/// A keydown event as delivered by the host.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyEvent {
    /// Key identifier, e.g. "s", "?", "Enter".
    pub key: String,
    #[serde(default)]
    pub ctrl: bool,
    #[serde(default)]
    pub shift: bool,
    #[serde(default)]
    pub alt: bool,
    #[serde(default)]
    pub meta: bool,
    #[serde(default)]
    pub target: EventTarget,
}

impl KeyEvent {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            ..Default::default()
        }
    }

    pub fn ctrl(mut self) -> Self {
        self.ctrl = true;
        self
    }

    pub fn shift(mut self) -> Self {
        self.shift = true;
        self
    }

    pub fn alt(mut self) -> Self {
        self.alt = true;
        self
    }

    pub fn meta(mut self) -> Self {
        self.meta = true;
        self
    }

    pub fn on(mut self, target: EventTarget) -> Self {
        self.target = target;
        self
    }

    /// Synthesize the event a user would produce for `descriptor`.
    ///
    /// Returns `None` for incomplete descriptors.
    pub fn from_descriptor(descriptor: &KeyDescriptor) -> Option<Self> {
        let key = descriptor.key.clone()?;
        Some(Self {
            key,
            ctrl: descriptor.ctrl,
            shift: descriptor.shift,
            alt: descriptor.alt,
            meta: descriptor.meta,
            target: EventTarget::Document,
        })
    }
}
