//! Key combination normalization.
//!
//! This module provides:
//! - `KeyDescriptor` - canonical form of a combination (four modifiers + one key)
//! - `parse` / `parse_with` - human-readable strings like "CTRL + SHIFT + A"
//! - `from_event` - live key events
//! - `to_display_string` - stable "Ctrl + Shift + Alt + Cmd + KEY" rendering

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use super::event::KeyEvent;

/// Errors that can occur when parsing a key combination string.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum KeyParseError {
    #[error("key combination is empty")]
    Empty,
    #[error("key combination has no key, only modifiers")]
    MissingKey,
    #[error("key combination names more than one key ('{first}' and '{second}')")]
    MultipleKeys { first: String, second: String },
}

/// How strictly key strings are parsed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ParseMode {
    /// Later non-modifier tokens silently replace earlier ones ("A + B" is "B").
    #[default]
    Lenient,
    /// More than one non-modifier token is an error.
    Strict,
}

impl ParseMode {
    pub fn from_strict(strict: bool) -> Self {
        if strict {
            Self::Strict
        } else {
            Self::Lenient
        }
    }
}

/// Canonical representation of a key combination.
///
/// Equality is structural over all five fields. A descriptor whose `key` is
/// `None` is incomplete and never enters the registry.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct KeyDescriptor {
    #[serde(default)]
    pub ctrl: bool,
    #[serde(default)]
    pub shift: bool,
    #[serde(default)]
    pub alt: bool,
    #[serde(default)]
    pub meta: bool,
    /// Uppercased non-modifier token ("A", "?", "ENTER").
    #[serde(default)]
    pub key: Option<String>,
}

impl KeyDescriptor {
    /// A descriptor for `key` with no modifiers held.
    pub fn key(key: impl AsRef<str>) -> Self {
        Self {
            key: Some(key.as_ref().to_uppercase()),
            ..Default::default()
        }
    }

    pub fn with_ctrl(mut self) -> Self {
        self.ctrl = true;
        self
    }

    pub fn with_shift(mut self) -> Self {
        self.shift = true;
        self
    }

    pub fn with_alt(mut self) -> Self {
        self.alt = true;
        self
    }

    pub fn with_meta(mut self) -> Self {
        self.meta = true;
        self
    }

    pub fn is_complete(&self) -> bool {
        is_complete(self)
    }

    pub fn display(&self) -> String {
        to_display_string(self)
    }
}

impl fmt::Display for KeyDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&to_display_string(self))
    }
}

impl FromStr for KeyDescriptor {
    type Err = KeyParseError;

    /// Strict parse that also requires a complete descriptor.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let descriptor = parse_with(s, ParseMode::Strict)?;
        if descriptor.is_complete() {
            Ok(descriptor)
        } else {
            Err(KeyParseError::MissingKey)
        }
    }
}

enum Token<'a> {
    Ctrl,
    Shift,
    Alt,
    Meta,
    Key(&'a str),
}

fn classify(token: &str) -> Token<'_> {
    match token {
        "CTRL" | "CONTROL" => Token::Ctrl,
        "SHIFT" => Token::Shift,
        "ALT" => Token::Alt,
        "META" | "CMD" | "COMMAND" => Token::Meta,
        other => Token::Key(other),
    }
}

/// Parse a combination like "CTRL + S" in lenient mode.
///
/// Returns `None` for empty input. The result may still be incomplete
/// ("CTRL + SHIFT"); check with [`is_complete`].
pub fn parse(input: &str) -> Option<KeyDescriptor> {
    parse_with(input, ParseMode::Lenient).ok()
}

/// Parse a combination, splitting on `+`, trimming and uppercasing each token.
///
/// Empty tokens (from "CTRL+" or "A++B") are skipped, so a literal `+` key
/// cannot be expressed. In strict mode a second non-modifier token is an
/// error; modifiers-only input is returned as an incomplete descriptor in
/// both modes.
pub fn parse_with(input: &str, mode: ParseMode) -> Result<KeyDescriptor, KeyParseError> {
    if input.trim().is_empty() {
        return Err(KeyParseError::Empty);
    }

    let mut descriptor = KeyDescriptor::default();

    for part in input.split('+') {
        let token = part.trim().to_uppercase();
        if token.is_empty() {
            continue;
        }
        match classify(&token) {
            Token::Ctrl => descriptor.ctrl = true,
            Token::Shift => descriptor.shift = true,
            Token::Alt => descriptor.alt = true,
            Token::Meta => descriptor.meta = true,
            Token::Key(key) => {
                if let (ParseMode::Strict, Some(first)) = (mode, &descriptor.key) {
                    return Err(KeyParseError::MultipleKeys {
                        first: first.clone(),
                        second: key.to_string(),
                    });
                }
                descriptor.key = Some(key.to_string());
            }
        }
    }

    Ok(descriptor)
}

/// Normalize a live key event. Always yields a descriptor.
pub fn from_event(event: &KeyEvent) -> KeyDescriptor {
    KeyDescriptor {
        ctrl: event.ctrl,
        shift: event.shift,
        alt: event.alt,
        meta: event.meta,
        key: Some(event.key.to_uppercase()),
    }
}

/// Render modifiers in the fixed order Ctrl, Shift, Alt, Cmd, then the key,
/// joined by " + ".
pub fn to_display_string(descriptor: &KeyDescriptor) -> String {
    let mut parts: Vec<&str> = Vec::with_capacity(5);
    if descriptor.ctrl {
        parts.push("Ctrl");
    }
    if descriptor.shift {
        parts.push("Shift");
    }
    if descriptor.alt {
        parts.push("Alt");
    }
    if descriptor.meta {
        parts.push("Cmd");
    }
    if let Some(key) = &descriptor.key {
        parts.push(key);
    }
    parts.join(" + ")
}

pub fn is_complete(descriptor: &KeyDescriptor) -> bool {
    descriptor.key.is_some()
}

/// True if `input` parses (leniently) to a complete descriptor.
pub fn is_valid_key_combination(input: &str) -> bool {
    parse(input).is_some_and(|d| d.is_complete())
}
