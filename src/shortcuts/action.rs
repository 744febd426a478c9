//! Shortcut actions.
//!
//! An `Action` is a named, zero-argument operation. The name is always
//! supplied by the caller; it identifies the action in debug notifications
//! and is the help-overlay fallback when no short name is given.

use std::any::Any;
use std::collections::HashMap;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::rc::Rc;

use tracing::warn;

use crate::error::{Result, WebShortsError};

type Handler = Rc<dyn Fn() -> anyhow::Result<()>>;

#[derive(Clone)]
pub struct Action {
    name: String,
    handler: Option<Handler>,
}

impl Action {
    /// An infallible action.
    pub fn new(name: impl Into<String>, f: impl Fn() + 'static) -> Self {
        Self::fallible(name, move || {
            f();
            Ok(())
        })
    }

    /// An action whose failures are reported through the debug sink.
    pub fn fallible(name: impl Into<String>, f: impl Fn() -> anyhow::Result<()> + 'static) -> Self {
        Self {
            name: name.into(),
            handler: Some(Rc::new(f)),
        }
    }

    /// A placeholder for an action name that could not be resolved.
    /// Matching it is reported as a failed execution; nothing is invoked.
    pub fn unbound(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            handler: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_invocable(&self) -> bool {
        self.handler.is_some()
    }

    /// Run the action. Errors and panics are both turned into
    /// `WebShortsError::ActionFailed`.
    pub fn invoke(&self) -> Result<()> {
        let handler = self
            .handler
            .as_ref()
            .ok_or_else(|| WebShortsError::ActionNotInvocable {
                action: self.name.clone(),
            })?;

        match panic::catch_unwind(AssertUnwindSafe(|| handler())) {
            Ok(Ok(())) => Ok(()),
            Ok(Err(e)) => Err(WebShortsError::ActionFailed {
                action: self.name.clone(),
                message: format!("{:#}", e),
            }),
            Err(payload) => Err(WebShortsError::ActionFailed {
                action: self.name.clone(),
                message: panic_message(payload.as_ref()),
            }),
        }
    }
}

impl fmt::Debug for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Action")
            .field("name", &self.name)
            .field("invocable", &self.is_invocable())
            .finish()
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "action panicked".to_string()
    }
}

/// Named actions that declaration files refer to by string.
#[derive(Clone, Debug, Default)]
pub struct ActionSet {
    actions: HashMap<String, Action>,
}

impl ActionSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, action: Action) -> Self {
        self.insert(action);
        self
    }

    pub fn insert(&mut self, action: Action) {
        self.actions.insert(action.name.clone(), action);
    }

    pub fn get(&self, name: &str) -> Option<&Action> {
        self.actions.get(name)
    }

    /// Look up `name`, falling back to an unbound action.
    pub fn resolve(&self, name: &str) -> Action {
        match self.actions.get(name) {
            Some(action) => action.clone(),
            None => {
                warn!(action = name, "Shortcut action is not defined, binding as non-invocable");
                Action::unbound(name)
            }
        }
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }
}
