use std::cell::{Cell, RefCell};
use std::rc::Rc;

use super::action::Action;
use super::debug::DebugSink;
use super::dispatch::*;
use super::event::{EventTarget, KeyEvent};
use super::registry::{ShortcutRegistry, ShortcutSpec};
use super::types::parse;

#[derive(Debug, Clone, PartialEq)]
enum Note {
    Registration(String, String, String),
    Execution(String, String, bool, Option<String>),
    NotFound(String, String),
    HelpOpened(usize),
}

#[derive(Default)]
struct RecordingSink {
    notes: RefCell<Vec<Note>>,
}

impl DebugSink for RecordingSink {
    fn registration(&self, keys: &str, action: &str, page: &str) {
        self.notes
            .borrow_mut()
            .push(Note::Registration(keys.into(), action.into(), page.into()));
    }

    fn execution(&self, keys: &str, action: &str, success: bool, error: Option<&str>) {
        self.notes.borrow_mut().push(Note::Execution(
            keys.into(),
            action.into(),
            success,
            error.map(String::from),
        ));
    }

    fn not_found(&self, keys: &str, page: &str) {
        self.notes
            .borrow_mut()
            .push(Note::NotFound(keys.into(), page.into()));
    }

    fn help_opened(&self, count: usize) {
        self.notes.borrow_mut().push(Note::HelpOpened(count));
    }
}

fn counting(name: &str) -> (Action, Rc<Cell<u32>>) {
    let hits = Rc::new(Cell::new(0));
    let counter = hits.clone();
    (
        Action::new(name, move || counter.set(counter.get() + 1)),
        hits,
    )
}

#[test]
fn page_shortcut_runs_once_and_prevents_default() {
    let (save, hits) = counting("save");
    let mut registry = ShortcutRegistry::new();
    registry
        .register("/settings", ShortcutSpec::new("CTRL + S", save))
        .unwrap();

    let outcome = dispatch(
        &KeyEvent::new("s").ctrl(),
        &registry.snapshot(),
        DispatchContext::new("/settings"),
    );

    assert_eq!(
        outcome,
        DispatchOutcome::Executed {
            id: "/settings:CTRL + S".into()
        }
    );
    assert!(outcome.prevents_default());
    assert_eq!(hits.get(), 1);
}

#[test]
fn global_shortcut_matches_on_any_page() {
    let (go_home, hits) = counting("goHome");
    let mut registry = ShortcutRegistry::new();
    registry
        .register("*", ShortcutSpec::new("ALT + H", go_home))
        .unwrap();

    let outcome = dispatch(
        &KeyEvent::new("h").alt(),
        &registry.snapshot(),
        DispatchContext::new("/anything"),
    );

    assert!(outcome.is_match());
    assert_eq!(hits.get(), 1);
}

#[test]
fn miss_reports_not_found_and_keeps_default() {
    let sink = RecordingSink::default();
    let registry = ShortcutRegistry::new();

    let outcome = dispatch(
        &KeyEvent::new("z").ctrl(),
        &registry.snapshot(),
        DispatchContext::new("/").with_debug(Some(&sink)),
    );

    assert_eq!(
        outcome,
        DispatchOutcome::NotFound {
            keys: "Ctrl + Z".into()
        }
    );
    assert!(!outcome.prevents_default());
    assert_eq!(
        *sink.notes.borrow(),
        vec![Note::NotFound("Ctrl + Z".into(), "/".into())]
    );
}

#[test]
fn notifications_are_suppressed_without_debug() {
    let sink = RecordingSink::default();
    let registry = ShortcutRegistry::new();
    let ctx = DispatchContext {
        page: "/",
        debug: false,
        sink: Some(&sink),
    };

    dispatch(&KeyEvent::new("z").ctrl(), &registry.snapshot(), ctx);
    assert!(sink.notes.borrow().is_empty());
}

#[test]
fn help_trigger_shadows_registered_binding() {
    let (user_help, hits) = counting("userHelp");
    let mut registry = ShortcutRegistry::new();
    registry
        .register("*", ShortcutSpec::new("SHIFT + ?", user_help))
        .unwrap();

    let outcome = dispatch(
        &KeyEvent::new("?").shift(),
        &registry.snapshot(),
        DispatchContext::new("/"),
    );

    assert_eq!(outcome, DispatchOutcome::HelpRequested);
    assert!(outcome.prevents_default());
    assert_eq!(hits.get(), 0);
}

#[test]
fn help_trigger_requires_exactly_shift() {
    assert!(is_help_trigger(&help_trigger()));
    assert!(is_help_trigger(&parse("SHIFT + ?").unwrap()));
    assert!(!is_help_trigger(&parse("CTRL + SHIFT + ?").unwrap()));
    assert!(!is_help_trigger(&parse("?").unwrap()));

    let (action, hits) = counting("ctrlHelp");
    let mut registry = ShortcutRegistry::new();
    registry
        .register("/", ShortcutSpec::new("CTRL + SHIFT + ?", action))
        .unwrap();
    let outcome = dispatch(
        &KeyEvent::new("?").shift().ctrl(),
        &registry.snapshot(),
        DispatchContext::new("/"),
    );
    assert!(outcome.is_match());
    assert_eq!(hits.get(), 1);
}

#[test]
fn text_entry_target_is_ignored() {
    let (save, hits) = counting("save");
    let sink = RecordingSink::default();
    let mut registry = ShortcutRegistry::new();
    registry
        .register("/", ShortcutSpec::new("CTRL + S", save))
        .unwrap();
    let snapshot = registry.snapshot();

    for target in [
        EventTarget::element("INPUT"),
        EventTarget::element("TEXTAREA"),
        EventTarget::content_editable("DIV"),
    ] {
        let ctx = DispatchContext::new("/").with_debug(Some(&sink));
        let save_press = KeyEvent::new("s").ctrl().on(target.clone());
        assert_eq!(dispatch(&save_press, &snapshot, ctx), DispatchOutcome::Ignored);

        let help_press = KeyEvent::new("?").shift().on(target);
        assert_eq!(dispatch(&help_press, &snapshot, ctx), DispatchOutcome::Ignored);
    }

    assert_eq!(hits.get(), 0);
    assert!(sink.notes.borrow().is_empty());
}

#[test]
fn failing_action_does_not_break_later_dispatch() {
    let sink = RecordingSink::default();
    let (ok_action, hits) = counting("ok");
    let mut registry = ShortcutRegistry::new();
    registry
        .register(
            "/",
            ShortcutSpec::new("ALT + E", Action::fallible("explode", || anyhow::bail!("boom"))),
        )
        .unwrap();
    registry
        .register("/", ShortcutSpec::new("ALT + P", Action::new("panics", || panic!("ouch"))))
        .unwrap();
    registry.register("/", ShortcutSpec::new("ALT + O", ok_action)).unwrap();
    let snapshot = registry.snapshot();
    let ctx = DispatchContext::new("/").with_debug(Some(&sink));

    let failed = dispatch(&KeyEvent::new("e").alt(), &snapshot, ctx);
    assert_eq!(
        failed,
        DispatchOutcome::Failed {
            id: "/:ALT + E".into(),
            error: "boom".into()
        }
    );
    assert!(failed.prevents_default());

    let panicked = dispatch(&KeyEvent::new("p").alt(), &snapshot, ctx);
    assert!(matches!(panicked, DispatchOutcome::Failed { ref error, .. } if error == "ouch"));

    let ok = dispatch(&KeyEvent::new("o").alt(), &snapshot, ctx);
    assert!(matches!(ok, DispatchOutcome::Executed { .. }));
    assert_eq!(hits.get(), 1);

    let notes = sink.notes.borrow();
    assert_eq!(
        notes[0],
        Note::Execution("Alt + E".into(), "explode".into(), false, Some("boom".into()))
    );
    assert_eq!(
        notes[2],
        Note::Execution("Alt + O".into(), "ok".into(), true, None)
    );
}

#[test]
fn unbound_action_is_reported_as_invalid() {
    let sink = RecordingSink::default();
    let mut registry = ShortcutRegistry::new();
    registry
        .register("/", ShortcutSpec::new("CTRL + /", Action::unbound("search")))
        .unwrap();

    let outcome = dispatch(
        &KeyEvent::new("/").ctrl(),
        &registry.snapshot(),
        DispatchContext::new("/").with_debug(Some(&sink)),
    );

    assert!(outcome.prevents_default());
    assert_eq!(
        *sink.notes.borrow(),
        vec![Note::Execution(
            "Ctrl + /".into(),
            "invalid".into(),
            false,
            Some("Action is not a function".into())
        )]
    );
}

#[test]
fn current_page_binding_beats_global_binding() {
    let (global, global_hits) = counting("global");
    let (local, local_hits) = counting("local");
    let mut registry = ShortcutRegistry::new();
    registry.register("*", ShortcutSpec::new("CTRL + S", global)).unwrap();
    registry
        .register("/settings", ShortcutSpec::new("CTRL + S", local))
        .unwrap();
    let snapshot = registry.snapshot();

    let on_settings = dispatch(&KeyEvent::new("s").ctrl(), &snapshot, DispatchContext::new("/settings"));
    assert_eq!(
        on_settings,
        DispatchOutcome::Executed {
            id: "/settings:CTRL + S".into()
        }
    );

    let elsewhere = dispatch(&KeyEvent::new("s").ctrl(), &snapshot, DispatchContext::new("/home"));
    assert_eq!(elsewhere, DispatchOutcome::Executed { id: "*:CTRL + S".into() });

    assert_eq!(local_hits.get(), 1);
    assert_eq!(global_hits.get(), 1);
}

#[test]
fn global_binding_beats_other_page_binding() {
    let mut registry = ShortcutRegistry::new();
    registry
        .register("/other", ShortcutSpec::new("CTRL + K", Action::new("other", || {})))
        .unwrap();
    registry
        .register("*", ShortcutSpec::new("CTRL + K", Action::new("global", || {})))
        .unwrap();

    let snapshot = registry.snapshot();
    let record = resolve(&parse("CTRL + K").unwrap(), "/", &snapshot).unwrap();
    assert_eq!(record.id, "*:CTRL + K");
}

#[test]
fn other_page_binding_is_still_eligible() {
    let mut registry = ShortcutRegistry::new();
    registry
        .register("/other", ShortcutSpec::new("CTRL + K", Action::new("other", || {})))
        .unwrap();

    let snapshot = registry.snapshot();
    let record = resolve(&parse("ctrl+k").unwrap(), "/", &snapshot).unwrap();
    assert_eq!(record.page, "/other");
}

#[test]
fn same_scope_collision_uses_registration_order() {
    let (first, first_hits) = counting("first");
    let (second, second_hits) = counting("second");
    let mut registry = ShortcutRegistry::new();
    registry.register("/", ShortcutSpec::new("CTRL+S", first)).unwrap();
    registry.register("/", ShortcutSpec::new("CONTROL + S", second)).unwrap();

    let outcome = dispatch(&KeyEvent::new("S").ctrl(), &registry.snapshot(), DispatchContext::new("/"));

    assert_eq!(outcome, DispatchOutcome::Executed { id: "/:CTRL+S".into() });
    assert_eq!(first_hits.get(), 1);
    assert_eq!(second_hits.get(), 0);
}

#[test]
fn modifiers_must_match_exactly() {
    let (save, hits) = counting("save");
    let mut registry = ShortcutRegistry::new();
    registry.register("/", ShortcutSpec::new("CTRL + S", save)).unwrap();
    let snapshot = registry.snapshot();

    let extra_shift = dispatch(&KeyEvent::new("s").ctrl().shift(), &snapshot, DispatchContext::new("/"));
    assert!(matches!(extra_shift, DispatchOutcome::NotFound { .. }));
    let no_ctrl = dispatch(&KeyEvent::new("s"), &snapshot, DispatchContext::new("/"));
    assert!(matches!(no_ctrl, DispatchOutcome::NotFound { .. }));
    assert_eq!(hits.get(), 0);
}

#[test]
fn missing_sink_degrades_to_logging() {
    let registry = ShortcutRegistry::new();
    let outcome = dispatch(
        &KeyEvent::new("z").ctrl(),
        &registry.snapshot(),
        DispatchContext::new("/").with_debug(None),
    );
    assert!(matches!(outcome, DispatchOutcome::NotFound { .. }));
}
