//! Property-based tests for the App state machine.
//!
//! Tests verify that invariants hold under arbitrary event sequences.
//! This ensures behavioral correctness across all possible execution paths.

use miniapp_app::{App, AppAction, AppEvent, Bridge, FormField, KeyInput, Screen};
use miniapp_core::{
    MAX_TAGS, MemoryStorage, PartialInsets, SafeArea, SafeAreaInsets, TagSet, UserKey,
};
use miniapp_harness::{AppSnapshot, InvariantRegistry, TagSnapshot};
use proptest::prelude::*;

/// Generate random printable characters for input.
fn printable_char() -> impl Strategy<Value = char> {
    prop::char::range(' ', '~')
}

/// Generate random key inputs. Quit keys are left out so sequences run long.
fn key_strategy() -> impl Strategy<Value = KeyInput> {
    prop_oneof![
        6 => printable_char().prop_map(KeyInput::Char),
        2 => Just(KeyInput::Enter),
        1 => Just(KeyInput::Backspace),
        1 => Just(KeyInput::Delete),
        2 => Just(KeyInput::Tab),
        1 => Just(KeyInput::BackTab),
        1 => Just(KeyInput::Left),
        1 => Just(KeyInput::Right),
        1 => Just(KeyInput::Home),
        1 => Just(KeyInput::End),
        1 => Just(KeyInput::Ctrl('s')),
    ]
}

fn inset_strategy() -> impl Strategy<Value = Option<PartialInsets>> {
    let field = prop_oneof![Just(None), (-50.0f64..200.0).prop_map(Some)];
    prop::option::of((field.clone(), field.clone(), field.clone(), field).prop_map(
        |(top, right, bottom, left)| PartialInsets { top, right, bottom, left },
    ))
}

/// Generate random app events.
fn event_strategy() -> impl Strategy<Value = AppEvent> {
    prop_oneof![
        10 => key_strategy().prop_map(AppEvent::Key),
        2 => (0u64..10_000).prop_map(|now_ms| AppEvent::Tick { now_ms }),
        1 => Just(AppEvent::ProfileSaved),
        1 => (inset_strategy(), inset_strategy()).prop_map(|(content, device)| {
            AppEvent::SafeAreaChanged(SafeArea::from_insets(SafeAreaInsets::merge(content, device)))
        }),
        1 => (1u16..200, 1u16..100).prop_map(|(c, r)| AppEvent::Resize(c, r)),
    ]
}

/// Route storage actions through the bridge, like the runtime does.
fn apply(app: &mut App, bridge: &mut Bridge<MemoryStorage>, event: AppEvent) {
    let mut pending = app.handle(event);
    while !pending.is_empty() {
        for action in std::mem::take(&mut pending) {
            if matches!(action, AppAction::LoadProfile { .. } | AppAction::SaveProfile { .. }) {
                for event in bridge.process_app_action(action) {
                    pending.extend(app.handle(event));
                }
            }
        }
    }
}

fn profile_app() -> App {
    let mut app = App::new();
    let _ = app.handle(AppEvent::Key(KeyInput::Char('p')));
    app
}

proptest! {
    /// App invariants hold under arbitrary event sequences on the profile
    /// screen.
    #[test]
    fn prop_app_invariants_hold(events in prop::collection::vec(event_strategy(), 0..80)) {
        let mut app = profile_app();
        let mut bridge = Bridge::new(MemoryStorage::new());
        let invariants = InvariantRegistry::standard();

        for event in events {
            apply(&mut app, &mut bridge, event.clone());

            let snapshot = AppSnapshot::from_app(&app);
            prop_assert!(
                invariants.check_all(&snapshot).is_ok(),
                "Invariant violated after {:?}", event
            );
        }
    }

    /// Cursor stays within input bounds.
    #[test]
    fn prop_cursor_within_bounds(keys in prop::collection::vec(key_strategy(), 0..100)) {
        let mut app = profile_app();

        for key in keys {
            let _ = app.handle(AppEvent::Key(key));

            for field in FormField::ALL {
                if let Some(input) = app.form().input(field) {
                    prop_assert!(
                        input.cursor() <= input.as_str().chars().count(),
                        "Cursor {} exceeds {:?} length", input.cursor(), field
                    );
                }
            }
        }
    }

    /// Whatever gets saved loads back identically.
    #[test]
    fn prop_saved_form_reloads(keys in prop::collection::vec(key_strategy(), 0..60)) {
        let mut app = profile_app();
        let mut bridge = Bridge::new(MemoryStorage::new());

        for key in keys {
            apply(&mut app, &mut bridge, AppEvent::Key(key));
        }
        apply(&mut app, &mut bridge, AppEvent::Key(KeyInput::Ctrl('s')));
        let saved = app.form().to_record();

        let mut reloaded = App::new();
        apply(
            &mut reloaded,
            &mut bridge,
            AppEvent::SessionLoaded { token: None, host_info: None },
        );
        prop_assert_eq!(reloaded.user_key(), UserKey::Guest);
        prop_assert!(reloaded.profile_loaded());
        prop_assert_eq!(reloaded.form().to_record(), saved);
    }

    /// Storage holds exactly the record of the last successful save.
    #[test]
    fn prop_storage_matches_last_save(keys in prop::collection::vec(key_strategy(), 0..80)) {
        let mut app = profile_app();
        let mut bridge = Bridge::new(MemoryStorage::new());
        let mut last_saved = None;

        for key in keys {
            let mut pending = app.handle(AppEvent::Key(key));
            while !pending.is_empty() {
                for action in std::mem::take(&mut pending) {
                    if let AppAction::SaveProfile { record, .. } = &action {
                        last_saved = Some(record.clone());
                    }
                    if matches!(action, AppAction::LoadProfile { .. } | AppAction::SaveProfile { .. }) {
                        for event in bridge.process_app_action(action) {
                            pending.extend(app.handle(event));
                        }
                    }
                }
            }
        }

        let stored = bridge.store().load_saved(&UserKey::Guest);
        prop_assert_eq!(stored.ok().flatten(), last_saved);
    }

    /// Typed tags end up in the list until it is full.
    #[test]
    fn prop_tags_capped(tags in prop::collection::btree_set("[a-z]{1,8}", 0..12)) {
        let mut app = profile_app();
        for _ in 0..3 {
            let _ = app.handle(AppEvent::Key(KeyInput::Tab));
        }
        prop_assert_eq!(app.form().focus(), FormField::Hobbies);

        let mut expected = TagSet::default();
        for tag in &tags {
            for c in tag.chars() {
                let _ = app.handle(AppEvent::Key(KeyInput::Char(c)));
            }
            let _ = app.handle(AppEvent::Key(KeyInput::Enter));
            let _ = expected.insert(tag);
        }

        let hobbies = app.form().tags(FormField::Hobbies).cloned().unwrap_or_default();
        prop_assert!(hobbies.len() <= MAX_TAGS);
        prop_assert_eq!(hobbies, expected);
    }
}

#[test]
fn escape_returns_home_and_quit_only_from_home() {
    let mut app = profile_app();
    assert_eq!(app.screen(), Screen::Profile);
    assert_eq!(app.handle(AppEvent::Key(KeyInput::Char('q'))), vec![AppAction::Render]);

    let _ = app.handle(AppEvent::Key(KeyInput::Esc));
    assert_eq!(app.screen(), Screen::Home);
    assert_eq!(app.handle(AppEvent::Key(KeyInput::Char('q'))), vec![AppAction::Quit]);
}

#[test]
fn test_invariant_violation_detected() {
    let snapshot = AppSnapshot {
        tag_lists: vec![TagSnapshot {
            label: "Hobbies",
            tags: (0..=MAX_TAGS).map(|i| format!("tag{i}")).collect(),
        }],
        ..AppSnapshot::default()
    };

    let violations = InvariantRegistry::standard().check_all(&snapshot).unwrap_err();
    assert!(violations.iter().any(|v| v.invariant == "tag_capacity"));
}
