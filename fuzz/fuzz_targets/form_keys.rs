//! Fuzz target for the App state machine
//!
//! Drives the profile screen with arbitrary key and clock sequences, routing
//! storage actions through a Bridge over in-memory storage.
//!
//! # Invariants
//!
//! - Standard App invariants hold after every event
//! - Whatever is saved loads back unchanged
//! - NEVER panic

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use miniapp_app::{App, AppAction, AppEvent, Bridge, KeyInput};
use miniapp_core::{MemoryStorage, ProfileRecord, ProfileStore, UserKey};
use miniapp_harness::{AppSnapshot, InvariantRegistry};

#[derive(Debug, Clone, Copy, Arbitrary)]
enum Op {
    Char(char),
    Ctrl(char),
    Enter,
    Backspace,
    Delete,
    Tab,
    BackTab,
    Left,
    Right,
    Home,
    End,
    Esc,
    OpenProfile,
    Tick(u16),
}

fn to_event(op: Op, now: &mut u64) -> AppEvent {
    let key = match op {
        Op::Char(c) => KeyInput::Char(c),
        Op::Ctrl(c) => KeyInput::Ctrl(c),
        Op::Enter => KeyInput::Enter,
        Op::Backspace => KeyInput::Backspace,
        Op::Delete => KeyInput::Delete,
        Op::Tab => KeyInput::Tab,
        Op::BackTab => KeyInput::BackTab,
        Op::Left => KeyInput::Left,
        Op::Right => KeyInput::Right,
        Op::Home => KeyInput::Home,
        Op::End => KeyInput::End,
        Op::Esc => KeyInput::Esc,
        Op::OpenProfile => KeyInput::Char('p'),
        Op::Tick(ms) => {
            *now += u64::from(ms);
            return AppEvent::Tick { now_ms: *now };
        },
    };
    AppEvent::Key(key)
}

fuzz_target!(|ops: Vec<Op>| {
    let storage = MemoryStorage::new();
    let mut bridge = Bridge::new(storage.clone());
    let mut app = App::new();
    let invariants = InvariantRegistry::standard();
    let mut now = 0u64;
    let mut last_saved: Option<(UserKey, ProfileRecord)> = None;

    let _ = app.handle(AppEvent::Key(KeyInput::Char('p')));

    for op in ops {
        let mut pending = app.handle(to_event(op, &mut now));
        let mut quit = false;

        while !pending.is_empty() {
            for action in std::mem::take(&mut pending) {
                match action {
                    AppAction::Quit => quit = true,
                    AppAction::Render => {},
                    AppAction::SaveProfile { key, record } => {
                        let save = AppAction::SaveProfile { key, record: record.clone() };
                        for event in bridge.process_app_action(save) {
                            if matches!(event, AppEvent::ProfileSaved) {
                                last_saved = Some((key, record.clone()));
                            }
                            pending.extend(app.handle(event));
                        }
                    },
                    AppAction::LoadProfile { .. } => {
                        for event in bridge.process_app_action(action) {
                            pending.extend(app.handle(event));
                        }
                    },
                }
            }
        }

        invariants.assert_all(&AppSnapshot::from_app(&app), "after fuzz op");
        if quit {
            break;
        }
    }

    // INVARIANT: the last save is what storage returns
    let store = ProfileStore::new(storage);
    match last_saved {
        Some((key, record)) => {
            let loaded = store.load_saved(&key).expect("memory storage never fails");
            assert_eq!(loaded, Some(record));
        },
        None => {
            let loaded = store.load_saved(&UserKey::Guest);
            assert!(matches!(loaded, Ok(None)));
        },
    }
});
