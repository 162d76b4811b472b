//! Storage-to-Application translation layer.
//!
//! The [`Bridge`] wraps the [`ProfileStore`] and adapts it to the application
//! lifecycle.
//!
//! # Responsibilities
//!
//! - Converts [`crate::AppAction`]s that touch storage into profile store
//!   calls.
//! - Interprets the results and converts them back into [`crate::AppEvent`]s
//!   to update the UI.
//! - Degrades storage failures: a failed load behaves as "nothing saved", a
//!   failed save becomes an error status. Neither is fatal.

use miniapp_core::{LocalStorage, ProfileRecord, ProfileStore, SessionUser, UserKey};

use crate::{AppAction, AppEvent};

/// Bridge between App and the profile store.
///
/// Generic over the storage backend to support both production and
/// simulation.
pub struct Bridge<S: LocalStorage> {
    store: ProfileStore<S>,
}

impl<S: LocalStorage> Bridge<S> {
    /// Create a new Bridge over the given storage.
    pub fn new(storage: S) -> Self {
        Self { store: ProfileStore::new(storage) }
    }

    /// Underlying profile store.
    pub fn store(&self) -> &ProfileStore<S> {
        &self.store
    }

    /// Process an App action and return resulting App events.
    pub fn process_app_action(&mut self, action: AppAction) -> Vec<AppEvent> {
        match action {
            AppAction::LoadProfile { key, user } => vec![self.load(key, user.as_ref())],
            AppAction::SaveProfile { key, record } => vec![self.save(key, &record)],
            AppAction::Render | AppAction::Quit => vec![],
        }
    }

    fn load(&self, key: UserKey, user: Option<&SessionUser>) -> AppEvent {
        match self.store.find(&key) {
            Some(record) => AppEvent::ProfileLoaded { record, saved: true },
            None => AppEvent::ProfileLoaded { record: prefill(user), saved: false },
        }
    }

    fn save(&self, key: UserKey, record: &ProfileRecord) -> AppEvent {
        match self.store.save(&key, record) {
            Ok(()) => AppEvent::ProfileSaved,
            Err(error) => {
                tracing::error!(user = %key, %error, "failed to save profile");
                AppEvent::Error { message: format!("could not save profile: {error}") }
            },
        }
    }
}

fn prefill(user: Option<&SessionUser>) -> ProfileRecord {
    user.map(ProfileRecord::prefilled).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use miniapp_core::{MemoryStorage, TagSet};

    use super::*;

    fn user() -> SessionUser {
        SessionUser {
            id: 42,
            first_name: Some("Al".into()),
            last_name: Some("Gore".into()),
            username: None,
            language_code: None,
            is_premium: None,
        }
    }

    #[test]
    fn load_without_saved_record_prefills_names() {
        let mut bridge = Bridge::new(MemoryStorage::new());
        let events =
            bridge.process_app_action(AppAction::LoadProfile { key: UserKey::Id(42), user: Some(user()) });

        match events.as_slice() {
            [AppEvent::ProfileLoaded { record, saved: false }] => {
                assert_eq!(record.first_name, "Al");
                assert_eq!(record.last_name, "Gore");
                assert!(record.hobbies.is_empty());
            },
            other => panic!("unexpected events: {other:?}"),
        }
    }

    #[test]
    fn saved_record_wins_over_prefill() {
        let mut bridge = Bridge::new(MemoryStorage::new());
        let record = ProfileRecord {
            first_name: "Albert".into(),
            hobbies: TagSet::from_comma_list("chess"),
            ..ProfileRecord::default()
        };

        let events = bridge
            .process_app_action(AppAction::SaveProfile { key: UserKey::Id(42), record: record.clone() });
        assert!(matches!(events.as_slice(), [AppEvent::ProfileSaved]));

        let events =
            bridge.process_app_action(AppAction::LoadProfile { key: UserKey::Id(42), user: Some(user()) });
        match events.as_slice() {
            [AppEvent::ProfileLoaded { record: loaded, saved: true }] => assert_eq!(*loaded, record),
            other => panic!("unexpected events: {other:?}"),
        }
    }

    #[test]
    fn corrupt_record_falls_back_to_prefill() {
        let storage = MemoryStorage::new();
        storage.set_item("profile_42", "{not json").unwrap();
        let mut bridge = Bridge::new(storage);

        let events =
            bridge.process_app_action(AppAction::LoadProfile { key: UserKey::Id(42), user: Some(user()) });
        match events.as_slice() {
            [AppEvent::ProfileLoaded { record, saved: false }] => assert_eq!(record.first_name, "Al"),
            other => panic!("unexpected events: {other:?}"),
        }
    }

    #[test]
    fn render_and_quit_are_ignored() {
        let mut bridge = Bridge::new(MemoryStorage::new());
        assert!(bridge.process_app_action(AppAction::Render).is_empty());
        assert!(bridge.process_app_action(AppAction::Quit).is_empty());
        assert!(bridge.store().storage().is_empty());
    }
}
