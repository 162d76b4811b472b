//! Per-user profile persistence.

use super::{LocalStorage, StorageError};
use crate::profile::{ProfileRecord, UserKey, storage_key};

/// Reads and writes [`ProfileRecord`]s as JSON under `profile_<userKey>`.
///
/// Writes are last-write-wins per key. Stored values are not versioned or
/// migrated: a value that no longer deserializes is treated as absent.
#[derive(Clone)]
pub struct ProfileStore<S: LocalStorage> {
    storage: S,
}

impl<S: LocalStorage> ProfileStore<S> {
    /// Wrap a storage backend.
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    /// Underlying storage.
    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Persist `record` for `key`.
    pub fn save(&self, key: &UserKey, record: &ProfileRecord) -> Result<(), StorageError> {
        let json =
            serde_json::to_string(record).map_err(|e| StorageError::Serialization(e.to_string()))?;
        self.storage.set_item(&storage_key(key), &json)?;
        tracing::info!(user = %key, "profile saved");
        Ok(())
    }

    /// Saved record for `key`, or `None` if nothing was saved.
    pub fn load_saved(&self, key: &UserKey) -> Result<Option<ProfileRecord>, StorageError> {
        let Some(json) = self.storage.get_item(&storage_key(key))? else {
            return Ok(None);
        };

        serde_json::from_str(&json)
            .map(Some)
            .map_err(|e| StorageError::Serialization(e.to_string()))
    }

    /// Saved record for `key`.
    ///
    /// Read and decode failures are logged and treated as "nothing saved".
    pub fn find(&self, key: &UserKey) -> Option<ProfileRecord> {
        self.load_saved(key).unwrap_or_else(|error| {
            tracing::warn!(user = %key, %error, "failed to load profile, using defaults");
            None
        })
    }

    /// Saved record for `key`, or the default record.
    pub fn load(&self, key: &UserKey) -> ProfileRecord {
        self.find(key).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{profile::TagSet, storage::MemoryStorage};

    fn record() -> ProfileRecord {
        ProfileRecord {
            first_name: "Ada".into(),
            last_name: "Lovelace".into(),
            profession: "Analyst".into(),
            hobbies: TagSet::from_comma_list("chess, rowing"),
            interests: TagSet::from_comma_list("engines"),
            about: "Notes on the engine".into(),
        }
    }

    #[test]
    fn save_then_load_returns_equal_record() {
        let store = ProfileStore::new(MemoryStorage::new());
        store.save(&UserKey::Id(42), &record()).unwrap();

        assert_eq!(store.load(&UserKey::Id(42)), record());
        assert!(store.storage().get_item("profile_42").unwrap().is_some());
    }

    #[test]
    fn never_saved_key_loads_default() {
        let store = ProfileStore::new(MemoryStorage::new());
        assert_eq!(store.load(&UserKey::Id(7)), ProfileRecord::default());
        assert_eq!(store.load_saved(&UserKey::Id(7)), Ok(None));
    }

    #[test]
    fn guests_share_one_record() {
        let store = ProfileStore::new(MemoryStorage::new());
        store.save(&UserKey::Guest, &record()).unwrap();

        assert_eq!(store.load(&UserKey::Guest), record());
        assert_eq!(store.storage().len(), 1);
        assert!(store.storage().get_item("profile_guest").unwrap().is_some());
    }

    #[test]
    fn corrupt_value_loads_default() {
        let storage = MemoryStorage::new();
        storage.set_item("profile_1", "{not json").unwrap();
        let store = ProfileStore::new(storage);

        assert!(matches!(
            store.load_saved(&UserKey::Id(1)),
            Err(StorageError::Serialization(_))
        ));
        assert_eq!(store.find(&UserKey::Id(1)), None);
        assert_eq!(store.load(&UserKey::Id(1)), ProfileRecord::default());
    }

    #[test]
    fn last_write_wins() {
        let store = ProfileStore::new(MemoryStorage::new());
        store.save(&UserKey::Id(1), &record()).unwrap();

        let updated = ProfileRecord { about: "changed".into(), ..record() };
        store.save(&UserKey::Id(1), &updated).unwrap();

        assert_eq!(store.load(&UserKey::Id(1)).about, "changed");
    }
}
