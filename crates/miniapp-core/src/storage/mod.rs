//! Local per-device storage.
//!
//! [`LocalStorage`] is a string key-value store in the shape of a browser's
//! `localStorage`. The trait is synchronous: every access happens on the UI
//! thread in response to a discrete event. [`ProfileStore`] layers the
//! per-user profile records on top of it.

mod error;
mod memory;
mod profile_store;
mod redb;

pub use error::StorageError;
pub use memory::MemoryStorage;
pub use profile_store::ProfileStore;

pub use self::redb::RedbStorage;

/// String key-value storage.
///
/// Must be Clone (handed to the bridge and kept by the front end), Send +
/// Sync, and synchronous. Implementations share internal state, so clones
/// access the same underlying storage.
pub trait LocalStorage: Clone + Send + Sync + 'static {
    /// Value stored under `key`. `None` if the key was never written.
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Store `value` under `key`, replacing any previous value.
    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError>;
}
