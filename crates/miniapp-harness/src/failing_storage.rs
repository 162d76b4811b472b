//! Storage backend that fails on demand.

use miniapp_core::{LocalStorage, StorageError};

/// [`LocalStorage`] whose reads and/or writes always fail.
///
/// Models quota exhaustion or storage disabled by the platform.
#[derive(Debug, Clone, Copy)]
pub struct FailingStorage {
    fail_reads: bool,
    fail_writes: bool,
}

impl FailingStorage {
    /// Every operation fails.
    pub fn new() -> Self {
        Self { fail_reads: true, fail_writes: true }
    }

    /// Reads succeed (nothing stored), writes fail.
    pub fn read_only() -> Self {
        Self { fail_reads: false, fail_writes: true }
    }
}

impl Default for FailingStorage {
    fn default() -> Self {
        Self::new()
    }
}

impl LocalStorage for FailingStorage {
    fn get_item(&self, _key: &str) -> Result<Option<String>, StorageError> {
        if self.fail_reads { Err(StorageError::Unavailable) } else { Ok(None) }
    }

    fn set_item(&self, _key: &str, _value: &str) -> Result<(), StorageError> {
        if self.fail_writes {
            Err(StorageError::Io("quota exceeded".to_string()))
        } else {
            Ok(())
        }
    }
}
