//! Application input events.
//!
//! This module defines [`AppEvent`], the complete set of inputs that drive
//! the [`crate::App`] state machine.
//!
//! Events originate from three sources:
//! - User interactions (Keyboard, Resize) and clock ticks.
//! - The host environment (session token, safe-area changes).
//! - Storage results translated by the [`crate::Bridge`].

use miniapp_core::{HostInfo, LaunchToken, ProfileRecord, SafeArea};

use crate::KeyInput;

/// Events processed by the App state machine.
#[derive(Debug, Clone)]
pub enum AppEvent {
    /// Keyboard input.
    Key(KeyInput),

    /// Periodic tick carrying the driver clock.
    Tick {
        /// Milliseconds on the driver's monotonic clock.
        now_ms: u64,
    },

    /// Terminal resize (columns, rows).
    Resize(u16, u16),

    /// Launch data is known.
    SessionLoaded {
        /// Session token, if the host or launch URL supplied one.
        token: Option<LaunchToken>,
        /// Host environment details. `None` outside the host.
        host_info: Option<HostInfo>,
    },

    /// Profile record ready for editing.
    ProfileLoaded {
        /// Saved record, or the default/prefilled one.
        record: ProfileRecord,
        /// True if the record came from storage.
        saved: bool,
    },

    /// Profile persisted.
    ProfileSaved,

    /// Safe area recomputed after a host event.
    SafeAreaChanged(SafeArea),

    /// Error occurred.
    Error {
        /// Error description.
        message: String,
    },
}
