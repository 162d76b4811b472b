//! Application side-effects and intents.
//!
//! This module defines the [`AppAction`] enum, which represents instructions
//! produced by the [`crate::App`] state machine for the runtime to execute.

use miniapp_core::{ProfileRecord, SessionUser, UserKey};

/// Actions produced by the App state machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppAction {
    /// Render the UI.
    Render,

    /// Quit the application.
    Quit,

    /// Load the saved profile for a user.
    LoadProfile {
        /// Storage identity.
        key: UserKey,
        /// Host user used to prefill names when nothing is saved.
        user: Option<SessionUser>,
    },

    /// Persist the edited profile.
    SaveProfile {
        /// Storage identity.
        key: UserKey,
        /// Record to store.
        record: ProfileRecord,
    },
}
