//! Core logic for the mini app client.
//!
//! Everything here is synchronous and free of UI concerns so the same code
//! runs in the terminal front end, in simulation tests and behind any other
//! [`HostBridge`] implementation.
//!
//! # Components
//!
//! - [`session`]: decodes the host-supplied session token (initData)
//! - [`launch`]: picks the session token from the host or the launch URL
//! - [`profile`]: the user-editable profile record and its tag sets
//! - [`storage`]: local key-value storage and the per-user [`ProfileStore`]
//! - [`safe_area`]: inset merging, clamping and listener lifetime
//! - [`host`]: capability interface of the host environment
//! - [`sim_host`]: in-process host used outside a real chat client

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod host;
pub mod launch;
pub mod profile;
pub mod safe_area;
pub mod session;
pub mod sim_host;
pub mod storage;

pub use host::{Host, HostBridge, HostEventKind, HostInfo, ListenerId};
pub use launch::{LaunchToken, TokenSource, resolve_token};
pub use profile::{MAX_TAGS, ProfileRecord, TagInsert, TagSet, UserKey, storage_key};
pub use safe_area::{
    MIN_LAYOUT_TOP, PartialInsets, SafeArea, SafeAreaInsets, SafeAreaSubscription,
    SafeAreaTracker,
};
pub use session::{SessionPayload, SessionUser, SessionValue};
pub use sim_host::SimHost;
pub use storage::{LocalStorage, MemoryStorage, ProfileStore, RedbStorage, StorageError};
