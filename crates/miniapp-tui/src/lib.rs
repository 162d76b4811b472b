//! Terminal UI for the profile mini app.
//!
//! A thin shell over [`miniapp_app::Driver`] that provides terminal-specific
//! I/O. All orchestration logic lives in the generic [`miniapp_app::Runtime`].
//!
//! This crate only handles terminal rendering and launch configuration.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod config;
pub mod terminal;
pub mod ui;

pub use config::{ConfigError, StorageChoice, TuiConfig, parse_insets};
pub use miniapp_app::{App, AppAction, AppEvent, Bridge, Driver, KeyInput, Runtime};
pub use terminal::{TerminalDriver, TerminalError};
