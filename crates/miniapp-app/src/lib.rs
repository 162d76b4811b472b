//! Application layer for the mini app client.
//!
//! Pure state machine and generic runtime for the home and profile screens,
//! enabling deterministic simulation testing with the same code that runs in
//! the terminal front end.
//!
//! # Components
//!
//! - [`App`]: UI state machine (navigation, form editing, save indicator)
//! - [`Bridge`]: Storage bridge (translates App actions into profile store
//!   calls)
//! - [`Driver`]: Trait for platform-specific I/O abstraction
//! - [`Runtime`]: Generic orchestration loop using Driver and the host bridge

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod action;
mod app;
mod bridge;
mod driver;
mod event;
mod form;
mod input;
mod runtime;
mod state;

pub use action::AppAction;
pub use app::{App, SAVED_INDICATOR_MS};
pub use bridge::Bridge;
pub use driver::Driver;
pub use event::AppEvent;
pub use form::{FormChange, FormField, ProfileForm, TextInput};
pub use input::KeyInput;
pub use runtime::Runtime;
pub use state::{HomeView, Screen};
