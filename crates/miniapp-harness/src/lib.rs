//! Deterministic simulation harness for the mini app client.
//!
//! In-process implementations of the driver and failing storage so the
//! production [`miniapp_app::Runtime`] can be exercised without a terminal.
//! [`SimHost`] is re-exported from core for the host side.
//!
//! # Invariant Testing
//!
//! The `invariants` module provides behavioral testing through invariant
//! checks. Invariants verify WHAT must be true across all execution paths, not
//! specific scenarios. Use [`InvariantRegistry::standard()`] for the App
//! invariants.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod failing_storage;
pub mod invariants;
pub mod sim_driver;

pub use failing_storage::FailingStorage;
pub use invariants::{
    AppSnapshot, Invariant, InvariantRegistry, InvariantResult, LayoutTopFloor,
    SavedIndicatorDeadline, TagCapacity, TagSnapshot, TagUniqueness, Violation,
};
pub use sim_driver::{SimDriver, SimDriverError};
pub use miniapp_core::SimHost;
