//! Simulation driver implementing the Driver trait.
//!
//! `SimDriver` provides the same interface as `TerminalDriver` but for
//! deterministic testing. It implements [`Driver`] so the same
//! [`miniapp_app::Runtime`] orchestration code runs in both production and
//! simulation.

#![allow(clippy::disallowed_types, reason = "Synchronous locking operations only")]

use std::{
    collections::VecDeque,
    sync::{Arc, Mutex, MutexGuard, PoisonError},
};

use miniapp_app::{App, AppEvent, Driver, KeyInput, Screen};

use crate::invariants::{AppSnapshot, InvariantRegistry};

/// Error type for simulation driver.
#[derive(Debug, Clone)]
pub struct SimDriverError(pub String);

impl std::fmt::Display for SimDriverError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SimDriverError: {}", self.0)
    }
}

impl std::error::Error for SimDriverError {}

/// Shared state for event injection.
///
/// This allows injection from outside async contexts and inspection after
/// the runtime has taken ownership of the driver.
#[derive(Default)]
struct SharedState {
    pending_events: VecDeque<AppEvent>,
    clock_ms: u64,
    renders: usize,
    last_screen: Option<Screen>,
    last_status: Option<String>,
    stopped: bool,
    fail_render: bool,
}

/// Simulation driver for deterministic testing.
///
/// Clones share the event queue and recorded output. Once the queue is empty,
/// [`Driver::poll_event`] reports the input as closed and the runtime exits.
#[derive(Clone, Default)]
pub struct SimDriver {
    state: Arc<Mutex<SharedState>>,
    invariants: Option<Arc<InvariantRegistry>>,
}

impl SimDriver {
    /// Create a new simulation driver.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable invariant checking on every render.
    #[must_use]
    pub fn with_invariants(mut self, registry: InvariantRegistry) -> Self {
        self.invariants = Some(Arc::new(registry));
        self
    }

    /// Inject an `AppEvent` for processing.
    pub fn inject_event(&self, event: AppEvent) {
        self.lock().pending_events.push_back(event);
    }

    /// Inject a key press.
    pub fn inject_key(&self, key: KeyInput) {
        self.inject_event(AppEvent::Key(key));
    }

    /// Inject each character of `text` as a key press.
    pub fn type_text(&self, text: &str) {
        for c in text.chars() {
            self.inject_key(KeyInput::Char(c));
        }
    }

    /// Advance the virtual clock and inject the matching tick.
    pub fn advance(&self, ms: u64) {
        let mut state = self.lock();
        state.clock_ms += ms;
        let now_ms = state.clock_ms;
        state.pending_events.push_back(AppEvent::Tick { now_ms });
    }

    /// Make subsequent renders fail.
    pub fn fail_renders(&self) {
        self.lock().fail_render = true;
    }

    /// Check if there are pending events to process.
    pub fn has_pending(&self) -> bool {
        !self.lock().pending_events.is_empty()
    }

    /// Number of successful renders.
    pub fn render_count(&self) -> usize {
        self.lock().renders
    }

    /// Screen shown by the most recent render.
    pub fn last_screen(&self) -> Option<Screen> {
        self.lock().last_screen
    }

    /// Status line shown by the most recent render.
    pub fn last_status(&self) -> Option<String> {
        self.lock().last_status.clone()
    }

    /// True once the runtime released the driver.
    pub fn is_stopped(&self) -> bool {
        self.lock().stopped
    }

    /// Check invariants against App state.
    pub fn check_invariants(&self, app: &App, context: &str) {
        if let Some(registry) = &self.invariants {
            registry.assert_all(&AppSnapshot::from_app(app), context);
        }
    }

    fn lock(&self) -> MutexGuard<'_, SharedState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Driver for SimDriver {
    type Error = SimDriverError;

    async fn poll_event(&mut self) -> Result<Option<AppEvent>, Self::Error> {
        Ok(self.lock().pending_events.pop_front())
    }

    fn now_ms(&self) -> u64 {
        self.lock().clock_ms
    }

    fn render(&mut self, app: &App) -> Result<(), Self::Error> {
        {
            let mut state = self.lock();
            if state.fail_render {
                return Err(SimDriverError("render failed".to_string()));
            }
            state.renders += 1;
            state.last_screen = Some(app.screen());
            state.last_status = app.status_message().map(str::to_owned);
        }
        self.check_invariants(app, "after render");
        Ok(())
    }

    fn stop(&mut self) {
        self.lock().stopped = true;
    }
}
