//! In-process host bridge.
//!
//! `SimHost` stands in for the host's WebApp object when the app runs outside
//! a chat client, such as in the terminal front end or in tests. It is cheap to
//! clone and all clones share state, so one handle can script inset changes
//! while the runtime holds another.

#![allow(clippy::disallowed_types, reason = "Synchronous locking operations only")]

use std::{
    collections::VecDeque,
    sync::{Arc, Mutex, MutexGuard, PoisonError},
};

use crate::{
    host::{HostBridge, HostEventKind, HostInfo, ListenerId},
    safe_area::PartialInsets,
};

#[derive(Default)]
struct SimHostState {
    init_data: Option<String>,
    info: HostInfo,
    safe_area: Option<PartialInsets>,
    content_safe_area: Option<PartialInsets>,
    listeners: Vec<(HostEventKind, ListenerId)>,
    next_listener: u64,
    pending: VecDeque<HostEventKind>,
    ready_calls: usize,
    expand_calls: usize,
}

/// Scriptable in-process host.
#[derive(Clone, Default)]
pub struct SimHost {
    state: Arc<Mutex<SimHostState>>,
}

impl SimHost {
    /// Host with default environment details and no session token.
    pub fn new() -> Self {
        let host = Self::default();
        host.lock().info = Self::default_info();
        host
    }

    /// Environment details reported by a fresh `SimHost`.
    pub fn default_info() -> HostInfo {
        HostInfo {
            version: "7.10".to_string(),
            platform: "tdesktop".to_string(),
            color_scheme: "light".to_string(),
            is_expanded: false,
            viewport_height: 600.0,
            viewport_stable_height: 600.0,
            header_color: "#ffffff".to_string(),
            background_color: "#ffffff".to_string(),
            theme_params: serde_json::json!({
                "bg_color": "#ffffff",
                "text_color": "#000000",
                "button_color": "#2481cc",
            }),
            back_button_visible: false,
            main_button_text: "CONTINUE".to_string(),
            haptic_feedback: true,
            cloud_storage: true,
            biometric_manager: false,
            qr_scanner: false,
        }
    }

    /// Set the session token.
    #[must_use]
    pub fn with_init_data(self, init_data: impl Into<String>) -> Self {
        self.lock().init_data = Some(init_data.into());
        self
    }

    /// Override environment details.
    #[must_use]
    pub fn with_info(self, info: HostInfo) -> Self {
        self.lock().info = info;
        self
    }

    /// Set the device safe area without emitting an event.
    #[must_use]
    pub fn with_safe_area(self, insets: PartialInsets) -> Self {
        self.lock().safe_area = Some(insets);
        self
    }

    /// Set the content safe area without emitting an event.
    #[must_use]
    pub fn with_content_safe_area(self, insets: PartialInsets) -> Self {
        self.lock().content_safe_area = Some(insets);
        self
    }

    /// Change the device safe area and emit `safeAreaChanged`.
    pub fn update_safe_area(&self, insets: PartialInsets) {
        self.lock().safe_area = Some(insets);
        self.emit(HostEventKind::SafeAreaChanged);
    }

    /// Change the content safe area and emit `contentSafeAreaChanged`.
    pub fn update_content_safe_area(&self, insets: PartialInsets) {
        self.lock().content_safe_area = Some(insets);
        self.emit(HostEventKind::ContentSafeAreaChanged);
    }

    /// Emit `kind`. Dropped when nobody listens, like a real event target.
    pub fn emit(&self, kind: HostEventKind) {
        let mut state = self.lock();
        if state.listeners.iter().any(|(k, _)| *k == kind) {
            state.pending.push_back(kind);
        }
    }

    /// Number of listeners registered for `kind`.
    pub fn listener_count(&self, kind: HostEventKind) -> usize {
        self.lock().listeners.iter().filter(|(k, _)| *k == kind).count()
    }

    /// Times `ready()` was called.
    pub fn ready_calls(&self) -> usize {
        self.lock().ready_calls
    }

    /// Times `expand()` was called.
    pub fn expand_calls(&self) -> usize {
        self.lock().expand_calls
    }

    fn lock(&self) -> MutexGuard<'_, SimHostState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl HostBridge for SimHost {
    fn init_data(&self) -> Option<String> {
        self.lock().init_data.clone()
    }

    fn ready(&self) {
        self.lock().ready_calls += 1;
    }

    fn expand(&self) {
        let mut state = self.lock();
        state.expand_calls += 1;
        state.info.is_expanded = true;
    }

    fn info(&self) -> HostInfo {
        self.lock().info.clone()
    }

    fn safe_area_inset(&self) -> Option<PartialInsets> {
        self.lock().safe_area
    }

    fn content_safe_area_inset(&self) -> Option<PartialInsets> {
        self.lock().content_safe_area
    }

    fn on_event(&self, kind: HostEventKind) -> ListenerId {
        let mut state = self.lock();
        state.next_listener += 1;
        let id = ListenerId(state.next_listener);
        state.listeners.push((kind, id));
        tracing::trace!(event = %kind, ?id, "listener registered");
        id
    }

    fn off_event(&self, kind: HostEventKind, id: ListenerId) {
        self.lock().listeners.retain(|entry| *entry != (kind, id));
    }

    fn take_events(&self) -> Vec<HostEventKind> {
        self.lock().pending.drain(..).collect()
    }
}
