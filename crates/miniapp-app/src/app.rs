//! Application state machine.
//!
//! This module defines the [`App`] state machine, which manages the
//! interactive state of the application completely decoupled from I/O, the
//! host environment and storage.
//!
//! This is a pure state machine: it consumes [`crate::AppEvent`] inputs and
//! produces [`crate::AppAction`] instructions for the runtime to execute.
//!
//! # Responsibilities
//!
//! - Holds the decoded session and what the home screen shows.
//! - Navigates between the home and profile screens.
//! - Owns the profile form and the transient "saved" indicator.
//! - Tracks the published safe area and terminal dimensions for layout.

use miniapp_core::{
    HostInfo, LaunchToken, MAX_TAGS, ProfileRecord, SafeArea, SessionPayload, SessionUser,
    TagInsert, UserKey,
};

use crate::{AppAction, AppEvent, FormChange, FormField, HomeView, KeyInput, ProfileForm, Screen};

/// How long the "saved" indicator stays on after a save.
pub const SAVED_INDICATOR_MS: u64 = 2000;

/// Application state machine.
///
/// Pure state machine that processes events and produces actions.
/// No I/O dependencies - fully testable in simulation.
#[derive(Debug, Clone)]
pub struct App {
    /// Current screen.
    screen: Screen,
    /// Decoded session token. Empty without a token.
    session: SessionPayload,
    /// Host user from the session, if present.
    user: Option<SessionUser>,
    /// Storage identity derived from the session.
    user_key: UserKey,
    /// Whether the host bridge is present.
    host_available: bool,
    /// Home screen contents.
    home: HomeView,
    /// Profile editor.
    form: ProfileForm,
    /// Whether the form holds a record loaded from storage.
    profile_loaded: bool,
    /// Published safe area.
    safe_area: SafeArea,
    /// Terminal dimensions (columns, rows).
    terminal_size: (u16, u16),
    /// Transient status message. `None` if no message.
    status_message: Option<String>,
    /// Driver clock at the last tick.
    now_ms: u64,
    /// Deadline of the "saved" indicator. `None` when off.
    saved_until: Option<u64>,
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

impl App {
    /// Create a new App on the home screen with no launch data.
    pub fn new() -> Self {
        Self {
            screen: Screen::Home,
            session: SessionPayload::new(),
            user: None,
            user_key: UserKey::Guest,
            host_available: false,
            home: HomeView::Pending,
            form: ProfileForm::default(),
            profile_loaded: false,
            safe_area: SafeArea::default(),
            terminal_size: (80, 24),
            status_message: None,
            now_ms: 0,
            saved_until: None,
        }
    }

    /// Process an event and return actions.
    pub fn handle(&mut self, event: AppEvent) -> Vec<AppAction> {
        match event {
            AppEvent::Key(key) => self.handle_key(key),
            AppEvent::Tick { now_ms } => {
                self.now_ms = self.now_ms.max(now_ms);
                match self.saved_until {
                    Some(deadline) if self.now_ms >= deadline => {
                        self.saved_until = None;
                        vec![AppAction::Render]
                    },
                    _ => vec![],
                }
            },
            AppEvent::Resize(cols, rows) => {
                self.terminal_size = (cols, rows);
                vec![AppAction::Render]
            },
            AppEvent::SessionLoaded { token, host_info } => {
                self.load_session(token.as_ref(), host_info.as_ref());
                vec![
                    AppAction::LoadProfile { key: self.user_key, user: self.user.clone() },
                    AppAction::Render,
                ]
            },
            AppEvent::ProfileLoaded { record, saved } => {
                self.form = ProfileForm::from_record(record);
                self.profile_loaded = saved;
                vec![AppAction::Render]
            },
            AppEvent::ProfileSaved => {
                self.profile_loaded = true;
                self.saved_until = Some(self.now_ms + SAVED_INDICATOR_MS);
                self.status_message = Some("Profile saved".to_string());
                vec![AppAction::Render]
            },
            AppEvent::SafeAreaChanged(area) => {
                self.safe_area = area;
                vec![AppAction::Render]
            },
            AppEvent::Error { message } => {
                self.status_message = Some(format!("Error: {message}"));
                vec![AppAction::Render]
            },
        }
    }

    fn load_session(&mut self, token: Option<&LaunchToken>, host_info: Option<&HostInfo>) {
        self.session = token.map(|t| SessionPayload::parse(&t.raw)).unwrap_or_default();
        self.user = self.session.user();
        self.user_key = self.session.user_key();
        self.host_available = host_info.is_some();
        self.home = HomeView::from_launch(token, &self.session, host_info);

        tracing::info!(
            user = %self.user_key,
            fields = self.session.len(),
            source = ?token.map(|t| t.source),
            "session loaded"
        );
    }

    fn handle_key(&mut self, key: KeyInput) -> Vec<AppAction> {
        match self.screen {
            Screen::Home => self.handle_home_key(key),
            Screen::Profile => self.handle_profile_key(key),
        }
    }

    fn handle_home_key(&mut self, key: KeyInput) -> Vec<AppAction> {
        match key {
            KeyInput::Char('p') | KeyInput::Enter => self.open_profile(),
            KeyInput::Char('q') | KeyInput::Esc | KeyInput::Ctrl('c') => self.quit(),
            _ => vec![],
        }
    }

    fn handle_profile_key(&mut self, key: KeyInput) -> Vec<AppAction> {
        match key {
            KeyInput::Esc => self.go_home(),
            KeyInput::Ctrl('c') => self.quit(),
            KeyInput::Ctrl('s') => self.save_profile(),
            KeyInput::Tab | KeyInput::Down => {
                self.form.focus_next();
                vec![AppAction::Render]
            },
            KeyInput::BackTab | KeyInput::Up => {
                self.form.focus_prev();
                vec![AppAction::Render]
            },
            KeyInput::Enter if self.form.focus() == FormField::Save => self.save_profile(),
            KeyInput::Enter => {
                let change = self.form.enter();
                self.apply_form_change(change)
            },
            _ => {
                let change = self.form.edit(key);
                self.apply_form_change(change)
            },
        }
    }

    fn apply_form_change(&mut self, change: FormChange) -> Vec<AppAction> {
        match change {
            FormChange::None => {},
            FormChange::Edited => self.mark_edited(),
            FormChange::Tag { field, tag, outcome } => {
                let label = field.label().to_lowercase();
                match outcome {
                    TagInsert::Added => {
                        self.mark_edited();
                        self.status_message = Some(format!("Added {tag} to {label}"));
                    },
                    TagInsert::Duplicate => {
                        self.status_message = Some(format!("{tag} is already in {label}"));
                    },
                    TagInsert::Full => {
                        self.status_message = Some(format!("At most {MAX_TAGS} {label}"));
                    },
                    TagInsert::Empty => {},
                }
            },
            FormChange::TagRemoved { field, tag } => {
                self.mark_edited();
                self.status_message =
                    Some(format!("Removed {tag} from {}", field.label().to_lowercase()));
            },
        }
        vec![AppAction::Render]
    }

    fn mark_edited(&mut self) {
        self.saved_until = None;
    }

    /// Switch to the profile screen.
    pub fn open_profile(&mut self) -> Vec<AppAction> {
        self.screen = Screen::Profile;
        self.status_message = None;
        vec![AppAction::Render]
    }

    /// Switch back to the home screen.
    pub fn go_home(&mut self) -> Vec<AppAction> {
        self.screen = Screen::Home;
        self.status_message = None;
        vec![AppAction::Render]
    }

    /// Save the form under the current user key.
    pub fn save_profile(&mut self) -> Vec<AppAction> {
        self.status_message = Some("Saving...".to_string());
        vec![
            AppAction::SaveProfile { key: self.user_key, record: self.form.to_record() },
            AppAction::Render,
        ]
    }

    /// Quit the application.
    pub fn quit(&self) -> Vec<AppAction> {
        vec![AppAction::Quit]
    }

    /// Set a status message to display to the user.
    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = Some(message.into());
    }

    /// Current screen.
    pub fn screen(&self) -> Screen {
        self.screen
    }

    /// Decoded session.
    pub fn session(&self) -> &SessionPayload {
        &self.session
    }

    /// Host user from the session.
    pub fn user(&self) -> Option<&SessionUser> {
        self.user.as_ref()
    }

    /// Storage identity.
    pub fn user_key(&self) -> UserKey {
        self.user_key
    }

    /// True when running inside the host.
    pub fn host_available(&self) -> bool {
        self.host_available
    }

    /// Home screen contents.
    pub fn home(&self) -> &HomeView {
        &self.home
    }

    /// Profile editor.
    pub fn form(&self) -> &ProfileForm {
        &self.form
    }

    /// Current form values.
    pub fn profile(&self) -> ProfileRecord {
        self.form.to_record()
    }

    /// True once the form shows a stored record.
    pub fn profile_loaded(&self) -> bool {
        self.profile_loaded
    }

    /// Published safe area.
    pub fn safe_area(&self) -> SafeArea {
        self.safe_area
    }

    /// Terminal dimensions (columns, rows).
    pub fn terminal_size(&self) -> (u16, u16) {
        self.terminal_size
    }

    /// Transient status message. `None` if no message.
    pub fn status_message(&self) -> Option<&str> {
        self.status_message.as_deref()
    }

    /// True while the "saved" indicator is on.
    pub fn is_saved(&self) -> bool {
        self.saved_until.is_some()
    }

    /// Deadline of the "saved" indicator.
    pub fn saved_until(&self) -> Option<u64> {
        self.saved_until
    }

    /// Driver clock at the last tick.
    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }
}
