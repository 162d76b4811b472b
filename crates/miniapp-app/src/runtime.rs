//! Generic runtime for application orchestration.
//!
//! The Runtime drives the application event loop, coordinating between:
//! - [`App`]: UI state machine
//! - [`Bridge`]: Storage bridge to the profile store
//! - [`Driver`]: Platform-specific I/O
//! - [`Host`]: The host environment and its safe-area events

use miniapp_core::{
    Host, HostBridge, LocalStorage, SafeAreaSubscription, SafeAreaTracker, resolve_token,
};

use crate::{App, AppAction, AppEvent, Bridge, Driver};

/// Generic runtime that orchestrates App, Bridge, Driver and Host.
///
/// # Type Parameters
///
/// - `D`: Platform-specific I/O driver
/// - `B`: Host bridge implementation
/// - `S`: Local storage backend
pub struct Runtime<D, B, S>
where
    D: Driver,
    B: HostBridge + Clone,
    S: LocalStorage,
{
    driver: D,
    app: App,
    bridge: Bridge<S>,
    host: Host<B>,
    launch_url: Option<String>,
    tracker: SafeAreaTracker,
    subscription: Option<SafeAreaSubscription<B>>,
}

impl<D, B, S> Runtime<D, B, S>
where
    D: Driver,
    B: HostBridge + Clone,
    S: LocalStorage,
{
    /// Create a new runtime.
    ///
    /// `launch_url` is the URL (or query string) the app was opened with; it
    /// is consulted for the session token when the host supplies none.
    pub fn new(driver: D, host: Host<B>, storage: S, launch_url: Option<String>) -> Self {
        Self {
            driver,
            app: App::new(),
            bridge: Bridge::new(storage),
            host,
            launch_url,
            tracker: SafeAreaTracker::new(),
            subscription: None,
        }
    }

    /// Run the main event loop.
    ///
    /// This is the core orchestration loop that:
    /// 1. Notifies the host and loads the session and profile
    /// 2. Polls for input events from the driver
    /// 3. Dispatches pending host safe-area events
    /// 4. Processes actions and events between App and Bridge
    ///
    /// The safe-area listeners are removed when the loop ends, whether it
    /// quits normally or returns an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the driver encounters an I/O error.
    pub async fn run(mut self) -> Result<(), D::Error> {
        let result = self.run_loop().await;
        self.teardown();
        result
    }

    async fn run_loop(&mut self) -> Result<(), D::Error> {
        if self.start()? {
            return Ok(());
        }

        loop {
            let should_quit = self.process_cycle().await?;
            if should_quit {
                break;
            }
        }

        Ok(())
    }

    /// Startup: host notification, session, safe area and profile load.
    ///
    /// Returns `true` if the application should quit.
    pub fn start(&mut self) -> Result<bool, D::Error> {
        self.host.startup();

        let host_data = self.host.init_data();
        let token = resolve_token(host_data.as_deref(), self.launch_url.as_deref());
        let host_info = self.host.info();
        let mut actions = self.app.handle(AppEvent::Tick { now_ms: self.driver.now_ms() });
        actions.extend(self.app.handle(AppEvent::SessionLoaded { token, host_info }));

        self.subscription = self.tracker.attach(&self.host);
        actions.extend(self.app.handle(AppEvent::SafeAreaChanged(self.tracker.current())));

        self.process_actions(actions)
    }

    /// Process one cycle of the event loop.
    ///
    /// Returns `true` if the application should quit.
    pub async fn process_cycle(&mut self) -> Result<bool, D::Error> {
        let Some(event) = self.driver.poll_event().await? else {
            return Ok(true);
        };

        let actions = self.app.handle(event);
        if self.process_actions(actions)? {
            return Ok(true);
        }

        self.dispatch_host_events()
    }

    /// Feed pending host events through the safe-area tracker.
    fn dispatch_host_events(&mut self) -> Result<bool, D::Error> {
        for kind in self.host.take_events() {
            let Some(subscription) = &self.subscription else {
                break;
            };
            if !subscription.listens_to(kind) {
                continue;
            }

            tracing::debug!(event = %kind, "host event");
            let area = self.tracker.recompute(subscription.bridge());
            let actions = self.app.handle(AppEvent::SafeAreaChanged(area));
            if self.process_actions(actions)? {
                return Ok(true);
            }
        }
        Ok(false)
    }

    /// Process actions returned by the App.
    ///
    /// Returns `true` if should quit.
    fn process_actions(&mut self, initial_actions: Vec<AppAction>) -> Result<bool, D::Error> {
        let mut pending_actions = initial_actions;

        while !pending_actions.is_empty() {
            let actions = std::mem::take(&mut pending_actions);

            for action in actions {
                match action {
                    AppAction::Render => self.driver.render(&self.app)?,
                    AppAction::Quit => return Ok(true),

                    // Storage operations go through the bridge
                    AppAction::LoadProfile { .. } | AppAction::SaveProfile { .. } => {
                        let events = self.bridge.process_app_action(action);
                        for event in events {
                            pending_actions.extend(self.app.handle(event));
                        }
                    },
                }
            }
        }
        Ok(false)
    }

    fn teardown(&mut self) {
        self.subscription = None;
        self.driver.stop();
        tracing::info!("runtime stopped");
    }

    /// Get a reference to the App
    pub fn app(&self) -> &App {
        &self.app
    }

    /// Get a mutable reference to the App
    pub fn app_mut(&mut self) -> &mut App {
        &mut self.app
    }

    /// Get a reference to the Bridge
    pub fn bridge(&self) -> &Bridge<S> {
        &self.bridge
    }

    /// Get a reference to the Driver
    pub fn driver(&self) -> &D {
        &self.driver
    }

    /// True while the safe-area listeners are registered.
    pub fn is_subscribed(&self) -> bool {
        self.subscription.is_some()
    }
}
