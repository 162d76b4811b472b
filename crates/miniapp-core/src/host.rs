//! Host environment abstraction.
//!
//! The mini app runs inside a chat client that exposes a "WebApp" object:
//! the session token, readiness/expand calls, theme and viewport details,
//! safe-area insets and change events. [`HostBridge`] is that capability
//! surface. [`Host`] makes its presence explicit: running outside the host is
//! a supported development mode, not an error.

use std::{fmt, str::FromStr};

use crate::safe_area::PartialInsets;

/// Identifies a registered event listener for [`HostBridge::off_event`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(pub u64);

/// Host-emitted events the app listens to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HostEventKind {
    /// Device safe area changed (`safeAreaChanged`).
    SafeAreaChanged,
    /// Content safe area changed (`contentSafeAreaChanged`).
    ContentSafeAreaChanged,
}

impl HostEventKind {
    /// Every event kind.
    pub const ALL: [Self; 2] = [Self::SafeAreaChanged, Self::ContentSafeAreaChanged];

    /// Event name as the host spells it.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::SafeAreaChanged => "safeAreaChanged",
            Self::ContentSafeAreaChanged => "contentSafeAreaChanged",
        }
    }
}

impl fmt::Display for HostEventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unknown host event name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown host event: {0}")]
pub struct UnknownEvent(pub String);

impl FromStr for HostEventKind {
    type Err = UnknownEvent;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL.into_iter().find(|kind| kind.as_str() == s).ok_or_else(|| UnknownEvent(s.into()))
    }
}

/// Environment details the host reports about itself.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HostInfo {
    /// Bot API version supported by the host.
    pub version: String,
    /// Client platform (`ios`, `android`, `tdesktop`, `web`, ...).
    pub platform: String,
    /// `light` or `dark`.
    pub color_scheme: String,
    /// Whether the app occupies the full available height.
    pub is_expanded: bool,
    /// Current visible height.
    pub viewport_height: f64,
    /// Height of the last stable viewport state.
    pub viewport_stable_height: f64,
    /// Header color as `#rrggbb`.
    pub header_color: String,
    /// Background color as `#rrggbb`.
    pub background_color: String,
    /// Theme palette.
    pub theme_params: serde_json::Value,
    /// Whether the host back button is shown.
    pub back_button_visible: bool,
    /// Caption of the host main button.
    pub main_button_text: String,
    /// Haptic feedback available.
    pub haptic_feedback: bool,
    /// Cloud storage available.
    pub cloud_storage: bool,
    /// Biometric manager available.
    pub biometric_manager: bool,
    /// QR scanner available.
    pub qr_scanner: bool,
}

impl HostInfo {
    /// Field list in the order the home screen shows them.
    pub fn fields(&self) -> Vec<(&'static str, String)> {
        vec![
            ("version", self.version.clone()),
            ("platform", self.platform.clone()),
            ("colorScheme", self.color_scheme.clone()),
            ("isExpanded", self.is_expanded.to_string()),
            ("viewportHeight", self.viewport_height.to_string()),
            ("viewportStableHeight", self.viewport_stable_height.to_string()),
            ("headerColor", self.header_color.clone()),
            ("backgroundColor", self.background_color.clone()),
            ("BackButton", self.back_button_visible.to_string()),
            ("MainButton", self.main_button_text.clone()),
            ("HapticFeedback", self.haptic_feedback.to_string()),
            ("CloudStorage", self.cloud_storage.to_string()),
            ("BiometricManager", self.biometric_manager.to_string()),
            ("QRScanner", self.qr_scanner.to_string()),
            ("themeParams", self.theme_params.to_string()),
        ]
    }
}

/// Capabilities of the host's WebApp object.
///
/// Methods take `&self`; implementations that record state use interior
/// mutability. All calls are fire-and-forget from the app's point of view.
pub trait HostBridge {
    /// Raw session token. `None` or empty when the host supplies none.
    fn init_data(&self) -> Option<String>;

    /// Tell the host the app is ready to be shown.
    fn ready(&self);

    /// Ask the host to expand the app to full height.
    fn expand(&self);

    /// Environment details.
    fn info(&self) -> HostInfo;

    /// Device safe-area insets, if reported.
    fn safe_area_inset(&self) -> Option<PartialInsets>;

    /// Content safe-area insets, if reported.
    fn content_safe_area_inset(&self) -> Option<PartialInsets>;

    /// Register interest in `kind`.
    fn on_event(&self, kind: HostEventKind) -> ListenerId;

    /// Remove a listener registered with [`HostBridge::on_event`].
    fn off_event(&self, kind: HostEventKind, id: ListenerId);

    /// Drain events emitted since the last call.
    ///
    /// Only kinds with at least one registered listener are delivered; the
    /// event loop dispatches them in emission order.
    fn take_events(&self) -> Vec<HostEventKind>;
}

/// Host bridge, or its absence.
#[derive(Debug, Clone)]
pub enum Host<B> {
    /// Running inside the host.
    Available(B),
    /// Running standalone (development mode).
    Unavailable,
}

impl<B: HostBridge> Host<B> {
    /// The bridge, if available.
    pub fn bridge(&self) -> Option<&B> {
        match self {
            Self::Available(bridge) => Some(bridge),
            Self::Unavailable => None,
        }
    }

    /// True when running inside the host.
    pub fn is_available(&self) -> bool {
        matches!(self, Self::Available(_))
    }

    /// Signal readiness and request full height. No-op without a host.
    pub fn startup(&self) {
        if let Some(bridge) = self.bridge() {
            bridge.ready();
            bridge.expand();
            tracing::info!("host notified: ready, expand");
        } else {
            tracing::info!("no host bridge, running in development mode");
        }
    }

    /// Non-empty session token from the host.
    pub fn init_data(&self) -> Option<String> {
        self.bridge().and_then(HostBridge::init_data).filter(|data| !data.is_empty())
    }

    /// Environment details, if a host is present.
    pub fn info(&self) -> Option<HostInfo> {
        self.bridge().map(HostBridge::info)
    }

    /// Pending host events. Always empty without a host.
    pub fn take_events(&self) -> Vec<HostEventKind> {
        self.bridge().map(HostBridge::take_events).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn event_names_round_trip() {
        for kind in HostEventKind::ALL {
            assert_eq!(kind.as_str().parse::<HostEventKind>(), Ok(kind));
        }
        assert!("viewportChanged".parse::<HostEventKind>().is_err());
    }

    #[test]
    fn host_info_field_order() {
        let info = HostInfo { platform: "ios".into(), ..HostInfo::default() };
        let fields = info.fields();
        assert_eq!(fields[1], ("platform", "ios".to_string()));
        assert_eq!(fields.len(), 15);
    }
}
