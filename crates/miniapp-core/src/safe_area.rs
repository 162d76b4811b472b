//! Safe-area insets.
//!
//! The host reports two inset objects: the device safe area (notches, system
//! bars) and the content safe area (host chrome). Per field the content value
//! wins when it is non-zero, then the device value, then zero. The merged top
//! inset is published twice: clamped to [`MIN_LAYOUT_TOP`] for layout and
//! unclamped for content placement.
//!
//! [`SafeAreaTracker::attach`] registers for both change events and returns a
//! [`SafeAreaSubscription`] that removes the listeners when dropped.

use crate::host::{Host, HostBridge, HostEventKind, ListenerId};

/// Floor applied to the top inset for layout.
pub const MIN_LAYOUT_TOP: f64 = 44.0;

/// Inset object as reported by the host; any field may be missing.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PartialInsets {
    /// Top offset.
    pub top: Option<f64>,
    /// Right offset.
    pub right: Option<f64>,
    /// Bottom offset.
    pub bottom: Option<f64>,
    /// Left offset.
    pub left: Option<f64>,
}

impl PartialInsets {
    /// All four fields present.
    pub fn new(top: f64, right: f64, bottom: f64, left: f64) -> Self {
        Self { top: Some(top), right: Some(right), bottom: Some(bottom), left: Some(left) }
    }
}

/// Four non-negative offsets of obstructed screen regions.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SafeAreaInsets {
    /// Top offset.
    pub top: f64,
    /// Right offset.
    pub right: f64,
    /// Bottom offset.
    pub bottom: f64,
    /// Left offset.
    pub left: f64,
}

impl SafeAreaInsets {
    /// Merge the content and device inset objects field by field.
    pub fn merge(content: Option<PartialInsets>, device: Option<PartialInsets>) -> Self {
        let content = content.unwrap_or_default();
        let device = device.unwrap_or_default();

        Self {
            top: pick(content.top, device.top),
            right: pick(content.right, device.right),
            bottom: pick(content.bottom, device.bottom),
            left: pick(content.left, device.left),
        }
    }
}

/// First usable (present, finite, non-zero) value, clamped to `>= 0`.
fn pick(preferred: Option<f64>, fallback: Option<f64>) -> f64 {
    let usable = |v: &f64| v.is_finite() && *v != 0.0;
    preferred.filter(usable).or(fallback.filter(usable)).map_or(0.0, |v| v.max(0.0))
}

/// Published safe area: merged insets plus the clamped and raw top.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SafeArea {
    /// Merged insets.
    pub insets: SafeAreaInsets,
    /// `max(insets.top, MIN_LAYOUT_TOP)`.
    pub layout_top: f64,
    /// Unclamped top inset.
    pub content_top: f64,
}

impl SafeArea {
    /// Derive the published values from merged insets.
    pub fn from_insets(insets: SafeAreaInsets) -> Self {
        Self { insets, layout_top: insets.top.max(MIN_LAYOUT_TOP), content_top: insets.top }
    }

    /// CSS custom properties as `(name, value)` pairs.
    pub fn css_variables(&self) -> [(&'static str, String); 5] {
        [
            ("--safe-area-top", px(self.layout_top)),
            ("--safe-area-right", px(self.insets.right)),
            ("--safe-area-bottom", px(self.insets.bottom)),
            ("--safe-area-left", px(self.insets.left)),
            ("--content-safe-area-top", px(self.content_top)),
        ]
    }
}

impl Default for SafeArea {
    fn default() -> Self {
        Self::from_insets(SafeAreaInsets::default())
    }
}

fn px(value: f64) -> String {
    format!("{value}px")
}

/// Holds the current [`SafeArea`] and recomputes it from the host.
#[derive(Debug, Clone, Default)]
pub struct SafeAreaTracker {
    current: SafeArea,
}

impl SafeAreaTracker {
    /// Tracker with zero insets.
    pub fn new() -> Self {
        Self::default()
    }

    /// Last computed safe area.
    pub fn current(&self) -> SafeArea {
        self.current
    }

    /// Re-read both inset objects from the host.
    pub fn recompute<B: HostBridge>(&mut self, bridge: &B) -> SafeArea {
        let insets =
            SafeAreaInsets::merge(bridge.content_safe_area_inset(), bridge.safe_area_inset());
        self.current = SafeArea::from_insets(insets);
        tracing::debug!(?insets, layout_top = self.current.layout_top, "safe area updated");
        self.current
    }

    /// Compute the initial value and subscribe to both change events.
    ///
    /// Returns `None` without a host; the tracker then keeps zero insets.
    pub fn attach<B: HostBridge + Clone>(
        &mut self,
        host: &Host<B>,
    ) -> Option<SafeAreaSubscription<B>> {
        let bridge = host.bridge()?;
        self.recompute(bridge);
        Some(SafeAreaSubscription::subscribe(bridge.clone()))
    }
}

/// Listener registrations for both safe-area events.
///
/// Dropping the handle unregisters both listeners.
pub struct SafeAreaSubscription<B: HostBridge> {
    bridge: B,
    listeners: Vec<(HostEventKind, ListenerId)>,
}

impl<B: HostBridge> SafeAreaSubscription<B> {
    fn subscribe(bridge: B) -> Self {
        let listeners =
            HostEventKind::ALL.into_iter().map(|kind| (kind, bridge.on_event(kind))).collect();
        Self { bridge, listeners }
    }

    /// True if `kind` is one of the subscribed events.
    pub fn listens_to(&self, kind: HostEventKind) -> bool {
        self.listeners.iter().any(|(k, _)| *k == kind)
    }

    /// Bridge the listeners are registered on.
    pub fn bridge(&self) -> &B {
        &self.bridge
    }
}

impl<B: HostBridge> Drop for SafeAreaSubscription<B> {
    fn drop(&mut self) {
        for (kind, id) in self.listeners.drain(..) {
            self.bridge.off_event(kind, id);
        }
        tracing::debug!("safe area listeners removed");
    }
}
