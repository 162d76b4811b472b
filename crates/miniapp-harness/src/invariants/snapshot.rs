//! Observable App state for invariant checks.

use miniapp_app::{App, FormField, Screen};
use miniapp_core::SafeArea;

/// Snapshot of one tag list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagSnapshot {
    /// Field the list belongs to.
    pub label: &'static str,
    /// Tags in insertion order.
    pub tags: Vec<String>,
}

/// Point-in-time view of the App.
#[derive(Debug, Clone, Default)]
pub struct AppSnapshot {
    /// Screen shown.
    pub screen: Screen,
    /// Hobbies and interests lists.
    pub tag_lists: Vec<TagSnapshot>,
    /// Published safe area.
    pub safe_area: SafeArea,
    /// App clock.
    pub now_ms: u64,
    /// Deadline of the "saved" indicator, if shown.
    pub saved_until: Option<u64>,
}

impl AppSnapshot {
    /// Capture the observable state of `app`.
    pub fn from_app(app: &App) -> Self {
        let form = app.form();
        let tag_lists = [FormField::Hobbies, FormField::Interests]
            .into_iter()
            .filter_map(|field| {
                form.tags(field).map(|tags| TagSnapshot {
                    label: field.label(),
                    tags: tags.iter().map(str::to_owned).collect(),
                })
            })
            .collect();

        Self {
            screen: app.screen(),
            tag_lists,
            safe_area: app.safe_area(),
            now_ms: app.now_ms(),
            saved_until: app.saved_until(),
        }
    }
}
