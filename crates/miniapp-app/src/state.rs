//! Observable application state types.
//!
//! These structures serve as the "View Model" for the application. They
//! contain what the screens render, already reduced to display strings.

use miniapp_core::{HostInfo, LaunchToken, SessionPayload};

/// Screens of the app.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Screen {
    /// Read-only identity glance and launch data.
    #[default]
    Home,
    /// Profile view and editor.
    Profile,
}

/// What the home screen lists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HomeView {
    /// Launch data not known yet.
    Pending,
    /// Decoded session token.
    Session {
        /// Undecoded token.
        raw: String,
        /// `(key, JSON rendering of value)` in token order.
        fields: Vec<(String, String)>,
    },
    /// No token; environment details reported by the host.
    HostInfo {
        /// `(name, value)` pairs.
        fields: Vec<(String, String)>,
    },
    /// Neither token nor host: placeholder data for development.
    Simulated {
        /// `(name, value)` pairs.
        fields: Vec<(String, String)>,
    },
}

impl HomeView {
    /// Build the home view from launch data.
    pub fn from_launch(
        token: Option<&LaunchToken>,
        session: &SessionPayload,
        host_info: Option<&HostInfo>,
    ) -> Self {
        if let Some(token) = token {
            let fields =
                session.iter().map(|(k, v)| (k.to_string(), v.to_json_string())).collect();
            return Self::Session { raw: token.raw.clone(), fields };
        }

        if let Some(info) = host_info {
            let fields = info.fields().into_iter().map(|(k, v)| (k.to_string(), v)).collect();
            return Self::HostInfo { fields };
        }

        Self::Simulated {
            fields: vec![
                (
                    "For Testing".to_string(),
                    "This is simulated data. Actual data will come from the host.".to_string(),
                ),
                ("Platform".to_string(), "web".to_string()),
                ("Version".to_string(), "6.0".to_string()),
            ],
        }
    }

    /// Raw session token, if one was supplied.
    pub fn raw_token(&self) -> Option<&str> {
        match self {
            Self::Session { raw, .. } => Some(raw),
            _ => None,
        }
    }

    /// Listed fields.
    pub fn fields(&self) -> &[(String, String)] {
        match self {
            Self::Pending => &[],
            Self::Session { fields, .. } | Self::HostInfo { fields } | Self::Simulated { fields } => {
                fields
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use miniapp_core::TokenSource;

    use super::*;

    #[test]
    fn session_fields_are_json_rendered() {
        let token = LaunchToken { raw: "a=1&user=%7B%22id%22%3A1%7D".into(), source: TokenSource::Url };
        let session = SessionPayload::parse(&token.raw);
        let view = HomeView::from_launch(Some(&token), &session, None);

        assert_eq!(view.raw_token(), Some(token.raw.as_str()));
        assert_eq!(view.fields(), [
            ("a".to_string(), "\"1\"".to_string()),
            ("user".to_string(), "{\"id\":1}".to_string())
        ]);
    }

    #[test]
    fn host_info_without_token() {
        let info = HostInfo { platform: "android".into(), ..HostInfo::default() };
        let view = HomeView::from_launch(None, &SessionPayload::new(), Some(&info));
        assert!(matches!(view, HomeView::HostInfo { .. }));
        assert!(view.fields().iter().any(|(k, v)| k == "platform" && v == "android"));
    }

    #[test]
    fn simulated_without_host() {
        let view = HomeView::from_launch(None, &SessionPayload::new(), None);
        assert!(matches!(view, HomeView::Simulated { .. }));
        assert_eq!(view.raw_token(), None);
        assert_eq!(view.fields().len(), 3);
    }
}
