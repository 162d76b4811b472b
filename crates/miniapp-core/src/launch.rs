//! Session token discovery.
//!
//! The token may come from the host object or from the `tgWebAppData`
//! parameter of the launch URL. The host wins when both are present.

use url::{Url, form_urlencoded};

/// Query parameter carrying the session token in launch URLs.
pub const TOKEN_PARAM: &str = "tgWebAppData";

/// Where a session token was found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenSource {
    /// Host object's init data.
    Host,
    /// Launch URL query parameter.
    Url,
}

/// Raw session token and its origin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchToken {
    /// Undecoded token.
    pub raw: String,
    /// Origin of the token.
    pub source: TokenSource,
}

/// Pick the session token.
///
/// `launch_url` may be an absolute URL, a query string with or without the
/// leading `?`, or `None`. Empty tokens count as absent.
pub fn resolve_token(host_init_data: Option<&str>, launch_url: Option<&str>) -> Option<LaunchToken> {
    if let Some(raw) = host_init_data.filter(|data| !data.is_empty()) {
        return Some(LaunchToken { raw: raw.to_string(), source: TokenSource::Host });
    }

    let raw = launch_url.and_then(token_from_url)?;
    Some(LaunchToken { raw, source: TokenSource::Url })
}

fn token_from_url(launch_url: &str) -> Option<String> {
    match Url::parse(launch_url) {
        Ok(url) => {
            let from_query = find_param(url.query().unwrap_or_default());
            from_query.or_else(|| url.fragment().and_then(find_param))
        },
        Err(_) => find_param(launch_url.trim_start_matches('?')),
    }
}

fn find_param(query: &str) -> Option<String> {
    form_urlencoded::parse(query.as_bytes())
        .find(|(key, _)| key == TOKEN_PARAM)
        .map(|(_, value)| value.into_owned())
        .filter(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    const ENCODED: &str = "tgWebAppData=a%3D1%26b%3D2";

    #[test]
    fn host_takes_priority() {
        let token = resolve_token(Some("x=1"), Some(ENCODED));
        assert_eq!(token, Some(LaunchToken { raw: "x=1".into(), source: TokenSource::Host }));
    }

    #[test]
    fn empty_host_data_falls_back_to_url() {
        let token = resolve_token(Some(""), Some(ENCODED));
        assert_eq!(token.map(|t| (t.raw, t.source)), Some(("a=1&b=2".into(), TokenSource::Url)));
    }

    #[test]
    fn absolute_url_query() {
        let url = format!("https://app.example/?lang=en&{ENCODED}");
        let token = resolve_token(None, Some(&url));
        assert_eq!(token.map(|t| t.raw).as_deref(), Some("a=1&b=2"));
    }

    #[test]
    fn absolute_url_fragment() {
        let url = format!("https://app.example/#{ENCODED}&tgWebAppVersion=7.0");
        let token = resolve_token(None, Some(&url));
        assert_eq!(token.map(|t| t.raw).as_deref(), Some("a=1&b=2"));
    }

    #[test]
    fn bare_query_string() {
        let token = resolve_token(None, Some(&format!("?{ENCODED}")));
        assert_eq!(token.map(|t| t.raw).as_deref(), Some("a=1&b=2"));
    }

    #[test]
    fn nothing_available() {
        assert_eq!(resolve_token(None, None), None);
        assert_eq!(resolve_token(None, Some("https://app.example/?x=1")), None);
    }
}
