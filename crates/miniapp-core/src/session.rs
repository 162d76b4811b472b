//! Session token (initData) decoding.
//!
//! The host hands the app a query-string shaped token such as
//! `query_id=AAE&user=%7B%22id%22%3A42%7D&auth_date=1700000000&hash=ab12`.
//! [`SessionPayload::parse`] turns it into an ordered key/value mapping.
//!
//! # Rules
//!
//! - Segments are split on `&`, then on the first `=`, and both halves are
//!   form-urlencoded decoded (`+` is a space).
//! - Empty segments are skipped. A key without `=` maps to `""`.
//! - Duplicate keys: the last value wins, the key keeps its first position.
//! - `user`, `receiver` and `chat` carry JSON objects. They are decoded when
//!   possible and kept as the raw string otherwise.
//!
//! Decoding is total: malformed escapes are kept literally and invalid UTF-8
//! is replaced, so no token makes the parser fail.

use std::fmt;

use serde::{Deserialize, Deserializer, de::DeserializeOwned};
use url::form_urlencoded;

use crate::profile::UserKey;

/// Keys whose values are JSON-encoded objects.
pub const JSON_FIELDS: [&str; 3] = ["user", "receiver", "chat"];

/// A decoded session field value.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionValue {
    /// Plain decoded string.
    Text(String),
    /// Structured value of a JSON field.
    Json(serde_json::Value),
}

impl SessionValue {
    /// String contents, if this is a plain value.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            Self::Json(_) => None,
        }
    }

    /// Structured contents, if this is a decoded JSON field.
    pub fn as_json(&self) -> Option<&serde_json::Value> {
        match self {
            Self::Json(v) => Some(v),
            Self::Text(_) => None,
        }
    }

    /// JSON rendering of the value (plain strings are quoted).
    pub fn to_json_string(&self) -> String {
        match self {
            Self::Text(s) => serde_json::Value::String(s.clone()).to_string(),
            Self::Json(v) => v.to_string(),
        }
    }
}

impl fmt::Display for SessionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(s) => f.write_str(s),
            Self::Json(v) => write!(f, "{v}"),
        }
    }
}

/// The `user` object of a session, as far as the app uses it.
///
/// Only `id` is required. An optional field of an unexpected type reads as
/// `None` instead of discarding the whole user.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SessionUser {
    /// Host-assigned numeric user identifier.
    pub id: u64,
    /// First name.
    #[serde(default, deserialize_with = "lenient")]
    pub first_name: Option<String>,
    /// Last name.
    #[serde(default, deserialize_with = "lenient")]
    pub last_name: Option<String>,
    /// Public handle without the leading `@`.
    #[serde(default, deserialize_with = "lenient")]
    pub username: Option<String>,
    /// IETF language tag of the user's client.
    #[serde(default, deserialize_with = "lenient")]
    pub language_code: Option<String>,
    /// Whether the user has a premium subscription.
    #[serde(default, deserialize_with = "lenient")]
    pub is_premium: Option<bool>,
}

/// Decoded session token: ordered `(key, value)` pairs with unique keys.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionPayload {
    entries: Vec<(String, SessionValue)>,
}

impl SessionPayload {
    /// Create an empty payload.
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode a raw session token.
    pub fn parse(token: &str) -> Self {
        let mut payload = Self::new();

        for (key, value) in form_urlencoded::parse(token.as_bytes()) {
            let value = if JSON_FIELDS.contains(&&*key) {
                decode_json_field(&key, value.into_owned())
            } else {
                SessionValue::Text(value.into_owned())
            };
            payload.insert(key.into_owned(), value);
        }

        payload
    }

    /// Set `key` to `value`.
    ///
    /// An existing key keeps its position and takes the new value.
    pub fn insert(&mut self, key: impl Into<String>, value: SessionValue) {
        let key = key.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    /// Value stored under `key`.
    pub fn get(&self, key: &str) -> Option<&SessionValue> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    /// Plain string stored under `key`. `None` for JSON values.
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(SessionValue::as_text)
    }

    /// Entries in order of first appearance.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &SessionValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Number of distinct keys.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if the token carried no fields.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Typed view of the `user` field.
    ///
    /// `None` unless `user` decoded to a JSON object with a numeric `id`.
    pub fn user(&self) -> Option<SessionUser> {
        let value = self.get("user")?.as_json()?;
        serde_json::from_value(value.clone()).ok()
    }

    /// Storage identity of the current user. [`UserKey::Guest`] without a
    /// usable `user.id`.
    pub fn user_key(&self) -> UserKey {
        self.get("user")
            .and_then(SessionValue::as_json)
            .and_then(|user| user.get("id"))
            .and_then(serde_json::Value::as_u64)
            .map_or(UserKey::Guest, UserKey::Id)
    }

    /// Encode back into a query string. JSON values are written compactly.
    pub fn to_query(&self) -> String {
        let mut serializer = form_urlencoded::Serializer::new(String::new());
        for (key, value) in &self.entries {
            serializer.append_pair(key, &value.to_string());
        }
        serializer.finish()
    }
}

impl<K: Into<String>> FromIterator<(K, SessionValue)> for SessionPayload {
    fn from_iter<T: IntoIterator<Item = (K, SessionValue)>>(iter: T) -> Self {
        let mut payload = Self::new();
        for (key, value) in iter {
            payload.insert(key, value);
        }
        payload
    }
}

fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}

fn decode_json_field(key: &str, raw: String) -> SessionValue {
    match serde_json::from_str(&raw) {
        Ok(value) => SessionValue::Json(value),
        Err(error) => {
            tracing::debug!(key, %error, "session field is not valid JSON, keeping raw string");
            SessionValue::Text(raw)
        },
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn text(s: &str) -> SessionValue {
        SessionValue::Text(s.to_string())
    }

    #[test]
    fn plain_pairs() {
        let payload = SessionPayload::parse("a=1&b=2");
        assert_eq!(payload.len(), 2);
        assert_eq!(payload.get("a"), Some(&text("1")));
        assert_eq!(payload.get("b"), Some(&text("2")));
    }

    #[test]
    fn user_field_is_decoded_as_json() {
        let payload =
            SessionPayload::parse("user=%7B%22id%22%3A42%2C%22first_name%22%3A%22Al%22%7D");

        let expected = SessionValue::Json(json!({"id": 42, "first_name": "Al"}));
        assert_eq!(payload.get("user"), Some(&expected));
        let user = payload.user();
        assert_eq!(user.as_ref().map(|u| u.id), Some(42));
        assert_eq!(user.and_then(|u| u.first_name).as_deref(), Some("Al"));
    }

    #[test]
    fn invalid_json_keeps_raw_string() {
        let payload = SessionPayload::parse("user=not-json&chat=%7Bbroken");
        assert_eq!(payload.get("user"), Some(&text("not-json")));
        assert_eq!(payload.get("chat"), Some(&text("{broken")));
        assert_eq!(payload.user(), None);
    }

    #[test]
    fn other_keys_are_never_json_decoded() {
        let payload = SessionPayload::parse("start_param=%7B%22a%22%3A1%7D");
        assert_eq!(payload.get("start_param"), Some(&text("{\"a\":1}")));
    }

    #[test]
    fn empty_token_is_empty() {
        assert!(SessionPayload::parse("").is_empty());
    }

    #[test]
    fn key_without_value() {
        let payload = SessionPayload::parse("flag&x=1");
        assert_eq!(payload.get_str("flag"), Some(""));
        assert_eq!(payload.get_str("x"), Some("1"));
    }

    #[test]
    fn last_duplicate_wins_and_keeps_position() {
        let payload = SessionPayload::parse("a=1&b=2&a=3");
        let keys: Vec<_> = payload.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, ["a", "b"]);
        assert_eq!(payload.get_str("a"), Some("3"));
    }

    #[test]
    fn value_split_on_first_equals() {
        let payload = SessionPayload::parse("hash=abc=def");
        assert_eq!(payload.get_str("hash"), Some("abc=def"));
    }

    #[test]
    fn malformed_escapes_are_kept() {
        let payload = SessionPayload::parse("%zz=1&b=%4&c=%FF");
        assert_eq!(payload.get_str("%zz"), Some("1"));
        assert_eq!(payload.get_str("b"), Some("%4"));
        assert_eq!(payload.get_str("c"), Some("\u{FFFD}"));
    }

    #[test]
    fn plus_decodes_to_space() {
        let payload = SessionPayload::parse("name=Ada+Lovelace");
        assert_eq!(payload.get_str("name"), Some("Ada Lovelace"));
    }

    #[test]
    fn empty_segments_are_skipped() {
        let payload = SessionPayload::parse("a=1&&b=2&");
        assert_eq!(payload.len(), 2);
    }

    #[test]
    fn user_key_falls_back_to_guest() {
        assert_eq!(SessionPayload::parse("a=1").user_key(), UserKey::Guest);
        assert_eq!(
            SessionPayload::parse("user=%7B%22first_name%22%3A%22Al%22%7D").user_key(),
            UserKey::Guest
        );
        assert_eq!(SessionPayload::parse("user=%7B%22id%22%3A7%7D").user_key(), UserKey::Id(7));
    }

    #[test]
    fn mistyped_optional_fields_keep_the_user() {
        let premium = SessionPayload::parse(
            "user=%7B%22id%22%3A42%2C%22first_name%22%3A%22Al%22%2C%22is_premium%22%3A%22yes%22%7D",
        );
        assert_eq!(premium.user_key(), UserKey::Id(42));
        let user = premium.user().unwrap();
        assert_eq!(user.first_name.as_deref(), Some("Al"));
        assert_eq!(user.is_premium, None);

        let numeric_name = SessionPayload::parse("user=%7B%22id%22%3A42%2C%22last_name%22%3A7%7D");
        assert_eq!(numeric_name.user_key(), UserKey::Id(42));
        assert_eq!(numeric_name.user().map(|u| (u.id, u.last_name)), Some((42, None)));
    }

    #[test]
    fn non_numeric_id_is_a_guest() {
        let payload = SessionPayload::parse("user=%7B%22id%22%3A%2242%22%7D");
        assert_eq!(payload.user_key(), UserKey::Guest);
        assert_eq!(payload.user(), None);
    }

    #[test]
    fn query_round_trip() {
        let original = SessionPayload::parse("query_id=AAE&user=%7B%22id%22%3A1%7D&auth_date=17");
        let reparsed = SessionPayload::parse(&original.to_query());
        assert_eq!(reparsed, original);
    }

    #[test]
    fn json_string_rendering() {
        assert_eq!(text("x").to_json_string(), "\"x\"");
        assert_eq!(SessionValue::Json(json!({"id": 1})).to_json_string(), "{\"id\":1}");
    }
}
