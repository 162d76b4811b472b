//! Fuzz target for SessionPayload::parse
//!
//! Feeds arbitrary text to the session token decoder to find:
//! - Panics on malformed percent escapes or invalid UTF-8
//! - JSON fields that neither decode nor fall back to text
//! - Keys lost when the payload is encoded again
//!
//! The parser is total: it must NEVER panic and always yield a payload.

#![no_main]

use libfuzzer_sys::fuzz_target;
use miniapp_core::{SessionPayload, SessionValue, session::JSON_FIELDS};

fuzz_target!(|data: &[u8]| {
    let token = String::from_utf8_lossy(data);
    let payload = SessionPayload::parse(&token);

    // INVARIANT: only JSON fields may carry structured values
    for (key, value) in payload.iter() {
        if let SessionValue::Json(_) = value {
            assert!(JSON_FIELDS.contains(&key), "structured value under {key:?}");
        }
    }

    // INVARIANT: keys are unique
    let mut keys: Vec<&str> = payload.iter().map(|(k, _)| k).collect();
    keys.sort_unstable();
    keys.dedup();
    assert_eq!(keys.len(), payload.len());

    // INVARIANT: re-encoding keeps every key, in order
    let reparsed = SessionPayload::parse(&payload.to_query());
    let before: Vec<&str> = payload.iter().map(|(k, _)| k).collect();
    let after: Vec<&str> = reparsed.iter().map(|(k, _)| k).collect();
    assert_eq!(before, after);

    // user_key never panics and agrees with user()
    assert_eq!(payload.user().is_some(), payload.user_key() != miniapp_core::UserKey::Guest);
});
