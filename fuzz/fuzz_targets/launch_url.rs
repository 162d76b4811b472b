//! Fuzz target for launch token resolution
//!
//! Arbitrary host tokens and launch URLs, absolute or bare query strings.
//!
//! # Invariants
//!
//! - A non-empty host token always wins
//! - A resolved token is never empty
//! - NEVER panic on malformed URLs

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use miniapp_core::{TokenSource, resolve_token};

#[derive(Debug, Arbitrary)]
struct Launch {
    host: Option<String>,
    url: Option<String>,
}

fuzz_target!(|launch: Launch| {
    let resolved = resolve_token(launch.host.as_deref(), launch.url.as_deref());

    match launch.host.as_deref() {
        Some(host) if !host.is_empty() => {
            let token = resolved.expect("host token must resolve");
            assert_eq!(token.source, TokenSource::Host);
            assert_eq!(token.raw, host);
        },
        _ => {
            if let Some(token) = resolved {
                assert_eq!(token.source, TokenSource::Url);
                assert!(!token.raw.is_empty());
            }
        },
    }
});
