//! Deterministic configuration fixtures.

use std::collections::HashMap;

/// Signing key id used by fully configured fixtures.
pub const TEST_KEY_ID: &str = "K1";

/// Signing secret used by fully configured fixtures.
pub const TEST_SECRET: &str = "S1";

/// Media server URL used by fully configured fixtures.
pub const TEST_MEDIA_URL: &str = "https://media.example.com";

/// Environment with key id, secret and media URL set.
pub fn configured_vars() -> HashMap<String, String> {
    HashMap::from([
        ("LIVEKIT_API_KEY".to_string(), TEST_KEY_ID.to_string()),
        ("LIVEKIT_API_SECRET".to_string(), TEST_SECRET.to_string()),
        ("LIVEKIT_URL".to_string(), TEST_MEDIA_URL.to_string()),
    ])
}

/// Fully configured environment minus `key`.
pub fn vars_without(key: &str) -> HashMap<String, String> {
    let mut vars = configured_vars();
    vars.remove(key);
    vars
}

/// Fully configured environment with `key` overridden.
pub fn vars_with(key: &str, value: &str) -> HashMap<String, String> {
    let mut vars = configured_vars();
    vars.insert(key.to_string(), value.to_string());
    vars
}
