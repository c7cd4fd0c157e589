//! Core types for pplxsync: errors, sync targets, settings store.

pub mod error;
pub mod settings;
pub mod target;

pub use error::{Error, Result};
pub use settings::{Settings, SettingsStore};
pub use target::Target;

/// API keys issued by the server are `pplx_` followed by a random suffix.
const API_KEY_PREFIX: &str = "pplx_";

/// Minimum total key length (prefix plus a meaningful suffix).
const API_KEY_MIN_LEN: usize = 11;

/// Check whether a string is a well-formed API key.
///
/// Keys must carry the `pplx_` prefix and be longer than ten characters.
/// This is a format check only; the server decides whether the key is live.
pub fn validate_api_key(key: &str) -> bool {
    key.starts_with(API_KEY_PREFIX) && key.len() >= API_KEY_MIN_LEN
}

/// Shorten a key for log output, keeping only the first few characters.
pub fn mask_key(key: &str) -> String {
    if key.len() <= 10 {
        return key.to_string();
    }
    let prefix: String = key.chars().take(10).collect();
    format!("{}...", prefix)
}
