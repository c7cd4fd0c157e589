//! Persisted settings — API key and server URL, saved on every edit.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use tokio::sync::watch;
use tracing::{info, warn};

use crate::target::Target;

/// Persisted settings record.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default, rename = "apiKey")]
    pub api_key: String,
    #[serde(default, rename = "serverUrl")]
    pub server_url: String,
    /// RFC 3339 timestamp of the last successful cookie sync, per target.
    #[serde(default, rename = "lastSync", skip_serializing_if = "HashMap::is_empty")]
    pub last_sync: HashMap<String, String>,
}

/// Settings store backed by a JSON file.
///
/// Every mutation writes through to disk immediately and notifies
/// subscribers, matching the edit-triggered persistence of the settings
/// surface. Individual get/set calls are serialized behind a lock.
pub struct SettingsStore {
    path: PathBuf,
    current: RwLock<Settings>,
    tx: watch::Sender<Settings>,
}

impl SettingsStore {
    /// Load settings from `<dir>/settings.json`, or start from defaults.
    ///
    /// `first_run` is true when no settings file existed yet.
    pub fn load(dir: &Path) -> (Self, bool) {
        let path = dir.join("settings.json");
        let existed = path.exists();
        let settings: Settings = std::fs::read_to_string(&path)
            .ok()
            .and_then(|s| serde_json::from_str(&s).ok())
            .unwrap_or_default();

        if existed {
            info!("Settings loaded from {}", path.display());
        }

        let (tx, _) = watch::channel(settings.clone());
        (
            Self {
                path,
                current: RwLock::new(settings),
                tx,
            },
            !existed,
        )
    }

    /// Get a copy of the current settings.
    pub fn get(&self) -> Settings {
        self.current.read().clone()
    }

    /// Subscribe to settings changes.
    pub fn subscribe(&self) -> watch::Receiver<Settings> {
        self.tx.subscribe()
    }

    /// Update the API key and persist.
    pub fn set_api_key(&self, api_key: &str) {
        {
            let mut settings = self.current.write();
            settings.api_key = api_key.trim().to_string();
        }
        self.persist();
    }

    /// Update the server URL and persist.
    pub fn set_server_url(&self, server_url: &str) {
        {
            let mut settings = self.current.write();
            settings.server_url = server_url.trim().to_string();
        }
        self.persist();
    }

    /// Overwrite both fields at once and persist.
    pub fn set_all(&self, api_key: &str, server_url: &str) {
        {
            let mut settings = self.current.write();
            settings.api_key = api_key.trim().to_string();
            settings.server_url = server_url.trim().to_string();
        }
        self.persist();
    }

    /// Stamp the last successful sync time for a target.
    pub fn record_sync(&self, target: Target, timestamp: &str) {
        {
            let mut settings = self.current.write();
            settings
                .last_sync
                .insert(target.name().to_string(), timestamp.to_string());
        }
        self.persist();
    }

    fn persist(&self) {
        let settings = self.current.read().clone();
        if let Some(parent) = self.path.parent() {
            if let Err(e) = std::fs::create_dir_all(parent) {
                warn!("Failed to create settings directory: {}", e);
                return;
            }
        }
        match serde_json::to_string_pretty(&settings) {
            Ok(json) => {
                if let Err(e) = std::fs::write(&self.path, json) {
                    warn!("Failed to save settings: {}", e);
                }
            }
            Err(e) => warn!("Failed to serialize settings: {}", e),
        }
        let _ = self.tx.send(settings);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_store() -> (SettingsStore, tempfile::TempDir) {
        let dir = tempfile::tempdir().unwrap();
        let (store, first_run) = SettingsStore::load(dir.path());
        assert!(first_run);
        (store, dir)
    }

    #[test]
    fn test_defaults_on_first_run() {
        let (store, _dir) = test_store();
        let settings = store.get();
        assert!(settings.api_key.is_empty());
        assert!(settings.server_url.is_empty());
        assert!(settings.last_sync.is_empty());
    }

    #[test]
    fn test_roundtrip_through_disk() {
        let dir = tempfile::tempdir().unwrap();
        {
            let (store, _) = SettingsStore::load(dir.path());
            store.set_api_key("pplx_abc123");
            store.set_server_url("http://localhost:8765");
        }
        let (store, first_run) = SettingsStore::load(dir.path());
        assert!(!first_run);
        let settings = store.get();
        assert_eq!(settings.api_key, "pplx_abc123");
        assert_eq!(settings.server_url, "http://localhost:8765");
    }

    #[test]
    fn test_edits_are_trimmed() {
        let (store, _dir) = test_store();
        store.set_api_key("  pplx_abc123  ");
        store.set_server_url(" http://x:9000 ");
        let settings = store.get();
        assert_eq!(settings.api_key, "pplx_abc123");
        assert_eq!(settings.server_url, "http://x:9000");
    }

    #[test]
    fn test_record_sync() {
        let (store, _dir) = test_store();
        store.record_sync(Target::Perplexity, "2025-01-01T00:00:00Z");
        let settings = store.get();
        assert_eq!(
            settings.last_sync.get("perplexity").map(String::as_str),
            Some("2025-01-01T00:00:00Z")
        );
        assert!(!settings.last_sync.contains_key("chatgpt"));
    }

    #[test]
    fn test_watch_notification() {
        let (store, _dir) = test_store();
        let mut rx = store.subscribe();
        store.set_api_key("pplx_newkey99");
        assert!(rx.has_changed().unwrap());
        assert_eq!(rx.borrow_and_update().api_key, "pplx_newkey99");
    }

    #[test]
    fn test_camel_case_wire_format() {
        let (store, dir) = test_store();
        store.set_all("pplx_abc123", "http://x:9000");
        let raw = std::fs::read_to_string(dir.path().join("settings.json")).unwrap();
        assert!(raw.contains("\"apiKey\""));
        assert!(raw.contains("\"serverUrl\""));
    }
}
