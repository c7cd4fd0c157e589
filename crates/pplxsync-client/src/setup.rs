//! MCP server setup workflow — health check, config generation,
//! clipboard copy, settings persistence.

use tracing::{info, warn};

use pplxsync_core::{validate_api_key, Error, Result, SettingsStore};

use crate::api::ApiClient;
use crate::clipboard::Clipboard;
use crate::mcp::generate_mcp_config;

/// How setup finished once the server was reachable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SetupOutcome {
    /// Config was placed on the clipboard.
    Copied,
    /// Clipboard write failed; the serialized config is handed back for
    /// manual copying instead of being lost.
    ConfigReady { config_json: String },
}

/// Validate inputs, probe the server, build the MCP config and copy it
/// to the clipboard.
///
/// Settings are persisted once the config has been generated, even when
/// the clipboard write fails. A failed health check persists nothing and
/// never touches the clipboard.
pub async fn setup(
    store: &SettingsStore,
    clipboard: &dyn Clipboard,
    api_key: &str,
    server_url: &str,
) -> Result<SetupOutcome> {
    let api_key = api_key.trim();
    let server_url = server_url.trim();

    if !validate_api_key(api_key) {
        return Err(Error::InvalidApiKey);
    }
    if server_url.is_empty() {
        return Err(Error::MissingServerUrl);
    }

    let client = ApiClient::new(server_url, api_key)?;
    client.health().await?;
    info!("Server health check passed: {}", server_url);

    let config_json = generate_mcp_config(server_url, api_key).to_pretty_json()?;

    let outcome = match clipboard.set_text(&config_json) {
        Ok(()) => {
            info!("MCP config copied to clipboard");
            SetupOutcome::Copied
        }
        Err(e) => {
            warn!("Clipboard copy failed, handing config back: {}", e);
            SetupOutcome::ConfigReady { config_json }
        }
    };

    store.set_all(api_key, server_url);

    Ok(outcome)
}
