//! HTTP client for the operator's API server.

use std::time::Duration;

use serde::Deserialize;
use serde_json::json;
use tracing::debug;

use pplxsync_core::{Error, Result, Target};

/// Hung calls previously blocked the UI indefinitely; cap every request.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Acknowledgment body from the save-cookie endpoints. Extra fields
/// (`requires_restart` etc.) are ignored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SaveCookieAck {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
}

/// Client for the server's health and save-cookie endpoints, carrying
/// bearer auth on every call.
pub struct ApiClient {
    http: reqwest::Client,
    server_url: String,
    api_key: String,
}

impl ApiClient {
    pub fn new(server_url: &str, api_key: &str) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| Error::Internal(format!("Failed to build HTTP client: {}", e)))?;
        Ok(Self {
            http,
            server_url: server_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.server_url, path)
    }

    /// `GET /health` with bearer auth. Any transport failure or non-2xx
    /// status is a connection failure.
    pub async fn health(&self) -> Result<()> {
        let url = self.url("/health");
        debug!("Health check: {}", url);

        let response = self
            .http
            .get(&url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .send()
            .await
            .map_err(|e| Error::ConnectionFailed(e.to_string()))?;

        if response.status().is_success() {
            Ok(())
        } else {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            Err(Error::ConnectionFailed(format!(
                "Server returned {}: {}",
                status, body
            )))
        }
    }

    /// POST a formatted cookie header to the target's save endpoint.
    pub async fn save_cookie(&self, target: Target, cookie_header: &str) -> Result<SaveCookieAck> {
        let url = self.url(target.save_cookie_path());
        debug!("Saving {} cookie to {}", target, url);

        let response = self
            .http
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(&json!({ "cookie": cookie_header }))
            .send()
            .await
            .map_err(|e| Error::Network(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Server { status, body });
        }

        response
            .json::<SaveCookieAck>()
            .await
            .map_err(|e| Error::Network(format!("Invalid acknowledgment: {}", e)))
    }
}
