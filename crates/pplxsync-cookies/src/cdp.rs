//! Cookie retrieval from a running Chrome via the DevTools protocol.

use futures::{SinkExt, StreamExt};
use serde::Deserialize;
use serde_json::json;
use tokio_tungstenite::connect_async;
use tokio_tungstenite::tungstenite::Message;
use tracing::debug;

use pplxsync_core::{Error, Result};

use crate::jar::{domain_matches, CookieJar};
use crate::types::Cookie;

/// Default DevTools endpoint for a Chrome started with
/// `--remote-debugging-port=9222`.
pub const DEFAULT_CDP_URL: &str = "http://127.0.0.1:9222";

#[derive(Deserialize)]
struct VersionInfo {
    #[serde(rename = "webSocketDebuggerUrl")]
    web_socket_debugger_url: String,
}

/// Cookie jar backed by the browser's DevTools protocol.
///
/// Each query opens a fresh WebSocket session and issues
/// `Storage.getCookies`, so results always reflect the live jar.
pub struct CdpCookieJar {
    endpoint: String,
    http: reqwest::Client,
}

impl CdpCookieJar {
    pub fn new(endpoint: &str) -> Self {
        Self {
            endpoint: endpoint.trim_end_matches('/').to_string(),
            http: reqwest::Client::new(),
        }
    }

    /// Resolve the browser-level WebSocket debugger URL.
    async fn debugger_url(&self) -> Result<String> {
        let url = format!("{}/json/version", self.endpoint);
        let info: VersionInfo = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| Error::CookieSource(format!("Browser not reachable at {}: {}", url, e)))?
            .json()
            .await
            .map_err(|e| Error::CookieSource(format!("Bad DevTools version response: {}", e)))?;
        Ok(info.web_socket_debugger_url)
    }

    /// Fetch every cookie in the browser jar.
    async fn all_cookies(&self) -> Result<Vec<Cookie>> {
        let ws_url = self.debugger_url().await?;
        debug!("Connecting to DevTools at {}", ws_url);

        let (mut ws, _) = connect_async(&ws_url)
            .await
            .map_err(|e| Error::CookieSource(format!("DevTools connect failed: {}", e)))?;

        let request = json!({
            "id": 1,
            "method": "Storage.getCookies",
            "params": {},
        });
        ws.send(Message::Text(request.to_string()))
            .await
            .map_err(|e| Error::CookieSource(format!("DevTools send failed: {}", e)))?;

        // The session may interleave events; wait for our reply.
        while let Some(frame) = ws.next().await {
            let frame =
                frame.map_err(|e| Error::CookieSource(format!("DevTools read failed: {}", e)))?;
            let text = match frame {
                Message::Text(text) => text,
                _ => continue,
            };
            let value: serde_json::Value = match serde_json::from_str(&text) {
                Ok(v) => v,
                Err(_) => continue,
            };
            if value.get("id").and_then(|v| v.as_u64()) != Some(1) {
                continue;
            }
            if let Some(err) = value.get("error") {
                return Err(Error::CookieSource(format!("DevTools error: {}", err)));
            }
            let cookies: Vec<Cookie> = value
                .get("result")
                .and_then(|r| r.get("cookies"))
                .map(|c| serde_json::from_value(c.clone()))
                .transpose()?
                .unwrap_or_default();
            let _ = ws.close(None).await;
            return Ok(cookies);
        }

        Err(Error::CookieSource(
            "DevTools session closed before replying".to_string(),
        ))
    }
}

#[async_trait::async_trait]
impl CookieJar for CdpCookieJar {
    async fn cookies_for_domain(&self, domain: &str) -> Result<Vec<Cookie>> {
        let all = self.all_cookies().await?;
        let matched: Vec<Cookie> = all
            .into_iter()
            .filter(|c| domain_matches(&c.domain, domain))
            .collect();
        debug!("{} cookies matched domain {}", matched.len(), domain);
        Ok(matched)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_trailing_slash_stripped() {
        let jar = CdpCookieJar::new("http://127.0.0.1:9222/");
        assert_eq!(jar.endpoint, "http://127.0.0.1:9222");
    }

    #[tokio::test]
    async fn test_unreachable_browser_is_cookie_source_error() {
        // Port 1 is never a DevTools endpoint.
        let jar = CdpCookieJar::new("http://127.0.0.1:1");
        let err = jar.cookies_for_domain(".perplexity.ai").await.unwrap_err();
        assert!(matches!(err, Error::CookieSource(_)));
    }

    #[test]
    fn test_version_info_parse() {
        let info: VersionInfo = serde_json::from_str(
            r#"{"Browser":"Chrome/120.0","webSocketDebuggerUrl":"ws://127.0.0.1:9222/devtools/browser/abc"}"#,
        )
        .unwrap();
        assert!(info.web_socket_debugger_url.starts_with("ws://"));
    }
}
