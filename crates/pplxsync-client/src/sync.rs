//! Cookie sync workflow — jar to server, one target at a time.

use serde::Serialize;
use tracing::info;

use pplxsync_core::{mask_key, validate_api_key, Error, Result, SettingsStore, Target};
use pplxsync_cookies::{fetch_with_fallback, format_cookie_header, CookieJar};

use crate::api::ApiClient;

/// Outcome of a successful sync.
#[derive(Debug, Clone, Serialize)]
pub struct SyncReport {
    pub target: Target,
    #[serde(rename = "cookiesSent")]
    pub cookies_sent: usize,
    #[serde(rename = "syncedAt")]
    pub synced_at: String,
}

/// Read cookies for a target from the jar and POST them to the server.
///
/// Validation runs before any I/O: a malformed key or missing server URL
/// fails without touching the jar or the network. An empty jar result
/// (after the dotted-domain fallback) fails without any outbound call.
pub async fn sync_cookies(
    store: &SettingsStore,
    jar: &dyn CookieJar,
    target: Target,
) -> Result<SyncReport> {
    let settings = store.get();
    if !validate_api_key(&settings.api_key) {
        return Err(Error::InvalidApiKey);
    }
    if settings.server_url.is_empty() {
        return Err(Error::MissingServerUrl);
    }

    info!(
        "Syncing {} cookies (key: {}, server: {})",
        target,
        mask_key(&settings.api_key),
        settings.server_url
    );

    let cookies = fetch_with_fallback(jar, target.cookie_domain()).await?;
    if cookies.is_empty() {
        return Err(Error::NoCookiesFound(target));
    }

    let cookie_header = format_cookie_header(&cookies);
    let client = ApiClient::new(&settings.server_url, &settings.api_key)?;
    let ack = client.save_cookie(target, &cookie_header).await?;

    let synced_at = chrono::Utc::now().to_rfc3339();
    store.record_sync(target, &synced_at);

    info!(
        "{} cookie synced: {} cookies, ack: {}",
        target,
        cookies.len(),
        ack.message.as_deref().unwrap_or("ok")
    );

    Ok(SyncReport {
        target,
        cookies_sent: cookies.len(),
        synced_at,
    })
}
