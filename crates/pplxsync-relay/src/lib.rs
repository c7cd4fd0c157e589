//! Request router between UI surfaces and the background worker.
//!
//! UI code never talks to the cookie jar or the network directly. It
//! sends a typed [`RelayRequest`] over a channel and awaits the typed
//! [`RelayResponse`] on a oneshot reply slot. The reply slot stays alive
//! until the worker resolves the request, so slow jar or network calls
//! cannot leave a caller hanging on a dropped channel.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{mpsc, oneshot};
use tracing::{debug, warn};

use pplxsync_core::{Error, Result};
use pplxsync_cookies::{fetch_with_fallback, Cookie, CookieJar};

/// Where "open instructions" sends the user.
pub const INSTRUCTIONS_URL: &str = "https://github.com/perplexity-api-free/mcp-client#setup";

const VALIDATE_TIMEOUT: Duration = Duration::from_secs(10);
const CHANNEL_CAPACITY: usize = 32;

// ---------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RelayRequest {
    /// Read cookies for a domain, with the dotted-domain fallback.
    GetCookies { domain: String },
    /// Probe a server's health endpoint without credentials.
    ValidateServer { server_url: String },
    /// Open the setup instructions page in the default browser.
    OpenInstructions,
}

#[derive(Debug, Clone, PartialEq)]
pub enum RelayResponse {
    Cookies(Vec<Cookie>),
    ServerValid(bool),
    Opened,
}

/// Map a loosely typed action message onto a [`RelayRequest`].
///
/// Messages carry an `action` field naming the operation and flat
/// sibling fields for its arguments. Anything unrecognized, including a
/// known action with missing arguments, yields `None`.
pub fn parse_action(value: &serde_json::Value) -> Option<RelayRequest> {
    match value.get("action")?.as_str()? {
        "getCookies" => {
            let domain = value.get("domain")?.as_str()?;
            Some(RelayRequest::GetCookies {
                domain: domain.to_string(),
            })
        }
        "validateServer" => {
            let server_url = value.get("serverUrl")?.as_str()?;
            Some(RelayRequest::ValidateServer {
                server_url: server_url.to_string(),
            })
        }
        "openInstructions" => Some(RelayRequest::OpenInstructions),
        _ => None,
    }
}

// ---------------------------------------------------------------
// Relay
// ---------------------------------------------------------------

struct Envelope {
    request: RelayRequest,
    reply: oneshot::Sender<Result<RelayResponse>>,
}

/// Handle for submitting requests to the background worker.
///
/// Cloneable; all clones feed the same worker task. The worker exits
/// when every handle is dropped.
#[derive(Clone)]
pub struct Relay {
    tx: mpsc::Sender<Envelope>,
}

impl Relay {
    /// Spawn the worker task and return a handle to it.
    pub fn spawn(jar: Arc<dyn CookieJar>) -> Self {
        let (tx, rx) = mpsc::channel(CHANNEL_CAPACITY);
        tokio::spawn(worker(jar, rx));
        Self { tx }
    }

    /// Submit a request and wait for its response.
    pub async fn request(&self, request: RelayRequest) -> Result<RelayResponse> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.tx
            .send(Envelope {
                request,
                reply: reply_tx,
            })
            .await
            .map_err(|_| Error::Internal("Relay worker is gone".to_string()))?;
        reply_rx
            .await
            .map_err(|_| Error::Internal("Relay worker dropped the reply".to_string()))?
    }
}

async fn worker(jar: Arc<dyn CookieJar>, mut rx: mpsc::Receiver<Envelope>) {
    let http = reqwest::Client::builder()
        .timeout(VALIDATE_TIMEOUT)
        .build()
        .ok();

    while let Some(envelope) = rx.recv().await {
        debug!("Relay request: {:?}", envelope.request);
        let result = handle(&jar, http.as_ref(), envelope.request).await;
        if envelope.reply.send(result).is_err() {
            warn!("Relay caller went away before the reply was ready");
        }
    }
}

async fn handle(
    jar: &Arc<dyn CookieJar>,
    http: Option<&reqwest::Client>,
    request: RelayRequest,
) -> Result<RelayResponse> {
    match request {
        RelayRequest::GetCookies { domain } => {
            let cookies = fetch_with_fallback(jar.as_ref(), &domain).await?;
            Ok(RelayResponse::Cookies(cookies))
        }
        RelayRequest::ValidateServer { server_url } => {
            Ok(RelayResponse::ServerValid(
                validate_server(http, &server_url).await,
            ))
        }
        RelayRequest::OpenInstructions => {
            webbrowser::open(INSTRUCTIONS_URL)
                .map_err(|e| Error::Internal(format!("Failed to open browser: {}", e)))?;
            Ok(RelayResponse::Opened)
        }
    }
}

/// Unauthenticated reachability probe. Any transport failure or
/// non-success status reads as "not valid" rather than an error.
async fn validate_server(http: Option<&reqwest::Client>, server_url: &str) -> bool {
    let Some(client) = http else {
        return false;
    };
    let url = format!("{}/health", server_url.trim_end_matches('/'));
    match client.get(&url).send().await {
        Ok(resp) => resp.status().is_success(),
        Err(e) => {
            debug!("Server validation failed for {}: {}", server_url, e);
            false
        }
    }
}
