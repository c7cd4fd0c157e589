//! Error types for pplxsync.

use thiserror::Error;

use crate::target::Target;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid API key format (must start with \"pplx_\")")]
    InvalidApiKey,

    #[error("Server URL is not configured")]
    MissingServerUrl,

    #[error("No {0} cookies found")]
    NoCookiesFound(Target),

    #[error("Server returned {status}: {body}")]
    Server { status: u16, body: String },

    #[error("Network error: {0}")]
    Network(String),

    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    #[error("Clipboard error: {0}")]
    Clipboard(String),

    #[error("Cookie source error: {0}")]
    CookieSource(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type Result<T> = std::result::Result<T, Error>;
