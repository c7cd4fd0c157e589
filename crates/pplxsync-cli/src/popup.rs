//! User-facing status lines for the command surface.
//!
//! Pure mapping from workflow outcomes to display text, kept free of
//! I/O so the wording can be pinned down in tests.

use pplxsync_client::{SetupOutcome, SyncReport};
use pplxsync_core::{validate_api_key, Error, Target};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Info,
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusLine {
    pub kind: StatusKind,
    pub text: String,
}

impl StatusLine {
    fn info(text: impl Into<String>) -> Self {
        Self {
            kind: StatusKind::Info,
            text: text.into(),
        }
    }

    fn success(text: impl Into<String>) -> Self {
        Self {
            kind: StatusKind::Success,
            text: text.into(),
        }
    }

    fn error(text: impl Into<String>) -> Self {
        Self {
            kind: StatusKind::Error,
            text: text.into(),
        }
    }
}

/// The two setup inputs, trimmed on construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PopupForm {
    pub api_key: String,
    pub server_url: String,
}

impl PopupForm {
    pub fn new(api_key: &str, server_url: &str) -> Self {
        Self {
            api_key: api_key.trim().to_string(),
            server_url: server_url.trim().to_string(),
        }
    }

    /// First validation failure, if any. The key is checked before the
    /// URL, matching the order the inputs are filled in.
    pub fn validate(&self) -> Option<StatusLine> {
        if !validate_api_key(&self.api_key) {
            return Some(StatusLine::error(
                "Invalid API key format. Must start with \"pplx_\"",
            ));
        }
        if self.server_url.is_empty() {
            return Some(StatusLine::error("Please enter server URL"));
        }
        None
    }
}

/// Host shown in the "please login" hint.
fn login_host(target: Target) -> &'static str {
    target
        .login_url()
        .trim_start_matches("https://")
        .trim_start_matches("http://")
}

pub fn sync_status(target: Target, result: &Result<SyncReport, Error>) -> StatusLine {
    match result {
        Ok(_) => StatusLine::success(format!("{} cookie synced successfully!", target.label())),
        Err(Error::InvalidApiKey) => StatusLine::error("Invalid API key format"),
        Err(Error::NoCookiesFound(t)) => StatusLine::error(format!(
            "No {} cookies found. Please login to {} first.",
            t.label(),
            login_host(*t)
        )),
        Err(e @ (Error::Server { .. } | Error::Network(_))) => {
            StatusLine::error(format!("Failed to sync cookie: {}", e))
        }
        Err(e) => StatusLine::error(format!("Error: {}", e)),
    }
}

pub fn setup_status(result: &Result<SetupOutcome, Error>) -> StatusLine {
    match result {
        Ok(SetupOutcome::Copied) => StatusLine::success(
            "Success! Configuration copied to clipboard. Open instructions to complete setup.",
        ),
        Ok(SetupOutcome::ConfigReady { .. }) => {
            StatusLine::info("Configuration ready! Please copy manually:")
        }
        Err(e @ Error::ConnectionFailed(_)) => StatusLine::error(e.to_string()),
        Err(Error::InvalidApiKey) => StatusLine::error(
            "Invalid API key format. Must start with \"pplx_\"",
        ),
        Err(Error::MissingServerUrl) => StatusLine::error("Please enter server URL"),
        Err(e) => StatusLine::error(format!("Error: {}", e)),
    }
}
