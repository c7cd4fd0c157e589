//! Sync targets — the third-party services whose cookies we forward.

use serde::{Deserialize, Serialize};

/// Services whose authentication cookies can be synced to the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Target {
    Perplexity,
    #[serde(rename = "chatgpt")]
    ChatGpt,
}

impl Target {
    pub fn all() -> &'static [Target] {
        &[Self::Perplexity, Self::ChatGpt]
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Perplexity => "perplexity",
            Self::ChatGpt => "chatgpt",
        }
    }

    /// Cookie-jar domain queried first; host-only cookies are picked up
    /// by the undotted fallback query.
    pub fn cookie_domain(&self) -> &'static str {
        match self {
            Self::Perplexity => ".perplexity.ai",
            Self::ChatGpt => ".openai.com",
        }
    }

    /// Server endpoint the cookie header is POSTed to.
    pub fn save_cookie_path(&self) -> &'static str {
        match self {
            Self::Perplexity => "/api/save-cookie",
            Self::ChatGpt => "/api/save-chatgpt-cookie",
        }
    }

    /// Where the user should log in when no cookies are found.
    pub fn login_url(&self) -> &'static str {
        match self {
            Self::Perplexity => "https://perplexity.ai",
            Self::ChatGpt => "https://chat.openai.com",
        }
    }

    /// Display name used in user-facing status messages.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Perplexity => "Perplexity",
            Self::ChatGpt => "ChatGPT",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "perplexity" => Some(Self::Perplexity),
            "chatgpt" => Some(Self::ChatGpt),
            _ => None,
        }
    }
}

impl std::fmt::Display for Target {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}
