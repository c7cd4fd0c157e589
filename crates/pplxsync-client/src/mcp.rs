//! MCP configuration snippet — the JSON block users paste into their
//! MCP client's config file.

use serde::{Deserialize, Serialize};

use pplxsync_core::Result;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct McpConfig {
    #[serde(rename = "mcpServers")]
    pub mcp_servers: McpServers,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct McpServers {
    #[serde(rename = "perplexity-free")]
    pub perplexity_free: McpServerEntry,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct McpServerEntry {
    pub command: String,
    pub args: Vec<String>,
    pub env: McpEnv,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct McpEnv {
    #[serde(rename = "PERPLEXITY_API_KEY")]
    pub api_key: String,
    #[serde(rename = "PERPLEXITY_API_BASE_URL")]
    pub base_url: String,
}

/// Build the MCP config block for a server URL and API key.
/// Pure function of its inputs.
pub fn generate_mcp_config(server_url: &str, api_key: &str) -> McpConfig {
    McpConfig {
        mcp_servers: McpServers {
            perplexity_free: McpServerEntry {
                command: "npx".to_string(),
                args: vec![
                    "-y".to_string(),
                    "@perplexity-api-free/mcp-client".to_string(),
                ],
                env: McpEnv {
                    api_key: api_key.to_string(),
                    base_url: server_url.to_string(),
                },
            },
        },
    }
}

impl McpConfig {
    /// Serialize as indented JSON, ready for the clipboard.
    pub fn to_pretty_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
