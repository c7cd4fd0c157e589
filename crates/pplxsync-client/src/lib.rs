//! Server API client and the two user-facing workflows: cookie sync
//! and MCP server setup.

pub mod api;
pub mod clipboard;
pub mod mcp;
pub mod setup;
pub mod sync;

pub use api::{ApiClient, SaveCookieAck};
pub use clipboard::{Clipboard, SystemClipboard};
pub use mcp::{generate_mcp_config, McpConfig};
pub use setup::{setup, SetupOutcome};
pub use sync::{sync_cookies, SyncReport};
