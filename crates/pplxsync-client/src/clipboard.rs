//! System clipboard seam.

use pplxsync_core::{Error, Result};

/// Clipboard writer. Behind a trait so the setup workflow can be tested
/// without a display server.
pub trait Clipboard: Send + Sync {
    fn set_text(&self, text: &str) -> Result<()>;
}

/// Clipboard backed by the host windowing system.
pub struct SystemClipboard;

impl Clipboard for SystemClipboard {
    fn set_text(&self, text: &str) -> Result<()> {
        let mut clipboard = arboard::Clipboard::new()
            .map_err(|e| Error::Clipboard(format!("Clipboard unavailable: {}", e)))?;
        clipboard
            .set_text(text.to_string())
            .map_err(|e| Error::Clipboard(format!("Failed to copy: {}", e)))
    }
}
