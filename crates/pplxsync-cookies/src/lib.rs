//! Browser cookie jar access.
//!
//! Cookies are read from a running Chrome instance over the DevTools
//! protocol and formatted into a `Cookie:` header value for the server.
//! The jar is behind a trait so workflows can be tested without a
//! browser.

pub mod cdp;
pub mod jar;
pub mod types;

pub use cdp::{CdpCookieJar, DEFAULT_CDP_URL};
pub use jar::{fetch_with_fallback, CookieJar, MemoryCookieJar};
pub use types::{format_cookie_header, Cookie};
