//! Cookie jar trait and the dotted-domain fallback query.

use async_trait::async_trait;
use tracing::debug;

use pplxsync_core::Result;

use crate::types::Cookie;

/// Read-only view of a browser cookie jar.
#[async_trait]
pub trait CookieJar: Send + Sync {
    /// All cookies matching a domain query.
    ///
    /// Matching is literal on the query string: a dotted query
    /// (`.perplexity.ai`) matches domain cookies at or under it but not
    /// host-only cookies (`perplexity.ai`). An undotted query matches
    /// both forms.
    async fn cookies_for_domain(&self, domain: &str) -> Result<Vec<Cookie>>;
}

/// Query a domain, retrying once without the leading dot if the first
/// query comes back empty. Host-only cookies are invisible to a dotted
/// query, so a fresh login can otherwise look like no session at all.
/// Both queries hit the live jar; nothing is cached.
pub async fn fetch_with_fallback(jar: &dyn CookieJar, domain: &str) -> Result<Vec<Cookie>> {
    let cookies = jar.cookies_for_domain(domain).await?;
    if cookies.is_empty() {
        if let Some(bare) = domain.strip_prefix('.') {
            debug!("No cookies for {}, retrying as {}", domain, bare);
            return jar.cookies_for_domain(bare).await;
        }
    }
    Ok(cookies)
}

/// Does `cookie_domain` fall under the domain `query`?
pub(crate) fn domain_matches(cookie_domain: &str, query: &str) -> bool {
    if query.starts_with('.') {
        cookie_domain == query || cookie_domain.ends_with(query)
    } else {
        let dotted = format!(".{}", query);
        cookie_domain == query || cookie_domain == dotted || cookie_domain.ends_with(&dotted)
    }
}

/// In-memory jar for tests and offline use.
#[derive(Default)]
pub struct MemoryCookieJar {
    cookies: parking_lot::RwLock<Vec<Cookie>>,
}

impl MemoryCookieJar {
    pub fn new(cookies: Vec<Cookie>) -> Self {
        Self {
            cookies: parking_lot::RwLock::new(cookies),
        }
    }

    pub fn insert(&self, cookie: Cookie) {
        self.cookies.write().push(cookie);
    }
}

#[async_trait]
impl CookieJar for MemoryCookieJar {
    async fn cookies_for_domain(&self, domain: &str) -> Result<Vec<Cookie>> {
        Ok(self
            .cookies
            .read()
            .iter()
            .filter(|c| domain_matches(&c.domain, domain))
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_domain_matches_dotted_query() {
        assert!(domain_matches(".perplexity.ai", ".perplexity.ai"));
        assert!(domain_matches(".www.perplexity.ai", ".perplexity.ai"));
        // Host-only cookie is not matched by the dotted query
        assert!(!domain_matches("perplexity.ai", ".perplexity.ai"));
        assert!(!domain_matches(".openai.com", ".perplexity.ai"));
    }

    #[test]
    fn test_domain_matches_bare_query() {
        assert!(domain_matches("perplexity.ai", "perplexity.ai"));
        assert!(domain_matches(".perplexity.ai", "perplexity.ai"));
        assert!(domain_matches("www.perplexity.ai", "perplexity.ai"));
        assert!(!domain_matches("notperplexity.ai", "perplexity.ai"));
    }

    #[tokio::test]
    async fn test_fallback_returns_first_query_when_non_empty() {
        let jar = MemoryCookieJar::new(vec![Cookie::new("sid", "1", ".perplexity.ai")]);
        let cookies = fetch_with_fallback(&jar, ".perplexity.ai").await.unwrap();
        assert_eq!(cookies.len(), 1);
        assert_eq!(cookies[0].name, "sid");
    }

    #[tokio::test]
    async fn test_fallback_strips_dot_for_host_only_cookies() {
        let jar = MemoryCookieJar::new(vec![Cookie::new("sid", "1", "perplexity.ai")]);
        let cookies = fetch_with_fallback(&jar, ".perplexity.ai").await.unwrap();
        assert_eq!(cookies.len(), 1);
    }

    #[tokio::test]
    async fn test_fallback_both_empty() {
        let jar = MemoryCookieJar::default();
        let cookies = fetch_with_fallback(&jar, ".perplexity.ai").await.unwrap();
        assert!(cookies.is_empty());
    }

    #[tokio::test]
    async fn test_no_fallback_for_bare_domain() {
        // A bare query that finds nothing is not retried.
        let jar = MemoryCookieJar::new(vec![Cookie::new("sid", "1", ".openai.com")]);
        let cookies = fetch_with_fallback(&jar, "perplexity.ai").await.unwrap();
        assert!(cookies.is_empty());
    }
}
