//! Cookie model and header formatting.

use serde::{Deserialize, Serialize};

/// A browser cookie. Only the fields the sync workflow needs; the
/// DevTools payload carries more and the extras are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cookie {
    pub name: String,
    pub value: String,
    #[serde(default)]
    pub domain: String,
}

impl Cookie {
    pub fn new(name: &str, value: &str, domain: &str) -> Self {
        Self {
            name: name.to_string(),
            value: value.to_string(),
            domain: domain.to_string(),
        }
    }
}

/// Join cookies into a `Cookie:` header value, in jar order.
pub fn format_cookie_header(cookies: &[Cookie]) -> String {
    cookies
        .iter()
        .map(|c| format!("{}={}", c.name, c.value))
        .collect::<Vec<_>>()
        .join("; ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_cookie_header() {
        let cookies = vec![
            Cookie::new("a", "1", ".perplexity.ai"),
            Cookie::new("b", "2", ".perplexity.ai"),
        ];
        assert_eq!(format_cookie_header(&cookies), "a=1; b=2");
    }

    #[test]
    fn test_format_empty() {
        assert_eq!(format_cookie_header(&[]), "");
    }

    #[test]
    fn test_format_preserves_jar_order() {
        let cookies = vec![
            Cookie::new("z", "26", ""),
            Cookie::new("a", "1", ""),
            Cookie::new("m", "13", ""),
        ];
        assert_eq!(format_cookie_header(&cookies), "z=26; a=1; m=13");
    }

    #[test]
    fn test_cookie_deserializes_without_domain() {
        let c: Cookie = serde_json::from_str(r#"{"name":"sid","value":"x"}"#).unwrap();
        assert_eq!(c.name, "sid");
        assert!(c.domain.is_empty());
    }
}
