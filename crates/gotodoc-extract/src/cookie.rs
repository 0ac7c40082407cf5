//! Cookie parsing.

use std::collections::HashMap;

use http::{header, HeaderMap};

/// Cookies sent with a request.
///
/// Parses every `Cookie` header. When a name repeats, the first occurrence
/// wins. Header values that are not valid visible ASCII are skipped.
///
/// # Example
///
/// ```rust
/// use gotodoc_extract::{Cookies, ExtractionContext};
///
/// let ctx = ExtractionContext::builder()
///     .header("cookie", "session=abc123; theme=dark")
///     .build();
///
/// let cookies = Cookies::from_headers(ctx.headers());
/// assert_eq!(cookies.get("session"), Some("abc123"));
/// assert_eq!(cookies.get("theme"), Some("dark"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct Cookies {
    cookies: HashMap<String, String>,
}

impl Cookies {
    /// Create an empty Cookies instance.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses all `Cookie` headers of a header map.
    #[must_use]
    pub fn from_headers(headers: &HeaderMap) -> Self {
        let mut cookies = Self::new();
        for value in headers.get_all(header::COOKIE) {
            if let Ok(value) = value.to_str() {
                cookies.parse_into(value);
            }
        }
        cookies
    }

    fn parse_into(&mut self, header_value: &str) {
        for pair in header_value.split(';') {
            if let Some((name, value)) = pair.trim().split_once('=') {
                let name = name.trim();
                if name.is_empty() {
                    continue;
                }
                // Remove surrounding quotes if present
                let value = value.trim().trim_matches('"');
                self.cookies
                    .entry(name.to_string())
                    .or_insert_with(|| value.to_string());
            }
        }
    }

    /// Get a cookie value by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.cookies.get(name).map(String::as_str)
    }

    /// Check if a cookie exists.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.cookies.contains_key(name)
    }

    /// Get the number of cookies.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cookies.len()
    }

    /// Check if there are no cookies.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cookies.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::HeaderValue;

    #[test]
    fn test_no_cookie_header() {
        let cookies = Cookies::from_headers(&HeaderMap::new());
        assert!(cookies.is_empty());
    }

    #[test]
    fn test_parse_trims_and_unquotes() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::COOKIE,
            HeaderValue::from_static(" who = \"alice\" ;lang=en"),
        );

        let cookies = Cookies::from_headers(&headers);
        assert_eq!(cookies.get("who"), Some("alice"));
        assert_eq!(cookies.get("lang"), Some("en"));
        assert_eq!(cookies.len(), 2);
    }

    #[test]
    fn test_multiple_headers_first_wins() {
        let mut headers = HeaderMap::new();
        headers.append(header::COOKIE, HeaderValue::from_static("who=alice"));
        headers.append(header::COOKIE, HeaderValue::from_static("who=bob; lang=fr"));

        let cookies = Cookies::from_headers(&headers);
        assert_eq!(cookies.get("who"), Some("alice"));
        assert!(cookies.contains("lang"));
    }

    #[test]
    fn test_malformed_pairs_are_skipped() {
        let mut headers = HeaderMap::new();
        headers.insert(header::COOKIE, HeaderValue::from_static("novalue; =x; ok=1"));

        let cookies = Cookies::from_headers(&headers);
        assert_eq!(cookies.len(), 1);
        assert_eq!(cookies.get("ok"), Some("1"));
    }

    #[test]
    fn test_empty_value_is_kept() {
        let mut headers = HeaderMap::new();
        headers.insert(header::COOKIE, HeaderValue::from_static("who="));

        let cookies = Cookies::from_headers(&headers);
        assert_eq!(cookies.get("who"), Some(""));
    }

    proptest::proptest! {
        #[test]
        fn test_every_pair_is_recovered(
            pairs in proptest::collection::btree_map("[a-z][a-z0-9_]{0,7}", "[A-Za-z0-9]{0,8}", 0..6)
        ) {
            let header_value = pairs
                .iter()
                .map(|(name, value)| format!("{name}={value}"))
                .collect::<Vec<_>>()
                .join("; ");

            let mut headers = HeaderMap::new();
            headers.insert(header::COOKIE, HeaderValue::from_str(&header_value).unwrap());

            let cookies = Cookies::from_headers(&headers);
            proptest::prop_assert_eq!(cookies.len(), pairs.len());
            for (name, value) in &pairs {
                proptest::prop_assert_eq!(cookies.get(name), Some(value.as_str()));
            }
        }
    }
}
