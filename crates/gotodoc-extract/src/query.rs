//! Query-string parsing.

/// Decoded query-string parameters in request order.
///
/// Keys and values are percent-decoded and `+` is read as a space.
///
/// # Example
///
/// ```rust
/// use gotodoc_extract::QueryParams;
///
/// let query = QueryParams::parse("search=desk+lamp&search=chair");
/// assert_eq!(query.get("search"), Some("desk lamp"));
/// assert_eq!(query.get("limit"), None);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    pairs: Vec<(String, String)>,
}

impl QueryParams {
    /// Parses a raw query string. Undecodable input yields no parameters.
    #[must_use]
    pub fn parse(query: &str) -> Self {
        Self {
            pairs: serde_urlencoded::from_str(query).unwrap_or_default(),
        }
    }

    /// Returns the first value for `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }
}
