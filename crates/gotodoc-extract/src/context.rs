//! Extraction context providing access to request data.
//!
//! The [`ExtractionContext`] is everything the binder and body decoder may
//! read: method, URI, headers, the collected body and the path variables
//! produced by the URL matcher.

use bytes::Bytes;
use gotodoc_router::Params;
use http::{HeaderMap, HeaderValue, Method, Uri};

/// Context providing access to all parts of an HTTP request.
///
/// # Example
///
/// ```rust
/// use gotodoc_extract::ExtractionContext;
/// use gotodoc_router::Params;
/// use http::{HeaderMap, Method, Uri};
/// use bytes::Bytes;
///
/// let mut params = Params::new();
/// params.push("id", "123");
///
/// let ctx = ExtractionContext::new(
///     Method::GET,
///     Uri::from_static("/items/123"),
///     HeaderMap::new(),
///     Bytes::new(),
///     params,
/// );
///
/// assert_eq!(ctx.method(), &Method::GET);
/// assert_eq!(ctx.path_params().get("id"), Some("123"));
/// ```
#[derive(Debug, Clone)]
pub struct ExtractionContext {
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
    path_params: Params,
}

impl ExtractionContext {
    /// Creates a new extraction context.
    #[must_use]
    pub fn new(
        method: Method,
        uri: Uri,
        headers: HeaderMap,
        body: Bytes,
        path_params: Params,
    ) -> Self {
        Self {
            method,
            uri,
            headers,
            body,
            path_params,
        }
    }

    /// Starts a builder, mostly useful in tests.
    #[must_use]
    pub fn builder() -> ExtractionContextBuilder {
        ExtractionContextBuilder::new()
    }

    /// Returns the HTTP method.
    #[must_use]
    pub fn method(&self) -> &Method {
        &self.method
    }

    /// Returns the request URI.
    #[must_use]
    pub fn uri(&self) -> &Uri {
        &self.uri
    }

    /// Returns the path portion of the URI.
    #[must_use]
    pub fn path(&self) -> &str {
        self.uri.path()
    }

    /// Returns the query string if present.
    #[must_use]
    pub fn query_string(&self) -> Option<&str> {
        self.uri.query()
    }

    /// Returns the request headers.
    #[must_use]
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Returns the request body as bytes.
    #[must_use]
    pub fn body(&self) -> &Bytes {
        &self.body
    }

    /// Returns the extracted path parameters.
    #[must_use]
    pub fn path_params(&self) -> &Params {
        &self.path_params
    }

    /// Replaces the path parameters.
    pub fn set_path_params(&mut self, params: Params) {
        self.path_params = params;
    }

    /// Returns the first value of a header as a string.
    ///
    /// Values that are not visible ASCII are treated as absent.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    /// Returns the Content-Type header value.
    #[must_use]
    pub fn content_type(&self) -> Option<&str> {
        self.header("content-type")
    }
}

/// Builder for constructing an `ExtractionContext`.
///
/// Defaults to `GET /` with no headers, body or path parameters.
#[derive(Debug)]
pub struct ExtractionContextBuilder {
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
    path_params: Params,
}

impl Default for ExtractionContextBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ExtractionContextBuilder {
    /// Creates a new builder.
    #[must_use]
    pub fn new() -> Self {
        Self {
            method: Method::GET,
            uri: Uri::from_static("/"),
            headers: HeaderMap::new(),
            body: Bytes::new(),
            path_params: Params::new(),
        }
    }

    /// Sets the HTTP method.
    #[must_use]
    pub fn method(mut self, method: Method) -> Self {
        self.method = method;
        self
    }

    /// Sets the URI.
    #[must_use]
    pub fn uri(mut self, uri: Uri) -> Self {
        self.uri = uri;
        self
    }

    /// Adds a single header. Invalid values are ignored.
    #[must_use]
    pub fn header(mut self, name: &'static str, value: &str) -> Self {
        if let Ok(value) = HeaderValue::from_str(value) {
            self.headers.append(name, value);
        }
        self
    }

    /// Sets the body.
    #[must_use]
    pub fn body(mut self, body: impl Into<Bytes>) -> Self {
        self.body = body.into();
        self
    }

    /// Adds a single path parameter.
    #[must_use]
    pub fn path_param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.path_params.push(name, value);
        self
    }

    /// Builds the extraction context.
    #[must_use]
    pub fn build(self) -> ExtractionContext {
        ExtractionContext {
            method: self.method,
            uri: self.uri,
            headers: self.headers,
            body: self.body,
            path_params: self.path_params,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extraction_context_creation() {
        let mut params = Params::new();
        params.push("id", "42");

        let ctx = ExtractionContext::new(
            Method::GET,
            Uri::from_static("/items/42?search=lamp"),
            HeaderMap::new(),
            Bytes::new(),
            params,
        );

        assert_eq!(ctx.method(), &Method::GET);
        assert_eq!(ctx.path(), "/items/42");
        assert_eq!(ctx.query_string(), Some("search=lamp"));
        assert_eq!(ctx.path_params().get("id"), Some("42"));
    }

    #[test]
    fn test_builder_defaults() {
        let ctx = ExtractionContext::builder().build();
        assert_eq!(ctx.method(), &Method::GET);
        assert_eq!(ctx.path(), "/");
        assert!(ctx.body().is_empty());
        assert_eq!(ctx.path_params().len(), 0);
    }

    #[test]
    fn test_builder() {
        let ctx = ExtractionContext::builder()
            .method(Method::POST)
            .uri(Uri::from_static("/items"))
            .header("content-type", "application/json")
            .body(r#"{"name": "lamp"}"#)
            .path_param("version", "v1")
            .build();

        assert_eq!(ctx.method(), &Method::POST);
        assert_eq!(ctx.content_type(), Some("application/json"));
        assert!(!ctx.body().is_empty());
        assert_eq!(ctx.path_params().get("version"), Some("v1"));
    }

    #[test]
    fn test_header_lookup_is_case_insensitive() {
        let ctx = ExtractionContext::builder()
            .header("x-tenant", "acme")
            .build();

        assert_eq!(ctx.header("X-Tenant"), Some("acme"));
        assert_eq!(ctx.header("missing"), None);
    }

    #[test]
    fn test_set_path_params() {
        let mut ctx = ExtractionContext::builder().build();
        let mut params = Params::new();
        params.push("id", "7");
        ctx.set_path_params(params);
        assert_eq!(ctx.path_params().get("id"), Some("7"));
    }
}
