//! Request context types.
//!
//! The [`RequestContext`] is created by the dispatcher for every request and
//! handed to the application handler alongside its typed request record.

use std::time::{Duration, Instant};

use http::Method;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A unique identifier for each request, using UUID v7.
///
/// UUID v7 is time-ordered, which keeps log lines of one request sortable.
///
/// # Example
///
/// ```
/// use gotodoc_core::RequestId;
///
/// let id = RequestId::new();
/// assert_eq!(id.to_string().len(), 36);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RequestId(Uuid);

impl RequestId {
    /// Creates a new unique request ID using UUID v7.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    /// Creates a `RequestId` from an existing UUID.
    #[must_use]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the underlying UUID.
    #[must_use]
    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for RequestId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for RequestId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<Uuid> for RequestId {
    fn from(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

/// Per-request metadata passed to handlers.
///
/// # Example
///
/// ```
/// use gotodoc_core::RequestContext;
/// use http::Method;
///
/// let ctx = RequestContext::new(Method::GET, "/items/{id}", "/items/42");
/// assert_eq!(ctx.route(), "/items/{id}");
/// assert_eq!(ctx.path(), "/items/42");
/// ```
#[derive(Debug, Clone)]
pub struct RequestContext {
    request_id: RequestId,
    method: Method,
    /// Normalized pattern the request matched.
    route: String,
    /// Concrete request path.
    path: String,
    started_at: Instant,
}

impl RequestContext {
    /// Creates a context with a fresh request ID.
    #[must_use]
    pub fn new(method: Method, route: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            request_id: RequestId::new(),
            method,
            route: route.into(),
            path: path.into(),
            started_at: Instant::now(),
        }
    }

    /// Creates a context for tests.
    #[must_use]
    pub fn mock() -> Self {
        Self::new(Method::GET, "/", "/")
    }

    /// Replaces the request ID, e.g. with one propagated by a client.
    #[must_use]
    pub fn with_request_id(mut self, request_id: RequestId) -> Self {
        self.request_id = request_id;
        self
    }

    /// Returns the request ID.
    #[must_use]
    pub const fn request_id(&self) -> RequestId {
        self.request_id
    }

    /// Returns the request method.
    #[must_use]
    pub const fn method(&self) -> &Method {
        &self.method
    }

    /// Returns the matched path pattern.
    #[must_use]
    pub fn route(&self) -> &str {
        &self.route
    }

    /// Returns the concrete request path.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Returns the elapsed time since the request started.
    #[must_use]
    pub fn elapsed(&self) -> Duration {
        self.started_at.elapsed()
    }
}
