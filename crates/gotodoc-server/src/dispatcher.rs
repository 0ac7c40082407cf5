//! Request dispatch.
//!
//! For a matched path the dispatcher picks, in order:
//!
//! 1. the endpoint registered for the request method (an explicitly
//!    registered `OPTIONS` handler included)
//! 2. for `OPTIONS`, `204 No Content` with the path's `Allow` list
//! 3. otherwise `405 Method Not Allowed`, also with `Allow`
//!
//! Paths the matcher does not know answer `404 Not Found`.

use std::sync::Arc;

use bytes::Bytes;
use gotodoc_core::RequestContext;
use gotodoc_extract::response::EmptyResponse;
use gotodoc_extract::ExtractionContext;
use gotodoc_router::{MethodRouter, Router};
use http::{Method, Request, Response, StatusCode};

use crate::endpoint::Endpoint;

/// An installed path: its normalized pattern and method table.
#[derive(Debug)]
pub struct Route {
    pattern: String,
    methods: MethodRouter<Endpoint>,
}

impl Route {
    /// Creates an installed route.
    #[must_use]
    pub fn new(pattern: impl Into<String>, methods: MethodRouter<Endpoint>) -> Self {
        Self {
            pattern: pattern.into(),
            methods,
        }
    }

    /// Returns the normalized pattern.
    #[must_use]
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// Returns the method table.
    #[must_use]
    pub fn methods(&self) -> &MethodRouter<Endpoint> {
        &self.methods
    }
}

/// The URL matcher routes are installed onto.
pub type RouteTable = Router<Route>;

/// Resolves requests against a frozen [`RouteTable`].
///
/// Cloning is cheap; all clones share the table.
#[derive(Debug, Clone)]
pub struct Dispatcher {
    table: Arc<RouteTable>,
}

enum Resolution {
    Endpoint(Endpoint, RequestContext, ExtractionContext),
    Allow(StatusCode, String),
    NotFound,
}

impl Dispatcher {
    /// Wraps an installed route table.
    #[must_use]
    pub fn new(table: RouteTable) -> Self {
        Self {
            table: Arc::new(table),
        }
    }

    /// Number of installed path patterns.
    #[must_use]
    pub fn route_count(&self) -> usize {
        self.table.len()
    }

    /// Dispatches a request with a fully collected body.
    pub async fn dispatch(&self, request: Request<Bytes>) -> Response<Bytes> {
        let (parts, body) = request.into_parts();
        let method = parts.method.clone();
        let path = parts.uri.path().to_string();

        let resolution = match self.table.match_path(&path) {
            None => Resolution::NotFound,
            Some(matched) => {
                let route = matched.value;
                if let Some(endpoint) = route.methods.get_handler(&parts.method) {
                    let ctx = RequestContext::new(parts.method.clone(), route.pattern.clone(), path.clone());
                    let extraction = ExtractionContext::new(
                        parts.method,
                        parts.uri,
                        parts.headers,
                        body,
                        matched.params,
                    );
                    Resolution::Endpoint(endpoint.clone(), ctx, extraction)
                } else if parts.method == Method::OPTIONS {
                    Resolution::Allow(StatusCode::NO_CONTENT, route.methods.allow_header().to_string())
                } else {
                    Resolution::Allow(
                        StatusCode::METHOD_NOT_ALLOWED,
                        route.methods.allow_header().to_string(),
                    )
                }
            }
        };

        match resolution {
            Resolution::Endpoint(endpoint, ctx, extraction) => {
                let request_id = ctx.request_id();
                let started = std::time::Instant::now();
                let response = endpoint.call(ctx, extraction).await;
                tracing::debug!(
                    request_id = %request_id,
                    http.method = %method,
                    http.path = %path,
                    http.status_code = response.status().as_u16(),
                    duration_ms = started.elapsed().as_secs_f64() * 1000.0,
                    "request completed"
                );
                response
            }
            Resolution::Allow(status, allow) => {
                tracing::debug!(
                    http.method = %method,
                    http.path = %path,
                    http.status_code = status.as_u16(),
                    allow = %allow,
                    "no endpoint for method"
                );
                EmptyResponse::new(status).with_allow(allow).into_response()
            }
            Resolution::NotFound => {
                tracing::debug!(
                    http.method = %method,
                    http.path = %path,
                    http.status_code = StatusCode::NOT_FOUND.as_u16(),
                    "no route matched"
                );
                EmptyResponse::new(StatusCode::NOT_FOUND).into_response()
            }
        }
    }
}
