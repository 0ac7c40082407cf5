//! Radix tree URL-pattern matcher for gotodoc.
//!
//! This crate is the path-matching collaborator of the handler registration
//! layer. It maps normalized path patterns (`/items/{id}`) to an arbitrary
//! value and extracts the path variables of a concrete request path. The
//! per-path [`MethodRouter`] keeps the method → handler table and the
//! precomputed `Allow` list used for `OPTIONS` and `405` responses.
//!
//! # Features
//!
//! - **Radix Tree Matching**: O(k) path lookup vs O(n) linear scan
//! - **Path Parameters**: Extract named parameters from paths (`/users/{id}`)
//! - **Wildcards**: Catch-all routes (`/files/*path`)
//! - **Method Tables**: One handler per HTTP method, in registration order
//!
//! # Example
//!
//! ```rust
//! use gotodoc_router::{MethodRouter, Router};
//! use http::Method;
//!
//! let mut user = MethodRouter::new();
//! user.insert(Method::GET, "getUser").unwrap();
//!
//! let mut router = Router::new();
//! router.insert("/users/{id}", user).unwrap();
//!
//! let matched = router.match_path("/users/123").unwrap();
//! assert_eq!(matched.value.get_handler(&Method::GET), Some(&"getUser"));
//! assert_eq!(matched.params.get("id"), Some("123"));
//! assert_eq!(matched.value.allow_header(), "OPTIONS, GET");
//! ```
//!
//! # Architecture
//!
//! The router uses a radix tree where each node represents a path segment:
//!
//! ```text
//!                    (root)
//!                      │
//!              ┌───────┴───────┐
//!              │               │
//!            "users"        "files"
//!              │               │
//!        ┌─────┴─────┐        "*path"
//!        │           │
//!       (leaf)    "{id}"
//!   [GET,POST]      │
//!                 (leaf)
//!                  [GET]
//! ```

mod error;
mod method_router;
mod node;
mod params;
mod router;

pub use error::RouterError;
pub use method_router::MethodRouter;
pub use node::{Node, SegmentKind};
pub use params::Params;
pub use router::Router;

/// A matched route with its stored value and extracted parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteMatch<'a, T> {
    /// The value registered for the matched pattern
    pub value: &'a T,
    /// Extracted path parameters
    pub params: Params,
}

impl<'a, T> RouteMatch<'a, T> {
    /// Creates a new route match.
    #[must_use]
    pub fn new(value: &'a T, params: Params) -> Self {
        Self { value, params }
    }
}
