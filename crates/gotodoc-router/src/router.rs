//! High-level router API.
//!
//! This module provides the main [`Router`] struct which is the primary
//! interface for building and matching path patterns.

use crate::node::Node;
use crate::{RouteMatch, RouterError};

/// A radix tree router keyed by path pattern.
///
/// Each pattern stores one value of type `T`; the server stores a
/// [`MethodRouter`](crate::MethodRouter) of handlers per pattern.
/// Patterns are matched in O(k) time where k is the number of segments.
///
/// # Example
///
/// ```rust
/// use gotodoc_router::Router;
///
/// let mut router = Router::new();
/// router.insert("/items", "items").unwrap();
/// router.insert("/items/{id}", "item").unwrap();
///
/// let matched = router.match_path("/items/42").unwrap();
/// assert_eq!(*matched.value, "item");
/// assert_eq!(matched.params.get("id"), Some("42"));
/// ```
///
/// # Route Priority
///
/// When multiple patterns could match, the router uses the following priority:
///
/// 1. **Static segments** (e.g., `/users/me`)
/// 2. **Parameter segments** (e.g., `/users/{id}`)
/// 3. **Wildcard segments** (e.g., `/files/*path`)
///
/// This means `/users/me` will match before `/users/{id}` for the path `/users/me`.
#[derive(Debug, Clone)]
pub struct Router<T> {
    /// Root node of the radix tree
    root: Node<T>,
    /// Number of distinct patterns registered
    route_count: usize,
}

impl<T> Default for Router<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Router<T> {
    /// Creates a new empty router.
    #[must_use]
    pub fn new() -> Self {
        Self {
            root: Node::root(),
            route_count: 0,
        }
    }

    /// Inserts a pattern into the router.
    ///
    /// Returns the value previously stored for the same pattern.
    ///
    /// # Errors
    ///
    /// Returns a [`RouterError`] if the pattern is malformed or conflicts with
    /// an already registered pattern.
    pub fn insert(&mut self, path: &str, value: T) -> Result<Option<T>, RouterError> {
        let previous = self.root.insert(path, value)?;
        if previous.is_none() {
            self.route_count += 1;
        }
        Ok(previous)
    }

    /// Matches a concrete request path against the registered patterns.
    #[must_use]
    pub fn match_path(&self, path: &str) -> Option<RouteMatch<'_, T>> {
        let (value, params) = self.root.match_path(path)?;
        Some(RouteMatch::new(value, params))
    }

    /// Returns the number of patterns registered.
    #[must_use]
    pub fn len(&self) -> usize {
        self.route_count
    }

    /// Returns true if no patterns are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.route_count == 0
    }
}
