//! HTTP method-based routing.
//!
//! This module provides [`MethodRouter`] which maps HTTP methods to handlers
//! for a single path. Entries keep registration order, and the `Allow` header
//! value is recomputed on every insertion so that request-time `OPTIONS` and
//! `405` responses never walk the table.

use http::Method;
use smallvec::SmallVec;

use crate::RouterError;

/// Number of methods stored inline before spilling to the heap.
const INLINE_METHODS: usize = 4;

/// Maps HTTP methods to handlers for a single route.
///
/// # Example
///
/// ```rust
/// use gotodoc_router::MethodRouter;
/// use http::Method;
///
/// let mut router = MethodRouter::new();
/// router.insert(Method::GET, "listUsers").unwrap();
/// router.insert(Method::POST, "createUser").unwrap();
///
/// assert_eq!(router.get_handler(&Method::GET), Some(&"listUsers"));
/// assert_eq!(router.get_handler(&Method::POST), Some(&"createUser"));
/// assert_eq!(router.get_handler(&Method::DELETE), None);
/// assert_eq!(router.allow_header(), "OPTIONS, GET, POST");
/// ```
#[derive(Debug, Clone)]
pub struct MethodRouter<H> {
    /// (method, handler) pairs in registration order
    entries: SmallVec<[(Method, H); INLINE_METHODS]>,
    /// Precomputed `Allow` header value
    allow: String,
}

impl<H> Default for MethodRouter<H> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H> MethodRouter<H> {
    /// Creates a new empty method router.
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: SmallVec::new(),
            allow: Method::OPTIONS.as_str().to_string(),
        }
    }

    /// Registers a handler for a method.
    ///
    /// # Errors
    ///
    /// Returns [`RouterError::DuplicateMethod`] if the method already has a
    /// handler; the table is left unchanged.
    pub fn insert(&mut self, method: Method, handler: H) -> Result<(), RouterError> {
        if self.contains(&method) {
            return Err(RouterError::DuplicateMethod { method });
        }
        self.entries.push((method, handler));
        self.rebuild_allow();
        Ok(())
    }

    /// Returns the handler registered for `method`, if any.
    #[must_use]
    pub fn get_handler(&self, method: &Method) -> Option<&H> {
        self.entries
            .iter()
            .find(|(m, _)| m == method)
            .map(|(_, h)| h)
    }

    /// Returns true if the method has a handler.
    #[must_use]
    pub fn contains(&self, method: &Method) -> bool {
        self.entries.iter().any(|(m, _)| m == method)
    }

    /// Returns the `Allow` header value: `OPTIONS` followed by every
    /// registered method, each exactly once.
    #[must_use]
    pub fn allow_header(&self) -> &str {
        &self.allow
    }

    fn rebuild_allow(&mut self) {
        let mut allow = Method::OPTIONS.as_str().to_string();
        for (method, _) in &self.entries {
            if *method != Method::OPTIONS {
                allow.push_str(", ");
                allow.push_str(method.as_str());
            }
        }
        self.allow = allow;
    }
}
