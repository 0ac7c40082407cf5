//! Route registry.
//!
//! The registry maps each normalized path pattern to the methods registered
//! on it. It has a two-phase lifecycle: registrations accumulate until
//! [`Registry::freeze`] drains them for installation, after which every
//! further insert fails with [`RegistrationError::RegistrationClosed`].

use gotodoc_router::{MethodRouter, Router, RouterError};
use http::Method;
use indexmap::IndexMap;

use crate::endpoint::Endpoint;
use crate::error::RegistrationError;

/// Per-path method tables awaiting installation.
#[derive(Debug, Default)]
pub struct Registry {
    routes: IndexMap<String, MethodRouter<Endpoint>>,
    /// Shadow matcher used to reject conflicting patterns at registration.
    patterns: Router<()>,
    frozen: bool,
}

impl Registry {
    /// Creates an empty, open registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Checks that `pattern` can live beside the registered patterns.
    ///
    /// # Errors
    ///
    /// Returns the matcher's error for a malformed or conflicting pattern.
    pub fn check_pattern(&self, pattern: &str) -> Result<(), RouterError> {
        if self.routes.contains_key(pattern) {
            return Ok(());
        }
        let mut candidate = self.patterns.clone();
        candidate.insert(pattern, ()).map(|_| ())
    }

    /// Adds `endpoint` for `method` on a normalized `pattern`.
    ///
    /// # Errors
    ///
    /// - [`RegistrationError::RegistrationClosed`] once frozen
    /// - [`RegistrationError::Route`] if the pattern conflicts or the method
    ///   is already registered on it
    pub fn insert(
        &mut self,
        method: Method,
        pattern: &str,
        endpoint: Endpoint,
    ) -> Result<(), RegistrationError> {
        if self.frozen {
            return Err(RegistrationError::RegistrationClosed {
                method: method.to_string(),
                path: pattern.to_string(),
            });
        }

        if !self.routes.contains_key(pattern) {
            self.patterns.insert(pattern, ())?;
        }
        self.routes
            .entry(pattern.to_string())
            .or_default()
            .insert(method, endpoint)?;
        Ok(())
    }

    /// Returns true if `method` is registered on `pattern`.
    #[must_use]
    pub fn contains(&self, method: &Method, pattern: &str) -> bool {
        self.routes
            .get(pattern)
            .is_some_and(|methods| methods.contains(method))
    }

    /// Closes the registry and hands out everything registered so far, in
    /// first-registration order. A frozen registry drains to nothing.
    pub fn freeze(&mut self) -> Vec<(String, MethodRouter<Endpoint>)> {
        self.frozen = true;
        self.patterns = Router::new();
        std::mem::take(&mut self.routes).into_iter().collect()
    }

    /// Returns true once [`freeze`](Self::freeze) has been called.
    #[must_use]
    pub const fn is_frozen(&self) -> bool {
        self.frozen
    }

    /// Number of pending path patterns.
    #[must_use]
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    /// Returns true if nothing is pending.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}
