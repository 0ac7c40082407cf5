//! Registration and server errors.

use gotodoc_docs::DocsError;
use gotodoc_router::RouterError;
use thiserror::Error;

/// Errors returned by handler registration.
///
/// All of them are fatal to startup: a service must not begin serving with a
/// partially registered route table.
#[derive(Debug, Error)]
pub enum RegistrationError {
    /// The operation could not be documented: duplicate, invalid path or
    /// unsupported method.
    #[error(transparent)]
    Docs(#[from] DocsError),

    /// The pattern conflicts with an already registered pattern.
    #[error(transparent)]
    Route(#[from] RouterError),

    /// The registry was frozen by a previous serve.
    #[error("registration closed: cannot register {method} {path} after serving has started")]
    RegistrationClosed {
        /// Method of the rejected registration.
        method: String,
        /// Path of the rejected registration.
        path: String,
    },
}

impl RegistrationError {
    /// Returns true if the error is a duplicate (method, path) registration.
    #[must_use]
    pub fn is_duplicate(&self) -> bool {
        matches!(self, Self::Docs(err) if err.is_duplicate())
    }
}

/// Errors returned while installing routes or running the HTTP server.
#[derive(Debug, Error)]
pub enum ServerError {
    /// A route could not be installed on the route table.
    #[error("failed to install route: {0}")]
    Route(#[from] RouterError),

    /// The API document could not be rendered or written.
    #[error(transparent)]
    Docs(#[from] DocsError),

    /// Failed to bind to the configured address.
    #[error("bind error: {0}")]
    Bind(String),

    /// I/O error during server operation.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
