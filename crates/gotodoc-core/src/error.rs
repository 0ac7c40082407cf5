//! Handler error type.
//!
//! A [`HandlerError`] is opaque to the client: the dispatcher answers
//! `500 Internal Server Error` with an empty body and logs the error
//! server-side.

use thiserror::Error;

/// Result returned by application handlers.
///
/// `Ok(None)` and `Ok(Some(()))` both produce `204 No Content`.
pub type HandlerResult<T> = Result<Option<T>, HandlerError>;

/// Failure returned by an application handler.
///
/// # Example
///
/// ```
/// use gotodoc_core::HandlerError;
///
/// let err = HandlerError::msg("item store unavailable");
/// assert_eq!(err.to_string(), "item store unavailable");
///
/// let io = std::io::Error::new(std::io::ErrorKind::Other, "disk full");
/// let err = HandlerError::new(io);
/// assert_eq!(err.to_string(), "disk full");
/// ```
#[derive(Debug, Error)]
pub enum HandlerError {
    /// A plain message.
    #[error("{0}")]
    Message(String),

    /// Any other error.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl HandlerError {
    /// Creates an error from a message.
    pub fn msg(message: impl Into<String>) -> Self {
        Self::Message(message.into())
    }

    /// Wraps any standard error.
    pub fn new<E>(error: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Other(anyhow::Error::new(error))
    }
}
