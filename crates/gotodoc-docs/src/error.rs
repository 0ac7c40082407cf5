//! Error types for the documentation crate.
//!
//! Every error here is raised while operations are registered or while the
//! document is rendered, never while a request is served.

use thiserror::Error;

/// Errors that can occur while building or rendering the API document.
#[derive(Debug, Error)]
pub enum DocsError {
    /// An operation already exists for this method and normalized path.
    #[error("duplicate operation: {method} {path}")]
    DuplicateOperation {
        /// HTTP method of the operation.
        method: String,
        /// Normalized path pattern.
        path: String,
    },

    /// The path pattern cannot be documented.
    #[error("invalid path pattern '{path}': {reason}")]
    InvalidPath {
        /// The pattern as given at registration.
        path: String,
        /// Why the pattern was rejected.
        reason: String,
    },

    /// The method has no slot in an OpenAPI path item.
    #[error("unsupported HTTP method: {method}")]
    UnsupportedMethod {
        /// The rejected method.
        method: String,
    },

    /// Failed to serialize the document to JSON.
    #[error("failed to serialize API document as JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Failed to serialize the document to YAML.
    #[error("failed to serialize API document as YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Failed to write the rendered document.
    #[error("failed to write API document: {0}")]
    Io(#[from] std::io::Error),
}

impl DocsError {
    pub(crate) fn invalid_path(path: &str, reason: impl Into<String>) -> Self {
        Self::InvalidPath {
            path: path.to_string(),
            reason: reason.into(),
        }
    }

    /// Returns true for [`DocsError::DuplicateOperation`].
    #[must_use]
    pub fn is_duplicate(&self) -> bool {
        matches!(self, Self::DuplicateOperation { .. })
    }
}

/// Result type for documentation operations.
pub type DocsResult<T> = Result<T, DocsError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_error_conversion() {
        let err: DocsError = serde_json::from_str::<String>("invalid")
            .unwrap_err()
            .into();
        assert!(matches!(err, DocsError::Json(_)));
        assert!(err.to_string().contains("JSON"));
    }

    #[test]
    fn test_duplicate_operation_message() {
        let err = DocsError::DuplicateOperation {
            method: "GET".to_string(),
            path: "/items/{id}".to_string(),
        };
        assert!(err.is_duplicate());
        assert_eq!(err.to_string(), "duplicate operation: GET /items/{id}");
    }

    #[test]
    fn test_invalid_path_message() {
        let err = DocsError::invalid_path("/a/{", "unclosed parameter");
        assert!(!err.is_duplicate());
        assert!(err.to_string().contains("unclosed parameter"));
    }
}
