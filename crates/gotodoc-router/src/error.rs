//! Router error types.

use http::Method;
use thiserror::Error;

/// Errors raised while building a route table.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouterError {
    /// Two patterns bind a different variable name at the same position.
    #[error("conflicting path parameter in '{pattern}': '{{{existing}}}' already registered at this position, got '{{{new}}}'")]
    ConflictingParameter {
        /// The pattern being inserted.
        pattern: String,
        /// The parameter name already in the tree.
        existing: String,
        /// The parameter name of the new pattern.
        new: String,
    },

    /// A catch-all segment that is not the last segment of the pattern.
    #[error("wildcard must be the last segment in '{pattern}'")]
    InvalidWildcard {
        /// The offending pattern.
        pattern: String,
    },

    /// The method already has a handler in this method table.
    #[error("method {method} is already registered")]
    DuplicateMethod {
        /// The duplicated method.
        method: Method,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conflicting_parameter_message() {
        let err = RouterError::ConflictingParameter {
            pattern: "/items/{key}".to_string(),
            existing: "id".to_string(),
            new: "key".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("/items/{key}"));
        assert!(msg.contains("{id}"));
    }

    #[test]
    fn test_duplicate_method_message() {
        let err = RouterError::DuplicateMethod {
            method: Method::GET,
        };
        assert_eq!(err.to_string(), "method GET is already registered");
    }
}
