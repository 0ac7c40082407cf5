//! Extraction error types.
//!
//! Every binding or decoding failure becomes an [`ExtractionError`] that
//! knows its source, the offending field and the HTTP status it maps to.

use std::fmt;

use gotodoc_core::FieldSource;
use http::StatusCode;
use thiserror::Error;

/// Source of extraction (where data was being extracted from).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtractionSource {
    /// Path parameters (e.g., `/items/{id}`)
    Path,
    /// Query string parameters
    Query,
    /// Cookies from the `Cookie` header
    Cookie,
    /// HTTP headers
    Header,
    /// JSON request body
    Body,
}

impl fmt::Display for ExtractionSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Path => write!(f, "path"),
            Self::Query => write!(f, "query"),
            Self::Cookie => write!(f, "cookie"),
            Self::Header => write!(f, "header"),
            Self::Body => write!(f, "body"),
        }
    }
}

impl From<FieldSource> for ExtractionSource {
    fn from(source: FieldSource) -> Self {
        match source {
            FieldSource::Path => Self::Path,
            FieldSource::Query => Self::Query,
            FieldSource::Cookie => Self::Cookie,
            FieldSource::Header => Self::Header,
            FieldSource::Body => Self::Body,
        }
    }
}

/// What went wrong during extraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtractionErrorKind {
    /// A required value is absent or empty.
    MissingParameter,
    /// The annotated field cannot hold a bound string.
    UnsupportedFieldType,
    /// The JSON body is malformed or does not fit the record.
    BadRequestBody,
    /// The body exceeds the configured limit.
    PayloadTooLarge,
}

/// Error that occurs during extraction.
///
/// # Example
///
/// ```rust
/// use gotodoc_extract::{ExtractionError, ExtractionErrorKind, ExtractionSource};
/// use http::StatusCode;
///
/// let err = ExtractionError::missing(ExtractionSource::Path, "id");
/// assert_eq!(err.kind(), ExtractionErrorKind::MissingParameter);
/// assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
/// assert_eq!(err.to_string(), "missing required path parameter: id");
/// ```
#[derive(Debug, Error)]
#[error("{message}")]
pub struct ExtractionError {
    extraction_source: ExtractionSource,
    kind: ExtractionErrorKind,
    field: Option<String>,
    message: String,
}

impl ExtractionError {
    /// Creates an error for a missing field or parameter.
    #[must_use]
    pub fn missing(source: ExtractionSource, field: impl Into<String>) -> Self {
        let field = field.into();
        Self {
            extraction_source: source,
            kind: ExtractionErrorKind::MissingParameter,
            message: format!("missing required {source} parameter: {field}"),
            field: Some(field),
        }
    }

    /// Creates an error for a field that cannot receive a string value.
    #[must_use]
    pub fn unsupported_field_type(source: ExtractionSource, field: impl Into<String>) -> Self {
        let field = field.into();
        Self {
            extraction_source: source,
            kind: ExtractionErrorKind::UnsupportedFieldType,
            message: format!("field '{field}' bound from {source} must be a string"),
            field: Some(field),
        }
    }

    /// Creates an error for an undecodable body.
    #[must_use]
    pub fn bad_request_body(details: impl Into<String>) -> Self {
        let details = details.into();
        Self {
            extraction_source: ExtractionSource::Body,
            kind: ExtractionErrorKind::BadRequestBody,
            message: format!("invalid request body: {details}"),
            field: None,
        }
    }

    /// Creates an error for a payload that's too large.
    #[must_use]
    pub fn payload_too_large(max_size: usize, actual_size: usize) -> Self {
        Self {
            extraction_source: ExtractionSource::Body,
            kind: ExtractionErrorKind::PayloadTooLarge,
            message: format!(
                "payload too large: max {max_size} bytes, got {actual_size} bytes"
            ),
            field: None,
        }
    }

    /// Returns the error kind.
    #[must_use]
    pub fn kind(&self) -> ExtractionErrorKind {
        self.kind
    }

    /// Returns the extraction source.
    #[must_use]
    pub fn extraction_source(&self) -> ExtractionSource {
        self.extraction_source
    }

    /// Returns the field name if applicable.
    #[must_use]
    pub fn field(&self) -> Option<&str> {
        self.field.as_deref()
    }

    /// Returns the appropriate HTTP status code for this error.
    #[must_use]
    pub fn status_code(&self) -> StatusCode {
        match self.kind {
            ExtractionErrorKind::MissingParameter
            | ExtractionErrorKind::UnsupportedFieldType
            | ExtractionErrorKind::BadRequestBody => StatusCode::BAD_REQUEST,
            ExtractionErrorKind::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
        }
    }

    /// Returns a stable error code for logs.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self.kind {
            ExtractionErrorKind::MissingParameter => "MISSING_PARAMETER",
            ExtractionErrorKind::UnsupportedFieldType => "UNSUPPORTED_FIELD_TYPE",
            ExtractionErrorKind::BadRequestBody => "BAD_REQUEST_BODY",
            ExtractionErrorKind::PayloadTooLarge => "PAYLOAD_TOO_LARGE",
        }
    }
}
