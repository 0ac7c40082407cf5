//! Response encoding.
//!
//! | Builder | Content-Type | Used for |
//! |---------|--------------|----------|
//! | [`JsonResponse`] | `application/json` | non-empty handler results |
//! | [`TextResponse`] | `text/plain; charset=utf-8` | binding failures |
//! | [`NoContent`] | none | empty results, `OPTIONS` |
//! | [`EmptyResponse`] | none | `404`, `405`, `500` |
//!
//! None of the builders can fail: a JSON serialization error degrades to an
//! empty `500`.

use bytes::Bytes;
use gotodoc_core::{HandlerResult, ResponseRecord};
use http::header::{self, HeaderValue};
use http::{Response, StatusCode};
use serde::Serialize;

use crate::ExtractionError;

/// Encodes a handler result.
///
/// - `Err(_)` → `500` with an empty body; the error is not echoed
/// - `Ok(Some(value))` with a payload type → `200` with the JSON value
/// - `Ok(None)` or an empty response type → `204`
///
/// # Example
///
/// ```rust
/// use gotodoc_core::HandlerError;
/// use gotodoc_extract::encode_response;
/// use http::StatusCode;
///
/// let ok = encode_response::<String>(Ok(Some("lamp".to_string())));
/// assert_eq!(ok.status(), StatusCode::OK);
/// assert_eq!(ok.body().as_ref(), br#""lamp""#);
///
/// let empty = encode_response::<String>(Ok(None));
/// assert_eq!(empty.status(), StatusCode::NO_CONTENT);
///
/// let failed = encode_response::<()>(Err(HandlerError::msg("db down")));
/// assert_eq!(failed.status(), StatusCode::INTERNAL_SERVER_ERROR);
/// assert!(failed.body().is_empty());
/// ```
#[must_use]
pub fn encode_response<T: ResponseRecord>(result: HandlerResult<T>) -> Response<Bytes> {
    match result {
        Err(_) => EmptyResponse::new(StatusCode::INTERNAL_SERVER_ERROR).into_response(),
        Ok(Some(value)) if !T::IS_EMPTY => JsonResponse::new(value).into_response(),
        Ok(_) => NoContent.into_response(),
    }
}

/// Plain-text `4xx` response for an extraction failure.
#[must_use]
pub fn extraction_error_response(error: &ExtractionError) -> Response<Bytes> {
    TextResponse::new(error.to_string())
        .with_status(error.status_code())
        .into_response()
}

/// JSON response builder.
///
/// Creates an HTTP response with `Content-Type: application/json` and
/// the body serialized as JSON.
#[derive(Debug)]
pub struct JsonResponse<T> {
    data: T,
    status: StatusCode,
}

impl<T: Serialize> JsonResponse<T> {
    /// Creates a new JSON response with status 200 OK.
    #[must_use]
    pub fn new(data: T) -> Self {
        Self {
            data,
            status: StatusCode::OK,
        }
    }

    /// Sets a custom status code.
    #[must_use]
    pub fn with_status(mut self, status: StatusCode) -> Self {
        self.status = status;
        self
    }

    /// Returns the status code.
    #[must_use]
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// Builds the HTTP response.
    #[must_use]
    pub fn into_response(self) -> Response<Bytes> {
        match serde_json::to_vec(&self.data) {
            Ok(body) => {
                let mut response = Response::new(Bytes::from(body));
                *response.status_mut() = self.status;
                response.headers_mut().insert(
                    header::CONTENT_TYPE,
                    HeaderValue::from_static("application/json"),
                );
                response
            }
            Err(error) => {
                tracing::error!(error = %error, "failed to serialize response body");
                EmptyResponse::new(StatusCode::INTERNAL_SERVER_ERROR).into_response()
            }
        }
    }
}

/// Plain-text response builder.
#[derive(Debug, Clone)]
pub struct TextResponse {
    body: String,
    status: StatusCode,
}

impl TextResponse {
    /// Creates a new text response with status 200 OK.
    #[must_use]
    pub fn new(body: impl Into<String>) -> Self {
        Self {
            body: body.into(),
            status: StatusCode::OK,
        }
    }

    /// Sets a custom status code.
    #[must_use]
    pub fn with_status(mut self, status: StatusCode) -> Self {
        self.status = status;
        self
    }

    /// Builds the HTTP response.
    #[must_use]
    pub fn into_response(self) -> Response<Bytes> {
        let mut response = Response::new(Bytes::from(self.body));
        *response.status_mut() = self.status;
        let headers = response.headers_mut();
        headers.insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static("text/plain; charset=utf-8"),
        );
        headers.insert(
            header::X_CONTENT_TYPE_OPTIONS,
            HeaderValue::from_static("nosniff"),
        );
        response
    }
}

/// `204 No Content`.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoContent;

impl NoContent {
    /// Builds the HTTP response.
    #[must_use]
    pub fn into_response(self) -> Response<Bytes> {
        EmptyResponse::new(StatusCode::NO_CONTENT).into_response()
    }
}

/// A response with a status, optional `Allow` header and no body.
#[derive(Debug, Clone)]
pub struct EmptyResponse {
    status: StatusCode,
    allow: Option<String>,
}

impl EmptyResponse {
    /// Creates an empty response.
    #[must_use]
    pub fn new(status: StatusCode) -> Self {
        Self {
            status,
            allow: None,
        }
    }

    /// Sets the `Allow` header.
    #[must_use]
    pub fn with_allow(mut self, allow: impl Into<String>) -> Self {
        self.allow = Some(allow.into());
        self
    }

    /// Builds the HTTP response.
    #[must_use]
    pub fn into_response(self) -> Response<Bytes> {
        let mut response = Response::new(Bytes::new());
        *response.status_mut() = self.status;
        if let Some(allow) = self.allow {
            if let Ok(value) = HeaderValue::from_str(&allow) {
                response.headers_mut().insert(header::ALLOW, value);
            }
        }
        response
    }
}
