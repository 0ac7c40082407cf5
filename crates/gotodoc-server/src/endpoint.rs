//! Type-erased endpoints.
//!
//! An [`Endpoint`] wraps a typed handler `async fn(RequestContext, Req) ->
//! HandlerResult<Res>` together with the binding and encoding steps around
//! it, so the dispatcher can store endpoints for different record types in
//! one table.
//!
//! ```text
//! ExtractionContext ─► extract_record::<Req> ─► handler ─► encode_response::<Res>
//!                          │ error                 │ error
//!                          ▼                       ▼
//!                      400 / 413 text           500 empty
//! ```

use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use bytes::Bytes;
use gotodoc_core::{HandlerResult, RequestContext, RequestRecord, ResponseRecord};
use gotodoc_extract::{encode_response, extract_record, extraction_error_response, ExtractionContext};
use http::Response;

/// Boxed future produced by an endpoint.
pub type BoxedResponse = Pin<Box<dyn Future<Output = Response<Bytes>> + Send>>;

type ErasedFn = dyn Fn(RequestContext, ExtractionContext) -> BoxedResponse + Send + Sync;

/// A cloneable, type-erased request handler.
#[derive(Clone)]
pub struct Endpoint {
    inner: Arc<ErasedFn>,
}

impl Endpoint {
    /// Wraps a typed handler.
    ///
    /// The request record is bound from the extraction context with a body
    /// limit of `max_body_bytes`. Binding failures answer with a plain-text
    /// `4xx` and never reach the handler. Handler errors are logged here and
    /// answered with an empty `500`.
    pub fn new<Req, Res, F, Fut>(handler: F, max_body_bytes: usize) -> Self
    where
        Req: RequestRecord + Send + 'static,
        Res: ResponseRecord + 'static,
        F: Fn(RequestContext, Req) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = HandlerResult<Res>> + Send + 'static,
    {
        let handler = Arc::new(handler);
        let inner = move |ctx: RequestContext, extraction: ExtractionContext| -> BoxedResponse {
            let handler = Arc::clone(&handler);
            Box::pin(async move {
                let request = match extract_record::<Req>(&extraction, max_body_bytes) {
                    Ok(request) => request,
                    Err(err) => {
                        tracing::debug!(
                            request_id = %ctx.request_id(),
                            http.method = %ctx.method(),
                            http.path = %ctx.path(),
                            error.code = err.error_code(),
                            error = %err,
                            "request binding failed"
                        );
                        return extraction_error_response(&err);
                    }
                };

                let request_id = ctx.request_id();
                let route = ctx.route().to_string();
                let result = handler(ctx, request).await;
                if let Err(err) = &result {
                    tracing::error!(
                        request_id = %request_id,
                        http.route = %route,
                        error = %err,
                        "handler failed"
                    );
                }
                encode_response::<Res>(result)
            })
        };

        Self {
            inner: Arc::new(inner),
        }
    }

    /// Invokes the endpoint.
    pub fn call(&self, ctx: RequestContext, extraction: ExtractionContext) -> BoxedResponse {
        (self.inner)(ctx, extraction)
    }
}

impl fmt::Debug for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Endpoint").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gotodoc_core::{FieldDescriptor, HandlerError};
    use gotodoc_extract::DEFAULT_MAX_BODY_SIZE;
    use http::{StatusCode, Uri};
    use serde::{Deserialize, Serialize};

    #[derive(Debug, Default, Serialize, Deserialize)]
    struct Lookup {
        id: String,
    }

    impl RequestRecord for Lookup {
        const FIELDS: &'static [FieldDescriptor] = &[FieldDescriptor::path("id", "id")];

        fn field_mut(&mut self, field: &str) -> Option<&mut String> {
            match field {
                "id" => Some(&mut self.id),
                _ => None,
            }
        }
    }

    async fn echo(_ctx: RequestContext, req: Lookup) -> HandlerResult<String> {
        Ok(Some(req.id))
    }

    async fn fail(_ctx: RequestContext, _req: Lookup) -> HandlerResult<()> {
        Err(HandlerError::msg("store unavailable"))
    }

    fn extraction(id: Option<&str>) -> ExtractionContext {
        let builder = ExtractionContext::builder().uri(Uri::from_static("/items/7"));
        match id {
            Some(id) => builder.path_param("id", id).build(),
            None => builder.build(),
        }
    }

    #[tokio::test]
    async fn test_endpoint_success() {
        let endpoint = Endpoint::new(echo, DEFAULT_MAX_BODY_SIZE);
        let response = endpoint.call(RequestContext::mock(), extraction(Some("7"))).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.body().as_ref(), br#""7""#);
    }

    #[tokio::test]
    async fn test_endpoint_binding_failure() {
        let endpoint = Endpoint::new(echo, DEFAULT_MAX_BODY_SIZE);
        let response = endpoint.call(RequestContext::mock(), extraction(None)).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert!(!response.body().is_empty());
    }

    #[tokio::test]
    async fn test_endpoint_handler_error_hidden() {
        let endpoint = Endpoint::new(fail, DEFAULT_MAX_BODY_SIZE);
        let response = endpoint.call(RequestContext::mock(), extraction(Some("7"))).await;
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(response.body().is_empty());
    }

    #[test]
    fn test_endpoint_is_cloneable() {
        let endpoint = Endpoint::new(echo, 16);
        let clone = endpoint.clone();
        assert_eq!(format!("{clone:?}"), "Endpoint { .. }");
    }
}
