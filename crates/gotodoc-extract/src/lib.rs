//! # gotodoc Extract
//!
//! Request binding and response encoding for gotodoc handlers.
//!
//! A request is turned into a typed [`RequestRecord`](gotodoc_core::RequestRecord)
//! in two steps, then the handler result is turned back into an HTTP response:
//!
//! | Step | Function | Failure |
//! |------|----------|---------|
//! | Parameter binding | [`bind`] | `400` missing parameter / unsupported field |
//! | JSON body merge | [`decode_body`] | `400` bad body, `413` too large |
//! | Response encoding | [`encode_response`] | handler error → `500`, empty body |
//!
//! [`extract_record`] runs both binding steps on a fresh record.
//!
//! ## Example
//!
//! ```rust
//! use gotodoc_core::{FieldDescriptor, RequestRecord};
//! use gotodoc_extract::{extract_record, ExtractionContext};
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Default, Serialize, Deserialize)]
//! struct GetItem {
//!     id: String,
//!     search: String,
//! }
//!
//! impl RequestRecord for GetItem {
//!     const FIELDS: &'static [FieldDescriptor] = &[
//!         FieldDescriptor::path("id", "id"),
//!         FieldDescriptor::query("search", "search").optional(),
//!     ];
//!
//!     fn field_mut(&mut self, field: &str) -> Option<&mut String> {
//!         match field {
//!             "id" => Some(&mut self.id),
//!             "search" => Some(&mut self.search),
//!             _ => None,
//!         }
//!     }
//! }
//!
//! let ctx = ExtractionContext::builder()
//!     .uri(http::Uri::from_static("/items/42"))
//!     .path_param("id", "42")
//!     .build();
//!
//! let record: GetItem = extract_record(&ctx, 1024).unwrap();
//! assert_eq!(record.id, "42");
//! assert_eq!(record.search, "");
//! ```

#![doc(html_root_url = "https://docs.rs/gotodoc-extract/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod binder;
mod body;
mod context;
mod cookie;
mod error;
mod query;
pub mod response;

pub use binder::{bind, extract_record};
pub use body::{decode_body, merge_json, DEFAULT_MAX_BODY_SIZE};
pub use context::{ExtractionContext, ExtractionContextBuilder};
pub use cookie::Cookies;
pub use error::{ExtractionError, ExtractionErrorKind, ExtractionSource};
pub use query::QueryParams;
pub use response::{encode_response, extraction_error_response};

// Re-export useful types from dependencies
pub use gotodoc_router::Params;
