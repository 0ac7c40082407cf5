//! # gotodoc Docs
//!
//! OpenAPI 3.1 document accumulation for gotodoc.
//!
//! Every handler registration documents one operation through
//! [`OpenApiGenerator::add_operation`]: the path pattern is normalized, the
//! request record's parameters and body schema are attached, and the fixed
//! `400`/`500` responses are added next to the success response. Once all
//! routes are registered the document is rendered as YAML or JSON.
//!
//! ## Quick Start
//!
//! ```rust
//! use gotodoc_core::{FieldDescriptor, Schema, Shape};
//! use gotodoc_docs::{DocFormat, OpenApiGenerator};
//! use http::Method;
//!
//! let mut docs = OpenApiGenerator::new("Inventory", "1.0.0", "Inventory service");
//!
//! docs.add_operation(
//!     &Method::GET,
//!     "/items/{id}",
//!     &[FieldDescriptor::path("id", "id")],
//!     None,
//!     Shape::Json(Schema::string()),
//! )?;
//!
//! // Same method and path twice is rejected
//! assert!(docs
//!     .add_operation(&Method::GET, "/items/{id}/", &[], None, Shape::Empty)
//!     .is_err());
//!
//! let mut out = Vec::new();
//! docs.write_to(DocFormat::Yaml, &mut out)?;
//! # Ok::<(), gotodoc_docs::DocsError>(())
//! ```

mod error;
mod generator;
mod normalize;
mod openapi;

pub use error::{DocsError, DocsResult};
pub use generator::{DocFormat, OpenApiGenerator, UnknownDocFormat};
pub use normalize::{document_path, normalize_path, operation_id, path_parameters};
pub use openapi::{
    Info, MediaType, OpenApi, Operation, Parameter, ParameterIn, PathItem, RequestBody, Response,
    Server, OPENAPI_VERSION,
};
