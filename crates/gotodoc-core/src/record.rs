//! Request and response record contracts.
//!
//! A request record is a plain struct whose fields each declare at most one
//! source (path, query, cookie, header or body) and whether the value is
//! required. The declaration is static: [`RequestRecord::FIELDS`] lists one
//! [`FieldDescriptor`] per annotated field, normally generated by
//! `#[derive(RequestRecord)]`.
//!
//! # Example
//!
//! ```
//! use gotodoc_core::{FieldDescriptor, RequestRecord};
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
//! assert!(!GetItem::has_body_fields());
//! ```

use std::fmt;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::schema::{ApiSchema, Schema};

/// Where a request-record field takes its value from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldSource {
    /// A variable of the matched path pattern.
    Path,
    /// A URL query-string parameter.
    Query,
    /// A cookie from the `Cookie` header.
    Cookie,
    /// A request header.
    Header,
    /// A member of the JSON request body.
    Body,
}

impl FieldSource {
    /// Returns the source name as used in annotations and in the API document.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Path => "path",
            Self::Query => "query",
            Self::Cookie => "cookie",
            Self::Header => "header",
            Self::Body => "body",
        }
    }
}

impl fmt::Display for FieldSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Static binding metadata for one annotated field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldDescriptor {
    /// Rust field name, passed to [`RequestRecord::field_mut`].
    pub field: &'static str,
    /// Lookup name in the source (path variable, query key, cookie, header).
    pub name: &'static str,
    /// Where the value comes from.
    pub source: FieldSource,
    /// Whether absence is an error.
    pub required: bool,
}

impl FieldDescriptor {
    /// Creates a descriptor.
    #[must_use]
    pub const fn new(
        field: &'static str,
        name: &'static str,
        source: FieldSource,
        required: bool,
    ) -> Self {
        Self {
            field,
            name,
            source,
            required,
        }
    }

    /// A required path-variable field.
    #[must_use]
    pub const fn path(field: &'static str, name: &'static str) -> Self {
        Self::new(field, name, FieldSource::Path, true)
    }

    /// A required query-parameter field.
    #[must_use]
    pub const fn query(field: &'static str, name: &'static str) -> Self {
        Self::new(field, name, FieldSource::Query, true)
    }

    /// A required cookie field.
    #[must_use]
    pub const fn cookie(field: &'static str, name: &'static str) -> Self {
        Self::new(field, name, FieldSource::Cookie, true)
    }

    /// A required header field.
    #[must_use]
    pub const fn header(field: &'static str, name: &'static str) -> Self {
        Self::new(field, name, FieldSource::Header, true)
    }

    /// A JSON body member.
    #[must_use]
    pub const fn body(field: &'static str) -> Self {
        Self::new(field, field, FieldSource::Body, true)
    }

    /// Marks the field as optional.
    #[must_use]
    pub const fn optional(mut self) -> Self {
        self.required = false;
        self
    }
}

/// A typed request record.
///
/// Implementations are created fresh per request with [`Default`], filled by
/// the parameter binder and, when [`has_body_fields`](Self::has_body_fields)
/// is true, merged with the decoded JSON body.
pub trait RequestRecord: Default + Serialize + DeserializeOwned + Send + 'static {
    /// One descriptor per annotated field.
    const FIELDS: &'static [FieldDescriptor];

    /// Returns the string slot for a path/query/cookie/header field.
    ///
    /// `None` means the field cannot hold a bound string value.
    fn field_mut(&mut self, field: &str) -> Option<&mut String>;

    /// Schema of the JSON body, if the record has body fields.
    fn body_schema() -> Option<Schema> {
        None
    }

    /// Returns true if at least one field is bound from the JSON body.
    fn has_body_fields() -> bool {
        Self::FIELDS
            .iter()
            .any(|field| field.source == FieldSource::Body)
    }
}

impl RequestRecord for () {
    const FIELDS: &'static [FieldDescriptor] = &[];

    fn field_mut(&mut self, _field: &str) -> Option<&mut String> {
        None
    }
}

/// Whether a response carries a payload.
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    /// No payload; answered with `204 No Content`.
    Empty,
    /// A JSON payload with the given schema.
    Json(Schema),
}

impl Shape {
    /// Returns true for [`Shape::Empty`].
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }
}

/// A typed response record.
///
/// Every [`ApiSchema`] type is a JSON response; `()` is the empty response.
pub trait ResponseRecord: Serialize + Send + 'static {
    /// True when the type never carries a payload.
    const IS_EMPTY: bool = false;

    /// The response shape recorded in the API document.
    fn shape() -> Shape;
}

impl ResponseRecord for () {
    const IS_EMPTY: bool = true;

    fn shape() -> Shape {
        Shape::Empty
    }
}

impl<T> ResponseRecord for T
where
    T: ApiSchema + Serialize + Send + 'static,
{
    fn shape() -> Shape {
        Shape::Json(T::schema())
    }
}
