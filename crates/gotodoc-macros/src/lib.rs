//! Derive macros for gotodoc.
//!
//! - `#[derive(RequestRecord)]` turns `#[param(...)]` field annotations into
//!   the static descriptors the parameter binder reads.
//! - `#[derive(ApiSchema)]` describes a type's JSON shape for the API
//!   document.
//!
//! # Example
//!
//! ```rust,ignore
//! use gotodoc::prelude::*;
//!
//! #[derive(Default, Serialize, Deserialize, RequestRecord)]
//! #[record(crate = "gotodoc::core")]
//! struct GetItem {
//!     #[param(path = "id")]
//!     id: String,
//!     #[param(query = "search", required = false)]
//!     search: String,
//! }
//! ```
//!
//! # Field annotations
//!
//! | Annotation | Meaning |
//! |------------|---------|
//! | `path = "id"` | path variable `id` |
//! | `query = "q"` | query parameter `q` |
//! | `cookie = "who"` | cookie `who` |
//! | `header = "x-head"` | request header `x-head` |
//! | `query` (bare) | lookup name is the field name |
//! | `required = false` | absence leaves the zero value; also `"false"` |
//! | `body` | member of the JSON body |
//!
//! Bound path/query/cookie/header fields must be `String`; any other type is
//! a compile error at the field.

mod parse;
mod record;
mod schema;

use proc_macro::TokenStream;
use syn::{parse_macro_input, DeriveInput};

/// Derives `RequestRecord` from `#[param(...)]` field annotations.
///
/// Fields without `#[param]` are left to `Default` and, if the record has
/// body fields, to serde. Use `#[record(crate = "...")]` when
/// `gotodoc_core` is reached through another path, such as `gotodoc::core`.
#[proc_macro_derive(RequestRecord, attributes(param, record))]
pub fn derive_request_record(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    record::expand_request_record(input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}

/// Derives `ApiSchema` for structs with named fields, single-field newtypes
/// and enums with unit variants.
///
/// Serde's `rename`, `rename_all` and `skip` are honored so the schema
/// matches the serialized form. Doc comments become descriptions.
#[proc_macro_derive(ApiSchema, attributes(record))]
pub fn derive_api_schema(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    schema::expand_api_schema(input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}
