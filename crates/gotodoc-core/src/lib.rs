//! # gotodoc Core
//!
//! Core types shared by every gotodoc crate.
//!
//! - [`RequestRecord`] - a request type whose fields declare where their values come from
//! - [`FieldDescriptor`] / [`FieldSource`] - the static per-field binding metadata
//! - [`ResponseRecord`] / [`Shape`] - a response type and whether it carries a JSON body
//! - [`Schema`] / [`ApiSchema`] - descriptive JSON shapes used in the API document
//! - [`RequestContext`] / [`RequestId`] - per-request metadata handed to handlers
//! - [`HandlerError`] - opaque failure returned by application handlers

#![doc(html_root_url = "https://docs.rs/gotodoc-core/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod context;
mod error;
mod record;
mod schema;

pub use context::{RequestContext, RequestId};
pub use error::{HandlerError, HandlerResult};
pub use record::{FieldDescriptor, FieldSource, RequestRecord, ResponseRecord, Shape};
pub use schema::{ApiSchema, Schema, SchemaType};
