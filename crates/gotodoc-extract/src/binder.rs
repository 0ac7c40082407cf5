//! Parameter binder.
//!
//! Fills the path/query/cookie/header fields of a request record from an
//! [`ExtractionContext`], following the record's static field descriptors.

use gotodoc_core::{FieldSource, RequestRecord};

use crate::{decode_body, Cookies, ExtractionContext, ExtractionError, QueryParams};

/// Lazily parsed request views, so a record without query or cookie
/// fields never parses those sources.
struct Sources<'a> {
    ctx: &'a ExtractionContext,
    query: Option<QueryParams>,
    cookies: Option<Cookies>,
}

impl<'a> Sources<'a> {
    fn new(ctx: &'a ExtractionContext) -> Self {
        Self {
            ctx,
            query: None,
            cookies: None,
        }
    }

    /// Returns the non-empty value of `name` in `source`.
    fn lookup(&mut self, source: FieldSource, name: &str) -> Option<String> {
        let ctx = self.ctx;
        let value = match source {
            FieldSource::Path => ctx.path_params().get(name),
            FieldSource::Query => self
                .query
                .get_or_insert_with(|| QueryParams::parse(ctx.query_string().unwrap_or("")))
                .get(name),
            FieldSource::Cookie => self
                .cookies
                .get_or_insert_with(|| Cookies::from_headers(ctx.headers()))
                .get(name),
            FieldSource::Header => ctx.header(name),
            FieldSource::Body => None,
        };
        value.filter(|v| !v.is_empty()).map(str::to_string)
    }
}

/// Binds every path, query, cookie and header field of `record`.
///
/// Fields are visited in declaration order and binding stops at the first
/// failure. An empty value counts as absent. Absent optional fields keep
/// their current value.
///
/// # Errors
///
/// - [`MissingParameter`](crate::ExtractionErrorKind::MissingParameter) for a
///   required field without a value
/// - [`UnsupportedFieldType`](crate::ExtractionErrorKind::UnsupportedFieldType)
///   when the record exposes no string slot for an annotated field
pub fn bind<R: RequestRecord>(ctx: &ExtractionContext, record: &mut R) -> Result<(), ExtractionError> {
    let mut sources = Sources::new(ctx);

    for descriptor in R::FIELDS {
        if descriptor.source == FieldSource::Body {
            continue;
        }

        let Some(slot) = record.field_mut(descriptor.field) else {
            return Err(ExtractionError::unsupported_field_type(
                descriptor.source.into(),
                descriptor.field,
            ));
        };

        match sources.lookup(descriptor.source, descriptor.name) {
            Some(value) => *slot = value,
            None if descriptor.required => {
                return Err(ExtractionError::missing(
                    descriptor.source.into(),
                    descriptor.name,
                ));
            }
            None => {}
        }
    }

    Ok(())
}

/// Builds a fresh record, binds its parameters, then merges the JSON body.
///
/// # Errors
///
/// Any error of [`bind`] or [`decode_body`].
pub fn extract_record<R: RequestRecord>(
    ctx: &ExtractionContext,
    max_body_bytes: usize,
) -> Result<R, ExtractionError> {
    let mut record = R::default();
    bind(ctx, &mut record)?;
    decode_body(ctx, &mut record, max_body_bytes)?;
    Ok(record)
}
