//! JSON body decoder.
//!
//! The body is decoded into the record that the binder already filled: the
//! record is serialized to a JSON value, the body is merged over it and the
//! result is deserialized back. Members absent from the body keep their
//! bound values.

use gotodoc_core::{FieldSource, RequestRecord};
use serde_json::Value;

use crate::{ExtractionContext, ExtractionError};

/// Default maximum body size for JSON decoding (1 MB).
pub const DEFAULT_MAX_BODY_SIZE: usize = 1024 * 1024;

/// Merges a JSON body over the current record.
///
/// Records without body fields return immediately without looking at the
/// body, even when one is present and malformed.
///
/// # Errors
///
/// - [`PayloadTooLarge`](crate::ExtractionErrorKind::PayloadTooLarge) when the
///   body exceeds `max_body_bytes`
/// - [`BadRequestBody`](crate::ExtractionErrorKind::BadRequestBody) for an
///   empty or malformed body, or values that do not fit the record
pub fn decode_body<R: RequestRecord>(
    ctx: &ExtractionContext,
    record: &mut R,
    max_body_bytes: usize,
) -> Result<(), ExtractionError> {
    if !R::has_body_fields() {
        return Ok(());
    }

    let body = ctx.body();
    if body.len() > max_body_bytes {
        return Err(ExtractionError::payload_too_large(max_body_bytes, body.len()));
    }
    if body.is_empty() {
        return Err(ExtractionError::bad_request_body("empty request body"));
    }

    let patch: Value = serde_json::from_slice(body)
        .map_err(|e| ExtractionError::bad_request_body(e.to_string()))?;

    let mut current = serde_json::to_value(&*record)
        .map_err(|e| ExtractionError::bad_request_body(e.to_string()))?;
    merge_json(&mut current, patch);

    // Parameters may be hidden from serde; keep them across the round trip.
    let bound: Vec<(&'static str, String)> = R::FIELDS
        .iter()
        .filter(|d| d.source != FieldSource::Body)
        .filter_map(|d| record.field_mut(d.field).map(|v| (d.field, v.clone())))
        .collect();

    let mut decoded: R = serde_json::from_value(current)
        .map_err(|e| ExtractionError::bad_request_body(e.to_string()))?;

    for (field, value) in bound {
        if let Some(slot) = decoded.field_mut(field) {
            if slot.is_empty() {
                *slot = value;
            }
        }
    }

    *record = decoded;
    Ok(())
}

/// Merges `patch` into `target`.
///
/// Objects merge member by member, recursively. `null` members of the patch
/// are ignored. Any other value replaces the target.
///
/// # Example
///
/// ```rust
/// use gotodoc_extract::merge_json;
/// use serde_json::json;
///
/// let mut record = json!({ "id": "42", "name": "old", "meta": { "a": 1 } });
/// merge_json(&mut record, json!({ "name": "new", "meta": { "b": 2 }, "id": null }));
///
/// assert_eq!(record, json!({ "id": "42", "name": "new", "meta": { "a": 1, "b": 2 } }));
/// ```
pub fn merge_json(target: &mut Value, patch: Value) {
    match (target, patch) {
        (_, Value::Null) => {}
        (Value::Object(target), Value::Object(patch)) => {
            for (key, value) in patch {
                match target.get_mut(&key) {
                    Some(existing) => merge_json(existing, value),
                    None if value.is_null() => {}
                    None => {
                        target.insert(key, value);
                    }
                }
            }
        }
        (target, patch) => *target = patch,
    }
}
