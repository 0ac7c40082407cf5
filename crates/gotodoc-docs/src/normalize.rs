//! Path-pattern normalization.
//!
//! Registration accepts patterns in the matcher's syntax, including regex
//! constraints such as `/items/{id:[0-9]+}`. The normalized form is what both
//! the route table and the document are keyed by:
//!
//! | Input | Normalized |
//! |-------|------------|
//! | `items/{id}` | `/items/{id}` |
//! | `/items/{id:[0-9]+}/` | `/items/{id}` |
//! | `//files/*rest` | `/files/*rest` |
//! | `` | `/` |

use std::collections::HashSet;
use std::sync::OnceLock;

use http::Method;
use regex::Regex;

use crate::error::{DocsError, DocsResult};

fn param_name_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_.\-]*$").expect("valid regex"))
}

/// Splits on `/` outside of `{...}`, so constraints may contain slashes.
fn split_segments(path: &str) -> DocsResult<Vec<&str>> {
    let mut segments = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;

    for (i, c) in path.char_indices() {
        match c {
            '{' => depth += 1,
            '}' => {
                depth = depth
                    .checked_sub(1)
                    .ok_or_else(|| DocsError::invalid_path(path, "unbalanced '}'"))?;
            }
            '/' if depth == 0 => {
                segments.push(&path[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    if depth != 0 {
        return Err(DocsError::invalid_path(path, "unclosed parameter"));
    }
    segments.push(&path[start..]);

    Ok(segments.into_iter().filter(|s| !s.is_empty()).collect())
}

/// Normalizes a registration pattern.
///
/// Regex constraints are stripped, a leading `/` is added and trailing or
/// repeated slashes are removed.
///
/// # Errors
///
/// Returns [`DocsError::InvalidPath`] for unbalanced braces, a parameter that
/// does not span a whole segment, an invalid or repeated parameter name, or
/// a wildcard that is not the last segment.
///
/// # Example
///
/// ```rust
/// use gotodoc_docs::normalize_path;
///
/// assert_eq!(normalize_path("items/{id:[0-9]+}/").unwrap(), "/items/{id}");
/// assert_eq!(normalize_path("").unwrap(), "/");
/// assert!(normalize_path("/items/{id").is_err());
/// ```
pub fn normalize_path(path: &str) -> DocsResult<String> {
    let segments = split_segments(path.trim())?;
    let last = segments.len().saturating_sub(1);
    let mut seen = HashSet::new();
    let mut normalized = Vec::with_capacity(segments.len());

    for (i, segment) in segments.into_iter().enumerate() {
        let (name, rendered) = if let Some(inner) = segment.strip_prefix('{') {
            let inner = inner
                .strip_suffix('}')
                .ok_or_else(|| DocsError::invalid_path(path, "parameter must span a whole segment"))?;
            let name = inner.split_once(':').map_or(inner, |(name, _)| name).trim();
            (Some(name), format!("{{{name}}}"))
        } else if let Some(name) = segment.strip_prefix('*') {
            if i != last {
                return Err(DocsError::invalid_path(path, "wildcard must be the last segment"));
            }
            (Some(name), format!("*{name}"))
        } else if segment.contains(['{', '}']) {
            return Err(DocsError::invalid_path(path, "parameter must span a whole segment"));
        } else {
            (None, segment.to_string())
        };

        if let Some(name) = name {
            if !param_name_regex().is_match(name) {
                return Err(DocsError::invalid_path(
                    path,
                    format!("invalid parameter name '{name}'"),
                ));
            }
            if !seen.insert(name.to_string()) {
                return Err(DocsError::invalid_path(
                    path,
                    format!("parameter '{name}' appears twice"),
                ));
            }
        }
        normalized.push(rendered);
    }

    Ok(format!("/{}", normalized.join("/")))
}

/// Returns the parameter names of a normalized pattern, in order.
pub fn path_parameters(normalized: &str) -> Vec<String> {
    normalized
        .split('/')
        .filter_map(|segment| {
            segment
                .strip_prefix('{')
                .and_then(|s| s.strip_suffix('}'))
                .or_else(|| segment.strip_prefix('*'))
        })
        .map(str::to_string)
        .collect()
}

/// Converts a normalized pattern to the OpenAPI path template.
///
/// Only wildcards differ: `/files/*rest` is documented as `/files/{rest}`.
pub fn document_path(normalized: &str) -> String {
    normalized
        .split('/')
        .map(|segment| match segment.strip_prefix('*') {
            Some(name) => format!("{{{name}}}"),
            None => segment.to_string(),
        })
        .collect::<Vec<_>>()
        .join("/")
}

/// Derives an operation id from the method and normalized pattern.
///
/// `GET /items/{id}` becomes `getItemsId`; the root path yields just the
/// lowercase method.
pub fn operation_id(method: &Method, normalized: &str) -> String {
    let mut id = method.as_str().to_ascii_lowercase();

    for word in normalized
        .split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|w| !w.is_empty())
    {
        let mut chars = word.chars();
        if let Some(first) = chars.next() {
            id.push(first.to_ascii_uppercase());
            id.push_str(chars.as_str());
        }
    }

    id
}
