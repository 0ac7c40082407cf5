//! OpenAPI 3.1 document types.
//!
//! Only the parts of the object model that registration produces are
//! represented. Schemas are [`gotodoc_core::Schema`].
//!
//! <https://spec.openapis.org/oas/v3.1.0>

use gotodoc_core::{FieldSource, Schema};
use http::Method;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// OpenAPI version written into every document.
pub const OPENAPI_VERSION: &str = "3.1.0";

/// OpenAPI document root object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OpenApi {
    /// OpenAPI version.
    pub openapi: String,
    /// API metadata.
    pub info: Info,
    /// Available servers.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub servers: Vec<Server>,
    /// API paths and operations, in registration order.
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub paths: IndexMap<String, PathItem>,
}

impl OpenApi {
    /// Creates an empty document.
    #[must_use]
    pub fn new(info: Info) -> Self {
        Self {
            openapi: OPENAPI_VERSION.to_string(),
            info,
            servers: Vec::new(),
            paths: IndexMap::new(),
        }
    }

    /// Returns the operation documented for `method` on `path`.
    #[must_use]
    pub fn operation(&self, method: &Method, path: &str) -> Option<&Operation> {
        self.paths.get(path)?.operation(method)
    }

    /// Number of documented operations.
    #[must_use]
    pub fn operation_count(&self) -> usize {
        self.paths.values().map(PathItem::len).sum()
    }
}

/// API metadata.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Info {
    /// API title.
    pub title: String,
    /// API version.
    pub version: String,
    /// API description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Server information.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Server {
    /// Server URL.
    pub url: String,
    /// Server description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// The operations of a single path.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PathItem {
    /// GET operation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub get: Option<Operation>,
    /// PUT operation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub put: Option<Operation>,
    /// POST operation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub post: Option<Operation>,
    /// DELETE operation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delete: Option<Operation>,
    /// OPTIONS operation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Operation>,
    /// HEAD operation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub head: Option<Operation>,
    /// PATCH operation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub patch: Option<Operation>,
    /// TRACE operation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trace: Option<Operation>,
}

impl PathItem {
    /// Returns the slot for `method`, or `None` if OpenAPI has no field for it.
    pub fn slot_mut(&mut self, method: &Method) -> Option<&mut Option<Operation>> {
        let slot = match *method {
            Method::GET => &mut self.get,
            Method::PUT => &mut self.put,
            Method::POST => &mut self.post,
            Method::DELETE => &mut self.delete,
            Method::OPTIONS => &mut self.options,
            Method::HEAD => &mut self.head,
            Method::PATCH => &mut self.patch,
            Method::TRACE => &mut self.trace,
            _ => return None,
        };
        Some(slot)
    }

    /// Returns the operation for `method`.
    #[must_use]
    pub fn operation(&self, method: &Method) -> Option<&Operation> {
        match *method {
            Method::GET => self.get.as_ref(),
            Method::PUT => self.put.as_ref(),
            Method::POST => self.post.as_ref(),
            Method::DELETE => self.delete.as_ref(),
            Method::OPTIONS => self.options.as_ref(),
            Method::HEAD => self.head.as_ref(),
            Method::PATCH => self.patch.as_ref(),
            Method::TRACE => self.trace.as_ref(),
            _ => None,
        }
    }

    /// Number of operations on this path.
    #[must_use]
    pub fn len(&self) -> usize {
        [
            &self.get,
            &self.put,
            &self.post,
            &self.delete,
            &self.options,
            &self.head,
            &self.patch,
            &self.trace,
        ]
        .iter()
        .filter(|op| op.is_some())
        .count()
    }

    /// Returns true if no operation is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// An API operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Operation {
    /// Unique operation identifier.
    #[serde(rename = "operationId")]
    pub operation_id: String,
    /// Short summary.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    /// Parameters.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub parameters: Vec<Parameter>,
    /// Request body.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[serde(rename = "requestBody")]
    pub request_body: Option<RequestBody>,
    /// Responses keyed by status code.
    pub responses: IndexMap<String, Response>,
}

/// Parameter location.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParameterIn {
    /// Query string parameter.
    Query,
    /// URL path parameter.
    Path,
    /// HTTP header.
    Header,
    /// Cookie.
    Cookie,
}

impl ParameterIn {
    /// Maps a record field source; body fields are not parameters.
    #[must_use]
    pub const fn from_source(source: FieldSource) -> Option<Self> {
        match source {
            FieldSource::Path => Some(Self::Path),
            FieldSource::Query => Some(Self::Query),
            FieldSource::Header => Some(Self::Header),
            FieldSource::Cookie => Some(Self::Cookie),
            FieldSource::Body => None,
        }
    }
}

/// An operation parameter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Parameter {
    /// Parameter name.
    pub name: String,
    /// Parameter location.
    #[serde(rename = "in")]
    pub location: ParameterIn,
    /// Whether required.
    #[serde(default)]
    pub required: bool,
    /// Parameter schema.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<Schema>,
}

impl Parameter {
    /// A string-typed parameter.
    #[must_use]
    pub fn string(name: impl Into<String>, location: ParameterIn, required: bool) -> Self {
        Self {
            name: name.into(),
            location,
            // Path parameters are always required
            required: required || location == ParameterIn::Path,
            schema: Some(Schema::string()),
        }
    }
}

/// Request body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequestBody {
    /// Whether required.
    #[serde(default)]
    pub required: bool,
    /// Content by media type.
    pub content: IndexMap<String, MediaType>,
}

/// Media type content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MediaType {
    /// Schema for this media type.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<Schema>,
}

/// Response definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Response {
    /// Description (required).
    pub description: String,
    /// Response content by media type.
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub content: IndexMap<String, MediaType>,
}

impl Response {
    /// A response without content.
    #[must_use]
    pub fn empty(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            content: IndexMap::new(),
        }
    }

    /// A response with an `application/json` body.
    #[must_use]
    pub fn json(description: impl Into<String>, schema: Schema) -> Self {
        Self {
            description: description.into(),
            content: json_content(schema),
        }
    }
}

pub(crate) fn json_content(schema: Schema) -> IndexMap<String, MediaType> {
    let mut content = IndexMap::new();
    content.insert(
        "application/json".to_string(),
        MediaType {
            schema: Some(schema),
        },
    );
    content
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_info_serialization() {
        let info = Info {
            title: "Test API".to_string(),
            version: "1.0.0".to_string(),
            description: None,
        };

        let json = serde_json::to_value(&info).unwrap();
        assert_eq!(json["title"], "Test API");
        assert!(json.get("description").is_none());
    }

    #[test]
    fn test_parameter_serialization() {
        let param = Parameter::string("search", ParameterIn::Query, false);
        let json = serde_json::to_value(&param).unwrap();

        assert_eq!(json["in"], "query");
        assert_eq!(json["required"], false);
        assert_eq!(json["schema"]["type"], "string");
    }

    #[test]
    fn test_path_parameter_always_required() {
        let param = Parameter::string("id", ParameterIn::Path, false);
        assert!(param.required);
    }

    #[test]
    fn test_parameter_in_from_source() {
        assert_eq!(ParameterIn::from_source(FieldSource::Cookie), Some(ParameterIn::Cookie));
        assert_eq!(ParameterIn::from_source(FieldSource::Body), None);
    }

    #[test]
    fn test_path_item_slots() {
        let mut item = PathItem::default();
        assert!(item.is_empty());
        assert!(item.slot_mut(&Method::CONNECT).is_none());

        let op = Operation {
            operation_id: "getItems".to_string(),
            summary: None,
            parameters: Vec::new(),
            request_body: None,
            responses: IndexMap::new(),
        };
        *item.slot_mut(&Method::GET).unwrap() = Some(op);

        assert_eq!(item.len(), 1);
        assert_eq!(item.operation(&Method::GET).unwrap().operation_id, "getItems");
        assert!(item.operation(&Method::POST).is_none());

        let json = serde_json::to_value(&item).unwrap();
        assert!(json.get("get").is_some());
        assert!(json.get("post").is_none());
    }

    #[test]
    fn test_response_builders() {
        let empty = Response::empty("No Content");
        assert!(empty.content.is_empty());

        let json = Response::json("OK", Schema::integer());
        assert!(json.content.contains_key("application/json"));
    }
}
