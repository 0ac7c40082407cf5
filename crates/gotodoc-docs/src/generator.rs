//! Operation accumulation and document rendering.

use std::fmt;
use std::io::Write;
use std::str::FromStr;

use gotodoc_core::{FieldDescriptor, FieldSource, RequestRecord, ResponseRecord, Schema, Shape};
use http::Method;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::error::{DocsError, DocsResult};
use crate::normalize::{document_path, normalize_path, operation_id, path_parameters};
use crate::openapi::{
    json_content, Info, OpenApi, Operation, Parameter, ParameterIn, PathItem, RequestBody,
    Response, Server,
};

/// Output format of the rendered document.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocFormat {
    /// YAML.
    #[default]
    Yaml,
    /// Pretty-printed JSON.
    Json,
}

impl DocFormat {
    /// Returns the format name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Yaml => "yaml",
            Self::Json => "json",
        }
    }
}

impl fmt::Display for DocFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown [`DocFormat`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown document format '{0}', expected 'yaml' or 'json'")]
pub struct UnknownDocFormat(pub String);

impl FromStr for DocFormat {
    type Err = UnknownDocFormat;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "yaml" | "yml" => Ok(Self::Yaml),
            "json" => Ok(Self::Json),
            _ => Err(UnknownDocFormat(s.to_string())),
        }
    }
}

/// Accumulates one operation per registration and renders the document.
///
/// Every operation documents its success response (`200` with a JSON schema,
/// or `204` for an empty response type) followed by the fixed `400` and
/// `500` responses.
///
/// # Example
///
/// ```rust
/// use gotodoc_core::{FieldDescriptor, Shape};
/// use gotodoc_docs::{DocFormat, OpenApiGenerator};
/// use http::Method;
///
/// let mut docs = OpenApiGenerator::new("API", "0.0.1", "API in swagger");
/// let fields = [FieldDescriptor::query("search", "search").optional()];
///
/// let path = docs
///     .add_operation(&Method::GET, "/items/{id:[0-9]+}", &fields, None, Shape::Empty)
///     .unwrap();
/// assert_eq!(path, "/items/{id}");
///
/// let yaml = docs.render(DocFormat::Yaml).unwrap();
/// assert!(yaml.contains("operationId: getItemsId"));
/// ```
#[derive(Debug, Clone)]
pub struct OpenApiGenerator {
    document: OpenApi,
}

impl Default for OpenApiGenerator {
    fn default() -> Self {
        Self {
            document: OpenApi::new(Info::default()),
        }
    }
}

impl OpenApiGenerator {
    /// Creates a generator with the document metadata.
    #[must_use]
    pub fn new(
        title: impl Into<String>,
        version: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        let mut generator = Self::default();
        generator.set_info(title, version, description);
        generator
    }

    /// Replaces the document metadata. An empty description is omitted.
    pub fn set_info(
        &mut self,
        title: impl Into<String>,
        version: impl Into<String>,
        description: impl Into<String>,
    ) {
        let description = description.into();
        self.document.info = Info {
            title: title.into(),
            version: version.into(),
            description: (!description.is_empty()).then_some(description),
        };
    }

    /// Adds a server entry.
    #[must_use]
    pub fn server(mut self, url: impl Into<String>, description: Option<String>) -> Self {
        self.document.servers.push(Server {
            url: url.into(),
            description,
        });
        self
    }

    /// Documents one operation and returns the normalized path pattern.
    ///
    /// `fields` are the request record's field descriptors; body fields are
    /// skipped since the body is described by `request_body`.
    ///
    /// # Errors
    ///
    /// - [`DocsError::InvalidPath`] if the pattern cannot be normalized
    /// - [`DocsError::UnsupportedMethod`] for methods OpenAPI cannot document
    /// - [`DocsError::DuplicateOperation`] if the method is already documented
    ///   for the normalized path
    pub fn add_operation(
        &mut self,
        method: &Method,
        path: &str,
        fields: &[FieldDescriptor],
        request_body: Option<Schema>,
        response: Shape,
    ) -> DocsResult<String> {
        let normalized = normalize_path(path)?;
        if PathItem::default().slot_mut(method).is_none() {
            return Err(DocsError::UnsupportedMethod {
                method: method.to_string(),
            });
        }

        let key = document_path(&normalized);
        if self
            .document
            .paths
            .get(&key)
            .and_then(|item| item.operation(method))
            .is_some()
        {
            return Err(DocsError::DuplicateOperation {
                method: method.to_string(),
                path: normalized,
            });
        }

        let operation = Operation {
            operation_id: operation_id(method, &normalized),
            summary: None,
            parameters: build_parameters(&normalized, fields),
            request_body: request_body.map(|schema| RequestBody {
                required: true,
                content: json_content(schema),
            }),
            responses: build_responses(response),
        };

        tracing::debug!(
            http.method = %method,
            http.path = %normalized,
            operation_id = %operation.operation_id,
            "operation documented"
        );

        let item = self.document.paths.entry(key).or_default();
        if let Some(slot) = item.slot_mut(method) {
            *slot = Some(operation);
        }

        Ok(normalized)
    }

    /// Documents an operation from its request and response record types.
    ///
    /// The unit type `()` stands for "no parameters, no body" on the request
    /// side and for an empty response on the response side.
    ///
    /// # Errors
    ///
    /// Same as [`add_operation`](Self::add_operation).
    pub fn add_record_operation<Req, Res>(&mut self, method: &Method, path: &str) -> DocsResult<String>
    where
        Req: RequestRecord,
        Res: ResponseRecord,
    {
        self.add_operation(method, path, Req::FIELDS, Req::body_schema(), Res::shape())
    }

    /// Returns true if `method` is documented for `path` (normalized first).
    #[must_use]
    pub fn contains(&self, method: &Method, path: &str) -> bool {
        normalize_path(path)
            .ok()
            .and_then(|p| self.document.operation(method, &document_path(&p)))
            .is_some()
    }

    /// Returns the accumulated document.
    #[must_use]
    pub fn document(&self) -> &OpenApi {
        &self.document
    }

    /// Renders the document as YAML.
    pub fn to_yaml(&self) -> DocsResult<String> {
        serde_yaml::to_string(&self.document).map_err(DocsError::from)
    }

    /// Renders the document as pretty-printed JSON.
    pub fn to_json(&self) -> DocsResult<String> {
        serde_json::to_string_pretty(&self.document).map_err(DocsError::from)
    }

    /// Renders the document in `format`.
    pub fn render(&self, format: DocFormat) -> DocsResult<String> {
        match format {
            DocFormat::Yaml => self.to_yaml(),
            DocFormat::Json => self.to_json(),
        }
    }

    /// Renders the document in `format` and writes it, newline-terminated,
    /// to `writer`.
    pub fn write_to<W: Write>(&self, format: DocFormat, mut writer: W) -> DocsResult<()> {
        let mut rendered = self.render(format)?;
        if !rendered.ends_with('\n') {
            rendered.push('\n');
        }
        writer.write_all(rendered.as_bytes())?;
        writer.flush()?;
        Ok(())
    }
}

/// Pattern parameters first, then the record's own parameters.
fn build_parameters(normalized: &str, fields: &[FieldDescriptor]) -> Vec<Parameter> {
    let pattern_params = path_parameters(normalized);
    let mut parameters: Vec<Parameter> = pattern_params
        .iter()
        .map(|name| Parameter::string(name.as_str(), ParameterIn::Path, true))
        .collect();

    for field in fields {
        let Some(location) = ParameterIn::from_source(field.source) else {
            continue;
        };
        if field.source == FieldSource::Path && !pattern_params.iter().any(|p| p == field.name) {
            tracing::warn!(
                http.path = %normalized,
                parameter = field.name,
                "path field does not appear in the pattern and is not documented"
            );
            continue;
        }
        if parameters
            .iter()
            .any(|p| p.name == field.name && p.location == location)
        {
            continue;
        }
        parameters.push(Parameter::string(field.name, location, field.required));
    }

    parameters
}

fn build_responses(response: Shape) -> IndexMap<String, Response> {
    let mut responses = IndexMap::new();
    match response {
        Shape::Json(schema) => {
            responses.insert("200".to_string(), Response::json("OK", schema));
        }
        Shape::Empty => {
            responses.insert("204".to_string(), Response::empty("No Content"));
        }
    }
    responses.insert("400".to_string(), Response::empty("Bad Request"));
    responses.insert("500".to_string(), Response::empty("Internal Server Error"));
    responses
}

#[cfg(test)]
mod tests {
    use super::*;
    use gotodoc_core::SchemaType;

    #[derive(Default, Serialize, Deserialize)]
    struct CreateItem {
        name: String,
        qty: i64,
    }

    impl RequestRecord for CreateItem {
        const FIELDS: &'static [FieldDescriptor] =
            &[FieldDescriptor::body("name"), FieldDescriptor::body("qty")];

        fn field_mut(&mut self, _field: &str) -> Option<&mut String> {
            None
        }

        fn body_schema() -> Option<Schema> {
            Some(
                Schema::object()
                    .property("name", Schema::string())
                    .property("qty", Schema::integer())
                    .required_property("name")
                    .required_property("qty"),
            )
        }
    }

    fn get_fields() -> [FieldDescriptor; 4] {
        [
            FieldDescriptor::path("id", "id"),
            FieldDescriptor::query("search", "search").optional(),
            FieldDescriptor::cookie("who", "who").optional(),
            FieldDescriptor::header("head", "x-head").optional(),
        ]
    }

    #[test]
    fn test_get_operation() {
        let mut docs = OpenApiGenerator::new("API", "0.0.1", "API in swagger");
        let path = docs
            .add_operation(&Method::GET, "/test/{id}", &get_fields(), None, Shape::Empty)
            .unwrap();
        assert_eq!(path, "/test/{id}");

        let op = docs.document().operation(&Method::GET, "/test/{id}").unwrap();
        assert_eq!(op.operation_id, "getTestId");
        assert!(op.request_body.is_none());

        let params: Vec<_> = op
            .parameters
            .iter()
            .map(|p| (p.name.as_str(), p.location, p.required))
            .collect();
        assert_eq!(
            params,
            vec![
                ("id", ParameterIn::Path, true),
                ("search", ParameterIn::Query, false),
                ("who", ParameterIn::Cookie, false),
                ("x-head", ParameterIn::Header, false),
            ]
        );

        let statuses: Vec<_> = op.responses.keys().map(String::as_str).collect();
        assert_eq!(statuses, vec!["204", "400", "500"]);
    }

    #[test]
    fn test_post_operation_with_body() {
        let mut docs = OpenApiGenerator::new("API", "0.0.1", "");
        docs.add_record_operation::<CreateItem, i64>(&Method::POST, "/test")
            .unwrap();

        let op = docs.document().operation(&Method::POST, "/test").unwrap();
        assert!(op.parameters.is_empty());

        let body = op.request_body.as_ref().unwrap();
        assert!(body.required);
        let schema = body.content["application/json"].schema.as_ref().unwrap();
        assert_eq!(schema.schema_type, Some(SchemaType::Object));
        assert!(schema.properties.contains_key("qty"));

        let ok = &op.responses["200"];
        let schema = ok.content["application/json"].schema.as_ref().unwrap();
        assert_eq!(schema.schema_type, Some(SchemaType::Integer));
        assert!(op.responses.contains_key("400"));
        assert!(op.responses.contains_key("500"));
    }

    #[test]
    fn test_duplicate_after_normalization() {
        let mut docs = OpenApiGenerator::default();
        docs.add_operation(&Method::GET, "/items/{id:[0-9]+}", &[], None, Shape::Empty)
            .unwrap();

        let err = docs
            .add_operation(&Method::GET, "items/{id}/", &[], None, Shape::Empty)
            .unwrap_err();
        assert!(err.is_duplicate());

        // Another method on the same path is fine
        docs.add_operation(&Method::DELETE, "/items/{id}", &[], None, Shape::Empty)
            .unwrap();
        assert_eq!(docs.document().paths.len(), 1);
        assert_eq!(docs.document().operation_count(), 2);
    }

    #[test]
    fn test_unsupported_method_leaves_no_path() {
        let mut docs = OpenApiGenerator::default();
        let err = docs
            .add_operation(&Method::CONNECT, "/tunnel", &[], None, Shape::Empty)
            .unwrap_err();
        assert!(matches!(err, DocsError::UnsupportedMethod { .. }));
        assert!(docs.document().paths.is_empty());
    }

    #[test]
    fn test_invalid_path() {
        let mut docs = OpenApiGenerator::default();
        let err = docs
            .add_operation(&Method::GET, "/items/{id", &[], None, Shape::Empty)
            .unwrap_err();
        assert!(matches!(err, DocsError::InvalidPath { .. }));
    }

    #[test]
    fn test_path_field_outside_pattern_is_skipped() {
        let mut docs = OpenApiGenerator::default();
        docs.add_operation(
            &Method::GET,
            "/items",
            &[FieldDescriptor::path("id", "id")],
            None,
            Shape::Empty,
        )
        .unwrap();

        let op = docs.document().operation(&Method::GET, "/items").unwrap();
        assert!(op.parameters.is_empty());
    }

    #[test]
    fn test_contains() {
        let mut docs = OpenApiGenerator::default();
        docs.add_operation(&Method::GET, "/files/*rest", &[], None, Shape::Empty)
            .unwrap();

        assert!(docs.contains(&Method::GET, "/files/*rest/"));
        assert!(!docs.contains(&Method::POST, "/files/*rest"));
        assert!(docs.document().paths.contains_key("/files/{rest}"));
    }

    #[test]
    fn test_render_yaml_and_json() {
        let mut docs = OpenApiGenerator::new("API", "0.0.1", "API in swagger");
        docs.add_operation(&Method::GET, "/test/{id}", &get_fields(), None, Shape::Empty)
            .unwrap();

        let yaml = docs.render(DocFormat::Yaml).unwrap();
        assert!(yaml.contains("openapi: 3.1.0"));
        assert!(yaml.contains("title: API"));
        assert!(yaml.contains("/test/{id}"));

        let json: serde_json::Value =
            serde_json::from_str(&docs.render(DocFormat::Json).unwrap()).unwrap();
        assert_eq!(json["info"]["description"], "API in swagger");
        assert_eq!(
            json["paths"]["/test/{id}"]["get"]["responses"]["204"]["description"],
            "No Content"
        );
    }

    #[test]
    fn test_write_to_sink() {
        let docs = OpenApiGenerator::new("API", "1.0.0", "");
        let mut out = Vec::new();
        docs.write_to(DocFormat::Json, &mut out).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(text.ends_with('\n'));
        let json: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(json["openapi"], "3.1.0");
        assert!(json.get("paths").is_none());
        assert!(json["info"].get("description").is_none());
    }

    #[test]
    fn test_doc_format_parse() {
        assert_eq!("yaml".parse::<DocFormat>().unwrap(), DocFormat::Yaml);
        assert_eq!("YML".parse::<DocFormat>().unwrap(), DocFormat::Yaml);
        assert_eq!(" json ".parse::<DocFormat>().unwrap(), DocFormat::Json);
        assert!("xml".parse::<DocFormat>().is_err());
        assert_eq!(DocFormat::default().to_string(), "yaml");
    }
}
