//! Descriptive JSON schemas.
//!
//! These follow the OpenAPI 3.1 schema object closely enough to be embedded
//! in the generated document. They describe shapes; no validation is done.

use std::collections::{BTreeMap, HashMap};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// JSON Schema type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SchemaType {
    /// String type.
    String,
    /// Number type.
    Number,
    /// Integer type.
    Integer,
    /// Boolean type.
    Boolean,
    /// Array type.
    Array,
    /// Object type.
    Object,
    /// Null type.
    Null,
}

/// JSON Schema definition.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Schema {
    /// Schema type.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[serde(rename = "type")]
    pub schema_type: Option<SchemaType>,
    /// Schema format (e.g., "int64", "double").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    /// Description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Object properties.
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub properties: IndexMap<String, Schema>,
    /// Required properties.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub required: Vec<String>,
    /// Array item schema.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub items: Option<Box<Schema>>,
    /// Map value schema.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[serde(rename = "additionalProperties")]
    pub additional_properties: Option<Box<Schema>>,
    /// Enum values.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    #[serde(rename = "enum")]
    pub enum_values: Vec<serde_json::Value>,
    /// Whether nullable.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub nullable: bool,
}

impl Schema {
    fn typed(schema_type: SchemaType) -> Self {
        Self {
            schema_type: Some(schema_type),
            ..Default::default()
        }
    }

    /// Create a string schema.
    #[must_use]
    pub fn string() -> Self {
        Self::typed(SchemaType::String)
    }

    /// Create an integer schema.
    #[must_use]
    pub fn integer() -> Self {
        Self::typed(SchemaType::Integer)
    }

    /// Create a number schema.
    #[must_use]
    pub fn number() -> Self {
        Self::typed(SchemaType::Number)
    }

    /// Create a boolean schema.
    #[must_use]
    pub fn boolean() -> Self {
        Self::typed(SchemaType::Boolean)
    }

    /// Create an array schema with the given item schema.
    #[must_use]
    pub fn array(items: Schema) -> Self {
        Self {
            items: Some(Box::new(items)),
            ..Self::typed(SchemaType::Array)
        }
    }

    /// Create an object schema.
    #[must_use]
    pub fn object() -> Self {
        Self::typed(SchemaType::Object)
    }

    /// Create an object schema whose values all follow `values`.
    #[must_use]
    pub fn map(values: Schema) -> Self {
        Self {
            additional_properties: Some(Box::new(values)),
            ..Self::typed(SchemaType::Object)
        }
    }

    /// Create a string enumeration.
    #[must_use]
    pub fn string_enum<I, S>(variants: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            enum_values: variants
                .into_iter()
                .map(|v| serde_json::Value::String(v.into()))
                .collect(),
            ..Self::string()
        }
    }

    /// Set the format.
    #[must_use]
    pub fn with_format(mut self, format: impl Into<String>) -> Self {
        self.format = Some(format.into());
        self
    }

    /// Add a description.
    #[must_use]
    pub fn with_description(mut self, desc: impl Into<String>) -> Self {
        self.description = Some(desc.into());
        self
    }

    /// Mark the schema as nullable.
    #[must_use]
    pub fn nullable(mut self) -> Self {
        self.nullable = true;
        self
    }

    /// Add a property to an object schema.
    #[must_use]
    pub fn property(mut self, name: impl Into<String>, schema: Schema) -> Self {
        self.properties.insert(name.into(), schema);
        self
    }

    /// Mark a property as required.
    #[must_use]
    pub fn required_property(mut self, name: impl Into<String>) -> Self {
        self.required.push(name.into());
        self
    }
}

/// Types that can describe their JSON shape.
///
/// Derive it with `#[derive(ApiSchema)]` for structs and unit enums.
pub trait ApiSchema {
    /// The JSON schema of this type.
    fn schema() -> Schema;

    /// Whether an object member of this type must be present.
    fn required() -> bool {
        true
    }
}

macro_rules! impl_api_schema {
    ($ctor:ident, $format:expr => $($ty:ty),+) => {
        $(
            impl ApiSchema for $ty {
                fn schema() -> Schema {
                    let schema = Schema::$ctor();
                    match $format {
                        Some(format) => schema.with_format(format),
                        None => schema,
                    }
                }
            }
        )+
    };
}

impl_api_schema!(string, None::<&str> => String, str, char);
impl_api_schema!(boolean, None::<&str> => bool);
impl_api_schema!(integer, Some("int32") => i8, i16, i32, u8, u16);
impl_api_schema!(integer, Some("int64") => i64, u32, u64, isize, usize);
impl_api_schema!(number, Some("float") => f32);
impl_api_schema!(number, Some("double") => f64);

impl<T: ApiSchema> ApiSchema for Option<T> {
    fn schema() -> Schema {
        T::schema().nullable()
    }

    fn required() -> bool {
        false
    }
}

impl<T: ApiSchema> ApiSchema for Vec<T> {
    fn schema() -> Schema {
        Schema::array(T::schema())
    }
}

impl<T: ApiSchema> ApiSchema for Box<T> {
    fn schema() -> Schema {
        T::schema()
    }

    fn required() -> bool {
        T::required()
    }
}

impl<V: ApiSchema, S> ApiSchema for HashMap<String, V, S> {
    fn schema() -> Schema {
        Schema::map(V::schema())
    }
}

impl<V: ApiSchema> ApiSchema for BTreeMap<String, V> {
    fn schema() -> Schema {
        Schema::map(V::schema())
    }
}

impl ApiSchema for serde_json::Value {
    fn schema() -> Schema {
        Schema::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_builders() {
        let string = Schema::string();
        assert_eq!(string.schema_type, Some(SchemaType::String));

        let array = Schema::array(Schema::string());
        assert_eq!(array.schema_type, Some(SchemaType::Array));
        assert!(array.items.is_some());

        let object = Schema::object()
            .property("name", Schema::string())
            .required_property("name");
        assert_eq!(object.schema_type, Some(SchemaType::Object));
        assert!(object.properties.contains_key("name"));
        assert_eq!(object.required, vec!["name".to_string()]);
    }

    #[test]
    fn test_primitive_formats() {
        assert_eq!(i32::schema().format.as_deref(), Some("int32"));
        assert_eq!(i64::schema().format.as_deref(), Some("int64"));
        assert_eq!(f64::schema().format.as_deref(), Some("double"));
        assert_eq!(String::schema().format, None);
        assert_eq!(bool::schema().schema_type, Some(SchemaType::Boolean));
    }

    #[test]
    fn test_option_is_not_required() {
        assert!(String::required());
        assert!(!<Option<String>>::required());
        assert!(<Option<String>>::schema().nullable);
    }

    #[test]
    fn test_map_schema() {
        let schema = <HashMap<String, i64>>::schema();
        assert_eq!(schema.schema_type, Some(SchemaType::Object));
        let values = schema.additional_properties.unwrap();
        assert_eq!(values.schema_type, Some(SchemaType::Integer));
    }

    #[test]
    fn test_string_enum_serialization() {
        let schema = Schema::string_enum(["small", "large"]);
        let json = serde_json::to_value(&schema).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "type": "string", "enum": ["small", "large"] })
        );
    }

    #[test]
    fn test_empty_collections_are_skipped() {
        let json = serde_json::to_string(&Schema::integer().with_format("int64")).unwrap();
        assert_eq!(json, r#"{"type":"integer","format":"int64"}"#);
    }
}
