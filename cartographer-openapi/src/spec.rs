//! OpenAPI document types
//!
//! Maps that end up in the serialized document are [`IndexMap`]s so that
//! output order follows insertion order and repeated generations of the same
//! input serialize byte for byte identically.

use crate::error::Result;
use cartographer_core::HttpMethod;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Prefix of every component schema reference.
pub const COMPONENT_REF_PREFIX: &str = "#/components/schemas/";

/// OpenAPI document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OpenApiSpec {
    pub openapi: String,
    pub info: Info,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub servers: Vec<Server>,
    #[serde(default)]
    pub paths: IndexMap<String, PathItem>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub components: Option<Components>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub tags: Vec<Tag>,
}

impl OpenApiSpec {
    /// Look up an operation by route template and method.
    pub fn operation(&self, path: &str, method: HttpMethod) -> Option<&Operation> {
        self.paths.get(path)?.operation(method)
    }

    /// Look up a component schema by canonical name.
    pub fn component(&self, name: &str) -> Option<&Schema> {
        self.components.as_ref()?.schemas.get(name)
    }

    /// Pretty-printed JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }
}

/// API information
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Info {
    pub title: String,
    pub version: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub terms_of_service: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact: Option<Contact>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub license: Option<License>,
}

/// Contact information
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contact {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

/// License information
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct License {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

/// Server information
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Server {
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Path item: one optional operation per method, serialized in a fixed order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct PathItem {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub get: Option<Operation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub put: Option<Operation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub post: Option<Operation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delete: Option<Operation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<Operation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub head: Option<Operation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub patch: Option<Operation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trace: Option<Operation>,
}

impl PathItem {
    fn slot(&mut self, method: HttpMethod) -> &mut Option<Operation> {
        match method {
            HttpMethod::Get => &mut self.get,
            HttpMethod::Put => &mut self.put,
            HttpMethod::Post => &mut self.post,
            HttpMethod::Delete => &mut self.delete,
            HttpMethod::Options => &mut self.options,
            HttpMethod::Head => &mut self.head,
            HttpMethod::Patch => &mut self.patch,
            HttpMethod::Trace => &mut self.trace,
        }
    }

    pub fn operation(&self, method: HttpMethod) -> Option<&Operation> {
        match method {
            HttpMethod::Get => self.get.as_ref(),
            HttpMethod::Put => self.put.as_ref(),
            HttpMethod::Post => self.post.as_ref(),
            HttpMethod::Delete => self.delete.as_ref(),
            HttpMethod::Options => self.options.as_ref(),
            HttpMethod::Head => self.head.as_ref(),
            HttpMethod::Patch => self.patch.as_ref(),
            HttpMethod::Trace => self.trace.as_ref(),
        }
    }

    /// Store an operation, returning the one it replaced.
    pub fn set_operation(&mut self, method: HttpMethod, operation: Operation) -> Option<Operation> {
        self.slot(method).replace(operation)
    }

    /// Operations present, in serialization order.
    pub fn operations(&self) -> impl Iterator<Item = (HttpMethod, &Operation)> {
        HttpMethod::ALL
            .into_iter()
            .filter_map(|method| self.operation(method).map(|op| (method, op)))
    }
}

/// Operation (endpoint)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Operation {
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub tags: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub operation_id: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub parameters: Vec<Parameter>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_body: Option<RequestBody>,
    pub responses: IndexMap<String, Response>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deprecated: Option<bool>,
}

/// Parameter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Parameter {
    pub name: String,
    #[serde(rename = "in")]
    pub location: ParameterLocation,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub required: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schema: Option<SchemaRef>,
}

/// Parameter location
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParameterLocation {
    Query,
    Header,
    Path,
    Cookie,
}

/// Request body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequestBody {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub content: IndexMap<String, MediaType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub required: Option<bool>,
}

/// Media type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MediaType {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schema: Option<SchemaRef>,
}

/// Response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Response {
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<IndexMap<String, MediaType>>,
}

/// Schema fragment: a component reference or an inline schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SchemaRef {
    Ref(Reference),
    Inline(Box<Schema>),
}

impl SchemaRef {
    /// Reference to the component named `name`.
    pub fn component(name: &str) -> Self {
        SchemaRef::Ref(Reference::component(name))
    }

    pub fn inline(schema: Schema) -> Self {
        SchemaRef::Inline(Box::new(schema))
    }

    /// Name of the referenced component, if this is a component reference.
    pub fn component_name(&self) -> Option<&str> {
        match self {
            SchemaRef::Ref(reference) => reference.component_name(),
            SchemaRef::Inline(_) => None,
        }
    }

    pub fn as_inline(&self) -> Option<&Schema> {
        match self {
            SchemaRef::Inline(schema) => Some(schema),
            SchemaRef::Ref(_) => None,
        }
    }
}

/// `$ref` object
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reference {
    #[serde(rename = "$ref")]
    pub ref_path: String,
}

impl Reference {
    pub fn component(name: &str) -> Self {
        Self {
            ref_path: format!("{}{}", COMPONENT_REF_PREFIX, name),
        }
    }

    pub fn component_name(&self) -> Option<&str> {
        self.ref_path.strip_prefix(COMPONENT_REF_PREFIX)
    }
}

/// JSON Schema type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SchemaType {
    String,
    Integer,
    Number,
    Boolean,
    Array,
    Object,
    Null,
}

/// Schema body. The empty schema (`{}`) accepts any value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Schema {
    #[serde(skip_serializing_if = "Option::is_none", rename = "type")]
    pub schema_type: Option<SchemaType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub properties: Option<IndexMap<String, SchemaRef>>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub required: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub items: Option<Box<SchemaRef>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub additional_properties: Option<Box<SchemaRef>>,
    #[serde(skip_serializing_if = "Option::is_none", rename = "enum")]
    pub enum_values: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nullable: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub all_of: Option<Vec<SchemaRef>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub any_of: Option<Vec<SchemaRef>>,
}

impl Schema {
    pub fn of_type(schema_type: SchemaType) -> Self {
        Self {
            schema_type: Some(schema_type),
            ..Default::default()
        }
    }

    /// Schema accepting any value.
    pub fn any() -> Self {
        Self::default()
    }

    pub fn is_any(&self) -> bool {
        *self == Self::default()
    }

    pub fn array(items: SchemaRef) -> Self {
        Self {
            items: Some(Box::new(items)),
            ..Self::of_type(SchemaType::Array)
        }
    }

    pub fn object(properties: IndexMap<String, SchemaRef>, required: Vec<String>) -> Self {
        Self {
            properties: Some(properties),
            required,
            ..Self::of_type(SchemaType::Object)
        }
    }

    /// Dictionary with string keys and `values` values.
    pub fn map(values: SchemaRef) -> Self {
        Self {
            additional_properties: Some(Box::new(values)),
            ..Self::of_type(SchemaType::Object)
        }
    }

    pub fn string_enum(variants: Vec<String>) -> Self {
        Self {
            enum_values: Some(variants),
            ..Self::of_type(SchemaType::String)
        }
    }
}

/// Components
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Components {
    #[serde(skip_serializing_if = "IndexMap::is_empty", default)]
    pub schemas: IndexMap<String, Schema>,
}

/// Tag
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tag {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_serialization() {
        let schema = SchemaRef::component("User");
        let json = serde_json::to_string(&schema).unwrap();

        assert_eq!(json, r##"{"$ref":"#/components/schemas/User"}"##);
        assert_eq!(schema.component_name(), Some("User"));
    }

    #[test]
    fn test_any_schema_serializes_empty() {
        let json = serde_json::to_string(&Schema::any()).unwrap();
        assert_eq!(json, "{}");
        assert!(Schema::any().is_any());
        assert!(!Schema::of_type(SchemaType::String).is_any());
    }

    #[test]
    fn test_schema_ref_deserializes_both_forms() {
        let reference: SchemaRef =
            serde_json::from_str(r##"{"$ref":"#/components/schemas/Item2"}"##).unwrap();
        assert_eq!(reference.component_name(), Some("Item2"));

        let inline: SchemaRef = serde_json::from_str(r#"{"type":"string","format":"uuid"}"#).unwrap();
        let schema = inline.as_inline().unwrap();
        assert_eq!(schema.schema_type, Some(SchemaType::String));
        assert_eq!(schema.format.as_deref(), Some("uuid"));
    }

    #[test]
    fn test_camel_case_fields() {
        let schema = Schema::map(SchemaRef::inline(Schema::of_type(SchemaType::Integer)));
        let json = serde_json::to_string(&schema).unwrap();
        assert_eq!(json, r#"{"type":"object","additionalProperties":{"type":"integer"}}"#);

        let operation = Operation {
            operation_id: Some("listUsers".to_string()),
            ..Default::default()
        };
        let json = serde_json::to_string(&operation).unwrap();
        assert!(json.contains("\"operationId\":\"listUsers\""));
    }

    #[test]
    fn test_path_item_operations_in_fixed_order() {
        let mut item = PathItem::default();
        item.set_operation(HttpMethod::Post, Operation::default());
        item.set_operation(HttpMethod::Get, Operation::default());

        let methods: Vec<_> = item.operations().map(|(m, _)| m).collect();
        assert_eq!(methods, vec![HttpMethod::Get, HttpMethod::Post]);

        let replaced = item.set_operation(HttpMethod::Get, Operation::default());
        assert!(replaced.is_some());
    }

    #[test]
    fn test_properties_keep_declaration_order() {
        let mut properties = IndexMap::new();
        properties.insert("zeta".to_string(), SchemaRef::inline(Schema::of_type(SchemaType::String)));
        properties.insert("alpha".to_string(), SchemaRef::inline(Schema::of_type(SchemaType::String)));
        let schema = Schema::object(properties, vec!["zeta".to_string()]);

        let json = serde_json::to_string(&schema).unwrap();
        assert!(json.find("zeta").unwrap() < json.find("alpha").unwrap());
    }
}
