use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Swagger 2.0 specification root object
/// https://swagger.io/specification/v2/
///
/// The document is assumed to be $ref-resolved before it reaches this crate.
/// Once built it is read-only: request handling never writes back into the
/// definition tree, so one spec can back any number of concurrent flows.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SwaggerSpec {
    /// The Swagger Specification version (must be "2.0")
    pub swagger: String,

    /// Metadata about the API
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub info: Option<Info>,

    /// Path prefix applied to every path template
    #[serde(default, rename = "basePath")]
    pub base_path: String,

    /// Path template to path item, in document order
    #[serde(default)]
    pub paths: IndexMap<String, PathItem>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Info {
    pub title: String,

    pub version: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Operations available on a single path, one per HTTP method
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PathItem {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub get: Option<Operation>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub put: Option<Operation>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub post: Option<Operation>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delete: Option<Operation>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Operation>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub head: Option<Operation>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub patch: Option<Operation>,
}

impl PathItem {
    /// Case-insensitive method lookup
    pub fn operation(&self, method: &str) -> Option<&Operation> {
        match method.to_ascii_lowercase().as_str() {
            "get" => self.get.as_ref(),
            "put" => self.put.as_ref(),
            "post" => self.post.as_ref(),
            "delete" => self.delete.as_ref(),
            "options" => self.options.as_ref(),
            "head" => self.head.as_ref(),
            "patch" => self.patch.as_ref(),
            _ => None,
        }
    }
}

/// A single API operation on a path
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Operation {
    #[serde(default, skip_serializing_if = "Option::is_none", rename = "operationId")]
    pub operation_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Parameters accepted by the operation, in declaration order
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub parameters: Vec<ParameterDef>,

    /// Responses keyed by status-code string, plus the special "default" key
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub responses: IndexMap<String, ResponseDef>,
}

/// Where a parameter value is sourced from in the request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ParameterLocation {
    Query,
    Header,
    Path,
    FormData,
    Body,
}

impl std::fmt::Display for ParameterLocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            ParameterLocation::Query => "query",
            ParameterLocation::Header => "header",
            ParameterLocation::Path => "path",
            ParameterLocation::FormData => "formData",
            ParameterLocation::Body => "body",
        };
        write!(f, "{}", s)
    }
}

/// Primitive type hint for non-body parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParameterType {
    String,
    Number,
    Integer,
    Boolean,
    Array,
    File,
}

impl ParameterType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ParameterType::String => "string",
            ParameterType::Number => "number",
            ParameterType::Integer => "integer",
            ParameterType::Boolean => "boolean",
            ParameterType::Array => "array",
            ParameterType::File => "file",
        }
    }
}

/// A parameter definition attached to an operation
///
/// Routing metadata (`name`, `in`, `required`, `default`, `description`) is
/// modeled as fields; every other keyword the document carries (`enum`,
/// `pattern`, `minimum`, `format`, `items`, ...) lands in `constraints` and is
/// part of the validation schema. Nothing is stripped off the definition at
/// request time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParameterDef {
    pub name: String,

    #[serde(rename = "in")]
    pub location: ParameterLocation,

    #[serde(default)]
    pub required: bool,

    /// Fallback value applied when an optional parameter is absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,

    /// Primitive type hint, meaningful only outside body
    #[serde(default, skip_serializing_if = "Option::is_none", rename = "type")]
    pub param_type: Option<ParameterType>,

    /// JSON Schema for the value, meaningful only when `location == body`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Leftover schema keywords from the definition
    #[serde(flatten)]
    pub constraints: IndexMap<String, Value>,
}

impl ParameterDef {
    /// The definition minus routing metadata, as a JSON Schema object.
    /// This is what non-body parameter values are validated against.
    pub fn flat_schema(&self) -> Value {
        flat_schema(self.param_type, &self.constraints)
    }
}

/// A response definition for one status code (or "default")
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ResponseDef {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// JSON Schema for the response body; no schema means any body passes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<Value>,

    /// Declared response headers
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub headers: IndexMap<String, HeaderDef>,
}

/// A declared response header
///
/// Headers carry an inline type like non-body parameters, so the same flat
/// schema projection applies.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HeaderDef {
    #[serde(default, skip_serializing_if = "Option::is_none", rename = "type")]
    pub header_type: Option<ParameterType>,

    /// A declared default satisfies the contract when the header is not sent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(flatten)]
    pub constraints: IndexMap<String, Value>,
}

impl HeaderDef {
    pub fn flat_schema(&self) -> Value {
        flat_schema(self.header_type, &self.constraints)
    }
}

fn flat_schema(type_hint: Option<ParameterType>, constraints: &IndexMap<String, Value>) -> Value {
    let mut schema = serde_json::Map::new();
    if let Some(t) = type_hint {
        schema.insert("type".to_string(), Value::String(t.as_str().to_string()));
    }
    for (keyword, value) in constraints {
        schema.insert(keyword.clone(), value.clone());
    }
    Value::Object(schema)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_deserialize_minimal_spec() {
        let yaml = r#"
swagger: "2.0"
info:
  title: Test API
  version: 1.0.0
basePath: /api
paths:
  /hello/{name}:
    get:
      parameters:
        - name: name
          in: path
          required: true
          type: string
        - name: punctuation
          in: query
          type: string
          default: "."
      responses:
        "200":
          schema:
            type: string
"#;
        let spec: SwaggerSpec = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(spec.swagger, "2.0");
        assert_eq!(spec.base_path, "/api");

        let item = &spec.paths["/hello/{name}"];
        let op = item.operation("GET").expect("GET should be declared");
        assert_eq!(op.parameters.len(), 2);
        assert_eq!(op.parameters[0].location, ParameterLocation::Path);
        assert!(op.parameters[0].required);
        assert_eq!(op.parameters[1].default, Some(json!(".")));
        assert!(op.responses.contains_key("200"));
    }

    #[test]
    fn test_method_lookup_is_case_insensitive() {
        let item = PathItem {
            post: Some(Operation::default()),
            ..Default::default()
        };
        assert!(item.operation("POST").is_some());
        assert!(item.operation("post").is_some());
        assert!(item.operation("delete").is_none());
    }

    #[test]
    fn test_unknown_location_is_rejected_at_parse_time() {
        let result: Result<ParameterDef, _> = serde_json::from_value(json!({
            "name": "thing",
            "in": "cookie"
        }));
        assert!(result.is_err(), "cookie is not a Swagger 2.0 location");
    }

    #[test]
    fn test_flat_schema_keeps_constraints_and_drops_metadata() {
        let def: ParameterDef = serde_json::from_value(json!({
            "name": "size",
            "in": "query",
            "required": true,
            "type": "integer",
            "minimum": 1,
            "maximum": 10
        }))
        .unwrap();

        let schema = def.flat_schema();
        assert_eq!(schema["type"], json!("integer"));
        assert_eq!(schema["minimum"], json!(1));
        assert_eq!(schema["maximum"], json!(10));
        assert!(schema.get("name").is_none());
        assert!(schema.get("in").is_none());
        assert!(schema.get("required").is_none());
    }

    #[test]
    fn test_header_def_flat_schema() {
        let def: HeaderDef = serde_json::from_value(json!({
            "type": "string",
            "default": "42",
            "pattern": "^[0-9]+$"
        }))
        .unwrap();
        let schema = def.flat_schema();
        assert_eq!(schema["type"], json!("string"));
        assert_eq!(schema["pattern"], json!("^[0-9]+$"));
    }
}
