use serde_json::Value;
use std::sync::Arc;

/// The JSON-Schema engine the middleware delegates to: given a value and a
/// schema, return the list of violations (empty means valid). Injectable so
/// hosts can bring their own engine; [`jsonschema_validator`] is the default.
pub type SchemaValidator = Arc<dyn Fn(&Value, &Value) -> Vec<String> + Send + Sync>;

/// Default validator backed by the `jsonschema` crate.
///
/// Schemas arrive from the specification at request time, so they are
/// compiled per call. A schema that fails to compile is itself reported as a
/// violation: that is a spec-authoring problem the caller should see.
pub fn jsonschema_validator(value: &Value, schema: &Value) -> Vec<String> {
    let compiled = match jsonschema::JSONSchema::compile(schema) {
        Ok(compiled) => compiled,
        Err(e) => return vec![format!("invalid schema: {}", e)],
    };
    match compiled.validate(value) {
        Ok(()) => vec![],
        Err(errors) => errors.map(|e| e.to_string()).collect(),
    }
}

/// The default validator as a shareable handle
pub fn default_validator() -> SchemaValidator {
    Arc::new(jsonschema_validator)
}
