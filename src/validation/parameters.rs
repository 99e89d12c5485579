use super::{ContractFailure, ValidationError};
use crate::context::{self, Request};
use crate::models::swagger::{ParameterDef, ParameterLocation, ParameterType};
use crate::schema::SchemaValidator;
use indexmap::IndexMap;
use serde_json::Value;
use std::collections::HashMap;

/// Check one declared parameter against the request.
///
/// Returns the checked (possibly coerced, possibly defaulted) value, or
/// `None` when an optional parameter is absent and declares no default — the
/// parameter is simply omitted, never defaulted to null.
pub fn check_parameter(
    validator: &SchemaValidator,
    def: &ParameterDef,
    request: &Request,
    path_params: &HashMap<String, String>,
) -> Result<Option<Value>, ContractFailure> {
    let raw = context::extract(&def.name, def.location, request, path_params)?;

    let value = match raw {
        None if def.required => {
            return Err(ValidationError::request(format!("{} is required", def.name)).into());
        }
        None => return Ok(def.default.clone()),
        Some(value) => value,
    };

    // Body values are validated against the declared schema as-is; everything
    // else is a string off the wire, coerced by its type hint and checked
    // against the flattened definition.
    let (value, schema) = if def.location == ParameterLocation::Body {
        match &def.schema {
            Some(schema) => (value, schema.clone()),
            None => return Ok(Some(value)),
        }
    } else {
        (coerce(def.param_type, value), def.flat_schema())
    };

    let violations = validator(&value, &schema);
    if !violations.is_empty() {
        return Err(ValidationError::request(format!(
            "{} has an invalid format: {}",
            def.name,
            violations.join("; ")
        ))
        .into());
    }

    Ok(Some(value))
}

/// Check every declared parameter, collecting failures instead of stopping at
/// the first one. All failure messages are joined into a single aggregate 400
/// so the caller sees every problem at once. Matching errors (spec defects)
/// are not collected; they abort immediately.
///
/// On success the returned map is the only parameter surface downstream logic
/// gets to see.
pub fn check_parameters(
    validator: &SchemaValidator,
    defs: &[ParameterDef],
    request: &Request,
    path_params: &HashMap<String, String>,
) -> Result<IndexMap<String, Value>, ContractFailure> {
    let mut checked = IndexMap::new();
    let mut failures: Vec<String> = Vec::new();

    for def in defs {
        match check_parameter(validator, def, request, path_params) {
            Ok(Some(value)) => {
                checked.insert(def.name.clone(), value);
            }
            Ok(None) => {}
            Err(ContractFailure::Validation(e)) => failures.push(e.message),
            Err(other) => return Err(other),
        }
    }

    if !failures.is_empty() {
        return Err(ValidationError::request(failures.join(", ")).into());
    }

    Ok(checked)
}

/// Coerce a raw string value by its declared primitive type. A value that
/// does not parse is left as the raw string, so the schema check reports a
/// type violation instead of the value silently becoming NaN or zero.
fn coerce(type_hint: Option<ParameterType>, value: Value) -> Value {
    let raw = match value.as_str() {
        Some(s) => s.to_owned(),
        None => return value,
    };
    match type_hint {
        Some(ParameterType::Integer) => raw.parse::<i64>().map(Value::from).unwrap_or(value),
        Some(ParameterType::Number) => raw
            .parse::<f64>()
            .ok()
            .and_then(serde_json::Number::from_f64)
            .map(Value::Number)
            .unwrap_or(value),
        _ => value,
    }
}
