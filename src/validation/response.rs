use super::{MatchingError, ValidationError};
use crate::models::swagger::{HeaderDef, ResponseDef};
use crate::schema::SchemaValidator;
use indexmap::IndexMap;
use serde_json::Value;
use std::collections::HashMap;
use tracing::debug;

/// Select the response definition for an emitted status code: exact string
/// match first, then the "default" entry. An operation whose declared
/// responses cover neither is a server-side contract violation — the handler
/// emitted a status the specification never promised.
pub fn select_response_def(
    responses: &IndexMap<String, ResponseDef>,
    status: u16,
) -> Result<&ResponseDef, MatchingError> {
    responses
        .get(status.to_string().as_str())
        .or_else(|| responses.get("default"))
        .ok_or_else(|| MatchingError::contract(format!("Unexpected return code {}", status)))
}

/// Validate the emitted body against the declared schema. No declared schema
/// means no check. Violation detail goes to the debug channel only; the
/// surfaced message stays generic because the caller is not the audience for
/// a server-side defect.
pub fn check_body(
    validator: &SchemaValidator,
    schema: Option<&Value>,
    body: Option<&Value>,
) -> Result<(), ValidationError> {
    let Some(schema) = schema else {
        return Ok(());
    };
    let body = body.cloned().unwrap_or(Value::Null);
    let violations = validator(&body, schema);
    if !violations.is_empty() {
        debug!(?violations, "implementation spec violation: unmatching response format");
        return Err(ValidationError::response("Unmatching response format"));
    }
    Ok(())
}

/// Validate every declared response header against what the handler sent.
///
/// A header that was not sent but declares a default satisfies the contract
/// without re-validation. All failures collapse into one generic 500: header
/// names and violations are logged, not leaked to the caller.
pub fn check_headers(
    validator: &SchemaValidator,
    defs: &IndexMap<String, HeaderDef>,
    sent_headers: &HashMap<String, String>,
) -> Result<(), ValidationError> {
    let mut errored = false;

    for (name, def) in defs {
        // hosts may fill the header map with any casing; HTTP names compare
        // case-insensitively
        let sent = sent_headers
            .iter()
            .find(|(sent_name, _)| sent_name.eq_ignore_ascii_case(name))
            .map(|(_, value)| value);
        if sent.is_none() && def.default.is_some() {
            continue;
        }
        let value = match sent {
            Some(raw) => coerce_header(def, raw),
            None => Value::Null,
        };
        let violations = validator(&value, &def.flat_schema());
        if !violations.is_empty() {
            debug!(
                header = %name,
                ?violations,
                "implementation spec violation: unmatching sent header format"
            );
            errored = true;
        }
    }

    if errored {
        return Err(ValidationError::response("Unmatching response format"));
    }
    Ok(())
}

/// Sent headers are strings on the wire; apply the same type coercion as
/// non-body parameters before checking the schema.
fn coerce_header(def: &HeaderDef, raw: &str) -> Value {
    use crate::models::swagger::ParameterType;
    match def.header_type {
        Some(ParameterType::Integer) => raw
            .parse::<i64>()
            .map(Value::from)
            .unwrap_or_else(|_| Value::String(raw.to_string())),
        Some(ParameterType::Number) => raw
            .parse::<f64>()
            .ok()
            .and_then(serde_json::Number::from_f64)
            .map(Value::Number)
            .unwrap_or_else(|| Value::String(raw.to_string())),
        _ => Value::String(raw.to_string()),
    }
}
