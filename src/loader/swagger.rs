use crate::error::{GuardError, Result};
use crate::models::swagger::SwaggerSpec;
use std::fs;
use std::path::Path;

/// The only specification version this middleware enforces
pub const SUPPORTED_VERSION: &str = "2.0";

/// Load a Swagger 2.0 specification from a YAML or JSON file
pub fn load_swagger<P: AsRef<Path>>(path: P) -> Result<SwaggerSpec> {
    let path = path.as_ref();

    let content = fs::read_to_string(path).map_err(|e| {
        GuardError::SpecLoad(format!("Failed to read file {}: {}", path.display(), e))
    })?;

    parse_swagger(&content)
}

/// Parse a Swagger 2.0 specification from a string (YAML or JSON)
pub fn parse_swagger(content: &str) -> Result<SwaggerSpec> {
    let spec: SwaggerSpec = serde_yaml::from_str(content)
        .map_err(|e| GuardError::SpecLoad(format!("Failed to parse Swagger document: {}", e)))?;

    check_version(&spec)?;

    Ok(spec)
}

/// Build a specification from an in-memory JSON value
pub fn from_value(value: serde_json::Value) -> Result<SwaggerSpec> {
    let spec: SwaggerSpec = serde_json::from_value(value)?;
    check_version(&spec)?;
    Ok(spec)
}

/// Reject unsupported specification versions.
/// Runs before any route is registered, never per-request.
pub fn check_version(spec: &SwaggerSpec) -> Result<()> {
    if spec.swagger != SUPPORTED_VERSION {
        return Err(GuardError::UnsupportedVersion(spec.swagger.clone()));
    }
    Ok(())
}
