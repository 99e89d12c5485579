use thiserror::Error;

/// Errors raised while loading a specification or building the route table.
/// Everything here fails at startup; request-time failures live in
/// [`crate::validation`].
#[derive(Error, Debug)]
pub enum GuardError {
    #[error("Swagger {0} is not supported by this middleware")]
    UnsupportedVersion(String),

    #[error("Ambiguous route registration: {0}")]
    RouteConflict(String),

    #[error("Failed to load Swagger spec: {0}")]
    SpecLoad(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, GuardError>;
