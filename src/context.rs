use crate::models::swagger::ParameterLocation;
use crate::validation::MatchingError;
use serde_json::Value;
use std::collections::HashMap;

/// One incoming HTTP exchange as the host framework hands it over.
///
/// The core never talks to a transport: the host extracts the method, path,
/// query string, headers and the parsed JSON body into this value. Header
/// names are stored lowercased so lookups behave the way HTTP requires.
#[derive(Debug, Clone, Default)]
pub struct Request {
    pub method: String,
    pub path: String,
    pub query: HashMap<String, String>,
    pub headers: HashMap<String, String>,
    pub body: Option<Value>,
}

impl Request {
    pub fn new(method: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            path: path.into(),
            ..Default::default()
        }
    }

    pub fn with_query(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.insert(name.into(), value.into());
        self
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers
            .insert(name.into().to_ascii_lowercase(), value.into());
        self
    }

    pub fn with_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    /// Case-insensitive header lookup
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_ascii_lowercase())
            .map(String::as_str)
    }
}

/// The response the downstream handler produced, as far as the contract
/// checks care: status code, JSON body, headers.
#[derive(Debug, Clone)]
pub struct Response {
    pub status: u16,
    pub body: Option<Value>,
    pub headers: HashMap<String, String>,
}

impl Response {
    pub fn new(status: u16) -> Self {
        Self {
            status,
            body: None,
            headers: HashMap::new(),
        }
    }

    pub fn with_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers
            .insert(name.into().to_ascii_lowercase(), value.into());
        self
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_ascii_lowercase())
            .map(String::as_str)
    }
}

/// Pull a named raw value out of the request, from the location the
/// definition declares. `None` means the parameter was simply not supplied.
///
/// formData is not supported: a definition using it is a specification
/// problem, reported as a 500, never as a client error.
pub(crate) fn extract(
    name: &str,
    location: ParameterLocation,
    request: &Request,
    path_params: &HashMap<String, String>,
) -> Result<Option<Value>, MatchingError> {
    let value = match location {
        ParameterLocation::Query => request.query.get(name).cloned().map(Value::String),
        ParameterLocation::Header => request.header(name).map(|v| Value::String(v.to_string())),
        ParameterLocation::Path => path_params.get(name).cloned().map(Value::String),
        ParameterLocation::Body => request
            .body
            .as_ref()
            .and_then(Value::as_object)
            .and_then(|body| body.get(name))
            .cloned(),
        ParameterLocation::FormData => {
            return Err(MatchingError::contract(format!(
                "formData parameters are not supported: {}",
                name
            )));
        }
    };
    Ok(value)
}
