use crate::context::{Request, Response};
use crate::error::Result;
use crate::loader;
use crate::models::swagger::{Operation, SwaggerSpec};
use crate::router::RouteIndex;
use crate::schema::{self, SchemaValidator};
use crate::validation::{self, ContractFailure, MatchingError};
use indexmap::IndexMap;
use serde_json::Value;
use std::collections::HashMap;
use tracing::debug;

/// Enforces one specification on request/response cycles.
///
/// Built once at startup (version guard, then route table) and shared
/// read-only afterwards: the middleware holds no per-request state, so it is
/// safe to call from any number of concurrent flows.
///
/// The cycle is two ordinary function calls with the downstream handler in
/// between — no suspension machinery:
///
/// 1. [`check_request`](Self::check_request) routes the exchange and
///    validates every declared parameter. Routing (404/405) and parameter
///    failures (aggregate 400) short-circuit here; the handler never sees an
///    off-contract request.
/// 2. [`check_response`](Self::check_response) validates the status code,
///    body and headers the handler actually produced. Nothing leaks if this
///    phase never runs: phase one holds no resources beyond borrows.
///
/// [`handle`](Self::handle) composes both around a handler value.
pub struct ValidationMiddleware {
    routes: RouteIndex,
    validator: SchemaValidator,
    strict: bool,
}

impl ValidationMiddleware {
    /// Build the middleware from a (pre-$ref-resolved) specification.
    /// Fails fast on an unsupported version or an ambiguous route table.
    pub fn new(spec: &SwaggerSpec) -> Result<Self> {
        loader::check_version(spec)?;
        Ok(Self {
            routes: RouteIndex::build(spec)?,
            validator: schema::default_validator(),
            strict: true,
        })
    }

    /// Replace the default JSON-Schema engine
    pub fn with_validator(mut self, validator: SchemaValidator) -> Self {
        self.validator = validator;
        self
    }

    /// Let requests to unregistered paths pass through untouched instead of
    /// failing with 404
    pub fn lenient(mut self) -> Self {
        self.strict = false;
        self
    }

    /// Pre-phase: route the request, resolve the operation, check every
    /// declared parameter. The returned [`CheckedRequest`] is what downstream
    /// logic gets — raw context access is not part of the validated contract.
    pub fn check_request(
        &self,
        request: &Request,
    ) -> std::result::Result<CheckedRequest<'_>, ContractFailure> {
        let matched = match self.routes.lookup(&request.path) {
            Some(matched) => matched,
            None if self.strict => {
                return Err(MatchingError::not_found(&request.path).into());
            }
            None => {
                debug!(path = %request.path, "no route matched, passing through");
                return Ok(CheckedRequest::unrouted());
            }
        };

        let operation = matched.operation(&request.method)?;
        let parameters = validation::check_parameters(
            &self.validator,
            &operation.parameters,
            request,
            &matched.path_params,
        )?;

        Ok(CheckedRequest {
            operation: Some(operation),
            path_params: matched.path_params,
            parameters,
        })
    }

    /// Post-phase: check the emitted status code against the declared
    /// responses, then the body and header contracts. A pass-through request
    /// validates nothing.
    pub fn check_response(
        &self,
        checked: &CheckedRequest<'_>,
        response: &Response,
    ) -> std::result::Result<(), ContractFailure> {
        let Some(operation) = checked.operation else {
            return Ok(());
        };

        let response_def = validation::select_response_def(&operation.responses, response.status)?;
        validation::check_body(
            &self.validator,
            response_def.schema.as_ref(),
            response.body.as_ref(),
        )?;
        validation::check_headers(&self.validator, &response_def.headers, &response.headers)?;
        Ok(())
    }

    /// Run one full cycle: validate the request, call the downstream handler,
    /// validate what it produced. The handler is never invoked for an
    /// off-contract request, and an off-contract response is reported instead
    /// of being forwarded.
    pub fn handle<F>(
        &self,
        request: &Request,
        handler: F,
    ) -> std::result::Result<Response, ContractFailure>
    where
        F: FnOnce(&CheckedRequest<'_>) -> Response,
    {
        let checked = self.check_request(request)?;
        let response = handler(&checked);
        self.check_response(&checked, &response)?;
        Ok(response)
    }
}

/// The validated view of one request, handed to downstream logic.
#[derive(Debug)]
pub struct CheckedRequest<'a> {
    operation: Option<&'a Operation>,

    /// Values extracted from the matched template's `{param}` placeholders
    pub path_params: HashMap<String, String>,

    /// Checked and coerced parameter values, in declaration order
    pub parameters: IndexMap<String, Value>,
}

impl<'a> CheckedRequest<'a> {
    fn unrouted() -> Self {
        Self {
            operation: None,
            path_params: HashMap::new(),
            parameters: IndexMap::new(),
        }
    }

    /// False only in lenient mode, for a request no template matched
    pub fn is_routed(&self) -> bool {
        self.operation.is_some()
    }

    /// A checked parameter by name
    pub fn parameter(&self, name: &str) -> Option<&Value> {
        self.parameters.get(name)
    }
}
