use crate::error::{GuardError, Result};
use crate::models::swagger::{Operation, PathItem, SwaggerSpec};
use crate::validation::MatchingError;
use std::collections::HashMap;

/// The routing table built once from a specification.
///
/// Swagger path templates use the same `{param}` placeholder syntax as
/// [`matchit`], so `basePath + template` is registered verbatim. The index is
/// immutable after construction and shared read-only across request flows.
pub struct RouteIndex {
    router: matchit::Router<PathItem>,
}

impl RouteIndex {
    /// Register every path template of the spec, with its operations attached.
    /// Two templates normalizing to the same registration key are an
    /// authoring error and fail the build, not a later request.
    pub fn build(spec: &SwaggerSpec) -> Result<Self> {
        let mut router = matchit::Router::new();
        // templates always start with "/", so a trailing slash on basePath
        // would register "//"-keyed routes nothing can ever hit
        let base = spec.base_path.trim_end_matches('/');
        for (template, item) in &spec.paths {
            let route = format!("{}{}", base, template);
            router
                .insert(&route, item.clone())
                .map_err(|e| GuardError::RouteConflict(format!("{}: {}", route, e)))?;
        }
        Ok(Self { router })
    }

    /// Resolve a concrete request path. `None` is the distinguishable
    /// no-match outcome the middleware turns into a 404 (or a pass-through).
    pub fn lookup(&self, path: &str) -> Option<RouteMatch<'_>> {
        let matched = self.router.at(path).ok()?;
        let path_params = matched
            .params
            .iter()
            .map(|(name, value)| (name.to_string(), value.to_string()))
            .collect();
        Some(RouteMatch {
            operations: matched.value,
            path_params,
        })
    }
}

/// A matched path template: the operations declared on it and the values
/// extracted from its `{param}` placeholders.
pub struct RouteMatch<'a> {
    pub operations: &'a PathItem,
    pub path_params: HashMap<String, String>,
}

impl<'a> RouteMatch<'a> {
    /// Case-insensitive method resolution. A path that exists but does not
    /// declare the method is a 405 — distinct from the 404 of an unmatched
    /// path, and load-bearing for clients.
    pub fn operation(&self, method: &str) -> std::result::Result<&'a Operation, MatchingError> {
        self.operations
            .operation(method)
            .ok_or_else(|| MatchingError::method_not_allowed(method))
    }
}
