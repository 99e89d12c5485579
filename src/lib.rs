//! # swagger-guard
//!
//! Request/response contract enforcement driven by an OpenAPI 2.0 ("Swagger")
//! document: routes incoming exchanges to operation definitions, validates
//! and coerces parameters against JSON Schema, and validates the response the
//! handler produced against the same specification.
//!
//! The HTTP transport, the routing engine (`matchit`) and the JSON-Schema
//! engine (injectable, `jsonschema` by default) are collaborators, not part
//! of this crate's surface.

pub mod context;
pub mod error;
pub mod loader;
pub mod middleware;
pub mod models;
pub mod router;
pub mod schema;
pub mod validation;

pub use context::{Request, Response};
pub use error::{GuardError, Result};
pub use loader::{load_swagger, parse_swagger};
pub use middleware::{CheckedRequest, ValidationMiddleware};
pub use models::swagger::SwaggerSpec;
pub use router::RouteIndex;
pub use schema::SchemaValidator;
pub use validation::{ContractFailure, MatchingError, ValidationError};
