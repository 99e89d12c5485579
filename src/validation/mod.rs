mod parameters;
mod response;

pub use parameters::{check_parameter, check_parameters};
pub use response::{check_body, check_headers, select_response_def};

use thiserror::Error;

/// A contract violation detected while checking a request or a response.
///
/// Request-side instances carry status 400 (the client sent something the
/// specification forbids). Response-side instances carry 500: a handler that
/// breaks its own declared contract is a server fault, even though it is
/// detected late.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct ValidationError {
    pub message: String,
    pub status: u16,
}

impl ValidationError {
    /// A client-attributable violation (missing/malformed request parameter)
    pub fn request(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            status: 400,
        }
    }

    /// A server-attributable violation (response body/headers off-contract)
    pub fn response(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            status: 500,
        }
    }
}

/// A routing or dispatch failure: the exchange could not be mapped onto an
/// operation of the specification.
///
/// 404 when no path template matches, 405 when the path exists but the method
/// is not declared for it, 500 when the specification itself is defective
/// (unsupported parameter location, emitted status with no matching or
/// default response definition).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct MatchingError {
    pub message: String,
    pub status: u16,
}

impl MatchingError {
    pub fn not_found(path: &str) -> Self {
        Self {
            message: format!("{} not found", path),
            status: 404,
        }
    }

    pub fn method_not_allowed(method: &str) -> Self {
        Self {
            message: format!("{} unsupported", method),
            status: 405,
        }
    }

    /// A specification-authoring defect surfaced at request time
    pub fn contract(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            status: 500,
        }
    }
}

/// The single failure type crossing the middleware boundary. The host turns
/// it into a terminated exchange with `status()` and `message()`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ContractFailure {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Matching(#[from] MatchingError),
}

impl ContractFailure {
    pub fn status(&self) -> u16 {
        match self {
            ContractFailure::Validation(e) => e.status,
            ContractFailure::Matching(e) => e.status,
        }
    }

    pub fn message(&self) -> &str {
        match self {
            ContractFailure::Validation(e) => &e.message,
            ContractFailure::Matching(e) => &e.message,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_defaults() {
        assert_eq!(ValidationError::request("x").status, 400);
        assert_eq!(ValidationError::response("x").status, 500);
        assert_eq!(MatchingError::not_found("/x").status, 404);
        assert_eq!(MatchingError::method_not_allowed("TRACE").status, 405);
        assert_eq!(MatchingError::contract("bad spec").status, 500);
    }

    #[test]
    fn test_contract_failure_carries_status_and_message() {
        let failure: ContractFailure = ValidationError::request("thing is required").into();
        assert_eq!(failure.status(), 400);
        assert_eq!(failure.message(), "thing is required");
    }
}
