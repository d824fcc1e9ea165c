//! Provider error classification
//!
//! Typed errors derived from the HTTP status and the provider's error code,
//! instead of string matching on whole error chains. The one exception is
//! the subnet-association conflict, which the provider only signals through
//! its message text.

use thiserror::Error;

/// Provider error categories the sweep reacts to
#[derive(Debug, Error)]
pub enum ApiError {
    /// Resource does not exist (or the caller cannot see it)
    #[error("Resource not found: {message}")]
    NotFound { message: String },

    /// Resource is in a state that rejects the operation
    #[error("Conflicting resource state: {message}")]
    Conflict { message: String },

    /// Rate limit exceeded
    #[error("Rate limit exceeded")]
    Throttled,

    /// Any other provider error with status, code and message
    #[error("API error ({status} {code:?}): {message}")]
    Api {
        status: u16,
        code: Option<String>,
        message: String,
    },
}

/// Error codes the provider uses for missing resources.
///
/// A 404 carries `NotAuthorizedOrNotFound` so that existence is not leaked
/// to unauthorized callers; both spellings occur across services.
const NOT_FOUND_CODES: &[&str] = &["NotAuthorizedOrNotFound", "NotFound"];

/// Error codes for state conflicts (resource busy, still referenced, ...)
const CONFLICT_CODES: &[&str] = &["Conflict", "IncorrectState"];

/// Marker text in the conflict raised when a route table is still associated
/// with a subnet. The provider has no dedicated code for this case.
const SUBNET_ASSOCIATION_MARKER: &str = "associated with Subnet";

impl ApiError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, ApiError::NotFound { .. })
    }

    pub fn is_conflict(&self) -> bool {
        matches!(self, ApiError::Conflict { .. })
    }

    /// Whether this is the route-table/subnet association conflict that has
    /// a scripted remediation in the sweep.
    pub fn is_subnet_association(&self) -> bool {
        match self {
            ApiError::Conflict { message } | ApiError::Api { message, .. } => {
                message.contains(SUBNET_ASSOCIATION_MARKER)
            }
            _ => false,
        }
    }
}

/// Classify a provider error response by status, code and message.
pub fn classify_response(status: u16, code: Option<&str>, message: Option<&str>) -> ApiError {
    let message = message.unwrap_or("Unknown error").to_string();

    match (status, code) {
        (404, _) => ApiError::NotFound { message },
        (_, Some(c)) if NOT_FOUND_CODES.contains(&c) => ApiError::NotFound { message },
        (409, _) => ApiError::Conflict { message },
        (_, Some(c)) if CONFLICT_CODES.contains(&c) => ApiError::Conflict { message },
        (429, _) => ApiError::Throttled,
        _ => ApiError::Api {
            status,
            code: code.map(|s| s.to_string()),
            message,
        },
    }
}

/// Check whether an error chain bottoms out in a "not found" response.
pub fn error_is_not_found(error: &anyhow::Error) -> bool {
    error
        .chain()
        .any(|cause| matches!(cause.downcast_ref::<ApiError>(), Some(e) if e.is_not_found()))
}

/// Check whether an error chain is the subnet-association conflict.
pub fn error_is_subnet_association(error: &anyhow::Error) -> bool {
    error.chain().any(
        |cause| matches!(cause.downcast_ref::<ApiError>(), Some(e) if e.is_subnet_association()),
    )
}
