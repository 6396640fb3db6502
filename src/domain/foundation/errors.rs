//! Error types for the domain layer.

use std::collections::HashMap;
use std::error::Error;
use std::fmt;
use thiserror::Error;

/// Errors that occur during value object construction and precondition checks.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Field '{field}' cannot be empty")]
    EmptyField { field: String },

    #[error("Field '{field}' must be at most {max} characters, got {actual}")]
    TooLong {
        field: String,
        max: usize,
        actual: usize,
    },

    #[error("Field '{field}' has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    #[error("Interview setup is not ready: missing {}", .missing.join(", "))]
    NotReady { missing: Vec<String> },
}

impl ValidationError {
    /// Creates an empty field validation error.
    pub fn empty_field(field: impl Into<String>) -> Self {
        ValidationError::EmptyField { field: field.into() }
    }

    /// Creates a too-long validation error.
    pub fn too_long(field: impl Into<String>, max: usize, actual: usize) -> Self {
        ValidationError::TooLong {
            field: field.into(),
            max,
            actual,
        }
    }

    /// Creates an invalid format validation error.
    pub fn invalid_format(field: impl Into<String>, reason: impl Into<String>) -> Self {
        ValidationError::InvalidFormat {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Creates a not-ready error listing the parameters still missing.
    pub fn not_ready<S: Into<String>>(missing: impl IntoIterator<Item = S>) -> Self {
        ValidationError::NotReady {
            missing: missing.into_iter().map(Into::into).collect(),
        }
    }
}

/// Error codes, one per failure class callers can react to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    /// Timeout, transport failure or unreachable host.
    Connectivity,
    /// No authenticated user, or the backend rejected the credentials.
    Unauthenticated,
    /// Precondition failed locally; no network call was made.
    ValidationFailed,
    /// Malformed or incomplete response, or a backend error status.
    ServerError,
    /// The requested record does not exist.
    NotFound,
    /// Operation not permitted in the current lifecycle phase.
    InvalidStateTransition,
    /// The owner was cancelled; late results were discarded.
    Cancelled,
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ErrorCode::Connectivity => "CONNECTIVITY",
            ErrorCode::Unauthenticated => "UNAUTHENTICATED",
            ErrorCode::ValidationFailed => "VALIDATION_FAILED",
            ErrorCode::ServerError => "SERVER_ERROR",
            ErrorCode::NotFound => "NOT_FOUND",
            ErrorCode::InvalidStateTransition => "INVALID_STATE_TRANSITION",
            ErrorCode::Cancelled => "CANCELLED",
        };
        write!(f, "{}", s)
    }
}

/// Standard domain error with code, message, and optional details.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomainError {
    pub code: ErrorCode,
    pub message: String,
    pub details: HashMap<String, String>,
}

impl DomainError {
    /// Creates a new domain error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: HashMap::new(),
        }
    }

    pub fn connectivity(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Connectivity, message)
    }

    pub fn server(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ServerError, message)
    }

    pub fn cancelled() -> Self {
        Self::new(ErrorCode::Cancelled, "Operation cancelled")
    }

    /// Creates an invalid state transition error naming the current phase.
    pub fn invalid_state(operation: &str, phase: impl fmt::Display) -> Self {
        Self::new(
            ErrorCode::InvalidStateTransition,
            format!("Cannot {} while session is {}", operation, phase),
        )
        .with_detail("phase", phase.to_string())
    }

    /// Adds a detail to the error.
    pub fn with_detail(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.details.insert(key.into(), value.into());
        self
    }

    /// Returns true if this is a connectivity-class failure.
    pub fn is_connectivity(&self) -> bool {
        self.code == ErrorCode::Connectivity
    }
}

impl From<ValidationError> for DomainError {
    fn from(err: ValidationError) -> Self {
        let field = match &err {
            ValidationError::EmptyField { field }
            | ValidationError::TooLong { field, .. }
            | ValidationError::InvalidFormat { field, .. } => Some(field.clone()),
            ValidationError::NotReady { .. } => None,
        };
        let error = Self::new(ErrorCode::ValidationFailed, err.to_string());
        match field {
            Some(field) => error.with_detail("field", field),
            None => error,
        }
    }
}

impl fmt::Display for DomainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

impl Error for DomainError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_error_empty_field_displays_correctly() {
        let err = ValidationError::empty_field("text");
        assert_eq!(format!("{}", err), "Field 'text' cannot be empty");
    }

    #[test]
    fn validation_error_too_long_displays_correctly() {
        let err = ValidationError::too_long("jobTitle", 200, 201);
        assert_eq!(
            format!("{}", err),
            "Field 'jobTitle' must be at most 200 characters, got 201"
        );
    }

    #[test]
    fn validation_error_not_ready_lists_missing_fields() {
        let err = ValidationError::not_ready(["type", "level"]);
        assert_eq!(
            format!("{}", err),
            "Interview setup is not ready: missing type, level"
        );
    }

    #[test]
    fn domain_error_displays_code_and_message() {
        let err = DomainError::connectivity("request timed out after 8s");
        assert_eq!(format!("{}", err), "[CONNECTIVITY] request timed out after 8s");
        assert!(err.is_connectivity());
    }

    #[test]
    fn domain_error_from_validation_keeps_field() {
        let err: DomainError = ValidationError::empty_field("jobTitle").into();
        assert_eq!(err.code, ErrorCode::ValidationFailed);
        assert_eq!(err.details.get("field"), Some(&"jobTitle".to_string()));
    }

    #[test]
    fn invalid_state_records_phase() {
        let err = DomainError::invalid_state("send a message", "Uninitialized");
        assert_eq!(err.code, ErrorCode::InvalidStateTransition);
        assert_eq!(err.message, "Cannot send a message while session is Uninitialized");
        assert_eq!(err.details.get("phase"), Some(&"Uninitialized".to_string()));
    }

    #[test]
    fn error_code_display_formats_correctly() {
        assert_eq!(format!("{}", ErrorCode::NotFound), "NOT_FOUND");
        assert_eq!(format!("{}", ErrorCode::Cancelled), "CANCELLED");
    }
}
