//! Transport-level failures shared by every remote gateway.

use std::time::Duration;
use thiserror::Error;

use crate::domain::foundation::{DomainError, ErrorCode};

/// Errors a gateway can report for a single remote call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GatewayError {
    /// No response within the configured bound.
    #[error("request timed out after {timeout:?}")]
    Timeout {
        /// Configured timeout.
        timeout: Duration,
    },

    /// Connection refused, DNS failure, reset, and similar.
    #[error("network error: {0}")]
    Network(String),

    /// Credentials missing or rejected (401/403).
    #[error("unauthorized")]
    Unauthorized,

    /// The addressed resource does not exist (404).
    #[error("not found")]
    NotFound,

    /// Any other non-success status.
    #[error("server returned {status}: {body}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Response body, possibly empty.
        body: String,
    },

    /// The response arrived but could not be decoded.
    #[error("invalid response: {0}")]
    Decode(String),
}

impl GatewayError {
    /// Creates a timeout error for the given bound.
    pub fn timed_out(timeout: Duration) -> Self {
        Self::Timeout { timeout }
    }

    /// Creates a network error.
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network(message.into())
    }

    /// Creates a decode error.
    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode(message.into())
    }

    /// Returns true for failures that mean the backend could not be reached.
    pub fn is_connectivity(&self) -> bool {
        matches!(self, GatewayError::Timeout { .. } | GatewayError::Network(_))
    }
}

impl From<GatewayError> for DomainError {
    fn from(err: GatewayError) -> Self {
        let code = match &err {
            GatewayError::Timeout { .. } | GatewayError::Network(_) => ErrorCode::Connectivity,
            GatewayError::Unauthorized => ErrorCode::Unauthenticated,
            GatewayError::NotFound => ErrorCode::NotFound,
            GatewayError::Status { .. } | GatewayError::Decode(_) => ErrorCode::ServerError,
        };
        let error = DomainError::new(code, err.to_string());
        match &err {
            GatewayError::Status { status, .. } => error.with_detail("status", status.to_string()),
            _ => error,
        }
    }
}
