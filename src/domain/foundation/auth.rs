//! Authentication types for the domain layer.
//!
//! The orchestrator never authenticates anyone itself. An external provider
//! hands over the signed-in user's id and, optionally, a bearer token for the
//! backend.

use secrecy::{ExposeSecret, Secret};
use thiserror::Error;

use super::{DomainError, ErrorCode, UserId};

/// The currently signed-in user.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    /// The unique user identifier from the auth provider.
    pub id: UserId,

    /// Bearer token sent to the backend, when the provider issues one.
    id_token: Option<Secret<String>>,
}

impl AuthenticatedUser {
    pub fn new(id: UserId) -> Self {
        Self { id, id_token: None }
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.id_token = Some(Secret::new(token.into()));
        self
    }

    /// Exposes the bearer token (for building request headers only).
    pub fn bearer_token(&self) -> Option<&str> {
        self.id_token.as_ref().map(|t| t.expose_secret().as_str())
    }
}

/// Authentication errors surfaced by the user provider.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    /// Nobody is signed in.
    #[error("No authenticated user")]
    NotSignedIn,

    /// The authentication service is unavailable (network, config, etc.).
    #[error("Auth service unavailable: {0}")]
    ServiceUnavailable(String),
}

impl AuthError {
    /// Creates a service unavailable error with a message.
    pub fn service_unavailable(message: impl Into<String>) -> Self {
        Self::ServiceUnavailable(message.into())
    }
}

impl From<AuthError> for DomainError {
    fn from(err: AuthError) -> Self {
        DomainError::new(ErrorCode::Unauthenticated, err.to_string())
    }
}
