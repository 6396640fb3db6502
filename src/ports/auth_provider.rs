//! Current user port.
//!
//! Authentication itself happens elsewhere. The orchestrator only asks who
//! is signed in right now, before every remote call, so a sign-out between
//! calls is noticed on the next one.

use async_trait::async_trait;

use crate::domain::foundation::{AuthError, AuthenticatedUser};

/// Supplies the currently signed-in user.
///
/// # Contract
///
/// Implementations must:
/// - Return the user (and bearer token, if any) when someone is signed in
/// - Return `AuthError::NotSignedIn` when nobody is
/// - Return `AuthError::ServiceUnavailable` for transient provider errors
#[async_trait]
pub trait CurrentUserProvider: Send + Sync {
    async fn current_user(&self) -> Result<AuthenticatedUser, AuthError>;
}
