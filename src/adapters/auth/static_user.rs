//! Current-user provider backed by a value held in memory.
//!
//! Hosts that manage sign-in themselves push the signed-in user here; tests
//! use it to simulate sign-out between calls.
//!
//! # Example
//!
//! ```ignore
//! let provider = StaticUserProvider::signed_in(
//!     AuthenticatedUser::new(UserId::new("user-123")?).with_token(id_token),
//! );
//! provider.sign_out();
//! ```

use std::sync::{PoisonError, RwLock};

use async_trait::async_trait;

use crate::domain::foundation::{AuthError, AuthenticatedUser};
use crate::ports::CurrentUserProvider;

#[derive(Debug, Default)]
pub struct StaticUserProvider {
    user: RwLock<Option<AuthenticatedUser>>,
    force_error: RwLock<Option<AuthError>>,
}

impl StaticUserProvider {
    pub fn signed_in(user: AuthenticatedUser) -> Self {
        Self {
            user: RwLock::new(Some(user)),
            force_error: RwLock::new(None),
        }
    }

    pub fn signed_out() -> Self {
        Self::default()
    }

    /// Forces every lookup to fail with `error`.
    pub fn with_error(self, error: AuthError) -> Self {
        *self.force_error.write().unwrap_or_else(PoisonError::into_inner) = Some(error);
        self
    }

    pub fn sign_in(&self, user: AuthenticatedUser) {
        *self.user.write().unwrap_or_else(PoisonError::into_inner) = Some(user);
    }

    pub fn sign_out(&self) {
        *self.user.write().unwrap_or_else(PoisonError::into_inner) = None;
    }
}

#[async_trait]
impl CurrentUserProvider for StaticUserProvider {
    async fn current_user(&self) -> Result<AuthenticatedUser, AuthError> {
        if let Some(error) = self
            .force_error
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
        {
            return Err(error);
        }

        self.user
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
            .ok_or(AuthError::NotSignedIn)
    }
}
