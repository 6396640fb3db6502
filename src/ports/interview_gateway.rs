//! Interview Gateway Port - remote access to the user's interview records.
//!
//! Implementations talk to the interview backend (HTTP in production, an
//! in-memory double in tests). Each method is a single attempt; bounding it
//! with a timeout is the caller's job.

use async_trait::async_trait;

use super::GatewayError;
use crate::domain::foundation::{AuthenticatedUser, InterviewId};
use crate::domain::interview::{Interview, NewInterview};

/// Port for reading and creating interview records.
#[async_trait]
pub trait InterviewGateway: Send + Sync {
    /// Lists the interviews belonging to `user`, in the order the backend returns them.
    async fn list_interviews(&self, user: &AuthenticatedUser)
        -> Result<Vec<Interview>, GatewayError>;

    /// Creates an interview and returns the stored record.
    async fn create_interview(
        &self,
        user: &AuthenticatedUser,
        draft: &NewInterview,
    ) -> Result<Interview, GatewayError>;

    /// Fetches one interview. Returns `GatewayError::NotFound` for unknown ids.
    async fn get_interview(
        &self,
        user: &AuthenticatedUser,
        id: &InterviewId,
    ) -> Result<Interview, GatewayError>;
}
