//! `InterviewGateway` over the `/interviews` routes.

use async_trait::async_trait;

use super::HttpBackendClient;
use crate::domain::foundation::{AuthenticatedUser, InterviewId};
use crate::domain::interview::{Interview, NewInterview};
use crate::ports::{GatewayError, InterviewGateway};

#[async_trait]
impl InterviewGateway for HttpBackendClient {
    async fn list_interviews(
        &self,
        user: &AuthenticatedUser,
    ) -> Result<Vec<Interview>, GatewayError> {
        self.execute(self.get("/interviews", user)).await
    }

    async fn create_interview(
        &self,
        user: &AuthenticatedUser,
        draft: &NewInterview,
    ) -> Result<Interview, GatewayError> {
        let request = self.post("/interviews", user).json(&draft.to_body());
        self.execute(request).await
    }

    async fn get_interview(
        &self,
        user: &AuthenticatedUser,
        id: &InterviewId,
    ) -> Result<Interview, GatewayError> {
        self.execute(self.get(&format!("/interviews/{}", id), user))
            .await
    }
}
