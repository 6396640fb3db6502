//! `SetupAssistantGateway` over the `/workflow` routes.

use async_trait::async_trait;
use serde::Serialize;

use super::HttpBackendClient;
use crate::domain::foundation::{AuthenticatedUser, SetupSessionId};
use crate::ports::{
    AssistantTurn, FinalizeRequest, FinalizeResponse, GatewayError, SessionSummary,
    SetupAssistantGateway, StartedSession,
};

#[derive(Debug, Serialize)]
struct MessageBody<'a> {
    text: &'a str,
}

#[async_trait]
impl SetupAssistantGateway for HttpBackendClient {
    async fn start_session(&self, user: &AuthenticatedUser) -> Result<StartedSession, GatewayError> {
        self.execute(self.post("/workflow/start", user)).await
    }

    async fn send_message(
        &self,
        user: &AuthenticatedUser,
        session_id: &SetupSessionId,
        text: &str,
    ) -> Result<AssistantTurn, GatewayError> {
        let request = self
            .post(&format!("/workflow/{}/message", session_id), user)
            .json(&MessageBody { text });
        self.execute(request).await
    }

    async fn finalize_session(
        &self,
        user: &AuthenticatedUser,
        session_id: &SetupSessionId,
        request: &FinalizeRequest,
    ) -> Result<FinalizeResponse, GatewayError> {
        let request = self
            .post(&format!("/workflow/{}/finalize", session_id), user)
            .json(&request.to_body());
        self.execute(request).await
    }

    async fn session_summary(
        &self,
        user: &AuthenticatedUser,
        session_id: &SetupSessionId,
    ) -> Result<SessionSummary, GatewayError> {
        self.execute(self.get(&format!("/workflow/{}/summary", session_id), user))
            .await
    }
}
