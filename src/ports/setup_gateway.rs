//! Setup Assistant Gateway Port - the remote side of the guided setup conversation.
//!
//! The assistant owns the conversation logic and the snapshot of collected
//! parameters. The client only relays user text and applies what comes back.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::GatewayError;
use crate::domain::foundation::{AuthenticatedUser, SetupSessionId, Timestamp};
use crate::domain::setup::SetupSnapshot;

/// Port for the remote setup assistant.
#[async_trait]
pub trait SetupAssistantGateway: Send + Sync {
    /// Opens a new session.
    async fn start_session(&self, user: &AuthenticatedUser) -> Result<StartedSession, GatewayError>;

    /// Relays one user message and returns the assistant's turn.
    async fn send_message(
        &self,
        user: &AuthenticatedUser,
        session_id: &SetupSessionId,
        text: &str,
    ) -> Result<AssistantTurn, GatewayError>;

    /// Turns the collected parameters into an interview and starts it.
    async fn finalize_session(
        &self,
        user: &AuthenticatedUser,
        session_id: &SetupSessionId,
        request: &FinalizeRequest,
    ) -> Result<FinalizeResponse, GatewayError>;

    /// Returns what the assistant has collected so far.
    async fn session_summary(
        &self,
        user: &AuthenticatedUser,
        session_id: &SetupSessionId,
    ) -> Result<SessionSummary, GatewayError>;
}

/// Response to starting a session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StartedSession {
    #[serde(rename = "sessionId")]
    pub session_id: String,
    #[serde(default)]
    pub ai_response: Option<String>,
    #[serde(default)]
    pub session_state: SetupSnapshot,
    #[serde(default)]
    pub phase: Option<String>,
}

/// One assistant turn.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssistantTurn {
    #[serde(default)]
    pub ai_response: Option<String>,
    #[serde(default)]
    pub session_state: SetupSnapshot,
    #[serde(default)]
    pub phase: Option<String>,
}

/// Parameters for finalizing a session. `auto_start` is always sent as true.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FinalizeRequest {
    pub company_name: Option<String>,
    pub interview_date: Option<Timestamp>,
}

impl FinalizeRequest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_company(mut self, company_name: impl Into<String>) -> Self {
        self.company_name = Some(company_name.into());
        self
    }

    /// Sets the date; any time zone is converted to the absolute UTC instant.
    pub fn with_interview_date<Tz: chrono::TimeZone>(mut self, date: chrono::DateTime<Tz>) -> Self {
        self.interview_date = Some(Timestamp::from_zoned(&date));
        self
    }

    /// Request body for the finalize endpoint.
    pub fn to_body(&self) -> FinalizeBody<'_> {
        FinalizeBody {
            company_name: self.company_name.as_deref(),
            interview_date: self.interview_date.map(|d| d.to_iso()),
            auto_start: true,
        }
    }
}

/// JSON body posted to finalize a session.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FinalizeBody<'a> {
    pub company_name: Option<&'a str>,
    pub interview_date: Option<String>,
    pub auto_start: bool,
}

/// Raw finalize response. The interview is parsed by the caller so that a
/// missing or malformed record is reported as a server failure.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FinalizeResponse {
    #[serde(default)]
    pub interview: Option<Value>,
    /// Start payload for the launcher, passed on verbatim.
    #[serde(default)]
    pub start: Value,
}

/// Everything the assistant has collected for a session.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionSummary {
    #[serde(default)]
    pub session_id: Option<String>,
    #[serde(default)]
    pub preferences: SetupSnapshot,
    #[serde(default)]
    pub questions: Vec<Value>,
    #[serde(default)]
    pub answers: Vec<String>,
    #[serde(default)]
    pub feedback: Vec<String>,
}
