//! Scripted setup assistant.
//!
//! Replies are queued per operation and consumed in order. Each queued reply
//! may carry its own latency, which is how tests make a later reply arrive
//! before an earlier one. An unscripted call fails with a 501 status.

use async_trait::async_trait;
use serde_json::Value;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tokio::time::sleep;

use crate::domain::foundation::{AuthenticatedUser, SetupSessionId};
use crate::domain::setup::SetupSnapshot;
use crate::ports::{
    AssistantTurn, FinalizeRequest, FinalizeResponse, GatewayError, SessionSummary,
    SetupAssistantGateway, StartedSession,
};

/// A call recorded by [`ScriptedSetupGateway`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SetupCall {
    Start,
    Message { session_id: String, text: String },
    Finalize { session_id: String, request: FinalizeRequest },
    Summary { session_id: String },
}

#[derive(Debug, Clone)]
struct Scripted<T> {
    outcome: Result<T, GatewayError>,
    delay: Duration,
}

#[derive(Debug, Default)]
struct Script {
    starts: VecDeque<Scripted<StartedSession>>,
    turns: VecDeque<Scripted<AssistantTurn>>,
    finalizes: VecDeque<Scripted<FinalizeResponse>>,
    summaries: VecDeque<Scripted<SessionSummary>>,
    calls: Vec<SetupCall>,
}

/// Scriptable implementation of [`SetupAssistantGateway`].
#[derive(Debug, Clone, Default)]
pub struct ScriptedSetupGateway {
    script: Arc<Mutex<Script>>,
}

impl ScriptedSetupGateway {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a successful start.
    pub fn with_start(
        self,
        session_id: impl Into<String>,
        greeting: Option<&str>,
        snapshot: Value,
    ) -> Self {
        let started = StartedSession {
            session_id: session_id.into(),
            ai_response: greeting.map(str::to_string),
            session_state: SetupSnapshot::from_value(snapshot),
            phase: None,
        };
        self.push(|s| &mut s.starts, Ok(started), Duration::ZERO)
    }

    pub fn with_start_error(self, error: GatewayError) -> Self {
        self.push(|s| &mut s.starts, Err(error), Duration::ZERO)
    }

    /// Queues an assistant turn.
    pub fn with_turn(self, reply: &str, snapshot: Value) -> Self {
        self.with_turn_delayed(reply, snapshot, Duration::ZERO)
    }

    /// Queues an assistant turn that takes `delay` to arrive.
    pub fn with_turn_delayed(self, reply: &str, snapshot: Value, delay: Duration) -> Self {
        let turn = AssistantTurn {
            ai_response: Some(reply.to_string()),
            session_state: SetupSnapshot::from_value(snapshot),
            phase: None,
        };
        self.push(|s| &mut s.turns, Ok(turn), delay)
    }

    /// Queues a fully specified turn.
    pub fn with_assistant_turn(self, turn: AssistantTurn, delay: Duration) -> Self {
        self.push(|s| &mut s.turns, Ok(turn), delay)
    }

    pub fn with_turn_error(self, error: GatewayError) -> Self {
        self.push(|s| &mut s.turns, Err(error), Duration::ZERO)
    }

    /// Queues a finalize response.
    pub fn with_finalize(self, interview: Option<Value>, start: Value) -> Self {
        self.with_finalize_delayed(interview, start, Duration::ZERO)
    }

    pub fn with_finalize_delayed(self, interview: Option<Value>, start: Value, delay: Duration) -> Self {
        let response = FinalizeResponse { interview, start };
        self.push(|s| &mut s.finalizes, Ok(response), delay)
    }

    pub fn with_finalize_error(self, error: GatewayError) -> Self {
        self.push(|s| &mut s.finalizes, Err(error), Duration::ZERO)
    }

    pub fn with_summary(self, summary: SessionSummary) -> Self {
        self.push(|s| &mut s.summaries, Ok(summary), Duration::ZERO)
    }

    pub fn calls(&self) -> Vec<SetupCall> {
        self.lock().calls.clone()
    }

    pub fn call_count(&self) -> usize {
        self.lock().calls.len()
    }

    /// Texts of every message call, in the order they reached the gateway.
    pub fn sent_messages(&self) -> Vec<String> {
        self.lock()
            .calls
            .iter()
            .filter_map(|c| match c {
                SetupCall::Message { text, .. } => Some(text.clone()),
                _ => None,
            })
            .collect()
    }

    fn lock(&self) -> MutexGuard<'_, Script> {
        self.script.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn push<T>(
        self,
        queue: impl FnOnce(&mut Script) -> &mut VecDeque<Scripted<T>>,
        outcome: Result<T, GatewayError>,
        delay: Duration,
    ) -> Self {
        queue(&mut self.lock()).push_back(Scripted { outcome, delay });
        self
    }

    async fn next<T>(
        &self,
        call: SetupCall,
        queue: impl FnOnce(&mut Script) -> &mut VecDeque<Scripted<T>>,
    ) -> Result<T, GatewayError> {
        let scripted = {
            let mut script = self.lock();
            script.calls.push(call);
            queue(&mut script).pop_front()
        };

        match scripted {
            Some(Scripted { outcome, delay }) => {
                if !delay.is_zero() {
                    sleep(delay).await;
                }
                outcome
            }
            None => Err(GatewayError::Status {
                status: 501,
                body: "no scripted response".to_string(),
            }),
        }
    }
}

#[async_trait]
impl SetupAssistantGateway for ScriptedSetupGateway {
    async fn start_session(&self, _user: &AuthenticatedUser) -> Result<StartedSession, GatewayError> {
        self.next(SetupCall::Start, |s| &mut s.starts).await
    }

    async fn send_message(
        &self,
        _user: &AuthenticatedUser,
        session_id: &SetupSessionId,
        text: &str,
    ) -> Result<AssistantTurn, GatewayError> {
        let call = SetupCall::Message {
            session_id: session_id.to_string(),
            text: text.to_string(),
        };
        self.next(call, |s| &mut s.turns).await
    }

    async fn finalize_session(
        &self,
        _user: &AuthenticatedUser,
        session_id: &SetupSessionId,
        request: &FinalizeRequest,
    ) -> Result<FinalizeResponse, GatewayError> {
        let call = SetupCall::Finalize {
            session_id: session_id.to_string(),
            request: request.clone(),
        };
        self.next(call, |s| &mut s.finalizes).await
    }

    async fn session_summary(
        &self,
        _user: &AuthenticatedUser,
        session_id: &SetupSessionId,
    ) -> Result<SessionSummary, GatewayError> {
        let call = SetupCall::Summary {
            session_id: session_id.to_string(),
        };
        self.next(call, |s| &mut s.summaries).await
    }
}
