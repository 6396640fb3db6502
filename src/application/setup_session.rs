//! Setup Session - drives one guided setup conversation to a launched interview.
//!
//! Operations on a session run one at a time, in call order. The user's
//! message is visible in the transcript before the assistant answers, and
//! replies are applied in the order their messages were sent.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{watch, Mutex};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use super::remote::bounded;
use crate::config::AppConfig;
use crate::domain::foundation::{AuthenticatedUser, DomainError, SetupSessionId, ValidationError};
use crate::domain::interview::Interview;
use crate::domain::setup::{Readiness, SetupConversation, SetupPhase};
use crate::ports::{
    CurrentUserProvider, FinalizeRequest, GatewayError, Handoff, InterviewLauncher,
    SessionSummary, SetupAssistantGateway,
};

/// Per-call timeouts for a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SetupSessionConfig {
    /// Start and send-message.
    pub conversation_timeout: Duration,
    /// Finalize and summary.
    pub request_timeout: Duration,
}

impl From<&AppConfig> for SetupSessionConfig {
    fn from(config: &AppConfig) -> Self {
        Self {
            conversation_timeout: config.api.conversation_timeout(),
            request_timeout: config.api.request_timeout(),
        }
    }
}

impl Default for SetupSessionConfig {
    fn default() -> Self {
        Self::from(&AppConfig::default())
    }
}

/// One guided setup conversation.
pub struct SetupSession {
    gateway: Arc<dyn SetupAssistantGateway>,
    users: Arc<dyn CurrentUserProvider>,
    launcher: Arc<dyn InterviewLauncher>,
    config: SetupSessionConfig,
    state: watch::Sender<SetupConversation>,
    /// Held for the whole of every mutating operation; tokio's mutex is FIFO.
    turn: Mutex<()>,
    cancel: CancellationToken,
}

impl SetupSession {
    pub fn new(
        gateway: Arc<dyn SetupAssistantGateway>,
        users: Arc<dyn CurrentUserProvider>,
        launcher: Arc<dyn InterviewLauncher>,
        config: SetupSessionConfig,
    ) -> Self {
        let (state, _) = watch::channel(SetupConversation::new());
        Self {
            gateway,
            users,
            launcher,
            config,
            state,
            turn: Mutex::new(()),
            cancel: CancellationToken::new(),
        }
    }

    /// Latest conversation state.
    pub fn state(&self) -> SetupConversation {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<SetupConversation> {
        self.state.subscribe()
    }

    pub fn phase(&self) -> SetupPhase {
        self.state.borrow().phase
    }

    pub fn session_id(&self) -> Option<SetupSessionId> {
        self.state.borrow().session_id.clone()
    }

    /// Readiness of the latest snapshot.
    pub fn readiness(&self) -> Readiness {
        self.state.borrow().readiness()
    }

    pub fn is_ready(&self) -> bool {
        self.readiness().is_ready()
    }

    /// Opens the session. Uninitialized -> Active.
    ///
    /// On failure the session stays Uninitialized and may be started again.
    pub async fn start(&self) -> Result<(), DomainError> {
        self.ensure_active()?;
        let _turn = self.turn.lock().await;
        self.ensure_active()?;

        let phase = self.phase();
        if phase != SetupPhase::Uninitialized {
            return Err(self.record_error(DomainError::invalid_state("start", phase)));
        }

        let user = self.current_user().await?;
        let started = match bounded(
            &self.cancel,
            self.config.conversation_timeout,
            self.gateway.start_session(&user),
        )
        .await
        {
            None => return Err(self.discarded()),
            Some(Ok(started)) => started,
            Some(Err(e)) => return Err(self.record_error(e.into())),
        };

        let session_id = SetupSessionId::new(started.session_id).map_err(|_| {
            self.record_error(DomainError::server("Assistant returned an empty session id"))
        })?;

        info!(session_id = %session_id, "Setup session started");
        self.update(|conversation| {
            conversation.activate(
                session_id,
                started.ai_response,
                started.session_state,
                started.phase,
            )
        })
    }

    /// Sends one user message and applies the assistant's reply.
    ///
    /// Blank text is rejected before anything else happens. Returns the
    /// assistant's reply, if it sent one.
    pub async fn send_message(&self, text: &str) -> Result<Option<String>, DomainError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(self.record_error(ValidationError::empty_field("text").into()));
        }
        self.ensure_active()?;

        let _turn = self.turn.lock().await;
        self.ensure_active()?;

        let (phase, session_id) = {
            let conversation = self.state.borrow();
            (conversation.phase, conversation.session_id.clone())
        };
        let session_id = match session_id {
            Some(id) if phase.accepts_messages() => id,
            _ => return Err(self.record_error(DomainError::invalid_state("send a message", phase))),
        };

        self.update(|conversation| conversation.record_user_message(text))?;
        debug!(session_id = %session_id, "User message appended");

        let user = self.current_user().await?;
        let turn = match bounded(
            &self.cancel,
            self.config.conversation_timeout,
            self.gateway.send_message(&user, &session_id, text),
        )
        .await
        {
            None => return Err(self.discarded()),
            Some(Ok(turn)) => turn,
            Some(Err(e)) => return Err(self.record_error(e.into())),
        };

        let reply = turn.ai_response.filter(|r| !r.trim().is_empty());
        self.update(|conversation| {
            conversation.apply_turn(
                reply.clone().unwrap_or_default(),
                turn.session_state,
                turn.phase,
            );
            Ok(())
        })?;

        let readiness = self.readiness();
        debug!(
            session_id = %session_id,
            ready = readiness.is_ready(),
            missing = readiness.missing().len(),
            "Assistant turn applied"
        );
        Ok(reply)
    }

    /// Finalizes the session and hands the interview to the launcher.
    ///
    /// Requires an Active session whose snapshot is ready; otherwise nothing
    /// is sent. A failed call (unreachable backend, error status) returns the
    /// session to Active so the caller can retry. A response without a
    /// usable interview fails the session for good.
    pub async fn finalize(&self, request: FinalizeRequest) -> Result<Interview, DomainError> {
        self.ensure_active()?;
        let _turn = self.turn.lock().await;
        self.ensure_active()?;

        let (phase, session_id, readiness) = {
            let conversation = self.state.borrow();
            (
                conversation.phase,
                conversation.session_id.clone(),
                conversation.readiness(),
            )
        };
        let session_id = match session_id {
            Some(id) if phase == SetupPhase::Active => id,
            _ => return Err(self.record_error(DomainError::invalid_state("finalize", phase))),
        };
        readiness
            .require()
            .map_err(|e| self.record_error(e.into()))?;

        self.update(|conversation| conversation.transition(SetupPhase::Finalizing))?;
        info!(session_id = %session_id, "Finalizing setup session");

        let user = match self.current_user().await {
            Ok(user) => user,
            Err(e) => {
                self.update(|conversation| conversation.transition(SetupPhase::Active))?;
                return Err(e);
            }
        };

        let outcome = bounded(
            &self.cancel,
            self.config.request_timeout,
            self.gateway.finalize_session(&user, &session_id, &request),
        )
        .await;

        let response = match outcome {
            None => return Err(self.discarded()),
            Some(Ok(response)) => response,
            Some(Err(GatewayError::Decode(reason))) => {
                return Err(self.fail(DomainError::server(format!(
                    "Invalid finalize response: {}",
                    reason
                ))));
            }
            Some(Err(e)) => {
                warn!(session_id = %session_id, error = %e, "Finalize failed; session returned to Active");
                self.update(|conversation| conversation.transition(SetupPhase::Active))?;
                return Err(self.record_error(e.into()));
            }
        };

        let interview = match response.interview.map(Interview::from_json) {
            None => {
                return Err(self.fail(DomainError::server(
                    "Finalize response did not include an interview",
                )));
            }
            Some(Err(e)) => {
                return Err(self.fail(
                    DomainError::server(format!("Finalize returned an invalid interview: {}", e))
                        .with_detail("session_id", session_id.as_str()),
                ));
            }
            Some(Ok(interview)) => interview,
        };

        self.update(|conversation| conversation.transition(SetupPhase::Completed))?;
        info!(session_id = %session_id, interview_id = %interview.id, "Setup session completed");

        let handoff = Handoff {
            interview: interview.clone(),
            start_payload: response.start,
        };
        if let Err(e) = self.launcher.launch(handoff).await {
            return Err(self.record_error(e.with_detail("interview_id", interview.id.as_str())));
        }

        Ok(interview)
    }

    /// What the assistant has collected so far. Requires Active or Completed.
    pub async fn summary(&self) -> Result<SessionSummary, DomainError> {
        self.ensure_active()?;

        let (phase, session_id) = {
            let conversation = self.state.borrow();
            (conversation.phase, conversation.session_id.clone())
        };
        let session_id = match session_id {
            Some(id) if matches!(phase, SetupPhase::Active | SetupPhase::Completed) => id,
            _ => {
                return Err(self.record_error(DomainError::invalid_state("fetch the summary", phase)))
            }
        };

        let user = self.current_user().await?;
        match bounded(
            &self.cancel,
            self.config.request_timeout,
            self.gateway.session_summary(&user, &session_id),
        )
        .await
        {
            None => Err(DomainError::cancelled()),
            Some(Ok(summary)) => Ok(summary),
            Some(Err(e)) => Err(self.record_error(e.into())),
        }
    }

    /// Cancels in-flight calls and rejects further operations.
    ///
    /// A finalize still waiting on the backend ends the session as Failed.
    pub fn cancel(&self) {
        info!(phase = %self.phase(), "Setup session cancelled");
        self.cancel.cancel();
        self.state.send_if_modified(|conversation| {
            conversation.phase == SetupPhase::Finalizing
                && conversation.transition(SetupPhase::Failed).is_ok()
        });
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }

    fn ensure_active(&self) -> Result<(), DomainError> {
        if self.cancel.is_cancelled() {
            return Err(DomainError::cancelled());
        }
        Ok(())
    }

    async fn current_user(&self) -> Result<AuthenticatedUser, DomainError> {
        self.users
            .current_user()
            .await
            .map_err(|e| self.record_error(e.into()))
    }

    /// Applies `change` to a copy of the conversation and publishes it.
    ///
    /// Callers hold the turn lock, so the copy cannot go stale.
    fn update(
        &self,
        change: impl FnOnce(&mut SetupConversation) -> Result<(), ValidationError>,
    ) -> Result<(), DomainError> {
        let mut next = self.state.borrow().clone();
        change(&mut next)?;
        self.state.send_replace(next);
        Ok(())
    }

    fn record_error(&self, error: DomainError) -> DomainError {
        warn!(code = %error.code, error = %error.message, "Setup session operation failed");
        self.state
            .send_modify(|conversation| conversation.error = Some(error.message.clone()));
        error
    }

    /// Moves Finalizing -> Failed and records the error.
    fn fail(&self, error: DomainError) -> DomainError {
        if let Err(e) = self.update(|conversation| conversation.transition(SetupPhase::Failed)) {
            warn!(error = %e, "Could not mark setup session failed");
        }
        self.record_error(error)
    }

    fn discarded(&self) -> DomainError {
        debug!("Discarding late setup response after cancellation");
        DomainError::cancelled()
    }
}
