//! Setup conversation aggregate.
//!
//! Owns the transcript, the latest assistant snapshot and the lifecycle
//! phase. All mutation goes through methods that enforce the phase rules;
//! the application layer publishes a clone after every change.

use serde::{Deserialize, Serialize};

use super::{Readiness, SetupMessage, SetupPhase, SetupSnapshot};
use crate::domain::foundation::{SetupSessionId, StateMachine, ValidationError};

/// Greeting shown when the assistant opens a session without one.
pub const DEFAULT_GREETING: &str = "Hello!";

/// Complete client-side state of one guided setup conversation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SetupConversation {
    pub session_id: Option<SetupSessionId>,
    pub phase: SetupPhase,
    pub transcript: Vec<SetupMessage>,
    pub snapshot: SetupSnapshot,
    /// Free-form phase label reported by the assistant (e.g. `collecting_job_role`).
    pub assistant_phase: Option<String>,
    /// Human-readable description of the last failure, if any.
    pub error: Option<String>,
}

impl SetupConversation {
    pub fn new() -> Self {
        Self::default()
    }

    /// Moves to a new phase, rejecting transitions the lifecycle forbids.
    pub fn transition(&mut self, target: SetupPhase) -> Result<(), ValidationError> {
        self.phase = self.phase.transition_to(target)?;
        Ok(())
    }

    /// Applies a successful start response. Uninitialized -> Active.
    pub fn activate(
        &mut self,
        session_id: SetupSessionId,
        greeting: Option<String>,
        snapshot: SetupSnapshot,
        assistant_phase: Option<String>,
    ) -> Result<(), ValidationError> {
        self.transition(SetupPhase::Active)?;
        let greeting = greeting
            .filter(|g| !g.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_GREETING.to_string());
        self.session_id = Some(session_id);
        self.transcript.push(SetupMessage::assistant(greeting));
        self.snapshot = snapshot;
        self.assistant_phase = assistant_phase;
        self.error = None;
        Ok(())
    }

    /// Appends the user's message ahead of the network round-trip.
    pub fn record_user_message(&mut self, text: impl Into<String>) -> Result<(), ValidationError> {
        if !self.phase.accepts_messages() {
            return Err(ValidationError::invalid_format(
                "phase",
                format!("messages cannot be sent while {}", self.phase),
            ));
        }
        self.transcript.push(SetupMessage::user(text));
        Ok(())
    }

    /// Applies an assistant turn: appends a non-empty reply and replaces the
    /// snapshot wholesale.
    pub fn apply_turn(
        &mut self,
        reply: String,
        snapshot: SetupSnapshot,
        assistant_phase: Option<String>,
    ) {
        if !reply.trim().is_empty() {
            self.transcript.push(SetupMessage::assistant(reply));
        }
        self.snapshot = snapshot;
        if assistant_phase.is_some() {
            self.assistant_phase = assistant_phase;
        }
        self.error = None;
    }

    pub fn readiness(&self) -> Readiness {
        Readiness::evaluate(&self.snapshot)
    }

    pub fn is_ready(&self) -> bool {
        self.readiness().is_ready()
    }
}
