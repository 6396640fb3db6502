//! Launcher port - hands a finalized interview to whatever runs it.

use async_trait::async_trait;
use serde_json::Value;

use crate::domain::foundation::DomainError;
use crate::domain::interview::Interview;

/// Everything the live interview surface needs to begin.
#[derive(Debug, Clone, PartialEq)]
pub struct Handoff {
    pub interview: Interview,
    /// Opaque start payload from the backend, passed on unmodified.
    pub start_payload: Value,
}

/// Receives finalized interviews.
///
/// Called at most once per successful finalize.
#[async_trait]
pub trait InterviewLauncher: Send + Sync {
    async fn launch(&self, handoff: Handoff) -> Result<(), DomainError>;
}
