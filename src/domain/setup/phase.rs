//! SetupPhase enum for tracking the lifecycle of a setup conversation.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::StateMachine;

/// Lifecycle phase of a guided setup conversation.
///
/// ```text
/// Uninitialized --start--> Active --finalize--> Finalizing --> Completed
///                            ^                      |
///                            +--(connectivity)------+--> Failed
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SetupPhase {
    #[default]
    Uninitialized,
    Active,
    Finalizing,
    Completed,
    Failed,
}

impl SetupPhase {
    /// Returns true if messages may be sent in this phase.
    pub fn accepts_messages(&self) -> bool {
        matches!(self, SetupPhase::Active)
    }
}

impl StateMachine for SetupPhase {
    fn valid_transitions(&self) -> Vec<Self> {
        use SetupPhase::*;
        match self {
            Uninitialized => vec![Active],
            Active => vec![Finalizing],
            // A transport failure hands the session back so finalize can be re-invoked.
            Finalizing => vec![Completed, Failed, Active],
            Completed => vec![],
            Failed => vec![],
        }
    }
}

impl fmt::Display for SetupPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SetupPhase::Uninitialized => "Uninitialized",
            SetupPhase::Active => "Active",
            SetupPhase::Finalizing => "Finalizing",
            SetupPhase::Completed => "Completed",
            SetupPhase::Failed => "Failed",
        };
        write!(f, "{}", s)
    }
}
