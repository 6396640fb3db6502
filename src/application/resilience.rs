//! Network resilience policy.
//!
//! Decides what a failed collection load leaves behind: a deterministic
//! placeholder when the backend is unreachable and offline fallback is on,
//! otherwise the last good list.

use tracing::debug;

use crate::config::FeatureFlags;
use crate::domain::foundation::{DomainError, ErrorCode, InterviewId, Timestamp, UserId};
use crate::domain::interview::{Interview, InterviewStatus};

/// Id of the placeholder interview substituted in offline mode.
pub const PLACEHOLDER_ID: &str = "offline-placeholder";

/// What a failed load does to the local list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadFailureAction {
    /// Replace the list with a single placeholder interview.
    SubstitutePlaceholder,
    /// Leave the previous list untouched.
    KeepPrevious,
}

/// Failure classification and fallback policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResiliencePolicy {
    offline_fallback: bool,
}

impl ResiliencePolicy {
    pub fn new(offline_fallback: bool) -> Self {
        Self { offline_fallback }
    }

    pub fn from_features(features: &FeatureFlags) -> Self {
        Self::new(features.offline_fallback)
    }

    pub fn offline_fallback(&self) -> bool {
        self.offline_fallback
    }

    /// Chooses the action for a failed load.
    ///
    /// Only connectivity-class failures are eligible for substitution.
    pub fn on_load_failure(&self, error: &DomainError) -> LoadFailureAction {
        let action = if self.offline_fallback && error.code == ErrorCode::Connectivity {
            LoadFailureAction::SubstitutePlaceholder
        } else {
            LoadFailureAction::KeepPrevious
        };
        debug!(code = %error.code, ?action, "Classified load failure");
        action
    }

    /// Error text shown alongside the placeholder.
    pub fn fallback_message(error: &DomainError) -> String {
        format!("Offline mode: {}", error.message)
    }

    /// The placeholder interview, scheduled one day from now.
    pub fn placeholder(user_id: Option<&UserId>) -> Interview {
        let now = Timestamp::now();
        let mut interview = Interview::new(
            InterviewId::from_static(PLACEHOLDER_ID),
            "Practice Interview",
            now.plus_days(1),
            InterviewStatus::Scheduled,
        )
        .with_company("Offline Mode");
        interview.user_id = user_id.cloned();
        interview
    }
}

impl Default for ResiliencePolicy {
    fn default() -> Self {
        Self::from_features(&FeatureFlags::default())
    }
}
