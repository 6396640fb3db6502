//! Feature flags configuration

use serde::Deserialize;

/// Feature flags for enabling/disabling functionality
#[derive(Debug, Clone, Deserialize)]
pub struct FeatureFlags {
    /// Substitute a placeholder interview when the backend is unreachable
    #[serde(default = "default_offline_fallback")]
    pub offline_fallback: bool,
}

impl Default for FeatureFlags {
    fn default() -> Self {
        Self {
            offline_fallback: default_offline_fallback(),
        }
    }
}

fn default_offline_fallback() -> bool {
    true
}
