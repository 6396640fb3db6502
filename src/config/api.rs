//! Backend API configuration

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

/// Remote backend configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    /// Backend base URL, without a trailing slash
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Timeout for listing interviews, in seconds
    #[serde(default = "default_list_timeout")]
    pub list_timeout_secs: u64,

    /// Timeout for create/get/finalize/summary, in seconds
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,

    /// Timeout for starting a session and sending messages, in seconds
    #[serde(default = "default_conversation_timeout")]
    pub conversation_timeout_secs: u64,
}

impl ApiConfig {
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Base URL with any trailing slash removed.
    pub fn base_url(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }

    pub fn list_timeout(&self) -> Duration {
        Duration::from_secs(self.list_timeout_secs)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn conversation_timeout(&self) -> Duration {
        Duration::from_secs(self.conversation_timeout_secs)
    }

    /// Validate API configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        let url = self.base_url.trim();
        if url.is_empty() {
            return Err(ValidationError::MissingRequired("API__BASE_URL"));
        }
        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err(ValidationError::InvalidBaseUrl);
        }

        if self.list_timeout_secs == 0
            || self.request_timeout_secs == 0
            || self.conversation_timeout_secs == 0
        {
            return Err(ValidationError::InvalidTimeout);
        }

        Ok(())
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            list_timeout_secs: default_list_timeout(),
            request_timeout_secs: default_request_timeout(),
            conversation_timeout_secs: default_conversation_timeout(),
        }
    }
}

fn default_base_url() -> String {
    "http://localhost:8000".to_string()
}

fn default_list_timeout() -> u64 {
    8
}

fn default_request_timeout() -> u64 {
    15
}

fn default_conversation_timeout() -> u64 {
    30
}
