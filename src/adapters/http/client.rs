//! Shared reqwest plumbing for the backend gateways.

use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use std::time::Duration;

use crate::config::ApiConfig;
use crate::domain::foundation::AuthenticatedUser;
use crate::ports::GatewayError;

/// HTTP client for the interview backend.
///
/// Implements both [`InterviewGateway`](crate::ports::InterviewGateway) and
/// [`SetupAssistantGateway`](crate::ports::SetupAssistantGateway). Per-call
/// timeouts are applied by the application services; the client carries
/// only a transport-level ceiling.
#[derive(Debug, Clone)]
pub struct HttpBackendClient {
    client: Client,
    base_url: String,
    transport_timeout: Duration,
}

impl HttpBackendClient {
    /// Builds a client for the configured backend.
    pub fn new(config: &ApiConfig) -> Result<Self, GatewayError> {
        let transport_timeout = config
            .list_timeout()
            .max(config.request_timeout())
            .max(config.conversation_timeout());

        let client = Client::builder()
            .timeout(transport_timeout)
            .build()
            .map_err(|e| GatewayError::network(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: config.base_url().to_string(),
            transport_timeout,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub(super) fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub(super) fn get(&self, path: &str, user: &AuthenticatedUser) -> RequestBuilder {
        authorize(self.client.get(self.url(path)), user)
    }

    pub(super) fn post(&self, path: &str, user: &AuthenticatedUser) -> RequestBuilder {
        authorize(self.client.post(self.url(path)), user)
    }

    /// Sends the request and decodes a successful JSON body.
    pub(super) async fn execute<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
    ) -> Result<T, GatewayError> {
        let response = request
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        let response = check_status(response).await?;

        response
            .json::<T>()
            .await
            .map_err(|e| GatewayError::decode(format!("Failed to parse response: {}", e)))
    }

    fn transport_error(&self, e: reqwest::Error) -> GatewayError {
        if e.is_timeout() {
            GatewayError::timed_out(self.transport_timeout)
        } else if e.is_connect() {
            GatewayError::network(format!("Connection failed: {}", e))
        } else {
            GatewayError::network(e.to_string())
        }
    }
}

fn authorize(request: RequestBuilder, user: &AuthenticatedUser) -> RequestBuilder {
    match user.bearer_token() {
        Some(token) => request.bearer_auth(token),
        None => request,
    }
}

async fn check_status(response: Response) -> Result<Response, GatewayError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    Err(status_error(status.as_u16(), body))
}

/// Maps a non-success status to a gateway error.
pub(super) fn status_error(status: u16, body: String) -> GatewayError {
    match status {
        401 | 403 => GatewayError::Unauthorized,
        404 => GatewayError::NotFound,
        _ => GatewayError::Status { status, body },
    }
}
