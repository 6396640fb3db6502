//! In-memory interview backend.
//!
//! Behaves like the real backend (UUID ids assigned on create, list returns the
//! stored records in insertion order) and can be scripted to fail or stall.
//!
//! # Example
//!
//! ```ignore
//! let gateway = InMemoryInterviewGateway::new()
//!     .with_interview(interview)
//!     .with_list_error(GatewayError::network("connection refused"))
//!     .with_delay(Duration::from_millis(50));
//! ```

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;
use tokio::time::sleep;
use uuid::Uuid;

use crate::domain::foundation::{AuthenticatedUser, InterviewId, Timestamp};
use crate::domain::interview::{Interview, NewInterview};
use crate::ports::{GatewayError, InterviewGateway};

/// A call recorded by the in-memory gateways.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InterviewCall {
    List { user_id: String },
    Create { user_id: String, job_title: String },
    Get { user_id: String, id: String },
}

#[derive(Debug, Default)]
struct State {
    records: Vec<Interview>,
    list_errors: VecDeque<GatewayError>,
    create_errors: VecDeque<GatewayError>,
    calls: Vec<InterviewCall>,
}

/// Scriptable in-memory implementation of [`InterviewGateway`].
#[derive(Debug, Clone, Default)]
pub struct InMemoryInterviewGateway {
    state: Arc<Mutex<State>>,
    delay: Duration,
}

impl InMemoryInterviewGateway {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds a stored record.
    pub fn with_interview(self, interview: Interview) -> Self {
        self.lock().records.push(interview);
        self
    }

    /// Queues an error for the next list call.
    pub fn with_list_error(self, error: GatewayError) -> Self {
        self.lock().list_errors.push_back(error);
        self
    }

    /// Queues an error for the next create call.
    pub fn with_create_error(self, error: GatewayError) -> Self {
        self.lock().create_errors.push_back(error);
        self
    }

    /// Sets simulated latency per call.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Queues an error for the next list call on a shared handle.
    pub fn fail_next_list(&self, error: GatewayError) {
        self.lock().list_errors.push_back(error);
    }

    /// Replaces the stored records.
    pub fn set_interviews(&self, records: Vec<Interview>) {
        self.lock().records = records;
    }

    pub fn interviews(&self) -> Vec<Interview> {
        self.lock().records.clone()
    }

    pub fn calls(&self) -> Vec<InterviewCall> {
        self.lock().calls.clone()
    }

    /// Number of list calls received.
    pub fn list_count(&self) -> usize {
        self.lock()
            .calls
            .iter()
            .filter(|c| matches!(c, InterviewCall::List { .. }))
            .count()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    async fn pause(&self) {
        if !self.delay.is_zero() {
            sleep(self.delay).await;
        }
    }
}

#[async_trait]
impl InterviewGateway for InMemoryInterviewGateway {
    async fn list_interviews(
        &self,
        user: &AuthenticatedUser,
    ) -> Result<Vec<Interview>, GatewayError> {
        let outcome = {
            let mut state = self.lock();
            state.calls.push(InterviewCall::List {
                user_id: user.id.to_string(),
            });
            match state.list_errors.pop_front() {
                Some(error) => Err(error),
                None => Ok(state.records.clone()),
            }
        };
        self.pause().await;
        outcome
    }

    async fn create_interview(
        &self,
        user: &AuthenticatedUser,
        draft: &NewInterview,
    ) -> Result<Interview, GatewayError> {
        let outcome = {
            let mut state = self.lock();
            state.calls.push(InterviewCall::Create {
                user_id: user.id.to_string(),
                job_title: draft.job_title().to_string(),
            });
            match state.create_errors.pop_front() {
                Some(error) => Err(error),
                None => {
                    let id = InterviewId::new(Uuid::new_v4().to_string())
                        .map_err(|e| GatewayError::decode(e.to_string()))?;
                    let mut interview = Interview::new(
                        id,
                        draft.job_title(),
                        draft.interview_date(),
                        draft.status(),
                    )
                    .with_user(user.id.clone());
                    interview.company_name = draft.company_name().map(str::to_string);
                    interview.updated_at = Timestamp::now();
                    state.records.push(interview.clone());
                    Ok(interview)
                }
            }
        };
        self.pause().await;
        outcome
    }

    async fn get_interview(
        &self,
        user: &AuthenticatedUser,
        id: &InterviewId,
    ) -> Result<Interview, GatewayError> {
        let outcome = {
            let mut state = self.lock();
            state.calls.push(InterviewCall::Get {
                user_id: user.id.to_string(),
                id: id.to_string(),
            });
            state
                .records
                .iter()
                .find(|i| &i.id == id)
                .cloned()
                .ok_or(GatewayError::NotFound)
        };
        self.pause().await;
        outcome
    }
}
