//! Collection Store - the caller's interviews, kept in sync with the backend.
//!
//! Owns the local list plus loading and error flags. Every mutation is
//! published through a `watch` channel, so consumers can either read the
//! latest [`CollectionState`] or subscribe to changes.
//!
//! # Load policy
//!
//! - Success replaces the whole list, in the order the backend returned it.
//! - A connectivity failure with offline fallback enabled replaces the list
//!   with a single placeholder interview.
//! - Any other failure keeps the last good list and records the error.
//!
//! Concurrent `load()` calls share one in-flight request, so a stale
//! response can never overwrite a newer one. The request runs on its own
//! task and settles the state even if every caller stops waiting.

use futures::future::{BoxFuture, FutureExt, Shared};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinError;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use super::remote::bounded;
use super::resilience::{LoadFailureAction, ResiliencePolicy};
use crate::config::AppConfig;
use crate::domain::foundation::{AuthenticatedUser, DomainError, InterviewId, Timestamp};
use crate::domain::interview::{Interview, InterviewStatus, NewInterview};
use crate::ports::{CurrentUserProvider, GatewayError, InterviewGateway};

/// Where the store is in its load cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadPhase {
    /// Nothing loaded yet.
    #[default]
    Idle,
    Loading,
    /// Last load succeeded.
    Loaded,
    /// Last load failed; the previous list was kept.
    ErrorKept,
    /// Last load failed; the placeholder was substituted.
    ErrorFallback,
}

/// Observable store state.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CollectionState {
    /// Interviews in arrival order.
    pub interviews: Vec<Interview>,
    pub phase: LoadPhase,
    /// Last failure message, until cleared or overwritten by a success.
    pub error: Option<String>,
}

impl CollectionState {
    pub fn is_loading(&self) -> bool {
        self.phase == LoadPhase::Loading
    }
}

/// Timeouts and fallback policy for a store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CollectionStoreConfig {
    pub list_timeout: Duration,
    pub request_timeout: Duration,
    pub policy: ResiliencePolicy,
}

impl From<&AppConfig> for CollectionStoreConfig {
    fn from(config: &AppConfig) -> Self {
        Self {
            list_timeout: config.api.list_timeout(),
            request_timeout: config.api.request_timeout(),
            policy: ResiliencePolicy::from_features(&config.features),
        }
    }
}

impl Default for CollectionStoreConfig {
    fn default() -> Self {
        Self::from(&AppConfig::default())
    }
}

type SharedLoad = Shared<BoxFuture<'static, Result<(), DomainError>>>;

/// The caller's interview collection.
pub struct CollectionStore {
    inner: Arc<Inner>,
}

struct Inner {
    gateway: Arc<dyn InterviewGateway>,
    users: Arc<dyn CurrentUserProvider>,
    config: CollectionStoreConfig,
    state: watch::Sender<CollectionState>,
    in_flight: Mutex<Option<SharedLoad>>,
    cancel: CancellationToken,
}

impl CollectionStore {
    pub fn new(
        gateway: Arc<dyn InterviewGateway>,
        users: Arc<dyn CurrentUserProvider>,
        config: CollectionStoreConfig,
    ) -> Self {
        let (state, _) = watch::channel(CollectionState::default());
        Self {
            inner: Arc::new(Inner {
                gateway,
                users,
                config,
                state,
                in_flight: Mutex::new(None),
                cancel: CancellationToken::new(),
            }),
        }
    }

    /// Latest state.
    pub fn state(&self) -> CollectionState {
        self.inner.state.borrow().clone()
    }

    /// Receiver notified on every state change.
    pub fn subscribe(&self) -> watch::Receiver<CollectionState> {
        self.inner.state.subscribe()
    }

    /// Refreshes the list from the backend.
    ///
    /// If a load is already in flight, waits for that one instead of
    /// issuing a second request. On failure the state has already been
    /// updated according to the resilience policy; the error returned is
    /// the underlying failure.
    pub async fn load(&self) -> Result<(), DomainError> {
        self.inner.ensure_active()?;

        let load = {
            let mut in_flight = self.inner.lock_in_flight();
            if let Some(load) = in_flight.clone() {
                debug!("Joining in-flight interview load");
                load
            } else {
                let inner = Arc::clone(&self.inner);
                let task = tokio::spawn(Arc::clone(&inner).run_load());
                let load = async move {
                    match task.await {
                        Ok(outcome) => outcome,
                        Err(e) => Err(inner.abandon_load(e)),
                    }
                }
                .boxed()
                .shared();
                *in_flight = Some(load.clone());
                load
            }
        };

        load.await
    }

    /// Creates an interview and appends the stored record to the list.
    ///
    /// Invalid input is rejected before any network call. Nothing is
    /// inserted until the backend confirms.
    pub async fn create(
        &self,
        job_title: &str,
        company_name: Option<&str>,
        interview_date: Timestamp,
        status: InterviewStatus,
    ) -> Result<Interview, DomainError> {
        self.inner.ensure_active()?;

        let draft = match NewInterview::new(
            job_title,
            company_name.map(str::to_string),
            interview_date,
            status,
        ) {
            Ok(draft) => draft,
            Err(e) => return Err(self.inner.record_error(e.into())),
        };

        let user = self.inner.current_user().await?;
        let outcome = bounded(
            &self.inner.cancel,
            self.inner.config.request_timeout,
            self.inner.gateway.create_interview(&user, &draft),
        )
        .await
        .ok_or_else(DomainError::cancelled)?;

        match outcome {
            Ok(interview) => {
                info!(interview_id = %interview.id, "Interview created");
                self.inner.state.send_modify(|state| {
                    state.interviews.push(interview.clone());
                    state.error = None;
                });
                Ok(interview)
            }
            Err(e) => Err(self.inner.record_error(e.into())),
        }
    }

    /// First interview with the given id, if any.
    pub fn get_by_id(&self, id: &InterviewId) -> Option<Interview> {
        self.inner
            .state
            .borrow()
            .interviews
            .iter()
            .find(|i| &i.id == id)
            .cloned()
    }

    /// All interviews with the given status, in list order.
    pub fn get_by_status(&self, status: InterviewStatus) -> Vec<Interview> {
        self.inner
            .state
            .borrow()
            .interviews
            .iter()
            .filter(|i| i.status == status)
            .cloned()
            .collect()
    }

    pub fn clear_error(&self) {
        self.inner.state.send_if_modified(|state| state.error.take().is_some());
    }

    /// Refreshes one interview from the backend.
    ///
    /// Replaces the matching entry in place, or appends it when the list
    /// does not have it yet. A remote miss returns `Ok(None)` and leaves the
    /// error untouched.
    pub async fn fetch(&self, id: &InterviewId) -> Result<Option<Interview>, DomainError> {
        self.inner.ensure_active()?;

        let user = self.inner.current_user().await?;
        let outcome = bounded(
            &self.inner.cancel,
            self.inner.config.request_timeout,
            self.inner.gateway.get_interview(&user, id),
        )
        .await
        .ok_or_else(DomainError::cancelled)?;

        match outcome {
            Ok(interview) => {
                self.inner.state.send_modify(|state| {
                    match state.interviews.iter_mut().find(|i| i.id == interview.id) {
                        Some(existing) => *existing = interview.clone(),
                        None => state.interviews.push(interview.clone()),
                    }
                    state.error = None;
                });
                Ok(Some(interview))
            }
            Err(GatewayError::NotFound) => {
                debug!(interview_id = %id, "Interview not found on backend");
                Ok(None)
            }
            Err(e) => Err(self.inner.record_error(e.into())),
        }
    }

    /// Cancels in-flight calls and rejects further operations.
    pub fn cancel(&self) {
        info!("Collection store cancelled");
        self.inner.cancel.cancel();
        self.inner.state.send_if_modified(|state| {
            if state.phase == LoadPhase::Loading {
                state.phase = LoadPhase::Idle;
                true
            } else {
                false
            }
        });
    }

    pub fn is_cancelled(&self) -> bool {
        self.inner.cancel.is_cancelled()
    }
}

impl Inner {
    fn ensure_active(&self) -> Result<(), DomainError> {
        if self.cancel.is_cancelled() {
            return Err(DomainError::cancelled());
        }
        Ok(())
    }

    fn lock_in_flight(&self) -> MutexGuard<'_, Option<SharedLoad>> {
        self.in_flight.lock().unwrap_or_else(PoisonError::into_inner)
    }

    async fn current_user(&self) -> Result<AuthenticatedUser, DomainError> {
        self.users
            .current_user()
            .await
            .map_err(|e| self.record_error(e.into()))
    }

    /// Stores the failure message and hands the error back.
    fn record_error(&self, error: DomainError) -> DomainError {
        warn!(code = %error.code, error = %error.message, "Interview operation failed");
        self.state.send_modify(|state| state.error = Some(error.message.clone()));
        error
    }

    /// Settles the state when the load task died without publishing.
    fn abandon_load(&self, error: JoinError) -> DomainError {
        *self.lock_in_flight() = None;
        let error = DomainError::server(format!("Interview load did not finish: {}", error));
        warn!(error = %error.message, "Interview load task failed");
        self.state.send_modify(|state| {
            if state.phase == LoadPhase::Loading {
                state.phase = LoadPhase::ErrorKept;
            }
            state.error = Some(error.message.clone());
        });
        error
    }

    async fn run_load(self: Arc<Self>) -> Result<(), DomainError> {
        self.state.send_modify(|state| {
            state.phase = LoadPhase::Loading;
            state.error = None;
        });
        info!("Loading interviews");

        let (user_id, outcome) = match self.users.current_user().await {
            Ok(user) => {
                let outcome = bounded(
                    &self.cancel,
                    self.config.list_timeout,
                    self.gateway.list_interviews(&user),
                )
                .await;
                (Some(user.id), outcome.map(|r| r.map_err(DomainError::from)))
            }
            Err(e) => (None, Some(Err(DomainError::from(e)))),
        };

        *self.lock_in_flight() = None;

        let outcome = match outcome {
            Some(outcome) if !self.cancel.is_cancelled() => outcome,
            _ => {
                debug!("Discarding interview load after cancellation");
                return Err(DomainError::cancelled());
            }
        };

        match outcome {
            Ok(interviews) => {
                info!(count = interviews.len(), "Interviews loaded");
                self.state.send_modify(|state| {
                    state.interviews = interviews;
                    state.phase = LoadPhase::Loaded;
                    state.error = None;
                });
                Ok(())
            }
            Err(error) => {
                match self.config.policy.on_load_failure(&error) {
                    LoadFailureAction::SubstitutePlaceholder => {
                        warn!(error = %error.message, "Backend unreachable; using offline placeholder");
                        let placeholder = ResiliencePolicy::placeholder(user_id.as_ref());
                        self.state.send_modify(|state| {
                            state.interviews = vec![placeholder];
                            state.phase = LoadPhase::ErrorFallback;
                            state.error = Some(ResiliencePolicy::fallback_message(&error));
                        });
                    }
                    LoadFailureAction::KeepPrevious => {
                        warn!(code = %error.code, error = %error.message, "Interview load failed; keeping previous list");
                        self.state.send_modify(|state| {
                            state.phase = LoadPhase::ErrorKept;
                            state.error = Some(error.message.clone());
                        });
                    }
                }
                Err(error)
            }
        }
    }
}
