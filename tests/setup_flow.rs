//! Integration tests for the guided setup conversation.
//!
//! These tests drive a `SetupSession` end to end against the scripted
//! assistant and the channel launcher:
//! 1. The full start -> messages -> finalize -> handoff scenario
//! 2. Reply ordering when an earlier reply is slower than a later one
//! 3. Readiness gating of finalize

use serde_json::json;
use std::sync::Arc;
use std::time::Duration;

use interview_orchestrator::adapters::memory::{ScriptedSetupGateway, SetupCall};
use interview_orchestrator::adapters::{ChannelLauncher, StaticUserProvider};
use interview_orchestrator::application::{SetupSession, SetupSessionConfig};
use interview_orchestrator::domain::foundation::{AuthenticatedUser, ErrorCode, UserId};
use interview_orchestrator::domain::interview::InterviewStatus;
use interview_orchestrator::domain::setup::{Sender, SetupPhase};
use interview_orchestrator::ports::{FinalizeRequest, Handoff};
use tokio::sync::mpsc::UnboundedReceiver;
use tracing_subscriber::EnvFilter;

// =============================================================================
// Test Infrastructure
// =============================================================================

/// Routes session logs to the test output; set `RUST_LOG=debug` to see them.
fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn build_session(gateway: &ScriptedSetupGateway) -> (SetupSession, UnboundedReceiver<Handoff>) {
    init_tracing();
    let user = AuthenticatedUser::new(UserId::new("user-123").unwrap()).with_token("id-token");
    let (launcher, rx) = ChannelLauncher::channel();
    let session = SetupSession::new(
        Arc::new(gateway.clone()),
        Arc::new(StaticUserProvider::signed_in(user)),
        Arc::new(launcher),
        SetupSessionConfig::default(),
    );
    (session, rx)
}

fn transcript(session: &SetupSession) -> Vec<(Sender, String)> {
    session
        .state()
        .transcript
        .into_iter()
        .map(|m| (m.sender, m.text))
        .collect()
}

// =============================================================================
// Scenario
// =============================================================================

#[tokio::test]
async fn backend_engineer_setup_is_finalized_and_launched() {
    let gateway = ScriptedSetupGateway::new()
        .with_start("s1", Some("Hello!"), json!({}))
        .with_turn("Got it", json!({"role": "Backend Engineer"}))
        .with_turn(
            "Noted",
            json!({"role": "Backend Engineer", "type": "Technical", "level": "Mid"}),
        )
        .with_finalize(
            Some(json!({
                "id": "i1",
                "jobTitle": "Backend Engineer",
                "companyName": "Acme",
                "role": "Backend Engineer",
                "status": "scheduled",
                "interviewDate": "2025-08-01T10:00:00Z"
            })),
            json!({"token": "abc"}),
        );
    let (session, mut launched) = build_session(&gateway);

    session.start().await.unwrap();
    assert_eq!(session.phase(), SetupPhase::Active);

    session.send_message("I want a backend role").await.unwrap();
    assert!(!session.is_ready());

    session.send_message("technical, mid-level").await.unwrap();
    assert!(session.is_ready());

    let interview = session
        .finalize(FinalizeRequest::new().with_company("Acme"))
        .await
        .unwrap();

    assert_eq!(interview.id.as_str(), "i1");
    assert_eq!(interview.job_title, "Backend Engineer");
    assert_eq!(interview.role.as_deref(), Some("Backend Engineer"));
    assert_eq!(interview.status, InterviewStatus::Scheduled);
    assert_eq!(session.phase(), SetupPhase::Completed);

    let handoff = launched.recv().await.unwrap();
    assert_eq!(handoff.interview, interview);
    assert_eq!(handoff.start_payload, json!({"token": "abc"}));

    let finalize_call = gateway
        .calls()
        .into_iter()
        .find_map(|c| match c {
            SetupCall::Finalize { session_id, request } => Some((session_id, request)),
            _ => None,
        })
        .unwrap();
    assert_eq!(finalize_call.0, "s1");
    assert_eq!(finalize_call.1.company_name.as_deref(), Some("Acme"));
    assert_eq!(finalize_call.1.interview_date, None);

    assert_eq!(
        transcript(&session),
        vec![
            (Sender::Assistant, "Hello!".to_string()),
            (Sender::User, "I want a backend role".to_string()),
            (Sender::Assistant, "Got it".to_string()),
            (Sender::User, "technical, mid-level".to_string()),
            (Sender::Assistant, "Noted".to_string()),
        ]
    );
}

// =============================================================================
// Ordering
// =============================================================================

#[tokio::test]
async fn replies_apply_in_send_order_even_when_first_is_slower() {
    let gateway = ScriptedSetupGateway::new()
        .with_start("s1", None, json!({}))
        .with_turn_delayed("Reply 1", json!({"role": "SRE"}), Duration::from_millis(80))
        .with_turn_delayed(
            "Reply 2",
            json!({"role": "SRE", "type": "Behavioral"}),
            Duration::ZERO,
        );
    let (session, _launched) = build_session(&gateway);
    session.start().await.unwrap();

    let (first, second) = tokio::join!(session.send_message("M1"), session.send_message("M2"));

    assert_eq!(first.unwrap().as_deref(), Some("Reply 1"));
    assert_eq!(second.unwrap().as_deref(), Some("Reply 2"));
    assert_eq!(gateway.sent_messages(), vec!["M1", "M2"]);
    assert_eq!(
        transcript(&session)[1..],
        [
            (Sender::User, "M1".to_string()),
            (Sender::Assistant, "Reply 1".to_string()),
            (Sender::User, "M2".to_string()),
            (Sender::Assistant, "Reply 2".to_string()),
        ]
    );
    // The later turn's snapshot is the one that stands.
    assert_eq!(session.state().snapshot.text("type"), Some("Behavioral"));
}

// =============================================================================
// Readiness gating
// =============================================================================

#[tokio::test]
async fn finalize_is_gated_on_readiness() {
    let gateway = ScriptedSetupGateway::new()
        .with_start("s1", None, json!({}))
        .with_turn("Which level?", json!({"role": "SRE", "type": "Technical", "level": ""}));
    let (session, mut launched) = build_session(&gateway);
    session.start().await.unwrap();
    session.send_message("SRE, technical").await.unwrap();

    let err = session.finalize(FinalizeRequest::new()).await.unwrap_err();

    assert_eq!(err.code, ErrorCode::ValidationFailed);
    assert!(err.message.contains("level"));
    assert!(!gateway
        .calls()
        .iter()
        .any(|c| matches!(c, SetupCall::Finalize { .. })));
    assert_eq!(session.phase(), SetupPhase::Active);
    assert!(launched.try_recv().is_err());
}

#[tokio::test]
async fn legacy_snapshot_keys_satisfy_readiness() {
    let gateway = ScriptedSetupGateway::new().with_start(
        "s1",
        None,
        json!({"job_role": "Data Engineer", "interview_type": "mixed", "experience_level": "senior"}),
    );
    let (session, _launched) = build_session(&gateway);

    session.start().await.unwrap();

    assert!(session.is_ready());
}

#[tokio::test]
async fn sign_out_between_turns_is_reported() {
    let gateway = ScriptedSetupGateway::new().with_start("s1", None, json!({}));
    let users = Arc::new(StaticUserProvider::signed_in(AuthenticatedUser::new(
        UserId::new("user-123").unwrap(),
    )));
    let (launcher, _launched) = ChannelLauncher::channel();
    let session = SetupSession::new(
        Arc::new(gateway.clone()),
        users.clone(),
        Arc::new(launcher),
        SetupSessionConfig::default(),
    );
    session.start().await.unwrap();

    users.sign_out();
    let err = session.send_message("hello").await.unwrap_err();

    assert_eq!(err.code, ErrorCode::Unauthenticated);
    assert_eq!(gateway.sent_messages(), Vec::<String>::new());
    assert_eq!(session.state().error.as_deref(), Some("No authenticated user"));
}
