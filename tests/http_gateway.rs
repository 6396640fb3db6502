//! Integration tests for the HTTP gateways.
//!
//! An axum stub of the backend routes answers canned responses and records
//! every request, so the tests can check routes, headers and bodies as well
//! as status mapping.

use axum::{
    extract::State,
    http::{header, HeaderMap, Method, StatusCode, Uri},
    response::IntoResponse,
    routing::{get, post},
    Router,
};
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};

use interview_orchestrator::adapters::{ChannelLauncher, HttpBackendClient, StaticUserProvider};
use interview_orchestrator::application::{SetupSession, SetupSessionConfig};
use interview_orchestrator::config::ApiConfig;
use interview_orchestrator::domain::foundation::{
    AuthenticatedUser, InterviewId, SetupSessionId, Timestamp, UserId,
};
use interview_orchestrator::domain::interview::{InterviewStatus, NewInterview};
use interview_orchestrator::domain::setup::SetupPhase;
use interview_orchestrator::ports::{
    FinalizeRequest, GatewayError, InterviewGateway, SetupAssistantGateway,
};
use tokio::net::TcpListener;

// =============================================================================
// Stub backend
// =============================================================================

#[derive(Debug, Clone)]
struct Recorded {
    method: String,
    path: String,
    authorization: Option<String>,
    body: String,
}

impl Recorded {
    fn json(&self) -> Value {
        serde_json::from_str(&self.body).unwrap()
    }
}

/// (method, path, status, body)
type Reply = (&'static str, &'static str, u16, &'static str);

struct Stub {
    replies: Vec<Reply>,
    requests: Mutex<Vec<Recorded>>,
}

impl Stub {
    fn reply(&self, method: &str, path: &str) -> (StatusCode, String) {
        self.replies
            .iter()
            .find(|(m, p, _, _)| *m == method && *p == path)
            .map(|(_, _, status, body)| {
                let status = StatusCode::from_u16(*status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
                (status, body.to_string())
            })
            .unwrap_or((StatusCode::NOT_FOUND, r#"{"detail":"Not Found"}"#.to_string()))
    }
}

async fn respond(
    State(stub): State<Arc<Stub>>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: String,
) -> impl IntoResponse {
    let (status, payload) = stub.reply(method.as_str(), uri.path());
    stub.requests.lock().unwrap().push(Recorded {
        method: method.to_string(),
        path: uri.path().to_string(),
        authorization: headers
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string),
        body,
    });
    (status, [(header::CONTENT_TYPE, "application/json")], payload)
}

/// Routes of the interview backend, every one answered by `respond`.
fn backend_routes(stub: Arc<Stub>) -> Router {
    Router::new()
        .route("/interviews", get(respond).post(respond))
        .route("/interviews/:id", get(respond))
        .route("/workflow/start", post(respond))
        .route("/workflow/:session_id/message", post(respond))
        .route("/workflow/:session_id/finalize", post(respond))
        .route("/workflow/:session_id/summary", get(respond))
        .with_state(stub)
}

struct StubBackend {
    base_url: String,
    stub: Arc<Stub>,
}

impl StubBackend {
    async fn start(replies: Vec<Reply>) -> Self {
        let stub = Arc::new(Stub {
            replies,
            requests: Mutex::new(Vec::new()),
        });
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let base_url = format!("http://{}", listener.local_addr().unwrap());
        let app = backend_routes(stub.clone());
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self { base_url, stub }
    }

    fn client(&self) -> HttpBackendClient {
        HttpBackendClient::new(&ApiConfig::default().with_base_url(self.base_url.clone())).unwrap()
    }

    fn requests(&self) -> Vec<Recorded> {
        self.stub.requests.lock().unwrap().clone()
    }
}

fn user() -> AuthenticatedUser {
    AuthenticatedUser::new(UserId::new("user-123").unwrap()).with_token("id-token")
}

fn session_id() -> SetupSessionId {
    SetupSessionId::new("s1").unwrap()
}

// =============================================================================
// Interviews
// =============================================================================

#[tokio::test]
async fn list_sends_bearer_token_and_keeps_server_order() {
    let backend = StubBackend::start(vec![(
        "GET",
        "/interviews",
        200,
        r#"[{"id":"b","jobTitle":"Second","status":"archived"},{"id":"a","jobTitle":"First","status":"scheduled"}]"#,
    )])
    .await;

    let interviews = backend.client().list_interviews(&user()).await.unwrap();

    let ids: Vec<&str> = interviews.iter().map(|i| i.id.as_str()).collect();
    assert_eq!(ids, vec!["b", "a"]);
    assert_eq!(interviews[0].status, InterviewStatus::Pending);
    assert_eq!(interviews[1].status, InterviewStatus::Scheduled);

    let requests = backend.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].authorization.as_deref(), Some("Bearer id-token"));
}

#[tokio::test]
async fn requests_without_token_carry_no_authorization() {
    let backend = StubBackend::start(vec![("GET", "/interviews", 200, "[]")]).await;
    let anonymous = AuthenticatedUser::new(UserId::new("user-123").unwrap());

    let interviews = backend.client().list_interviews(&anonymous).await.unwrap();

    assert!(interviews.is_empty());
    assert_eq!(backend.requests()[0].authorization, None);
}

#[tokio::test]
async fn create_posts_camel_case_body() {
    let backend = StubBackend::start(vec![(
        "POST",
        "/interviews",
        201,
        r#"{"id":"i9","jobTitle":"Platform Engineer","companyName":"Acme","status":"scheduled","interviewDate":"2025-08-01T10:00:00Z"}"#,
    )])
    .await;
    let draft = NewInterview::new(
        " Platform Engineer ",
        Some("Acme".to_string()),
        Timestamp::parse_iso("2025-08-01T10:00:00Z").unwrap(),
        InterviewStatus::Scheduled,
    )
    .unwrap();

    let created = backend.client().create_interview(&user(), &draft).await.unwrap();

    assert_eq!(created.id.as_str(), "i9");
    let body = backend.requests()[0].json();
    assert_eq!(body["jobTitle"], json!("Platform Engineer"));
    assert_eq!(body["companyName"], json!("Acme"));
    assert_eq!(body["status"], json!("scheduled"));
    assert!(body["interviewDate"].as_str().unwrap().starts_with("2025-08-01T10:00:00"));
}

#[tokio::test]
async fn get_maps_missing_record_to_not_found() {
    let backend = StubBackend::start(vec![]).await;

    let err = backend
        .client()
        .get_interview(&user(), &InterviewId::new("missing").unwrap())
        .await
        .unwrap_err();

    assert_eq!(err, GatewayError::NotFound);
    assert_eq!(backend.requests()[0].path, "/interviews/missing");
}

#[tokio::test]
async fn error_statuses_are_classified() {
    let backend = StubBackend::start(vec![
        ("GET", "/interviews/denied", 401, "{}"),
        ("GET", "/interviews/broken", 500, "boom"),
        ("GET", "/interviews/garbled", 200, "not json"),
    ])
    .await;
    let client = backend.client();
    let get = |id: &'static str| {
        let client = client.clone();
        async move {
            client
                .get_interview(&user(), &InterviewId::new(id).unwrap())
                .await
                .unwrap_err()
        }
    };

    assert_eq!(get("denied").await, GatewayError::Unauthorized);
    assert_eq!(
        get("broken").await,
        GatewayError::Status { status: 500, body: "boom".to_string() }
    );
    assert!(matches!(get("garbled").await, GatewayError::Decode(_)));
}

#[tokio::test]
async fn refused_connection_is_a_connectivity_failure() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let base_url = format!("http://{}", listener.local_addr().unwrap());
    drop(listener);
    let client = HttpBackendClient::new(&ApiConfig::default().with_base_url(base_url)).unwrap();

    let err = client.list_interviews(&user()).await.unwrap_err();

    assert!(err.is_connectivity());
}

// =============================================================================
// Workflow
// =============================================================================

#[tokio::test]
async fn workflow_routes_and_bodies() {
    let backend = StubBackend::start(vec![
        (
            "POST",
            "/workflow/start",
            200,
            r#"{"sessionId":"s1","ai_response":"Hello!","session_state":{}}"#,
        ),
        (
            "POST",
            "/workflow/s1/message",
            200,
            r#"{"ai_response":"Got it","session_state":{"role":"SRE"},"phase":"collecting_interview_type"}"#,
        ),
        (
            "POST",
            "/workflow/s1/finalize",
            200,
            r#"{"interview":{"id":"i1","jobTitle":"SRE"},"start":{"token":"abc"}}"#,
        ),
        (
            "GET",
            "/workflow/s1/summary",
            200,
            r#"{"session_id":"s1","preferences":{"role":"SRE"},"questions":[],"answers":["a"],"feedback":[]}"#,
        ),
    ])
    .await;
    let client = backend.client();

    let started = client.start_session(&user()).await.unwrap();
    let turn = client.send_message(&user(), &session_id(), "I run on-call").await.unwrap();
    let finalized = client
        .finalize_session(&user(), &session_id(), &FinalizeRequest::new().with_company("Acme"))
        .await
        .unwrap();
    let summary = client.session_summary(&user(), &session_id()).await.unwrap();

    assert_eq!(started.session_id, "s1");
    assert_eq!(turn.session_state.text("role"), Some("SRE"));
    assert_eq!(finalized.start, json!({"token": "abc"}));
    assert_eq!(summary.answers, vec!["a"]);

    let requests = backend.requests();
    let paths: Vec<(&str, &str)> = requests
        .iter()
        .map(|r| (r.method.as_str(), r.path.as_str()))
        .collect();
    assert_eq!(
        paths,
        vec![
            ("POST", "/workflow/start"),
            ("POST", "/workflow/s1/message"),
            ("POST", "/workflow/s1/finalize"),
            ("GET", "/workflow/s1/summary"),
        ]
    );
    assert_eq!(requests[1].json(), json!({"text": "I run on-call"}));
    assert_eq!(
        requests[2].json(),
        json!({"companyName": "Acme", "interviewDate": null, "autoStart": true})
    );
}

#[tokio::test]
async fn setup_session_runs_over_http() {
    let backend = StubBackend::start(vec![
        (
            "POST",
            "/workflow/start",
            200,
            r#"{"sessionId":"s1","ai_response":"Hello!","session_state":{}}"#,
        ),
        (
            "POST",
            "/workflow/s1/message",
            200,
            r#"{"ai_response":"Noted","session_state":{"role":"SRE","type":"Technical","level":"Senior"}}"#,
        ),
        (
            "POST",
            "/workflow/s1/finalize",
            200,
            r#"{"interview":{"id":"i1","jobTitle":"SRE","status":"scheduled"},"start":{"token":"abc"}}"#,
        ),
    ])
    .await;
    let (launcher, mut launched) = ChannelLauncher::channel();
    let session = SetupSession::new(
        Arc::new(backend.client()),
        Arc::new(StaticUserProvider::signed_in(user())),
        Arc::new(launcher),
        SetupSessionConfig::default(),
    );

    session.start().await.unwrap();
    session.send_message("senior technical SRE").await.unwrap();
    let interview = session.finalize(FinalizeRequest::new()).await.unwrap();

    assert_eq!(interview.id.as_str(), "i1");
    assert_eq!(session.phase(), SetupPhase::Completed);
    let handoff = launched.recv().await.unwrap();
    assert_eq!(handoff.start_payload, json!({"token": "abc"}));
}
