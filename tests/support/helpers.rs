// tests/support/helpers.rs
use super::mocks;
use axum::body;
use axum::http::StatusCode;
use serde_json::Value;
use std::sync::Arc;
use ticket_audit::{
    application::services::ApplicationServices,
    domain::audit::{AuditLogRepository, DiffOptions, RedactionPolicy},
    infrastructure::repositories::InMemoryAuditLogRepository,
    presentation::http::{routes::build_router, state::HttpState},
};

/// モックを組み込んだサービス群を構築する
pub fn build_services(audit_repo: Arc<dyn AuditLogRepository>) -> Arc<ApplicationServices> {
    Arc::new(ApplicationServices::new(
        audit_repo,
        Arc::new(mocks::DummyAuthenticator),
        Arc::new(mocks::FixedClock::default()),
        RedactionPolicy::default(),
        DiffOptions::default(),
    ))
}

pub fn build_test_state(audit_repo: Arc<dyn AuditLogRepository>) -> HttpState {
    HttpState {
        services: build_services(audit_repo),
        allowed_origins: vec!["http://localhost:3000".into()],
    }
}

pub async fn make_test_router() -> axum::Router {
    make_test_router_with_audit_repo(Arc::new(InMemoryAuditLogRepository::new())).await
}

/// Build a test router but inject a custom audit repo.
pub async fn make_test_router_with_audit_repo(
    audit_repo: Arc<dyn AuditLogRepository>,
) -> axum::Router {
    build_router(build_test_state(audit_repo))
}

pub async fn read_json(resp: axum::response::Response) -> (StatusCode, Value) {
    let status = resp.status();
    let (parts, body_stream) = resp.into_parts();
    let body_bytes = body::to_bytes(body_stream, 1024 * 1024)
        .await
        .expect("read body");
    let ct = parts
        .headers
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("");
    assert!(
        ct.starts_with("application/json"),
        "unexpected content-type: {ct}"
    );
    let json = serde_json::from_slice(&body_bytes).expect("expected valid json body");
    (status, json)
}

/// Assert that a response is an ErrorResponse JSON with the expected status and error string.
pub async fn assert_error_response(
    resp: axum::response::Response,
    expected_status: StatusCode,
    expected_error: &str,
) {
    let (status, json) = read_json(resp).await;
    assert_eq!(status, expected_status);
    let err_field = json.get("error").and_then(|v| v.as_str()).unwrap_or("");
    let msg_field = json.get("message").and_then(|v| v.as_str()).unwrap_or("");
    assert_eq!(err_field, expected_error, "unexpected error field: {err_field}");
    assert!(
        !msg_field.is_empty(),
        "expected non-empty message field in ErrorResponse"
    );
}
