use crate::application::{dto::AuditLogPageView, queries::audit::AuditLogListParams};
use crate::presentation::http::error::{ErrorResponse, HttpResult, IntoHttpResult};
use crate::presentation::http::extractors::Authenticated;
use crate::presentation::http::state::HttpState;
use axum::{Extension, Json, extract::Query};

#[utoipa::path(
    get,
    path = "/api/v1/audit-logs",
    params(AuditLogListParams),
    responses(
        (status = 200, description = "One page of audit history, newest first.",
            body = AuditLogPageView),
        (status = 401, description = "Missing or invalid bearer token.", body = ErrorResponse),
        (status = 403, description = "Caller lacks audit:read.", body = ErrorResponse),
        (status = 500, description = "Unexpected server error.", body = ErrorResponse)
    ),
    security(("bearerAuth" = [])),
    tag = "Audit"
)]
pub async fn list_audit_logs(
    Extension(state): Extension<HttpState>,
    Authenticated(actor): Authenticated,
    Query(params): Query<AuditLogListParams>,
) -> HttpResult<Json<AuditLogPageView>> {
    let view = state
        .services
        .audit_queries
        .browse(&actor, params)
        .await
        .into_http()?;
    Ok(Json(view))
}
