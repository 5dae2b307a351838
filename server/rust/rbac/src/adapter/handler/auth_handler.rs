use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use utoipa::OpenApi;

use super::{error_codes, internal_error, ApiDoc, AppState, ErrorResponse};
use crate::usecase::authenticate::{AuthenticateError, AuthenticateInput, AuthenticateOutput};

#[utoipa::path(
    get,
    path = "/healthz",
    responses(
        (status = 200, description = "Health check OK"),
    )
)]
pub async fn healthz() -> impl IntoResponse {
    Json(serde_json::json!({"status": "ok"}))
}

#[utoipa::path(
    get,
    path = "/readyz",
    responses(
        (status = 200, description = "Ready"),
        (status = 503, description = "Not ready"),
    )
)]
pub async fn readyz(State(state): State<AppState>) -> impl IntoResponse {
    let mut db_status = "skipped";
    let mut overall_ok = true;

    if let Some(ref pool) = state.db_pool {
        match sqlx::query("SELECT 1").execute(pool).await {
            Ok(_) => db_status = "ok",
            Err(e) => {
                tracing::warn!(error = %e, "readiness database check failed");
                db_status = "error";
                overall_ok = false;
            }
        }
    }

    let status_code = if overall_ok {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };
    (
        status_code,
        Json(serde_json::json!({
            "status": if overall_ok { "ready" } else { "not ready" },
            "checks": {
                "database": db_status
            }
        })),
    )
        .into_response()
}

#[utoipa::path(
    get,
    path = "/metrics",
    responses(
        (status = 200, description = "Prometheus metrics"),
    )
)]
pub async fn metrics(State(state): State<AppState>) -> impl IntoResponse {
    let body = state.metrics.gather_metrics();
    (
        StatusCode::OK,
        [("content-type", "text/plain; version=0.0.4; charset=utf-8")],
        body,
    )
}

pub async fn openapi_json() -> impl IntoResponse {
    Json(ApiDoc::openapi())
}

#[utoipa::path(
    post,
    path = "/api/v1/auth/login",
    request_body = AuthenticateInput,
    responses(
        (status = 200, description = "Authenticated", body = AuthenticateOutput),
        (status = 401, description = "Invalid credentials"),
    )
)]
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<AuthenticateInput>,
) -> impl IntoResponse {
    match state.authenticate_uc.execute(&req).await {
        Ok(output) => (StatusCode::OK, Json(output)).into_response(),
        Err(AuthenticateError::InvalidCredentials) => ErrorResponse::new(
            error_codes::INVALID_CREDENTIALS,
            "Invalid username or password",
        )
        .into_response_with(StatusCode::UNAUTHORIZED),
        Err(e) => internal_error(&e),
    }
}
