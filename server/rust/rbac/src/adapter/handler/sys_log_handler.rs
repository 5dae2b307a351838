use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use super::{error_codes, internal_error, AppState, ErrorResponse};
use crate::domain::entity::sys_log::{
    CreateSysLogRequest, CreateSysLogResponse, SysLogSearchResult,
};
use crate::usecase::record_sys_log::RecordSysLogError;
use crate::usecase::search_sys_logs::{SearchSysLogsError, SearchSysLogsQueryParams};

#[utoipa::path(
    post,
    path = "/api/v1/sys-logs",
    request_body = CreateSysLogRequest,
    responses(
        (status = 201, description = "Operation log recorded", body = CreateSysLogResponse),
        (status = 400, description = "Validation failed"),
    )
)]
pub async fn record_sys_log(
    State(state): State<AppState>,
    Json(req): Json<CreateSysLogRequest>,
) -> impl IntoResponse {
    match state.record_sys_log_uc.execute(req).await {
        Ok(response) => (StatusCode::CREATED, Json(response)).into_response(),
        Err(RecordSysLogError::Validation(msg)) => {
            ErrorResponse::new(error_codes::VALIDATION_FAILED, "Invalid operation log")
                .with_details(vec![msg])
                .into_response_with(StatusCode::BAD_REQUEST)
        }
        Err(e) => internal_error(&e),
    }
}

#[utoipa::path(
    get,
    path = "/api/v1/sys-logs",
    params(
        ("keyword" = Option<String>, Query, description = "Matches operator, request URL or method"),
        ("begin_time" = Option<String>, Query, description = "RFC 3339 lower bound (inclusive)"),
        ("end_time" = Option<String>, Query, description = "RFC 3339 upper bound (inclusive)"),
        ("page" = Option<i32>, Query, description = "Page number"),
        ("page_size" = Option<i32>, Query, description = "Page size"),
    ),
    responses(
        (status = 200, description = "Operation log search results", body = SysLogSearchResult),
        (status = 400, description = "Bad request"),
    )
)]
pub async fn search_sys_logs(
    State(state): State<AppState>,
    Query(params): Query<SearchSysLogsQueryParams>,
) -> impl IntoResponse {
    match state.search_sys_logs_uc.execute(&params).await {
        Ok(result) => (StatusCode::OK, Json(result)).into_response(),
        Err(SearchSysLogsError::Internal(msg)) => internal_error(&msg),
        Err(e) => ErrorResponse::new(error_codes::VALIDATION_FAILED, "Invalid search parameters")
            .with_details(vec![e.to_string()])
            .into_response_with(StatusCode::BAD_REQUEST),
    }
}
