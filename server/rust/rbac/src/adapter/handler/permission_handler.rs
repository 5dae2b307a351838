use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Serialize;

use super::{error_codes, internal_error, AppState, ErrorResponse};
use crate::domain::entity::href_permission::HrefPermission;
use crate::domain::entity::role::Role;
use crate::usecase::check_href_permission::{CheckHrefPermissionInput, CheckHrefPermissionOutput};
use crate::usecase::get_user_roles::GetUserRolesError;

/// GET /api/v1/users/{user_id}/href-permissions のレスポンス。
#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct UserHrefPermissionsResponse {
    pub user_id: i64,
    pub href_permissions: Vec<HrefPermission>,
}

/// GET /api/v1/href-permissions のレスポンス。
#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct AllHrefPermissionsResponse {
    pub href_permissions: Vec<HrefPermission>,
}

/// GET /api/v1/users/{user_id}/roles のレスポンス。
#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct UserRolesResponse {
    pub user_id: i64,
    pub roles: Vec<Role>,
}

#[utoipa::path(
    get,
    path = "/api/v1/users/{user_id}/href-permissions",
    params(("user_id" = i64, Path, description = "User ID")),
    responses(
        (status = 200, description = "Href permissions of the user", body = UserHrefPermissionsResponse),
    )
)]
pub async fn get_user_href_permissions(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
) -> impl IntoResponse {
    match state.resolve_href_permissions_uc.execute(user_id).await {
        Ok(permissions) => (
            StatusCode::OK,
            Json(UserHrefPermissionsResponse {
                user_id,
                href_permissions: permissions.iter().cloned().collect(),
            }),
        )
            .into_response(),
        Err(e) => internal_error(&e),
    }
}

#[utoipa::path(
    delete,
    path = "/api/v1/users/{user_id}/href-permissions/cache",
    params(("user_id" = i64, Path, description = "User ID")),
    responses(
        (status = 204, description = "Cache entry invalidated"),
    )
)]
pub async fn invalidate_user_href_permissions(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
) -> impl IntoResponse {
    state
        .invalidate_href_permissions_uc
        .invalidate_user(user_id)
        .await;
    StatusCode::NO_CONTENT
}

#[utoipa::path(
    get,
    path = "/api/v1/users/{user_id}/roles",
    params(("user_id" = i64, Path, description = "User ID")),
    responses(
        (status = 200, description = "Roles of the user", body = UserRolesResponse),
        (status = 404, description = "User not found"),
    )
)]
pub async fn get_user_roles(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
) -> impl IntoResponse {
    match state.get_user_roles_uc.execute(user_id).await {
        Ok(roles) => (StatusCode::OK, Json(UserRolesResponse { user_id, roles })).into_response(),
        Err(GetUserRolesError::NotFound(_)) => ErrorResponse::new(
            error_codes::USER_NOT_FOUND,
            "The specified user was not found",
        )
        .into_response_with(StatusCode::NOT_FOUND),
        Err(e) => internal_error(&e),
    }
}

#[utoipa::path(
    get,
    path = "/api/v1/href-permissions",
    responses(
        (status = 200, description = "Href permissions granted by any role", body = AllHrefPermissionsResponse),
    )
)]
pub async fn get_all_href_permissions(State(state): State<AppState>) -> impl IntoResponse {
    match state.resolve_href_permissions_uc.execute_all().await {
        Ok(permissions) => (
            StatusCode::OK,
            Json(AllHrefPermissionsResponse {
                href_permissions: permissions.iter().cloned().collect(),
            }),
        )
            .into_response(),
        Err(e) => internal_error(&e),
    }
}

#[utoipa::path(
    delete,
    path = "/api/v1/href-permissions/cache",
    responses(
        (status = 204, description = "All cache entries invalidated"),
    )
)]
pub async fn invalidate_all_href_permissions(State(state): State<AppState>) -> impl IntoResponse {
    state.invalidate_href_permissions_uc.invalidate_all();
    StatusCode::NO_CONTENT
}

#[utoipa::path(
    post,
    path = "/api/v1/href-permissions/check",
    request_body = CheckHrefPermissionInput,
    responses(
        (status = 200, description = "Check result", body = CheckHrefPermissionOutput),
    )
)]
pub async fn check_href_permission(
    State(state): State<AppState>,
    Json(req): Json<CheckHrefPermissionInput>,
) -> impl IntoResponse {
    match state.check_href_permission_uc.execute(&req).await {
        Ok(output) => (StatusCode::OK, Json(output)).into_response(),
        Err(e) => internal_error(&e),
    }
}
