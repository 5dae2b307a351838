pub mod auth_handler;
pub mod dict_handler;
pub mod permission_handler;
pub mod sys_log_handler;

use std::sync::Arc;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{delete, get, post};
use axum::{Json, Router};
use keep_telemetry::metrics::Metrics;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;

use crate::domain::repository::Repositories;
use crate::infrastructure::PermissionCache;
use crate::usecase::{
    AuthenticateUseCase, CheckHrefPermissionUseCase, GetUserRolesUseCase,
    InvalidateHrefPermissionsUseCase, ListDictItemsUseCase, LoadUserByUsernameUseCase,
    RecordSysLogUseCase, ResolveHrefPermissionsUseCase, SearchSysLogsUseCase,
};

/// AppState はアプリケーション全体の共有状態を表す。
#[derive(Clone)]
pub struct AppState {
    pub resolve_href_permissions_uc: Arc<ResolveHrefPermissionsUseCase>,
    pub invalidate_href_permissions_uc: Arc<InvalidateHrefPermissionsUseCase>,
    pub authenticate_uc: Arc<AuthenticateUseCase>,
    pub get_user_roles_uc: Arc<GetUserRolesUseCase>,
    pub check_href_permission_uc: Arc<CheckHrefPermissionUseCase>,
    pub list_dict_items_uc: Arc<ListDictItemsUseCase>,
    pub search_sys_logs_uc: Arc<SearchSysLogsUseCase>,
    pub record_sys_log_uc: Arc<RecordSysLogUseCase>,
    pub metrics: Arc<Metrics>,
    pub db_pool: Option<sqlx::PgPool>,
}

impl AppState {
    pub fn new(
        repos: Repositories,
        cache: PermissionCache,
        metrics: Arc<Metrics>,
        db_pool: Option<sqlx::PgPool>,
    ) -> Self {
        let resolve_uc = Arc::new(
            ResolveHrefPermissionsUseCase::from_repositories(&repos, cache.clone())
                .with_metrics(metrics.clone()),
        );
        let load_user_uc = Arc::new(LoadUserByUsernameUseCase::new(
            repos.users.clone(),
            resolve_uc.clone(),
        ));

        Self {
            invalidate_href_permissions_uc: Arc::new(InvalidateHrefPermissionsUseCase::new(cache)),
            authenticate_uc: Arc::new(AuthenticateUseCase::new(load_user_uc)),
            get_user_roles_uc: Arc::new(GetUserRolesUseCase::new(
                repos.users.clone(),
                repos.user_roles.clone(),
                repos.roles.clone(),
            )),
            check_href_permission_uc: Arc::new(CheckHrefPermissionUseCase::new(resolve_uc.clone())),
            list_dict_items_uc: Arc::new(ListDictItemsUseCase::new(repos.dict_items.clone())),
            search_sys_logs_uc: Arc::new(SearchSysLogsUseCase::new(repos.sys_logs.clone())),
            record_sys_log_uc: Arc::new(RecordSysLogUseCase::new(repos.sys_logs)),
            resolve_href_permissions_uc: resolve_uc,
            metrics,
            db_pool,
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        auth_handler::healthz,
        auth_handler::readyz,
        auth_handler::metrics,
        auth_handler::login,
        permission_handler::get_user_href_permissions,
        permission_handler::invalidate_user_href_permissions,
        permission_handler::get_user_roles,
        permission_handler::get_all_href_permissions,
        permission_handler::invalidate_all_href_permissions,
        permission_handler::check_href_permission,
        dict_handler::list_dict_items,
        sys_log_handler::search_sys_logs,
        sys_log_handler::record_sys_log,
    ),
    components(schemas(
        crate::domain::entity::href_permission::HrefPermission,
        crate::domain::entity::role::Role,
        crate::domain::entity::role::RoleStatus,
        crate::domain::entity::dict::DictLst,
        crate::domain::entity::sys_log::SysLog,
        crate::domain::entity::sys_log::Pagination,
        crate::domain::entity::sys_log::SysLogSearchResult,
        crate::domain::entity::sys_log::CreateSysLogRequest,
        crate::domain::entity::sys_log::CreateSysLogResponse,
        crate::usecase::authenticate::AuthenticateInput,
        crate::usecase::authenticate::AuthenticateOutput,
        crate::usecase::check_href_permission::CheckHrefPermissionInput,
        crate::usecase::check_href_permission::CheckHrefPermissionOutput,
        permission_handler::UserHrefPermissionsResponse,
        permission_handler::AllHrefPermissionsResponse,
        permission_handler::UserRolesResponse,
        dict_handler::DictItemsResponse,
    ))
)]
pub struct ApiDoc;

/// Build the REST API router.
pub fn router(state: AppState) -> Router {
    Router::new()
        // Health / Readiness / Metrics
        .route("/healthz", get(auth_handler::healthz))
        .route("/readyz", get(auth_handler::readyz))
        .route("/metrics", get(auth_handler::metrics))
        .route("/api-docs/openapi.json", get(auth_handler::openapi_json))
        // Authentication
        .route("/api/v1/auth/login", post(auth_handler::login))
        // Href permissions
        .route(
            "/api/v1/users/{user_id}/href-permissions",
            get(permission_handler::get_user_href_permissions),
        )
        .route(
            "/api/v1/users/{user_id}/href-permissions/cache",
            delete(permission_handler::invalidate_user_href_permissions),
        )
        .route(
            "/api/v1/users/{user_id}/roles",
            get(permission_handler::get_user_roles),
        )
        .route(
            "/api/v1/href-permissions",
            get(permission_handler::get_all_href_permissions),
        )
        .route(
            "/api/v1/href-permissions/cache",
            delete(permission_handler::invalidate_all_href_permissions),
        )
        .route(
            "/api/v1/href-permissions/check",
            post(permission_handler::check_href_permission),
        )
        // Data dictionary
        .route(
            "/api/v1/dicts/{dict_id}/items",
            get(dict_handler::list_dict_items),
        )
        // Operation logs
        .route(
            "/api/v1/sys-logs",
            get(sys_log_handler::search_sys_logs).post(sys_log_handler::record_sys_log),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// ErrorResponse は統一エラーレスポンス。
#[derive(Debug, serde::Serialize)]
pub struct ErrorResponse {
    pub error: ErrorBody,
}

#[derive(Debug, serde::Serialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
    pub request_id: String,
    pub details: Vec<String>,
}

impl ErrorResponse {
    pub fn new(code: &str, message: &str) -> Self {
        Self {
            error: ErrorBody {
                code: code.to_string(),
                message: message.to_string(),
                request_id: uuid::Uuid::new_v4().to_string(),
                details: vec![],
            },
        }
    }

    #[must_use]
    pub fn with_details(mut self, details: Vec<String>) -> Self {
        self.error.details = details;
        self
    }

    /// into_response_with はステータスコードと組み合わせて axum のレスポンスに変換する。
    pub fn into_response_with(self, status: StatusCode) -> Response {
        (status, Json(self)).into_response()
    }
}

/// error_codes はこのサーバーが返すエラーコード。
pub mod error_codes {
    pub const USER_NOT_FOUND: &str = "SYS_RBAC_USER_NOT_FOUND";
    pub const INVALID_CREDENTIALS: &str = "SYS_RBAC_INVALID_CREDENTIALS";
    pub const VALIDATION_FAILED: &str = "SYS_RBAC_VALIDATION_FAILED";
    pub const INTERNAL_ERROR: &str = "SYS_RBAC_INTERNAL_ERROR";
}

/// internal_error は内部エラーをログに残し、詳細を伏せた 500 レスポンスを返す。
pub(crate) fn internal_error(err: &dyn std::fmt::Display) -> Response {
    tracing::error!(error = %err, "request failed with internal error");
    ErrorResponse::new(error_codes::INTERNAL_ERROR, "An internal error occurred")
        .into_response_with(StatusCode::INTERNAL_SERVER_ERROR)
}
