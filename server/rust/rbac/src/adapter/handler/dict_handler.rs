use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Serialize;

use super::{internal_error, AppState};
use crate::domain::entity::dict::DictLst;

/// GET /api/v1/dicts/{dict_id}/items のレスポンス。
#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct DictItemsResponse {
    pub dict_id: i64,
    pub items: Vec<DictLst>,
}

#[utoipa::path(
    get,
    path = "/api/v1/dicts/{dict_id}/items",
    params(("dict_id" = i64, Path, description = "Dictionary ID")),
    responses(
        (status = 200, description = "Dictionary items ordered by sort", body = DictItemsResponse),
    )
)]
pub async fn list_dict_items(
    State(state): State<AppState>,
    Path(dict_id): Path<i64>,
) -> impl IntoResponse {
    match state.list_dict_items_uc.execute(dict_id).await {
        Ok(items) => (StatusCode::OK, Json(DictItemsResponse { dict_id, items })).into_response(),
        Err(e) => internal_error(&e),
    }
}
