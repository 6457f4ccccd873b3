use axum::{
    extract::{Path, Query, State},
    response::Json,
    routing::get,
    Router,
};
use serde::Deserialize;

use crate::{entities::operation_log, ApiResponse, ApiResult, AppState};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(recent))
        .route("/:table/:id", get(for_target))
}

#[derive(Debug, Deserialize)]
struct RecentQuery {
    limit: Option<u64>,
}

/// Most recent operation log entries.
#[utoipa::path(
    get,
    path = "/api/v1/logs",
    responses((status = 200, description = "Recent log entries")),
    tag = "logs"
)]
pub async fn recent(
    State(state): State<AppState>,
    Query(query): Query<RecentQuery>,
) -> ApiResult<Vec<operation_log::Model>> {
    let limit = query.limit.unwrap_or(50).min(state.config.api_max_page_size);
    let logs = state.services.audit.recent(limit).await?;
    Ok(Json(ApiResponse::success(logs)))
}

/// Full audit trail for one record.
#[utoipa::path(
    get,
    path = "/api/v1/logs/{table}/{id}",
    params(
        ("table" = String, Path, description = "Target table name"),
        ("id" = String, Path, description = "Target record id")
    ),
    responses((status = 200, description = "Audit trail, oldest first")),
    tag = "logs"
)]
pub async fn for_target(
    State(state): State<AppState>,
    Path((table, id)): Path<(String, String)>,
) -> ApiResult<Vec<operation_log::Model>> {
    let logs = state.services.audit.for_target(&table, &id).await?;
    Ok(Json(ApiResponse::success(logs)))
}
