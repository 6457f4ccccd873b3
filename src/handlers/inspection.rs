use axum::{
    extract::{Path, Query, State},
    response::Json,
    routing::{get, post},
    Router,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    auth::CurrentUser,
    entities::{inspection, package},
    services::inspection::RecordResultRequest,
    ApiResponse, ApiResult, AppState,
};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/pending", get(list_pending))
        .route("/packages/:id/estimate", get(estimate_fee))
        .route("/packages/:id/submit", post(submit))
        .route("/items/:id/result", post(record_result))
}

/// Packages awaiting quality check.
#[utoipa::path(
    get,
    path = "/api/v1/inspection/pending",
    responses((status = 200, description = "Packages pending inspection")),
    tag = "inspection"
)]
pub async fn list_pending(State(state): State<AppState>) -> ApiResult<Vec<package::Model>> {
    let packages = state.services.inspection.list_pending().await?;
    Ok(Json(ApiResponse::success(packages)))
}

#[derive(Debug, Deserialize)]
struct EstimateQuery {
    standard: String,
}

#[derive(Debug, Serialize)]
struct FeeEstimate {
    standard: String,
    fee: Decimal,
}

/// Fee preview for a package under a given standard.
#[utoipa::path(
    get,
    path = "/api/v1/inspection/packages/{id}/estimate",
    params(
        ("id" = Uuid, Path, description = "Package id"),
        ("standard" = String, Query, description = "Inspection standard (apparel, electronics, general)")
    ),
    responses(
        (status = 200, description = "Estimated fee"),
        (status = 404, description = "Package not found", body = crate::errors::ErrorResponse)
    ),
    tag = "inspection"
)]
pub async fn estimate_fee(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(query): Query<EstimateQuery>,
) -> ApiResult<FeeEstimate> {
    let fee = state
        .services
        .inspection
        .estimate_fee(id, &query.standard)
        .await?;
    Ok(Json(ApiResponse::success(FeeEstimate {
        standard: query.standard,
        fee,
    })))
}

#[derive(Debug, Deserialize, utoipa::ToSchema)]
struct SubmitRequest {
    standard: String,
}

/// Completes the quality check and posts the inspection fee.
#[utoipa::path(
    post,
    path = "/api/v1/inspection/packages/{id}/submit",
    params(("id" = Uuid, Path, description = "Package id")),
    responses(
        (status = 200, description = "Inspection submitted"),
        (status = 404, description = "Package not found", body = crate::errors::ErrorResponse)
    ),
    tag = "inspection"
)]
pub async fn submit(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    user: CurrentUser,
    Json(request): Json<SubmitRequest>,
) -> ApiResult<package::Model> {
    let pkg = state
        .services
        .inspection
        .submit(id, &request.standard, &user)
        .await?;
    Ok(Json(ApiResponse::success(pkg)))
}

/// Records a per-item pass/fail outcome.
#[utoipa::path(
    post,
    path = "/api/v1/inspection/items/{id}/result",
    params(("id" = Uuid, Path, description = "Package item id")),
    responses(
        (status = 200, description = "Result recorded"),
        (status = 404, description = "Item not found", body = crate::errors::ErrorResponse)
    ),
    tag = "inspection"
)]
pub async fn record_result(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    user: CurrentUser,
    Json(request): Json<RecordResultRequest>,
) -> ApiResult<inspection::Model> {
    let record = state
        .services
        .inspection
        .record_result(id, request, &user)
        .await?;
    Ok(Json(ApiResponse::success(record)))
}
