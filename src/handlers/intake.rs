use axum::{
    extract::{Query, State},
    response::Json,
    routing::{get, post},
    Router,
};
use serde::Deserialize;

use crate::{
    auth::CurrentUser,
    entities::package,
    services::intake::{IntakeResolution, ReceiveRequest},
    ApiResponse, ApiResult, AppState,
};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/resolve", get(resolve))
        .route("/receive", post(receive))
}

#[derive(Debug, Deserialize)]
struct ResolveQuery {
    tracking_no: String,
}

/// Resolves a scanned tracking number, repairing orphaned inbound orders
/// along the way.
#[utoipa::path(
    get,
    path = "/api/v1/intake/resolve",
    params(("tracking_no" = String, Query, description = "Scanned tracking number")),
    responses(
        (status = 200, description = "Resolution outcome"),
        (status = 400, description = "Missing tracking number", body = crate::errors::ErrorResponse)
    ),
    tag = "intake"
)]
pub async fn resolve(
    State(state): State<AppState>,
    Query(query): Query<ResolveQuery>,
    user: CurrentUser,
) -> ApiResult<IntakeResolution> {
    let resolution = state
        .services
        .intake
        .resolve(&query.tracking_no, &user)
        .await?;
    Ok(Json(ApiResponse::success(resolution)))
}

/// Receives a parcel at the dock (pre-advised or blind).
#[utoipa::path(
    post,
    path = "/api/v1/intake/receive",
    responses(
        (status = 200, description = "Package created"),
        (status = 400, description = "Invalid request", body = crate::errors::ErrorResponse),
        (status = 409, description = "Duplicate tracking number", body = crate::errors::ErrorResponse)
    ),
    tag = "intake"
)]
pub async fn receive(
    State(state): State<AppState>,
    user: CurrentUser,
    Json(request): Json<ReceiveRequest>,
) -> ApiResult<package::Model> {
    let pkg = state.services.intake.receive(request, &user).await?;
    Ok(Json(ApiResponse::success(pkg)))
}
