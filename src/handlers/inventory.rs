use axum::{
    extract::{Path, Query, State},
    response::Json,
    routing::{get, post},
    Router,
};
use serde::Deserialize;

use crate::{
    entities::inventory_record,
    ApiResponse, ApiResult, AppState, ListQuery, PaginatedResponse,
};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list))
        .route("/adjust", post(adjust))
        .route("/:id", get(get_record))
}

#[derive(Debug, Deserialize)]
struct InventoryQuery {
    client: Option<String>,
    sku: Option<String>,
}

/// On-hand balances, optionally narrowed by client and/or SKU.
#[utoipa::path(
    get,
    path = "/api/v1/inventory",
    responses((status = 200, description = "Inventory page")),
    tag = "inventory"
)]
pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<InventoryQuery>,
    Query(list): Query<ListQuery>,
) -> ApiResult<PaginatedResponse<inventory_record::Model>> {
    let (page, limit) = state.page_bounds(&list);
    let (records, total) = state
        .services
        .inventory
        .list(query.client.as_deref(), query.sku.as_deref(), page, limit)
        .await?;
    Ok(Json(ApiResponse::success(PaginatedResponse::new(
        records, total, page, limit,
    ))))
}

/// One balance row by its slug id.
#[utoipa::path(
    get,
    path = "/api/v1/inventory/{id}",
    params(("id" = String, Path, description = "Inventory record id (client_sku_location slug)")),
    responses(
        (status = 200, description = "Inventory record"),
        (status = 404, description = "Record not found", body = crate::errors::ErrorResponse)
    ),
    tag = "inventory"
)]
pub async fn get_record(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<inventory_record::Model> {
    let record = state.services.inventory.get(&id).await?;
    Ok(Json(ApiResponse::success(record)))
}

#[derive(Debug, Deserialize, utoipa::ToSchema)]
struct AdjustRequest {
    client: String,
    sku: String,
    /// Required for additions; ignored for deductions, which consume the
    /// first location holding enough stock.
    location: Option<String>,
    qty: i32,
    #[serde(default)]
    deduct: bool,
}

/// Manual stock adjustment (add to a location, or deduct first-match).
#[utoipa::path(
    post,
    path = "/api/v1/inventory/adjust",
    responses(
        (status = 200, description = "Adjusted record"),
        (status = 400, description = "Invalid adjustment", body = crate::errors::ErrorResponse),
        (status = 422, description = "Insufficient stock", body = crate::errors::ErrorResponse)
    ),
    tag = "inventory"
)]
pub async fn adjust(
    State(state): State<AppState>,
    Json(request): Json<AdjustRequest>,
) -> ApiResult<inventory_record::Model> {
    let record = if request.deduct {
        state
            .services
            .inventory
            .deduct(&request.client, &request.sku, request.qty)
            .await?
    } else {
        let location = request
            .location
            .as_deref()
            .unwrap_or(&state.config.fallback_location);
        state
            .services
            .inventory
            .accumulate(&request.client, &request.sku, location, request.qty)
            .await?
    };
    Ok(Json(ApiResponse::success(record)))
}
