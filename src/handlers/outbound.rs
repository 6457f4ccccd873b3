use axum::{
    extract::{Path, Query, State},
    response::Json,
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::{
    auth::CurrentUser,
    entities::outbound_order::{self, OutboundStatus},
    errors::ServiceError,
    services::outbound::{AdvanceRequest, CreateOutboundRequest, OutboundOrderWithItems},
    ApiResponse, ApiResult, AppState, ListQuery, PaginatedResponse,
};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_orders).post(create_order))
        .route("/:id", get(get_order))
        .route("/:id/advance", post(advance))
}

fn parse_status(value: &str) -> Result<OutboundStatus, ServiceError> {
    match value.to_ascii_uppercase().as_str() {
        "PENDING" => Ok(OutboundStatus::Pending),
        "WAIT_LABEL_DATA" => Ok(OutboundStatus::WaitLabelData),
        "WAIT_CLIENT_LABEL" => Ok(OutboundStatus::WaitClientLabel),
        "PROCESSING" => Ok(OutboundStatus::Processing),
        "WAIT_SHIP" => Ok(OutboundStatus::WaitShip),
        "SHIPPED" => Ok(OutboundStatus::Shipped),
        other => Err(ServiceError::InvalidStatus(format!(
            "Unknown outbound status: {other}"
        ))),
    }
}

#[derive(Debug, Deserialize)]
struct OutboundListQuery {
    status: Option<String>,
}

/// Lists outbound orders, newest first.
#[utoipa::path(
    get,
    path = "/api/v1/outbound-orders",
    responses(
        (status = 200, description = "Outbound order page"),
        (status = 400, description = "Invalid status filter", body = crate::errors::ErrorResponse)
    ),
    tag = "outbound"
)]
pub async fn list_orders(
    State(state): State<AppState>,
    Query(query): Query<OutboundListQuery>,
    Query(list): Query<ListQuery>,
) -> ApiResult<PaginatedResponse<outbound_order::Model>> {
    let status = query.status.as_deref().map(parse_status).transpose()?;
    let (page, limit) = state.page_bounds(&list);
    let (orders, total) = state
        .services
        .outbound
        .list_orders(status, page, limit)
        .await?;
    Ok(Json(ApiResponse::success(PaginatedResponse::new(
        orders, total, page, limit,
    ))))
}

/// Creates an outbound order with its item lines.
#[utoipa::path(
    post,
    path = "/api/v1/outbound-orders",
    responses(
        (status = 200, description = "Order created"),
        (status = 400, description = "Invalid request", body = crate::errors::ErrorResponse),
        (status = 409, description = "Duplicate order number", body = crate::errors::ErrorResponse)
    ),
    tag = "outbound"
)]
pub async fn create_order(
    State(state): State<AppState>,
    user: CurrentUser,
    Json(request): Json<CreateOutboundRequest>,
) -> ApiResult<OutboundOrderWithItems> {
    let order = state.services.outbound.create_order(request, &user).await?;
    Ok(Json(ApiResponse::success(order)))
}

/// One outbound order with items.
#[utoipa::path(
    get,
    path = "/api/v1/outbound-orders/{id}",
    params(("id" = Uuid, Path, description = "Outbound order id")),
    responses(
        (status = 200, description = "Order with items"),
        (status = 404, description = "Order not found", body = crate::errors::ErrorResponse)
    ),
    tag = "outbound"
)]
pub async fn get_order(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<OutboundOrderWithItems> {
    let order = state.services.outbound.get_order(id).await?;
    Ok(Json(ApiResponse::success(order)))
}

/// Advances the order one step (pick, pack/VAS, or ship).
#[utoipa::path(
    post,
    path = "/api/v1/outbound-orders/{id}/advance",
    params(("id" = Uuid, Path, description = "Outbound order id")),
    responses(
        (status = 200, description = "Order advanced"),
        (status = 400, description = "Order already shipped", body = crate::errors::ErrorResponse),
        (status = 404, description = "Order not found", body = crate::errors::ErrorResponse),
        (status = 422, description = "Insufficient stock", body = crate::errors::ErrorResponse)
    ),
    tag = "outbound"
)]
pub async fn advance(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    user: CurrentUser,
    Json(request): Json<AdvanceRequest>,
) -> ApiResult<outbound_order::Model> {
    let order = state.services.outbound.advance(id, request, &user).await?;
    Ok(Json(ApiResponse::success(order)))
}
