use axum::{
    extract::{Path, Query, State},
    response::Json,
    routing::get,
    Router,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::{
    entities::inbound_order::{self, InboundStatus},
    auth::CurrentUser,
    errors::ServiceError,
    services::intake::{CreatePreAdviceRequest, OrderWithItems},
    ApiResponse, ApiResult, AppState, ListQuery, PaginatedResponse,
};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_orders).post(create_pre_advice))
        .route("/:id", get(get_order))
}

fn parse_status(value: &str) -> Result<InboundStatus, ServiceError> {
    match value.to_ascii_uppercase().as_str() {
        "IN_TRANSIT" => Ok(InboundStatus::InTransit),
        "ARRIVED" => Ok(InboundStatus::Arrived),
        "RECEIVED" => Ok(InboundStatus::Received),
        "COUNTED" => Ok(InboundStatus::Counted),
        "INSPECTING" => Ok(InboundStatus::Inspecting),
        "COMPLETED" => Ok(InboundStatus::Completed),
        other => Err(ServiceError::InvalidStatus(format!(
            "Unknown inbound status: {other}"
        ))),
    }
}

#[derive(Debug, Deserialize)]
struct InboundListQuery {
    status: Option<String>,
}

/// Lists inbound orders, newest first.
#[utoipa::path(
    get,
    path = "/api/v1/inbound-orders",
    responses(
        (status = 200, description = "Inbound order page"),
        (status = 400, description = "Invalid status filter", body = crate::errors::ErrorResponse)
    ),
    tag = "inbound"
)]
pub async fn list_orders(
    State(state): State<AppState>,
    Query(query): Query<InboundListQuery>,
    Query(list): Query<ListQuery>,
) -> ApiResult<PaginatedResponse<inbound_order::Model>> {
    let status = query.status.as_deref().map(parse_status).transpose()?;
    let (page, limit) = state.page_bounds(&list);
    let (orders, total) = state
        .services
        .intake
        .list_orders(status, page, limit)
        .await?;
    Ok(Json(ApiResponse::success(PaginatedResponse::new(
        orders, total, page, limit,
    ))))
}

/// Registers a pre-advised inbound order.
#[utoipa::path(
    post,
    path = "/api/v1/inbound-orders",
    responses(
        (status = 200, description = "Order created with expected items"),
        (status = 400, description = "Invalid request", body = crate::errors::ErrorResponse)
    ),
    tag = "inbound"
)]
pub async fn create_pre_advice(
    State(state): State<AppState>,
    user: CurrentUser,
    Json(request): Json<CreatePreAdviceRequest>,
) -> ApiResult<OrderWithItems> {
    let order = state
        .services
        .intake
        .create_pre_advice(request, &user)
        .await?;
    Ok(Json(ApiResponse::success(order)))
}

/// One inbound order with its item lines.
#[utoipa::path(
    get,
    path = "/api/v1/inbound-orders/{id}",
    params(("id" = Uuid, Path, description = "Inbound order id")),
    responses(
        (status = 200, description = "Order with items"),
        (status = 404, description = "Order not found", body = crate::errors::ErrorResponse)
    ),
    tag = "inbound"
)]
pub async fn get_order(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<OrderWithItems> {
    let order = state.services.intake.get_order(id).await?;
    Ok(Json(ApiResponse::success(order)))
}
