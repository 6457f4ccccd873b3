use axum::{
    extract::{Path, State},
    response::Json,
    routing::{delete, get, post},
    Router,
};
use uuid::Uuid;

use crate::{
    auth::CurrentUser,
    entities::{package, package_item, product},
    services::counting::{FinishRequest, ItemDraft, RegisterProductRequest},
    ApiResponse, ApiResult, AppState,
};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/packages/:id/items", get(list_items).post(add_item))
        .route("/packages/:id/finish", post(finish))
        .route("/items/:id", delete(delete_item))
        .route("/products", post(register_product))
}

/// Lines counted so far for a package.
#[utoipa::path(
    get,
    path = "/api/v1/counting/packages/{id}/items",
    params(("id" = Uuid, Path, description = "Package id")),
    responses((status = 200, description = "Counted lines")),
    tag = "counting"
)]
pub async fn list_items(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Vec<package_item::Model>> {
    let items = state.services.counting.list_items(id).await?;
    Ok(Json(ApiResponse::success(items)))
}

/// Adds one counted line; LPN tags route to inspection automatically.
#[utoipa::path(
    post,
    path = "/api/v1/counting/packages/{id}/items",
    params(("id" = Uuid, Path, description = "Package id")),
    responses(
        (status = 200, description = "Line added"),
        (status = 400, description = "SKU not in catalog", body = crate::errors::ErrorResponse),
        (status = 404, description = "Package not found", body = crate::errors::ErrorResponse)
    ),
    tag = "counting"
)]
pub async fn add_item(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    user: CurrentUser,
    Json(draft): Json<ItemDraft>,
) -> ApiResult<package_item::Model> {
    let item = state.services.counting.add_item(id, draft, &user).await?;
    Ok(Json(ApiResponse::success(item)))
}

/// Removes a counted line.
#[utoipa::path(
    delete,
    path = "/api/v1/counting/items/{id}",
    params(("id" = Uuid, Path, description = "Item id")),
    responses(
        (status = 200, description = "Line removed"),
        (status = 404, description = "Item not found", body = crate::errors::ErrorResponse)
    ),
    tag = "counting"
)]
pub async fn delete_item(State(state): State<AppState>, Path(id): Path<Uuid>) -> ApiResult<()> {
    state.services.counting.delete_item(id).await?;
    Ok(Json(ApiResponse::success(())))
}

/// Closes the counting session: shelves stock, syncs the inbound order, and
/// moves the package to WaitInspect.
#[utoipa::path(
    post,
    path = "/api/v1/counting/packages/{id}/finish",
    params(("id" = Uuid, Path, description = "Package id")),
    responses(
        (status = 200, description = "Counting finished"),
        (status = 404, description = "Package not found", body = crate::errors::ErrorResponse)
    ),
    tag = "counting"
)]
pub async fn finish(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    user: CurrentUser,
    Json(request): Json<FinishRequest>,
) -> ApiResult<package::Model> {
    let pkg = state.services.counting.finish(id, request, &user).await?;
    Ok(Json(ApiResponse::success(pkg)))
}

/// Registers a product so its SKU passes the counting catalog gate.
#[utoipa::path(
    post,
    path = "/api/v1/counting/products",
    responses(
        (status = 200, description = "Product registered"),
        (status = 409, description = "SKU already registered", body = crate::errors::ErrorResponse)
    ),
    tag = "counting"
)]
pub async fn register_product(
    State(state): State<AppState>,
    Json(request): Json<RegisterProductRequest>,
) -> ApiResult<product::Model> {
    let product = state.services.counting.register_product(request).await?;
    Ok(Json(ApiResponse::success(product)))
}
