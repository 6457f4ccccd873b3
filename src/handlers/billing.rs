use axum::{
    extract::{Path, Query, State},
    response::Json,
    routing::{delete, get, post},
    Router,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    auth::CurrentUser,
    entities::{finance_account, finance_rule, finance_transaction},
    errors::ServiceError,
    services::billing::UpsertRuleRequest,
    ApiResponse, ApiResult, AppState, ListQuery, PaginatedResponse,
};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/rules", get(list_rules).post(upsert_rule))
        .route("/rules/:id", delete(delete_rule))
        .route("/quote", get(quote))
        .route("/accounts", get(list_accounts))
        .route("/accounts/:client", get(get_account))
        .route("/accounts/:client/topup", post(top_up))
        .route("/transactions", get(list_transactions))
}

#[derive(Debug, Deserialize)]
struct RulesQuery {
    rule_type: Option<String>,
}

/// Billing rules, optionally filtered by fee category.
#[utoipa::path(
    get,
    path = "/api/v1/billing/rules",
    responses((status = 200, description = "Billing rules")),
    tag = "billing"
)]
pub async fn list_rules(
    State(state): State<AppState>,
    Query(query): Query<RulesQuery>,
) -> ApiResult<Vec<finance_rule::Model>> {
    let rules = state
        .services
        .billing
        .list_rules(query.rule_type.as_deref())
        .await?;
    Ok(Json(ApiResponse::success(rules)))
}

/// Creates or updates a billing rule.
#[utoipa::path(
    post,
    path = "/api/v1/billing/rules",
    responses(
        (status = 200, description = "Rule stored"),
        (status = 400, description = "Invalid rule", body = crate::errors::ErrorResponse)
    ),
    tag = "billing"
)]
pub async fn upsert_rule(
    State(state): State<AppState>,
    Json(request): Json<UpsertRuleRequest>,
) -> ApiResult<finance_rule::Model> {
    let rule = state.services.billing.upsert_rule(request).await?;
    Ok(Json(ApiResponse::success(rule)))
}

/// Deletes a billing rule.
#[utoipa::path(
    delete,
    path = "/api/v1/billing/rules/{id}",
    params(("id" = Uuid, Path, description = "Rule id")),
    responses(
        (status = 200, description = "Rule deleted"),
        (status = 404, description = "Rule not found", body = crate::errors::ErrorResponse)
    ),
    tag = "billing"
)]
pub async fn delete_rule(State(state): State<AppState>, Path(id): Path<Uuid>) -> ApiResult<()> {
    state.services.billing.delete_rule(id).await?;
    Ok(Json(ApiResponse::success(())))
}

#[derive(Debug, Deserialize)]
struct QuoteQuery {
    client: String,
    fee_type: String,
    qty: i32,
    condition: Option<String>,
}

#[derive(Debug, Serialize)]
struct QuoteResponse {
    fee_type: String,
    qty: i32,
    amount: Decimal,
}

/// Fee preview without posting anything.
#[utoipa::path(
    get,
    path = "/api/v1/billing/quote",
    params(
        ("client" = String, Query, description = "Client name"),
        ("fee_type" = String, Query, description = "Fee category"),
        ("qty" = i32, Query, description = "Billable quantity"),
        ("condition" = Option<String>, Query, description = "Optional rule condition")
    ),
    responses((status = 200, description = "Quoted amount, zero when no rule applies")),
    tag = "billing"
)]
pub async fn quote(
    State(state): State<AppState>,
    Query(query): Query<QuoteQuery>,
) -> ApiResult<QuoteResponse> {
    let amount = state
        .services
        .billing
        .quote(
            &query.client,
            &query.fee_type,
            query.qty,
            query.condition.as_deref(),
        )
        .await?;
    Ok(Json(ApiResponse::success(QuoteResponse {
        fee_type: query.fee_type,
        qty: query.qty,
        amount,
    })))
}

/// All prepaid accounts.
#[utoipa::path(
    get,
    path = "/api/v1/billing/accounts",
    responses((status = 200, description = "Accounts")),
    tag = "billing"
)]
pub async fn list_accounts(
    State(state): State<AppState>,
) -> ApiResult<Vec<finance_account::Model>> {
    let accounts = state.services.billing.list_accounts().await?;
    Ok(Json(ApiResponse::success(accounts)))
}

/// One client's account.
#[utoipa::path(
    get,
    path = "/api/v1/billing/accounts/{client}",
    params(("client" = String, Path, description = "Client name")),
    responses(
        (status = 200, description = "Account"),
        (status = 404, description = "Account not found", body = crate::errors::ErrorResponse)
    ),
    tag = "billing"
)]
pub async fn get_account(
    State(state): State<AppState>,
    Path(client): Path<String>,
) -> ApiResult<finance_account::Model> {
    let account = state.services.billing.get_account(&client).await?;
    Ok(Json(ApiResponse::success(account)))
}

#[derive(Debug, Deserialize, utoipa::ToSchema)]
struct TopUpRequest {
    amount: Decimal,
}

/// Credits a client's prepaid balance.
#[utoipa::path(
    post,
    path = "/api/v1/billing/accounts/{client}/topup",
    params(("client" = String, Path, description = "Client name")),
    responses(
        (status = 200, description = "Recharge posted"),
        (status = 400, description = "Non-positive amount", body = crate::errors::ErrorResponse)
    ),
    tag = "billing"
)]
pub async fn top_up(
    State(state): State<AppState>,
    Path(client): Path<String>,
    user: CurrentUser,
    Json(request): Json<TopUpRequest>,
) -> ApiResult<finance_transaction::Model> {
    if request.amount <= Decimal::ZERO {
        return Err(ServiceError::BillingError(
            "Recharge amount must be positive".to_string(),
        ));
    }
    let tx = state
        .services
        .billing
        .top_up(&client, request.amount, &user.username)
        .await?;
    Ok(Json(ApiResponse::success(tx)))
}

#[derive(Debug, Deserialize)]
struct TransactionsQuery {
    client: Option<String>,
}

/// Ledger history, newest first.
#[utoipa::path(
    get,
    path = "/api/v1/billing/transactions",
    responses((status = 200, description = "Transaction page")),
    tag = "billing"
)]
pub async fn list_transactions(
    State(state): State<AppState>,
    Query(query): Query<TransactionsQuery>,
    Query(list): Query<ListQuery>,
) -> ApiResult<PaginatedResponse<finance_transaction::Model>> {
    let (page, limit) = state.page_bounds(&list);
    let (transactions, total) = state
        .services
        .billing
        .list_transactions(query.client.as_deref(), page, limit)
        .await?;
    Ok(Json(ApiResponse::success(PaginatedResponse::new(
        transactions,
        total,
        page,
        limit,
    ))))
}
