//! OpenAPI document and Swagger UI wiring.

use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::handlers;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Warehouse Operations API",
        description = "Package intake, counting, quality inspection, inventory, outbound fulfillment, and prepaid billing.",
        version = env!("CARGO_PKG_VERSION")
    ),
    paths(
        handlers::health::liveness,
        handlers::health::readiness,
        handlers::intake::resolve,
        handlers::intake::receive,
        handlers::inbound::list_orders,
        handlers::inbound::create_pre_advice,
        handlers::inbound::get_order,
        handlers::counting::list_items,
        handlers::counting::add_item,
        handlers::counting::delete_item,
        handlers::counting::finish,
        handlers::counting::register_product,
        handlers::inspection::list_pending,
        handlers::inspection::estimate_fee,
        handlers::inspection::submit,
        handlers::inspection::record_result,
        handlers::outbound::list_orders,
        handlers::outbound::create_order,
        handlers::outbound::get_order,
        handlers::outbound::advance,
        handlers::billing::list_rules,
        handlers::billing::upsert_rule,
        handlers::billing::delete_rule,
        handlers::billing::quote,
        handlers::billing::list_accounts,
        handlers::billing::get_account,
        handlers::billing::top_up,
        handlers::billing::list_transactions,
        handlers::inventory::list,
        handlers::inventory::get_record,
        handlers::inventory::adjust,
        handlers::logs::recent,
        handlers::logs::for_target,
    ),
    components(schemas(crate::errors::ErrorResponse)),
    tags(
        (name = "health", description = "Liveness and readiness probes"),
        (name = "intake", description = "Package receiving at the dock"),
        (name = "inbound", description = "Pre-advised inbound orders"),
        (name = "counting", description = "Item counting and SKU mapping"),
        (name = "inspection", description = "Quality inspection"),
        (name = "outbound", description = "Outbound pick, pack, and ship"),
        (name = "billing", description = "Billing rules, accounts, and ledger"),
        (name = "inventory", description = "On-hand stock balances"),
        (name = "logs", description = "Operation audit trail")
    )
)]
pub struct ApiDoc;

pub fn swagger_ui() -> SwaggerUi {
    SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi())
}
