use chrono::Utc;
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set, TransactionTrait,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;
use tracing::{info, instrument};
use uuid::Uuid;
use validator::Validate;

use crate::{
    auth::CurrentUser,
    entities::outbound_item::{self, Entity as OutboundItem},
    entities::outbound_order::{self, Entity as OutboundOrder, OutboundStatus, ServiceType},
    errors::ServiceError,
    events::{Event, EventSender},
    services::{audit, billing, inventory},
};

/// The picking fee is charged per assumed unit; the unit count is a flat
/// simplification carried over from the manual process.
const PICKING_UNIT_COUNT: i32 = 10;

#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct OutboundItemDraft {
    pub sku: String,
    pub qty: i32,
    pub new_fnsku: Option<String>,
}

#[derive(Debug, Deserialize, Validate, utoipa::ToSchema)]
pub struct CreateOutboundRequest {
    #[validate(length(min = 1, message = "Order number is required"))]
    pub order_no: String,
    #[validate(length(min = 1, message = "Client is required"))]
    pub client: String,
    pub carrier: Option<String>,
    #[serde(default = "default_service_type")]
    pub service_type: ServiceType,
    pub remark: Option<String>,
    pub attachments: Option<serde_json::Value>,
    #[validate(length(min = 1, message = "At least one item is required"))]
    pub items: Vec<OutboundItemDraft>,
}

fn default_service_type() -> ServiceType {
    ServiceType::Standard
}

/// Operator inputs for the pack/VAS step; the other steps need none.
#[derive(Debug, Default, Deserialize, utoipa::ToSchema)]
pub struct AdvanceRequest {
    pub material_type: Option<String>,
    #[serde(default)]
    pub material_qty: i32,
    #[serde(default)]
    pub pallet_qty: i32,
    #[serde(default)]
    pub label_count: i32,
}

#[derive(Debug, Serialize)]
pub struct OutboundOrderWithItems {
    #[serde(flatten)]
    pub order: outbound_order::Model,
    pub items: Vec<outbound_item::Model>,
}

/// Outbound fulfillment: order creation and the pick → pack → ship machine.
#[derive(Clone)]
pub struct OutboundService {
    db: Arc<DatabaseConnection>,
    event_sender: EventSender,
}

impl OutboundService {
    pub fn new(db: Arc<DatabaseConnection>, event_sender: EventSender) -> Self {
        Self { db, event_sender }
    }

    #[instrument(skip(self, request, user), fields(order_no = %request.order_no))]
    pub async fn create_order(
        &self,
        request: CreateOutboundRequest,
        user: &CurrentUser,
    ) -> Result<OutboundOrderWithItems, ServiceError> {
        request.validate()?;

        for line in &request.items {
            if line.sku.trim().is_empty() {
                return Err(ServiceError::ValidationError(
                    "Every item needs a SKU".to_string(),
                ));
            }
            if line.qty <= 0 {
                return Err(ServiceError::ValidationError(format!(
                    "Quantity for {} must be positive",
                    line.sku
                )));
            }
            if request.service_type == ServiceType::Relabel
                && line
                    .new_fnsku
                    .as_deref()
                    .map(str::trim)
                    .filter(|f| !f.is_empty())
                    .is_none()
            {
                return Err(ServiceError::ValidationError(format!(
                    "Relabel orders require a new FNSKU on every item ({} is missing one)",
                    line.sku
                )));
            }
        }

        if OutboundOrder::find()
            .filter(outbound_order::Column::OrderNo.eq(request.order_no.as_str()))
            .one(&*self.db)
            .await?
            .is_some()
        {
            return Err(ServiceError::Conflict(format!(
                "Outbound order {} already exists",
                request.order_no
            )));
        }

        // Relabel orders wait for label data before picking can start.
        let initial_status = match request.service_type {
            ServiceType::Relabel => OutboundStatus::WaitLabelData,
            ServiceType::Standard => OutboundStatus::Pending,
        };

        let txn = self.db.begin().await?;
        let now = Utc::now();

        let order = outbound_order::ActiveModel {
            id: Set(Uuid::new_v4()),
            order_no: Set(request.order_no.clone()),
            client: Set(request.client.clone()),
            carrier: Set(request.carrier.clone()),
            status: Set(initial_status),
            service_type: Set(request.service_type),
            remark: Set(request.remark.clone()),
            attachments: Set(request.attachments.clone()),
            created_at: Set(now),
            shipped_at: Set(None),
        };
        let order = order.insert(&txn).await?;

        let mut items = Vec::with_capacity(request.items.len());
        for line in &request.items {
            let item = outbound_item::ActiveModel {
                id: Set(Uuid::new_v4()),
                order_id: Set(order.id),
                sku: Set(line.sku.trim().to_string()),
                qty: Set(line.qty),
                new_fnsku: Set(line
                    .new_fnsku
                    .as_deref()
                    .map(str::trim)
                    .filter(|f| !f.is_empty())
                    .map(str::to_string)),
            };
            items.push(item.insert(&txn).await?);
        }

        audit::record(
            &txn,
            "outbound_orders",
            &order.id.to_string(),
            "CREATE",
            &user.username,
            json!({ "order_no": order.order_no, "items": items.len() }),
        )
        .await?;
        txn.commit().await?;

        let _ = self.event_sender.send(Event::OutboundOrderCreated(order.id)).await;

        Ok(OutboundOrderWithItems { order, items })
    }

    /// Advances the order one step along pick → pack/VAS → ship, keyed off
    /// its current status. Each step runs in one transaction; a failed fee
    /// post or stock deduction rolls the whole step back.
    #[instrument(skip(self, request, user), fields(order_id = %order_id))]
    pub async fn advance(
        &self,
        order_id: Uuid,
        request: AdvanceRequest,
        user: &CurrentUser,
    ) -> Result<outbound_order::Model, ServiceError> {
        let order = OutboundOrder::find_by_id(order_id)
            .one(&*self.db)
            .await?
            .ok_or_else(|| {
                ServiceError::NotFound(format!("Outbound order {} not found", order_id))
            })?;

        match order.status {
            OutboundStatus::Pending
            | OutboundStatus::WaitLabelData
            | OutboundStatus::WaitClientLabel => self.pick(order, user).await,
            OutboundStatus::Processing => self.pack(order, request, user).await,
            OutboundStatus::WaitShip => self.ship(order, user).await,
            OutboundStatus::Shipped => Err(ServiceError::InvalidStatus(format!(
                "Outbound order {} is already shipped",
                order.order_no
            ))),
        }
    }

    async fn pick(
        &self,
        order: outbound_order::Model,
        user: &CurrentUser,
    ) -> Result<outbound_order::Model, ServiceError> {
        let txn = self.db.begin().await?;

        let mut fee = Decimal::ZERO;
        let mut balance_after = None;
        if let Some(rule) =
            billing::resolve_rule(&txn, &order.client, "outbound_picking", None).await?
        {
            fee = rule.price * Decimal::from(PICKING_UNIT_COUNT);
            if fee > Decimal::ZERO {
                let description = format!("Picking Fee: {}", order.order_no);
                let tx = billing::post_deduction(
                    &txn,
                    &order.client,
                    fee,
                    &description,
                    Some(&order.order_no),
                    &user.username,
                )
                .await?;
                balance_after = Some(tx.balance_after);
            }
        }

        let order_id = order.id;
        let client = order.client.clone();
        let mut active: outbound_order::ActiveModel = order.into();
        active.status = Set(OutboundStatus::Processing);
        let updated = active.update(&txn).await?;

        audit::record(
            &txn,
            "outbound_orders",
            &order_id.to_string(),
            "PICK",
            &user.username,
            json!({ "fee": fee.to_string() }),
        )
        .await?;
        txn.commit().await?;

        info!(%order_id, %fee, "Outbound order picked");
        let _ = self.event_sender.send(Event::OutboundOrderPicked(order_id)).await;
        if let Some(balance_after) = balance_after {
            let _ = self
                .event_sender
                .send(Event::AccountCharged {
                    client_id: client,
                    amount: fee,
                    balance_after,
                })
                .await;
        }

        Ok(updated)
    }

    async fn pack(
        &self,
        order: outbound_order::Model,
        request: AdvanceRequest,
        user: &CurrentUser,
    ) -> Result<outbound_order::Model, ServiceError> {
        let txn = self.db.begin().await?;

        let mut total = Decimal::ZERO;
        let mut components = Vec::new();

        if request.material_qty > 0 {
            if let Some(rule) = billing::resolve_rule(
                &txn,
                &order.client,
                "material",
                request.material_type.as_deref(),
            )
            .await?
            {
                let fee = rule.price * Decimal::from(request.material_qty);
                if fee > Decimal::ZERO {
                    total += fee;
                    components.push(format!("Material x{}", request.material_qty));
                }
            }
        }

        if request.pallet_qty > 0 {
            if let Some(rule) =
                billing::resolve_rule(&txn, &order.client, "pallet_fee", None).await?
            {
                let fee = rule.price * Decimal::from(request.pallet_qty);
                if fee > Decimal::ZERO {
                    total += fee;
                    components.push(format!("Pallet x{}", request.pallet_qty));
                }
            }
        }

        if order.service_type == ServiceType::Relabel && request.label_count > 0 {
            if let Some(rule) =
                billing::resolve_rule(&txn, &order.client, "labeling", None).await?
            {
                let fee = rule.price * Decimal::from(request.label_count);
                if fee > Decimal::ZERO {
                    total += fee;
                    components.push(format!("Labeling x{}", request.label_count));
                }
            }
        }

        let mut balance_after = None;
        if total > Decimal::ZERO {
            let description = format!("VAS ({}): {}", components.join(", "), order.order_no);
            let tx = billing::post_deduction(
                &txn,
                &order.client,
                total,
                &description,
                Some(&order.order_no),
                &user.username,
            )
            .await?;
            balance_after = Some(tx.balance_after);
        }

        let order_id = order.id;
        let client = order.client.clone();
        let mut active: outbound_order::ActiveModel = order.into();
        active.status = Set(OutboundStatus::WaitShip);
        let updated = active.update(&txn).await?;

        audit::record(
            &txn,
            "outbound_orders",
            &order_id.to_string(),
            "PACK",
            &user.username,
            json!({ "vas_total": total.to_string(), "components": components }),
        )
        .await?;
        txn.commit().await?;

        info!(%order_id, vas_total = %total, "Outbound order packed");
        let _ = self.event_sender.send(Event::OutboundOrderPacked(order_id)).await;
        if let Some(balance_after) = balance_after {
            let _ = self
                .event_sender
                .send(Event::AccountCharged {
                    client_id: client,
                    amount: total,
                    balance_after,
                })
                .await;
        }

        Ok(updated)
    }

    async fn ship(
        &self,
        order: outbound_order::Model,
        user: &CurrentUser,
    ) -> Result<outbound_order::Model, ServiceError> {
        let items = OutboundItem::find()
            .filter(outbound_item::Column::OrderId.eq(order.id))
            .all(&*self.db)
            .await?;

        let txn = self.db.begin().await?;

        // Any line without enough stock fails the whole step.
        let mut stock_moves = Vec::with_capacity(items.len());
        for item in &items {
            let (record_id, new_qty) =
                inventory::deduct_first_match(&txn, &order.client, &item.sku, item.qty).await?;
            stock_moves.push((record_id, item.qty, new_qty));
        }

        let order_id = order.id;
        let order_no = order.order_no.clone();
        let mut active: outbound_order::ActiveModel = order.into();
        active.status = Set(OutboundStatus::Shipped);
        active.shipped_at = Set(Some(Utc::now()));
        let updated = active.update(&txn).await?;

        audit::record(
            &txn,
            "outbound_orders",
            &order_id.to_string(),
            "SHIP",
            &user.username,
            json!({ "lines": items.len() }),
        )
        .await?;
        txn.commit().await?;

        info!(%order_id, %order_no, "Outbound order shipped");
        for (record_id, delta, new_qty) in stock_moves {
            let _ = self
                .event_sender
                .send(Event::InventoryDeducted {
                    record_id,
                    delta,
                    new_qty,
                })
                .await;
        }
        let _ = self
            .event_sender
            .send(Event::OutboundOrderShipped { order_id, order_no })
            .await;

        Ok(updated)
    }

    pub async fn get_order(&self, id: Uuid) -> Result<OutboundOrderWithItems, ServiceError> {
        let order = OutboundOrder::find_by_id(id)
            .one(&*self.db)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Outbound order {} not found", id)))?;
        let items = OutboundItem::find()
            .filter(outbound_item::Column::OrderId.eq(id))
            .order_by_asc(outbound_item::Column::Sku)
            .all(&*self.db)
            .await?;
        Ok(OutboundOrderWithItems { order, items })
    }

    pub async fn list_orders(
        &self,
        status: Option<OutboundStatus>,
        page: u64,
        per_page: u64,
    ) -> Result<(Vec<outbound_order::Model>, u64), ServiceError> {
        let mut query = OutboundOrder::find();
        if let Some(status) = status {
            query = query.filter(outbound_order::Column::Status.eq(status));
        }
        let query = query.order_by_desc(outbound_order::Column::CreatedAt);

        let paginator = query.paginate(&*self.db, per_page.max(1));
        let total = paginator.num_items().await?;
        let orders = paginator.fetch_page(page.saturating_sub(1)).await?;
        Ok((orders, total))
    }
}
