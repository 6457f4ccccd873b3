use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, ModelTrait,
    QueryFilter, QueryOrder, Set, TransactionTrait,
};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use tracing::{info, instrument};
use uuid::Uuid;
use validator::Validate;

use crate::{
    auth::CurrentUser,
    entities::inbound_item::{self, Entity as InboundItem},
    entities::inbound_order::{self, Entity as InboundOrder, InboundStatus},
    entities::package::{self, Entity as Package, PackageStatus},
    entities::package_item::{self, Entity as PackageItem, ReturnType},
    entities::product::{self, Entity as Product, PENDING_QC_SKU},
    errors::ServiceError,
    events::{Event, EventSender},
    services::{audit, inventory},
};

/// One line entered at the counting bench.
#[derive(Debug, Deserialize, Validate, utoipa::ToSchema)]
pub struct ItemDraft {
    #[serde(default)]
    pub sku: String,
    pub lpn: Option<String>,
    #[validate(range(min = 1, message = "Quantity must be positive"))]
    pub qty: i32,
    pub remark: Option<String>,
    #[serde(default = "default_return_type")]
    pub return_type: ReturnType,
}

fn default_return_type() -> ReturnType {
    ReturnType::New
}

#[derive(Debug, Deserialize, Validate, utoipa::ToSchema)]
pub struct RegisterProductRequest {
    #[validate(length(min = 1, message = "Client is required"))]
    pub client: String,
    #[validate(length(min = 1, message = "SKU is required"))]
    pub sku: String,
    pub name: Option<String>,
}

#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct FinishRequest {
    pub location: Option<String>,
    pub receipt: Option<String>,
}

fn is_lpn_tag(value: &str) -> bool {
    value.to_uppercase().starts_with("LPN")
}

async fn ensure_product<C: ConnectionTrait>(
    conn: &C,
    client: &str,
    sku: &str,
    name: Option<&str>,
) -> Result<(), ServiceError> {
    let exists = Product::find()
        .filter(product::Column::Client.eq(client))
        .filter(product::Column::Sku.eq(sku))
        .one(conn)
        .await?
        .is_some();
    if exists {
        return Ok(());
    }
    let product = product::ActiveModel {
        id: Set(Uuid::new_v4()),
        client: Set(client.to_string()),
        sku: Set(sku.to_string()),
        name: Set(name.map(str::to_string)),
        created_at: Set(Utc::now()),
    };
    product.insert(conn).await?;
    Ok(())
}

/// Counting bench: collecting package lines and closing the session.
#[derive(Clone)]
pub struct CountingService {
    db: Arc<DatabaseConnection>,
    event_sender: EventSender,
    fallback_location: String,
}

impl CountingService {
    pub fn new(
        db: Arc<DatabaseConnection>,
        event_sender: EventSender,
        fallback_location: String,
    ) -> Self {
        Self {
            db,
            event_sender,
            fallback_location,
        }
    }

    async fn load_package(&self, package_id: Uuid) -> Result<package::Model, ServiceError> {
        Package::find_by_id(package_id)
            .one(&*self.db)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Package {} not found", package_id)))
    }

    /// Adds one counted line to a package.
    ///
    /// An `LPN`-prefixed tag routes the line to inspection under the
    /// `Pending_QC` sentinel SKU; every other SKU must already exist in the
    /// client's product catalog.
    #[instrument(skip(self, draft, user), fields(package_id = %package_id))]
    pub async fn add_item(
        &self,
        package_id: Uuid,
        draft: ItemDraft,
        user: &CurrentUser,
    ) -> Result<package_item::Model, ServiceError> {
        draft.validate()?;
        let pkg = self.load_package(package_id).await?;

        let lpn = draft
            .lpn
            .as_deref()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .map(str::to_string);
        let sku = draft.sku.trim().to_string();

        if sku.is_empty() && lpn.is_none() {
            return Err(ServiceError::ValidationError(
                "A SKU or an LPN is required".to_string(),
            ));
        }

        let pending_qc = lpn.as_deref().map(is_lpn_tag).unwrap_or(false);
        let final_sku = if pending_qc {
            PENDING_QC_SKU.to_string()
        } else {
            sku
        };
        // Anything tagged with an LPN goes through quality check.
        let return_type = if lpn.is_some() {
            ReturnType::Inspect
        } else {
            draft.return_type
        };

        let txn = self.db.begin().await?;

        if pending_qc {
            ensure_product(&txn, &pkg.client, PENDING_QC_SKU, Some("Pending QC Item")).await?;
        } else {
            let known = Product::find()
                .filter(product::Column::Client.eq(pkg.client.as_str()))
                .filter(product::Column::Sku.eq(final_sku.as_str()))
                .one(&txn)
                .await?
                .is_some();
            if !known {
                return Err(ServiceError::ValidationError(format!(
                    "SKU {} is not registered for client {}",
                    final_sku, pkg.client
                )));
            }
        }

        let item = package_item::ActiveModel {
            id: Set(Uuid::new_v4()),
            package_id: Set(pkg.id),
            tracking_no: Set(pkg.tracking_no.clone()),
            sku: Set(final_sku.clone()),
            lpn: Set(lpn.clone()),
            qty: Set(draft.qty),
            remark: Set(draft.remark.clone()),
            return_type: Set(return_type),
            created_at: Set(Utc::now()),
        };
        let item = item.insert(&txn).await?;

        if let Some(lpn) = &lpn {
            audit::record(
                &txn,
                "inbound_lpns",
                lpn,
                "MAP_SKU",
                &user.username,
                json!({ "sku": final_sku, "pkg": pkg.tracking_no }),
            )
            .await?;
        }

        txn.commit().await?;
        Ok(item)
    }

    pub async fn delete_item(&self, item_id: Uuid) -> Result<(), ServiceError> {
        let item = PackageItem::find_by_id(item_id)
            .one(&*self.db)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Item {} not found", item_id)))?;
        item.delete(&*self.db).await?;
        Ok(())
    }

    pub async fn list_items(
        &self,
        package_id: Uuid,
    ) -> Result<Vec<package_item::Model>, ServiceError> {
        let items = PackageItem::find()
            .filter(package_item::Column::PackageId.eq(package_id))
            .order_by_asc(package_item::Column::CreatedAt)
            .all(&*self.db)
            .await?;
        Ok(items)
    }

    /// Registers a product so counting can accept its SKU.
    #[instrument(skip(self, request))]
    pub async fn register_product(
        &self,
        request: RegisterProductRequest,
    ) -> Result<product::Model, ServiceError> {
        request.validate()?;

        if Product::find()
            .filter(product::Column::Client.eq(request.client.as_str()))
            .filter(product::Column::Sku.eq(request.sku.as_str()))
            .one(&*self.db)
            .await?
            .is_some()
        {
            return Err(ServiceError::Conflict(format!(
                "SKU {} already registered for client {}",
                request.sku, request.client
            )));
        }

        let product = product::ActiveModel {
            id: Set(Uuid::new_v4()),
            client: Set(request.client),
            sku: Set(request.sku),
            name: Set(request.name),
            created_at: Set(Utc::now()),
        };
        let product = product.insert(&*self.db).await?;
        Ok(product)
    }

    /// Closes the counting session for a package: shelves every line into
    /// inventory, syncs the linked inbound order, and moves the package to
    /// WaitInspect. The whole step commits or rolls back as one transaction.
    #[instrument(skip(self, request, user), fields(package_id = %package_id))]
    pub async fn finish(
        &self,
        package_id: Uuid,
        request: FinishRequest,
        user: &CurrentUser,
    ) -> Result<package::Model, ServiceError> {
        let pkg = self.load_package(package_id).await?;
        let items = self.list_items(package_id).await?;

        let location = request
            .location
            .as_deref()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| self.fallback_location.clone());
        let receipt = request
            .receipt
            .as_deref()
            .map(str::trim)
            .filter(|r| !r.is_empty())
            .map(str::to_string);
        let now = Utc::now();

        let txn = self.db.begin().await?;

        let mut active: package::ActiveModel = pkg.clone().into();
        active.status = Set(PackageStatus::WaitInspect);
        active.location = Set(Some(location.clone()));
        active.receipt = Set(receipt.clone());
        active.counted_at = Set(Some(now));
        active.updated_at = Set(Some(now));
        let updated_pkg = active.update(&txn).await?;

        if let Some(order_id) = pkg.inbound_order_id {
            let order = InboundOrder::find_by_id(order_id)
                .one(&txn)
                .await?
                .ok_or_else(|| {
                    ServiceError::NotFound(format!("Inbound order {} not found", order_id))
                })?;

            // Receipt numbers land in the order remark, appended once.
            let mut new_remark = order.remark.clone();
            if let Some(receipt) = &receipt {
                let tag = format!("Receipt: {}", receipt);
                let current = order.remark.clone().unwrap_or_default();
                if !current.contains(&tag) {
                    new_remark = Some(if current.is_empty() {
                        tag
                    } else {
                        format!("{} | {}", current, tag)
                    });
                }
            }

            let mut order_active: inbound_order::ActiveModel = order.into();
            order_active.status = Set(InboundStatus::Counted);
            order_active.remark = Set(new_remark);
            order_active.updated_at = Set(Some(now));
            order_active.update(&txn).await?;

            for item in &items {
                let existing = InboundItem::find()
                    .filter(inbound_item::Column::OrderId.eq(order_id))
                    .filter(inbound_item::Column::Sku.eq(item.sku.as_str()))
                    .one(&txn)
                    .await?;
                match existing {
                    Some(line) => {
                        let received = line.received_qty + item.qty;
                        let mut line_active: inbound_item::ActiveModel = line.into();
                        line_active.received_qty = Set(received);
                        line_active.update(&txn).await?;
                    }
                    None => {
                        // Unplanned SKU: tolerated with a zero expectation.
                        let line = inbound_item::ActiveModel {
                            id: Set(Uuid::new_v4()),
                            order_id: Set(order_id),
                            sku: Set(item.sku.clone()),
                            expected_qty: Set(0),
                            received_qty: Set(item.qty),
                            passed_qty: Set(0),
                            failed_qty: Set(0),
                            created_at: Set(now),
                        };
                        line.insert(&txn).await?;
                    }
                }
            }
        }

        let mut stock_moves = Vec::with_capacity(items.len());
        for item in &items {
            let (record_id, new_qty) =
                inventory::accumulate(&txn, &pkg.client, &item.sku, &location, item.qty).await?;
            stock_moves.push((record_id, item.qty, new_qty));
        }

        audit::record(
            &txn,
            "packages",
            &pkg.id.to_string(),
            "FINISH_COUNT",
            &user.username,
            json!({ "items_count": items.len(), "location": location }),
        )
        .await?;

        txn.commit().await?;

        info!(package_id = %pkg.id, lines = items.len(), %location, "Counting finished");
        let _ = self
            .event_sender
            .send(Event::PackageCounted {
                package_id: pkg.id,
                item_lines: items.len(),
                location: location.clone(),
            })
            .await;
        if let Some(order_id) = pkg.inbound_order_id {
            let _ = self.event_sender.send(Event::InboundOrderCounted(order_id)).await;
        }
        for (record_id, delta, new_qty) in stock_moves {
            let _ = self
                .event_sender
                .send(Event::InventoryAccumulated {
                    record_id,
                    delta,
                    new_qty,
                })
                .await;
        }

        Ok(updated_pkg)
    }
}
