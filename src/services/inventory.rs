use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, Set, TransactionTrait,
};
use std::sync::Arc;
use tracing::{info, instrument};

use crate::{
    entities::inventory_record::{self, Entity as InventoryRecord},
    errors::ServiceError,
    events::{Event, EventSender},
};

/// Synthetic primary key for an inventory row: `{client}_{sku}_{location}`
/// with every whitespace run collapsed to a single underscore.
pub fn record_id(client: &str, sku: &str, location: &str) -> String {
    let raw = format!("{}_{}_{}", client, sku, location);
    let mut id = String::with_capacity(raw.len());
    let mut in_whitespace = false;
    for ch in raw.chars() {
        if ch.is_whitespace() {
            if !in_whitespace {
                id.push('_');
            }
            in_whitespace = true;
        } else {
            id.push(ch);
            in_whitespace = false;
        }
    }
    id
}

/// Additive upsert of one on-hand balance. Returns the record id and the
/// quantity after the write.
///
/// Generic over the connection so counting can fold stock increments into
/// its finish transaction.
pub async fn accumulate<C: ConnectionTrait>(
    conn: &C,
    client: &str,
    sku: &str,
    location: &str,
    qty: i32,
) -> Result<(String, i32), ServiceError> {
    let id = record_id(client, sku, location);

    match InventoryRecord::find_by_id(id.clone()).one(conn).await? {
        Some(existing) => {
            let new_qty = existing.qty + qty;
            let mut active: inventory_record::ActiveModel = existing.into();
            active.qty = Set(new_qty);
            active.updated_at = Set(Utc::now());
            active.update(conn).await?;
            Ok((id, new_qty))
        }
        None => {
            let record = inventory_record::ActiveModel {
                id: Set(id.clone()),
                client: Set(client.to_string()),
                sku: Set(sku.to_string()),
                location: Set(location.to_string()),
                qty: Set(qty),
                updated_at: Set(Utc::now()),
            };
            record.insert(conn).await?;
            Ok((id, qty))
        }
    }
}

/// Decrements the first inventory row for client+sku holding enough stock.
///
/// Location is not part of the request; whichever matching row can cover
/// the quantity wins. No row covering it fails the caller's transaction
/// with an insufficient-stock error.
pub async fn deduct_first_match<C: ConnectionTrait>(
    conn: &C,
    client: &str,
    sku: &str,
    qty: i32,
) -> Result<(String, i32), ServiceError> {
    let candidates = InventoryRecord::find()
        .filter(inventory_record::Column::Client.eq(client))
        .filter(inventory_record::Column::Sku.eq(sku))
        .order_by_asc(inventory_record::Column::Id)
        .all(conn)
        .await?;

    let Some(target) = candidates.into_iter().find(|r| r.qty >= qty) else {
        return Err(ServiceError::InsufficientStock(format!(
            "no inventory row covers {} x{} for client {}",
            sku, qty, client
        )));
    };

    let id = target.id.clone();
    let new_qty = target.qty - qty;
    let mut active: inventory_record::ActiveModel = target.into();
    active.qty = Set(new_qty);
    active.updated_at = Set(Utc::now());
    active.update(conn).await?;

    Ok((id, new_qty))
}

/// Standalone inventory surface for queries and manual adjustments.
#[derive(Clone)]
pub struct InventoryService {
    db: Arc<DatabaseConnection>,
    event_sender: EventSender,
}

impl InventoryService {
    pub fn new(db: Arc<DatabaseConnection>, event_sender: EventSender) -> Self {
        Self { db, event_sender }
    }

    #[instrument(skip(self))]
    pub async fn accumulate(
        &self,
        client: &str,
        sku: &str,
        location: &str,
        qty: i32,
    ) -> Result<inventory_record::Model, ServiceError> {
        if qty <= 0 {
            return Err(ServiceError::InvalidInput(
                "quantity must be positive".to_string(),
            ));
        }

        let txn = self.db.begin().await?;
        let (id, new_qty) = accumulate(&txn, client, sku, location, qty).await?;
        txn.commit().await?;

        info!(record_id = %id, delta = qty, new_qty, "Inventory accumulated");
        let _ = self
            .event_sender
            .send(Event::InventoryAccumulated {
                record_id: id.clone(),
                delta: qty,
                new_qty,
            })
            .await;

        self.get(&id).await
    }

    #[instrument(skip(self))]
    pub async fn deduct(
        &self,
        client: &str,
        sku: &str,
        qty: i32,
    ) -> Result<inventory_record::Model, ServiceError> {
        if qty <= 0 {
            return Err(ServiceError::InvalidInput(
                "quantity must be positive".to_string(),
            ));
        }

        let txn = self.db.begin().await?;
        let (id, new_qty) = deduct_first_match(&txn, client, sku, qty).await?;
        txn.commit().await?;

        let _ = self
            .event_sender
            .send(Event::InventoryDeducted {
                record_id: id.clone(),
                delta: qty,
                new_qty,
            })
            .await;

        self.get(&id).await
    }

    pub async fn get(&self, id: &str) -> Result<inventory_record::Model, ServiceError> {
        InventoryRecord::find_by_id(id.to_string())
            .one(&*self.db)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Inventory record {} not found", id)))
    }

    /// Paginated listing, optionally narrowed to one client and/or SKU.
    pub async fn list(
        &self,
        client: Option<&str>,
        sku: Option<&str>,
        page: u64,
        per_page: u64,
    ) -> Result<(Vec<inventory_record::Model>, u64), ServiceError> {
        let mut query = InventoryRecord::find();
        if let Some(client) = client {
            query = query.filter(inventory_record::Column::Client.eq(client));
        }
        if let Some(sku) = sku {
            query = query.filter(inventory_record::Column::Sku.eq(sku));
        }
        let query = query.order_by_asc(inventory_record::Column::Id);

        let paginator = query.paginate(&*self.db, per_page.max(1));
        let total = paginator.num_items().await?;
        let records = paginator.fetch_page(page.saturating_sub(1)).await?;
        Ok((records, total))
    }
}

#[cfg(test)]
mod tests {
    use super::record_id;

    #[test]
    fn record_id_joins_with_underscores() {
        assert_eq!(record_id("ACME", "SKU-1", "A1"), "ACME_SKU-1_A1");
    }

    #[test]
    fn record_id_collapses_whitespace_runs() {
        assert_eq!(
            record_id("Acme Corp", "SKU 100", "Shelf  A 1"),
            "Acme_Corp_SKU_100_Shelf_A_1"
        );
    }

    #[test]
    fn record_id_handles_tabs_and_newlines() {
        assert_eq!(record_id("a\tb", "c\nd", "e"), "a_b_c_d_e");
    }
}
