use chrono::Utc;
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
    TransactionTrait,
};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use tracing::{info, instrument};
use uuid::Uuid;

use crate::{
    auth::CurrentUser,
    entities::inbound_item::{self, Entity as InboundItem},
    entities::inspection::{self, InspectionResult},
    entities::package::{self, Entity as Package, PackageStatus},
    entities::package_item::{self, Entity as PackageItem},
    errors::ServiceError,
    events::{Event, EventSender},
    services::{audit, billing},
};

/// Fee category used for quality-check billing rules; the standard is the
/// rule condition (apparel, electronics, general).
const INSPECTION_FEE_TYPE: &str = "inspection";

#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct RecordResultRequest {
    pub result: InspectionResult,
    pub grade: Option<String>,
    #[serde(default)]
    pub faults: Vec<String>,
    pub imei: Option<String>,
}

/// Quality-check sessions over counted packages.
#[derive(Clone)]
pub struct InspectionService {
    db: Arc<DatabaseConnection>,
    event_sender: EventSender,
}

impl InspectionService {
    pub fn new(db: Arc<DatabaseConnection>, event_sender: EventSender) -> Self {
        Self { db, event_sender }
    }

    /// Packages with a pending quality check.
    pub async fn list_pending(&self) -> Result<Vec<package::Model>, ServiceError> {
        let packages = Package::find()
            .filter(package::Column::Status.is_in([
                PackageStatus::WaitInspect,
                PackageStatus::Received,
                PackageStatus::Inspecting,
            ]))
            .order_by_asc(package::Column::CreatedAt)
            .all(&*self.db)
            .await?;
        Ok(packages)
    }

    async fn load_package(&self, package_id: Uuid) -> Result<package::Model, ServiceError> {
        Package::find_by_id(package_id)
            .one(&*self.db)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Package {} not found", package_id)))
    }

    async fn total_qty(&self, package_id: Uuid) -> Result<i32, ServiceError> {
        let items = PackageItem::find()
            .filter(package_item::Column::PackageId.eq(package_id))
            .all(&*self.db)
            .await?;
        Ok(items.iter().map(|i| i.qty).sum())
    }

    /// Fee preview: per-unit rate for the chosen standard times the total
    /// counted quantity. Zero when no rule is configured.
    #[instrument(skip(self))]
    pub async fn estimate_fee(
        &self,
        package_id: Uuid,
        standard: &str,
    ) -> Result<Decimal, ServiceError> {
        let pkg = self.load_package(package_id).await?;
        let total_qty = self.total_qty(package_id).await?;

        let Some(rule) = billing::resolve_rule(
            &*self.db,
            &pkg.client,
            INSPECTION_FEE_TYPE,
            Some(standard),
        )
        .await?
        else {
            return Ok(Decimal::ZERO);
        };
        Ok(rule.price * Decimal::from(total_qty))
    }

    /// Completes the quality check on a package: status moves to Inspected
    /// and a positive fee posts one deduction, both in the same transaction.
    #[instrument(skip(self, user), fields(package_id = %package_id))]
    pub async fn submit(
        &self,
        package_id: Uuid,
        standard: &str,
        user: &CurrentUser,
    ) -> Result<package::Model, ServiceError> {
        let standard = standard.trim();
        if standard.is_empty() {
            return Err(ServiceError::ValidationError(
                "Inspection standard is required".to_string(),
            ));
        }

        let pkg = self.load_package(package_id).await?;
        let fee = self.estimate_fee(package_id, standard).await?;

        let txn = self.db.begin().await?;
        let now = Utc::now();

        let mut active: package::ActiveModel = pkg.clone().into();
        active.status = Set(PackageStatus::Inspected);
        active.updated_at = Set(Some(now));
        let updated = active.update(&txn).await?;

        let mut balance_after = None;
        if fee > Decimal::ZERO {
            let description = format!("Inspection Fee ({}): {}", standard, pkg.tracking_no);
            let tx = billing::post_deduction(
                &txn,
                &pkg.client,
                fee,
                &description,
                Some(&pkg.tracking_no),
                &user.username,
            )
            .await?;
            balance_after = Some(tx.balance_after);
        }

        audit::record(
            &txn,
            "packages",
            &pkg.id.to_string(),
            "SUBMIT_INSPECTION",
            &user.username,
            json!({ "standard": standard, "fee": fee.to_string() }),
        )
        .await?;

        txn.commit().await?;

        info!(package_id = %pkg.id, standard, %fee, "Inspection submitted");
        let _ = self
            .event_sender
            .send(Event::PackageInspected {
                package_id: pkg.id,
                standard: standard.to_string(),
                fee,
            })
            .await;
        if let Some(balance_after) = balance_after {
            let _ = self
                .event_sender
                .send(Event::AccountCharged {
                    client_id: pkg.client.clone(),
                    amount: fee,
                    balance_after,
                })
                .await;
        }

        Ok(updated)
    }

    /// Records the per-item check outcome and rolls the pass/fail counters
    /// up to the linked inbound order line.
    #[instrument(skip(self, request, user), fields(item_id = %item_id))]
    pub async fn record_result(
        &self,
        item_id: Uuid,
        request: RecordResultRequest,
        user: &CurrentUser,
    ) -> Result<inspection::Model, ServiceError> {
        let item = PackageItem::find_by_id(item_id)
            .one(&*self.db)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Item {} not found", item_id)))?;
        let pkg = self.load_package(item.package_id).await?;

        let txn = self.db.begin().await?;

        let record = inspection::ActiveModel {
            id: Set(Uuid::new_v4()),
            target_item_id: Set(item.id),
            status: Set(request.result),
            grade: Set(request.grade.clone()),
            faults: Set(json!(request.faults)),
            imei: Set(request.imei.clone()),
            inspector: Set(user.username.clone()),
            inspected_at: Set(Utc::now()),
        };
        let record = record.insert(&txn).await?;

        if let Some(order_id) = pkg.inbound_order_id {
            let line = InboundItem::find()
                .filter(inbound_item::Column::OrderId.eq(order_id))
                .filter(inbound_item::Column::Sku.eq(item.sku.as_str()))
                .one(&txn)
                .await?;
            if let Some(line) = line {
                let mut active: inbound_item::ActiveModel = line.clone().into();
                match request.result {
                    InspectionResult::Pass => {
                        active.passed_qty = Set(line.passed_qty + item.qty);
                    }
                    InspectionResult::Fail => {
                        active.failed_qty = Set(line.failed_qty + item.qty);
                    }
                }
                active.update(&txn).await?;
            }
        }

        txn.commit().await?;
        Ok(record)
    }
}
