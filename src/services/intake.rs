use chrono::Utc;
use rand::Rng;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set, TransactionTrait,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;
use tracing::{info, instrument, warn};
use uuid::Uuid;
use validator::Validate;

use crate::{
    auth::CurrentUser,
    entities::client::{self, Entity as Client},
    entities::inbound_item::{self, Entity as InboundItem},
    entities::inbound_order::{self, Entity as InboundOrder, InboundStatus, InboundType},
    entities::package::{self, Entity as Package, PackageStatus, PackageType},
    errors::ServiceError,
    events::{Event, EventSender},
    services::audit,
};

/// Order number for a blind receipt: `RB` + yyyymmdd + short random suffix.
pub fn blind_order_no() -> String {
    let suffix: u32 = rand::thread_rng().gen_range(0..1000);
    format!("RB{}{}", Utc::now().format("%Y%m%d"), suffix)
}

/// Order number for a pre-advice: `R` + yyyymmdd + zero-padded random suffix.
pub fn pre_advice_order_no() -> String {
    let suffix: u32 = rand::thread_rng().gen_range(0..10000);
    format!("R{}{:05}", Utc::now().format("%Y%m%d"), suffix)
}

/// Outcome of scanning a tracking number at the counting bench.
#[derive(Debug, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum IntakeResolution {
    /// A package record exists. `needs_confirmation` is set when it has
    /// already been processed and re-counting should be confirmed.
    Existing {
        package: package::Model,
        order: Option<inbound_order::Model>,
        needs_confirmation: bool,
        default_location: Option<String>,
    },
    /// An inbound order existed without its package (interrupted blind
    /// receipt); the missing package was created and linked.
    Recovered {
        package: package::Model,
        order: inbound_order::Model,
        default_location: Option<String>,
    },
    NotFound,
}

#[derive(Debug, Deserialize, Validate, utoipa::ToSchema)]
pub struct ReceiveRequest {
    #[validate(length(min = 1, message = "Tracking number is required"))]
    pub tracking_no: String,
    /// Required for blind receipts; ignored when a pre-advice matches.
    pub client: Option<String>,
    pub carrier: Option<String>,
    #[serde(default = "default_package_type")]
    pub package_type: PackageType,
    #[serde(default)]
    pub is_abnormal: bool,
    pub reason: Option<String>,
    pub receipt: Option<String>,
}

fn default_package_type() -> PackageType {
    PackageType::Box
}

#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct PreAdviceItem {
    pub sku: String,
    pub expected_qty: i32,
}

#[derive(Debug, Deserialize, Validate, utoipa::ToSchema)]
pub struct CreatePreAdviceRequest {
    #[validate(length(min = 1, message = "Client is required"))]
    pub client_id: String,
    pub inbound_type: InboundType,
    pub tracking_no: Option<String>,
    pub carrier: Option<String>,
    pub expected_date: Option<chrono::DateTime<Utc>>,
    pub remark: Option<String>,
    #[validate(length(min = 1, message = "At least one expected item is required"))]
    pub items: Vec<PreAdviceItem>,
}

#[derive(Debug, Serialize)]
pub struct OrderWithItems {
    #[serde(flatten)]
    pub order: inbound_order::Model,
    pub items: Vec<inbound_item::Model>,
}

/// Dock intake: tracking resolution, receiving, and pre-advice creation.
#[derive(Clone)]
pub struct IntakeService {
    db: Arc<DatabaseConnection>,
    event_sender: EventSender,
    fallback_location: String,
}

impl IntakeService {
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

    /// Location suggested for a client, falling back to the configured
    /// default when the client has none.
    async fn default_location(&self, client_name: &str) -> Result<Option<String>, ServiceError> {
        let found = Client::find()
            .filter(client::Column::Name.eq(client_name))
            .one(&*self.db)
            .await?;
        Ok(found
            .and_then(|c| c.default_location)
            .or_else(|| Some(self.fallback_location.clone())))
    }

    async fn newest_order_for_tracking(
        &self,
        tracking_no: &str,
    ) -> Result<Option<inbound_order::Model>, ServiceError> {
        let order = InboundOrder::find()
            .filter(inbound_order::Column::TrackingNo.eq(tracking_no))
            .order_by_desc(inbound_order::Column::CreatedAt)
            .one(&*self.db)
            .await?;
        Ok(order)
    }

    /// Resolves a scanned tracking number to a package, recovering orphaned
    /// inbound orders on the way.
    #[instrument(skip(self, user))]
    pub async fn resolve(
        &self,
        tracking_no: &str,
        user: &CurrentUser,
    ) -> Result<IntakeResolution, ServiceError> {
        let tracking_no = tracking_no.trim();
        if tracking_no.is_empty() {
            return Err(ServiceError::ValidationError(
                "Tracking number is required".to_string(),
            ));
        }

        if let Some(pkg) = Package::find()
            .filter(package::Column::TrackingNo.eq(tracking_no))
            .one(&*self.db)
            .await?
        {
            let order = match pkg.inbound_order_id {
                Some(order_id) => InboundOrder::find_by_id(order_id).one(&*self.db).await?,
                None => None,
            };
            let default_location = self.default_location(&pkg.client).await?;
            let needs_confirmation = pkg.status != PackageStatus::Pending;
            return Ok(IntakeResolution::Existing {
                package: pkg,
                order,
                needs_confirmation,
                default_location,
            });
        }

        // The newest order wins when history holds duplicates from failed
        // receiving attempts.
        let Some(order) = self.newest_order_for_tracking(tracking_no).await? else {
            return Ok(IntakeResolution::NotFound);
        };

        warn!(
            order_no = %order.order_no,
            tracking_no,
            "Inbound order without package record, auto-recovering"
        );

        let txn = self.db.begin().await?;
        let pkg = package::ActiveModel {
            id: Set(Uuid::new_v4()),
            tracking_no: Set(tracking_no.to_string()),
            client: Set(order.client_id.clone()),
            carrier: Set(Some(
                order.carrier.clone().unwrap_or_else(|| "Unknown".to_string()),
            )),
            package_type: Set(PackageType::Box),
            status: Set(PackageStatus::Pending),
            location: Set(None),
            inbound_order_id: Set(Some(order.id)),
            receipt: Set(None),
            is_abnormal: Set(false),
            reason: Set(None),
            operator: Set(user.username.clone()),
            counted_at: Set(None),
            created_at: Set(Utc::now()),
            updated_at: Set(None),
        };
        let pkg = pkg.insert(&txn).await?;
        audit::record(
            &txn,
            "packages",
            &pkg.id.to_string(),
            "AUTO_RECOVER",
            &user.username,
            json!({
                "reason": "Missing package record",
                "linked_order": order.order_no,
                "original_tracking": tracking_no,
            }),
        )
        .await?;
        txn.commit().await?;

        let _ = self
            .event_sender
            .send(Event::OrphanedOrderRecovered {
                order_id: order.id,
                package_id: pkg.id,
                tracking_no: tracking_no.to_string(),
            })
            .await;

        let default_location = self.default_location(&pkg.client).await?;
        Ok(IntakeResolution::Recovered {
            package: pkg,
            order,
            default_location,
        })
    }

    /// Receives a parcel at the dock.
    ///
    /// With a matching pre-advice the order advances to Received and the
    /// package is linked to it; without one a blind `RB` order is created
    /// first. Either way exactly one package row is written.
    #[instrument(skip(self, request, user), fields(tracking_no = %request.tracking_no))]
    pub async fn receive(
        &self,
        request: ReceiveRequest,
        user: &CurrentUser,
    ) -> Result<package::Model, ServiceError> {
        request.validate()?;
        let tracking_no = request.tracking_no.trim().to_string();
        if tracking_no.is_empty() {
            return Err(ServiceError::ValidationError(
                "Tracking number is required".to_string(),
            ));
        }

        if let Some(existing) = Package::find()
            .filter(package::Column::TrackingNo.eq(tracking_no.as_str()))
            .one(&*self.db)
            .await?
        {
            return Err(ServiceError::Conflict(format!(
                "Package {} already received (status {})",
                tracking_no, existing.status
            )));
        }

        let matched = self.newest_order_for_tracking(&tracking_no).await?;

        // A blind order that never got its package must be repaired at the
        // counting bench, not received twice.
        if let Some(order) = &matched {
            if order.inbound_type == InboundType::Blind {
                return Err(ServiceError::Conflict(format!(
                    "Inbound order {} already exists for this tracking number; \
                     scan it at counting to restore the package record",
                    order.order_no
                )));
            }
        }

        let txn = self.db.begin().await?;
        let now = Utc::now();

        let (order_id, client, blind) = match matched {
            Some(order) => {
                let client = order.client_id.clone();
                let order_id = order.id;
                if order.status == InboundStatus::InTransit {
                    let carrier = request.carrier.clone().or(order.carrier.clone());
                    let mut active: inbound_order::ActiveModel = order.into();
                    active.status = Set(InboundStatus::Received);
                    active.carrier = Set(carrier);
                    active.updated_at = Set(Some(now));
                    active.update(&txn).await?;
                }
                (order_id, client, false)
            }
            None => {
                let client = request.client.clone().filter(|c| !c.is_empty()).ok_or_else(
                    || {
                        ServiceError::ValidationError(
                            "Blind receipt requires a client".to_string(),
                        )
                    },
                )?;
                let carrier = request.carrier.clone().filter(|c| !c.is_empty()).ok_or_else(
                    || {
                        ServiceError::ValidationError(
                            "Blind receipt requires a carrier".to_string(),
                        )
                    },
                )?;

                let order = inbound_order::ActiveModel {
                    id: Set(Uuid::new_v4()),
                    order_no: Set(blind_order_no()),
                    client_id: Set(client.clone()),
                    inbound_type: Set(InboundType::Blind),
                    tracking_no: Set(Some(tracking_no.clone())),
                    carrier: Set(Some(carrier)),
                    status: Set(InboundStatus::Received),
                    expected_date: Set(None),
                    remark: Set(None),
                    created_by: Set(user.username.clone()),
                    created_at: Set(now),
                    updated_at: Set(None),
                };
                let order = order.insert(&txn).await?;
                (order.id, client, true)
            }
        };

        let pkg = package::ActiveModel {
            id: Set(Uuid::new_v4()),
            tracking_no: Set(tracking_no.clone()),
            client: Set(client),
            carrier: Set(request.carrier.clone()),
            package_type: Set(request.package_type),
            status: Set(PackageStatus::Pending),
            location: Set(None),
            inbound_order_id: Set(Some(order_id)),
            receipt: Set(request.receipt.clone()),
            is_abnormal: Set(request.is_abnormal),
            reason: Set(request.reason.clone()),
            operator: Set(user.username.clone()),
            counted_at: Set(None),
            created_at: Set(now),
            updated_at: Set(None),
        };
        let pkg = pkg.insert(&txn).await?;

        audit::record(
            &txn,
            "packages",
            &pkg.id.to_string(),
            "RECEIVE",
            &user.username,
            json!({ "tracking_no": tracking_no, "blind": blind }),
        )
        .await?;
        txn.commit().await?;

        info!(package_id = %pkg.id, blind, "Package received");
        let _ = self
            .event_sender
            .send(Event::PackageReceived {
                package_id: pkg.id,
                tracking_no,
                blind,
            })
            .await;

        Ok(pkg)
    }

    /// Registers a pre-advised inbound order with its expected items.
    #[instrument(skip(self, request, user), fields(client = %request.client_id))]
    pub async fn create_pre_advice(
        &self,
        request: CreatePreAdviceRequest,
        user: &CurrentUser,
    ) -> Result<OrderWithItems, ServiceError> {
        request.validate()?;
        if request.inbound_type == InboundType::Blind {
            return Err(ServiceError::ValidationError(
                "Blind orders are created by receiving, not pre-advice".to_string(),
            ));
        }
        for line in &request.items {
            if line.sku.trim().is_empty() {
                return Err(ServiceError::ValidationError(
                    "Every expected item needs a SKU".to_string(),
                ));
            }
            if line.expected_qty <= 0 {
                return Err(ServiceError::ValidationError(format!(
                    "Expected quantity for {} must be positive",
                    line.sku
                )));
            }
        }

        let txn = self.db.begin().await?;
        let now = Utc::now();

        let order = inbound_order::ActiveModel {
            id: Set(Uuid::new_v4()),
            order_no: Set(pre_advice_order_no()),
            client_id: Set(request.client_id.clone()),
            inbound_type: Set(request.inbound_type),
            tracking_no: Set(request.tracking_no.clone()),
            carrier: Set(request.carrier.clone()),
            status: Set(InboundStatus::InTransit),
            expected_date: Set(request.expected_date),
            remark: Set(request.remark.clone()),
            created_by: Set(user.username.clone()),
            created_at: Set(now),
            updated_at: Set(None),
        };
        let order = order.insert(&txn).await?;

        let mut items = Vec::with_capacity(request.items.len());
        for line in &request.items {
            let item = inbound_item::ActiveModel {
                id: Set(Uuid::new_v4()),
                order_id: Set(order.id),
                sku: Set(line.sku.clone()),
                expected_qty: Set(line.expected_qty),
                received_qty: Set(0),
                passed_qty: Set(0),
                failed_qty: Set(0),
                created_at: Set(now),
            };
            items.push(item.insert(&txn).await?);
        }

        audit::record(
            &txn,
            "inbound_orders",
            &order.id.to_string(),
            "CREATE_PRE_ADVICE",
            &user.username,
            json!({ "order_no": order.order_no, "items": items.len() }),
        )
        .await?;
        txn.commit().await?;

        let _ = self.event_sender.send(Event::InboundOrderCreated(order.id)).await;

        Ok(OrderWithItems { order, items })
    }

    pub async fn get_order(&self, id: Uuid) -> Result<OrderWithItems, ServiceError> {
        let order = InboundOrder::find_by_id(id)
            .one(&*self.db)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Inbound order {} not found", id)))?;
        let items = InboundItem::find()
            .filter(inbound_item::Column::OrderId.eq(id))
            .order_by_asc(inbound_item::Column::Sku)
            .all(&*self.db)
            .await?;
        Ok(OrderWithItems { order, items })
    }

    pub async fn list_orders(
        &self,
        status: Option<InboundStatus>,
        page: u64,
        per_page: u64,
    ) -> Result<(Vec<inbound_order::Model>, u64), ServiceError> {
        let mut query = InboundOrder::find();
        if let Some(status) = status {
            query = query.filter(inbound_order::Column::Status.eq(status));
        }
        let query = query.order_by_desc(inbound_order::Column::CreatedAt);

        let paginator = query.paginate(&*self.db, per_page.max(1));
        let total = paginator.num_items().await?;
        let orders = paginator.fetch_page(page.saturating_sub(1)).await?;
        Ok((orders, total))
    }
}
