use sea_orm::DatabaseConnection;
use std::sync::Arc;

use crate::{
    config::AppConfig,
    events::EventSender,
    services::{
        AuditService, BillingService, CountingService, InspectionService, IntakeService,
        InventoryService, OutboundService,
    },
};

pub mod billing;
pub mod counting;
pub mod health;
pub mod inbound;
pub mod inspection;
pub mod intake;
pub mod inventory;
pub mod logs;
pub mod outbound;

/// All workflow services, wired once at startup and shared via AppState.
#[derive(Clone)]
pub struct AppServices {
    pub intake: IntakeService,
    pub counting: CountingService,
    pub inspection: InspectionService,
    pub outbound: OutboundService,
    pub billing: BillingService,
    pub inventory: InventoryService,
    pub audit: AuditService,
}

impl AppServices {
    pub fn build(
        db: Arc<DatabaseConnection>,
        event_sender: EventSender,
        config: &AppConfig,
    ) -> Self {
        Self {
            intake: IntakeService::new(
                db.clone(),
                event_sender.clone(),
                config.fallback_location.clone(),
            ),
            counting: CountingService::new(
                db.clone(),
                event_sender.clone(),
                config.fallback_location.clone(),
            ),
            inspection: InspectionService::new(db.clone(), event_sender.clone()),
            outbound: OutboundService::new(db.clone(), event_sender.clone()),
            billing: BillingService::new(db.clone(), event_sender.clone()),
            inventory: InventoryService::new(db.clone(), event_sender),
            audit: AuditService::new(db),
        }
    }
}
