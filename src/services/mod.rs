//! Workflow services. Each service owns a database handle and an event
//! sender; multi-step operations run inside a single transaction and emit
//! events only after commit.

pub mod audit;
pub mod billing;
pub mod counting;
pub mod inspection;
pub mod intake;
pub mod inventory;
pub mod outbound;

pub use audit::AuditService;
pub use billing::BillingService;
pub use counting::CountingService;
pub use inspection::InspectionService;
pub use intake::IntakeService;
pub use inventory::InventoryService;
pub use outbound::OutboundService;
