use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Outbound order status enumeration
#[derive(Clone, Copy, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize, utoipa::ToSchema)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(32))")]
pub enum OutboundStatus {
    #[sea_orm(string_value = "PENDING")]
    Pending,

    #[sea_orm(string_value = "WAIT_LABEL_DATA")]
    WaitLabelData,

    #[sea_orm(string_value = "WAIT_CLIENT_LABEL")]
    WaitClientLabel,

    #[sea_orm(string_value = "PROCESSING")]
    Processing,

    #[sea_orm(string_value = "WAIT_SHIP")]
    WaitShip,

    #[sea_orm(string_value = "SHIPPED")]
    Shipped,
}

impl fmt::Display for OutboundStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutboundStatus::Pending => write!(f, "PENDING"),
            OutboundStatus::WaitLabelData => write!(f, "WAIT_LABEL_DATA"),
            OutboundStatus::WaitClientLabel => write!(f, "WAIT_CLIENT_LABEL"),
            OutboundStatus::Processing => write!(f, "PROCESSING"),
            OutboundStatus::WaitShip => write!(f, "WAIT_SHIP"),
            OutboundStatus::Shipped => write!(f, "SHIPPED"),
        }
    }
}

/// Fulfillment service level for an outbound order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize, utoipa::ToSchema)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
pub enum ServiceType {
    #[sea_orm(string_value = "STANDARD")]
    Standard,

    /// Items are re-labeled with a new FNSKU before shipping.
    #[sea_orm(string_value = "RELABEL")]
    Relabel,
}

impl fmt::Display for ServiceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ServiceType::Standard => write!(f, "STANDARD"),
            ServiceType::Relabel => write!(f, "RELABEL"),
        }
    }
}

/// Outbound fulfillment order, driven through pick, pack/VAS, and ship.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "outbound_orders")]
pub struct Model {
    #[sea_orm(primary_key, column_type = "Uuid")]
    pub id: Uuid,

    #[sea_orm(unique)]
    pub order_no: String,

    pub client: String,

    pub carrier: Option<String>,

    pub status: OutboundStatus,

    pub service_type: ServiceType,

    pub remark: Option<String>,

    /// Attached file references (label PDFs, packing lists).
    pub attachments: Option<Json>,

    pub created_at: DateTimeUtc,

    pub shipped_at: Option<DateTimeUtc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::outbound_item::Entity")]
    Items,
}

impl Related<super::outbound_item::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Items.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
