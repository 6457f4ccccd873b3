use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Inbound order type enumeration
#[derive(Clone, Copy, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize, utoipa::ToSchema)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(32))")]
pub enum InboundType {
    #[sea_orm(string_value = "RETURN")]
    Return,

    #[sea_orm(string_value = "NEW")]
    New,

    #[sea_orm(string_value = "AFTER_SALES")]
    AfterSales,

    /// Receipt with no pre-advice; the order is created at the dock.
    #[sea_orm(string_value = "BLIND")]
    Blind,
}

impl fmt::Display for InboundType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InboundType::Return => write!(f, "RETURN"),
            InboundType::New => write!(f, "NEW"),
            InboundType::AfterSales => write!(f, "AFTER_SALES"),
            InboundType::Blind => write!(f, "BLIND"),
        }
    }
}

/// Inbound order status enumeration
#[derive(Clone, Copy, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(32))")]
pub enum InboundStatus {
    #[sea_orm(string_value = "IN_TRANSIT")]
    InTransit,

    #[sea_orm(string_value = "ARRIVED")]
    Arrived,

    #[sea_orm(string_value = "RECEIVED")]
    Received,

    #[sea_orm(string_value = "COUNTED")]
    Counted,

    #[sea_orm(string_value = "INSPECTING")]
    Inspecting,

    #[sea_orm(string_value = "COMPLETED")]
    Completed,
}

impl fmt::Display for InboundStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InboundStatus::InTransit => write!(f, "IN_TRANSIT"),
            InboundStatus::Arrived => write!(f, "ARRIVED"),
            InboundStatus::Received => write!(f, "RECEIVED"),
            InboundStatus::Counted => write!(f, "COUNTED"),
            InboundStatus::Inspecting => write!(f, "INSPECTING"),
            InboundStatus::Completed => write!(f, "COMPLETED"),
        }
    }
}

/// Inbound order entity model.
///
/// Pre-advised orders carry an `R`-prefixed order number; blind receipts get
/// an `RB` prefix. The tracking number is optional and should be unique when
/// present, but history can contain duplicates from failed receiving attempts
/// (see the intake resolver's orphan recovery).
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "inbound_orders")]
pub struct Model {
    #[sea_orm(primary_key, column_type = "Uuid")]
    pub id: Uuid,

    #[sea_orm(unique)]
    pub order_no: String,

    pub client_id: String,

    pub inbound_type: InboundType,

    pub tracking_no: Option<String>,

    pub carrier: Option<String>,

    pub status: InboundStatus,

    pub expected_date: Option<DateTimeUtc>,

    pub remark: Option<String>,

    pub created_by: String,

    pub created_at: DateTimeUtc,

    pub updated_at: Option<DateTimeUtc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::inbound_item::Entity")]
    InboundItems,
}

impl Related<super::inbound_item::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::InboundItems.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
