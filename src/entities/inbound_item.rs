use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Per-SKU line of an inbound order.
///
/// `expected_qty` is fixed at pre-advice time; `received_qty` accumulates
/// across counting sessions. Lines for unplanned SKUs are inserted with
/// `expected_qty = 0` rather than rejected.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "inbound_items")]
pub struct Model {
    #[sea_orm(primary_key, column_type = "Uuid")]
    pub id: Uuid,

    pub order_id: Uuid,

    pub sku: String,

    pub expected_qty: i32,

    pub received_qty: i32,

    pub passed_qty: i32,

    pub failed_qty: i32,

    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::inbound_order::Entity",
        from = "Column::OrderId",
        to = "super::inbound_order::Column::Id"
    )]
    InboundOrder,
}

impl Related<super::inbound_order::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::InboundOrder.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
