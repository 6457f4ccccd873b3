use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Line of an outbound order. `new_fnsku` is required when the parent
/// order's service type is RELABEL.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "outbound_items")]
pub struct Model {
    #[sea_orm(primary_key, column_type = "Uuid")]
    pub id: Uuid,

    pub order_id: Uuid,

    pub sku: String,

    pub qty: i32,

    pub new_fnsku: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::outbound_order::Entity",
        from = "Column::OrderId",
        to = "super::outbound_order::Column::Id"
    )]
    OutboundOrder,
}

impl Related<super::outbound_order::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::OutboundOrder.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
