use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Sentinel SKU assigned to LPN-tagged lines awaiting quality check.
pub const PENDING_QC_SKU: &str = "Pending_QC";

/// Product catalog entry, scoped per client. Counting refuses SKUs that are
/// not registered here.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "products")]
pub struct Model {
    #[sea_orm(primary_key, column_type = "Uuid")]
    pub id: Uuid,

    pub client: String,

    pub sku: String,

    pub name: Option<String>,

    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
