use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// On-hand balance for one client + SKU + shelf location.
///
/// The primary key is the synthetic slug `{client}_{sku}_{location}` with
/// whitespace runs collapsed to underscores; see
/// [`crate::services::inventory::record_id`].
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "inventory")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    pub client: String,

    pub sku: String,

    pub location: String,

    pub qty: i32,

    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
