use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Warehouse client (the cargo owner billed for services).
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "clients")]
pub struct Model {
    #[sea_orm(primary_key, column_type = "Uuid")]
    pub id: Uuid,

    #[sea_orm(unique)]
    pub name: String,

    /// Default shelf location suggested during counting.
    pub default_location: Option<String>,

    pub contact: Option<String>,

    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
