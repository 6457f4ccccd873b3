use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Routing for a counted line: straight to shelf, or through quality check.
#[derive(Clone, Copy, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize, utoipa::ToSchema)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
pub enum ReturnType {
    #[sea_orm(string_value = "NEW")]
    New,

    #[sea_orm(string_value = "INSPECT")]
    Inspect,
}

impl fmt::Display for ReturnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReturnType::New => write!(f, "NEW"),
            ReturnType::Inspect => write!(f, "INSPECT"),
        }
    }
}

/// Line item collected during a counting session.
///
/// LPN-tagged lines are always routed to inspection; the counting service
/// enforces that regardless of the requested return type.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "items")]
pub struct Model {
    #[sea_orm(primary_key, column_type = "Uuid")]
    pub id: Uuid,

    pub package_id: Uuid,

    /// Denormalized from the package for scan-history queries.
    pub tracking_no: String,

    pub sku: String,

    pub lpn: Option<String>,

    pub qty: i32,

    pub remark: Option<String>,

    pub return_type: ReturnType,

    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::package::Entity",
        from = "Column::PackageId",
        to = "super::package::Column::Id"
    )]
    Package,
}

impl Related<super::package::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Package.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
