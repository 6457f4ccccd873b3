use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Outcome of a quality check on a single line item.
#[derive(Clone, Copy, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize, utoipa::ToSchema)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
pub enum InspectionResult {
    #[sea_orm(string_value = "PASS")]
    Pass,

    #[sea_orm(string_value = "FAIL")]
    Fail,
}

impl fmt::Display for InspectionResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InspectionResult::Pass => write!(f, "PASS"),
            InspectionResult::Fail => write!(f, "FAIL"),
        }
    }
}

/// Quality-check record for one counted line item.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "inspections")]
pub struct Model {
    #[sea_orm(primary_key, column_type = "Uuid")]
    pub id: Uuid,

    pub target_item_id: Uuid,

    pub status: InspectionResult,

    /// Condition grade, e.g. "A", "B", "C".
    pub grade: Option<String>,

    /// Fault codes observed during the check.
    pub faults: Json,

    pub imei: Option<String>,

    pub inspector: String,

    pub inspected_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::package_item::Entity",
        from = "Column::TargetItemId",
        to = "super::package_item::Column::Id"
    )]
    Item,
}

impl Related<super::package_item::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Item.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
