use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Physical packaging form of a received parcel.
#[derive(Clone, Copy, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize, utoipa::ToSchema)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
pub enum PackageType {
    #[sea_orm(string_value = "box")]
    Box,

    #[sea_orm(string_value = "pallet")]
    Pallet,
}

impl fmt::Display for PackageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PackageType::Box => write!(f, "box"),
            PackageType::Pallet => write!(f, "pallet"),
        }
    }
}

/// Package status; advances monotonically through the handling pipeline.
#[derive(Clone, Copy, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(32))")]
pub enum PackageStatus {
    #[sea_orm(string_value = "PENDING")]
    Pending,

    #[sea_orm(string_value = "WAIT_INSPECT")]
    WaitInspect,

    #[sea_orm(string_value = "RECEIVED")]
    Received,

    #[sea_orm(string_value = "INSPECTING")]
    Inspecting,

    #[sea_orm(string_value = "INSPECTED")]
    Inspected,

    #[sea_orm(string_value = "COMPLETED")]
    Completed,
}

impl fmt::Display for PackageStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PackageStatus::Pending => write!(f, "PENDING"),
            PackageStatus::WaitInspect => write!(f, "WAIT_INSPECT"),
            PackageStatus::Received => write!(f, "RECEIVED"),
            PackageStatus::Inspecting => write!(f, "INSPECTING"),
            PackageStatus::Inspected => write!(f, "INSPECTED"),
            PackageStatus::Completed => write!(f, "COMPLETED"),
        }
    }
}

/// A physically received parcel. Zero or one linked inbound order; the
/// tracking number is duplicate-checked before insert.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "packages")]
pub struct Model {
    #[sea_orm(primary_key, column_type = "Uuid")]
    pub id: Uuid,

    #[sea_orm(unique)]
    pub tracking_no: String,

    pub client: String,

    pub carrier: Option<String>,

    pub package_type: PackageType,

    pub status: PackageStatus,

    pub location: Option<String>,

    pub inbound_order_id: Option<Uuid>,

    /// Secondary scanned code (supplier receipt / delivery note).
    pub receipt: Option<String>,

    pub is_abnormal: bool,

    pub reason: Option<String>,

    pub operator: String,

    pub counted_at: Option<DateTimeUtc>,

    pub created_at: DateTimeUtc,

    pub updated_at: Option<DateTimeUtc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::package_item::Entity")]
    Items,
}

impl Related<super::package_item::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Items.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
