use rust_decimal::Decimal;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Billing rule: price per unit for one fee category, optionally narrowed by
/// a condition sub-key (inspection standard, packing material type) and/or a
/// client override.
///
/// Resolution ranks client+condition > client-general > global+condition >
/// global-general; see [`crate::services::billing::BillingService`].
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "finance_rules")]
pub struct Model {
    #[sea_orm(primary_key, column_type = "Uuid")]
    pub id: Uuid,

    pub name: String,

    /// Fee category: "storage", "outbound_picking", "material", "pallet_fee",
    /// "labeling", "inspection", ...
    pub rule_type: String,

    pub condition: Option<String>,

    #[sea_orm(column_type = "Decimal(Some((19, 4)))")]
    pub price: Decimal,

    pub unit: Option<String>,

    /// When set, the rule applies only to this client.
    pub client_id: Option<String>,

    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
