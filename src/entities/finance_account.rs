use rust_decimal::Decimal;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Prepaid wallet for one client. The stored balance is authoritative; it is
/// only ever mutated inside the same transaction that records the
/// corresponding finance transaction.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "finance_accounts")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub client_id: String,

    pub client_name: String,

    #[sea_orm(column_type = "Decimal(Some((19, 4)))")]
    pub balance: Decimal,

    #[sea_orm(column_type = "Decimal(Some((19, 4)))")]
    pub credit_limit: Decimal,

    pub currency: String,

    pub status: String,

    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
