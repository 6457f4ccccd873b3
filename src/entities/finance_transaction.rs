use rust_decimal::Decimal;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Ledger posting direction/category.
#[derive(Clone, Copy, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
pub enum TransactionType {
    #[sea_orm(string_value = "RECHARGE")]
    Recharge,

    #[sea_orm(string_value = "DEDUCTION")]
    Deduction,

    #[sea_orm(string_value = "REFUND")]
    Refund,

    #[sea_orm(string_value = "ADJUSTMENT")]
    Adjustment,
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransactionType::Recharge => write!(f, "RECHARGE"),
            TransactionType::Deduction => write!(f, "DEDUCTION"),
            TransactionType::Refund => write!(f, "REFUND"),
            TransactionType::Adjustment => write!(f, "ADJUSTMENT"),
        }
    }
}

/// Balance-mutating ledger entry. `balance_after` snapshots the account
/// balance computed inside the posting transaction.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "finance_transactions")]
pub struct Model {
    #[sea_orm(primary_key, column_type = "Uuid")]
    pub id: Uuid,

    pub client_id: String,

    pub tx_type: TransactionType,

    #[sea_orm(column_type = "Decimal(Some((19, 4)))")]
    pub amount: Decimal,

    #[sea_orm(column_type = "Decimal(Some((19, 4)))")]
    pub balance_after: Decimal,

    pub description: String,

    pub reference_id: Option<String>,

    pub operator: String,

    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
