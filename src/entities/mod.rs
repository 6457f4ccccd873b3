//! SeaORM entities for the tables the workflow layer reads and writes.

pub mod client;
pub mod finance_account;
pub mod finance_rule;
pub mod finance_transaction;
pub mod inbound_item;
pub mod inbound_order;
pub mod inspection;
pub mod inventory_record;
pub mod operation_log;
pub mod outbound_item;
pub mod outbound_order;
pub mod package;
pub mod package_item;
pub mod product;
