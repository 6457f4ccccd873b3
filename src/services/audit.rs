use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set,
};
use serde_json::Value;
use std::sync::Arc;
use tracing::instrument;
use uuid::Uuid;

use crate::{
    entities::operation_log::{self, Entity as OperationLog},
    errors::ServiceError,
};

/// Appends an operation log row on the given connection.
///
/// Generic over the connection so workflow services can write audit rows
/// inside their own transactions and have them roll back with the rest of
/// the step.
pub async fn record<C: ConnectionTrait>(
    conn: &C,
    target_table: &str,
    target_id: &str,
    action: &str,
    operator: &str,
    details: Value,
) -> Result<(), ServiceError> {
    let log = operation_log::ActiveModel {
        id: Set(Uuid::new_v4()),
        target_table: Set(target_table.to_string()),
        target_id: Set(target_id.to_string()),
        action: Set(action.to_string()),
        operator: Set(operator.to_string()),
        details: Set(details),
        created_at: Set(Utc::now()),
    };
    log.insert(conn).await?;
    Ok(())
}

/// Read/write surface over the append-only operation log.
#[derive(Clone)]
pub struct AuditService {
    db: Arc<DatabaseConnection>,
}

impl AuditService {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    #[instrument(skip(self, details))]
    pub async fn log(
        &self,
        target_table: &str,
        target_id: &str,
        action: &str,
        operator: &str,
        details: Value,
    ) -> Result<(), ServiceError> {
        record(&*self.db, target_table, target_id, action, operator, details).await
    }

    /// Most recent log entries, newest first.
    pub async fn recent(&self, limit: u64) -> Result<Vec<operation_log::Model>, ServiceError> {
        let logs = OperationLog::find()
            .order_by_desc(operation_log::Column::CreatedAt)
            .limit(limit)
            .all(&*self.db)
            .await?;
        Ok(logs)
    }

    /// Full trail for one record, oldest first.
    pub async fn for_target(
        &self,
        target_table: &str,
        target_id: &str,
    ) -> Result<Vec<operation_log::Model>, ServiceError> {
        let logs = OperationLog::find()
            .filter(operation_log::Column::TargetTable.eq(target_table))
            .filter(operation_log::Column::TargetId.eq(target_id))
            .order_by_asc(operation_log::Column::CreatedAt)
            .all(&*self.db)
            .await?;
        Ok(logs)
    }

    pub async fn count(&self) -> Result<u64, ServiceError> {
        let total = OperationLog::find().count(&*self.db).await?;
        Ok(total)
    }
}
