use chrono::Utc;
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, ConnectionTrait, DatabaseConnection, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, Set, TransactionTrait,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, info, instrument};
use uuid::Uuid;
use validator::Validate;

use crate::{
    entities::finance_account::{self, Entity as FinanceAccount},
    entities::finance_rule::{self, Entity as FinanceRule},
    entities::finance_transaction::{self, Entity as FinanceTransaction, TransactionType},
    errors::ServiceError,
    events::{Event, EventSender},
};

/// Resolves the billing rule for one fee category.
///
/// Precedence is explicit and independent of insertion order:
/// client+condition, then client-general, then global+condition, then
/// global-general. Rules whose condition is set but does not match the
/// requested condition never apply.
pub async fn resolve_rule<C: ConnectionTrait>(
    conn: &C,
    client: &str,
    fee_type: &str,
    condition: Option<&str>,
) -> Result<Option<finance_rule::Model>, ServiceError> {
    let rules = FinanceRule::find()
        .filter(finance_rule::Column::RuleType.eq(fee_type))
        .filter(
            Condition::any()
                .add(finance_rule::Column::ClientId.eq(client))
                .add(finance_rule::Column::ClientId.is_null()),
        )
        .all(conn)
        .await?;

    let mut best: Option<(u8, finance_rule::Model)> = None;
    for rule in rules {
        let client_specific = rule.client_id.as_deref() == Some(client);
        let rank = match (client_specific, rule.condition.as_deref(), condition) {
            (true, Some(c), Some(wanted)) if c == wanted => 0,
            (true, None, _) => 1,
            (false, Some(c), Some(wanted)) if c == wanted => 2,
            (false, None, _) => 3,
            _ => continue,
        };
        if best.as_ref().map_or(true, |(b, _)| rank < *b) {
            best = Some((rank, rule));
        }
    }
    Ok(best.map(|(_, rule)| rule))
}

/// Posts one ledger entry and writes the derived account balance, all on the
/// caller's connection. The account is auto-provisioned at zero balance when
/// it does not exist yet.
///
/// `balance_after` is computed from the account row read inside this call;
/// callers must hold a transaction for the read and write to be atomic.
pub async fn post_transaction<C: ConnectionTrait>(
    conn: &C,
    client: &str,
    tx_type: TransactionType,
    amount: Decimal,
    description: &str,
    reference_id: Option<&str>,
    operator: &str,
) -> Result<finance_transaction::Model, ServiceError> {
    if amount <= Decimal::ZERO {
        return Err(ServiceError::BillingError(
            "transaction amount must be positive".to_string(),
        ));
    }

    let now = Utc::now();
    let balance = match FinanceAccount::find_by_id(client.to_string())
        .one(conn)
        .await?
    {
        Some(account) => {
            let current = account.balance;
            let mut active: finance_account::ActiveModel = account.into();
            active.balance = Set(apply_delta(current, tx_type, amount));
            active.updated_at = Set(now);
            let updated = active.update(conn).await?;
            updated.balance
        }
        None => {
            let opening = apply_delta(Decimal::ZERO, tx_type, amount);
            let account = finance_account::ActiveModel {
                client_id: Set(client.to_string()),
                client_name: Set(client.to_string()),
                balance: Set(opening),
                credit_limit: Set(Decimal::ZERO),
                currency: Set("USD".to_string()),
                status: Set("active".to_string()),
                updated_at: Set(now),
            };
            account.insert(conn).await?;
            opening
        }
    };

    let tx = finance_transaction::ActiveModel {
        id: Set(Uuid::new_v4()),
        client_id: Set(client.to_string()),
        tx_type: Set(tx_type),
        amount: Set(amount),
        balance_after: Set(balance),
        description: Set(description.to_string()),
        reference_id: Set(reference_id.map(str::to_string)),
        operator: Set(operator.to_string()),
        created_at: Set(now),
    };
    let tx = tx.insert(conn).await?;
    Ok(tx)
}

/// Shorthand for the common case: a fee deduction inside a workflow
/// transaction.
pub async fn post_deduction<C: ConnectionTrait>(
    conn: &C,
    client: &str,
    amount: Decimal,
    description: &str,
    reference_id: Option<&str>,
    operator: &str,
) -> Result<finance_transaction::Model, ServiceError> {
    post_transaction(
        conn,
        client,
        TransactionType::Deduction,
        amount,
        description,
        reference_id,
        operator,
    )
    .await
}

fn apply_delta(balance: Decimal, tx_type: TransactionType, amount: Decimal) -> Decimal {
    match tx_type {
        TransactionType::Deduction => balance - amount,
        TransactionType::Recharge | TransactionType::Refund | TransactionType::Adjustment => {
            balance + amount
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Validate, utoipa::ToSchema)]
pub struct UpsertRuleRequest {
    pub id: Option<Uuid>,
    #[validate(length(min = 1, message = "Rule name is required"))]
    pub name: String,
    #[validate(length(min = 1, message = "Rule type is required"))]
    pub rule_type: String,
    pub condition: Option<String>,
    pub price: Decimal,
    pub unit: Option<String>,
    pub client_id: Option<String>,
}

/// Prepaid-account ledger: rules, quotes, charges, and top-ups.
#[derive(Clone)]
pub struct BillingService {
    db: Arc<DatabaseConnection>,
    event_sender: EventSender,
}

impl BillingService {
    pub fn new(db: Arc<DatabaseConnection>, event_sender: EventSender) -> Self {
        Self { db, event_sender }
    }

    pub async fn resolve_rule(
        &self,
        client: &str,
        fee_type: &str,
        condition: Option<&str>,
    ) -> Result<Option<finance_rule::Model>, ServiceError> {
        resolve_rule(&*self.db, client, fee_type, condition).await
    }

    /// Fee preview: rule price times quantity, zero when no rule applies.
    pub async fn quote(
        &self,
        client: &str,
        fee_type: &str,
        qty: i32,
        condition: Option<&str>,
    ) -> Result<Decimal, ServiceError> {
        let Some(rule) = resolve_rule(&*self.db, client, fee_type, condition).await? else {
            return Ok(Decimal::ZERO);
        };
        Ok(rule.price * Decimal::from(qty))
    }

    /// Looks up the rule for `fee_type` and posts a deduction for
    /// `price * qty`. Finding no rule, or a non-positive amount, is a silent
    /// no-op so unconfigured fees never block a workflow step.
    #[instrument(skip(self))]
    pub async fn charge(
        &self,
        client: &str,
        fee_type: &str,
        qty: i32,
        reference: &str,
        condition: Option<&str>,
        operator: &str,
    ) -> Result<Option<finance_transaction::Model>, ServiceError> {
        let Some(rule) = resolve_rule(&*self.db, client, fee_type, condition).await? else {
            debug!(client, fee_type, "No billing rule configured, skipping charge");
            return Ok(None);
        };

        let amount = rule.price * Decimal::from(qty);
        if amount <= Decimal::ZERO {
            return Ok(None);
        }

        let description = format!("{}: {}", rule.name, reference);
        let txn = self.db.begin().await?;
        let tx = post_deduction(&txn, client, amount, &description, Some(reference), operator)
            .await?;
        txn.commit().await?;

        info!(client, %amount, balance_after = %tx.balance_after, "Fee charged");
        let _ = self
            .event_sender
            .send(Event::AccountCharged {
                client_id: client.to_string(),
                amount,
                balance_after: tx.balance_after,
            })
            .await;

        Ok(Some(tx))
    }

    /// Posts an already-quoted deduction with an explicit description.
    #[instrument(skip(self))]
    pub async fn post_deduction(
        &self,
        client: &str,
        amount: Decimal,
        description: &str,
        reference: Option<&str>,
        operator: &str,
    ) -> Result<finance_transaction::Model, ServiceError> {
        let txn = self.db.begin().await?;
        let tx = post_deduction(&txn, client, amount, description, reference, operator).await?;
        txn.commit().await?;

        let _ = self
            .event_sender
            .send(Event::AccountCharged {
                client_id: client.to_string(),
                amount,
                balance_after: tx.balance_after,
            })
            .await;

        Ok(tx)
    }

    #[instrument(skip(self))]
    pub async fn top_up(
        &self,
        client: &str,
        amount: Decimal,
        operator: &str,
    ) -> Result<finance_transaction::Model, ServiceError> {
        let txn = self.db.begin().await?;
        let tx = post_transaction(
            &txn,
            client,
            TransactionType::Recharge,
            amount,
            &format!("Recharge by {}", operator),
            None,
            operator,
        )
        .await?;
        txn.commit().await?;

        info!(client, %amount, balance_after = %tx.balance_after, "Account recharged");
        let _ = self
            .event_sender
            .send(Event::AccountRecharged {
                client_id: client.to_string(),
                amount,
                balance_after: tx.balance_after,
            })
            .await;

        Ok(tx)
    }

    pub async fn get_account(
        &self,
        client: &str,
    ) -> Result<finance_account::Model, ServiceError> {
        FinanceAccount::find_by_id(client.to_string())
            .one(&*self.db)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Account for {} not found", client)))
    }

    pub async fn list_accounts(&self) -> Result<Vec<finance_account::Model>, ServiceError> {
        let accounts = FinanceAccount::find()
            .order_by_asc(finance_account::Column::ClientId)
            .all(&*self.db)
            .await?;
        Ok(accounts)
    }

    /// Transaction history, newest first, optionally narrowed to one client.
    pub async fn list_transactions(
        &self,
        client: Option<&str>,
        page: u64,
        per_page: u64,
    ) -> Result<(Vec<finance_transaction::Model>, u64), ServiceError> {
        let mut query = FinanceTransaction::find();
        if let Some(client) = client {
            query = query.filter(finance_transaction::Column::ClientId.eq(client));
        }
        let query = query.order_by_desc(finance_transaction::Column::CreatedAt);

        let paginator = query.paginate(&*self.db, per_page.max(1));
        let total = paginator.num_items().await?;
        let transactions = paginator.fetch_page(page.saturating_sub(1)).await?;
        Ok((transactions, total))
    }

    pub async fn list_rules(
        &self,
        fee_type: Option<&str>,
    ) -> Result<Vec<finance_rule::Model>, ServiceError> {
        let mut query = FinanceRule::find();
        if let Some(fee_type) = fee_type {
            query = query.filter(finance_rule::Column::RuleType.eq(fee_type));
        }
        let rules = query
            .order_by_asc(finance_rule::Column::RuleType)
            .all(&*self.db)
            .await?;
        Ok(rules)
    }

    /// Creates a rule, or replaces the priced fields of an existing one when
    /// an id is supplied.
    #[instrument(skip(self, request))]
    pub async fn upsert_rule(
        &self,
        request: UpsertRuleRequest,
    ) -> Result<finance_rule::Model, ServiceError> {
        request.validate()?;

        if let Some(id) = request.id {
            let existing = FinanceRule::find_by_id(id)
                .one(&*self.db)
                .await?
                .ok_or_else(|| ServiceError::NotFound(format!("Rule {} not found", id)))?;
            let mut active: finance_rule::ActiveModel = existing.into();
            active.name = Set(request.name);
            active.rule_type = Set(request.rule_type);
            active.condition = Set(request.condition);
            active.price = Set(request.price);
            active.unit = Set(request.unit);
            active.client_id = Set(request.client_id);
            let updated = active.update(&*self.db).await?;
            return Ok(updated);
        }

        let rule = finance_rule::ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(request.name),
            rule_type: Set(request.rule_type),
            condition: Set(request.condition),
            price: Set(request.price),
            unit: Set(request.unit),
            client_id: Set(request.client_id),
            created_at: Set(Utc::now()),
        };
        let rule = rule.insert(&*self.db).await?;
        Ok(rule)
    }

    pub async fn delete_rule(&self, id: Uuid) -> Result<(), ServiceError> {
        let result = FinanceRule::delete_by_id(id).exec(&*self.db).await?;
        if result.rows_affected == 0 {
            return Err(ServiceError::NotFound(format!("Rule {} not found", id)));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::apply_delta;
    use crate::entities::finance_transaction::TransactionType;
    use rust_decimal_macros::dec;

    #[test]
    fn deduction_subtracts_and_recharge_adds() {
        assert_eq!(
            apply_delta(dec!(100), TransactionType::Deduction, dec!(30)),
            dec!(70)
        );
        assert_eq!(
            apply_delta(dec!(100), TransactionType::Recharge, dec!(30)),
            dec!(130)
        );
        assert_eq!(
            apply_delta(dec!(0), TransactionType::Refund, dec!(5)),
            dec!(5)
        );
    }
}
