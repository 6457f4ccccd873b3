//! Billing rule precedence, quoting, charging, and the prepaid ledger.

mod common;

use assert_matches::assert_matches;
use common::TestApp;
use rust_decimal_macros::dec;

use wms_api::{
    errors::ServiceError,
    services::billing::UpsertRuleRequest,
};

#[tokio::test]
async fn rule_precedence_is_deterministic() {
    let app = TestApp::new().await;

    // All four tiers for the same fee type, inserted in reverse order so
    // the outcome cannot depend on insertion order.
    app.seed_rule("Global General", "inspection", None, dec!(4), None)
        .await;
    app.seed_rule("Global Electronics", "inspection", Some("electronics"), dec!(3), None)
        .await;
    app.seed_rule("Acme General", "inspection", None, dec!(2), Some("Acme"))
        .await;
    app.seed_rule("Acme Electronics", "inspection", Some("electronics"), dec!(1), Some("Acme"))
        .await;

    let billing = &app.state.services.billing;

    let rule = billing
        .resolve_rule("Acme", "inspection", Some("electronics"))
        .await
        .expect("resolve")
        .expect("rule");
    assert_eq!(rule.name, "Acme Electronics");

    // No condition requested: conditioned rules never apply.
    let rule = billing
        .resolve_rule("Acme", "inspection", None)
        .await
        .expect("resolve")
        .expect("rule");
    assert_eq!(rule.name, "Acme General");

    // Unknown client falls through to the global tiers.
    let rule = billing
        .resolve_rule("Other", "inspection", Some("electronics"))
        .await
        .expect("resolve")
        .expect("rule");
    assert_eq!(rule.name, "Global Electronics");

    let rule = billing
        .resolve_rule("Other", "inspection", Some("apparel"))
        .await
        .expect("resolve")
        .expect("rule");
    assert_eq!(rule.name, "Global General");
}

#[tokio::test]
async fn conditioned_rule_never_matches_other_conditions() {
    let app = TestApp::new().await;
    app.seed_rule("Apparel Only", "inspection", Some("apparel"), dec!(5), None)
        .await;

    let rule = app
        .state
        .services
        .billing
        .resolve_rule("Acme", "inspection", Some("electronics"))
        .await
        .expect("resolve");
    assert!(rule.is_none());
}

#[tokio::test]
async fn quote_is_zero_without_a_rule() {
    let app = TestApp::new().await;
    let amount = app
        .state
        .services
        .billing
        .quote("Acme", "inspection", 7, None)
        .await
        .expect("quote");
    assert_eq!(amount, dec!(0));
}

#[tokio::test]
async fn charge_skips_silently_without_a_rule() {
    let app = TestApp::new().await;
    let tx = app
        .state
        .services
        .billing
        .charge("Acme", "inspection", 3, "TRK-1", None, "tester")
        .await
        .expect("charge");
    assert!(tx.is_none());
}

#[tokio::test]
async fn charge_auto_provisions_the_account() {
    let app = TestApp::new().await;
    app.seed_rule("Inspection Fee", "inspection", None, dec!(2), None)
        .await;

    let tx = app
        .state
        .services
        .billing
        .charge("NewClient", "inspection", 3, "TRK-9", None, "tester")
        .await
        .expect("charge")
        .expect("transaction");
    assert_eq!(tx.amount, dec!(6));
    assert_eq!(tx.balance_after, dec!(-6));
    assert_eq!(tx.description, "Inspection Fee: TRK-9");

    let account = app
        .state
        .services
        .billing
        .get_account("NewClient")
        .await
        .expect("account");
    assert_eq!(account.balance, dec!(-6));
    assert_eq!(account.currency, "USD");
    assert_eq!(account.status, "active");
}

#[tokio::test]
async fn sequential_postings_track_the_running_balance() {
    let app = TestApp::new().await;
    app.seed_rule("Inspection Fee", "inspection", None, dec!(10), None)
        .await;
    let billing = &app.state.services.billing;

    let recharge = billing
        .top_up("Acme", dec!(50), "tester")
        .await
        .expect("top up");
    assert_eq!(recharge.balance_after, dec!(50));
    assert_eq!(recharge.description, "Recharge by tester");

    let first = billing
        .charge("Acme", "inspection", 2, "TRK-1", None, "tester")
        .await
        .expect("charge")
        .expect("tx");
    assert_eq!(first.balance_after, dec!(30));

    let second = billing
        .charge("Acme", "inspection", 4, "TRK-2", None, "tester")
        .await
        .expect("charge")
        .expect("tx");
    assert_eq!(second.balance_after, dec!(-10));

    let account = billing.get_account("Acme").await.expect("account");
    assert_eq!(account.balance, dec!(-10));
}

#[tokio::test]
async fn top_up_rejects_non_positive_amounts() {
    let app = TestApp::new().await;
    let err = app
        .state
        .services
        .billing
        .top_up("Acme", dec!(0), "tester")
        .await
        .expect_err("zero top up");
    assert_matches!(err, ServiceError::BillingError(_));
}

#[tokio::test]
async fn rules_can_be_upserted_and_deleted() {
    let app = TestApp::new().await;
    let billing = &app.state.services.billing;

    let created = billing
        .upsert_rule(UpsertRuleRequest {
            id: None,
            name: "Picking Fee".to_string(),
            rule_type: "outbound_picking".to_string(),
            condition: None,
            price: dec!(0.4),
            unit: Some("item".to_string()),
            client_id: None,
        })
        .await
        .expect("create rule");
    assert_eq!(created.price, dec!(0.4));

    let updated = billing
        .upsert_rule(UpsertRuleRequest {
            id: Some(created.id),
            name: "Picking Fee".to_string(),
            rule_type: "outbound_picking".to_string(),
            condition: None,
            price: dec!(0.6),
            unit: Some("item".to_string()),
            client_id: Some("Acme".to_string()),
        })
        .await
        .expect("update rule");
    assert_eq!(updated.id, created.id);
    assert_eq!(updated.price, dec!(0.6));
    assert_eq!(updated.client_id.as_deref(), Some("Acme"));

    billing.delete_rule(created.id).await.expect("delete");
    let err = billing.delete_rule(created.id).await.expect_err("gone");
    assert_matches!(err, ServiceError::NotFound(_));

    let rules = billing
        .list_rules(Some("outbound_picking"))
        .await
        .expect("list");
    assert!(rules.is_empty());
}

#[tokio::test]
async fn empty_rule_name_fails_validation() {
    let app = TestApp::new().await;
    let err = app
        .state
        .services
        .billing
        .upsert_rule(UpsertRuleRequest {
            id: None,
            name: String::new(),
            rule_type: "inspection".to_string(),
            condition: None,
            price: dec!(1),
            unit: None,
            client_id: None,
        })
        .await
        .expect_err("empty name");
    assert_matches!(err, ServiceError::ValidationError(_));
}
