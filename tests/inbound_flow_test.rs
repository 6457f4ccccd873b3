//! End-to-end inbound workflow: pre-advice, receiving, counting, and
//! inspection, including the ledger entries each step writes.

mod common;

use assert_matches::assert_matches;
use common::{operator, TestApp};
use rust_decimal_macros::dec;
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter};

use wms_api::{
    entities::{
        finance_transaction::{self, TransactionType},
        inbound_order::{InboundStatus, InboundType},
        package::{Entity as Package, PackageStatus},
    },
    errors::ServiceError,
    services::intake::{CreatePreAdviceRequest, IntakeResolution, PreAdviceItem, ReceiveRequest},
    services::counting::{FinishRequest, ItemDraft},
};

fn receive_request(tracking_no: &str) -> ReceiveRequest {
    serde_json::from_value(serde_json::json!({ "tracking_no": tracking_no }))
        .expect("receive request")
}

#[tokio::test]
async fn pre_advice_receive_count_and_inspect() {
    let app = TestApp::new().await;
    app.seed_client("Acme", Some("A-01")).await;
    app.seed_product("Acme", "SKU-100").await;
    app.seed_rule("Inspection Fee", "inspection", Some("electronics"), dec!(2), None)
        .await;
    let user = operator();

    // Pre-advice with one expected line.
    let created = app
        .state
        .services
        .intake
        .create_pre_advice(
            CreatePreAdviceRequest {
                client_id: "Acme".to_string(),
                inbound_type: InboundType::New,
                tracking_no: Some("TRK-1001".to_string()),
                carrier: Some("UPS".to_string()),
                expected_date: None,
                remark: None,
                items: vec![PreAdviceItem {
                    sku: "SKU-100".to_string(),
                    expected_qty: 5,
                }],
            },
            &user,
        )
        .await
        .expect("pre-advice");
    assert!(created.order.order_no.starts_with('R'));
    assert_eq!(created.order.status, InboundStatus::InTransit);
    assert_eq!(created.items.len(), 1);

    // Receiving against the pre-advice advances the order and links the
    // package.
    let pkg = app
        .state
        .services
        .intake
        .receive(receive_request("TRK-1001"), &user)
        .await
        .expect("receive");
    assert_eq!(pkg.status, PackageStatus::Pending);
    assert_eq!(pkg.client, "Acme");
    assert_eq!(pkg.inbound_order_id, Some(created.order.id));

    let order = app
        .state
        .services
        .intake
        .get_order(created.order.id)
        .await
        .expect("order");
    assert_eq!(order.order.status, InboundStatus::Received);

    // Counting: two lines of the expected SKU.
    for _ in 0..2 {
        app.state
            .services
            .counting
            .add_item(
                pkg.id,
                ItemDraft {
                    sku: "SKU-100".to_string(),
                    lpn: None,
                    qty: 3,
                    remark: None,
                    return_type: wms_api::entities::package_item::ReturnType::New,
                },
                &user,
            )
            .await
            .expect("add item");
    }

    let finished = app
        .state
        .services
        .counting
        .finish(
            pkg.id,
            FinishRequest {
                location: Some("B-07".to_string()),
                receipt: Some("88123".to_string()),
            },
            &user,
        )
        .await
        .expect("finish count");
    assert_eq!(finished.status, PackageStatus::WaitInspect);
    assert_eq!(finished.location.as_deref(), Some("B-07"));
    assert!(finished.counted_at.is_some());

    // Order line rolls up both counted lines; order carries the receipt tag.
    let order = app
        .state
        .services
        .intake
        .get_order(created.order.id)
        .await
        .expect("order");
    assert_eq!(order.order.status, InboundStatus::Counted);
    assert!(order
        .order
        .remark
        .as_deref()
        .unwrap_or_default()
        .contains("Receipt: 88123"));
    assert_eq!(order.items[0].expected_qty, 5);
    assert_eq!(order.items[0].received_qty, 6);

    // Inventory landed on the chosen shelf.
    let record = app
        .state
        .services
        .inventory
        .get("Acme_SKU-100_B-07")
        .await
        .expect("inventory record");
    assert_eq!(record.qty, 6);

    // Inspection charges 2.00 per unit for 6 units.
    let fee = app
        .state
        .services
        .inspection
        .estimate_fee(pkg.id, "electronics")
        .await
        .expect("estimate");
    assert_eq!(fee, dec!(12));

    let inspected = app
        .state
        .services
        .inspection
        .submit(pkg.id, "electronics", &user)
        .await
        .expect("submit inspection");
    assert_eq!(inspected.status, PackageStatus::Inspected);

    let (txs, total) = app
        .state
        .services
        .billing
        .list_transactions(Some("Acme"), 1, 10)
        .await
        .expect("transactions");
    assert_eq!(total, 1);
    assert_eq!(txs[0].tx_type, TransactionType::Deduction);
    assert_eq!(txs[0].amount, dec!(12));
    assert_eq!(txs[0].balance_after, dec!(-12));
    assert_eq!(
        txs[0].description,
        "Inspection Fee (electronics): TRK-1001"
    );
}

#[tokio::test]
async fn receiving_the_same_tracking_number_twice_conflicts() {
    let app = TestApp::new().await;
    app.seed_client("Acme", None).await;
    let user = operator();

    let mut request = receive_request("TRK-DUP");
    request.client = Some("Acme".to_string());
    request.carrier = Some("DHL".to_string());
    app.state
        .services
        .intake
        .receive(request, &user)
        .await
        .expect("first receive");

    let mut request = receive_request("TRK-DUP");
    request.client = Some("Acme".to_string());
    request.carrier = Some("DHL".to_string());
    let err = app
        .state
        .services
        .intake
        .receive(request, &user)
        .await
        .expect_err("duplicate receive");
    assert_matches!(err, ServiceError::Conflict(_));
}

#[tokio::test]
async fn blind_receipt_requires_client_and_carrier() {
    let app = TestApp::new().await;
    let user = operator();

    let err = app
        .state
        .services
        .intake
        .receive(receive_request("TRK-NOCLIENT"), &user)
        .await
        .expect_err("missing client");
    assert_matches!(err, ServiceError::ValidationError(_));

    let mut request = receive_request("TRK-NOCARRIER");
    request.client = Some("Acme".to_string());
    let err = app
        .state
        .services
        .intake
        .receive(request, &user)
        .await
        .expect_err("missing carrier");
    assert_matches!(err, ServiceError::ValidationError(_));
}

#[tokio::test]
async fn blind_receipt_creates_rb_order() {
    let app = TestApp::new().await;
    app.seed_client("Acme", None).await;
    let user = operator();

    let mut request = receive_request("TRK-BLIND");
    request.client = Some("Acme".to_string());
    request.carrier = Some("FedEx".to_string());
    let pkg = app
        .state
        .services
        .intake
        .receive(request, &user)
        .await
        .expect("blind receive");

    let order = app
        .state
        .services
        .intake
        .get_order(pkg.inbound_order_id.expect("linked order"))
        .await
        .expect("order");
    assert!(order.order.order_no.starts_with("RB"));
    assert_eq!(order.order.inbound_type, InboundType::Blind);
    assert_eq!(order.order.status, InboundStatus::Received);
    assert_eq!(order.order.tracking_no.as_deref(), Some("TRK-BLIND"));
}

#[tokio::test]
async fn resolve_recovers_orphaned_blind_order() {
    let app = TestApp::new().await;
    app.seed_client("Acme", Some("A-01")).await;
    let user = operator();

    // Simulate an interrupted blind receipt: order exists, package does not.
    let mut request = receive_request("TRK-ORPHAN");
    request.client = Some("Acme".to_string());
    request.carrier = Some("DHL".to_string());
    let pkg = app
        .state
        .services
        .intake
        .receive(request, &user)
        .await
        .expect("receive");
    Package::delete_by_id(pkg.id)
        .exec(app.db())
        .await
        .expect("drop package row");

    let resolution = app
        .state
        .services
        .intake
        .resolve("TRK-ORPHAN", &user)
        .await
        .expect("resolve");
    let recovered = assert_matches!(
        resolution,
        IntakeResolution::Recovered { package, order, default_location } => {
            assert_eq!(order.tracking_no.as_deref(), Some("TRK-ORPHAN"));
            assert_eq!(default_location.as_deref(), Some("A-01"));
            package
        }
    );
    assert_eq!(recovered.status, PackageStatus::Pending);
    assert_eq!(recovered.carrier.as_deref(), Some("DHL"));

    // The recovery is on the audit trail.
    let logs = app
        .state
        .services
        .audit
        .for_target("packages", &recovered.id.to_string())
        .await
        .expect("logs");
    assert!(logs.iter().any(|l| l.action == "AUTO_RECOVER"));
}

#[tokio::test]
async fn resolve_flags_already_processed_packages() {
    let app = TestApp::new().await;
    app.seed_client("Acme", None).await;
    app.seed_product("Acme", "SKU-1").await;
    let user = operator();

    let mut request = receive_request("TRK-SEEN");
    request.client = Some("Acme".to_string());
    request.carrier = Some("DHL".to_string());
    let pkg = app
        .state
        .services
        .intake
        .receive(request, &user)
        .await
        .expect("receive");

    // Fresh package: no confirmation needed.
    let resolution = app
        .state
        .services
        .intake
        .resolve("TRK-SEEN", &user)
        .await
        .expect("resolve");
    assert_matches!(
        resolution,
        IntakeResolution::Existing { needs_confirmation: false, .. }
    );

    // After counting the package is past Pending and re-scanning warns.
    app.state
        .services
        .counting
        .add_item(
            pkg.id,
            ItemDraft {
                sku: "SKU-1".to_string(),
                lpn: None,
                qty: 1,
                remark: None,
                return_type: wms_api::entities::package_item::ReturnType::New,
            },
            &user,
        )
        .await
        .expect("add item");
    app.state
        .services
        .counting
        .finish(pkg.id, FinishRequest { location: None, receipt: None }, &user)
        .await
        .expect("finish");

    let resolution = app
        .state
        .services
        .intake
        .resolve("TRK-SEEN", &user)
        .await
        .expect("resolve");
    assert_matches!(
        resolution,
        IntakeResolution::Existing { needs_confirmation: true, .. }
    );
}

#[tokio::test]
async fn unknown_tracking_number_resolves_to_not_found() {
    let app = TestApp::new().await;
    let user = operator();

    let resolution = app
        .state
        .services
        .intake
        .resolve("TRK-MISSING", &user)
        .await
        .expect("resolve");
    assert_matches!(resolution, IntakeResolution::NotFound);
}

#[tokio::test]
async fn pre_advice_rejects_blind_type_and_bad_lines() {
    let app = TestApp::new().await;
    let user = operator();

    let err = app
        .state
        .services
        .intake
        .create_pre_advice(
            CreatePreAdviceRequest {
                client_id: "Acme".to_string(),
                inbound_type: InboundType::Blind,
                tracking_no: None,
                carrier: None,
                expected_date: None,
                remark: None,
                items: vec![PreAdviceItem {
                    sku: "SKU-1".to_string(),
                    expected_qty: 1,
                }],
            },
            &user,
        )
        .await
        .expect_err("blind pre-advice");
    assert_matches!(err, ServiceError::ValidationError(_));

    let err = app
        .state
        .services
        .intake
        .create_pre_advice(
            CreatePreAdviceRequest {
                client_id: "Acme".to_string(),
                inbound_type: InboundType::New,
                tracking_no: None,
                carrier: None,
                expected_date: None,
                remark: None,
                items: vec![PreAdviceItem {
                    sku: "SKU-1".to_string(),
                    expected_qty: 0,
                }],
            },
            &user,
        )
        .await
        .expect_err("zero quantity line");
    assert_matches!(err, ServiceError::ValidationError(_));
}

#[tokio::test]
async fn counting_fee_never_posts_without_rules() {
    // No billing rules at all: inspection still completes, ledger stays
    // empty.
    let app = TestApp::new().await;
    app.seed_client("Acme", None).await;
    app.seed_product("Acme", "SKU-1").await;
    let user = operator();

    let mut request = receive_request("TRK-FREE");
    request.client = Some("Acme".to_string());
    request.carrier = Some("DHL".to_string());
    let pkg = app
        .state
        .services
        .intake
        .receive(request, &user)
        .await
        .expect("receive");

    app.state
        .services
        .counting
        .add_item(
            pkg.id,
            ItemDraft {
                sku: "SKU-1".to_string(),
                lpn: None,
                qty: 2,
                remark: None,
                return_type: wms_api::entities::package_item::ReturnType::New,
            },
            &user,
        )
        .await
        .expect("add item");
    app.state
        .services
        .counting
        .finish(pkg.id, FinishRequest { location: None, receipt: None }, &user)
        .await
        .expect("finish");
    app.state
        .services
        .inspection
        .submit(pkg.id, "general", &user)
        .await
        .expect("submit");

    let count = finance_transaction::Entity::find()
        .filter(finance_transaction::Column::ClientId.eq("Acme"))
        .all(app.db())
        .await
        .expect("ledger")
        .len();
    assert_eq!(count, 0);
}
