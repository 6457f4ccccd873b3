//! Outbound fulfillment: order creation, the pick/pack/ship progression,
//! value-added-service fees, and stock deduction at ship time.

mod common;

use assert_matches::assert_matches;
use common::{operator, TestApp};
use rust_decimal_macros::dec;

use wms_api::{
    entities::{
        finance_transaction::TransactionType,
        outbound_order::{OutboundStatus, ServiceType},
    },
    errors::ServiceError,
    services::outbound::{AdvanceRequest, CreateOutboundRequest, OutboundItemDraft},
};

fn order_request(order_no: &str, client: &str, qty: i32) -> CreateOutboundRequest {
    CreateOutboundRequest {
        order_no: order_no.to_string(),
        client: client.to_string(),
        carrier: None,
        service_type: ServiceType::Standard,
        remark: None,
        attachments: None,
        items: vec![OutboundItemDraft {
            sku: "SKU-OUT".to_string(),
            qty,
            new_fnsku: None,
        }],
    }
}

#[tokio::test]
async fn standard_order_walks_pick_pack_ship() {
    let app = TestApp::new().await;
    app.seed_client("Acme", None).await;
    app.seed_rule("Picking Fee", "outbound_picking", None, dec!(0.5), None)
        .await;
    app.seed_rule("Pallet Fee", "pallet_fee", None, dec!(3), None)
        .await;
    let user = operator();

    // Stock to ship against.
    app.state
        .services
        .inventory
        .accumulate("Acme", "SKU-OUT", "A-01", 10)
        .await
        .expect("stock");
    app.state
        .services
        .billing
        .top_up("Acme", dec!(100), "tester")
        .await
        .expect("top up");

    let created = app
        .state
        .services
        .outbound
        .create_order(order_request("OUT-1", "Acme", 4), &user)
        .await
        .expect("create");
    assert_eq!(created.order.status, OutboundStatus::Pending);

    // Pick: flat ten assumed units at 0.50 each.
    let picked = app
        .state
        .services
        .outbound
        .advance(created.order.id, AdvanceRequest::default(), &user)
        .await
        .expect("pick");
    assert_eq!(picked.status, OutboundStatus::Processing);

    // Pack with two pallets.
    let packed = app
        .state
        .services
        .outbound
        .advance(
            created.order.id,
            AdvanceRequest {
                material_type: None,
                material_qty: 0,
                pallet_qty: 2,
                label_count: 0,
            },
            &user,
        )
        .await
        .expect("pack");
    assert_eq!(packed.status, OutboundStatus::WaitShip);

    // Ship deducts stock and stamps the time.
    let shipped = app
        .state
        .services
        .outbound
        .advance(created.order.id, AdvanceRequest::default(), &user)
        .await
        .expect("ship");
    assert_eq!(shipped.status, OutboundStatus::Shipped);
    assert!(shipped.shipped_at.is_some());

    let record = app
        .state
        .services
        .inventory
        .get("Acme_SKU-OUT_A-01")
        .await
        .expect("inventory");
    assert_eq!(record.qty, 6);

    // Ledger: recharge +100, picking -5, pallets -6, newest first.
    let (txs, total) = app
        .state
        .services
        .billing
        .list_transactions(Some("Acme"), 1, 10)
        .await
        .expect("ledger");
    assert_eq!(total, 3);
    let picking = txs
        .iter()
        .find(|t| t.description == "Picking Fee: OUT-1")
        .expect("picking entry");
    assert_eq!(picking.amount, dec!(5.0));
    assert_eq!(picking.tx_type, TransactionType::Deduction);
    let vas = txs
        .iter()
        .find(|t| t.description == "VAS (Pallet x2): OUT-1")
        .expect("vas entry");
    assert_eq!(vas.amount, dec!(6));

    let account = app
        .state
        .services
        .billing
        .get_account("Acme")
        .await
        .expect("account");
    assert_eq!(account.balance, dec!(89.0));

    // A shipped order cannot advance further.
    let err = app
        .state
        .services
        .outbound
        .advance(created.order.id, AdvanceRequest::default(), &user)
        .await
        .expect_err("advance past shipped");
    assert_matches!(err, ServiceError::InvalidStatus(_));
}

#[tokio::test]
async fn relabel_orders_wait_for_label_data_and_charge_labeling() {
    let app = TestApp::new().await;
    app.seed_client("Acme", None).await;
    app.seed_rule("Labeling Fee", "labeling", None, dec!(0.25), None)
        .await;
    let user = operator();

    app.state
        .services
        .inventory
        .accumulate("Acme", "SKU-RL", "A-01", 5)
        .await
        .expect("stock");

    let mut request = order_request("OUT-RL", "Acme", 5);
    request.service_type = ServiceType::Relabel;
    request.items[0].sku = "SKU-RL".to_string();
    request.items[0].new_fnsku = Some("X00FNSKU1".to_string());

    let created = app
        .state
        .services
        .outbound
        .create_order(request, &user)
        .await
        .expect("create");
    assert_eq!(created.order.status, OutboundStatus::WaitLabelData);
    assert_eq!(created.items[0].new_fnsku.as_deref(), Some("X00FNSKU1"));

    app.state
        .services
        .outbound
        .advance(created.order.id, AdvanceRequest::default(), &user)
        .await
        .expect("pick");
    app.state
        .services
        .outbound
        .advance(
            created.order.id,
            AdvanceRequest {
                material_type: None,
                material_qty: 0,
                pallet_qty: 0,
                label_count: 5,
            },
            &user,
        )
        .await
        .expect("pack");

    let (txs, _) = app
        .state
        .services
        .billing
        .list_transactions(Some("Acme"), 1, 10)
        .await
        .expect("ledger");
    let vas = txs
        .iter()
        .find(|t| t.description == "VAS (Labeling x5): OUT-RL")
        .expect("labeling entry");
    assert_eq!(vas.amount, dec!(1.25));
}

#[tokio::test]
async fn relabel_order_requires_fnsku_on_every_line() {
    let app = TestApp::new().await;
    let user = operator();

    let mut request = order_request("OUT-BAD", "Acme", 1);
    request.service_type = ServiceType::Relabel;

    let err = app
        .state
        .services
        .outbound
        .create_order(request, &user)
        .await
        .expect_err("missing fnsku");
    assert_matches!(err, ServiceError::ValidationError(_));
}

#[tokio::test]
async fn duplicate_order_number_conflicts() {
    let app = TestApp::new().await;
    let user = operator();

    app.state
        .services
        .outbound
        .create_order(order_request("OUT-DUP", "Acme", 1), &user)
        .await
        .expect("first");
    let err = app
        .state
        .services
        .outbound
        .create_order(order_request("OUT-DUP", "Acme", 1), &user)
        .await
        .expect_err("duplicate");
    assert_matches!(err, ServiceError::Conflict(_));
}

#[tokio::test]
async fn ship_rejects_and_rolls_back_on_insufficient_stock() {
    let app = TestApp::new().await;
    app.seed_client("Acme", None).await;
    let user = operator();

    // First line covered, second not: the whole step must fail and leave
    // the first line's stock untouched.
    app.state
        .services
        .inventory
        .accumulate("Acme", "SKU-A", "A-01", 10)
        .await
        .expect("stock A");
    app.state
        .services
        .inventory
        .accumulate("Acme", "SKU-B", "A-01", 1)
        .await
        .expect("stock B");

    let request = CreateOutboundRequest {
        order_no: "OUT-SHORT".to_string(),
        client: "Acme".to_string(),
        carrier: None,
        service_type: ServiceType::Standard,
        remark: None,
        attachments: None,
        items: vec![
            OutboundItemDraft {
                sku: "SKU-A".to_string(),
                qty: 5,
                new_fnsku: None,
            },
            OutboundItemDraft {
                sku: "SKU-B".to_string(),
                qty: 3,
                new_fnsku: None,
            },
        ],
    };
    let created = app
        .state
        .services
        .outbound
        .create_order(request, &user)
        .await
        .expect("create");

    app.state
        .services
        .outbound
        .advance(created.order.id, AdvanceRequest::default(), &user)
        .await
        .expect("pick");
    app.state
        .services
        .outbound
        .advance(created.order.id, AdvanceRequest::default(), &user)
        .await
        .expect("pack");

    let err = app
        .state
        .services
        .outbound
        .advance(created.order.id, AdvanceRequest::default(), &user)
        .await
        .expect_err("ship without stock");
    assert_matches!(err, ServiceError::InsufficientStock(_));

    // Order still waits to ship; no partial deduction happened.
    let order = app
        .state
        .services
        .outbound
        .get_order(created.order.id)
        .await
        .expect("order");
    assert_eq!(order.order.status, OutboundStatus::WaitShip);
    assert!(order.order.shipped_at.is_none());

    let record = app
        .state
        .services
        .inventory
        .get("Acme_SKU-A_A-01")
        .await
        .expect("inventory");
    assert_eq!(record.qty, 10);
}

#[tokio::test]
async fn pick_and_pack_without_rules_post_nothing() {
    let app = TestApp::new().await;
    app.seed_client("Acme", None).await;
    let user = operator();

    app.state
        .services
        .inventory
        .accumulate("Acme", "SKU-OUT", "A-01", 2)
        .await
        .expect("stock");

    let created = app
        .state
        .services
        .outbound
        .create_order(order_request("OUT-NOFEE", "Acme", 2), &user)
        .await
        .expect("create");
    app.state
        .services
        .outbound
        .advance(created.order.id, AdvanceRequest::default(), &user)
        .await
        .expect("pick");
    app.state
        .services
        .outbound
        .advance(
            created.order.id,
            AdvanceRequest {
                material_type: Some("bubble wrap".to_string()),
                material_qty: 3,
                pallet_qty: 1,
                label_count: 0,
            },
            &user,
        )
        .await
        .expect("pack");

    let (_, total) = app
        .state
        .services
        .billing
        .list_transactions(Some("Acme"), 1, 10)
        .await
        .expect("ledger");
    assert_eq!(total, 0);
}
