//! Quality-check flow: the pending queue, fee estimation and posting, and
//! per-item result rollup.

mod common;

use assert_matches::assert_matches;
use common::{operator, TestApp};
use rust_decimal_macros::dec;

use wms_api::{
    entities::inspection::InspectionResult,
    entities::package::PackageStatus,
    errors::ServiceError,
    services::counting::{FinishRequest, ItemDraft},
    services::inspection::RecordResultRequest,
    services::intake::{CreatePreAdviceRequest, PreAdviceItem, ReceiveRequest},
};
use wms_api::entities::inbound_order::InboundType;
use wms_api::entities::package_item::ReturnType;

struct Prepared {
    package: wms_api::entities::package::Model,
    order_id: uuid::Uuid,
    item_id: uuid::Uuid,
}

/// Pre-advice + receive + count one line of 4 units, ready for inspection.
async fn prepare(app: &TestApp) -> Prepared {
    let user = operator();
    app.seed_client("Acme", None).await;
    app.seed_product("Acme", "SKU-1").await;

    let created = app
        .state
        .services
        .intake
        .create_pre_advice(
            CreatePreAdviceRequest {
                client_id: "Acme".to_string(),
                inbound_type: InboundType::Return,
                tracking_no: Some("TRK-QC".to_string()),
                carrier: Some("UPS".to_string()),
                expected_date: None,
                remark: None,
                items: vec![PreAdviceItem {
                    sku: "SKU-1".to_string(),
                    expected_qty: 4,
                }],
            },
            &user,
        )
        .await
        .expect("pre-advice");

    let request: ReceiveRequest =
        serde_json::from_value(serde_json::json!({ "tracking_no": "TRK-QC" }))
            .expect("receive request");
    let pkg = app
        .state
        .services
        .intake
        .receive(request, &user)
        .await
        .expect("receive");

    let item = app
        .state
        .services
        .counting
        .add_item(
            pkg.id,
            ItemDraft {
                sku: "SKU-1".to_string(),
                lpn: None,
                qty: 4,
                remark: None,
                return_type: ReturnType::Inspect,
            },
            &user,
        )
        .await
        .expect("add item");
    let pkg = app
        .state
        .services
        .counting
        .finish(pkg.id, FinishRequest { location: None, receipt: None }, &user)
        .await
        .expect("finish");

    Prepared {
        package: pkg,
        order_id: created.order.id,
        item_id: item.id,
    }
}

#[tokio::test]
async fn estimate_multiplies_rate_by_counted_quantity() {
    let app = TestApp::new().await;
    app.seed_rule("Inspection Fee", "inspection", Some("apparel"), dec!(1.5), None)
        .await;
    let prepared = prepare(&app).await;

    let fee = app
        .state
        .services
        .inspection
        .estimate_fee(prepared.package.id, "apparel")
        .await
        .expect("estimate");
    assert_eq!(fee, dec!(6.0));

    // Unpriced standard estimates to zero.
    let fee = app
        .state
        .services
        .inspection
        .estimate_fee(prepared.package.id, "electronics")
        .await
        .expect("estimate");
    assert_eq!(fee, dec!(0));
}

#[tokio::test]
async fn submit_moves_package_and_posts_the_fee_once() {
    let app = TestApp::new().await;
    app.seed_rule("Inspection Fee", "inspection", Some("apparel"), dec!(1.5), None)
        .await;
    let prepared = prepare(&app).await;

    let pkg = app
        .state
        .services
        .inspection
        .submit(prepared.package.id, "apparel", &operator())
        .await
        .expect("submit");
    assert_eq!(pkg.status, PackageStatus::Inspected);

    let (txs, total) = app
        .state
        .services
        .billing
        .list_transactions(Some("Acme"), 1, 10)
        .await
        .expect("ledger");
    assert_eq!(total, 1);
    assert_eq!(txs[0].description, "Inspection Fee (apparel): TRK-QC");
    assert_eq!(txs[0].amount, dec!(6.0));
}

#[tokio::test]
async fn submit_requires_a_standard() {
    let app = TestApp::new().await;
    let prepared = prepare(&app).await;

    let err = app
        .state
        .services
        .inspection
        .submit(prepared.package.id, "  ", &operator())
        .await
        .expect_err("blank standard");
    assert_matches!(err, ServiceError::ValidationError(_));
}

#[tokio::test]
async fn record_result_rolls_up_to_the_order_line() {
    let app = TestApp::new().await;
    let prepared = prepare(&app).await;
    let user = operator();

    let record = app
        .state
        .services
        .inspection
        .record_result(
            prepared.item_id,
            RecordResultRequest {
                result: InspectionResult::Pass,
                grade: Some("A".to_string()),
                faults: vec![],
                imei: None,
            },
            &user,
        )
        .await
        .expect("record pass");
    assert_eq!(record.status, InspectionResult::Pass);
    assert_eq!(record.inspector, "tester");

    let order = app
        .state
        .services
        .intake
        .get_order(prepared.order_id)
        .await
        .expect("order");
    assert_eq!(order.items[0].passed_qty, 4);
    assert_eq!(order.items[0].failed_qty, 0);
}

#[tokio::test]
async fn failed_result_records_faults() {
    let app = TestApp::new().await;
    let prepared = prepare(&app).await;

    let record = app
        .state
        .services
        .inspection
        .record_result(
            prepared.item_id,
            RecordResultRequest {
                result: InspectionResult::Fail,
                grade: None,
                faults: vec!["scratched".to_string(), "missing cable".to_string()],
                imei: Some("351234567890123".to_string()),
            },
            &operator(),
        )
        .await
        .expect("record fail");
    assert_eq!(record.status, InspectionResult::Fail);
    assert_eq!(
        record.faults,
        serde_json::json!(["scratched", "missing cable"])
    );

    let order = app
        .state
        .services
        .intake
        .get_order(prepared.order_id)
        .await
        .expect("order");
    assert_eq!(order.items[0].failed_qty, 4);
}

#[tokio::test]
async fn unknown_item_is_not_found() {
    let app = TestApp::new().await;
    let err = app
        .state
        .services
        .inspection
        .record_result(
            uuid::Uuid::new_v4(),
            RecordResultRequest {
                result: InspectionResult::Pass,
                grade: None,
                faults: vec![],
                imei: None,
            },
            &operator(),
        )
        .await
        .expect_err("missing item");
    assert_matches!(err, ServiceError::NotFound(_));
}
