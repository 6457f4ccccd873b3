//! HTTP surface: routing, the response envelope, operator attribution, and
//! error status mapping.

mod common;

use axum::{
    body::Body,
    http::{header, Method, Request, Response, StatusCode},
};
use common::TestApp;
use serde_json::{json, Value};
use tower::ServiceExt;

use wms_api::{app_router, auth::OPERATOR_HEADER};

async fn send(app: &TestApp, method: Method, uri: &str, body: Option<Value>) -> Response<Body> {
    let router = app_router(app.state.clone());
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(OPERATOR_HEADER, "alice");
    if body.is_some() {
        builder = builder.header(header::CONTENT_TYPE, "application/json");
    }
    let request = builder
        .body(match body {
            Some(value) => Body::from(value.to_string()),
            None => Body::empty(),
        })
        .expect("request");
    router.oneshot(request).await.expect("response")
}

async fn response_json(response: Response<Body>) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body");
    serde_json::from_slice(&bytes).expect("json body")
}

#[tokio::test]
async fn health_endpoints_respond() {
    let app = TestApp::new().await;

    let response = send(&app, Method::GET, "/health", None).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await;
    assert_eq!(body["status"], "up");

    let response = send(&app, Method::GET, "/health/ready", None).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await;
    assert_eq!(body["database"]["status"], "up");
}

#[tokio::test]
async fn receive_returns_the_envelope_and_attributes_the_operator() {
    let app = TestApp::new().await;
    app.seed_client("Acme", None).await;

    let response = send(
        &app,
        Method::POST,
        "/api/v1/intake/receive",
        Some(json!({
            "tracking_no": "TRK-HTTP-1",
            "client": "Acme",
            "carrier": "DHL"
        })),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = response_json(response).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["tracking_no"], "TRK-HTTP-1");
    // Operator comes from the header, never the payload.
    assert_eq!(body["data"]["operator"], "alice");
}

#[tokio::test]
async fn validation_failures_map_to_bad_request() {
    let app = TestApp::new().await;

    // Blind receipt without a client.
    let response = send(
        &app,
        Method::POST,
        "/api/v1/intake/receive",
        Some(json!({ "tracking_no": "TRK-HTTP-2" })),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = response_json(response).await;
    assert_eq!(body["error"], "Bad Request");
    assert!(body["message"].as_str().is_some());
}

#[tokio::test]
async fn missing_resources_map_to_not_found() {
    let app = TestApp::new().await;

    let response = send(&app, Method::GET, "/api/v1/inventory/nope", None).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let body = response_json(response).await;
    assert_eq!(body["error"], "Not Found");
}

#[tokio::test]
async fn quote_endpoint_reads_query_parameters() {
    let app = TestApp::new().await;
    app.seed_rule(
        "Inspection Fee",
        "inspection",
        None,
        rust_decimal_macros::dec!(2),
        None,
    )
    .await;

    let response = send(
        &app,
        Method::GET,
        "/api/v1/billing/quote?client=Acme&fee_type=inspection&qty=3",
        None,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = response_json(response).await;
    assert_eq!(body["data"]["amount"], "6");
}

#[tokio::test]
async fn list_endpoints_paginate() {
    let app = TestApp::new().await;
    for i in 0..5 {
        app.state
            .services
            .inventory
            .accumulate("Acme", &format!("SKU-{i}"), "A-01", 1)
            .await
            .expect("stock");
    }

    let response = send(
        &app,
        Method::GET,
        "/api/v1/inventory?client=Acme&page=2&limit=2",
        None,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = response_json(response).await;
    assert_eq!(body["data"]["total"], 5);
    assert_eq!(body["data"]["page"], 2);
    assert_eq!(body["data"]["limit"], 2);
    assert_eq!(body["data"]["total_pages"], 3);
    assert_eq!(body["data"]["items"].as_array().map(Vec::len), Some(2));
}

#[tokio::test]
async fn duplicate_tracking_number_maps_to_conflict() {
    let app = TestApp::new().await;
    app.seed_client("Acme", None).await;

    let payload = json!({
        "tracking_no": "TRK-HTTP-3",
        "client": "Acme",
        "carrier": "DHL"
    });
    let first = send(&app, Method::POST, "/api/v1/intake/receive", Some(payload.clone())).await;
    assert_eq!(first.status(), StatusCode::OK);

    let second = send(&app, Method::POST, "/api/v1/intake/receive", Some(payload)).await;
    assert_eq!(second.status(), StatusCode::CONFLICT);
}
