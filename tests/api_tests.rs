/// HTTP tests for the receipt endpoints
/// Drives the router directly without binding a socket
use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use receipt_points_api::config::Config;
use receipt_points_api::handlers::AppState;
use receipt_points_api::routes::create_router;
use serde_json::Value;
use std::sync::Arc;
use tower::ServiceExt;

const TARGET_RECEIPT: &str = r#"{
    "retailer": "Target",
    "purchaseDate": "2022-01-01",
    "purchaseTime": "13:01",
    "items": [
        {"shortDescription": "Mountain Dew 12PK", "price": "6.49"},
        {"shortDescription": "Emils Cheese Pizza", "price": "12.25"},
        {"shortDescription": "Knorr Creamy Chicken", "price": "1.26"},
        {"shortDescription": "Doritos Nacho Cheese", "price": "3.35"},
        {"shortDescription": "   Klarbrunn 12-PK 12 FL OZ  ", "price": "12.00"}
    ],
    "total": "35.35"
}"#;

const CORNER_MARKET_RECEIPT: &str = r#"{
    "retailer": "M&M Corner Market",
    "purchaseDate": "2022-03-20",
    "purchaseTime": "14:33",
    "items": [
        {"shortDescription": "Gatorade", "price": "2.25"},
        {"shortDescription": "Gatorade", "price": "2.25"},
        {"shortDescription": "Gatorade", "price": "2.25"},
        {"shortDescription": "Gatorade", "price": "2.25"}
    ],
    "total": "9.00"
}"#;

fn app_with(config: Config) -> Router {
    create_router(Arc::new(AppState::new(config)))
}

fn app() -> Router {
    app_with(Config::default())
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

fn process_request(body: &str) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri("/receipts/process")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn points_request(id: &str) -> Request<Body> {
    Request::builder()
        .uri(format!("/receipts/{}/points", id))
        .body(Body::empty())
        .unwrap()
}

async fn process(app: &Router, body: &str) -> String {
    let (status, json) = send(app, process_request(body)).await;
    assert_eq!(status, StatusCode::OK);
    json["id"].as_str().expect("id in response").to_string()
}

#[tokio::test]
async fn test_process_then_points_for_target_receipt() {
    let app = app();
    let id = process(&app, TARGET_RECEIPT).await;

    let (status, json) = send(&app, points_request(&id)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["points"], 28);
}

#[tokio::test]
async fn test_process_then_points_for_corner_market_receipt() {
    let app = app();
    let id = process(&app, CORNER_MARKET_RECEIPT).await;

    let (status, json) = send(&app, points_request(&id)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["points"], 109);
}

#[tokio::test]
async fn test_each_submission_gets_a_new_id() {
    let app = app();
    let first = process(&app, TARGET_RECEIPT).await;
    let second = process(&app, TARGET_RECEIPT).await;

    assert_ne!(first, second);
    assert!(uuid::Uuid::parse_str(&first).is_ok());
}

#[tokio::test]
async fn test_points_are_stable_across_queries() {
    let app = app();
    let id = process(&app, CORNER_MARKET_RECEIPT).await;

    let (_, first) = send(&app, points_request(&id)).await;
    let (_, second) = send(&app, points_request(&id)).await;
    assert_eq!(first, second);
}

#[tokio::test]
async fn test_unknown_id_returns_404() {
    let app = app();
    process(&app, TARGET_RECEIPT).await;

    let (status, json) = send(&app, points_request("adb6b560-0eef-42bc-9d16-df48f30e89b2")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(json["error"].is_string());
}

#[tokio::test]
async fn test_malformed_json_returns_400() {
    let app = app();

    for body in ["", "{", "{\"retailer\": }", "\"just a string\"", r#"{"total": 12.5}"#] {
        let (status, json) = send(&app, process_request(body)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "body: {:?}", body);
        assert_eq!(json["error"], "Invalid JSON payload");
    }
}

#[tokio::test]
async fn test_content_type_is_not_required() {
    let app = app();
    let request = Request::builder()
        .method(Method::POST)
        .uri("/receipts/process")
        .body(Body::from(TARGET_RECEIPT))
        .unwrap();

    let (status, json) = send(&app, request).await;
    assert_eq!(status, StatusCode::OK);
    assert!(json["id"].is_string());
}

#[tokio::test]
async fn test_missing_fields_still_score() {
    let app = app();
    let id = process(&app, r#"{"retailer": "Walgreens"}"#).await;

    // 9 alphanumeric characters plus 25 for the unparsable (empty) total
    let (status, json) = send(&app, points_request(&id)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["points"], 34);
}

#[tokio::test]
async fn test_null_fields_are_treated_as_empty() {
    let app = app();
    let id = process(
        &app,
        r#"{"retailer": "Target", "purchaseTime": null, "items": [null, null]}"#,
    )
    .await;

    // 6 alphanumeric characters, 25 for the empty total, 5 for one item pair
    let (status, json) = send(&app, points_request(&id)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["points"], 36);

    let (status, json) = send(&app, process_request("null")).await;
    assert_eq!(status, StatusCode::OK);
    assert!(json["id"].is_string());
}

#[tokio::test]
async fn test_strict_quarter_rule_from_config() {
    let app = app_with(Config {
        strict_quarter_rule: true,
        ..Config::default()
    });
    let id = process(&app, r#"{"retailer": "Walgreens"}"#).await;

    let (_, json) = send(&app, points_request(&id)).await;
    assert_eq!(json["points"], 9);
}

#[tokio::test]
async fn test_oversized_body_is_rejected() {
    let app = app_with(Config {
        max_body_bytes: 64,
        ..Config::default()
    });
    let request = Request::builder()
        .method(Method::POST)
        .uri("/receipts/process")
        .header(header::CONTENT_TYPE, "application/json")
        .header(header::CONTENT_LENGTH, TARGET_RECEIPT.len())
        .body(Body::from(TARGET_RECEIPT))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
}

#[tokio::test]
async fn test_wrong_method_is_rejected() {
    let app = app();
    let request = Request::builder()
        .method(Method::GET)
        .uri("/receipts/process")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
}
