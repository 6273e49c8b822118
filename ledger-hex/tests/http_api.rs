//! End-to-end tests of the HTTP API over an in-memory SQLite store.
//!
//! This test requires the `sqlite` feature flag.

#![cfg(feature = "sqlite")]

use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    http::{Method, Request, StatusCode},
};
use http_body_util::BodyExt;
use ledger_hex::{LedgerServices, inbound::HttpServer};
use ledger_repo::SqliteRepo;
use ledger_types::FixedClock;
use serde_json::{Value, json};
use tower::ServiceExt;

const BASE: &str = "/api/credit-card-api/v1";

async fn app() -> Router {
    let repo = SqliteRepo::new("sqlite::memory:").await.unwrap();
    let services = LedgerServices::new(repo, Arc::new(FixedClock::at_millis(1_700_000_000_000)));
    HttpServer::with_rate_limit(services, 1_000).router()
}

async fn send(app: &Router, method: Method, path: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder()
        .method(method)
        .uri(format!("{BASE}{path}"))
        .header("Content-Type", "application/json");
    let request = match body {
        Some(body) => builder.body(Body::from(body.to_string())).unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}

async fn post_raw(app: &Router, path: &str, raw: &'static str) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(Method::POST)
        .uri(format!("{BASE}{path}"))
        .header("Content-Type", "application/json")
        .body(Body::from(raw))
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, serde_json::from_slice(&bytes).unwrap())
}

fn assert_error(body: &Value, code: &str, message: &str, status: u16) {
    assert_eq!(body["errorCode"], code);
    assert_eq!(body["errorMessage"], message);
    assert_eq!(body["additionalData"]["statusCode"], status);
}

async fn create_user(app: &Router, mobile: &str) -> String {
    let (status, body) = send(
        app,
        Method::POST,
        "/users",
        Some(json!({"name": "John Deo", "email": "abc@xyz.com", "mobileNumber": mobile})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    body["userId"].as_str().unwrap().to_string()
}

async fn create_account(app: &Router, user_id: &str) -> String {
    let (status, body) = send(
        app,
        Method::POST,
        "/accounts",
        Some(json!({"userId": user_id, "documentNumber": "0987654321"})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["documentNumber"], "0987654321");
    body["accountId"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn test_full_flow() {
    let app = app().await;

    let user_id = create_user(&app, "+918908011223").await;
    let account_id = create_account(&app, &user_id).await;

    let (status, body) = send(&app, Method::GET, &format!("/accounts/{account_id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({"accountId": account_id, "userId": user_id, "documentNumber": "0987654321"})
    );

    let (status, body) = send(
        &app,
        Method::POST,
        "/transactions",
        Some(json!({"accountId": account_id, "operationType": "CASH PURCHASE", "amount": -2345.67})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert!(!body["transactionId"].as_str().unwrap().is_empty());
}

#[tokio::test]
async fn test_duplicate_mobile_conflicts() {
    let app = app().await;
    create_user(&app, "+918908011223").await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/users",
        Some(json!({"mobileNumber": "+918908011223"})),
    )
    .await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_error(
        &body,
        "ERR_CC_USER_ALREADY_EXIST",
        "user already exist with requested mobile number",
        409,
    );
}

#[tokio::test]
async fn test_user_validation_errors() {
    let app = app().await;

    let (status, body) = send(&app, Method::POST, "/users", Some(json!({"mobileNumber": "12345"}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_error(&body, "ERR_CC_BAD_REQUEST", "invalid mobile number", 400);

    let (status, body) = send(&app, Method::POST, "/users", Some(json!({}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_error(&body, "ERR_CC_BAD_REQUEST", "invalid request body", 400);

    let (status, body) = send(
        &app,
        Method::POST,
        "/users",
        Some(json!({"email": "not-an-email", "mobileNumber": "+918908011223"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_error(&body, "ERR_CC_BAD_REQUEST", "invalid request body", 400);

    let (status, body) = post_raw(&app, "/users", "{not json").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_error(&body, "ERR_CC_BAD_REQUEST", "invalid request body", 400);
}

#[tokio::test]
async fn test_blank_email_treated_as_absent() {
    let app = app().await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/users",
        Some(json!({"email": "   ", "mobileNumber": "+918908011223"})),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert!(body["userId"].as_str().is_some());
}

#[tokio::test]
async fn test_account_for_unknown_user_rejected() {
    let app = app().await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/accounts",
        Some(json!({"userId": "ghost", "documentNumber": "0987654321"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_error(
        &body,
        "ERR_CC_BAD_REQUEST",
        "user does not exist with requested userId",
        400,
    );

    let (status, body) = send(
        &app,
        Method::POST,
        "/accounts",
        Some(json!({"userId": "", "documentNumber": "0987654321"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_error(&body, "ERR_CC_BAD_REQUEST", "invalid request body", 400);
}

#[tokio::test]
async fn test_get_account_errors() {
    let app = app().await;

    let (status, body) = send(&app, Method::GET, "/accounts/does-not-exist", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_error(&body, "ERR_CC_ACCOUNT_NOT_PRESENT", "account not present", 404);

    let (status, body) = send(&app, Method::GET, "/accounts/", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_error(
        &body,
        "ERR_CC_BAD_REQUEST",
        "accountId is missing in path params",
        400,
    );
}

#[tokio::test]
async fn test_transaction_rule_errors() {
    let app = app().await;
    let user_id = create_user(&app, "+918908011223").await;
    let account_id = create_account(&app, &user_id).await;

    let cases = [
        (json!({"accountId": account_id, "operationType": "withdrawal", "amount": 10.0}),
            "amount must be negative for purchases and withdrawals"),
        (json!({"accountId": account_id, "operationType": "payment", "amount": -10.0}),
            "amount must be positive for payments"),
        (json!({"accountId": account_id, "operationType": "refund", "amount": 10.0}),
            "invalid operation type"),
        (json!({"accountId": "missing", "operationType": "payment", "amount": 10.0}),
            "account does not exist with requested accountId"),
        (json!({"accountId": "", "operationType": "payment", "amount": 10.0}),
            "invalid request body"),
    ];

    for (body, message) in cases {
        let (status, response) = send(&app, Method::POST, "/transactions", Some(body)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{message}");
        assert_error(&response, "ERR_CC_BAD_REQUEST", message, 400);
    }
}

#[tokio::test]
async fn test_health_and_openapi() {
    let app = app().await;

    let response = app
        .clone()
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body, json!({"status": "healthy"}));

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api-docs/openapi.json")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}
