//! Integration tests for rate limiting middleware.
//!
//! These tests verify the HTTP-level behavior of rate limiting,
//! including 429 responses and proper integration with the middleware stack.
//!
//! This test requires the `sqlite` feature flag.

#![cfg(feature = "sqlite")]

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    body::Body,
    extract::ConnectInfo,
    http::{Request, StatusCode},
};
use http_body_util::BodyExt;
use ledger_hex::{LedgerServices, inbound::HttpServer};
use ledger_repo::SqliteRepo;
use ledger_types::SystemClock;
use tower::ServiceExt;

/// Helper to create a test server with a very low rate limit.
async fn create_test_server(requests_per_minute: u32) -> HttpServer<SqliteRepo> {
    let repo = SqliteRepo::new("sqlite::memory:").await.unwrap();
    let services = LedgerServices::new(repo, Arc::new(SystemClock));
    HttpServer::with_rate_limit(services, requests_per_minute)
}

fn health_request() -> Request<Body> {
    Request::builder()
        .uri("/health")
        .body(Body::empty())
        .unwrap()
}

/// An account lookup arriving from peer `client`.
fn api_request(client: &str) -> Request<Body> {
    api_request_forwarded(client, None)
}

fn api_request_forwarded(client: &str, forwarded: Option<&str>) -> Request<Body> {
    let peer = SocketAddr::new(client.parse().unwrap(), 52000);
    let mut builder = Request::builder()
        .uri("/api/credit-card-api/v1/accounts/unknown")
        .extension(ConnectInfo(peer));
    if let Some(value) = forwarded {
        builder = builder.header("X-Forwarded-For", value);
    }
    builder.body(Body::empty()).unwrap()
}

#[tokio::test]
async fn test_rate_limiting_returns_429_when_exceeded() {
    let server = create_test_server(3).await;
    let app = server.router();

    for i in 1..=3 {
        let response = app.clone().oneshot(api_request("198.51.100.1")).await.unwrap();
        assert_ne!(
            response.status(),
            StatusCode::TOO_MANY_REQUESTS,
            "Request {} should not be rate limited (quota not yet exceeded)",
            i
        );
    }

    let response = app.clone().oneshot(api_request("198.51.100.1")).await.unwrap();
    assert_eq!(
        response.status(),
        StatusCode::TOO_MANY_REQUESTS,
        "Request should be rate limited after exceeding quota"
    );
    assert_eq!(response.headers().get("retry-after").unwrap(), "60");

    let body = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();

    assert_eq!(json["errorCode"], "ERR_CC_TOO_MANY_REQUESTS");
    assert_eq!(json["additionalData"]["statusCode"], 429);
}

#[tokio::test]
async fn test_rate_limiting_health_endpoint_bypassed() {
    let server = create_test_server(1).await;
    let app = server.router();

    for _ in 0..10 {
        let response = app.clone().oneshot(health_request()).await.unwrap();

        assert_eq!(
            response.status(),
            StatusCode::OK,
            "Health endpoint should not be rate limited"
        );
    }
}

#[tokio::test]
async fn test_rate_limiting_per_client_isolation() {
    let server = create_test_server(1).await;
    let app = server.router();

    let response = app.clone().oneshot(api_request("198.51.100.1")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = app.clone().oneshot(api_request("198.51.100.1")).await.unwrap();
    assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);

    // A different client has its own quota
    let response = app.clone().oneshot(api_request("198.51.100.2")).await.unwrap();
    assert_eq!(
        response.status(),
        StatusCode::NOT_FOUND,
        "Second client should have its own quota"
    );
}

#[tokio::test]
async fn test_rate_limiting_response_format() {
    let server = create_test_server(1).await;
    let app = server.router();

    let _ = app.clone().oneshot(api_request("198.51.100.9")).await;
    let response = app.clone().oneshot(api_request("198.51.100.9")).await.unwrap();

    assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);

    let content_type = response.headers().get("content-type").unwrap();
    assert!(content_type.to_str().unwrap().contains("application/json"));

    let body = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();

    assert!(json.get("errorCode").is_some(), "Response should have 'errorCode' field");
    assert!(
        json.get("errorMessage").is_some(),
        "Response should have 'errorMessage' field"
    );
}

#[tokio::test]
async fn test_rate_limiting_ignores_spoofed_forwarded_for() {
    let server = create_test_server(1).await;
    let app = server.router();

    let response = app
        .clone()
        .oneshot(api_request_forwarded("198.51.100.1", Some("203.0.113.1")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    for i in 2..=20 {
        let forwarded = format!("203.0.113.{i}");
        let response = app
            .clone()
            .oneshot(api_request_forwarded("198.51.100.1", Some(&forwarded)))
            .await
            .unwrap();
        assert_eq!(
            response.status(),
            StatusCode::TOO_MANY_REQUESTS,
            "A new X-Forwarded-For value must not grant a fresh quota"
        );
    }
}
