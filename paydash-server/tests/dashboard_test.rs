//! Tests for the dashboard data endpoints

mod common;

use common::{create_test_server, create_test_server_with, MockRateSource};
use serde_json::Value;

/// Test: stats are derived from the transactions fixture
#[tokio::test]
async fn test_dashboard_stats() {
    let ctx = create_test_server();

    let response = ctx.server.get("/api/dashboard/stats").await;

    assert_eq!(response.status_code(), 200);
    let body: Value = response.json();
    assert_eq!(body["totalRevenue"], 3145.75);
    assert_eq!(body["pendingAmount"], 480.0);
    assert_eq!(body["totalTransactions"], 10);
    assert_eq!(body["successRate"], 60.0);
}

/// Test: the transactions feed is the fixture, verbatim
#[tokio::test]
async fn test_transactions_feed() {
    let ctx = create_test_server();

    let response = ctx.server.get("/api/transactions").await;

    assert_eq!(response.status_code(), 200);
    let body: Value = response.json();
    let rows = body.as_array().expect("Not an array");
    assert_eq!(rows.len(), 10);
    assert_eq!(rows[0]["id"], "TXN-1001");
    assert_eq!(rows[0]["paymentMethod"], "card");
}

/// Test: payment volume and customers feeds serve their fixtures
#[tokio::test]
async fn test_other_feeds() {
    let ctx = create_test_server();

    let response = ctx.server.get("/api/payment-volume").await;
    assert_eq!(response.status_code(), 200);
    let body: Value = response.json();
    assert_eq!(body.as_array().unwrap().len(), 6);
    assert_eq!(body[0]["month"], "Jan");

    let response = ctx.server.get("/api/customers").await;
    assert_eq!(response.status_code(), 200);
    let body: Value = response.json();
    assert_eq!(body[0]["id"], "CUS-2001");
}

/// Test: a broken fixtures directory yields generic 500s, per endpoint
#[tokio::test]
async fn test_missing_fixtures_are_generic_errors() {
    let ctx = create_test_server_with(
        MockRateSource::failing("unreachable"),
        "/nonexistent".to_string(),
    );

    let response = ctx.server.get("/api/dashboard/stats").await;
    assert_eq!(response.status_code(), 500);
    let body: Value = response.json();
    assert_eq!(body["error"], "Failed to calculate stats");

    let response = ctx.server.get("/api/transactions").await;
    assert_eq!(response.status_code(), 500);
    let body: Value = response.json();
    assert_eq!(body["error"], "Failed to load transactions");

    let response = ctx.server.get("/api/customers").await;
    assert_eq!(response.status_code(), 500);
    let body: Value = response.json();
    assert_eq!(body["error"], "Failed to load customers");
}
