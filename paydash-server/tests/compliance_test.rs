//! Tests for compliance progress and the step access guard

mod common;

use common::{confirm_and_get_cookie, create_test_server, session_header, TestContext};
use paydash_server::MerchantStore;
use serde_json::Value;

async fn get_progress(ctx: &TestContext, cookie: &str) -> Value {
    let response = ctx
        .server
        .get("/api/compliance/progress")
        .add_header("cookie", session_header(cookie))
        .await;
    assert_eq!(response.status_code(), 200);
    response.json()
}

async fn complete(ctx: &TestContext, cookie: &str, step: &str) -> Value {
    let response = ctx
        .server
        .post(&format!("/api/compliance/{}/complete", step))
        .add_header("cookie", session_header(cookie))
        .await;
    assert_eq!(response.status_code(), 200);
    response.json()
}

/// Test: a fresh merchant has no progress and profile up next
#[tokio::test]
async fn test_fresh_merchant_progress() {
    let ctx = create_test_server();
    let cookie = confirm_and_get_cookie(&ctx).await;

    let body = get_progress(&ctx, &cookie).await;

    assert_eq!(body["completedSteps"], 0);
    assert_eq!(body["totalSteps"], 5);
    assert_eq!(body["complete"], false);
    assert_eq!(body["nextStep"], "profile");
    assert_eq!(body["steps"]["profile"], false);
}

/// Test: completing steps advances the next-step pointer in sequence order
#[tokio::test]
async fn test_step_completion_advances() {
    let ctx = create_test_server();
    let cookie = confirm_and_get_cookie(&ctx).await;

    let body = complete(&ctx, &cookie, "profile").await;
    assert_eq!(body["completedSteps"], 1);
    assert_eq!(body["nextStep"], "contact");
    assert_eq!(body["steps"]["profile"], true);

    // Completing out of order does not change what is "next"
    let body = complete(&ctx, &cookie, "owner").await;
    assert_eq!(body["completedSteps"], 2);
    assert_eq!(body["nextStep"], "contact");
}

/// Test: completing all five steps marks the merchant complete
#[tokio::test]
async fn test_full_completion() {
    let ctx = create_test_server();
    let cookie = confirm_and_get_cookie(&ctx).await;

    for step in ["profile", "contact", "owner", "account", "service-agreement"] {
        complete(&ctx, &cookie, step).await;
    }

    let body = get_progress(&ctx, &cookie).await;
    assert_eq!(body["completedSteps"], 5);
    assert_eq!(body["complete"], true);
    assert!(body.get("nextStep").is_none());

    let merchant = ctx.merchants.get("merchant-1").unwrap().unwrap();
    assert!(merchant.completed_at.is_some());
}

/// Test: the guard redirects forward skips to the next incomplete step
#[tokio::test]
async fn test_guard_blocks_forward_skip() {
    let ctx = create_test_server();
    let cookie = confirm_and_get_cookie(&ctx).await;
    complete(&ctx, &cookie, "profile").await;

    let response = ctx
        .server
        .get("/compliance/owner")
        .add_header("cookie", session_header(&cookie))
        .await;

    assert_eq!(response.status_code(), 307);
    assert_eq!(
        response.headers().get("location").unwrap().to_str().unwrap(),
        "/compliance/contact"
    );
}

/// Test: the guard allows the current step and revisits of completed ones
#[tokio::test]
async fn test_guard_allows_current_and_completed() {
    let ctx = create_test_server();
    let cookie = confirm_and_get_cookie(&ctx).await;
    complete(&ctx, &cookie, "profile").await;

    let response = ctx
        .server
        .get("/compliance/contact")
        .add_header("cookie", session_header(&cookie))
        .await;
    assert_eq!(response.status_code(), 200);

    let response = ctx
        .server
        .get("/compliance/profile")
        .add_header("cookie", session_header(&cookie))
        .await;
    assert_eq!(response.status_code(), 200);
    let body: Value = response.json();
    assert_eq!(body["completed"], true);
}

/// Test: unknown step names are 404s
#[tokio::test]
async fn test_unknown_step() {
    let ctx = create_test_server();
    let cookie = confirm_and_get_cookie(&ctx).await;

    let response = ctx
        .server
        .post("/api/compliance/billing/complete")
        .add_header("cookie", session_header(&cookie))
        .await;
    assert_eq!(response.status_code(), 404);

    let response = ctx
        .server
        .get("/compliance/billing")
        .add_header("cookie", session_header(&cookie))
        .await;
    assert_eq!(response.status_code(), 404);
}

/// Test: compliance endpoints require a session
#[tokio::test]
async fn test_requires_authentication() {
    let ctx = create_test_server();

    let response = ctx.server.get("/api/compliance/progress").await;
    assert_eq!(response.status_code(), 401);

    let response = ctx.server.post("/api/compliance/profile/complete").await;
    assert_eq!(response.status_code(), 401);
}
