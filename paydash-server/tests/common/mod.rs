//! Common test utilities for dashboard integration tests

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, RwLock};

use axum_test::TestServer;
use paydash_core::{AuthGateway, AuthSession, OtpType, SignupMetadata};
use paydash_server::{
    routes, AppState, Config, InMemoryMerchantStore, InMemorySessionStore, RateSource,
};

/// Gateway that records calls and fails for configured call keys
#[derive(Default, Clone)]
pub struct MockAuthGateway {
    fail: Arc<RwLock<Vec<String>>>,
    calls: Arc<RwLock<Vec<String>>>,
}

impl MockAuthGateway {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make a call key (e.g. `"verify_hash:signup"`) fail
    pub fn fail_on(&self, key: &str) {
        self.fail.write().unwrap().push(key.to_string());
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.read().unwrap().clone()
    }

    fn respond(&self, key: String) -> Result<AuthSession, String> {
        self.calls.write().unwrap().push(key.clone());
        if self.fail.read().unwrap().contains(&key) {
            Err(format!("{} denied", key))
        } else {
            Ok(AuthSession {
                user_id: "merchant-1".to_string(),
                email: Some("owner@acme.test".to_string()),
                access_token: Some("at".to_string()),
                refresh_token: Some("rt".to_string()),
                metadata: SignupMetadata {
                    business_name: Some("Acme Stores".to_string()),
                    phone_number: Some("+2348012345678".to_string()),
                    country: Some("NG".to_string()),
                },
            })
        }
    }
}

impl AuthGateway for MockAuthGateway {
    fn set_session(&self, _: &str, _: &str) -> Result<AuthSession, String> {
        self.respond("set_session".to_string())
    }

    fn verify_token_hash(&self, _: &str, ty: OtpType) -> Result<AuthSession, String> {
        self.respond(format!("verify_hash:{}", ty.as_str()))
    }

    fn verify_email_otp(&self, _: &str, _: &str, ty: OtpType) -> Result<AuthSession, String> {
        self.respond(format!("verify_email:{}", ty.as_str()))
    }

    fn exchange_code(&self, _: &str) -> Result<AuthSession, String> {
        self.respond("exchange_code".to_string())
    }
}

/// Rate source returning a scripted result
#[derive(Clone)]
pub struct MockRateSource {
    result: Arc<Mutex<Result<(Option<String>, BTreeMap<String, f64>), String>>>,
}

impl MockRateSource {
    pub fn ok(rates: &[(&str, f64)]) -> Self {
        let map = rates
            .iter()
            .map(|(code, rate)| (code.to_string(), *rate))
            .collect();
        Self {
            result: Arc::new(Mutex::new(Ok((Some("2025-06-14".to_string()), map)))),
        }
    }

    pub fn failing(reason: &str) -> Self {
        Self {
            result: Arc::new(Mutex::new(Err(reason.to_string()))),
        }
    }
}

impl RateSource for MockRateSource {
    fn fetch(&self) -> Result<(Option<String>, BTreeMap<String, f64>), String> {
        self.result.lock().unwrap().clone()
    }
}

pub struct TestContext {
    pub server: TestServer,
    pub gateway: MockAuthGateway,
    pub merchants: Arc<InMemoryMerchantStore>,
    pub sessions: Arc<InMemorySessionStore>,
}

/// Create a test server with mock gateway and a failing rate source
pub fn create_test_server() -> TestContext {
    create_test_server_with(MockRateSource::failing("unreachable"), test_fixtures_dir())
}

pub fn create_test_server_with(rates: MockRateSource, fixtures_dir: String) -> TestContext {
    let config = Config {
        fixtures_dir,
        ..Default::default()
    };
    let gateway = MockAuthGateway::new();

    let state = Arc::new(AppState::new(
        config,
        InMemoryMerchantStore::new(),
        InMemorySessionStore::new(),
        gateway.clone(),
        rates,
    ));
    let merchants = state.merchant_store.clone();
    let sessions = state.session_store.clone();

    let server =
        TestServer::new(routes::create_router(state)).expect("Failed to create test server");

    TestContext {
        server,
        gateway,
        merchants,
        sessions,
    }
}

pub fn test_fixtures_dir() -> String {
    format!("{}/fixtures", env!("CARGO_MANIFEST_DIR"))
}

/// Confirm an account via the token-pair strategy and return the session
/// cookie value
pub async fn confirm_and_get_cookie(ctx: &TestContext) -> String {
    let response = ctx
        .server
        .get("/auth/confirm")
        .add_query_param("access_token", "at")
        .add_query_param("refresh_token", "rt")
        .await;
    assert_eq!(response.status_code(), 303);

    response
        .maybe_cookie("paydash_session")
        .expect("No session cookie")
        .value()
        .to_string()
}

/// Cookie header value for an authenticated request
pub fn session_header(cookie: &str) -> String {
    format!("paydash_session={}", cookie)
}
