//! HTTP routes for the dashboard

mod compliance;
mod confirm;
mod dashboard;
mod rates;
mod session;

use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;
use tower_cookies::CookieManagerLayer;
use tower_http::trace::TraceLayer;

use paydash_core::AuthGateway;

use crate::rates::RateSource;
use crate::state::AppState;
use crate::store::{MerchantStore, SessionStore};

pub use session::SESSION_COOKIE;

/// Create the router with all routes
pub fn create_router<M, S, G, R>(state: Arc<AppState<M, S, G, R>>) -> Router
where
    M: MerchantStore + 'static,
    S: SessionStore + 'static,
    G: AuthGateway + 'static,
    R: RateSource + 'static,
{
    Router::new()
        .route("/auth/confirm", get(confirm::confirm_account))
        .route("/auth/logout", post(session::logout))
        .route("/api/session", get(session::get_session_context))
        .route("/api/dashboard/stats", get(dashboard::get_stats))
        .route("/api/transactions", get(dashboard::get_transactions))
        .route("/api/payment-volume", get(dashboard::get_payment_volume))
        .route("/api/customers", get(dashboard::get_customers))
        .route("/api/exchange-rates", get(rates::get_exchange_rates))
        .route("/api/compliance/progress", get(compliance::get_progress))
        .route("/api/compliance/{step}/complete", post(compliance::complete_step))
        .route("/compliance/{step}", get(compliance::step_page))
        .layer(CookieManagerLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
