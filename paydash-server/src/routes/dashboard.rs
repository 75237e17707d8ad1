//! Dashboard data endpoints
//!
//! Stats are derived from the transactions fixture on every request; the
//! other feeds return their fixture contents verbatim. Clients only ever
//! see a generic error message; detail goes to the log.

use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use serde_json::Value;

use paydash_core::{compute_stats, AuthGateway, DashboardStats};

use crate::error::ServerError;
use crate::rates::RateSource;
use crate::state::AppState;
use crate::store::{MerchantStore, SessionStore};

/// GET /api/dashboard/stats
pub async fn get_stats<M, S, G, R>(
    State(state): State<Arc<AppState<M, S, G, R>>>,
) -> Result<Json<DashboardStats>, ServerError>
where
    M: MerchantStore,
    S: SessionStore,
    G: AuthGateway,
    R: RateSource,
{
    let transactions = state.fixtures.transactions().map_err(|e| {
        tracing::error!(error = %e, "Failed to load transactions fixture");
        ServerError::DataUnavailable("Failed to calculate stats")
    })?;

    Ok(Json(compute_stats(&transactions)))
}

/// GET /api/transactions
pub async fn get_transactions<M, S, G, R>(
    State(state): State<Arc<AppState<M, S, G, R>>>,
) -> Result<Json<Value>, ServerError>
where
    M: MerchantStore,
    S: SessionStore,
    G: AuthGateway,
    R: RateSource,
{
    load_fixture(&state, "transactions.json", "Failed to load transactions")
}

/// GET /api/payment-volume
pub async fn get_payment_volume<M, S, G, R>(
    State(state): State<Arc<AppState<M, S, G, R>>>,
) -> Result<Json<Value>, ServerError>
where
    M: MerchantStore,
    S: SessionStore,
    G: AuthGateway,
    R: RateSource,
{
    load_fixture(&state, "payment_volume.json", "Failed to load payment volume")
}

/// GET /api/customers
pub async fn get_customers<M, S, G, R>(
    State(state): State<Arc<AppState<M, S, G, R>>>,
) -> Result<Json<Value>, ServerError>
where
    M: MerchantStore,
    S: SessionStore,
    G: AuthGateway,
    R: RateSource,
{
    load_fixture(&state, "customers.json", "Failed to load customers")
}

fn load_fixture<M, S, G, R>(
    state: &AppState<M, S, G, R>,
    name: &str,
    message: &'static str,
) -> Result<Json<Value>, ServerError> {
    state.fixtures.load_raw(name).map(Json).map_err(|e| {
        tracing::error!(error = %e, fixture = name, "Failed to load fixture");
        ServerError::DataUnavailable(message)
    })
}
