//! Exchange-rate endpoint

use std::sync::Arc;

use axum::extract::State;
use axum::Json;

use paydash_core::{AuthGateway, RateTable};

use crate::rates::{current_rates, RateSource};
use crate::state::AppState;
use crate::store::{MerchantStore, SessionStore};

/// GET /api/exchange-rates
///
/// Always 200: upstream failures are served as a stale fallback table.
pub async fn get_exchange_rates<M, S, G, R>(
    State(state): State<Arc<AppState<M, S, G, R>>>,
) -> Json<RateTable>
where
    M: MerchantStore,
    S: SessionStore,
    G: AuthGateway,
    R: RateSource + 'static,
{
    Json(current_rates(state.rates.clone()).await)
}
