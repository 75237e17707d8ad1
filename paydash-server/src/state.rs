//! Application state

use std::sync::Arc;

use crate::config::Config;
use crate::fixtures::FixtureStore;

/// Shared application state
///
/// Generic over the store, gateway, and rate-source implementations so
/// tests can swap in mocks.
pub struct AppState<M, S, G, R> {
    pub config: Config,
    pub merchant_store: Arc<M>,
    pub session_store: Arc<S>,
    pub auth: Arc<G>,
    pub rates: Arc<R>,
    pub fixtures: FixtureStore,
}

impl<M, S, G, R> AppState<M, S, G, R> {
    pub fn new(config: Config, merchant_store: M, session_store: S, auth: G, rates: R) -> Self {
        let fixtures = FixtureStore::new(&config.fixtures_dir);
        Self {
            config,
            merchant_store: Arc::new(merchant_store),
            session_store: Arc::new(session_store),
            auth: Arc::new(auth),
            rates: Arc::new(rates),
            fixtures,
        }
    }
}
