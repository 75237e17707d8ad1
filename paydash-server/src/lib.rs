//! Paydash Server
//!
//! Backend for the merchant payments dashboard: account confirmation
//! against the external auth service, merchant onboarding state, and the
//! dashboard data endpoints.

pub mod config;
pub mod error;
pub mod fixtures;
pub mod gateway;
pub mod merchant;
pub mod rates;
pub mod routes;
pub mod state;
pub mod store;

pub use config::{Config, ConfigError};
pub use error::ServerError;
pub use fixtures::FixtureStore;
pub use gateway::HttpAuthGateway;
pub use rates::{HttpRateSource, RateSource};
pub use state::AppState;
pub use store::{
    InMemoryMerchantStore, InMemorySessionStore, MerchantStore, SessionStore, SqliteStore,
};
