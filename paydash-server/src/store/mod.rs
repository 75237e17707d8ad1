//! Storage abstractions for the dashboard

pub mod memory;
pub mod models;
pub mod sqlite;

pub use memory::{InMemoryMerchantStore, InMemorySessionStore};
pub use models::*;
pub use sqlite::SqliteStore;

use paydash_core::ComplianceStep;

use crate::error::ServerError;

/// Result type for store operations
pub type StoreResult<T> = Result<T, ServerError>;

/// Trait for merchant profile storage
pub trait MerchantStore: Send + Sync {
    /// Insert a merchant row unless one already exists for the user
    ///
    /// Conflict handling lives at the storage layer (unique key on
    /// `user_id`), so concurrent confirmations for the same user cannot
    /// double-insert. Returns whether a row was inserted.
    fn insert_if_absent(&self, merchant: &Merchant) -> StoreResult<bool>;

    /// Get a merchant by user ID
    fn get(&self, user_id: &str) -> StoreResult<Option<Merchant>>;

    /// Mark a compliance step complete (monotonic), returning the updated row
    fn complete_step(&self, user_id: &str, step: ComplianceStep) -> StoreResult<Merchant>;
}

/// Trait for session storage
pub trait SessionStore: Send + Sync {
    /// Create a new session for a user
    fn create(&self, user_id: &str) -> StoreResult<Session>;

    /// Get a session by ID
    fn get(&self, session_id: &SessionId) -> StoreResult<Option<Session>>;

    /// Delete a session
    fn delete(&self, session_id: &SessionId) -> StoreResult<()>;
}
