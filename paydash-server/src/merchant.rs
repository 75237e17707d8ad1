//! Merchant record ensurance
//!
//! Every successful confirmation guarantees a merchant row exists for the
//! account. Creation is best-effort: a storage failure is logged and the
//! confirmation still succeeds from the caller's perspective.

use paydash_core::AuthSession;

use crate::store::{Merchant, MerchantStore};

/// Create the merchant row for a confirmed account if it does not exist
///
/// Safe to call on every confirmation; the store's insert-or-ignore
/// semantics make repeat calls no-ops.
pub fn ensure_merchant<M: MerchantStore + ?Sized>(store: &M, session: &AuthSession) {
    let merchant = Merchant::new(&session.user_id, session.email.as_deref(), &session.metadata);

    match store.insert_if_absent(&merchant) {
        Ok(true) => {
            tracing::info!(user_id = %session.user_id, "Created merchant record");
        }
        Ok(false) => {
            // Already onboarded; nothing to do
        }
        Err(e) => {
            tracing::warn!(user_id = %session.user_id, error = %e, "Failed to create merchant record");
        }
    }
}
