//! In-memory storage implementations

use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::sync::RwLock;

use chrono::Utc;
use paydash_core::ComplianceStep;
use uuid::Uuid;

use super::{Merchant, MerchantStore, Session, SessionId, SessionStore, StoreResult};
use crate::error::ServerError;

/// In-memory merchant store
pub struct InMemoryMerchantStore {
    merchants: RwLock<HashMap<String, Merchant>>,
}

impl InMemoryMerchantStore {
    pub fn new() -> Self {
        Self {
            merchants: RwLock::new(HashMap::new()),
        }
    }
}

impl Default for InMemoryMerchantStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MerchantStore for InMemoryMerchantStore {
    fn insert_if_absent(&self, merchant: &Merchant) -> StoreResult<bool> {
        // Single write lock makes check-and-insert atomic
        let mut merchants = self.merchants.write().unwrap();
        match merchants.entry(merchant.user_id.clone()) {
            Entry::Occupied(_) => Ok(false),
            Entry::Vacant(slot) => {
                slot.insert(merchant.clone());
                Ok(true)
            }
        }
    }

    fn get(&self, user_id: &str) -> StoreResult<Option<Merchant>> {
        Ok(self.merchants.read().unwrap().get(user_id).cloned())
    }

    fn complete_step(&self, user_id: &str, step: ComplianceStep) -> StoreResult<Merchant> {
        let mut merchants = self.merchants.write().unwrap();
        let merchant = merchants
            .get_mut(user_id)
            .ok_or(ServerError::MerchantNotFound)?;
        merchant.complete_step(step);
        Ok(merchant.clone())
    }
}

/// In-memory session store
pub struct InMemorySessionStore {
    sessions: RwLock<HashMap<SessionId, Session>>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
        }
    }
}

impl Default for InMemorySessionStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionStore for InMemorySessionStore {
    fn create(&self, user_id: &str) -> StoreResult<Session> {
        let session = Session {
            id: SessionId(Uuid::new_v4().to_string()),
            user_id: user_id.to_string(),
            csrf_token: Uuid::new_v4().to_string(),
            created_at: Utc::now(),
        };
        self.sessions
            .write()
            .unwrap()
            .insert(session.id.clone(), session.clone());
        Ok(session)
    }

    fn get(&self, session_id: &SessionId) -> StoreResult<Option<Session>> {
        Ok(self.sessions.read().unwrap().get(session_id).cloned())
    }

    fn delete(&self, session_id: &SessionId) -> StoreResult<()> {
        self.sessions.write().unwrap().remove(session_id);
        Ok(())
    }
}
