//! SQLite-based merchant storage

use std::sync::Mutex;

use chrono::{DateTime, Utc};
use paydash_core::ComplianceStep;
use rusqlite::{params, Connection, OptionalExtension, Row};

use super::{Merchant, MerchantStore, StoreResult};
use crate::error::ServerError;

/// Current schema version
const SCHEMA_VERSION: i32 = 1;

/// SQLite-backed merchant store
///
/// `user_id` is the primary key, so insert-or-ignore semantics close the
/// duplicate-row race between concurrent confirmations.
pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    /// Open or create a SQLite database at the given path
    pub fn open(path: &str) -> Result<Self, ServerError> {
        let conn = Connection::open(path).map_err(|e| ServerError::Internal(e.to_string()))?;

        conn.execute_batch("PRAGMA foreign_keys = ON;")
            .map_err(|e| ServerError::Internal(e.to_string()))?;

        Self::migrate(&conn)?;

        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Run database migrations
    fn migrate(conn: &Connection) -> Result<(), ServerError> {
        let current_version = Self::get_schema_version(conn)?;

        if current_version < SCHEMA_VERSION {
            tracing::info!(
                current = current_version,
                target = SCHEMA_VERSION,
                "Running database migrations"
            );

            if current_version < 1 {
                Self::migrate_v1(conn)?;
            }

            conn.execute(
                "INSERT OR REPLACE INTO schema_version (version) VALUES (?1)",
                params![SCHEMA_VERSION],
            )
            .map_err(|e| ServerError::Internal(e.to_string()))?;

            tracing::info!("Database migrations complete");
        }

        Ok(())
    }

    /// Get current schema version (0 if no schema exists)
    fn get_schema_version(conn: &Connection) -> Result<i32, ServerError> {
        let table_exists: bool = conn
            .query_row(
                "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type='table' AND name='schema_version')",
                [],
                |row| row.get(0),
            )
            .map_err(|e| ServerError::Internal(e.to_string()))?;

        if !table_exists {
            return Ok(0);
        }

        conn.query_row("SELECT MAX(version) FROM schema_version", [], |row| {
            row.get::<_, Option<i32>>(0).map(|v| v.unwrap_or(0))
        })
        .map_err(|e| ServerError::Internal(e.to_string()))
    }

    /// Migration to version 1: initial schema
    fn migrate_v1(conn: &Connection) -> Result<(), ServerError> {
        conn.execute_batch(
            r#"
            -- Schema version tracking
            CREATE TABLE IF NOT EXISTS schema_version (
                version INTEGER PRIMARY KEY
            );

            -- Merchants, one row per confirmed user
            CREATE TABLE IF NOT EXISTS merchants (
                user_id TEXT PRIMARY KEY,
                business_name TEXT,
                email TEXT,
                phone_number TEXT,
                country TEXT,
                profile_completed INTEGER NOT NULL DEFAULT 0,
                contact_completed INTEGER NOT NULL DEFAULT 0,
                owner_completed INTEGER NOT NULL DEFAULT 0,
                account_completed INTEGER NOT NULL DEFAULT 0,
                service_agreement_completed INTEGER NOT NULL DEFAULT 0,
                completed_at TEXT,
                created_at TEXT NOT NULL
            );
            "#,
        )
        .map_err(|e| ServerError::Internal(e.to_string()))?;

        Ok(())
    }

    fn row_to_merchant(row: &Row<'_>) -> rusqlite::Result<Merchant> {
        let completed_at: Option<String> = row.get(10)?;
        let created_at: String = row.get(11)?;

        Ok(Merchant {
            user_id: row.get(0)?,
            business_name: row.get(1)?,
            email: row.get(2)?,
            phone_number: row.get(3)?,
            country: row.get(4)?,
            profile_completed: row.get::<_, i32>(5)? != 0,
            contact_completed: row.get::<_, i32>(6)? != 0,
            owner_completed: row.get::<_, i32>(7)? != 0,
            account_completed: row.get::<_, i32>(8)? != 0,
            service_agreement_completed: row.get::<_, i32>(9)? != 0,
            completed_at: completed_at.and_then(|s| {
                DateTime::parse_from_rfc3339(&s)
                    .map(|dt| dt.with_timezone(&Utc))
                    .ok()
            }),
            created_at: DateTime::parse_from_rfc3339(&created_at)
                .map(|dt| dt.with_timezone(&Utc))
                .unwrap_or_else(|_| Utc::now()),
        })
    }
}

const MERCHANT_COLUMNS: &str = "user_id, business_name, email, phone_number, country, \
     profile_completed, contact_completed, owner_completed, account_completed, \
     service_agreement_completed, completed_at, created_at";

// Column name per step, for the monotonic UPDATE
fn step_column(step: ComplianceStep) -> &'static str {
    match step {
        ComplianceStep::Profile => "profile_completed",
        ComplianceStep::Contact => "contact_completed",
        ComplianceStep::Owner => "owner_completed",
        ComplianceStep::Account => "account_completed",
        ComplianceStep::ServiceAgreement => "service_agreement_completed",
    }
}

impl MerchantStore for SqliteStore {
    fn insert_if_absent(&self, merchant: &Merchant) -> StoreResult<bool> {
        let conn = self.conn.lock().unwrap();

        let inserted = conn
            .execute(
                "INSERT OR IGNORE INTO merchants (user_id, business_name, email, phone_number, \
                 country, created_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                params![
                    merchant.user_id,
                    merchant.business_name,
                    merchant.email,
                    merchant.phone_number,
                    merchant.country,
                    merchant.created_at.to_rfc3339(),
                ],
            )
            .map_err(|e| ServerError::Internal(e.to_string()))?;

        Ok(inserted > 0)
    }

    fn get(&self, user_id: &str) -> StoreResult<Option<Merchant>> {
        let conn = self.conn.lock().unwrap();

        conn.query_row(
            &format!("SELECT {} FROM merchants WHERE user_id = ?1", MERCHANT_COLUMNS),
            params![user_id],
            Self::row_to_merchant,
        )
        .optional()
        .map_err(|e| ServerError::Internal(e.to_string()))
    }

    fn complete_step(&self, user_id: &str, step: ComplianceStep) -> StoreResult<Merchant> {
        let conn = self.conn.lock().unwrap();

        let updated = conn
            .execute(
                &format!(
                    "UPDATE merchants SET {} = 1 WHERE user_id = ?1",
                    step_column(step)
                ),
                params![user_id],
            )
            .map_err(|e| ServerError::Internal(e.to_string()))?;

        if updated == 0 {
            return Err(ServerError::MerchantNotFound);
        }

        // Stamp completed_at exactly once, when the fifth step lands
        conn.execute(
            "UPDATE merchants SET completed_at = ?1 WHERE user_id = ?2 \
             AND completed_at IS NULL \
             AND profile_completed = 1 AND contact_completed = 1 AND owner_completed = 1 \
             AND account_completed = 1 AND service_agreement_completed = 1",
            params![Utc::now().to_rfc3339(), user_id],
        )
        .map_err(|e| ServerError::Internal(e.to_string()))?;

        conn.query_row(
            &format!("SELECT {} FROM merchants WHERE user_id = ?1", MERCHANT_COLUMNS),
            params![user_id],
            Self::row_to_merchant,
        )
        .map_err(|e| ServerError::Internal(e.to_string()))
    }
}
