//! Paydash Core Library
//!
//! Domain logic for the merchant payments dashboard:
//! - Account confirmation: an ordered strategy chain over the external
//!   auth capability, driven by whatever credential shape the inbound
//!   verification link carried
//! - Compliance progress: the five-step onboarding sequence merchants
//!   complete before full dashboard access
//! - Dashboard statistics derived from the transaction history
//! - Exchange-rate table shaping with a stale fallback

pub mod compliance;
pub mod confirm;
pub mod currency;
pub mod error;
pub mod stats;

pub use compliance::{ComplianceProgress, ComplianceStep};
pub use confirm::{
    confirm_account, AuthGateway, AuthSession, ConfirmOutcome, OtpType, SignupMetadata, Strategy,
    VerificationParams,
};
pub use currency::{RateTable, SUPPORTED_CURRENCIES};
pub use error::Error;
pub use stats::{compute_stats, DashboardStats, Transaction, TransactionStatus};

/// Result type for paydash-core operations
pub type Result<T> = std::result::Result<T, Error>;
