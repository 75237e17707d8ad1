//! Data models for merchant storage

use chrono::{DateTime, Utc};
use paydash_core::{ComplianceProgress, ComplianceStep, SignupMetadata};
use serde::{Deserialize, Serialize};

/// Unique session identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(pub String);

/// A dashboard session
#[derive(Debug, Clone)]
pub struct Session {
    pub id: SessionId,
    pub user_id: String,
    pub csrf_token: String,
    pub created_at: DateTime<Utc>,
}

/// The backend record for one onboarded business account
///
/// One row per authenticated user, keyed by `user_id`. Created at most
/// once by the confirmation flow and never deleted here.
#[derive(Debug, Clone, PartialEq)]
pub struct Merchant {
    pub user_id: String,
    pub business_name: Option<String>,
    pub email: Option<String>,
    pub phone_number: Option<String>,
    pub country: Option<String>,
    pub profile_completed: bool,
    pub contact_completed: bool,
    pub owner_completed: bool,
    pub account_completed: bool,
    pub service_agreement_completed: bool,
    pub completed_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl Merchant {
    /// Fresh row for a newly confirmed account
    ///
    /// Metadata fields default to `None` when signup did not capture them.
    pub fn new(user_id: &str, email: Option<&str>, metadata: &SignupMetadata) -> Self {
        Self {
            user_id: user_id.to_string(),
            business_name: metadata.business_name.clone(),
            email: email.map(str::to_string),
            phone_number: metadata.phone_number.clone(),
            country: metadata.country.clone(),
            profile_completed: false,
            contact_completed: false,
            owner_completed: false,
            account_completed: false,
            service_agreement_completed: false,
            completed_at: None,
            created_at: Utc::now(),
        }
    }

    /// Compliance progress derived from this row
    ///
    /// `completed_at` doubles as the explicit all-done marker.
    pub fn progress(&self) -> ComplianceProgress {
        ComplianceProgress {
            profile: self.profile_completed,
            contact: self.contact_completed,
            owner: self.owner_completed,
            account: self.account_completed,
            service_agreement: self.service_agreement_completed,
            complete: self.completed_at.is_some(),
        }
    }

    /// Mark a step complete; stamps `completed_at` when the fifth lands
    pub fn complete_step(&mut self, step: ComplianceStep) {
        match step {
            ComplianceStep::Profile => self.profile_completed = true,
            ComplianceStep::Contact => self.contact_completed = true,
            ComplianceStep::Owner => self.owner_completed = true,
            ComplianceStep::Account => self.account_completed = true,
            ComplianceStep::ServiceAgreement => self.service_agreement_completed = true,
        }

        let all_done = self.profile_completed
            && self.contact_completed
            && self.owner_completed
            && self.account_completed
            && self.service_agreement_completed;
        if all_done && self.completed_at.is_none() {
            self.completed_at = Some(Utc::now());
        }
    }
}
