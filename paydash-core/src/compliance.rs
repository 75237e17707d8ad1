//! Merchant onboarding progress
//!
//! Five fixed compliance steps gate full dashboard access. The step
//! sequence is authoritative for ordering: the "next" step is the first
//! incomplete element of the sequence, not the most recently touched one.
//! Completion is monotonic.

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// One of the five onboarding sub-forms, in sequence order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ComplianceStep {
    Profile,
    Contact,
    Owner,
    Account,
    ServiceAgreement,
}

impl ComplianceStep {
    /// The full step sequence, in order
    pub const ALL: [ComplianceStep; 5] = [
        ComplianceStep::Profile,
        ComplianceStep::Contact,
        ComplianceStep::Owner,
        ComplianceStep::Account,
        ComplianceStep::ServiceAgreement,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ComplianceStep::Profile => "profile",
            ComplianceStep::Contact => "contact",
            ComplianceStep::Owner => "owner",
            ComplianceStep::Account => "account",
            ComplianceStep::ServiceAgreement => "service-agreement",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "profile" => Some(ComplianceStep::Profile),
            "contact" => Some(ComplianceStep::Contact),
            "owner" => Some(ComplianceStep::Owner),
            "account" => Some(ComplianceStep::Account),
            "service-agreement" => Some(ComplianceStep::ServiceAgreement),
            _ => None,
        }
    }

    /// Position in the fixed sequence
    pub fn index(&self) -> usize {
        *self as usize
    }
}

impl std::str::FromStr for ComplianceStep {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ComplianceStep::from_str(s).ok_or_else(|| Error::UnknownStep(s.to_string()))
    }
}

impl std::fmt::Display for ComplianceStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Completion state across the five steps
///
/// The `complete` marker is authoritative: when set, progress reads as
/// fully done regardless of the itemized flags.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComplianceProgress {
    pub profile: bool,
    pub contact: bool,
    pub owner: bool,
    pub account: bool,
    pub service_agreement: bool,
    /// Explicit all-done marker
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub complete: bool,
}

impl ComplianceProgress {
    pub fn step(&self, step: ComplianceStep) -> bool {
        match step {
            ComplianceStep::Profile => self.profile,
            ComplianceStep::Contact => self.contact,
            ComplianceStep::Owner => self.owner,
            ComplianceStep::Account => self.account,
            ComplianceStep::ServiceAgreement => self.service_agreement,
        }
    }

    /// Mark a step complete; the fifth completion sets the `complete` marker
    pub fn set_step(&mut self, step: ComplianceStep) {
        match step {
            ComplianceStep::Profile => self.profile = true,
            ComplianceStep::Contact => self.contact = true,
            ComplianceStep::Owner => self.owner = true,
            ComplianceStep::Account => self.account = true,
            ComplianceStep::ServiceAgreement => self.service_agreement = true,
        }
        if ComplianceStep::ALL.iter().all(|s| self.step(*s)) {
            self.complete = true;
        }
    }

    /// Number of completed steps (0-5); the `complete` marker short-circuits
    pub fn completed_count(&self) -> usize {
        if self.complete {
            return ComplianceStep::ALL.len();
        }
        ComplianceStep::ALL.iter().filter(|s| self.step(**s)).count()
    }

    /// First incomplete step in sequence order, or `None` when done
    pub fn next_step(&self) -> Option<ComplianceStep> {
        if self.complete {
            return None;
        }
        ComplianceStep::ALL.into_iter().find(|s| !self.step(*s))
    }

    pub fn is_complete(&self) -> bool {
        self.next_step().is_none()
    }

    /// Access guard for step pages
    ///
    /// Returns the redirect target when `requested` skips ahead of the next
    /// incomplete step. Revisiting an already-completed step is allowed.
    pub fn forward_redirect(&self, requested: ComplianceStep) -> Option<ComplianceStep> {
        let next = self.next_step()?;
        if requested.index() > next.index() {
            Some(next)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_next_step_follows_sequence_order() {
        // Contact done but profile not: profile is still next
        let progress = ComplianceProgress {
            contact: true,
            ..Default::default()
        };

        assert_eq!(progress.next_step(), Some(ComplianceStep::Profile));
        assert_eq!(progress.completed_count(), 1);
    }

    #[test]
    fn test_complete_marker_is_authoritative() {
        let progress = ComplianceProgress {
            complete: true,
            ..Default::default()
        };

        assert_eq!(progress.completed_count(), 5);
        assert_eq!(progress.next_step(), None);
        assert!(progress.is_complete());
    }

    #[test]
    fn test_fifth_completion_sets_marker() {
        let mut progress = ComplianceProgress::default();
        for step in ComplianceStep::ALL {
            assert!(!progress.complete);
            progress.set_step(step);
        }

        assert!(progress.complete);
        assert!(progress.is_complete());
    }

    #[test]
    fn test_forward_redirect_blocks_skips_only() {
        let progress = ComplianceProgress {
            profile: true,
            ..Default::default()
        };

        // Next is contact: skipping ahead to owner redirects back
        assert_eq!(
            progress.forward_redirect(ComplianceStep::Owner),
            Some(ComplianceStep::Contact)
        );
        // The next step itself is allowed
        assert_eq!(progress.forward_redirect(ComplianceStep::Contact), None);
        // Revisiting a completed step is allowed
        assert_eq!(progress.forward_redirect(ComplianceStep::Profile), None);
    }

    #[test]
    fn test_forward_redirect_when_all_complete() {
        let progress = ComplianceProgress {
            complete: true,
            ..Default::default()
        };

        assert_eq!(progress.forward_redirect(ComplianceStep::Account), None);
    }

    #[test]
    fn test_step_name_round_trip() {
        for step in ComplianceStep::ALL {
            assert_eq!(ComplianceStep::from_str(step.as_str()), Some(step));
        }
        assert_eq!(ComplianceStep::from_str("billing"), None);
        assert!("service-agreement".parse::<ComplianceStep>().is_ok());
        assert!("billing".parse::<ComplianceStep>().is_err());
    }

    #[test]
    fn test_set_step_is_monotonic() {
        let mut progress = ComplianceProgress::default();
        progress.set_step(ComplianceStep::Profile);
        progress.set_step(ComplianceStep::Profile);

        assert!(progress.profile);
        assert_eq!(progress.completed_count(), 1);
    }
}
