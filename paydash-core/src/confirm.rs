//! Account confirmation for the merchant dashboard
//!
//! Verification links arrive in several shapes depending on which email
//! template produced them: a full access/refresh token pair, a token hash,
//! a token+email pair, or a one-time exchange code. Each shape maps to one
//! strategy against the external auth service; strategies run in a fixed
//! priority order and the chain stops at the first success, collecting
//! every failure reason along the way.

use serde::Deserialize;

/// Raw query parameters from an inbound confirmation link
///
/// More than one credential shape may be present at once; `strategies()`
/// extracts the applicable ones in priority order.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct VerificationParams {
    pub access_token: Option<String>,
    pub refresh_token: Option<String>,
    pub token_hash: Option<String>,
    pub token: Option<String>,
    pub email: Option<String>,
    pub code: Option<String>,
    /// Raw `type` parameter from the link; unrecognized values normalize
    /// to absent rather than failing
    #[serde(rename = "type")]
    pub otp_type: Option<String>,
}

impl VerificationParams {
    /// Extract the applicable strategies in priority order
    ///
    /// Empty means the link carried no usable credentials at all.
    pub fn strategies(&self) -> Vec<Strategy> {
        let mut out = Vec::new();

        if let (Some(access), Some(refresh)) = (
            non_empty(&self.access_token),
            non_empty(&self.refresh_token),
        ) {
            out.push(Strategy::SetSession {
                access_token: access.to_string(),
                refresh_token: refresh.to_string(),
            });
        }

        let otp_type = self.otp_type.as_deref().and_then(OtpType::from_str);

        if let Some(hash) = non_empty(&self.token_hash) {
            out.push(Strategy::VerifyTokenHash {
                token_hash: hash.to_string(),
                otp_type,
            });
        }

        if let (Some(token), Some(email)) = (non_empty(&self.token), non_empty(&self.email)) {
            out.push(Strategy::VerifyEmailOtp {
                token: token.to_string(),
                email: email.to_string(),
                otp_type,
            });
        }

        if let Some(code) = non_empty(&self.code) {
            out.push(Strategy::ExchangeCode {
                code: code.to_string(),
            });
        }

        out
    }
}

/// Treat missing and empty query values the same way
fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

/// Kind of one-time pass a verification link was issued for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OtpType {
    Signup,
    Recovery,
    Invite,
    Magiclink,
    Email,
    EmailChange,
}

impl OtpType {
    pub fn as_str(&self) -> &'static str {
        match self {
            OtpType::Signup => "signup",
            OtpType::Recovery => "recovery",
            OtpType::Invite => "invite",
            OtpType::Magiclink => "magiclink",
            OtpType::Email => "email",
            OtpType::EmailChange => "email_change",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "signup" => Some(OtpType::Signup),
            "recovery" => Some(OtpType::Recovery),
            "invite" => Some(OtpType::Invite),
            "magiclink" => Some(OtpType::Magiclink),
            "email" => Some(OtpType::Email),
            "email_change" => Some(OtpType::EmailChange),
            _ => None,
        }
    }
}

/// Profile metadata captured at signup time
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct SignupMetadata {
    pub business_name: Option<String>,
    pub phone_number: Option<String>,
    pub country: Option<String>,
}

/// An authenticated session established by the external auth service
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct AuthSession {
    pub user_id: String,
    pub email: Option<String>,
    pub access_token: Option<String>,
    pub refresh_token: Option<String>,
    #[serde(default)]
    pub metadata: SignupMetadata,
}

/// Capability interface to the external auth service
///
/// This allows different implementations:
/// - HTTP gateway (production)
/// - Mock gateway (testing)
pub trait AuthGateway: Send + Sync {
    /// Establish a session from an access/refresh token pair, verbatim
    fn set_session(&self, access_token: &str, refresh_token: &str) -> Result<AuthSession, String>;

    /// Verify a token-hash style link for the given OTP type
    fn verify_token_hash(&self, token_hash: &str, otp_type: OtpType)
        -> Result<AuthSession, String>;

    /// Verify a token+email style link for the given OTP type
    fn verify_email_otp(
        &self,
        token: &str,
        email: &str,
        otp_type: OtpType,
    ) -> Result<AuthSession, String>;

    /// Exchange a one-time code for a session (PKCE-style flow)
    fn exchange_code(&self, code: &str) -> Result<AuthSession, String>;
}

/// One confirmation strategy extracted from the link parameters
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Strategy {
    SetSession {
        access_token: String,
        refresh_token: String,
    },
    VerifyTokenHash {
        token_hash: String,
        otp_type: Option<OtpType>,
    },
    VerifyEmailOtp {
        token: String,
        email: String,
        otp_type: Option<OtpType>,
    },
    ExchangeCode {
        code: String,
    },
}

impl Strategy {
    /// Run this strategy against the gateway
    ///
    /// On failure every attempt's reason is returned: the hash and
    /// token+email strategies attempt twice (`signup` then `email`) when
    /// the link did not carry a recognized type.
    pub fn run<G: AuthGateway + ?Sized>(&self, gateway: &G) -> Result<AuthSession, Vec<String>> {
        match self {
            Strategy::SetSession {
                access_token,
                refresh_token,
            } => gateway
                .set_session(access_token, refresh_token)
                .map_err(|e| vec![format!("token pair rejected: {}", e)]),
            Strategy::VerifyTokenHash {
                token_hash,
                otp_type,
            } => run_otp(*otp_type, "token hash", |ty| {
                gateway.verify_token_hash(token_hash, ty)
            }),
            Strategy::VerifyEmailOtp {
                token,
                email,
                otp_type,
            } => run_otp(*otp_type, "email otp", |ty| {
                gateway.verify_email_otp(token, email, ty)
            }),
            Strategy::ExchangeCode { code } => gateway
                .exchange_code(code)
                .map_err(|e| vec![format!("code exchange rejected: {}", e)]),
        }
    }
}

/// Run an OTP verification, with the signup/email fallback pair when the
/// link type is absent or unrecognized
fn run_otp<F>(
    otp_type: Option<OtpType>,
    label: &str,
    mut attempt: F,
) -> Result<AuthSession, Vec<String>>
where
    F: FnMut(OtpType) -> Result<AuthSession, String>,
{
    let types = match otp_type {
        Some(ty) => vec![ty],
        // Ambiguous link shape: different email templates issue either
        None => vec![OtpType::Signup, OtpType::Email],
    };

    let mut errors = Vec::new();
    for ty in types {
        match attempt(ty) {
            Ok(session) => return Ok(session),
            Err(e) => errors.push(format!("{} ({}) rejected: {}", label, ty.as_str(), e)),
        }
    }
    Err(errors)
}

/// Result of running the confirmation chain
#[derive(Debug, Clone, PartialEq)]
pub enum ConfirmOutcome {
    /// A strategy succeeded; failures from earlier strategies are retained
    Confirmed {
        session: AuthSession,
        errors: Vec<String>,
    },
    /// Every applicable strategy failed
    Failed { errors: Vec<String> },
    /// None of the credential shapes was present; no auth call was made
    InvalidLink,
}

impl ConfirmOutcome {
    pub fn is_confirmed(&self) -> bool {
        matches!(self, ConfirmOutcome::Confirmed { .. })
    }

    /// The error surfaced to the user on failure (last one recorded)
    pub fn last_error(&self) -> Option<&str> {
        match self {
            ConfirmOutcome::Confirmed { errors, .. } | ConfirmOutcome::Failed { errors } => {
                errors.last().map(String::as_str)
            }
            ConfirmOutcome::InvalidLink => None,
        }
    }
}

/// Confirm an account from an inbound verification link
///
/// Tries each applicable strategy in priority order, stopping at the first
/// success. No strategy is retried after it fails, and no gateway call is
/// made when the link carries no usable credentials.
pub fn confirm_account<G: AuthGateway + ?Sized>(
    params: &VerificationParams,
    gateway: &G,
) -> ConfirmOutcome {
    let strategies = params.strategies();
    if strategies.is_empty() {
        return ConfirmOutcome::InvalidLink;
    }

    let mut errors = Vec::new();
    for strategy in strategies {
        match strategy.run(gateway) {
            Ok(session) => return ConfirmOutcome::Confirmed { session, errors },
            Err(mut attempt_errors) => errors.append(&mut attempt_errors),
        }
    }

    ConfirmOutcome::Failed { errors }
}
