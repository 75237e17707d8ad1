//! HTTP gateway to the external auth service
//!
//! Implements the confirmation calls against the service's REST endpoints
//! with a blocking client; handlers run the whole strategy chain inside a
//! blocking task.

use std::sync::Arc;
use std::time::Duration;

use paydash_core::{
    confirm_account, AuthGateway, AuthSession, ConfirmOutcome, OtpType, SignupMetadata,
    VerificationParams,
};
use reqwest::blocking::Client;
use serde::Deserialize;
use serde_json::json;

/// Gateway backed by the external auth service's REST API
pub struct HttpAuthGateway {
    client: Client,
    base_url: String,
    anon_key: String,
}

impl HttpAuthGateway {
    pub fn new(base_url: &str, anon_key: &str) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            anon_key: anon_key.to_string(),
        }
    }

    /// POST a verification body and parse the returned session
    fn post_session(&self, path: &str, body: serde_json::Value) -> Result<AuthSession, String> {
        let url = format!("{}{}", self.base_url, path);
        let response = self
            .client
            .post(&url)
            .header("apikey", &self.anon_key)
            .json(&body)
            .send()
            .map_err(|e| format!("request failed: {}", e))?;

        let status = response.status();
        let text = response
            .text()
            .map_err(|e| format!("invalid response: {}", e))?;

        if !status.is_success() {
            return Err(error_reason(status.as_u16(), &text));
        }

        parse_session(&text)
    }
}

#[derive(Deserialize)]
struct SessionPayload {
    access_token: Option<String>,
    refresh_token: Option<String>,
    user: Option<UserPayload>,
}

#[derive(Deserialize)]
struct UserPayload {
    id: String,
    email: Option<String>,
    #[serde(default)]
    user_metadata: SignupMetadata,
}

fn parse_session(body: &str) -> Result<AuthSession, String> {
    let payload: SessionPayload =
        serde_json::from_str(body).map_err(|e| format!("invalid session payload: {}", e))?;
    let user = payload.user.ok_or_else(|| "no user in response".to_string())?;

    Ok(AuthSession {
        user_id: user.id,
        email: user.email,
        access_token: payload.access_token,
        refresh_token: payload.refresh_token,
        metadata: user.user_metadata,
    })
}

/// Best-effort error message from an upstream failure body
fn error_reason(status: u16, body: &str) -> String {
    let detail = serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| {
            ["error_description", "msg", "message", "error"]
                .iter()
                .find_map(|key| v.get(*key).and_then(|s| s.as_str()).map(str::to_string))
        });

    detail.unwrap_or_else(|| format!("HTTP {}", status))
}

impl AuthGateway for HttpAuthGateway {
    fn set_session(&self, access_token: &str, refresh_token: &str) -> Result<AuthSession, String> {
        // The token pair is used verbatim: validating the access token
        // against /user is all the confirmation needs
        let url = format!("{}/auth/v1/user", self.base_url);
        let response = self
            .client
            .get(&url)
            .header("apikey", &self.anon_key)
            .bearer_auth(access_token)
            .send()
            .map_err(|e| format!("request failed: {}", e))?;

        let status = response.status();
        let text = response
            .text()
            .map_err(|e| format!("invalid response: {}", e))?;

        if !status.is_success() {
            return Err(error_reason(status.as_u16(), &text));
        }

        let user: UserPayload =
            serde_json::from_str(&text).map_err(|e| format!("invalid user payload: {}", e))?;

        Ok(AuthSession {
            user_id: user.id,
            email: user.email,
            access_token: Some(access_token.to_string()),
            refresh_token: Some(refresh_token.to_string()),
            metadata: user.user_metadata,
        })
    }

    fn verify_token_hash(
        &self,
        token_hash: &str,
        otp_type: OtpType,
    ) -> Result<AuthSession, String> {
        self.post_session(
            "/auth/v1/verify",
            json!({ "type": otp_type.as_str(), "token_hash": token_hash }),
        )
    }

    fn verify_email_otp(
        &self,
        token: &str,
        email: &str,
        otp_type: OtpType,
    ) -> Result<AuthSession, String> {
        self.post_session(
            "/auth/v1/verify",
            json!({ "type": otp_type.as_str(), "token": token, "email": email }),
        )
    }

    fn exchange_code(&self, code: &str) -> Result<AuthSession, String> {
        self.post_session("/auth/v1/token?grant_type=pkce", json!({ "auth_code": code }))
    }
}

/// Run the confirmation chain in a blocking task
///
/// The gateway uses a blocking HTTP client, so the chain runs off the
/// async worker threads.
pub async fn run_confirmation<G>(gateway: Arc<G>, params: VerificationParams) -> ConfirmOutcome
where
    G: AuthGateway + 'static,
{
    match tokio::task::spawn_blocking(move || confirm_account(&params, gateway.as_ref())).await {
        Ok(outcome) => outcome,
        Err(e) => ConfirmOutcome::Failed {
            errors: vec![format!("confirmation task failed: {}", e)],
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_reason_prefers_description() {
        let body = r#"{"error": "invalid_grant", "error_description": "Email link is invalid or has expired"}"#;
        assert_eq!(
            error_reason(400, body),
            "Email link is invalid or has expired"
        );
    }

    #[test]
    fn test_error_reason_reads_msg() {
        assert_eq!(error_reason(401, r#"{"msg": "Token has expired"}"#), "Token has expired");
    }

    #[test]
    fn test_error_reason_falls_back_to_status() {
        assert_eq!(error_reason(502, "<html>bad gateway</html>"), "HTTP 502");
    }

    #[test]
    fn test_parse_session_with_metadata() {
        let body = r#"{
            "access_token": "at",
            "refresh_token": "rt",
            "user": {
                "id": "4f1c2b9e",
                "email": "owner@acme.test",
                "user_metadata": {"business_name": "Acme Stores", "country": "NG"}
            }
        }"#;

        let session = parse_session(body).unwrap();

        assert_eq!(session.user_id, "4f1c2b9e");
        assert_eq!(session.metadata.business_name.as_deref(), Some("Acme Stores"));
        assert_eq!(session.metadata.phone_number, None);
    }

    #[test]
    fn test_parse_session_requires_user() {
        assert!(parse_session(r#"{"access_token": "at"}"#).is_err());
    }
}
