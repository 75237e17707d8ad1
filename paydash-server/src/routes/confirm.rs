//! Account confirmation endpoint
//!
//! Terminal for the verification links the external auth service emails
//! out. Every outcome is a redirect back to the login surface; failures
//! never escape the handler as HTTP errors.

use std::sync::Arc;

use axum::extract::{Query, State};
use axum::response::Redirect;
use tower_cookies::Cookies;

use paydash_core::{AuthGateway, ConfirmOutcome, VerificationParams};

use crate::gateway::run_confirmation;
use crate::merchant::ensure_merchant;
use crate::rates::RateSource;
use crate::state::AppState;
use crate::store::{MerchantStore, SessionStore};

/// GET /auth/confirm
pub async fn confirm_account<M, S, G, R>(
    State(state): State<Arc<AppState<M, S, G, R>>>,
    cookies: Cookies,
    Query(params): Query<VerificationParams>,
) -> Redirect
where
    M: MerchantStore,
    S: SessionStore,
    G: AuthGateway + 'static,
    R: RateSource,
{
    let login = &state.config.login_url;
    let outcome = run_confirmation(state.auth.clone(), params).await;

    match outcome {
        ConfirmOutcome::Confirmed { session, errors } => {
            if !errors.is_empty() {
                tracing::debug!(
                    user_id = %session.user_id,
                    failed_attempts = errors.len(),
                    "Confirmation succeeded after fallback attempts"
                );
            }

            ensure_merchant(state.merchant_store.as_ref(), &session);

            // Dashboard session is best-effort, like the merchant row
            match state.session_store.create(&session.user_id) {
                Ok(dashboard_session) => {
                    super::session::set_session_cookie(&cookies, &dashboard_session.id.0);
                }
                Err(e) => {
                    tracing::warn!(user_id = %session.user_id, error = %e, "Failed to create dashboard session");
                }
            }

            Redirect::to(&format!("{}?confirmed=true", login))
        }
        ConfirmOutcome::Failed { errors } => {
            tracing::warn!(errors = ?errors, "Account confirmation failed");

            let last = errors
                .last()
                .map(String::as_str)
                .unwrap_or("verification failed");
            let query = serde_urlencoded::to_string([
                ("error", "verification_failed"),
                ("error_description", last),
            ])
            .unwrap_or_else(|_| "error=verification_failed".to_string());

            Redirect::to(&format!("{}?{}", login, query))
        }
        ConfirmOutcome::InvalidLink => Redirect::to(&format!("{}?error=invalid_link", login)),
    }
}
