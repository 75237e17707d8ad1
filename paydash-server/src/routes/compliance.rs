//! Compliance progress and access-guard endpoints
//!
//! Progress is derived from the merchant record; the record is the sole
//! source of truth, there is no client-local copy to disagree with.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::response::{IntoResponse, Redirect, Response};
use axum::Json;
use serde::Serialize;
use serde_json::json;

use paydash_core::{AuthGateway, ComplianceProgress, ComplianceStep};

use crate::error::ServerError;
use crate::rates::RateSource;
use crate::state::AppState;
use crate::store::{MerchantStore, SessionStore};

use super::session::require_session;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressResponse {
    pub completed_steps: usize,
    pub total_steps: usize,
    pub complete: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_step: Option<ComplianceStep>,
    pub steps: ComplianceProgress,
}

impl ProgressResponse {
    fn from_progress(progress: ComplianceProgress) -> Self {
        Self {
            completed_steps: progress.completed_count(),
            total_steps: ComplianceStep::ALL.len(),
            complete: progress.is_complete(),
            next_step: progress.next_step(),
            steps: progress,
        }
    }
}

/// Progress for a user; an absent merchant row reads as nothing done yet
fn progress_for<M: MerchantStore + ?Sized>(
    store: &M,
    user_id: &str,
) -> Result<ComplianceProgress, ServerError> {
    Ok(store
        .get(user_id)?
        .map(|merchant| merchant.progress())
        .unwrap_or_default())
}

/// GET /api/compliance/progress
pub async fn get_progress<M, S, G, R>(
    State(state): State<Arc<AppState<M, S, G, R>>>,
    cookies: tower_cookies::Cookies,
) -> Result<Json<ProgressResponse>, ServerError>
where
    M: MerchantStore,
    S: SessionStore,
    G: AuthGateway,
    R: RateSource,
{
    let session = require_session(&cookies, state.session_store.as_ref())?;
    let progress = progress_for(state.merchant_store.as_ref(), &session.user_id)?;

    Ok(Json(ProgressResponse::from_progress(progress)))
}

/// POST /api/compliance/{step}/complete
pub async fn complete_step<M, S, G, R>(
    State(state): State<Arc<AppState<M, S, G, R>>>,
    cookies: tower_cookies::Cookies,
    Path(step): Path<String>,
) -> Result<Json<ProgressResponse>, ServerError>
where
    M: MerchantStore,
    S: SessionStore,
    G: AuthGateway,
    R: RateSource,
{
    let session = require_session(&cookies, state.session_store.as_ref())?;
    let step: ComplianceStep = step.parse()?;

    let merchant = state.merchant_store.complete_step(&session.user_id, step)?;

    Ok(Json(ProgressResponse::from_progress(merchant.progress())))
}

/// GET /compliance/{step}
///
/// Access guard: skipping ahead redirects to the next incomplete step;
/// revisiting completed steps is allowed.
pub async fn step_page<M, S, G, R>(
    State(state): State<Arc<AppState<M, S, G, R>>>,
    cookies: tower_cookies::Cookies,
    Path(step): Path<String>,
) -> Result<Response, ServerError>
where
    M: MerchantStore,
    S: SessionStore,
    G: AuthGateway,
    R: RateSource,
{
    let session = require_session(&cookies, state.session_store.as_ref())?;
    let step: ComplianceStep = step.parse()?;
    let progress = progress_for(state.merchant_store.as_ref(), &session.user_id)?;

    match progress.forward_redirect(step) {
        Some(next) => {
            Ok(Redirect::temporary(&format!("/compliance/{}", next.as_str())).into_response())
        }
        None => Ok(Json(json!({
            "step": step.as_str(),
            "completed": progress.step(step),
        }))
        .into_response()),
    }
}
