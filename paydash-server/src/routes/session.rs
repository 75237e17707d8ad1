//! Session context and logout endpoints

use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use serde::Serialize;
use tower_cookies::Cookies;

use paydash_core::AuthGateway;

use crate::error::ServerError;
use crate::rates::RateSource;
use crate::state::AppState;
use crate::store::{MerchantStore, Session, SessionId, SessionStore};

pub const SESSION_COOKIE: &str = "paydash_session";

#[derive(Serialize)]
pub struct SessionContext {
    pub authenticated: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub csrf_token: Option<String>,
    pub server_time: i64,
}

/// GET /api/session
pub async fn get_session_context<M, S, G, R>(
    State(state): State<Arc<AppState<M, S, G, R>>>,
    cookies: Cookies,
) -> Json<SessionContext>
where
    M: MerchantStore,
    S: SessionStore,
    G: AuthGateway,
    R: RateSource,
{
    let session = get_session_from_cookies(&cookies, state.session_store.as_ref());

    let context = if let Some(session) = session {
        SessionContext {
            authenticated: true,
            user_id: Some(session.user_id),
            csrf_token: Some(session.csrf_token),
            server_time: chrono::Utc::now().timestamp(),
        }
    } else {
        SessionContext {
            authenticated: false,
            user_id: None,
            csrf_token: None,
            server_time: chrono::Utc::now().timestamp(),
        }
    };

    Json(context)
}

#[derive(Serialize)]
pub struct LogoutResponse {
    pub success: bool,
}

/// POST /auth/logout
pub async fn logout<M, S, G, R>(
    State(state): State<Arc<AppState<M, S, G, R>>>,
    cookies: Cookies,
) -> Json<LogoutResponse>
where
    M: MerchantStore,
    S: SessionStore,
    G: AuthGateway,
    R: RateSource,
{
    if let Some(session) = get_session_from_cookies(&cookies, state.session_store.as_ref()) {
        let _ = state.session_store.delete(&session.id);
    }

    clear_session_cookie(&cookies);

    Json(LogoutResponse { success: true })
}

/// Helper to get current session from cookies
pub fn get_session_from_cookies<S: SessionStore + ?Sized>(
    cookies: &Cookies,
    session_store: &S,
) -> Option<Session> {
    cookies.get(SESSION_COOKIE).and_then(|c| {
        let session_id = SessionId(c.value().to_string());
        session_store.get(&session_id).ok().flatten()
    })
}

/// Helper used by endpoints that require authentication
pub fn require_session<S: SessionStore + ?Sized>(
    cookies: &Cookies,
    session_store: &S,
) -> Result<Session, ServerError> {
    get_session_from_cookies(cookies, session_store).ok_or(ServerError::NotAuthenticated)
}

/// Helper to set session cookie
pub fn set_session_cookie(cookies: &Cookies, session_id: &str) {
    use tower_cookies::Cookie;
    let cookie = Cookie::build((SESSION_COOKIE, session_id.to_string()))
        .path("/")
        .http_only(true)
        .build();
    cookies.add(cookie);
}

/// Helper to clear session cookie
pub fn clear_session_cookie(cookies: &Cookies) {
    use tower_cookies::Cookie;
    let cookie = Cookie::build((SESSION_COOKIE, ""))
        .path("/")
        .http_only(true)
        .max_age(tower_cookies::cookie::time::Duration::ZERO)
        .build();
    cookies.add(cookie);
}
