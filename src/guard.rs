//! Route guard middleware.
//!
//! SYSTEM CONTEXT
//! ==============
//! Runs in front of every navigable page. It reads the session cookie,
//! verifies it with the upstream, and applies the access table from
//! `models::access`. The proxy surface and static assets are skipped.
//!
//! ERROR HANDLING
//! ==============
//! Fails closed: any verification failure, including an unreachable
//! upstream, is treated as an invalid token and the visitor is sent to
//! `/login` with the cookie cleared.

#[cfg(test)]
#[path = "guard_test.rs"]
mod tests;

use axum::extract::{Request, State};
use axum::http::HeaderMap;
use axum::middleware::Next;
use axum::response::{IntoResponse, Redirect, Response};
use axum_extra::extract::cookie::CookieJar;
use models::{AccessState, Decision, classify_access, matches_prefix};

use crate::services::auth;
use crate::session::{CookieSession, clearing_cookie, token_from_headers};
use crate::state::AppState;

/// Path prefixes the guard never inspects, matched on segment boundaries.
const BYPASS_PREFIXES: &[&str] = &["/api", "/_next/static", "/_next/image", "/assets"];
const BYPASS_EXACT: &[&str] = &["/favicon.ico", "/healthz"];

/// Whether `path` goes through the guard.
#[must_use]
pub fn guard_applies(path: &str) -> bool {
    !(BYPASS_EXACT.contains(&path) || BYPASS_PREFIXES.iter().any(|p| matches_prefix(path, p)))
}

async fn resolve_access(state: &AppState, headers: &HeaderMap) -> AccessState {
    if token_from_headers(headers).is_none() {
        return AccessState::NoToken;
    }
    let session = CookieSession::from_headers(headers, state.cookie_secure());
    match auth::verify(state.upstream.as_ref(), &session).await {
        Ok(user) => AccessState::for_user(&user),
        Err(_) => AccessState::TokenInvalid,
    }
}

/// Axum middleware applying the access table to page requests.
pub async fn route_guard(State(state): State<AppState>, request: Request, next: Next) -> Response {
    let path = request.uri().path().to_owned();
    if !guard_applies(&path) {
        return next.run(request).await;
    }

    let access = resolve_access(&state, request.headers()).await;
    match classify_access(&path, &access) {
        Decision::Allow => next.run(request).await,
        Decision::RedirectTo { location, clear_session } => {
            tracing::debug!(%path, %location, ?access, "route guard redirect");
            let redirect = Redirect::temporary(&location);
            if clear_session {
                let jar = CookieJar::new().add(clearing_cookie(state.cookie_secure()));
                (jar, redirect).into_response()
            } else {
                redirect.into_response()
            }
        }
    }
}
