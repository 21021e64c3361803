//! Dashboard route: admin headline statistics.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use axum_extra::extract::cookie::CookieJar;
use serde_json::json;

use super::{message_response, upstream_error_response};
use crate::services::dashboard::{self as dashboard_svc, DashboardError};
use crate::session::CookieSession;
use crate::state::AppState;

fn dashboard_error_to_response(error: &DashboardError) -> Response {
    match error {
        DashboardError::Unauthenticated => message_response(StatusCode::UNAUTHORIZED, "Not authenticated"),
        DashboardError::Forbidden => message_response(StatusCode::FORBIDDEN, "Unauthorized"),
        DashboardError::Upstream(e) => upstream_error_response(e),
    }
}

/// `GET /api/dashboard-stats`: counts for the back-office home page.
pub async fn stats(State(state): State<AppState>, jar: CookieJar) -> Response {
    let session = CookieSession::new(jar, state.cookie_secure());
    match dashboard_svc::stats(state.upstream.as_ref(), &session).await {
        Ok(stats) => Json(json!({ "data": stats })).into_response(),
        Err(e) => dashboard_error_to_response(&e),
    }
}
