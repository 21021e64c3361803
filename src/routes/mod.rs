//! Router assembly.
//!
//! SYSTEM CONTEXT
//! ==============
//! One Axum router serves the whole site: the `/api/*` proxy surface in front
//! of the upstream travel API, a health probe, and the storefront and
//! back-office pages as static files. The route guard wraps everything; it
//! skips `/api/*` and asset paths on its own so the layer order stays simple.

pub mod auth;
pub mod dashboard;
pub mod proxy;

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;

use axum::Router;
use axum::http::StatusCode;
use axum::middleware;
use axum::response::{IntoResponse, Json, Response};
use axum::routing::{any, get, post};
use models::MessageBody;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::guard;
use crate::services::upstream::UpstreamError;
use crate::state::AppState;

pub(crate) const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";

/// Build the application router.
pub fn app(state: AppState) -> Router {
    let pages = ServeDir::new(&state.config.public_dir).append_index_html_on_directories(true);

    Router::new()
        .route("/api/login", post(auth::login))
        .route("/api/logout", get(auth::logout))
        .route("/api/verify", get(auth::verify))
        .route("/api/register", post(auth::register))
        .route("/api/dashboard-stats", get(dashboard::stats))
        .route("/api/{*path}", any(proxy::forward))
        .route("/healthz", get(healthz))
        .fallback_service(pages)
        .layer(middleware::from_fn_with_state(state.clone(), guard::route_guard))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn healthz() -> StatusCode {
    StatusCode::OK
}

// =============================================================================
// ERROR RESPONSES
// =============================================================================

/// `{ "message": ... }` with the given status.
pub(crate) fn message_response(status: StatusCode, message: impl Into<String>) -> Response {
    (status, Json(MessageBody::new(message))).into_response()
}

/// Map an upstream status code, falling back to 502 for nonsense values.
pub(crate) fn relay_status(status: u16) -> StatusCode {
    StatusCode::from_u16(status).unwrap_or(StatusCode::BAD_GATEWAY)
}

/// Upstream status errors keep their status and message; anything else is a
/// generic 500.
pub(crate) fn upstream_error_response(error: &UpstreamError) -> Response {
    match error {
        UpstreamError::Status { status, message } => message_response(relay_status(*status), message.clone()),
        UpstreamError::Transport(_) | UpstreamError::Schema(_) => {
            tracing::error!(error = %error, "upstream call failed");
            message_response(StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_ERROR_MESSAGE)
        }
    }
}
