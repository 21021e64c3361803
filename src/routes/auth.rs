//! Auth routes: login, logout, verify and register on the proxy surface.

#[cfg(test)]
#[path = "auth_test.rs"]
mod tests;

use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use axum_extra::extract::cookie::CookieJar;
use models::requests::LoginRequest;
use models::{LoginReply, MessageBody, VerifyReply};
use serde_json::Value;

use super::{INTERNAL_ERROR_MESSAGE, message_response, relay_status, upstream_error_response};
use crate::services::auth::{self as auth_svc, AuthError, LOGIN_SUCCESS_MESSAGE, LOGOUT_SUCCESS_MESSAGE};
use crate::session::CookieSession;
use crate::state::AppState;

const UNAUTHENTICATED_MESSAGE: &str = "Not authenticated";
const INVALID_BODY_MESSAGE: &str = "Invalid request body";

fn auth_error_to_response(error: AuthError) -> Response {
    match error {
        AuthError::Validation(message) => message_response(StatusCode::BAD_REQUEST, message),
        AuthError::Rejected { status, message } => message_response(relay_status(status), message),
        AuthError::IdentityFetch(e) | AuthError::Upstream(e) => upstream_error_response(&e),
        AuthError::Unauthenticated => message_response(StatusCode::UNAUTHORIZED, UNAUTHENTICATED_MESSAGE),
    }
}

// =============================================================================
// HANDLERS
// =============================================================================

/// `POST /api/login`: exchange credentials, set the session cookie, return the user.
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    body: Result<Json<LoginRequest>, JsonRejection>,
) -> Response {
    let Ok(Json(credentials)) = body else {
        return message_response(StatusCode::BAD_REQUEST, INVALID_BODY_MESSAGE);
    };

    let session = CookieSession::new(jar, state.cookie_secure());
    match auth_svc::login(state.upstream.as_ref(), &session, &credentials.email, &credentials.password).await {
        Ok(outcome) => {
            let reply = LoginReply { message: LOGIN_SUCCESS_MESSAGE.into(), token: outcome.token, user: outcome.user };
            (session.into_jar(), Json(reply)).into_response()
        }
        Err(e) => auth_error_to_response(e),
    }
}

/// `GET /api/logout`: end the upstream session if any and clear the cookie.
pub async fn logout(State(state): State<AppState>, jar: CookieJar) -> Response {
    let session = CookieSession::new(jar, state.cookie_secure());
    auth_svc::logout(state.upstream.as_ref(), &session).await;
    (session.into_jar(), Json(MessageBody::new(LOGOUT_SUCCESS_MESSAGE))).into_response()
}

/// `GET /api/verify`: current user or 401.
pub async fn verify(State(state): State<AppState>, jar: CookieJar) -> Response {
    let session = CookieSession::new(jar, state.cookie_secure());
    match auth_svc::verify(state.upstream.as_ref(), &session).await {
        Ok(user) => Json(VerifyReply { data: user }).into_response(),
        Err(e) => auth_error_to_response(e),
    }
}

/// `POST /api/register`: relay to the upstream; status and body come back verbatim.
pub async fn register(State(state): State<AppState>, body: Result<Json<Value>, JsonRejection>) -> Response {
    let Ok(Json(body)) = body else {
        return message_response(StatusCode::BAD_REQUEST, INVALID_BODY_MESSAGE);
    };

    match auth_svc::register(state.upstream.as_ref(), body).await {
        Ok(reply) => (relay_status(reply.status), Json(reply.body)).into_response(),
        Err(e) => {
            tracing::error!(error = %e, "register relay failed");
            message_response(StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_ERROR_MESSAGE)
        }
    }
}
