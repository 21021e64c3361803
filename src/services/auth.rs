//! Auth service: login, logout, verify and register against the upstream.
//!
//! DESIGN
//! ======
//! The gateway owns no identity data. Login trades credentials for an
//! upstream token, immediately resolves the identity behind it, and only then
//! writes the session cookie; if the identity fetch fails nothing is written
//! and the upstream token is simply abandoned. Logout always clears the
//! cookie whatever the upstream says. Verify collapses every failure into
//! `Unauthenticated` so callers never have to distinguish an expired token
//! from an unreachable upstream.

#[cfg(test)]
#[path = "auth_test.rs"]
mod tests;

use models::{SessionStore, User};
use serde_json::Value;

use super::upstream::{self, UpstreamApi, UpstreamError, UpstreamReply, UpstreamRequest};

pub const LOGIN_SUCCESS_MESSAGE: &str = "Login successful";
pub const LOGOUT_SUCCESS_MESSAGE: &str = "Logout successful";
const MISSING_CREDENTIALS_MESSAGE: &str = "Email and password are required";

// =============================================================================
// TYPES
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// Input rejected before any upstream call.
    #[error("{0}")]
    Validation(String),

    /// The upstream refused the credentials.
    #[error("login rejected ({status}): {message}")]
    Rejected { status: u16, message: String },

    /// A token was issued but the identity behind it could not be loaded.
    #[error("identity fetch failed: {0}")]
    IdentityFetch(UpstreamError),

    #[error("not authenticated")]
    Unauthenticated,

    #[error(transparent)]
    Upstream(UpstreamError),
}

/// Result of a successful login.
#[derive(Debug, Clone, PartialEq)]
pub struct LoginOutcome {
    pub token: String,
    pub user: User,
}

// =============================================================================
// OPERATIONS
// =============================================================================

/// Exchange credentials for a session and persist it in `session`.
///
/// # Errors
///
/// `Validation` for blank input, `Rejected` when the upstream refuses the
/// credentials, `IdentityFetch` when `/user` fails after a token was issued,
/// and `Upstream` for transport or schema failures on `/login`.
pub async fn login(
    api: &dyn UpstreamApi,
    session: &dyn SessionStore,
    email: &str,
    password: &str,
) -> Result<LoginOutcome, AuthError> {
    if email.trim().is_empty() || password.trim().is_empty() {
        return Err(AuthError::Validation(MISSING_CREDENTIALS_MESSAGE.into()));
    }

    let token = upstream::fetch_token(api, email, password).await.map_err(|e| match e {
        UpstreamError::Status { status, message } => AuthError::Rejected { status, message },
        other => AuthError::Upstream(other),
    })?;

    let user = upstream::fetch_user(api, &token).await.map_err(|e| {
        tracing::warn!(error = %e, "login issued a token but identity fetch failed");
        AuthError::IdentityFetch(e)
    })?;

    session.set(&token);
    tracing::info!(user_id = %user.id, role = %user.role, "login succeeded");
    Ok(LoginOutcome { token, user })
}

/// End the session. Idempotent; never fails.
pub async fn logout(api: &dyn UpstreamApi, session: &dyn SessionStore) {
    if let Some(token) = session.get() {
        if let Err(e) = upstream::end_session(api, &token).await {
            tracing::warn!(error = %e, "upstream logout failed; clearing session anyway");
        }
    }
    session.clear();
}

/// Resolve the identity behind the current session.
///
/// # Errors
///
/// `Unauthenticated` when there is no token or any upstream step fails.
pub async fn verify(api: &dyn UpstreamApi, session: &dyn SessionStore) -> Result<User, AuthError> {
    let token = session.get().ok_or(AuthError::Unauthenticated)?;
    upstream::fetch_user(api, &token).await.map_err(|e| {
        tracing::debug!(error = %e, "session verification failed");
        AuthError::Unauthenticated
    })
}

/// Forward a registration body to the upstream untouched.
///
/// # Errors
///
/// Only transport failures; upstream rejections come back as a reply.
pub async fn register(api: &dyn UpstreamApi, body: Value) -> Result<UpstreamReply, UpstreamError> {
    api.send(UpstreamRequest::post("register", body)).await
}
