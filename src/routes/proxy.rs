//! Resource proxy: relays catalog, cart, user and transaction calls.
//!
//! DESIGN
//! ======
//! A static table maps each local `/api/<pattern>` to its upstream path.
//! Local and upstream names differ for a handful of endpoints (the upstream
//! uses singular detail paths such as `banner/{id}` and verb-first names such
//! as `update-cart/{id}`). `{id}` segments are captured from the local path
//! and substituted into the upstream template. Successful upstream replies pass
//! through unchanged; error replies keep their status and are reduced to
//! `{ "message": ... }`.

#[cfg(test)]
#[path = "proxy_test.rs"]
mod tests;

use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::{Method, StatusCode};
use axum::response::{IntoResponse, Json, Response};
use axum_extra::extract::cookie::CookieJar;
use models::SESSION_COOKIE;
use serde_json::Value;

use super::{INTERNAL_ERROR_MESSAGE, message_response, relay_status, upstream_error_response};
use crate::services::upstream::UpstreamRequest;
use crate::state::AppState;

const ID_SEGMENT: &str = "{id}";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verb {
    Get,
    Post,
    Delete,
}

impl Verb {
    #[must_use]
    pub fn method(self) -> Method {
        match self {
            Self::Get => Method::GET,
            Self::Post => Method::POST,
            Self::Delete => Method::DELETE,
        }
    }
}

/// Whether a route needs the session token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenPolicy {
    /// No cookie means 401 without contacting the upstream.
    Required,
    /// Token forwarded when present.
    Optional,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProxyRoute {
    pub verb: Verb,
    pub local: &'static str,
    pub upstream: &'static str,
    pub policy: TokenPolicy,
}

const fn route(verb: Verb, local: &'static str, upstream: &'static str, policy: TokenPolicy) -> ProxyRoute {
    ProxyRoute { verb, local, upstream, policy }
}

use TokenPolicy::{Optional, Required};
use Verb::{Delete, Get, Post};

pub const PROXY_ROUTES: &[ProxyRoute] = &[
    // Banners
    route(Get, "banners", "banners", Optional),
    route(Get, "banners/{id}", "banner/{id}", Optional),
    route(Post, "create-banner", "create-banner", Required),
    route(Post, "update-banner/{id}", "update-banner/{id}", Required),
    route(Delete, "delete-banner/{id}", "delete-banner/{id}", Required),
    // Categories
    route(Get, "categories", "categories", Optional),
    route(Get, "categories/{id}", "category/{id}", Required),
    route(Post, "create-category", "create-category", Required),
    route(Post, "update-category/{id}", "update-category/{id}", Required),
    route(Delete, "delete-category/{id}", "delete-category/{id}", Required),
    // Activities
    route(Get, "activities", "activities", Optional),
    route(Get, "activities/{id}", "activity/{id}", Optional),
    route(Get, "activities-by-category/{id}", "activities-by-category/{id}", Required),
    route(Post, "create-activity", "create-activity", Required),
    route(Post, "update-activity/{id}", "update-activity/{id}", Required),
    route(Delete, "delete-activity/{id}", "delete-activity/{id}", Required),
    // Promos
    route(Get, "promos", "promos", Required),
    route(Get, "promos/{id}", "promo/{id}", Optional),
    route(Post, "create-promo", "create-promo", Required),
    route(Post, "update-promo/{id}", "update-promo/{id}", Required),
    route(Delete, "delete-promo/{id}", "delete-promo/{id}", Required),
    // Users
    route(Get, "users", "all-user", Required),
    route(Post, "update-user-role/{id}", "update-user-role/{id}", Required),
    route(Post, "update-profile", "update-profile", Required),
    // Cart
    route(Get, "carts", "carts", Required),
    route(Post, "add-cart", "add-cart", Required),
    route(Post, "cart-update/{id}", "update-cart/{id}", Required),
    route(Delete, "delete-cart/{id}", "delete-cart/{id}", Required),
    // Payment methods
    route(Get, "payment-methods", "payment-methods", Optional),
    route(Post, "generate-payment-methods", "generate-payment-methods", Required),
    // Transactions
    route(Post, "create-transaction", "create-transaction", Required),
    route(Get, "transactions", "my-transactions", Required),
    route(Get, "all-transactions", "all-transactions", Required),
    route(Get, "transactions/{id}", "transaction/{id}", Required),
    route(Post, "cancel-transaction/{id}", "cancel-transaction/{id}", Required),
    route(Post, "update-transaction-proof-payment/{id}", "update-transaction-proof-payment/{id}", Required),
    route(Post, "update-transaction-status/{id}", "update-transaction-status/{id}", Required),
];

// =============================================================================
// RESOLUTION
// =============================================================================

/// A matched table entry with its upstream path filled in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedProxy {
    pub route: ProxyRoute,
    pub upstream_path: String,
}

/// Ids are substituted into the upstream path as-is, so only unreserved
/// characters are accepted and dot segments are refused.
fn is_plain_id(segment: &str) -> bool {
    !segment.is_empty()
        && segment != "."
        && segment != ".."
        && segment.bytes().all(|b| b.is_ascii_alphanumeric() || matches!(b, b'-' | b'_' | b'.' | b'~'))
}

/// Match `path` (relative to `/api/`) against `pattern`, returning the
/// captured id when the pattern has one.
fn match_pattern<'a>(pattern: &str, path: &'a str) -> Option<Option<&'a str>> {
    let mut pattern_segments = pattern.split('/');
    let mut path_segments = path.split('/');
    let mut captured = None;
    loop {
        match (pattern_segments.next(), path_segments.next()) {
            (None, None) => return Some(captured),
            (Some(ID_SEGMENT), Some(segment)) if is_plain_id(segment) => captured = Some(segment),
            (Some(expected), Some(segment)) if expected == segment => {}
            _ => return None,
        }
    }
}

/// Find the table entry for `method` and `path`.
#[must_use]
pub fn resolve_proxy(method: &Method, path: &str) -> Option<ResolvedProxy> {
    let path = path.trim_matches('/');
    PROXY_ROUTES.iter().filter(|r| r.verb.method() == *method).find_map(|route| {
        let captured = match_pattern(route.local, path)?;
        let upstream_path = match captured {
            Some(id) => route.upstream.replace(ID_SEGMENT, id),
            None => route.upstream.to_owned(),
        };
        Some(ResolvedProxy { route: *route, upstream_path })
    })
}

// =============================================================================
// HANDLER
// =============================================================================

/// `ANY /api/{*path}`: relay a table route to the upstream.
pub async fn forward(
    State(state): State<AppState>,
    method: Method,
    Path(path): Path<String>,
    jar: CookieJar,
    body: Bytes,
) -> Response {
    let Some(resolved) = resolve_proxy(&method, &path) else {
        return message_response(StatusCode::NOT_FOUND, "Not found");
    };

    let token = jar.get(SESSION_COOKIE).map(|c| c.value().to_owned()).filter(|v| !v.is_empty());
    if resolved.route.policy == TokenPolicy::Required && token.is_none() {
        return message_response(StatusCode::UNAUTHORIZED, "Unauthorized");
    }

    let mut request = UpstreamRequest::new(method, resolved.upstream_path);
    if let Some(token) = token {
        request = request.with_token(token);
    }
    if !body.is_empty() {
        match serde_json::from_slice::<Value>(&body) {
            Ok(json) => request = request.with_body(json),
            Err(_) => return message_response(StatusCode::BAD_REQUEST, "Invalid JSON body"),
        }
    }

    let reply = match state.upstream.send(request).await {
        Ok(reply) => reply,
        Err(e) => {
            tracing::error!(error = %e, path = %path, "proxy relay failed");
            return message_response(StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_ERROR_MESSAGE);
        }
    };
    match reply.error_for_status(INTERNAL_ERROR_MESSAGE) {
        Ok(reply) => (relay_status(reply.status), Json(reply.body)).into_response(),
        Err(e) => upstream_error_response(&e),
    }
}
