//! Cookie-backed session store for one request.
//!
//! DESIGN
//! ======
//! A `CookieSession` is seeded from the incoming request's `Cookie` header and
//! accumulates `Set-Cookie` changes; the handler returns `into_jar()` as part
//! of its response. The cookie is readable by page scripts (not `HttpOnly`)
//! because the client auth context checks for its presence before verifying.
//! Clearing always emits an empty, zero-age cookie even if the request did
//! not carry one, so a stale browser copy is overwritten regardless.

#[cfg(test)]
#[path = "session_test.rs"]
mod tests;

use std::sync::{Mutex, PoisonError};

use axum::http::HeaderMap;
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use models::{SESSION_COOKIE, SESSION_MAX_AGE_SECS, SessionStore};
use time::Duration;

/// The `token` cookie carrying a fresh session.
#[must_use]
pub fn session_cookie(token: &str, secure: bool) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, token.to_owned()))
        .path("/")
        .http_only(false)
        .same_site(SameSite::Lax)
        .secure(secure)
        .max_age(Duration::seconds(SESSION_MAX_AGE_SECS))
        .build()
}

/// An empty `token` cookie that expires immediately.
#[must_use]
pub fn clearing_cookie(secure: bool) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, ""))
        .path("/")
        .http_only(false)
        .same_site(SameSite::Lax)
        .secure(secure)
        .max_age(Duration::ZERO)
        .build()
}

/// Read the session token from request headers, ignoring an empty value.
#[must_use]
pub fn token_from_headers(headers: &HeaderMap) -> Option<String> {
    let jar = CookieJar::from_headers(headers);
    jar.get(SESSION_COOKIE)
        .map(Cookie::value)
        .filter(|v| !v.is_empty())
        .map(str::to_owned)
}

pub struct CookieSession {
    jar: Mutex<CookieJar>,
    secure: bool,
}

impl CookieSession {
    #[must_use]
    pub fn new(jar: CookieJar, secure: bool) -> Self {
        Self { jar: Mutex::new(jar), secure }
    }

    #[must_use]
    pub fn from_headers(headers: &HeaderMap, secure: bool) -> Self {
        Self::new(CookieJar::from_headers(headers), secure)
    }

    /// The jar with any pending `Set-Cookie` changes.
    #[must_use]
    pub fn into_jar(self) -> CookieJar {
        self.jar.into_inner().unwrap_or_else(PoisonError::into_inner)
    }

    fn update(&self, cookie: Cookie<'static>) {
        let mut jar = self.jar.lock().unwrap_or_else(PoisonError::into_inner);
        *jar = jar.clone().add(cookie);
    }
}

impl SessionStore for CookieSession {
    fn get(&self) -> Option<String> {
        let jar = self.jar.lock().unwrap_or_else(PoisonError::into_inner);
        jar.get(SESSION_COOKIE)
            .map(Cookie::value)
            .filter(|v| !v.is_empty())
            .map(str::to_owned)
    }

    fn set(&self, token: &str) {
        self.update(session_cookie(token, self.secure));
    }

    fn clear(&self) {
        self.update(clearing_cookie(self.secure));
    }
}
