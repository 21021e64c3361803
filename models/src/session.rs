//! Session-token storage capability.
//!
//! The session is one opaque token kept in the `token` cookie for seven days
//! and never refreshed. Callers only get/set/clear the whole value; the
//! gateway backs this with a per-request cookie jar and the client with an
//! in-process store fed by `Set-Cookie` headers.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use std::sync::RwLock;

pub const SESSION_COOKIE: &str = "token";
pub const SESSION_MAX_AGE_SECS: i64 = 7 * 24 * 60 * 60;

/// Whole-value token storage.
pub trait SessionStore: Send + Sync {
    fn get(&self) -> Option<String>;
    fn set(&self, token: &str);
    fn clear(&self);
}

/// In-memory store. A poisoned lock reads as "no session".
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    token: RwLock<Option<String>>,
}

impl MemorySessionStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_token(token: impl Into<String>) -> Self {
        Self { token: RwLock::new(Some(token.into())) }
    }
}

impl SessionStore for MemorySessionStore {
    fn get(&self) -> Option<String> {
        self.token.read().ok().and_then(|guard| guard.clone())
    }

    fn set(&self, token: &str) {
        if let Ok(mut guard) = self.token.write() {
            *guard = Some(token.to_owned());
        }
    }

    fn clear(&self) {
        if let Ok(mut guard) = self.token.write() {
            *guard = None;
        }
    }
}
