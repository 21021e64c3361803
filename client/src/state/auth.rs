//! Auth-session state for the current user.
//!
//! SYSTEM CONTEXT
//! ==============
//! Views consult [`AuthContext`] for "who is signed in" and call its
//! `login`/`logout` to change it. The gateway's route guard has already
//! decided whether a page may load; this context only mirrors the identity
//! for rendering and for picking where to navigate next.
//!
//! DESIGN
//! ======
//! `mount` verifies the stored session once per context. A failed verify
//! wipes the local session so a stale token is not replayed on every request.
//! Navigation targets are returned as strings; the caller performs the
//! actual navigation.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{PoisonError, RwLock};

use models::{User, home_for};

use crate::error::ClientError;
use crate::net::api;
use crate::net::client::ApiClient;

const MISSING_CREDENTIALS_MESSAGE: &str = "Email and password are required";
const AFTER_LOGOUT_PATH: &str = "/";

/// Authentication state tracking the current user and loading status.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AuthState {
    pub user: Option<User>,
    pub loading: bool,
}

pub struct AuthContext {
    client: ApiClient,
    state: RwLock<AuthState>,
    mounted: AtomicBool,
}

impl AuthContext {
    /// New context; `loading` stays true until [`AuthContext::mount`] finishes.
    #[must_use]
    pub fn new(client: ApiClient) -> Self {
        Self { client, state: RwLock::new(AuthState { user: None, loading: true }), mounted: AtomicBool::new(false) }
    }

    #[must_use]
    pub fn snapshot(&self) -> AuthState {
        self.state.read().unwrap_or_else(PoisonError::into_inner).clone()
    }

    #[must_use]
    pub fn user(&self) -> Option<User> {
        self.snapshot().user
    }

    fn update(&self, f: impl FnOnce(&mut AuthState)) {
        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        f(&mut state);
    }

    /// Verify the stored session. Runs at most once per context.
    pub async fn mount(&self) {
        if self.mounted.swap(true, Ordering::SeqCst) {
            return;
        }

        if self.client.session().get().is_none() {
            self.update(|s| s.loading = false);
            return;
        }

        match api::verify(&self.client).await {
            Ok(user) => self.update(|s| {
                s.user = Some(user);
                s.loading = false;
            }),
            Err(e) => {
                tracing::debug!(error = %e, "stored session rejected; clearing");
                self.client.session().clear();
                self.update(|s| {
                    s.user = None;
                    s.loading = false;
                });
            }
        }
    }

    /// Sign in and return where to navigate: `redirect` when given, otherwise
    /// the role's home page.
    ///
    /// # Errors
    ///
    /// `Validation` for blank input (nothing is sent), otherwise whatever the
    /// gateway returned.
    pub async fn login(&self, email: &str, password: &str, redirect: Option<&str>) -> Result<String, ClientError> {
        if email.trim().is_empty() || password.trim().is_empty() {
            return Err(ClientError::Validation(MISSING_CREDENTIALS_MESSAGE.into()));
        }

        let reply = api::login(&self.client, email, password).await?;
        let target = redirect
            .filter(|r| !r.is_empty())
            .map_or_else(|| home_for(reply.user.role).to_owned(), str::to_owned);
        self.update(|s| s.user = Some(reply.user));
        Ok(target)
    }

    /// Sign out. Local state is cleared whatever the gateway says; returns
    /// the page to navigate to.
    pub async fn logout(&self) -> String {
        if let Err(e) = api::logout(&self.client).await {
            tracing::warn!(error = %e, "logout request failed; clearing local session anyway");
        }
        self.client.session().clear();
        self.update(|s| s.user = None);
        AFTER_LOGOUT_PATH.to_owned()
    }
}
