//! Route access policy: which navigable paths a visitor may reach.
//!
//! SYSTEM CONTEXT
//! ==============
//! The gateway's route guard resolves the visitor's session into an
//! [`AccessState`] and asks [`classify_access`] what to do with the request.
//! The client auth context uses [`home_for`] to pick a landing page after
//! login. Keeping the decision pure keeps the whole table testable without a
//! server or an upstream.
//!
//! DESIGN
//! ======
//! Paths are classified by static prefix lists checked in a fixed order
//! (admin-only, user-protected, auth-only); the first hit wins and anything
//! else is public. A prefix matches the path itself or the path followed by a
//! `/`, so `/cart` covers `/cart/42` but not `/cartoon`.

#[cfg(test)]
#[path = "access_test.rs"]
mod access_test;

use crate::user::{Role, User};

pub const ADMIN_ONLY_PREFIXES: &[&str] = &["/dashboard", "/admin"];
pub const USER_PROTECTED_PREFIXES: &[&str] = &["/cart", "/checkout", "/profile", "/transactions"];
pub const AUTH_ONLY_PREFIXES: &[&str] = &["/login", "/register"];

/// Storefront pages an admin is bounced away from.
const ADMIN_BOUNCED_PATHS: &[&str] = &["/", "/cart", "/profile"];

const LOGIN_PATH: &str = "/login";
const HOME_PATH: &str = "/";
const DASHBOARD_PATH: &str = "/dashboard";

/// Access class of a navigable path.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RouteClass {
    AdminOnly,
    UserProtected,
    AuthOnly,
    Public,
}

/// What the guard knows about the visitor once the cookie has been checked.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AccessState {
    NoToken,
    /// A cookie was present but verification failed for any reason.
    TokenInvalid,
    TokenValidUser,
    TokenValidAdmin,
}

impl AccessState {
    /// State for a verified user.
    #[must_use]
    pub fn for_user(user: &User) -> Self {
        match user.role {
            Role::Admin => Self::TokenValidAdmin,
            Role::User => Self::TokenValidUser,
        }
    }
}

/// Guard verdict for one request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Decision {
    Allow,
    RedirectTo { location: String, clear_session: bool },
}

impl Decision {
    fn redirect(location: impl Into<String>) -> Self {
        Self::RedirectTo { location: location.into(), clear_session: false }
    }
}

/// Whether `path` equals `prefix` or continues it at a `/` boundary.
#[must_use]
pub fn matches_prefix(path: &str, prefix: &str) -> bool {
    path == prefix || path.strip_prefix(prefix).is_some_and(|rest| rest.starts_with('/'))
}

/// Classify `path` (no query string) against the prefix lists.
#[must_use]
pub fn classify_path(path: &str) -> RouteClass {
    let tables = [
        (RouteClass::AdminOnly, ADMIN_ONLY_PREFIXES),
        (RouteClass::UserProtected, USER_PROTECTED_PREFIXES),
        (RouteClass::AuthOnly, AUTH_ONLY_PREFIXES),
    ];
    tables
        .into_iter()
        .find(|(_, prefixes)| prefixes.iter().any(|p| matches_prefix(path, p)))
        .map_or(RouteClass::Public, |(class, _)| class)
}

/// `/login?redirectedFrom=<path>` with the original path form-encoded.
#[must_use]
pub fn login_redirect(path: &str) -> String {
    let encoded: String = url::form_urlencoded::byte_serialize(path.as_bytes()).collect();
    format!("{LOGIN_PATH}?redirectedFrom={encoded}")
}

/// Decide whether a visitor in `state` may load `path`.
#[must_use]
pub fn classify_access(path: &str, state: &AccessState) -> Decision {
    let class = classify_path(path);
    match state {
        AccessState::NoToken => match class {
            RouteClass::AdminOnly | RouteClass::UserProtected => Decision::redirect(login_redirect(path)),
            RouteClass::AuthOnly | RouteClass::Public => Decision::Allow,
        },
        AccessState::TokenInvalid => Decision::RedirectTo { location: LOGIN_PATH.to_owned(), clear_session: true },
        AccessState::TokenValidUser => match class {
            RouteClass::AuthOnly | RouteClass::AdminOnly => Decision::redirect(HOME_PATH),
            RouteClass::UserProtected | RouteClass::Public => Decision::Allow,
        },
        AccessState::TokenValidAdmin => {
            if class == RouteClass::AuthOnly || ADMIN_BOUNCED_PATHS.contains(&path) {
                Decision::redirect(DASHBOARD_PATH)
            } else {
                Decision::Allow
            }
        }
    }
}

/// Landing page after a successful login without an explicit redirect.
#[must_use]
pub fn home_for(role: Role) -> &'static str {
    match role {
        Role::Admin => DASHBOARD_PATH,
        Role::User => HOME_PATH,
    }
}
