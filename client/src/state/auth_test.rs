use super::*;
use std::sync::Arc;

use crate::net::api::{LOGIN_PATH, LOGOUT_PATH, VERIFY_PATH};
use crate::net::transport::test_helpers::MockTransport;
use models::{MemorySessionStore, Role, SessionStore};
use reqwest::Method;
use serde_json::{Value, json};

fn context(session: MemorySessionStore) -> (Arc<MockTransport>, Arc<MemorySessionStore>, AuthContext) {
    let transport = Arc::new(MockTransport::new());
    let session = Arc::new(session);
    let ctx = AuthContext::new(ApiClient::new(transport.clone(), session.clone()));
    (transport, session, ctx)
}

fn user_body(role: &str) -> Value {
    json!({ "id": "u-1", "name": "Rina", "email": "r@x.y", "role": role })
}

fn script_login(transport: &MockTransport, role: &str) {
    transport.on_with_cookie(
        Method::POST,
        LOGIN_PATH,
        200,
        json!({ "message": "Login successful", "token": "tok-1", "user": user_body(role) }),
        "token=tok-1; Path=/; Max-Age=604800",
    );
}

// =============================================================================
// mount
// =============================================================================

#[tokio::test]
async fn starts_loading_without_user() {
    let (_, _, ctx) = context(MemorySessionStore::new());
    assert_eq!(ctx.snapshot(), AuthState { user: None, loading: true });
}

#[tokio::test]
async fn mount_without_token_skips_verify() {
    let (transport, _, ctx) = context(MemorySessionStore::new());
    ctx.mount().await;
    assert!(transport.requests().is_empty());
    assert_eq!(ctx.snapshot(), AuthState { user: None, loading: false });
}

#[tokio::test]
async fn mount_with_valid_token_loads_user() {
    let (transport, _, ctx) = context(MemorySessionStore::with_token("tok"));
    transport.on(Method::GET, VERIFY_PATH, 200, json!({ "data": user_body("user") }));
    ctx.mount().await;
    let state = ctx.snapshot();
    assert!(!state.loading);
    assert_eq!(state.user.unwrap().id, "u-1");
}

#[tokio::test]
async fn mount_with_rejected_token_clears_session() {
    let (transport, session, ctx) = context(MemorySessionStore::with_token("stale"));
    transport.on(Method::GET, VERIFY_PATH, 401, json!({ "message": "Not authenticated" }));
    ctx.mount().await;
    assert_eq!(session.get(), None);
    assert_eq!(ctx.snapshot(), AuthState { user: None, loading: false });
}

#[tokio::test]
async fn mount_transport_failure_clears_session() {
    let (transport, session, ctx) = context(MemorySessionStore::with_token("tok"));
    transport.fail(Method::GET, VERIFY_PATH);
    ctx.mount().await;
    assert_eq!(session.get(), None);
    assert!(!ctx.snapshot().loading);
}

#[tokio::test]
async fn mount_runs_once() {
    let (transport, _, ctx) = context(MemorySessionStore::with_token("tok"));
    transport.on(Method::GET, VERIFY_PATH, 200, json!({ "data": user_body("user") }));
    ctx.mount().await;
    ctx.mount().await;
    assert_eq!(transport.count(&Method::GET, VERIFY_PATH), 1);
}

// =============================================================================
// login
// =============================================================================

#[tokio::test]
async fn login_empty_email_sends_nothing() {
    let (transport, _, ctx) = context(MemorySessionStore::new());
    let err = ctx.login("", "pw", None).await.unwrap_err();
    assert!(matches!(err, ClientError::Validation(_)));
    assert!(transport.requests().is_empty());
}

#[tokio::test]
async fn login_empty_password_sends_nothing() {
    let (transport, _, ctx) = context(MemorySessionStore::new());
    assert!(ctx.login("r@x.y", " ", None).await.is_err());
    assert!(transport.requests().is_empty());
}

#[tokio::test]
async fn login_user_navigates_home() {
    let (transport, session, ctx) = context(MemorySessionStore::new());
    script_login(&transport, "user");
    let target = ctx.login("r@x.y", "pw", None).await.unwrap();
    assert_eq!(target, "/");
    assert_eq!(ctx.user().unwrap().role, Role::User);
    assert_eq!(session.get().as_deref(), Some("tok-1"));
}

#[tokio::test]
async fn login_admin_navigates_to_dashboard() {
    let (transport, _, ctx) = context(MemorySessionStore::new());
    script_login(&transport, "admin");
    assert_eq!(ctx.login("r@x.y", "pw", None).await.unwrap(), "/dashboard");
}

#[tokio::test]
async fn login_honours_redirect() {
    let (transport, _, ctx) = context(MemorySessionStore::new());
    script_login(&transport, "admin");
    assert_eq!(ctx.login("r@x.y", "pw", Some("/checkout")).await.unwrap(), "/checkout");
}

#[tokio::test]
async fn login_failure_leaves_state_untouched() {
    let (transport, session, ctx) = context(MemorySessionStore::new());
    transport.on(Method::POST, LOGIN_PATH, 401, json!({ "message": "Invalid credentials" }));
    let err = ctx.login("r@x.y", "bad", None).await.unwrap_err();
    assert_eq!(err, ClientError::Unauthenticated);
    assert_eq!(ctx.user(), None);
    assert_eq!(session.get(), None);
}

// =============================================================================
// logout
// =============================================================================

#[tokio::test]
async fn logout_clears_user_and_session() {
    let (transport, session, ctx) = context(MemorySessionStore::new());
    script_login(&transport, "user");
    ctx.login("r@x.y", "pw", None).await.unwrap();
    transport.on_with_cookie(Method::GET, LOGOUT_PATH, 200, json!({ "message": "Logout successful" }), "token=; Max-Age=0");

    assert_eq!(ctx.logout().await, "/");
    assert_eq!(ctx.user(), None);
    assert_eq!(session.get(), None);
}

#[tokio::test]
async fn logout_clears_locally_when_gateway_fails() {
    let (transport, session, ctx) = context(MemorySessionStore::with_token("tok"));
    transport.on(Method::GET, VERIFY_PATH, 200, json!({ "data": user_body("user") }));
    ctx.mount().await;
    transport.fail(Method::GET, LOGOUT_PATH);

    assert_eq!(ctx.logout().await, "/");
    assert_eq!(ctx.user(), None);
    assert_eq!(session.get(), None);
}
