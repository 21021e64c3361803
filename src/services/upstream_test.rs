use super::*;
use crate::config::{GatewayConfig, UpstreamTimeouts};
use crate::state::test_helpers::MockUpstream;
use axum::http::Method;
use httpmock::prelude::*;
use models::Role;

fn config_for(base_url: &str) -> GatewayConfig {
    GatewayConfig {
        port: 0,
        upstream_base_url: base_url.to_owned(),
        upstream_api_key: "key-123".into(),
        timeouts: UpstreamTimeouts { request_secs: 5, connect_secs: 2 },
        cookie_secure: false,
        public_dir: "public".into(),
    }
}

fn user_json(role: &str) -> Value {
    json!({"id": "u-1", "name": "Rina", "email": "rina@example.com", "role": role})
}

// =============================================================================
// HttpUpstream
// =============================================================================

#[tokio::test]
async fn http_send_attaches_api_key_and_bearer() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/api/v1/user")
                .header("apikey", "key-123")
                .header("authorization", "Bearer tok-9");
            then.status(200).json_body(json!({"data": {"ok": true}}));
        })
        .await;

    let upstream = HttpUpstream::new(&config_for(&server.url("/api/v1"))).unwrap();
    let reply = upstream.send(UpstreamRequest::get("user").with_token("tok-9")).await.unwrap();

    mock.assert_async().await;
    assert_eq!(reply.status, 200);
    assert_eq!(reply.body["data"]["ok"], true);
}

#[tokio::test]
async fn http_send_forwards_json_body() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST).path("/login").json_body(json!({"email": "a@b.c", "password": "pw"}));
            then.status(200).json_body(json!({"token": "t"}));
        })
        .await;

    let upstream = HttpUpstream::new(&config_for(&server.base_url())).unwrap();
    let reply = upstream
        .send(UpstreamRequest::post("login", json!({"email": "a@b.c", "password": "pw"})))
        .await
        .unwrap();

    mock.assert_async().await;
    assert_eq!(reply.body["token"], "t");
}

#[tokio::test]
async fn http_send_relays_error_status_and_body() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/carts");
            then.status(401).json_body(json!({"message": "Unauthorized"}));
        })
        .await;

    let upstream = HttpUpstream::new(&config_for(&server.base_url())).unwrap();
    let reply = upstream.send(UpstreamRequest::get("carts")).await.unwrap();
    assert_eq!(reply.status, 401);
    assert_eq!(reply.body["message"], "Unauthorized");
}

#[tokio::test]
async fn http_send_wraps_non_json_body() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/banners");
            then.status(502).body("Bad Gateway");
        })
        .await;

    let upstream = HttpUpstream::new(&config_for(&server.base_url())).unwrap();
    let reply = upstream.send(UpstreamRequest::get("banners")).await.unwrap();
    assert_eq!(reply.status, 502);
    assert_eq!(reply.body, json!({"message": "Bad Gateway"}));
}

#[tokio::test]
async fn http_send_unreachable_is_transport_error() {
    let upstream = HttpUpstream::new(&config_for("http://127.0.0.1:1")).unwrap();
    let err = upstream.send(UpstreamRequest::get("user")).await.unwrap_err();
    assert!(matches!(err, UpstreamError::Transport(_)));
}

// =============================================================================
// decode_body
// =============================================================================

#[test]
fn decode_body_empty_is_null() {
    assert_eq!(decode_body(""), Value::Null);
    assert_eq!(decode_body("  \n"), Value::Null);
}

#[test]
fn decode_body_parses_json() {
    assert_eq!(decode_body(r#"{"a":1}"#), json!({"a": 1}));
}

// =============================================================================
// typed calls
// =============================================================================

#[tokio::test]
async fn fetch_token_returns_token() {
    let upstream = MockUpstream::new();
    upstream.on(Method::POST, "login", 200, json!({"message": "ok", "token": "tok-1"}));
    let token = fetch_token(&upstream, "a@b.c", "pw").await.unwrap();
    assert_eq!(token, "tok-1");

    let sent = upstream.requests();
    assert_eq!(sent[0].body, Some(json!({"email": "a@b.c", "password": "pw"})));
    assert_eq!(sent[0].token, None);
}

#[tokio::test]
async fn fetch_token_relays_rejection() {
    let upstream = MockUpstream::new();
    upstream.on(Method::POST, "login", 401, json!({"message": "Wrong password"}));
    let err = fetch_token(&upstream, "a@b.c", "bad").await.unwrap_err();
    match err {
        UpstreamError::Status { status, message } => {
            assert_eq!(status, 401);
            assert_eq!(message, "Wrong password");
        }
        other => panic!("unexpected {other:?}"),
    }
}

#[tokio::test]
async fn fetch_token_without_token_is_schema_error() {
    let upstream = MockUpstream::new();
    upstream.on(Method::POST, "login", 200, json!({"message": "ok"}));
    let err = fetch_token(&upstream, "a@b.c", "pw").await.unwrap_err();
    assert!(matches!(err, UpstreamError::Schema(SchemaError::Missing("token"))));
}

#[tokio::test]
async fn fetch_user_decodes_envelope() {
    let upstream = MockUpstream::new();
    upstream.on(Method::GET, "user", 200, json!({"data": user_json("admin")}));
    let user = fetch_user(&upstream, "tok").await.unwrap();
    assert_eq!(user.role, Role::Admin);
    assert_eq!(upstream.requests()[0].token.as_deref(), Some("tok"));
}

#[tokio::test]
async fn fetch_user_bad_role_is_schema_error() {
    let upstream = MockUpstream::new();
    upstream.on(Method::GET, "user", 200, json!({"data": user_json("root")}));
    let err = fetch_user(&upstream, "tok").await.unwrap_err();
    assert!(matches!(err, UpstreamError::Schema(_)));
}

#[tokio::test]
async fn end_session_status_error_uses_fallback_message() {
    let upstream = MockUpstream::new();
    upstream.on(Method::GET, "logout", 500, Value::Null);
    let err = end_session(&upstream, "tok").await.unwrap_err();
    assert_eq!(err.to_string(), "upstream returned 500: Logout failed");
}
