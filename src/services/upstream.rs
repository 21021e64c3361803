//! Upstream travel API client.
//!
//! SYSTEM CONTEXT
//! ==============
//! Every piece of business data and identity lives behind the upstream REST
//! API. The gateway talks to it through the [`UpstreamApi`] trait so route and
//! service code can be exercised against a scripted mock; [`HttpUpstream`] is
//! the production implementation over `reqwest`.
//!
//! DESIGN
//! ======
//! `send` is deliberately thin: it attaches the `apiKey` header (and a bearer
//! token when given), forwards the JSON body, and hands back the status and
//! decoded body untouched so the proxy routes can relay them verbatim. The
//! typed helpers below (`fetch_token`, `fetch_user`, ...) layer status checks
//! and schema decoding on top for the auth and dashboard services.
//!
//! ERROR HANDLING
//! ==============
//! Transport failures (DNS, connect, timeout, unreadable body) surface as
//! [`UpstreamError::Transport`]. A non-JSON body is wrapped as
//! `{ "message": <text> }` so callers always see JSON.

#[cfg(test)]
#[path = "upstream_test.rs"]
mod tests;

use std::time::Duration;

use async_trait::async_trait;
use axum::http::Method;
use models::envelope::message_of;
use models::{Envelope, LoginEnvelope, SchemaError, User};
use serde::de::DeserializeOwned;
use serde_json::{Value, json};

use crate::config::GatewayConfig;

const API_KEY_HEADER: &str = "apiKey";

// =============================================================================
// TYPES
// =============================================================================

/// Errors from talking to the upstream API.
#[derive(Debug, thiserror::Error)]
pub enum UpstreamError {
    /// The request never produced a readable response.
    #[error("upstream transport failed: {0}")]
    Transport(String),

    /// The upstream answered with a non-success status.
    #[error("upstream returned {status}: {message}")]
    Status { status: u16, message: String },

    /// A success reply did not match the expected schema.
    #[error(transparent)]
    Schema(#[from] SchemaError),
}

/// One call to the upstream. `path` is relative to the base URL.
#[derive(Debug, Clone, PartialEq)]
pub struct UpstreamRequest {
    pub method: Method,
    pub path: String,
    pub token: Option<String>,
    pub body: Option<Value>,
}

impl UpstreamRequest {
    #[must_use]
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self { method, path: path.into(), token: None, body: None }
    }

    #[must_use]
    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    #[must_use]
    pub fn post(path: impl Into<String>, body: Value) -> Self {
        Self::new(Method::POST, path).with_body(body)
    }

    #[must_use]
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    #[must_use]
    pub fn with_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }
}

/// Raw upstream answer.
#[derive(Debug, Clone, PartialEq)]
pub struct UpstreamReply {
    pub status: u16,
    pub body: Value,
}

impl UpstreamReply {
    #[must_use]
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Turn a non-2xx reply into [`UpstreamError::Status`].
    ///
    /// # Errors
    ///
    /// Returns the status error when the reply is not a success.
    pub fn error_for_status(self, fallback: &str) -> Result<Self, UpstreamError> {
        if self.is_success() {
            return Ok(self);
        }
        let message = message_of(&self.body).unwrap_or_else(|| fallback.to_owned());
        Err(UpstreamError::Status { status: self.status, message })
    }
}

/// Transport seam for the upstream API.
#[async_trait]
pub trait UpstreamApi: Send + Sync {
    async fn send(&self, request: UpstreamRequest) -> Result<UpstreamReply, UpstreamError>;
}

// =============================================================================
// HTTP CLIENT
// =============================================================================

pub struct HttpUpstream {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl HttpUpstream {
    /// Build a client with the configured timeouts.
    ///
    /// # Errors
    ///
    /// Returns [`UpstreamError::Transport`] if the reqwest client cannot be built.
    pub fn new(config: &GatewayConfig) -> Result<Self, UpstreamError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeouts.request_secs))
            .connect_timeout(Duration::from_secs(config.timeouts.connect_secs))
            .build()
            .map_err(|e| UpstreamError::Transport(e.to_string()))?;
        Ok(Self { http, base_url: config.upstream_base_url.clone(), api_key: config.upstream_api_key.clone() })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }
}

#[async_trait]
impl UpstreamApi for HttpUpstream {
    async fn send(&self, request: UpstreamRequest) -> Result<UpstreamReply, UpstreamError> {
        let mut builder = self
            .http
            .request(request.method.clone(), self.url(&request.path))
            .header(API_KEY_HEADER, &self.api_key);
        if let Some(token) = &request.token {
            builder = builder.bearer_auth(token);
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder.send().await.map_err(|e| UpstreamError::Transport(e.to_string()))?;
        let status = response.status().as_u16();
        let text = response.text().await.map_err(|e| UpstreamError::Transport(e.to_string()))?;
        tracing::debug!(method = %request.method, path = %request.path, status, "upstream call");

        Ok(UpstreamReply { status, body: decode_body(&text) })
    }
}

fn decode_body(text: &str) -> Value {
    if text.trim().is_empty() {
        return Value::Null;
    }
    serde_json::from_str(text).unwrap_or_else(|_| json!({ "message": text }))
}

// =============================================================================
// TYPED CALLS
// =============================================================================

/// `POST /login`, returning the session token.
///
/// # Errors
///
/// [`UpstreamError::Status`] when credentials are rejected, `Schema` when the
/// success reply carries no token.
pub async fn fetch_token(api: &dyn UpstreamApi, email: &str, password: &str) -> Result<String, UpstreamError> {
    let reply = api
        .send(UpstreamRequest::post("login", json!({ "email": email, "password": password })))
        .await?
        .error_for_status("Login failed")?;
    let (_, token) = LoginEnvelope::from_value(&reply.body)?;
    Ok(token)
}

/// `GET /user` for the identity behind `token`.
///
/// # Errors
///
/// Any transport, status or schema failure.
pub async fn fetch_user(api: &dyn UpstreamApi, token: &str) -> Result<User, UpstreamError> {
    fetch_data(api, "user", token).await
}

/// `GET /logout`, ending the upstream session.
///
/// # Errors
///
/// Any transport or status failure.
pub async fn end_session(api: &dyn UpstreamApi, token: &str) -> Result<(), UpstreamError> {
    api.send(UpstreamRequest::get("logout").with_token(token))
        .await?
        .error_for_status("Logout failed")?;
    Ok(())
}

/// `GET <path>` decoding the envelope's `data` as `T`.
///
/// # Errors
///
/// Any transport, status or schema failure.
pub async fn fetch_data<T: DeserializeOwned>(api: &dyn UpstreamApi, path: &str, token: &str) -> Result<T, UpstreamError> {
    let reply = api
        .send(UpstreamRequest::get(path).with_token(token))
        .await?
        .error_for_status("Upstream request failed")?;
    Ok(Envelope::<T>::from_value(&reply.body)?.data)
}
